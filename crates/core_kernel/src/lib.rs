//! Core Kernel - Foundational types shared by the product catalogue crates
//!
//! This crate provides the building blocks every other crate depends on:
//! - Strongly-typed identifiers
//! - The port error type and marker traits for hexagonal ports
//! - Adapter health reporting

pub mod identifiers;
pub mod ports;

pub use identifiers::{ProductId, IdentifierError};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
