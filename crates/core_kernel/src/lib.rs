//! Core Kernel - Foundational types shared by the PMB workspace
//!
//! This crate provides the building blocks used by the domain and interface
//! crates:
//! - Strongly-typed identifiers for claims and members
//! - Port infrastructure for swappable adapters (audit sinks and the like)

pub mod identifiers;
pub mod ports;

pub use identifiers::{ClaimId, MemberId};
pub use ports::{DomainPort, PortError};
