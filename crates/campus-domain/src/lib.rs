//! Domain types shared across the campus-market workspace.
//!
//! This crate contains only pure types with no framework dependencies, so
//! every layer from the schema entities to the integration tests can use
//! the same role and status enums.

pub mod email;
pub mod role;
pub mod status;
