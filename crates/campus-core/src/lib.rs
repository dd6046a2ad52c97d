//! Service plumbing shared by every binary in the workspace: tracing setup,
//! health endpoints, request-id middleware and serde helpers.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
