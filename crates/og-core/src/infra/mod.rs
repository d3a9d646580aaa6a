//! Transport seam and candid actors.
//!
//! `agent` performs raw calls; `actor` binds an agent to one canister and
//! owns the candid codec for a method call.

pub mod actor;
pub mod agent;
