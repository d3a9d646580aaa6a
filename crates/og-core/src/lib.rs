//! Core OG Gallery library.
//!
//! Resolves collection ids published by the OG metadata canister into full
//! gallery records, and fetches one representative image per collection from
//! the asset canister that stores it.
//!
//! ## Layering
//!
//! - `infra/` owns the transport seam (`Agent`) and candid actors.
//! - `api/` is the adapter: typed fetches, payload decoding, data URLs.
//! - `store/` caches collections and runs the concurrent batches.
//! - `context` wires config, adapter and store in a fixed order.
//!
//! The default flow is: context → store → api → infra.

pub mod api;
pub mod config;
pub mod context;
pub mod dto;
pub mod error;
pub mod infra;
pub mod log;
pub mod rand;
pub mod store;
#[cfg(test)]
pub mod test;

pub use {
    api::GalleryApi,
    config::{GalleryConfig, Network},
    context::GalleryContext,
    error::{DecodeError, Error, RemoteCallError},
    infra::agent::{Agent, IcAgent},
    store::GalleryStore,
};

/// Re-exported so downstream canisters share one candid version.
pub use ::candid;

pub(crate) use thiserror::Error as ThisError;

///
/// Crate Version
///

pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
