//! Data transfer objects.
//!
//! Remote metadata records decoded from JSON, the store's collection record,
//! and the reports returned by store batches.

pub mod collection;
pub mod graphic;
pub mod report;

pub use collection::{Collection, CollectionMetadata};
pub use graphic::GraphicMetadata;
pub use report::{ArtworkReport, LoadReport, LoadStatus};
