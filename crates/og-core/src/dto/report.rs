use candid::CandidType;
use serde::{Deserialize, Serialize};

///
/// LoadStatus
///

#[derive(CandidType, Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum LoadStatus {
    /// A batch ran against the metadata canister.
    Fetched,
    /// The cache was already populated; no calls were made.
    Cached,
    /// Another load is in flight; no calls were made.
    InProgress,
    /// The collection id list could not be fetched.
    ListFailed,
    /// The cache was invalidated mid-load; the fetched batch was discarded.
    Invalidated,
}

///
/// LoadReport
///

#[derive(CandidType, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct LoadReport {
    pub status: LoadStatus,
    pub loaded: u64,
    pub failed: Vec<u64>,
}

impl LoadReport {
    #[must_use]
    pub const fn skipped(status: LoadStatus) -> Self {
        Self {
            status,
            loaded: 0,
            failed: Vec::new(),
        }
    }
}

///
/// ArtworkReport
/// Collection ids grouped by what `update_artwork` did with them.
///

#[derive(CandidType, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ArtworkReport {
    pub updated: Vec<u64>,
    pub failed: Vec<u64>,
    pub skipped: Vec<u64>,
}
