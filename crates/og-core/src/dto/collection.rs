use candid::CandidType;
use serde::{Deserialize, Serialize};

///
/// CollectionMetadata
/// Reply of `fetch_collection`; every field may be absent.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct CollectionMetadata {
    pub collection_id: Option<u64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub artist: Option<String>,
    pub external_link: Option<String>,
    pub registration_timestamp: Option<String>,
    pub update_timestamp: Option<String>,
}

///
/// Collection
/// Gallery record owned by the store; only `image_url` changes after load.
///

#[derive(CandidType, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Collection {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub artist: String,
    pub external_link: String,
    pub registration_timestamp: String,
    pub update_timestamp: String,
    pub graphics: Vec<u64>,
    pub image_url: String,
}

impl Collection {
    /// Merge remote metadata and graphic ids, applying field defaults.
    /// Empty strings count as missing.
    #[must_use]
    pub fn from_parts(id: u64, meta: CollectionMetadata, graphics: Vec<u64>) -> Self {
        Self {
            id,
            title: non_empty(meta.title).unwrap_or_else(|| Self::default_title(id)),
            description: non_empty(meta.description).unwrap_or_default(),
            artist: non_empty(meta.artist).unwrap_or_default(),
            external_link: non_empty(meta.external_link).unwrap_or_default(),
            registration_timestamp: non_empty(meta.registration_timestamp).unwrap_or_default(),
            update_timestamp: non_empty(meta.update_timestamp).unwrap_or_default(),
            graphics,
            image_url: String::new(),
        }
    }

    #[must_use]
    pub fn default_title(id: u64) -> String {
        format!("Collection {id}")
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

///
/// TESTS
///
