use candid::Principal;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

///
/// GraphicMetadata
/// Reply of `fetch_graphic`. `asset` and `canister_id` locate the binary.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GraphicMetadata {
    pub ogid: u64,
    #[serde(default)]
    pub collection_id: Option<u64>,
    pub asset: String,
    #[serde(
        deserialize_with = "principal_from_text",
        serialize_with = "principal_to_text"
    )]
    pub canister_id: Principal,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub asset_hash: Option<String>,
    #[serde(default)]
    pub registration_timestamp: Option<String>,
}

fn principal_from_text<'de, D>(deserializer: D) -> Result<Principal, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;

    Principal::from_text(&text).map_err(|err| D::Error::custom(format!("canister_id: {err}")))
}

fn principal_to_text<S>(principal: &Principal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&principal.to_text())
}

///
/// TESTS
///
