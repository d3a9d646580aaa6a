//! In-memory stand-ins for the metadata and asset canisters.

mod agent;

pub use agent::{FakeAgent, RecordedCall, YieldNow};

use candid::Principal;

/// Principal used for the fake metadata canister.
#[must_use]
pub fn metadata_canister() -> Principal {
    Principal::from_slice(&[1; 29])
}

/// Principal of the `n`th fake asset canister.
#[must_use]
pub fn asset_canister(n: u8) -> Principal {
    Principal::from_slice(&[0xA5, n])
}
