use crate::ThisError;
use candid::{CandidType, Principal};
use serde::{Deserialize, Serialize};

///
/// Error
///
/// Crate-level error returned by every adapter operation.
/// Exactly two kinds exist: the remote side failed, or its reply could not
/// be decoded into the expected shape.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    RemoteCall(#[from] RemoteCallError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl Error {
    #[must_use]
    pub const fn is_remote_call(&self) -> bool {
        matches!(self, Self::RemoteCall(_))
    }

    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

///
/// RemoteCallError
///

#[derive(CandidType, Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
pub enum RemoteCallError {
    /// The call was rejected by the replica or never reached the canister.
    #[error("call to {canister_id}::{method} rejected: {reason}")]
    Rejected {
        canister_id: Principal,
        method: String,
        reason: String,
    },

    /// The canister replied with its JSON error envelope.
    #[error("service error {code}: {message}")]
    Service { code: String, message: String },
}

///
/// DecodeError
///

#[derive(Debug, ThisError)]
pub enum DecodeError {
    #[error("{method}: invalid json payload: {source}")]
    Json {
        method: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{method}: candid codec failed: {message}")]
    Candid { method: String, message: String },
}

impl DecodeError {
    pub(crate) fn json(method: &str, source: serde_json::Error) -> Self {
        Self::Json {
            method: method.to_string(),
            source,
        }
    }

    pub(crate) fn candid(method: &str, err: impl std::fmt::Display) -> Self {
        Self::Candid {
            method: method.to_string(),
            message: err.to_string(),
        }
    }
}
