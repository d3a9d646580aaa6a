use crate::error::RemoteCallError;
use async_trait::async_trait;
use candid::Principal;
use ic_cdk::call::Call as IcCall;

///
/// Agent
/// Performs raw candid calls against canisters.
///
/// Implementations are driven on a single-threaded executor, so futures are
/// not required to be `Send`.
///

#[async_trait(?Send)]
pub trait Agent {
    /// One-time trust bootstrap for non-mainnet replicas.
    async fn fetch_root_key(&self) -> Result<(), RemoteCallError> {
        Ok(())
    }

    /// Call `method` on `canister_id` with candid-encoded `args`, returning
    /// the candid-encoded reply.
    async fn query(
        &self,
        canister_id: Principal,
        method: &str,
        args: Vec<u8>,
    ) -> Result<Vec<u8>, RemoteCallError>;
}

///
/// IcAgent
/// Inter-canister calls through the IC system API.
///
/// Replies inside the replica are already certified, so the root key fetch
/// keeps the default no-op.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct IcAgent;

#[async_trait(?Send)]
impl Agent for IcAgent {
    async fn query(
        &self,
        canister_id: Principal,
        method: &str,
        args: Vec<u8>,
    ) -> Result<Vec<u8>, RemoteCallError> {
        let response = IcCall::unbounded_wait(canister_id, method)
            .with_raw_args(&args)
            .await
            .map_err(|err| RemoteCallError::Rejected {
                canister_id,
                method: method.to_string(),
                reason: err.to_string(),
            })?;

        Ok(response.to_vec())
    }
}
