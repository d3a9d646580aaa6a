use crate::{
    error::{DecodeError, Error},
    infra::agent::Agent,
};
use candid::{CandidType, Principal, decode_one, encode_args, utils::ArgumentEncoder};
use serde::de::DeserializeOwned;
use std::rc::Rc;

///
/// Actor
/// An agent bound to a single canister.
///

pub struct Actor<A: Agent> {
    agent: Rc<A>,
    canister_id: Principal,
}

impl<A: Agent> Actor<A> {
    #[must_use]
    pub const fn new(agent: Rc<A>, canister_id: Principal) -> Self {
        Self { agent, canister_id }
    }

    #[must_use]
    pub const fn canister_id(&self) -> Principal {
        self.canister_id
    }

    /// Encode `args`, call `method`, decode a single reply value.
    pub async fn call<Args, R>(&self, method: &str, args: Args) -> Result<R, Error>
    where
        Args: ArgumentEncoder,
        R: CandidType + DeserializeOwned,
    {
        let bytes = encode_args(args).map_err(|err| DecodeError::candid(method, err))?;
        let reply = self.agent.query(self.canister_id, method, bytes).await?;

        decode_one(&reply).map_err(|err| DecodeError::candid(method, err).into())
    }
}
