use crate::{error::Error, infra::actor::Actor, infra::agent::Agent};
use candid::Principal;
use std::rc::Rc;

pub const RETRIEVE_METHOD: &str = "retrieve";

///
/// AssetActor
/// Minimal interface of an asset canister: `retrieve : (text) -> (blob) query`.
///

pub struct AssetActor<A: Agent> {
    actor: Actor<A>,
}

impl<A: Agent> AssetActor<A> {
    #[must_use]
    pub const fn new(agent: Rc<A>, canister_id: Principal) -> Self {
        Self {
            actor: Actor::new(agent, canister_id),
        }
    }

    pub async fn retrieve(&self, path: &str) -> Result<Vec<u8>, Error> {
        self.actor.call(RETRIEVE_METHOD, (path,)).await
    }
}
