use crate::{error::Error, infra::actor::Actor, infra::agent::Agent};
use candid::Principal;
use std::rc::Rc;

///
/// MetadataMethod
/// Query methods exposed by the metadata canister; all reply with JSON text.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetadataMethod {
    FetchCollections,
    FetchCollection,
    FetchGraphics,
    FetchGraphic,
}

impl MetadataMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FetchCollections => "fetch_collections",
            Self::FetchCollection => "fetch_collection",
            Self::FetchGraphics => "fetch_graphics",
            Self::FetchGraphic => "fetch_graphic",
        }
    }
}

///
/// MetadataActor
///

pub struct MetadataActor<A: Agent> {
    actor: Actor<A>,
}

impl<A: Agent> MetadataActor<A> {
    #[must_use]
    pub const fn new(agent: Rc<A>, canister_id: Principal) -> Self {
        Self {
            actor: Actor::new(agent, canister_id),
        }
    }

    #[must_use]
    pub const fn canister_id(&self) -> Principal {
        self.actor.canister_id()
    }

    pub async fn fetch_collections(&self) -> Result<String, Error> {
        self.actor
            .call(MetadataMethod::FetchCollections.as_str(), ())
            .await
    }

    pub async fn fetch_collection(&self, collection_id: u64) -> Result<String, Error> {
        self.actor
            .call(MetadataMethod::FetchCollection.as_str(), (collection_id,))
            .await
    }

    pub async fn fetch_graphics(&self, collection_id: u64) -> Result<String, Error> {
        self.actor
            .call(MetadataMethod::FetchGraphics.as_str(), (collection_id,))
            .await
    }

    pub async fn fetch_graphic(&self, ogid: u64) -> Result<String, Error> {
        self.actor
            .call(MetadataMethod::FetchGraphic.as_str(), (ogid,))
            .await
    }
}
