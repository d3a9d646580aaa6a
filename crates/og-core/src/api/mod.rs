//! API adapter over the metadata and asset canisters.
//!
//! Hides the two-canister topology behind one interface: metadata replies
//! are decoded from JSON text, and graphic binaries are pulled from whichever
//! asset canister the graphic record points at and returned as data URLs.
//!
//! Every operation logs its failure with the operation name and re-raises.

pub mod asset;
pub mod data_url;
pub mod decode;
pub mod metadata;

use crate::{
    dto::{CollectionMetadata, GraphicMetadata},
    error::Error,
    infra::agent::Agent,
    log,
    log::Topic,
};
use asset::AssetActor;
use candid::Principal;
use data_url::png_data_url;
use decode::decode_payload;
use metadata::{MetadataActor, MetadataMethod};
use serde::de::DeserializeOwned;
use std::{future::Future, rc::Rc};

///
/// GalleryApi
///

pub struct GalleryApi<A: Agent> {
    agent: Rc<A>,
    metadata: MetadataActor<A>,
}

impl<A: Agent> GalleryApi<A> {
    #[must_use]
    pub fn new(agent: Rc<A>, metadata_canister: Principal) -> Self {
        let metadata = MetadataActor::new(Rc::clone(&agent), metadata_canister);

        Self { agent, metadata }
    }

    #[must_use]
    pub const fn agent(&self) -> &Rc<A> {
        &self.agent
    }

    #[must_use]
    pub const fn metadata_canister(&self) -> Principal {
        self.metadata.canister_id()
    }

    /// All registered collection ids.
    pub async fn fetch_collections(&self) -> Result<Vec<u64>, Error> {
        Self::decoded(
            MetadataMethod::FetchCollections,
            self.metadata.fetch_collections(),
        )
        .await
    }

    pub async fn fetch_collection(&self, collection_id: u64) -> Result<CollectionMetadata, Error> {
        Self::decoded(
            MetadataMethod::FetchCollection,
            self.metadata.fetch_collection(collection_id),
        )
        .await
    }

    /// Graphic ids (OGIDs) registered under a collection.
    pub async fn fetch_graphics(&self, collection_id: u64) -> Result<Vec<u64>, Error> {
        Self::decoded(
            MetadataMethod::FetchGraphics,
            self.metadata.fetch_graphics(collection_id),
        )
        .await
    }

    pub async fn fetch_graphic(&self, ogid: u64) -> Result<GraphicMetadata, Error> {
        Self::decoded(
            MetadataMethod::FetchGraphic,
            self.metadata.fetch_graphic(ogid),
        )
        .await
    }

    /// Resolve a graphic to a `data:image/png;base64,` URL.
    ///
    /// Looks up the graphic record, then reads `asset` from the asset canister
    /// named by `canister_id`. Returns a complete URL or an error.
    pub async fn retrieve_asset(&self, ogid: u64) -> Result<String, Error> {
        let graphic = self.fetch_graphic(ogid).await?;

        let asset = AssetActor::new(Rc::clone(&self.agent), graphic.canister_id);
        let bytes = asset.retrieve(&graphic.asset).await.inspect_err(|err| {
            log!(
                Topic::Api,
                Error,
                "retrieve_asset: {}::{} for graphic {ogid} failed: {err}",
                graphic.canister_id,
                graphic.asset,
            );
        })?;

        Ok(png_data_url(&bytes))
    }

    async fn decoded<T, F>(method: MetadataMethod, call: F) -> Result<T, Error>
    where
        T: DeserializeOwned,
        F: Future<Output = Result<String, Error>>,
    {
        let name = method.as_str();
        let result = match call.await {
            Ok(payload) => decode_payload(name, &payload),
            Err(err) => Err(err),
        };

        result.inspect_err(|err| log!(Topic::Api, Error, "{name} error: {err}"))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::RemoteCallError,
        test::{FakeAgent, asset_canister, metadata_canister},
    };
    use futures::executor::block_on;

    fn api(agent: FakeAgent) -> GalleryApi<FakeAgent> {
        GalleryApi::new(Rc::new(agent), metadata_canister())
    }

    #[test]
    fn fetch_collections_decodes_id_list() {
        let agent = FakeAgent::new();
        agent.add_collection(7, "Seven", &[]);
        agent.add_collection(3, "Three", &[]);

        let ids = block_on(api(agent).fetch_collections()).unwrap();
        assert_eq!(ids, vec![7, 3]);
    }

    #[test]
    fn fetch_collection_returns_metadata() {
        let agent = FakeAgent::new();
        agent.add_collection(7, "Seven", &[]);

        let meta = block_on(api(agent).fetch_collection(7)).unwrap();
        assert_eq!(meta.collection_id, Some(7));
        assert_eq!(meta.title.as_deref(), Some("Seven"));
    }

    #[test]
    fn fetch_graphics_lists_ogids() {
        let agent = FakeAgent::new();
        agent.add_collection(1, "One", &[11, 12]);

        let ids = block_on(api(agent).fetch_graphics(1)).unwrap();
        assert_eq!(ids, vec![11, 12]);
    }

    #[test]
    fn unknown_collection_surfaces_service_error() {
        let agent = FakeAgent::new();

        let err = block_on(api(agent).fetch_collection(404)).unwrap_err();
        assert!(matches!(
            err,
            Error::RemoteCall(RemoteCallError::Service { ref code, .. })
                if code == "FETCH_COLLECTION_FAILED"
        ));
    }

    #[test]
    fn rejection_is_logged_and_reraised() {
        crate::log::clear();
        let agent = FakeAgent::new();
        agent.reject_method("fetch_collections");

        let err = block_on(api(agent).fetch_collections()).unwrap_err();
        assert!(err.is_remote_call());

        let logged = crate::log::entries(10);
        assert!(
            logged
                .iter()
                .any(|e| e.message.starts_with("fetch_collections error"))
        );
    }

    #[test]
    fn malformed_metadata_is_decode_error() {
        let agent = FakeAgent::new();
        agent.add_collection(1, "One", &[]);
        agent.set_raw_reply("fetch_collection", 1, "{ not json");

        let err = block_on(api(agent).fetch_collection(1)).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn non_text_reply_is_decode_error() {
        let agent = FakeAgent::new();
        agent.set_candid_reply("fetch_collections", None, candid::encode_one(5u64).unwrap());

        let err = block_on(api(agent).fetch_collections()).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn retrieve_asset_returns_png_data_url() {
        let agent = FakeAgent::new();
        agent.add_collection(1, "One", &[]);
        agent.add_graphic(1, 500, asset_canister(1), "p.png", &[0x89, 0x50, 0x4E, 0x47]);

        let url = block_on(api(agent).retrieve_asset(500)).unwrap();
        assert_eq!(url, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn retrieve_asset_targets_the_graphic_canister() {
        let agent = FakeAgent::new();
        agent.add_collection(1, "One", &[]);
        agent.add_graphic(1, 500, asset_canister(2), "a.png", &[1, 2, 3]);

        let api = api(agent);
        block_on(api.retrieve_asset(500)).unwrap();

        let calls = api.agent().calls();
        let last = calls.last().unwrap();
        assert_eq!(last.canister_id, asset_canister(2));
        assert_eq!(last.method, "retrieve");
    }

    #[test]
    fn retrieve_asset_fails_whole_on_asset_rejection() {
        let agent = FakeAgent::new();
        agent.add_collection(1, "One", &[]);
        agent.add_graphic(1, 500, asset_canister(1), "a.png", &[1]);
        agent.reject_method("retrieve");

        let err = block_on(api(agent).retrieve_asset(500)).unwrap_err();
        assert!(err.is_remote_call());
    }

    #[test]
    fn retrieve_asset_fails_on_missing_asset_path() {
        let agent = FakeAgent::new();
        agent.set_raw_reply(
            "fetch_graphic",
            9,
            r#"{"ogid": 9, "canister_id": "ryjl3-tyaaa-aaaaa-aaaba-cai"}"#,
        );

        let api = api(agent);
        let err = block_on(api.retrieve_asset(9)).unwrap_err();
        assert!(err.is_decode());
        assert_eq!(api.agent().call_count("retrieve"), 0);
    }
}
