use crate::{
    api::GalleryApi, config::GalleryConfig, infra::agent::Agent, log, log::Topic,
    store::GalleryStore,
};
use std::{cell::Cell, rc::Rc};

///
/// GalleryContext
/// Owns the agent, adapter and store for one process.
///
/// Initialization order:
/// 1. the agent is bound to the configured metadata canister;
/// 2. on non-mainnet networks the root key is fetched once (`bootstrap`),
///    before any metadata call is issued through the context;
/// 3. the store is created over the shared adapter.
///

pub struct GalleryContext<A: Agent> {
    config: GalleryConfig,
    api: Rc<GalleryApi<A>>,
    store: GalleryStore<A>,
    bootstrapped: Cell<bool>,
}

impl<A: Agent> GalleryContext<A> {
    /// Wire the context without contacting the network.
    #[must_use]
    pub fn new(config: GalleryConfig, agent: A, seed: [u8; 32]) -> Self {
        let api = Rc::new(GalleryApi::new(Rc::new(agent), config.metadata_canister));
        let store = GalleryStore::new(Rc::clone(&api), seed);

        Self {
            config,
            api,
            store,
            bootstrapped: Cell::new(false),
        }
    }

    /// Wire the context and run the trust bootstrap.
    pub async fn connect(config: GalleryConfig, agent: A, seed: [u8; 32]) -> Self {
        let ctx = Self::new(config, agent, seed);
        ctx.bootstrap().await;

        ctx
    }

    /// Fetch the root key once when the network requires it.
    ///
    /// A failed fetch is logged and does not block later calls; they will
    /// fail on their own if the replica cannot be trusted.
    pub async fn bootstrap(&self) {
        if self.bootstrapped.replace(true) {
            return;
        }
        if !self.config.network.requires_root_key() {
            return;
        }

        match self.api.agent().fetch_root_key().await {
            Ok(()) => log!(Topic::Init, Ok, "root key fetched for {}", self.config.host),
            Err(err) => log!(
                Topic::Init,
                Warn,
                "unable to fetch root key from {}, is the local replica running? {err}",
                self.config.host
            ),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &GalleryConfig {
        &self.config
    }

    #[must_use]
    pub const fn api(&self) -> &Rc<GalleryApi<A>> {
        &self.api
    }

    #[must_use]
    pub const fn store(&self) -> &GalleryStore<A> {
        &self.store
    }

    #[must_use]
    pub fn is_bootstrapped(&self) -> bool {
        self.bootstrapped.get()
    }
}

///
/// TESTS
///
