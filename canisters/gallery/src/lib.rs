//!
//! OG Gallery canister.
//!
//! Owns the process-wide gallery context and serves the cached collections
//! and their artwork to the frontend.
//!

use candid::{CandidType, Principal};
use ic_cdk::{export_candid, init, post_upgrade, query, update};
use og_core::{
    GalleryConfig, GalleryContext, IcAgent,
    dto::{ArtworkReport, Collection, LoadReport},
    log,
    log::{LOG_CAPACITY, LogEntry, Topic},
    rand::{fetch_seed, seed_from_time},
};
use serde::Deserialize;
use std::{cell::RefCell, rc::Rc, time::Duration};

thread_local! {
    static CONTEXT: RefCell<Option<Rc<GalleryContext<IcAgent>>>> = const { RefCell::new(None) };
}

///
/// GalleryInitArgs
/// Optional overrides for the values baked in at build time.
///

#[derive(CandidType, Clone, Debug, Default, Deserialize)]
pub struct GalleryInitArgs {
    pub network: Option<String>,
    pub metadata_canister: Option<Principal>,
}

//
// ──────────────────────────────── LIFECYCLE ────────────────────────────────
//

#[init]
fn init(args: Option<GalleryInitArgs>) {
    install(args.unwrap_or_default());
}

// The cache is not persisted; an upgrade starts from an empty store.
#[post_upgrade]
fn post_upgrade(args: Option<GalleryInitArgs>) {
    install(args.unwrap_or_default());
}

fn install(args: GalleryInitArgs) {
    let config = GalleryConfig::from_build_env_with(args.network.as_deref(), args.metadata_canister)
        .unwrap_or_else(|err| ic_cdk::trap(format!("invalid gallery config: {err}")));

    let seed = seed_from_time(
        ic_cdk::api::time(),
        ic_cdk::api::canister_self().as_slice(),
    );

    log!(
        Topic::Init,
        Info,
        "gallery on {} using metadata canister {}",
        config.network,
        config.metadata_canister
    );
    let ctx = Rc::new(GalleryContext::new(config, IcAgent, seed));
    CONTEXT.with_borrow_mut(|slot| *slot = Some(ctx));

    ic_cdk_timers::set_timer(Duration::ZERO, async {
        let ctx = ready().await;
        match fetch_seed(Rc::clone(ctx.api().agent())).await {
            Ok(seed) => ctx.store().reseed(seed),
            Err(err) => log!(Topic::Init, Warn, "raw_rand reseed failed: {err}"),
        }
    });
}

fn context() -> Rc<GalleryContext<IcAgent>> {
    CONTEXT
        .with_borrow(Clone::clone)
        .unwrap_or_else(|| ic_cdk::trap("gallery context is not initialised"))
}

/// Context with its trust bootstrap completed.
async fn ready() -> Rc<GalleryContext<IcAgent>> {
    let ctx = context();
    ctx.bootstrap().await;

    ctx
}

//
// ──────────────────────────────── ENDPOINTS ────────────────────────────────
//

#[update]
async fn load_collections() -> LoadReport {
    let ctx = ready().await;

    ctx.store().load_collections().await
}

#[update]
async fn update_artwork() -> ArtworkReport {
    let ctx = ready().await;

    ctx.store().update_artwork().await
}

#[update]
fn invalidate_collections() {
    context().store().invalidate();
}

#[query]
fn collections() -> Vec<Collection> {
    context().store().collections()
}

#[query]
fn collection(id: u64) -> Option<Collection> {
    context().store().collection(id)
}

#[query]
fn loading() -> bool {
    context().store().is_loading()
}

#[query]
fn gallery_config() -> GalleryConfig {
    context().config().clone()
}

#[query]
fn log_entries(limit: u32) -> Vec<LogEntry> {
    let limit = usize::try_from(limit).unwrap_or(LOG_CAPACITY);

    og_core::log::entries(limit.min(LOG_CAPACITY))
}

export_candid!();
