//! Aggregation store.
//!
//! Caches the gallery's collections and drives the two concurrent batches:
//! the initial metadata load and the artwork refresh. Both batches isolate
//! failures per collection and never fail as a whole.
//!
//! The store runs on a single-threaded executor. State lives in `RefCell`s and
//! no borrow is held across an `.await`, so every mutation between suspension
//! points is atomic.

use crate::{
    api::GalleryApi,
    dto::{ArtworkReport, Collection, LoadReport, LoadStatus},
    error::Error,
    infra::agent::Agent,
    log,
    log::Topic,
    rand::GraphicPicker,
};
use futures::future::join_all;
use std::{
    cell::{Cell, RefCell},
    collections::HashSet,
    rc::Rc,
};

///
/// GalleryStore
///

pub struct GalleryStore<A: Agent> {
    api: Rc<GalleryApi<A>>,
    collections: RefCell<Vec<Collection>>,
    loading: Cell<bool>,
    generation: Cell<u64>,
    picker: RefCell<GraphicPicker>,
}

impl<A: Agent> GalleryStore<A> {
    #[must_use]
    pub fn new(api: Rc<GalleryApi<A>>, seed: [u8; 32]) -> Self {
        Self {
            api,
            collections: RefCell::new(Vec::new()),
            loading: Cell::new(false),
            generation: Cell::new(0),
            picker: RefCell::new(GraphicPicker::from_seed(seed)),
        }
    }

    #[must_use]
    pub const fn api(&self) -> &Rc<GalleryApi<A>> {
        &self.api
    }

    //
    // ──────────────────────────────── READS ────────────────────────────────
    //

    /// Snapshot of the cached collections in load order.
    #[must_use]
    pub fn collections(&self) -> Vec<Collection> {
        self.collections.borrow().clone()
    }

    #[must_use]
    pub fn collection(&self, id: u64) -> Option<Collection> {
        self.collections
            .borrow()
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        !self.collections.borrow().is_empty()
    }

    //
    // ──────────────────────────────── WRITES ───────────────────────────────
    //

    /// Drop the cache so the next load fetches again.
    ///
    /// A load in flight at this point discards its batch.
    pub fn invalidate(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
        self.collections.borrow_mut().clear();
        log!(Topic::Store, Info, "collection cache invalidated");
    }

    pub fn reseed(&self, seed: [u8; 32]) {
        self.picker.borrow_mut().reseed(seed);
    }

    /// Load every collection once.
    ///
    /// No-op when the cache is populated or another load is in flight.
    /// The id list is fetched first; details and graphics for each id are
    /// then fetched concurrently and reassembled in id-list order. A
    /// collection whose fetches fail is logged and left out.
    pub async fn load_collections(&self) -> LoadReport {
        if self.is_loaded() {
            return LoadReport::skipped(LoadStatus::Cached);
        }
        if self.loading.replace(true) {
            return LoadReport::skipped(LoadStatus::InProgress);
        }
        let _guard = LoadingGuard(&self.loading);
        let generation = self.generation.get();

        let ids = match self.api.fetch_collections().await {
            Ok(ids) => dedup_ids(ids),
            Err(err) => {
                log!(Topic::Store, Error, "failed to load collections: {err}");
                return LoadReport::skipped(LoadStatus::ListFailed);
            }
        };

        let results = join_all(ids.iter().map(|&id| self.load_one(id))).await;

        let mut loaded = Vec::with_capacity(results.len());
        let mut failed = Vec::new();
        for (id, result) in ids.into_iter().zip(results) {
            match result {
                Ok(collection) => loaded.push(collection),
                Err(err) => {
                    log!(Topic::Store, Warn, "error loading collection {id}: {err}");
                    failed.push(id);
                }
            }
        }

        if self.generation.get() != generation {
            log!(
                Topic::Store,
                Info,
                "cache invalidated during load, discarding {} collections",
                loaded.len()
            );
            return LoadReport {
                status: LoadStatus::Invalidated,
                loaded: 0,
                failed,
            };
        }

        let report = LoadReport {
            status: LoadStatus::Fetched,
            loaded: loaded.len() as u64,
            failed,
        };
        log!(
            Topic::Store,
            Ok,
            "loaded {} collections ({} failed)",
            report.loaded,
            report.failed.len()
        );
        *self.collections.borrow_mut() = loaded;

        report
    }

    /// Refresh each collection's image from one random graphic.
    ///
    /// Collections without graphics are skipped without any call. A failed
    /// retrieval keeps the previous `image_url`.
    pub async fn update_artwork(&self) -> ArtworkReport {
        let mut report = ArtworkReport::default();

        let targets: Vec<(u64, u64)> = {
            let collections = self.collections.borrow();
            let mut picker = self.picker.borrow_mut();

            collections
                .iter()
                .filter_map(|c| match picker.pick(&c.graphics) {
                    Some(ogid) => Some((c.id, ogid)),
                    None => {
                        report.skipped.push(c.id);
                        None
                    }
                })
                .collect()
        };

        let outcomes = join_all(
            targets
                .into_iter()
                .map(|(id, ogid)| async move { (id, self.refresh_artwork(id, ogid).await) }),
        )
        .await;

        for (id, updated) in outcomes {
            if updated {
                report.updated.push(id);
            } else {
                report.failed.push(id);
            }
        }

        report
    }

    async fn load_one(&self, id: u64) -> Result<Collection, Error> {
        let meta = self.api.fetch_collection(id).await?;
        let graphics = self.api.fetch_graphics(id).await?;

        Ok(Collection::from_parts(id, meta, graphics))
    }

    /// Retrieve one graphic and write it to collection `id`; true on success.
    async fn refresh_artwork(&self, id: u64, ogid: u64) -> bool {
        let url = match self.api.retrieve_asset(ogid).await {
            Ok(url) => url,
            Err(err) => {
                log!(
                    Topic::Store,
                    Warn,
                    "error retrieving asset {ogid} for collection {id}: {err}"
                );
                return false;
            }
        };

        let mut collections = self.collections.borrow_mut();
        match collections.iter_mut().find(|c| c.id == id) {
            Some(collection) => {
                collection.image_url = url;
                true
            }
            None => {
                log!(
                    Topic::Store,
                    Info,
                    "collection {id} left the cache before its artwork arrived"
                );
                false
            }
        }
    }
}

///
/// LoadingGuard
/// Clears the loading flag on every exit path.
///

struct LoadingGuard<'a>(&'a Cell<bool>);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Keep the first occurrence of each id.
fn dedup_ids(ids: Vec<u64>) -> Vec<u64> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

///
/// TESTS
///
