use super::metadata_canister;
use crate::{error::RemoteCallError, infra::agent::Agent};
use async_trait::async_trait;
use candid::{Principal, decode_one, encode_one};
use serde_json::json;
use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, HashSet},
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

///
/// YieldNow
/// Returns `Pending` a fixed number of times, waking itself each time.
///

pub struct YieldNow(pub u32);

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 == 0 {
            Poll::Ready(())
        } else {
            self.0 -= 1;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

///
/// RecordedCall
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordedCall {
    pub canister_id: Principal,
    pub method: String,
    pub id: Option<u64>,
    pub path: Option<String>,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
enum CallArg {
    None,
    Id(u64),
    Path(String),
}

struct FakeCollection {
    id: u64,
    title: String,
    graphics: Vec<u64>,
}

struct FakeGraphic {
    ogid: u64,
    collection_id: u64,
    asset: String,
    canister_id: Principal,
}

#[derive(Default)]
struct FakeState {
    collections: Vec<FakeCollection>,
    graphics: Vec<FakeGraphic>,
    assets: HashMap<(Principal, String), Vec<u8>>,
    rejected_methods: HashSet<String>,
    rejected_calls: HashSet<(String, CallArg)>,
    replies: HashMap<(String, CallArg), Vec<u8>>,
    delays: HashMap<(String, CallArg), u32>,
    calls: Vec<RecordedCall>,
    root_key_fails: bool,
}

///
/// FakeAgent
/// Serves metadata the way the OG backend does (JSON text, error envelopes)
/// and asset blobs per asset canister. Failures and delays can be injected
/// per method or per call.
///

#[derive(Default)]
pub struct FakeAgent {
    state: RefCell<FakeState>,
    in_flight: Cell<usize>,
    max_in_flight: Cell<usize>,
    root_key_fetches: Cell<u32>,
}

impl FakeAgent {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_collection(&self, id: u64, title: &str, graphics: &[u64]) {
        self.state.borrow_mut().collections.push(FakeCollection {
            id,
            title: title.to_string(),
            graphics: graphics.to_vec(),
        });
    }

    /// Register a graphic under `collection_id` and store its bytes on
    /// `canister_id` at `asset`.
    pub fn add_graphic(
        &self,
        collection_id: u64,
        ogid: u64,
        canister_id: Principal,
        asset: &str,
        bytes: &[u8],
    ) {
        let mut state = self.state.borrow_mut();
        if let Some(c) = state.collections.iter_mut().find(|c| c.id == collection_id)
            && !c.graphics.contains(&ogid)
        {
            c.graphics.push(ogid);
        }
        state.graphics.push(FakeGraphic {
            ogid,
            collection_id,
            asset: asset.to_string(),
            canister_id,
        });
        state
            .assets
            .insert((canister_id, asset.to_string()), bytes.to_vec());
    }

    pub fn reject_method(&self, method: &str) {
        self.state
            .borrow_mut()
            .rejected_methods
            .insert(method.to_string());
    }

    pub fn reject_call(&self, method: &str, id: u64) {
        self.state
            .borrow_mut()
            .rejected_calls
            .insert((method.to_string(), CallArg::Id(id)));
    }

    pub fn reject_path(&self, path: &str) {
        self.state
            .borrow_mut()
            .rejected_calls
            .insert(("retrieve".to_string(), CallArg::Path(path.to_string())));
    }

    /// Override the JSON text returned for `method(id)`.
    pub fn set_raw_reply(&self, method: &str, id: u64, text: &str) {
        let bytes = encode_one(text).expect("encode text reply");
        self.state
            .borrow_mut()
            .replies
            .insert((method.to_string(), CallArg::Id(id)), bytes);
    }

    /// Override the candid reply for `method`, optionally for one id only.
    pub fn set_candid_reply(&self, method: &str, id: Option<u64>, bytes: Vec<u8>) {
        let arg = id.map_or(CallArg::None, CallArg::Id);
        self.state
            .borrow_mut()
            .replies
            .insert((method.to_string(), arg), bytes);
    }

    /// Suspend `method(id)` for `polls` executor polls before replying.
    pub fn delay_call(&self, method: &str, id: u64, polls: u32) {
        self.state
            .borrow_mut()
            .delays
            .insert((method.to_string(), CallArg::Id(id)), polls);
    }

    pub fn delay_path(&self, path: &str, polls: u32) {
        self.state
            .borrow_mut()
            .delays
            .insert(("retrieve".to_string(), CallArg::Path(path.to_string())), polls);
    }

    pub fn fail_root_key(&self) {
        self.state.borrow_mut().root_key_fails = true;
    }

    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.borrow().calls.clone()
    }

    #[must_use]
    pub fn call_count(&self, method: &str) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    #[must_use]
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.get()
    }

    #[must_use]
    pub fn root_key_fetches(&self) -> u32 {
        self.root_key_fetches.get()
    }

    fn decode_arg(canister_id: Principal, method: &str, args: &[u8]) -> CallArg {
        if canister_id != metadata_canister() {
            return decode_one::<String>(args).map_or(CallArg::None, CallArg::Path);
        }
        match method {
            "fetch_collection" | "fetch_graphics" | "fetch_graphic" => {
                decode_one::<u64>(args).map_or(CallArg::None, CallArg::Id)
            }
            _ => CallArg::None,
        }
    }

    fn reply(&self, canister_id: Principal, method: &str, arg: &CallArg) -> Result<Vec<u8>, String> {
        let state = self.state.borrow();

        if state.rejected_methods.contains(method)
            || state.rejected_calls.contains(&(method.to_string(), arg.clone()))
        {
            return Err("canister rejected the call".to_string());
        }
        for key in [(method.to_string(), arg.clone()), (method.to_string(), CallArg::None)] {
            if let Some(bytes) = state.replies.get(&key) {
                return Ok(bytes.clone());
            }
        }

        if canister_id != metadata_canister() {
            let CallArg::Path(path) = arg else {
                return Err("missing asset path".to_string());
            };
            return state
                .assets
                .get(&(canister_id, path.clone()))
                .map(|bytes| encode_one(bytes).expect("encode blob"))
                .ok_or_else(|| format!("asset {path} not found"));
        }

        let text = match (method, arg) {
            ("fetch_collections", _) => {
                let ids: Vec<u64> = state.collections.iter().map(|c| c.id).collect();
                serde_json::to_string_pretty(&ids).expect("serialize ids")
            }
            ("fetch_collection", CallArg::Id(id)) => {
                match state.collections.iter().find(|c| c.id == *id) {
                    Some(c) => json!({
                        "collection_id": c.id,
                        "title": c.title,
                        "description": null,
                        "artist": "OG",
                        "external_link": null,
                        "registration_timestamp": "1712000000000000000",
                        "update_timestamp": null,
                    })
                    .to_string(),
                    None => envelope("FETCH_COLLECTION_FAILED", "Collection not found"),
                }
            }
            ("fetch_graphics", CallArg::Id(id)) => {
                match state.collections.iter().find(|c| c.id == *id) {
                    Some(c) => serde_json::to_string_pretty(&c.graphics).expect("serialize ids"),
                    None => envelope("FETCH_GRAPHICS_FAILED", "Collection not found"),
                }
            }
            ("fetch_graphic", CallArg::Id(id)) => {
                match state.graphics.iter().find(|g| g.ogid == *id) {
                    Some(g) => json!({
                        "ogid": g.ogid,
                        "collection_id": g.collection_id,
                        "asset": g.asset,
                        "title": null,
                        "description": null,
                        "asset_hash": null,
                        "registration_timestamp": "1712000000000000000",
                        "canister_id": g.canister_id.to_text(),
                    })
                    .to_string(),
                    None => envelope("FETCH_GRAPHIC_FAILED", "Graphic not found"),
                }
            }
            _ => return Err(format!("no such method {method}")),
        };

        Ok(encode_one(text).expect("encode text reply"))
    }
}

fn envelope(code: &str, message: &str) -> String {
    json!({ "error": { "code": code, "message": message } }).to_string()
}

#[async_trait(?Send)]
impl Agent for FakeAgent {
    async fn fetch_root_key(&self) -> Result<(), RemoteCallError> {
        self.root_key_fetches.set(self.root_key_fetches.get() + 1);

        if self.state.borrow().root_key_fails {
            return Err(RemoteCallError::Rejected {
                canister_id: Principal::management_canister(),
                method: "read_state".to_string(),
                reason: "replica unreachable".to_string(),
            });
        }

        Ok(())
    }

    async fn query(
        &self,
        canister_id: Principal,
        method: &str,
        args: Vec<u8>,
    ) -> Result<Vec<u8>, RemoteCallError> {
        let arg = Self::decode_arg(canister_id, method, &args);

        let delay = {
            let mut state = self.state.borrow_mut();
            state.calls.push(RecordedCall {
                canister_id,
                method: method.to_string(),
                id: match arg {
                    CallArg::Id(id) => Some(id),
                    _ => None,
                },
                path: match &arg {
                    CallArg::Path(p) => Some(p.clone()),
                    _ => None,
                },
            });
            state
                .delays
                .get(&(method.to_string(), arg.clone()))
                .copied()
                .unwrap_or(0)
        };

        self.in_flight.set(self.in_flight.get() + 1);
        self.max_in_flight
            .set(self.max_in_flight.get().max(self.in_flight.get()));
        YieldNow(delay).await;
        self.in_flight.set(self.in_flight.get() - 1);

        self.reply(canister_id, method, &arg)
            .map_err(|reason| RemoteCallError::Rejected {
                canister_id,
                method: method.to_string(),
                reason,
            })
    }
}
