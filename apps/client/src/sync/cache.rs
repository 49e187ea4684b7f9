//! Keyed cache of asynchronous read queries.
//!
//! Per-key state machine: empty → loading → fresh(value) | failed(error);
//! fresh/failed become stale on invalidation; stale becomes loading again on
//! the next access. Concurrent readers of a loading key share the single
//! in-flight request through a watch channel, so one key never has more than
//! one request on the wire.
//!
//! Values are stored as JSON (`serde_json::Value`): the server owns every
//! shape, and the identity-based list patching below works uniformly over
//! JSON rows without knowing the projection type.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::errors::{ApiError, QueryError};
use crate::sync::key::QueryKey;

type FetchResult = Result<Value, QueryError>;
type ResultReceiver = watch::Receiver<Option<FetchResult>>;

enum EntryState {
    Fresh(Value),
    Failed(QueryError),
    /// Invalidated. The previous value, if any, stays visible to placeholder
    /// reads until the refetch lands.
    Stale(Option<Value>),
    InFlight {
        rx: ResultReceiver,
        placeholder: Option<Value>,
        /// Ties a completion to the in-flight entry it started; a completion
        /// whose generation no longer matches must not overwrite the entry.
        generation: u64,
    },
}

struct CacheEntry {
    state: EntryState,
    updated_at: Instant,
}

impl CacheEntry {
    fn new(state: EntryState) -> Self {
        CacheEntry {
            state,
            updated_at: Instant::now(),
        }
    }

    /// Data a reader may display right now, regardless of staleness.
    fn visible_data(&self) -> Option<&Value> {
        match &self.state {
            EntryState::Fresh(v) => Some(v),
            EntryState::Stale(v) => v.as_ref(),
            EntryState::InFlight { placeholder, .. } => placeholder.as_ref(),
            EntryState::Failed(_) => None,
        }
    }

    fn visible_data_mut(&mut self) -> Option<&mut Value> {
        match &mut self.state {
            EntryState::Fresh(v) => Some(v),
            EntryState::Stale(v) => v.as_mut(),
            EntryState::InFlight { placeholder, .. } => placeholder.as_mut(),
            EntryState::Failed(_) => None,
        }
    }
}

/// Process-wide cache shared by all stores.
///
/// The map lock is a plain mutex and is never held across an await; waiting
/// on an in-flight request happens on a cloned watch receiver.
#[derive(Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, CacheEntry>>,
    generations: AtomicU64,
}

enum Access {
    Done(FetchResult),
    Join(ResultReceiver),
    Run(watch::Sender<Option<FetchResult>>, u64),
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key`, or runs `fetch` to produce it.
    ///
    /// While a fetch for the key is in flight, further callers join it
    /// instead of issuing their own request. A failed result is cached and
    /// replayed until the key is invalidated.
    ///
    /// The fetch runs inside the caller's own future. A caller dropped
    /// mid-fetch abandons the key with a closed channel; the next access
    /// detects that and runs its own fetch in place of the abandoned one.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<T, QueryError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut fetch = Some(fetch);
        loop {
            let access = {
                let mut entries = self.entries.lock().unwrap();
                let hit = match entries.get(&key).map(|entry| &entry.state) {
                    Some(EntryState::Fresh(value)) => {
                        debug!(%key, "cache hit");
                        Some(Access::Done(Ok(value.clone())))
                    }
                    Some(EntryState::Failed(err)) => Some(Access::Done(Err(err.clone()))),
                    // A closed channel means the fetching caller was dropped
                    // before publishing; fall through and adopt the fetch.
                    Some(EntryState::InFlight { rx, .. }) if rx.has_changed().is_ok() => {
                        debug!(%key, "joining in-flight fetch");
                        Some(Access::Join(rx.clone()))
                    }
                    _ => None,
                };
                match hit {
                    Some(access) => access,
                    None => {
                        let placeholder = entries
                            .get(&key)
                            .and_then(|entry| entry.visible_data().cloned());
                        let generation = self.generations.fetch_add(1, Ordering::Relaxed);
                        let (tx, rx) = watch::channel(None);
                        entries.insert(
                            key.clone(),
                            CacheEntry::new(EntryState::InFlight {
                                rx,
                                placeholder,
                                generation,
                            }),
                        );
                        debug!(%key, "cache miss, fetching");
                        Access::Run(tx, generation)
                    }
                }
            };

            match access {
                Access::Done(result) => return decode(result),
                Access::Join(mut rx) => {
                    // The sender can still go away between the lock scope and
                    // this await; an error here loops back, reclassifies the
                    // entry, and adopts the abandoned fetch.
                    if rx.changed().await.is_ok() {
                        if let Some(result) = rx.borrow().clone() {
                            return decode(result);
                        }
                    }
                }
                Access::Run(tx, generation) => {
                    let fetch = fetch.take().expect("a fetch is executed at most once");
                    return match fetch().await {
                        Ok(value) => {
                            let stored = serde_json::to_value(&value).map_err(|e| {
                                QueryError::internal(format!("cache serialization failed: {e}"))
                            });
                            self.complete(&key, &tx, generation, stored.clone());
                            stored.map(|_| value)
                        }
                        Err(err) => {
                            let err = QueryError::from(err);
                            self.complete(&key, &tx, generation, Err(err.clone()));
                            Err(err)
                        }
                    };
                }
            }
        }
    }

    /// Store the fetch outcome and wake joined readers, in one lock scope so
    /// no reader can observe the channel resolved but the entry still loading.
    ///
    /// The outcome is stored only while the entry is still the in-flight
    /// generation this fetch started; if a `set` (or a `remove`) replaced the
    /// entry meanwhile, the newer data stays and only the channel is resolved,
    /// so joined readers still get the snapshot they asked for.
    fn complete(
        &self,
        key: &QueryKey,
        tx: &watch::Sender<Option<FetchResult>>,
        generation: u64,
        result: FetchResult,
    ) {
        let mut entries = self.entries.lock().unwrap();
        let current = matches!(
            entries.get(key).map(|entry| &entry.state),
            Some(EntryState::InFlight { generation: g, .. }) if *g == generation
        );
        if current {
            let state = match &result {
                Ok(value) => EntryState::Fresh(value.clone()),
                Err(err) => EntryState::Failed(err.clone()),
            };
            entries.insert(key.clone(), CacheEntry::new(state));
        } else {
            debug!(%key, "entry replaced while fetching, dropping the snapshot");
        }
        let _ = tx.send(Some(result));
    }

    /// Marks every entry under `prefix` stale; the next access refetches.
    /// Previously fetched values stay visible as placeholders meanwhile.
    /// In-flight entries are left alone — their pending result will land.
    pub fn invalidate(&self, prefix: &QueryKey) {
        let mut entries = self.entries.lock().unwrap();
        for (key, entry) in entries.iter_mut() {
            if !key.starts_with(prefix) {
                continue;
            }
            let state = std::mem::replace(&mut entry.state, EntryState::Stale(None));
            entry.state = match state {
                EntryState::Fresh(value) => EntryState::Stale(Some(value)),
                EntryState::Failed(_) => EntryState::Stale(None),
                other => other,
            };
        }
        debug!(%prefix, "invalidated");
    }

    /// Drops every entry under `prefix` outright.
    pub fn remove(&self, prefix: &QueryKey) {
        let mut entries = self.entries.lock().unwrap();
        entries.retain(|key, _| !key.starts_with(prefix));
    }

    /// Writes `value` under `key` as fresh data, without a refetch.
    pub fn set<T: Serialize>(&self, key: QueryKey, value: &T) {
        match serde_json::to_value(value) {
            Ok(value) => {
                let mut entries = self.entries.lock().unwrap();
                entries.insert(key, CacheEntry::new(EntryState::Fresh(value)));
            }
            Err(err) => warn!(%key, %err, "set_query_data serialization failed"),
        }
    }

    /// Replaces, by identity, every row `{"_id": id, ...}` inside the `items`
    /// array of any cached page under `prefix`. Entries keep their staleness;
    /// only the visible data changes.
    pub fn patch_list_item<T: Serialize>(&self, prefix: &QueryKey, id: &str, item: &T) {
        let patched = match serde_json::to_value(item) {
            Ok(value) => value,
            Err(err) => {
                warn!(%prefix, %err, "list patch serialization failed");
                return;
            }
        };
        let mut entries = self.entries.lock().unwrap();
        for (key, entry) in entries.iter_mut() {
            if !key.starts_with(prefix) {
                continue;
            }
            let Some(Value::Object(page)) = entry.visible_data_mut() else {
                continue;
            };
            let Some(Value::Array(items)) = page.get_mut("items") else {
                continue;
            };
            let mut touched = false;
            for row in items.iter_mut() {
                if row.get("_id").and_then(Value::as_str) == Some(id) {
                    *row = patched.clone();
                    touched = true;
                }
            }
            if touched {
                entry.updated_at = Instant::now();
            }
        }
    }

    /// Currently visible data for `key`, fresh or not.
    pub fn cached<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let entries = self.entries.lock().unwrap();
        let value = entries.get(key)?.visible_data()?.clone();
        drop(entries);
        serde_json::from_value(value).ok()
    }

    /// Most recently updated visible data under `prefix`. Lists use this as
    /// placeholder data: while a new page loads, the previous page's rows
    /// stay on screen instead of flashing empty.
    pub fn latest_under<T: DeserializeOwned>(&self, prefix: &QueryKey) -> Option<T> {
        let entries = self.entries.lock().unwrap();
        let value = entries
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .filter_map(|(_, entry)| entry.visible_data().map(|v| (entry.updated_at, v)))
            .max_by_key(|(updated_at, _)| *updated_at)
            .map(|(_, value)| value.clone());
        drop(entries);
        serde_json::from_value(value?).ok()
    }
}

fn decode<T: DeserializeOwned>(result: FetchResult) -> Result<T, QueryError> {
    result.and_then(|value| {
        serde_json::from_value(value)
            .map_err(|e| QueryError::internal(format!("cached value decode failed: {e}")))
    })
}
