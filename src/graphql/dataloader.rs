//! Request-scoped batching data loader
//!
//! This is the primitive behind every loader in `crate::graphql::loaders`.
//! A [`DataLoader`] turns a bulk fetch function ("give me all rows for this
//! key set") into a per-key `load_one` that resolvers can call independently:
//! all calls issued while one resolution layer of the query executes are
//! coalesced into a single backend fetch, duplicate keys collapse to one
//! shared slot, and resolved values are memoized for the rest of the request.
//!
//! The GraphQL engine ships its own dataloader, but it is designed to live in
//! schema data and be shared across requests. The semantics here are strictly
//! request-scoped: the HTTP handler builds a fresh set of loaders per request
//! (see `loaders::register`), the cache dies with the request, and `prime`
//! never overwrites an existing slot.
//!
//! ## Batching window
//!
//! The engine resolves sibling fields concurrently but exposes no explicit
//! layer boundary, so the flush trigger is quiescence-based: the first caller
//! to put a key into an empty batch becomes the dispatcher, sleeps for a
//! short delay while concurrent resolvers add their keys, then issues one
//! fetch with the deduplicated key set. Later keys start a new batch with a
//! new dispatcher. Because dispatch is driven by a waiting caller rather than
//! a spawned task, cancelling the request simply drops all pending batches;
//! no fetch is ever issued on behalf of a dead request. If only the
//! dispatching caller is cancelled, its followers are woken and one of them
//! takes over.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::oneshot;

/// Delay between the first `load_one` of a batch and its dispatch
const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(1);

/// A bulk fetch function bound to one relation kind.
///
/// Implementations receive a deduplicated, order-irrelevant key set and
/// return a map from key to value. Omitting a key from the result is the
/// normal way to signal "no such record"; an `Err` means the whole fetch
/// failed and is reported to every key in the batch. The error type must be
/// `Clone` for that fan-out, which is why the SQL-backed loaders use
/// `Arc<sqlx::Error>`.
pub trait Loader: Send + Sync + 'static {
    type Key: Hash + Eq + Clone + Send + Sync + 'static;
    type Value: Clone + Send + Sync + 'static;
    type Error: Clone + Send + Sync + 'static;

    fn load(
        &self,
        keys: &[Self::Key],
    ) -> impl Future<Output = Result<HashMap<Self::Key, Self::Value>, Self::Error>> + Send;
}

type LoadResult<L> = Result<Option<<L as Loader>::Value>, <L as Loader>::Error>;
type Waiter<L> = oneshot::Sender<LoadResult<L>>;

/// One key's lifecycle within a request.
///
/// A slot that reached `Resolved` or `Failed` is immutable for the rest of
/// the request; `Resolved(None)` is the explicit "no such record" marker.
enum Slot<L: Loader> {
    Pending(Vec<Waiter<L>>),
    Resolved(Option<L::Value>),
    Failed(L::Error),
}

struct State<L: Loader> {
    /// Request-scoped cache, one slot per key ever requested or primed
    slots: HashMap<L::Key, Slot<L>>,
    /// Keys collected for the next dispatch, insertion-ordered, no duplicates
    batch: Vec<L::Key>,
    /// Whether a caller is currently scheduled to flush `batch`
    dispatching: bool,
}

/// Batching, deduplicating, memoizing proxy around a [`Loader`].
///
/// One instance per relation kind per request; never shared across requests.
pub struct DataLoader<L: Loader> {
    loader: L,
    delay: Duration,
    state: Mutex<State<L>>,
}

/// What a `load_one` call must do after inspecting the cache
enum Plan<L: Loader> {
    /// Slot already resolved or failed
    Ready(LoadResult<L>),
    /// Another caller will dispatch; wait to be notified
    Follow(oneshot::Receiver<LoadResult<L>>),
    /// This caller dispatches the current batch
    Flush,
}

impl<L: Loader> DataLoader<L> {
    pub fn new(loader: L) -> Self {
        Self::with_delay(loader, DEFAULT_BATCH_DELAY)
    }

    pub fn with_delay(loader: L, delay: Duration) -> Self {
        Self {
            loader,
            delay,
            state: Mutex::new(State {
                slots: HashMap::new(),
                batch: Vec::new(),
                dispatching: false,
            }),
        }
    }

    /// Load the value for a single key.
    ///
    /// Returns `Ok(None)` when the backend has no record for the key. The
    /// call registers the key and returns a future; nothing is fetched until
    /// the batching window closes. Repeated loads of the same key within one
    /// request share one fetch and one cached result.
    pub async fn load_one(&self, key: L::Key) -> LoadResult<L> {
        loop {
            let plan: Plan<L> = {
                let mut state = self.lock_state();
                match state.slots.get_mut(&key) {
                    Some(Slot::Resolved(value)) => Plan::Ready(Ok(value.clone())),
                    Some(Slot::Failed(err)) => Plan::Ready(Err(err.clone())),
                    Some(Slot::Pending(waiters)) => {
                        let (tx, rx) = oneshot::channel();
                        waiters.push(tx);
                        Plan::Follow(rx)
                    }
                    None => {
                        state.slots.insert(key.clone(), Slot::Pending(Vec::new()));
                        state.batch.push(key.clone());
                        if state.dispatching {
                            let (tx, rx) = oneshot::channel();
                            if let Some(Slot::Pending(waiters)) = state.slots.get_mut(&key) {
                                waiters.push(tx);
                            }
                            Plan::Follow(rx)
                        } else {
                            state.dispatching = true;
                            Plan::Flush
                        }
                    }
                }
            };

            match plan {
                Plan::Ready(result) => return result,
                Plan::Follow(rx) => match rx.await {
                    Ok(result) => return result,
                    // The dispatching caller was cancelled before delivering;
                    // the slot has been cleared, so re-register and possibly
                    // take over dispatch.
                    Err(_) => continue,
                },
                Plan::Flush => return self.flush(&key).await,
            }
        }
    }

    /// Load values for a sequence of keys.
    ///
    /// The output has one entry per input key in input order; duplicate
    /// inputs each get an entry, backed by the same deduplicated slot. Any
    /// batch fetch failure fails the whole call.
    pub async fn load_many(
        &self,
        keys: impl IntoIterator<Item = L::Key>,
    ) -> Result<Vec<Option<L::Value>>, L::Error> {
        futures_util::future::try_join_all(keys.into_iter().map(|key| self.load_one(key))).await
    }

    /// Seed the cache with a value already obtained elsewhere in this
    /// request, so a later `load_one` for the key costs no backend call.
    ///
    /// A key that already has a slot (pending, resolved or failed) is left
    /// untouched.
    pub fn prime(&self, key: L::Key, value: L::Value) {
        let mut state = self.lock_state();
        state
            .slots
            .entry(key)
            .or_insert_with(|| Slot::Resolved(Some(value)));
    }

    /// Close the batching window, fetch, and fan results out to every waiter.
    async fn flush(&self, key: &L::Key) -> LoadResult<L> {
        let mut guard = FlushGuard {
            state: &self.state,
            keys: Vec::new(),
            armed: true,
        };

        // Quiescence window: let concurrently executing resolvers add their
        // keys before the batch is taken.
        tokio::time::sleep(self.delay).await;

        {
            let mut state = self.lock_state();
            state.dispatching = false;
            guard.keys = std::mem::take(&mut state.batch);
        }

        let fetched = self.loader.load(&guard.keys).await;

        let outcome = {
            let mut state = self.lock_state();
            match fetched {
                Ok(mut values) => {
                    for batched in &guard.keys {
                        // A key the fetch omitted resolves to None, never to
                        // an error and never to a missing slot.
                        let value = values.remove(batched);
                        if let Some(Slot::Pending(waiters)) = state
                            .slots
                            .insert(batched.clone(), Slot::Resolved(value.clone()))
                        {
                            for waiter in waiters {
                                let _ = waiter.send(Ok(value.clone()));
                            }
                        }
                    }
                    match state.slots.get(key) {
                        Some(Slot::Resolved(value)) => Ok(value.clone()),
                        // The dispatcher's own key is always part of the batch
                        // it dispatched.
                        _ => Ok(None),
                    }
                }
                Err(err) => {
                    for batched in &guard.keys {
                        if let Some(Slot::Pending(waiters)) = state
                            .slots
                            .insert(batched.clone(), Slot::Failed(err.clone()))
                        {
                            for waiter in waiters {
                                let _ = waiter.send(Err(err.clone()));
                            }
                        }
                    }
                    Err(err)
                }
            }
        };

        guard.armed = false;
        outcome
    }

    fn lock_state(&self) -> MutexGuard<'_, State<L>> {
        // A panic while the lock is held cannot leave the state partially
        // mutated in a harmful way; recover instead of propagating poison.
        self.state.lock().unwrap_or_else(|err| err.into_inner())
    }
}

/// Cleans up after a dispatcher that is dropped mid-flight.
///
/// Dropping the pending slots closes every waiter's channel, which sends the
/// followers back through `load_one`'s retry loop to elect a new dispatcher.
/// When the whole request is cancelled there are no followers left and the
/// batch is simply discarded.
struct FlushGuard<'a, L: Loader> {
    state: &'a Mutex<State<L>>,
    keys: Vec<L::Key>,
    armed: bool,
}

impl<L: Loader> Drop for FlushGuard<'_, L> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        if self.keys.is_empty() {
            // Cancelled during the quiescence window, before the batch was
            // taken.
            state.dispatching = false;
            self.keys = std::mem::take(&mut state.batch);
        }
        for key in &self.keys {
            if matches!(state.slots.get(key), Some(Slot::Pending(_))) {
                state.slots.remove(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// In-memory backend that records every batch it is asked for
    struct FakeBackend {
        rows: HashMap<u32, &'static str>,
        calls: Arc<Mutex<Vec<Vec<u32>>>>,
        fail: bool,
    }

    impl FakeBackend {
        fn new(rows: &[(u32, &'static str)]) -> (Self, Arc<Mutex<Vec<Vec<u32>>>>) {
            let calls = Arc::new(Mutex::new(Vec::new()));
            let backend = Self {
                rows: rows.iter().copied().collect(),
                calls: Arc::clone(&calls),
                fail: false,
            };
            (backend, calls)
        }

        fn failing() -> (Self, Arc<Mutex<Vec<Vec<u32>>>>) {
            let (mut backend, calls) = Self::new(&[]);
            backend.fail = true;
            (backend, calls)
        }
    }

    impl Loader for FakeBackend {
        type Key = u32;
        type Value = String;
        type Error = String;

        async fn load(&self, keys: &[u32]) -> Result<HashMap<u32, String>, String> {
            let mut sorted = keys.to_vec();
            sorted.sort_unstable();
            self.calls.lock().unwrap().push(sorted);
            if self.fail {
                return Err("backend down".to_string());
            }
            Ok(keys
                .iter()
                .filter_map(|k| self.rows.get(k).map(|v| (*k, v.to_string())))
                .collect())
        }
    }

    fn loader_with(rows: &[(u32, &'static str)]) -> (DataLoader<FakeBackend>, Arc<Mutex<Vec<Vec<u32>>>>) {
        let (backend, calls) = FakeBackend::new(rows);
        (DataLoader::with_delay(backend, Duration::from_millis(1)), calls)
    }

    #[tokio::test]
    async fn test_same_tick_loads_batch_into_one_fetch() {
        let (loader, calls) = loader_with(&[(1, "one"), (2, "two")]);

        let (a, b, dup) = tokio::join!(loader.load_one(1), loader.load_one(2), loader.load_one(1));

        assert_eq!(a.unwrap(), Some("one".to_string()));
        assert_eq!(b.unwrap(), Some("two".to_string()));
        assert_eq!(dup.unwrap(), Some("one".to_string()));

        let calls = calls.lock().unwrap();
        assert_eq!(*calls, vec![vec![1, 2]], "duplicate key must not widen the batch");
    }

    #[tokio::test]
    async fn test_resolved_key_served_from_cache() {
        let (loader, calls) = loader_with(&[(1, "one")]);

        assert_eq!(loader.load_one(1).await.unwrap(), Some("one".to_string()));
        assert_eq!(loader.load_one(1).await.unwrap(), Some("one".to_string()));

        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_second_tick_fetches_only_uncached_keys() {
        let (loader, calls) = loader_with(&[(1, "one"), (2, "two")]);

        loader.load_one(1).await.unwrap();
        let (a, b) = tokio::join!(loader.load_one(1), loader.load_one(2));
        assert_eq!(a.unwrap(), Some("one".to_string()));
        assert_eq!(b.unwrap(), Some("two".to_string()));

        let calls = calls.lock().unwrap();
        assert_eq!(*calls, vec![vec![1], vec![2]]);
    }

    #[tokio::test]
    async fn test_missing_key_resolves_to_absent() {
        let (loader, calls) = loader_with(&[(1, "one")]);

        let (hit, miss) = tokio::join!(loader.load_one(1), loader.load_one(99));
        assert_eq!(hit.unwrap(), Some("one".to_string()));
        assert_eq!(miss.unwrap(), None);

        // The miss is cached too: no second fetch for the same key.
        assert_eq!(loader.load_one(99).await.unwrap(), None);
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_load_many_preserves_input_order_and_duplicates() {
        let (loader, calls) = loader_with(&[(1, "one"), (2, "two")]);

        let values = loader.load_many([2, 1, 2, 3]).await.unwrap();
        assert_eq!(
            values,
            vec![
                Some("two".to_string()),
                Some("one".to_string()),
                Some("two".to_string()),
                None,
            ]
        );

        let calls = calls.lock().unwrap();
        assert_eq!(*calls, vec![vec![1, 2, 3]]);
    }

    #[tokio::test]
    async fn test_batch_failure_fans_out_to_all_waiters() {
        let (backend, calls) = FakeBackend::failing();
        let loader = DataLoader::with_delay(backend, Duration::from_millis(1));

        let (a, b) = tokio::join!(loader.load_one(1), loader.load_one(2));
        assert_eq!(a.unwrap_err(), "backend down");
        assert_eq!(b.unwrap_err(), "backend down");

        // Failed slots are immutable for the request: no retry fetch.
        assert_eq!(loader.load_one(1).await.unwrap_err(), "backend down");
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_prime_serves_without_fetch_and_never_overwrites() {
        let (loader, calls) = loader_with(&[(2, "two")]);

        loader.prime(1, "primed".to_string());
        assert_eq!(loader.load_one(1).await.unwrap(), Some("primed".to_string()));
        assert!(calls.lock().unwrap().is_empty());

        // Priming an already resolved key is a no-op.
        loader.load_one(2).await.unwrap();
        loader.prime(2, "stale".to_string());
        assert_eq!(loader.load_one(2).await.unwrap(), Some("two".to_string()));
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_dispatcher_does_not_strand_followers() {
        let (backend, calls) = FakeBackend::new(&[(1, "one")]);
        let loader = Arc::new(DataLoader::with_delay(backend, Duration::from_millis(30)));

        let dispatcher = tokio::spawn({
            let loader = Arc::clone(&loader);
            async move { loader.load_one(1).await }
        });
        tokio::time::sleep(Duration::from_millis(5)).await;

        let follower = tokio::spawn({
            let loader = Arc::clone(&loader);
            async move { loader.load_one(1).await }
        });
        tokio::time::sleep(Duration::from_millis(5)).await;

        // Kill the dispatcher during its quiescence window; the follower must
        // re-register and take over instead of hanging.
        dispatcher.abort();
        let result = follower.await.unwrap();
        assert_eq!(result.unwrap(), Some("one".to_string()));
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_fresh_loader_issues_no_fetch_until_loaded() {
        // Creating loaders per request must be free when no resolver uses
        // them.
        let fetches = Arc::new(AtomicUsize::new(0));
        struct Silent(Arc<AtomicUsize>);
        impl Loader for Silent {
            type Key = u32;
            type Value = u32;
            type Error = String;
            async fn load(&self, keys: &[u32]) -> Result<HashMap<u32, u32>, String> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Ok(keys.iter().map(|k| (*k, *k)).collect())
            }
        }
        let _loader = DataLoader::new(Silent(Arc::clone(&fetches)));
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(fetches.load(Ordering::SeqCst), 0);
    }
}
