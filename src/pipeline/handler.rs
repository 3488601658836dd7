use async_trait::async_trait;
use std::sync::Arc;

/// A consumer of merged snapshots.
///
/// `on_update` is invoked synchronously within the pipeline's broadcast step,
/// in registration order, once per applied update — including no-op updates.
/// The snapshot vector is a fresh allocation per call, but each entity inside
/// it is an `Arc` shared with every other handler of the same broadcast (and
/// with the merger's own state until that entity is next replaced), so
/// cloning the snapshot for the next handler is a refcount bump, not a deep
/// copy. Handlers MUST still treat the entities as read-only. A handler that
/// panics or whose future never resolves blocks the whole pipeline, by
/// design: the mux offers a consistent, serialized view and delegates
/// queuing or parallelism to handlers that need it.
#[async_trait]
pub trait Handler<E>: Send + Sync {
    async fn on_update(&self, snapshot: Vec<Arc<E>>);
}

// Lets callers keep a handle to a handler they also registered (e.g. for
// tests that assert on recorded snapshots) by registering an `Arc` clone
// instead of the handler itself.
#[async_trait]
impl<E, H> Handler<E> for Arc<H>
where
    E: Send + Sync + 'static,
    H: Handler<E> + ?Sized,
{
    async fn on_update(&self, snapshot: Vec<Arc<E>>) {
        (**self).on_update(snapshot).await;
    }
}
