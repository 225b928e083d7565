//! The request bound to the running task.
//!
//! Stages that cannot be handed the request explicitly (logging hooks, deep
//! helpers) may look it up with [`Request::current`] as long as the pipeline
//! runs them inside [`scope`].

use std::sync::Arc;

use crate::Request;

tokio::task_local! {
    static CURRENT: Arc<Request>;
}

/// Runs `future` with `request` bound as the current request.
pub async fn scope<F>(request: Arc<Request>, future: F) -> F::Output
where
    F: Future,
{
    CURRENT.scope(request, future).await
}

/// Runs `f` synchronously with `request` bound as the current request.
pub fn sync_scope<F, R>(request: Arc<Request>, f: F) -> R
where
    F: FnOnce() -> R,
{
    CURRENT.sync_scope(request, f)
}

impl Request {
    /// Returns the request bound to the current task, if any.
    pub fn current() -> Option<Arc<Request>> {
        CURRENT.try_with(Arc::clone).ok()
    }
}
