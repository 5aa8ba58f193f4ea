//! Caller-supplied fork/join scheduling.
//!
//! The parallel multiply borrows a work-stealing [`rayon::ThreadPool`]; the
//! library never spins one up on its own. Callers either pass a pool per
//! call or install a process-wide default once, which the `multiply`
//! convenience consults. The pool must outlive every multiplication
//! running on it, which `Arc` ownership guarantees.

use rayon::ThreadPool;
use std::sync::{Arc, PoisonError, RwLock};

static DEFAULT_POOL: RwLock<Option<Arc<ThreadPool>>> = RwLock::new(None);

/// Install `pool` as the default scheduler for
/// [`DecInt::multiply`](crate::DecInt::multiply) and
/// [`DecInt::parallel_pow`](crate::DecInt::parallel_pow) convenience calls,
/// replacing any previous default.
pub fn set_default_pool(pool: Arc<ThreadPool>) {
    *DEFAULT_POOL
        .write()
        .unwrap_or_else(PoisonError::into_inner) = Some(pool);
}

/// Remove the installed default scheduler, returning it if one was set.
/// Subsequent `multiply` calls run sequentially.
pub fn clear_default_pool() -> Option<Arc<ThreadPool>> {
    DEFAULT_POOL
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take()
}

/// The currently installed default scheduler, if any.
pub(crate) fn default_pool() -> Option<Arc<ThreadPool>> {
    DEFAULT_POOL
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
