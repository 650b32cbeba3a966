//! Unwind boundary around a single test body
//!
//! Fatal assertions unwind with a [`FatalFailure`] payload. While a run is in
//! progress a panic hook swallows that payload, since its diagnostic has
//! already been printed, and hands every other panic to the hook that was
//! installed before. Dropping the [`HookGuard`] puts the previous hook back.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe, PanicHookInfo};
use std::sync::Arc;

use crate::assertions::FatalFailure;

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

/// How a test body stopped early
#[derive(Debug)]
pub enum Abort {
    /// A `require_*!` assertion or `fail!`
    Fatal,
    /// Any other panic, with its message when it had one
    Panic(Option<String>),
}

/// Restores the previous panic hook on drop
#[must_use = "the previous panic hook is restored when the guard is dropped"]
pub struct HookGuard {
    previous: Option<Arc<PanicHook>>,
}

/// Install the fatal-failure hook on top of the current one
pub fn install() -> HookGuard {
    let previous: Arc<PanicHook> = Arc::new(panic::take_hook());
    let chained = Arc::clone(&previous);
    panic::set_hook(Box::new(move |info| {
        if info.payload().is::<FatalFailure>() {
            return;
        }
        chained(info);
    }));
    tracing::trace!("fatal failure hook installed");
    HookGuard {
        previous: Some(previous),
    }
}

impl Drop for HookGuard {
    fn drop(&mut self) {
        let Some(previous) = self.previous.take() else {
            return;
        };
        // The hook API panics when used during unwinding.
        if std::thread::panicking() {
            return;
        }
        // Dropping our hook releases its handle on `previous`.
        drop(panic::take_hook());
        match Arc::try_unwrap(previous) {
            Ok(hook) => panic::set_hook(hook),
            Err(shared) => panic::set_hook(Box::new(move |info| shared(info))),
        }
        tracing::trace!("previous panic hook restored");
    }
}

/// Run `body`, turning an unwind into [`Abort`]
pub fn run_guarded<F: FnOnce()>(body: F) -> Result<(), Abort> {
    panic::catch_unwind(AssertUnwindSafe(body)).map_err(|payload| classify(payload.as_ref()))
}

fn classify(payload: &(dyn Any + Send)) -> Abort {
    if payload.is::<FatalFailure>() {
        return Abort::Fatal;
    }
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned());
    Abort::Panic(message)
}
