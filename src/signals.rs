use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use nix::sys::signal::{self, SigHandler, Signal};

static CANCEL: OnceLock<Arc<AtomicBool>> = OnceLock::new();

/// Route SIGINT and SIGTERM to `cancel` so a running build stops cleanly.
///
/// Only the first flag registered in a process is used; later calls keep the
/// handlers already in place.
pub fn install_cancel_handler(cancel: Arc<AtomicBool>) -> nix::Result<()> {
    if CANCEL.set(cancel).is_err() {
        tracing::debug!("Cancel handler already installed");
        return Ok(());
    }

    // SAFETY: the handler only performs an atomic store.
    unsafe {
        signal::signal(Signal::SIGINT, SigHandler::Handler(handle_cancel))?;
        signal::signal(Signal::SIGTERM, SigHandler::Handler(handle_cancel))?;
    }

    Ok(())
}

extern "C" fn handle_cancel(_: i32) {
    if let Some(cancel) = CANCEL.get() {
        cancel.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigint_sets_cancel_flag() {
        let cancel = Arc::new(AtomicBool::new(false));

        install_cancel_handler(cancel.clone()).unwrap();
        signal::raise(Signal::SIGINT).unwrap();

        assert!(cancel.load(Ordering::SeqCst));
    }
}
