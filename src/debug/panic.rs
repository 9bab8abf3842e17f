//! Panic logging for otherwise unobserved task failures.
//!
//! A panicking tokio task only surfaces through its `JoinHandle`, which is
//! often dropped. The hook installed here reports every panic through
//! `tracing` and then runs the previously installed hook.

use std::panic;
use std::sync::Once;

static INSTALL: Once = Once::new();

/// Install the panic logger. Only the first call in a process has an effect.
pub fn install_panic_logger() {
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let location = info
                .location()
                .map(|l| format!("{}:{}", l.file(), l.line()))
                .unwrap_or_else(|| "unknown".to_string());
            let payload = info
                .payload()
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_string());
            let thread = std::thread::current();
            tracing::error!(
                target: "toolcat::net",
                "[Network Debug] Unhandled panic in '{}' at {}: {}",
                thread.name().unwrap_or("<unnamed>"),
                location,
                payload
            );
            previous(info);
        }));
    });
}

/// Whether the panic logger has been installed in this process.
pub fn panic_logger_installed() -> bool {
    INSTALL.is_completed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_is_idempotent() {
        install_panic_logger();
        install_panic_logger();
        assert!(panic_logger_installed());
    }

    #[tokio::test]
    async fn test_task_panic_still_reaches_join_handle() {
        install_panic_logger();
        let handle = tokio::spawn(async {
            panic!("boom");
        });
        let err = handle.await.unwrap_err();
        assert!(err.is_panic());
    }
}
