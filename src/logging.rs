//! Internal logging setup for Quadspace.
//!
//! Logging is controlled by the `DEBUG_QUADSPACE` environment variable. If it
//! is unset or set to a falsy value ("0", "false", or empty), logging stays
//! disabled. Otherwise a `tracing_subscriber` is installed at `DEBUG` level.

#[cfg(feature = "setup_tracing")]
use ctor::ctor;
#[cfg(feature = "setup_tracing")]
use tracing::Level;

#[cfg(feature = "setup_tracing")]
#[ctor]
fn set_debug_level() {
    if std::env::var("DEBUG_QUADSPACE").map_or(true, |v| v == "0" || v == "false" || v.is_empty())
    {
        // Logging stays disabled; tracing macros are no-ops without a subscriber.
    } else {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .init();
    }
}
