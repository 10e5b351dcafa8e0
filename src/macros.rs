//! Component-tagged logging macro.

/// Logs through the `log` facade with a `[component]` prefix; the fern
/// dispatch configured in `logging::init` adds timestamp, level, pid
/// and tid.
///
/// Usage:
/// ```rust
/// use log::Level;
/// capture::capture_log!(Level::Info, "hooks", "context attached");
/// capture::capture_log!(Level::Warn, "hooks", "cache put failed: {}", "oom");
/// ```
#[macro_export]
macro_rules! capture_log {
    ($level:expr, $component:expr, $fmt:expr $(, $($arg:tt)+)?) => {
        ::log::log!($level, concat!("[", $component, "] ", $fmt) $(, $($arg)+)?)
    };
}
