//! Renderer warnings routed through the `log` facade.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the HTML, CSS and browser crates to report recovered conditions
//! (dropped stylesheet rules, skipped stylesheet fetches, font fallbacks).

use std::collections::HashSet;
use std::sync::Mutex;

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a recovered condition (logged once per unique message).
///
/// # Example
/// ```ignore
/// warn_once("CSS", "dropped malformed rule near 'p {'");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_log = match WARNED.lock() {
        Ok(mut guard) => guard.get_or_insert_with(HashSet::new).insert(key),
        // A poisoned set only loses deduplication, never the warning.
        Err(_) => true,
    };

    if should_log {
        log::warn!("[Monarch {component}] {message}");
    }
}

/// Clear all recorded warnings (call when loading a new page)
pub fn clear_warnings() {
    if let Ok(mut guard) = WARNED.lock()
        && let Some(set) = guard.as_mut()
    {
        set.clear();
    }
}

/// Number of distinct warnings recorded since the last [`clear_warnings`].
pub fn warning_count() -> usize {
    WARNED
        .lock()
        .map(|guard| guard.as_ref().map_or(0, HashSet::len))
        .unwrap_or(0)
}
