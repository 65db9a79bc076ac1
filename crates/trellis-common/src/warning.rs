//! Engine warnings routed through the `log` facade.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the style, layout, and core crates to report unsupported input.

use std::collections::HashSet;
use std::sync::Mutex;

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about unsupported input (emits once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("Style", "unsupported unit 'em' in width: 1.5em");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    // A poisoned set only loses deduplication; the warning itself still goes out.
    let should_emit = WARNED.lock().map_or(true, |mut guard| {
        guard.get_or_insert_with(HashSet::new).insert(key)
    });

    if should_emit {
        log::warn!("[Trellis {component}] {message}");
    }
}

/// Clear all recorded warnings (call when a document is torn down)
pub fn clear_warnings() {
    if let Ok(mut guard) = WARNED.lock()
        && let Some(set) = guard.as_mut()
    {
        set.clear();
    }
}

/// Returns `true` if `message` has already been reported for `component`.
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .is_ok_and(|guard| guard.as_ref().is_some_and(|set| set.contains(&key)))
}
