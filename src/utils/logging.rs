use serde::Serialize;
use tracing::{Level, debug};

/// Logs an inbound payload as compact JSON; skipped entirely unless DEBUG is enabled.
pub(crate) fn debug_payload<T>(route: &'static str, id: Option<i64>, payload: &T)
where
    T: Serialize,
{
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }

    let body = serde_json::to_string(payload)
        .unwrap_or_else(|error| format!("<serialize failed: {error}>"));
    debug!(route, id, body = %body, "inbound item payload");
}
