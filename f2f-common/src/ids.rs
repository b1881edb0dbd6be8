//! Ingredient identifier generation
//!
//! Ids are millisecond timestamps rendered as decimal strings. Within one
//! process they are strictly increasing, so two ingredients added in the
//! same millisecond still get distinct ids.

use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

static LAST_ISSUED: AtomicI64 = AtomicI64::new(0);

/// Generate a new ingredient id
pub fn generate() -> String {
    next_after(Utc::now().timestamp_millis()).to_string()
}

fn next_after(now_ms: i64) -> i64 {
    let mut issued = now_ms;
    // fetch_update only fails when the closure returns None
    let _ = LAST_ISSUED.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
        issued = if now_ms > last { now_ms } else { last + 1 };
        Some(issued)
    });
    issued
}
