//! The two places where storage failures are deliberately swallowed.
//!
//! A widget must always render something, so a failed read becomes 0.
//! A failed write is logged and dropped without retry; whatever the caller
//! already shows stays until the next successful write.

use tracing::warn;

use crate::error::StoreError;

/// Value every reader falls back to.
pub const DEFAULT_VALUE: i64 = 0;

pub fn read_or_zero(result: Result<i64, StoreError>) -> i64 {
    match result {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "counter read failed, using {DEFAULT_VALUE}");
            DEFAULT_VALUE
        }
    }
}

pub fn discard_write(result: Result<(), StoreError>) {
    if let Err(e) = result {
        warn!(error = %e, "counter write dropped");
    }
}
