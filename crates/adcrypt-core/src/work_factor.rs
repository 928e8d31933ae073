//! Work factor bounds shared by capability implementations.
//!
//! A work factor is an exponent: the iteration count is `2^work_factor`.
//! Capping at 30 keeps the iteration count within a signed 32-bit range.

use crate::error::{Error, Result};

/// Smallest accepted work factor (a single iteration).
pub const MIN_WORK_FACTOR: u32 = 0;

/// Largest accepted work factor.
pub const MAX_WORK_FACTOR: u32 = 30;

/// Reject work factors outside `[MIN_WORK_FACTOR, MAX_WORK_FACTOR]`.
pub fn check_work_factor(work_factor: u32) -> Result<()> {
    if !(MIN_WORK_FACTOR..=MAX_WORK_FACTOR).contains(&work_factor) {
        return Err(Error::WorkFactorOutOfRange {
            work_factor,
            min: MIN_WORK_FACTOR,
            max: MAX_WORK_FACTOR,
        });
    }
    Ok(())
}

/// Iteration count for a work factor, after range checking.
pub fn iterations(work_factor: u32) -> Result<u32> {
    check_work_factor(work_factor)?;
    Ok(1u32 << work_factor)
}
