//! Attribute growth curve.
//!
//! Every derived resource is computed from `sigma(attribute)`, not from the raw
//! attribute. Early points give quadratic returns (triangular numbers) up to
//! [`GROWTH_CAP`]; past the cap each point is worth a flat [`GROWTH_CAP`].
//!
//! ```text
//! n <= 1        → 0
//! 1 < n <= 150  → (n - 1) * n / 2
//! n > 150       → 11175 + (n - 150) * 150
//! ```
//!
//! Integer arithmetic only. Downstream formulas rely on truncating division.

/// Attribute value at which the triangular growth flattens to a linear rate.
pub const GROWTH_CAP: i32 = 150;

/// `sigma(GROWTH_CAP)`, the value where the linear branch starts.
pub const SIGMA_AT_CAP: i64 = (GROWTH_CAP as i64 - 1) * GROWTH_CAP as i64 / 2;

/// Maps a raw attribute value to its derived magnitude.
pub const fn sigma(n: i32) -> i64 {
    if n <= 1 {
        return 0;
    }
    let n = n as i64;
    if n <= GROWTH_CAP as i64 {
        (n - 1) * n / 2
    } else {
        SIGMA_AT_CAP + (n - GROWTH_CAP as i64) * GROWTH_CAP as i64
    }
}
