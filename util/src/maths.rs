//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Clamp a value between `min` and `max`.
///
/// Returns the clamped value and whether the limit was reached.
pub fn clamp<T>(value: &T, min: &T, max: &T) -> (T, bool)
where
    T: Float
{
    if *value > *max {
        (*max, true)
    }
    else if *value < *min {
        (*min, true)
    }
    else {
        (*value, false)
    }
}

/// Check that two values are within `tol` of each other.
pub fn approx_eq<T>(a: T, b: T, tol: T) -> bool
where
    T: Float
{
    (a - b).abs() <= tol
}
