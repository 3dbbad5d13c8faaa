//! Safe numeric conversions.

use num_traits::cast;

pub use super::ValueConversionError;

/// Largest integer an `f64` represents exactly (2^53 − 1).
const MAX_EXACT_F64_INTEGER: u64 = (1u64 << 53) - 1;

/// Safely convert a `usize` to `f64`.
///
/// # Errors
///
/// Returns `ValueConversionError::ConversionFailed` if `value` exceeds 2^53 − 1
/// and would lose precision.
///
/// # Examples
///
/// ```
/// use tessellation::geometry::util::safe_usize_to_f64;
///
/// assert_eq!(safe_usize_to_f64(42).unwrap(), 42.0);
/// ```
pub fn safe_usize_to_f64(value: usize) -> Result<f64, ValueConversionError> {
    let too_large = || ValueConversionError::ConversionFailed {
        value: format!("{value}"),
        from_type: "usize",
        to_type: "f64",
        details: "value exceeds the exactly representable integer range".to_string(),
    };
    let value_u64 = u64::try_from(value).map_err(|_| too_large())?;
    if value_u64 > MAX_EXACT_F64_INTEGER {
        return Err(too_large());
    }
    cast(value).ok_or_else(too_large)
}
