//! Pixel-wise difference scoring between equally sized images

use crate::io::error::{MosaicError, Result, computation_error};
use image::{ImageBuffer, Pixel};
use num_traits::ToPrimitive;

/// Sum of absolute per-sample differences between two sample buffers
///
/// Lower is more similar and zero only for identical buffers. The score is
/// symmetric in its arguments. No triangle inequality is relied upon anywhere
/// in the matcher.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the buffers have different lengths, or a
/// computation error if a sample cannot be represented as `f64`.
pub fn sample_difference<T>(a: &[T], b: &[T]) -> Result<f64>
where
    T: ToPrimitive + Copy,
{
    if a.len() != b.len() {
        return Err(MosaicError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
            cell: None,
        });
    }

    let mut diff = 0.0;
    for (&lhs, &rhs) in a.iter().zip(b) {
        let (Some(lhs), Some(rhs)) = (lhs.to_f64(), rhs.to_f64()) else {
            return Err(computation_error(
                "sample difference",
                &"sample value is not representable as f64",
            ));
        };
        diff += (lhs - rhs).abs();
    }

    Ok(diff)
}

/// Pixel-wise difference between two images of the same pixel format
///
/// Compares every channel of every pixel in linear sample order, so two images
/// with the same sample count but different shapes are still comparable.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the images hold a different number of samples.
pub fn compute_difference<P>(
    a: &ImageBuffer<P, Vec<P::Subpixel>>,
    b: &ImageBuffer<P, Vec<P::Subpixel>>,
) -> Result<f64>
where
    P: Pixel,
{
    sample_difference(a.as_raw(), b.as_raw())
}
