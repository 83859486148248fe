//! Whole-image statistics.

use crate::PixelError;
use crate::layout::{Channels, check_strided, row};

/// Mean value of each channel over a strided image.
///
/// The first `channels` entries of the result are meaningful, the rest are
/// zero. Values are averaged as stored (gamma-encoded) and the division
/// truncates.
///
/// ```
/// use twirl::avg_color;
///
/// let px = [0u8, 100, 255, 3, 200, 50];
/// assert_eq!(avg_color(&px, 2, 1, 6, 3), Ok([1, 150, 152, 0]));
/// ```
pub fn avg_color(
    buf: &[u8],
    width: usize,
    height: usize,
    stride: usize,
    channels: usize,
) -> Result<[u8; 4], PixelError> {
    trace_op!(width, height, channels, "avg_color");
    let validate = || {
        let bpp = Channels::from_count(channels)?.count();
        check_strided(buf.len(), width, height, stride, bpp)
    };
    validate().map_err(|e| crate::rejected("avg_color", e))?;

    let mut sum = [0u64; 4];
    for y in 0..height {
        for px in row(buf, y, stride, width * channels).chunks_exact(channels) {
            for (s, &v) in sum.iter_mut().zip(px) {
                *s += u64::from(v);
            }
        }
    }
    let n = (width as u64) * (height as u64);
    let mut out = [0u8; 4];
    for (o, s) in out.iter_mut().zip(sum).take(channels) {
        *o = (s / n) as u8;
    }
    Ok(out)
}
