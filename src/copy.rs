//! Rectangles and clipped rectangle copies.

use crate::PixelError;
use crate::layout::{Channels, check_strided, row, row_mut};

/// A half-open rectangle `[x1, x2) × [y1, y2)` in pixel coordinates.
///
/// Coordinates may lie outside an image; every operation clips them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// The rectangle covering a whole `width × height` image.
    pub fn from_size(width: usize, height: usize) -> Self {
        Self::new(0, 0, saturate(width), saturate(height))
    }

    pub const fn width(&self) -> i32 {
        self.x2.saturating_sub(self.x1)
    }

    pub const fn height(&self) -> i32 {
        self.y2.saturating_sub(self.y1)
    }

    pub const fn is_empty(&self) -> bool {
        self.x2 <= self.x1 || self.y2 <= self.y1
    }

    /// Overlap with `other`; may be empty.
    pub fn intersect(&self, other: &Rect) -> Rect {
        Rect {
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
            x2: self.x2.min(other.x2),
            y2: self.y2.min(other.y2),
        }
    }

    /// Shrink by `amount` on every side; may become empty.
    pub fn inset(&self, amount: i32) -> Rect {
        Rect {
            x1: self.x1.saturating_add(amount),
            y1: self.y1.saturating_add(amount),
            x2: self.x2.saturating_sub(amount),
            y2: self.y2.saturating_sub(amount),
        }
    }
}

pub(crate) fn saturate(v: usize) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

/// Copy the `src_rect` region of `src` into `dst` with its top-left corner at
/// `(dst_x, dst_y)`.
///
/// `src_rect` is clipped to the source and the destination origin is clamped
/// into the destination, then the overlapping rows are copied byte for byte.
/// Channels are not swizzled. A copy that clips away entirely is a successful
/// no-op.
///
/// ```
/// use twirl::{copy_rect, Rect};
///
/// let src = [1u8, 2, 3, 4, 5, 6]; // 3×2 gray
/// let mut dst = [0u8; 4];         // 2×2 gray
/// copy_rect(&src, &mut dst, 1, (3, 2), 3, (2, 2), 2, Rect::new(1, 0, 3, 2), 0, 0).unwrap();
/// assert_eq!(dst, [2, 3, 5, 6]);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn copy_rect(
    src: &[u8],
    dst: &mut [u8],
    channels: usize,
    src_size: (usize, usize),
    src_stride: usize,
    dst_size: (usize, usize),
    dst_stride: usize,
    src_rect: Rect,
    dst_x: i32,
    dst_y: i32,
) -> Result<(), PixelError> {
    trace_op!(?src_rect, dst_x, dst_y, channels, "copy_rect");
    let validate = || {
        let bpp = Channels::from_count(channels)?.count();
        check_strided(src.len(), src_size.0, src_size.1, src_stride, bpp)?;
        check_strided(dst.len(), dst_size.0, dst_size.1, dst_stride, bpp)
    };
    validate().map_err(|e| crate::rejected("copy_rect", e))?;

    let from = src_rect.intersect(&Rect::from_size(src_size.0, src_size.1));
    let dst_w = saturate(dst_size.0);
    let dst_h = saturate(dst_size.1);
    let dx = dst_x.clamp(0, dst_w);
    let dy = dst_y.clamp(0, dst_h);
    let w = from.width().min(dst_w - dx);
    let h = from.height().min(dst_h - dy);
    if w <= 0 || h <= 0 {
        return Ok(());
    }

    // all non-negative and inside both images from here on
    let (w, h) = (w as usize, h as usize);
    let (sx, sy) = (from.x1 as usize, from.y1 as usize);
    let (dx, dy) = (dx as usize, dy as usize);
    let bytes = w * channels;
    for y in 0..h {
        let s = &row(src, sy + y, src_stride, (sx + w) * channels)[sx * channels..];
        let d = &mut row_mut(dst, dy + y, dst_stride, (dx + w) * channels)[dx * channels..];
        d[..bytes].copy_from_slice(&s[..bytes]);
    }
    Ok(())
}
