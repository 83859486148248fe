//! Rectangle outlines.

use crate::PixelError;
use crate::copy::Rect;
use crate::layout::{Channels, check_strided, row_mut};

fn fill_span(row: &mut [u8], x1: i32, x2: i32, color: &[u8]) {
    let n = color.len();
    for px in row[x1 as usize * n..x2 as usize * n].chunks_exact_mut(n) {
        px.copy_from_slice(color);
    }
}

/// Draw the outline of `rect`, `thickness` pixels wide, inside its edges.
///
/// `color` holds one byte per channel. The outline is clipped to the image;
/// a rect that misses the image, or a zero `thickness`, draws nothing. A
/// thickness of half the rect's smaller side or more fills it.
///
/// ```
/// use twirl::{draw_rect, Rect};
///
/// let mut img = [0u8; 16]; // 4×4 gray
/// draw_rect(&mut img, 4, 4, 4, 1, Rect::new(0, 0, 4, 4), &[9], 1).unwrap();
/// assert_eq!(img, [9, 9, 9, 9, 9, 0, 0, 9, 9, 0, 0, 9, 9, 9, 9, 9]);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn draw_rect(
    buf: &mut [u8],
    width: usize,
    height: usize,
    stride: usize,
    channels: usize,
    rect: Rect,
    color: &[u8],
    thickness: u32,
) -> Result<(), PixelError> {
    trace_op!(?rect, thickness, channels, "draw_rect");
    let validate = || {
        let bpp = Channels::from_count(channels)?.count();
        if color.len() != bpp {
            return Err(PixelError::ColorLength);
        }
        check_strided(buf.len(), width, height, stride, bpp)
    };
    validate().map_err(|e| crate::rejected("draw_rect", e))?;

    let clip = rect.intersect(&Rect::from_size(width, height));
    if clip.is_empty() || thickness == 0 {
        return Ok(());
    }
    let hole = rect.inset(i32::try_from(thickness).unwrap_or(i32::MAX));
    let row_bytes = width * channels;
    for y in clip.y1..clip.y2 {
        let line = row_mut(buf, y as usize, stride, row_bytes);
        if hole.is_empty() || y < hole.y1 || y >= hole.y2 {
            fill_span(line, clip.x1, clip.x2, color);
        } else {
            // left and right bands, each clipped
            fill_span(line, clip.x1, hole.x1.clamp(clip.x1, clip.x2), color);
            fill_span(line, hole.x2.clamp(clip.x1, clip.x2), clip.x2, color);
        }
    }
    Ok(())
}
