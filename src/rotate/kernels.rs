// ---------------------------------------------------------------------------
// Quarter-turn kernels, generic over bytes per pixel.
//
// Every kernel walks the destination in row order and computes the matching
// source pixel. Callers have validated both buffers, so all indexing stays
// inside the checked extents.
// ---------------------------------------------------------------------------

use crate::layout::{row, row_mut};

use super::Rotation;

/// 0°: row-by-row copy.
#[inline(always)]
fn copy_rows<const N: usize>(
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    let row_bytes = w * N;
    for y in 0..h {
        row_mut(dst, y, ds, row_bytes).copy_from_slice(row(src, y, ss, row_bytes));
    }
}

/// 180°: destination row `y` is source row `h-1-y` read backwards.
#[inline(always)]
fn rotate_180<const N: usize>(
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    let row_bytes = w * N;
    for y in 0..h {
        let (s_px, _) = row(src, h - 1 - y, ss, row_bytes).as_chunks::<N>();
        let (d_px, _) = row_mut(dst, y, ds, row_bytes).as_chunks_mut::<N>();
        for (d, s) in d_px.iter_mut().zip(s_px.iter().rev()) {
            *d = *s;
        }
    }
}

/// 90° clockwise: destination row `x` is source column `x`, bottom to top.
#[inline(always)]
fn rotate_90<const N: usize>(
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    let dst_row_bytes = h * N;
    for x in 0..w {
        let (d_px, _) = row_mut(dst, x, ds, dst_row_bytes).as_chunks_mut::<N>();
        let col = x * N;
        for (i, d) in d_px.iter_mut().enumerate() {
            let at = (h - 1 - i) * ss + col;
            d.copy_from_slice(&src[at..at + N]);
        }
    }
}

/// 90° counter-clockwise: destination row `x` is source column `w-1-x`,
/// top to bottom.
#[inline(always)]
fn rotate_270<const N: usize>(
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    let dst_row_bytes = h * N;
    for x in 0..w {
        let (d_px, _) = row_mut(dst, x, ds, dst_row_bytes).as_chunks_mut::<N>();
        let col = (w - 1 - x) * N;
        for (i, d) in d_px.iter_mut().enumerate() {
            let at = i * ss + col;
            d.copy_from_slice(&src[at..at + N]);
        }
    }
}

#[inline(always)]
fn rotate_n<const N: usize>(
    rotation: Rotation,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    match rotation {
        Rotation::Deg0 => copy_rows::<N>(src, dst, w, h, ss, ds),
        Rotation::Deg90 => rotate_90::<N>(src, dst, w, h, ss, ds),
        Rotation::Deg180 => rotate_180::<N>(src, dst, w, h, ss, ds),
        Rotation::Deg270 => rotate_270::<N>(src, dst, w, h, ss, ds),
    }
}

/// Specialize on the channel count (1, 3 or 4), then on the rotation.
#[allow(clippy::too_many_arguments)]
#[inline(always)]
pub(super) fn rotate_any(
    rotation: Rotation,
    bpp: usize,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    match bpp {
        1 => rotate_n::<1>(rotation, src, dst, w, h, ss, ds),
        3 => rotate_n::<3>(rotation, src, dst, w, h, ss, ds),
        4 => rotate_n::<4>(rotation, src, dst, w, h, ss, ds),
        _ => {}
    }
}
