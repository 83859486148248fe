// ---------------------------------------------------------------------------
// Channel-layout conversion and byte-order swizzles.
//
// Row functions do the per-pixel work. Strided loops run one row function per
// row under a single incant! dispatch, so each call picks its tier once.
// ---------------------------------------------------------------------------

use archmage::incant;
use archmage::prelude::*;

use crate::PixelError;
use crate::layout::{Channels, check_copy, check_inplace, check_strided, row, row_mut};

/// Target layout of a conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    Gray,
    Rgb,
    /// Alpha for sources that carry none.
    Rgba(u8),
    /// Exchange bytes 0 and 2, keeping the pixel size.
    SwapBr,
}

impl Op {
    const fn dst_bpp(self, src_bpp: usize) -> usize {
        match self {
            Self::Gray => 1,
            Self::Rgb => 3,
            Self::Rgba(_) => 4,
            Self::SwapBr => src_bpp,
        }
    }
}

/// BT.601 luma in 8-bit fixed point.
#[inline(always)]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((77 * r as u32 + 150 * g as u32 + 29 * b as u32) >> 8) as u8
}

// ===========================================================================
// Row implementations
// ===========================================================================

#[inline(always)]
fn luma_row(src: &[u8], dst: &mut [u8], bpp: usize) {
    for (s, d) in src.chunks_exact(bpp).zip(dst.iter_mut()) {
        *d = luma(s[0], s[1], s[2]);
    }
}

/// Keep the first byte of each pixel (gray from gray+alpha).
#[inline(always)]
fn first_byte_row(src: &[u8], dst: &mut [u8], bpp: usize) {
    for (s, d) in src.chunks_exact(bpp).zip(dst.iter_mut()) {
        *d = s[0];
    }
}

#[inline(always)]
fn gray_to_rgb_row(src: &[u8], dst: &mut [u8], bpp: usize) {
    for (s, d) in src.chunks_exact(bpp).zip(dst.chunks_exact_mut(3)) {
        d.fill(s[0]);
    }
}

#[inline(always)]
fn rgba_to_rgb_row(src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(3)) {
        d.copy_from_slice(&s[..3]);
    }
}

#[inline(always)]
fn gray_to_rgba_row(src: &[u8], dst: &mut [u8], alpha: u8) {
    for (&g, d) in src.iter().zip(dst.chunks_exact_mut(4)) {
        d.copy_from_slice(&[g, g, g, alpha]);
    }
}

#[inline(always)]
fn gray_alpha_to_rgba_row(src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(2).zip(dst.chunks_exact_mut(4)) {
        d.copy_from_slice(&[s[0], s[0], s[0], s[1]]);
    }
}

#[inline(always)]
fn rgb_to_rgba_row(src: &[u8], dst: &mut [u8], alpha: u8) {
    for (s, d) in src.chunks_exact(3).zip(dst.chunks_exact_mut(4)) {
        d.copy_from_slice(&[s[0], s[1], s[2], alpha]);
    }
}

#[inline(always)]
fn copy_swap_br_row(src: &[u8], dst: &mut [u8], bpp: usize) {
    for (s, d) in src.chunks_exact(bpp).zip(dst.chunks_exact_mut(bpp)) {
        d.copy_from_slice(s);
        d.swap(0, 2);
    }
}

#[inline(always)]
fn swap_br_row(row: &mut [u8], bpp: usize) {
    for px in row.chunks_exact_mut(bpp) {
        px.swap(0, 2);
    }
}

#[inline(always)]
fn convert_row(op: Op, bpp: usize, src: &[u8], dst: &mut [u8]) {
    match (op, bpp) {
        (Op::Gray, 1) | (Op::Rgb, 3) | (Op::Rgba(_), 4) => dst.copy_from_slice(src),
        (Op::Gray, 2) => first_byte_row(src, dst, 2),
        (Op::Gray, _) => luma_row(src, dst, bpp),
        (Op::Rgb, 1 | 2) => gray_to_rgb_row(src, dst, bpp),
        (Op::Rgb, _) => rgba_to_rgb_row(src, dst),
        (Op::Rgba(a), 1) => gray_to_rgba_row(src, dst, a),
        (Op::Rgba(_), 2) => gray_alpha_to_rgba_row(src, dst),
        (Op::Rgba(a), _) => rgb_to_rgba_row(src, dst, a),
        (Op::SwapBr, _) => copy_swap_br_row(src, dst, bpp),
    }
}

#[allow(clippy::too_many_arguments)]
#[inline(always)]
fn convert_strided(
    op: Op,
    bpp: usize,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    let dst_bpp = op.dst_bpp(bpp);
    for y in 0..h {
        convert_row(op, bpp, row(src, y, ss, w * bpp), row_mut(dst, y, ds, w * dst_bpp));
    }
}

#[inline(always)]
fn swap_br_rows(buf: &mut [u8], bpp: usize, w: usize, h: usize, stride: usize) {
    for y in 0..h {
        swap_br_row(row_mut(buf, y, stride, w * bpp), bpp);
    }
}

// ===========================================================================
// Per-tier wrappers (dispatch targets for incant!)
// ===========================================================================

#[allow(clippy::too_many_arguments)]
fn convert_impl_scalar(
    _t: ScalarToken,
    op: Op,
    bpp: usize,
    s: &[u8],
    d: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    convert_strided(op, bpp, s, d, w, h, ss, ds);
}
fn swap_inplace_impl_scalar(_t: ScalarToken, b: &mut [u8], bpp: usize, w: usize, h: usize, st: usize) {
    swap_br_rows(b, bpp, w, h, st);
}

#[cfg(target_arch = "x86_64")]
#[arcane]
#[allow(clippy::too_many_arguments)]
fn convert_impl_v3(
    _t: X64V3Token,
    op: Op,
    bpp: usize,
    s: &[u8],
    d: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    convert_strided(op, bpp, s, d, w, h, ss, ds);
}
#[cfg(target_arch = "x86_64")]
#[arcane]
fn swap_inplace_impl_v3(_t: X64V3Token, b: &mut [u8], bpp: usize, w: usize, h: usize, st: usize) {
    swap_br_rows(b, bpp, w, h, st);
}

#[cfg(target_arch = "aarch64")]
#[arcane]
#[allow(clippy::too_many_arguments)]
fn convert_impl_arm_v2(
    _t: Arm64V2Token,
    op: Op,
    bpp: usize,
    s: &[u8],
    d: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    convert_strided(op, bpp, s, d, w, h, ss, ds);
}
#[cfg(target_arch = "aarch64")]
#[arcane]
fn swap_inplace_impl_arm_v2(_t: Arm64V2Token, b: &mut [u8], bpp: usize, w: usize, h: usize, st: usize) {
    swap_br_rows(b, bpp, w, h, st);
}

#[cfg(target_arch = "wasm32")]
#[arcane]
#[allow(clippy::too_many_arguments)]
fn convert_impl_wasm128(
    _t: Wasm128Token,
    op: Op,
    bpp: usize,
    s: &[u8],
    d: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    convert_strided(op, bpp, s, d, w, h, ss, ds);
}
#[cfg(target_arch = "wasm32")]
#[arcane]
fn swap_inplace_impl_wasm128(_t: Wasm128Token, b: &mut [u8], bpp: usize, w: usize, h: usize, st: usize) {
    swap_br_rows(b, bpp, w, h, st);
}

// ===========================================================================
// Dispatch
// ===========================================================================

#[allow(clippy::too_many_arguments)]
fn convert(
    name: &'static str,
    op: Op,
    src: &[u8],
    dst: &mut [u8],
    src_channels: usize,
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), PixelError> {
    trace_op!(op = ?op, src_channels, width, height, "{name}");
    let dst_bpp = op.dst_bpp(src_channels);
    let validate = || {
        let bpp = Channels::from_count(src_channels)?.count();
        if op == Op::SwapBr && bpp < 3 {
            return Err(PixelError::UnsupportedChannels(bpp));
        }
        check_strided(src.len(), width, height, src_stride, bpp)?;
        check_strided(dst.len(), width, height, dst_stride, dst_bpp)
    };
    validate().map_err(|e| crate::rejected(name, e))?;
    incant!(
        convert_impl(op, src_channels, src, dst, width, height, src_stride, dst_stride),
        [v3, arm_v2, wasm128, scalar]
    );
    Ok(())
}

fn swap_inplace(
    name: &'static str,
    buf: &mut [u8],
    bpp: usize,
    width: usize,
    height: usize,
    stride: usize,
) -> Result<(), PixelError> {
    trace_op!(bpp, width, height, "{name}");
    check_strided(buf.len(), width, height, stride, bpp).map_err(|e| crate::rejected(name, e))?;
    incant!(
        swap_inplace_impl(buf, bpp, width, height, stride),
        [v3, arm_v2, wasm128, scalar]
    );
    Ok(())
}

// ===========================================================================
// Public API: layout conversion
// ===========================================================================

/// Any 1–4 channel image → gray (1 byte/px).
///
/// Color sources use `(77·R + 150·G + 29·B) >> 8`; alpha is dropped.
/// Gray+alpha keeps its gray byte. Gray is copied.
pub fn to_gray(
    src: &[u8],
    dst: &mut [u8],
    src_channels: usize,
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), PixelError> {
    convert("to_gray", Op::Gray, src, dst, src_channels, width, height, src_stride, dst_stride)
}

/// Any 1–4 channel image → 3 bytes/px.
///
/// Gray is broadcast to all three channels, byte 3 of 4-channel pixels is
/// dropped, and 3-channel pixels are copied in their existing order.
pub fn to_rgb(
    src: &[u8],
    dst: &mut [u8],
    src_channels: usize,
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), PixelError> {
    convert("to_rgb", Op::Rgb, src, dst, src_channels, width, height, src_stride, dst_stride)
}

/// Any 1–4 channel image → 4 bytes/px.
///
/// Sources without alpha get `alpha`; gray+alpha keeps its own.
#[allow(clippy::too_many_arguments)]
pub fn to_rgba(
    src: &[u8],
    dst: &mut [u8],
    src_channels: usize,
    alpha: u8,
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), PixelError> {
    convert(
        "to_rgba",
        Op::Rgba(alpha),
        src,
        dst,
        src_channels,
        width,
        height,
        src_stride,
        dst_stride,
    )
}

// ===========================================================================
// Public API: swizzles
// ===========================================================================

/// Copy 4bpp pixels, swapping B↔R (RGBA→BGRA or BGRA→RGBA).
pub fn rgba_to_bgra(src: &[u8], dst: &mut [u8]) -> Result<(), PixelError> {
    check_copy(src.len(), 4, dst.len(), 4).map_err(|e| crate::rejected("rgba_to_bgra", e))?;
    let n = src.len() / 4;
    convert("rgba_to_bgra", Op::SwapBr, src, &mut dst[..n * 4], 4, n, 1, n * 4, n * 4)
}

/// Swap B↔R channels in place for 4bpp pixels.
pub fn rgba_to_bgra_inplace(buf: &mut [u8]) -> Result<(), PixelError> {
    check_inplace(buf.len(), 4).map_err(|e| crate::rejected("rgba_to_bgra_inplace", e))?;
    let n = buf.len() / 4;
    swap_inplace("rgba_to_bgra_inplace", buf, 4, n, 1, n * 4)
}

/// Copy 3bpp pixels, swapping R↔B (RGB→BGR or BGR→RGB).
pub fn rgb_to_bgr(src: &[u8], dst: &mut [u8]) -> Result<(), PixelError> {
    check_copy(src.len(), 3, dst.len(), 3).map_err(|e| crate::rejected("rgb_to_bgr", e))?;
    let n = src.len() / 3;
    convert("rgb_to_bgr", Op::SwapBr, src, &mut dst[..n * 3], 3, n, 1, n * 3, n * 3)
}

/// Swap R↔B channels in place for 3bpp pixels.
pub fn rgb_to_bgr_inplace(buf: &mut [u8]) -> Result<(), PixelError> {
    check_inplace(buf.len(), 3).map_err(|e| crate::rejected("rgb_to_bgr_inplace", e))?;
    let n = buf.len() / 3;
    swap_inplace("rgb_to_bgr_inplace", buf, 3, n, 1, n * 3)
}

/// Alias for [`rgba_to_bgra`].
#[inline(always)]
pub fn bgra_to_rgba(src: &[u8], dst: &mut [u8]) -> Result<(), PixelError> {
    rgba_to_bgra(src, dst)
}

/// Alias for [`rgba_to_bgra_inplace`].
#[inline(always)]
pub fn bgra_to_rgba_inplace(buf: &mut [u8]) -> Result<(), PixelError> {
    rgba_to_bgra_inplace(buf)
}

/// Alias for [`rgb_to_bgr`].
#[inline(always)]
pub fn bgr_to_rgb(src: &[u8], dst: &mut [u8]) -> Result<(), PixelError> {
    rgb_to_bgr(src, dst)
}

/// Alias for [`rgb_to_bgr_inplace`].
#[inline(always)]
pub fn bgr_to_rgb_inplace(buf: &mut [u8]) -> Result<(), PixelError> {
    rgb_to_bgr_inplace(buf)
}

/// Copy 3bpp or 4bpp pixels between strided buffers, swapping bytes 0 and 2.
///
/// `src_stride` / `dst_stride` are the distances in bytes between the start of
/// consecutive rows. Padding bytes between rows are never read or written.
#[allow(clippy::too_many_arguments)]
pub fn swap_br_strided(
    src: &[u8],
    dst: &mut [u8],
    channels: usize,
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), PixelError> {
    convert("swap_br_strided", Op::SwapBr, src, dst, channels, width, height, src_stride, dst_stride)
}

/// Swap bytes 0 and 2 in place for a strided 3bpp or 4bpp image.
pub fn swap_br_inplace_strided(
    buf: &mut [u8],
    channels: usize,
    width: usize,
    height: usize,
    stride: usize,
) -> Result<(), PixelError> {
    if !matches!(channels, 3 | 4) {
        return Err(crate::rejected(
            "swap_br_inplace_strided",
            PixelError::UnsupportedChannels(channels),
        ));
    }
    swap_inplace("swap_br_inplace_strided", buf, channels, width, height, stride)
}
