//! Buffer addressing: channel counts and strided-buffer validation.
//!
//! Every buffer in this crate is row-major with one byte per channel:
//! row `y` starts at `y * stride`, pixel `x` of that row at
//! `y * stride + x * channels`. Rows may carry trailing padding, and the last
//! row may stop right after its final pixel.

use crate::PixelError;

/// Number of interleaved 8-bit channels per pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Channels {
    /// Single luminance channel.
    Gray = 1,
    /// Luminance + alpha.
    GrayAlpha = 2,
    /// Three color channels (RGB, BGR).
    Rgb = 3,
    /// Four channels (RGBA, BGRA, ARGB, ABGR, RGBX, ...).
    Rgba = 4,
}

impl Channels {
    /// Map a raw channel count to a `Channels` value.
    pub const fn from_count(count: usize) -> Result<Self, PixelError> {
        match count {
            1 => Ok(Self::Gray),
            2 => Ok(Self::GrayAlpha),
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgba),
            n => Err(PixelError::UnsupportedChannels(n)),
        }
    }

    /// Bytes per pixel.
    #[inline]
    pub const fn count(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for Channels {
    type Error = PixelError;

    fn try_from(count: usize) -> Result<Self, PixelError> {
        Self::from_count(count)
    }
}

/// Minimum buffer length for `height` rows of `width` pixels, `stride` apart.
///
/// Fails with [`PixelError::InvalidDimensions`] on zero sizes or overflow and
/// with [`PixelError::InvalidStride`] when a row does not fit in the stride.
pub fn required_len(
    width: usize,
    height: usize,
    stride: usize,
    channels: usize,
) -> Result<usize, PixelError> {
    if width == 0 || height == 0 {
        return Err(PixelError::InvalidDimensions);
    }
    let row_bytes = width
        .checked_mul(channels)
        .ok_or(PixelError::InvalidDimensions)?;
    if row_bytes > stride {
        return Err(PixelError::InvalidStride);
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|n| n.checked_add(row_bytes))
        .ok_or(PixelError::InvalidDimensions)
}

#[inline]
pub(crate) fn check_strided(
    len: usize,
    width: usize,
    height: usize,
    stride: usize,
    channels: usize,
) -> Result<(), PixelError> {
    if len < required_len(width, height, stride, channels)? {
        return Err(PixelError::BufferTooSmall);
    }
    Ok(())
}

#[inline]
pub(crate) fn check_inplace(len: usize, bpp: usize) -> Result<(), PixelError> {
    if len == 0 || !len.is_multiple_of(bpp) {
        Err(PixelError::NotPixelAligned)
    } else {
        Ok(())
    }
}

#[inline]
pub(crate) fn check_copy(
    src_len: usize,
    src_bpp: usize,
    dst_len: usize,
    dst_bpp: usize,
) -> Result<(), PixelError> {
    if src_len == 0 || !src_len.is_multiple_of(src_bpp) {
        return Err(PixelError::NotPixelAligned);
    }
    if dst_len < (src_len / src_bpp) * dst_bpp {
        return Err(PixelError::PixelCountMismatch);
    }
    Ok(())
}

/// Bytes of row `y`, without padding.
#[inline(always)]
pub(crate) fn row(buf: &[u8], y: usize, stride: usize, row_bytes: usize) -> &[u8] {
    &buf[y * stride..][..row_bytes]
}

/// Mutable bytes of row `y`, without padding.
#[inline(always)]
pub(crate) fn row_mut(buf: &mut [u8], y: usize, stride: usize, row_bytes: usize) -> &mut [u8] {
    &mut buf[y * stride..][..row_bytes]
}
