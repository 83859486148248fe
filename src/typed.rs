//! Rotation over [`rgb`] crate pixel slices via bytemuck.
//!
//! Each function reinterprets the typed slices as bytes and calls the
//! byte-level operation with the channel count the pixel type implies.
//! Buffers are tightly packed: row stride equals width.
//!
//! ```rust
//! use rgb::Rgb;
//! use twirl::{Rotation, typed};
//!
//! let src = vec![Rgb::new(255u8, 0, 0), Rgb::new(0, 255, 0)]; // 2×1
//! let mut dst = vec![Rgb::default(); 2];                      // 1×2
//! typed::rotate_pixels(Rotation::Deg90, &src, &mut dst, 2, 1).unwrap();
//! assert_eq!(dst, src);
//! ```

use rgb::{Bgr, Bgra, Gray, GrayAlpha, Rgb, Rgba};

use crate::{Channels, PixelError, Rotation};

/// An 8-bit pixel type with a known channel count.
pub trait Pixel: bytemuck::Pod {
    const CHANNELS: Channels;
}

impl Pixel for u8 {
    const CHANNELS: Channels = Channels::Gray;
}
impl Pixel for Gray<u8> {
    const CHANNELS: Channels = Channels::Gray;
}
impl Pixel for GrayAlpha<u8> {
    const CHANNELS: Channels = Channels::GrayAlpha;
}
impl Pixel for Rgb<u8> {
    const CHANNELS: Channels = Channels::Rgb;
}
impl Pixel for Bgr<u8> {
    const CHANNELS: Channels = Channels::Rgb;
}
impl Pixel for Rgba<u8> {
    const CHANNELS: Channels = Channels::Rgba;
}
impl Pixel for Bgra<u8> {
    const CHANNELS: Channels = Channels::Rgba;
}

/// Rotate a packed `width × height` pixel slice into `dst`, which holds the
/// rotated size. Two-channel pixels are rejected.
pub fn rotate_pixels<P: Pixel>(
    rotation: Rotation,
    src: &[P],
    dst: &mut [P],
    width: usize,
    height: usize,
) -> Result<(), PixelError> {
    let bpp = P::CHANNELS.count();
    let (dw, _) = rotation.output_size(width, height);
    crate::rotate(
        rotation,
        bytemuck::cast_slice(src),
        bytemuck::cast_slice_mut(dst),
        width,
        height,
        bpp,
        width * bpp,
        dw * bpp,
    )
}

/// Apply EXIF orientation `tag` to a packed pixel slice.
pub fn orient_pixels<P: Pixel>(
    tag: u8,
    src: &[P],
    dst: &mut [P],
    width: usize,
    height: usize,
) -> Result<(), PixelError> {
    let bpp = P::CHANNELS.count();
    let (dw, _) = crate::oriented_size(tag, width, height)?;
    crate::apply_exif_orientation(
        tag,
        bytemuck::cast_slice(src),
        bytemuck::cast_slice_mut(dst),
        width,
        height,
        bpp,
        width * bpp,
        dw * bpp,
    )
}

/// Bilinear rotation between packed pixel slices of independent sizes.
#[cfg(feature = "std")]
#[allow(clippy::too_many_arguments)]
pub fn rotate_bilinear_pixels<P: Pixel>(
    src: &[P],
    dst: &mut [P],
    src_width: usize,
    src_height: usize,
    dst_width: usize,
    dst_height: usize,
    angle_radians: f64,
) -> Result<(), PixelError> {
    let bpp = P::CHANNELS.count();
    crate::rotate_bilinear(
        bytemuck::cast_slice(src),
        bytemuck::cast_slice_mut(dst),
        bpp,
        src_width,
        src_height,
        src_width * bpp,
        dst_width,
        dst_height,
        dst_width * bpp,
        angle_radians,
    )
}
