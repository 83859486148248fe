//! Whole-image rotation using [`imgref`](::imgref) types.
//!
//! Strides carry over from the image: an `ImgRef` with padding is read
//! without copying it first. Functions returning [`ImgVec`] allocate a packed
//! output; [`rotate_into`] writes into a caller-owned `ImgRefMut`.
//!
//! ```rust
//! use rgb::Rgba;
//! use ::imgref::ImgVec;
//! use twirl::{Rotation, imgref};
//!
//! let img = ImgVec::new(vec![Rgba::new(1u8, 2, 3, 255); 6], 3, 2);
//! let turned = imgref::rotate_img(img.as_ref(), Rotation::Deg90).unwrap();
//! assert_eq!((turned.width(), turned.height()), (2, 3));
//! ```

use alloc::vec::Vec;

use imgref::{ImgRef, ImgRefMut, ImgVec};

use crate::typed::Pixel;
use crate::{PixelError, Rotation};

fn src_bytes<'a, P: Pixel>(img: &ImgRef<'a, P>) -> (&'a [u8], usize) {
    (bytemuck::cast_slice(img.buf()), img.stride() * P::CHANNELS.count())
}

fn packed<P: Pixel>(width: usize, height: usize) -> Vec<P> {
    bytemuck::allocation::zeroed_vec(width * height)
}

/// Rotate `img` by a quarter turn into a new packed image.
pub fn rotate_img<P: Pixel>(img: ImgRef<'_, P>, rotation: Rotation) -> Result<ImgVec<P>, PixelError> {
    let (dw, dh) = rotation.output_size(img.width(), img.height());
    let mut buf = packed::<P>(dw, dh);
    let mut out = ImgRefMut::new(&mut buf, dw, dh);
    rotate_into(img, &mut out, rotation)?;
    Ok(ImgVec::new(buf, dw, dh))
}

/// Rotate `src` by a quarter turn into `dst`, which must already have the
/// rotated size; any stride works.
pub fn rotate_into<P: Pixel>(
    src: ImgRef<'_, P>,
    dst: &mut ImgRefMut<'_, P>,
    rotation: Rotation,
) -> Result<(), PixelError> {
    if rotation.output_size(src.width(), src.height()) != (dst.width(), dst.height()) {
        return Err(crate::rejected("rotate_into", PixelError::DimensionMismatch));
    }
    let bpp = P::CHANNELS.count();
    let (s, ss) = src_bytes(&src);
    let ds = dst.stride() * bpp;
    crate::rotate(
        rotation,
        s,
        bytemuck::cast_slice_mut(dst.buf_mut()),
        src.width(),
        src.height(),
        bpp,
        ss,
        ds,
    )
}

/// Turn `img` upright according to EXIF orientation `tag`.
pub fn orient_img<P: Pixel>(img: ImgRef<'_, P>, tag: u8) -> Result<ImgVec<P>, PixelError> {
    let (dw, dh) = crate::oriented_size(tag, img.width(), img.height())?;
    let bpp = P::CHANNELS.count();
    let (s, ss) = src_bytes(&img);
    let mut buf = packed::<P>(dw, dh);
    crate::apply_exif_orientation(
        tag,
        s,
        bytemuck::cast_slice_mut(&mut buf),
        img.width(),
        img.height(),
        bpp,
        ss,
        dw * bpp,
    )?;
    Ok(ImgVec::new(buf, dw, dh))
}

/// Bilinear rotation of `img` by `angle_radians` onto a `dst_width ×
/// dst_height` canvas.
#[cfg(feature = "std")]
pub fn rotate_bilinear_img<P: Pixel>(
    img: ImgRef<'_, P>,
    dst_width: usize,
    dst_height: usize,
    angle_radians: f64,
) -> Result<ImgVec<P>, PixelError> {
    let bpp = P::CHANNELS.count();
    let (s, ss) = src_bytes(&img);
    let mut buf = packed::<P>(dst_width, dst_height);
    crate::rotate_bilinear(
        s,
        bytemuck::cast_slice_mut(&mut buf),
        bpp,
        img.width(),
        img.height(),
        ss,
        dst_width,
        dst_height,
        dst_width * bpp,
        angle_radians,
    )?;
    Ok(ImgVec::new(buf, dst_width, dst_height))
}

/// Rotate by any angle onto a canvas just large enough for the whole image,
/// taking the lossless path for quarter turns.
#[cfg(feature = "std")]
pub fn rotate_fit<P: Pixel>(
    img: ImgRef<'_, P>,
    angle_radians: f64,
    params: &crate::RotateParams,
) -> Result<ImgVec<P>, PixelError> {
    let (dw, dh) = crate::rotated_bounds(img.width(), img.height(), angle_radians);
    let bpp = P::CHANNELS.count();
    let (s, ss) = src_bytes(&img);
    let mut buf = packed::<P>(dw, dh);
    crate::bilinear::rotate(
        s,
        bytemuck::cast_slice_mut(&mut buf),
        bpp,
        img.width(),
        img.height(),
        ss,
        dw,
        dh,
        dw * bpp,
        angle_radians,
        params,
    )?;
    Ok(ImgVec::new(buf, dw, dh))
}
