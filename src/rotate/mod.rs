// ---------------------------------------------------------------------------
// Lossless quarter-turn rotation with SIMD dispatch.
//
// Architecture: const-generic kernels in `kernels` do the pixel permutation.
// Per-tier wrappers enable target features and pick the kernel by channel
// count; the public API validates, then dispatches once via incant!.
// ---------------------------------------------------------------------------

use archmage::incant;
use archmage::prelude::*;

use crate::PixelError;
use crate::layout::check_strided;

mod kernels;


/// A clockwise rotation by a multiple of 90°.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// No rotation; a straight copy.
    #[default]
    Deg0,
    /// 90° clockwise.
    Deg90,
    /// 180°.
    Deg180,
    /// 90° counter-clockwise (270° clockwise).
    Deg270,
}

impl Rotation {
    /// Normalize an angle in degrees (modulo 360) to a rotation.
    ///
    /// `-90` is `Deg270`, `450` is `Deg90`. Angles that are not a multiple
    /// of 90 fail with [`PixelError::UnsupportedAngle`].
    ///
    /// ```
    /// use twirl::Rotation;
    /// assert_eq!(Rotation::from_degrees(-90), Ok(Rotation::Deg270));
    /// assert!(Rotation::from_degrees(45).is_err());
    /// ```
    pub const fn from_degrees(degrees: i32) -> Result<Self, PixelError> {
        match degrees.rem_euclid(360) {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            _ => Err(PixelError::UnsupportedAngle(degrees)),
        }
    }

    /// Clockwise angle in degrees, in `0..360`.
    pub const fn degrees(self) -> i32 {
        self.quarter_turns() as i32 * 90
    }

    /// Number of clockwise quarter turns, in `0..4`.
    pub const fn quarter_turns(self) -> u8 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 1,
            Self::Deg180 => 2,
            Self::Deg270 => 3,
        }
    }

    const fn from_quarter_turns(turns: u8) -> Self {
        match turns % 4 {
            0 => Self::Deg0,
            1 => Self::Deg90,
            2 => Self::Deg180,
            _ => Self::Deg270,
        }
    }

    /// The rotation that undoes this one.
    pub const fn inverse(self) -> Self {
        Self::from_quarter_turns(4 - self.quarter_turns())
    }

    /// This rotation followed by `next`.
    pub const fn then(self, next: Self) -> Self {
        Self::from_quarter_turns(self.quarter_turns() + next.quarter_turns())
    }

    /// Whether width and height trade places.
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }

    /// Output `(width, height)` for an input of `width × height`.
    pub const fn output_size(self, width: usize, height: usize) -> (usize, usize) {
        if self.swaps_axes() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

impl TryFrom<i32> for Rotation {
    type Error = PixelError;

    fn try_from(degrees: i32) -> Result<Self, PixelError> {
        Self::from_degrees(degrees)
    }
}

// ===========================================================================
// Per-tier wrappers (dispatch targets for incant!)
// ===========================================================================

#[allow(clippy::too_many_arguments)]
fn rotate_impl_scalar(
    _t: ScalarToken,
    r: Rotation,
    bpp: usize,
    s: &[u8],
    d: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    kernels::rotate_any(r, bpp, s, d, w, h, ss, ds);
}

#[cfg(target_arch = "x86_64")]
#[arcane]
#[allow(clippy::too_many_arguments)]
fn rotate_impl_v3(
    _t: X64V3Token,
    r: Rotation,
    bpp: usize,
    s: &[u8],
    d: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    kernels::rotate_any(r, bpp, s, d, w, h, ss, ds);
}

#[cfg(target_arch = "aarch64")]
#[arcane]
#[allow(clippy::too_many_arguments)]
fn rotate_impl_arm_v2(
    _t: Arm64V2Token,
    r: Rotation,
    bpp: usize,
    s: &[u8],
    d: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    kernels::rotate_any(r, bpp, s, d, w, h, ss, ds);
}

#[cfg(target_arch = "wasm32")]
#[arcane]
#[allow(clippy::too_many_arguments)]
fn rotate_impl_wasm128(
    _t: Wasm128Token,
    r: Rotation,
    bpp: usize,
    s: &[u8],
    d: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    kernels::rotate_any(r, bpp, s, d, w, h, ss, ds);
}

// ===========================================================================
// Public API
// ===========================================================================

#[allow(clippy::too_many_arguments)]
fn validate(
    rotation: Rotation,
    src: &[u8],
    dst: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), PixelError> {
    if !matches!(channels, 1 | 3 | 4) {
        return Err(PixelError::UnsupportedChannels(channels));
    }
    check_strided(src.len(), width, height, src_stride, channels)?;
    let (dw, dh) = rotation.output_size(width, height);
    check_strided(dst.len(), dw, dh, dst_stride, channels)
}

/// Rotate a strided image by a quarter turn, copying into `dst`.
///
/// `width`/`height` describe the source. The destination is
/// `rotation.output_size(width, height)` with its own `dst_stride`.
/// `channels` must be 1, 3 or 4. Every byte of every pixel is moved, never
/// blended, so any channel order works.
///
/// ```
/// use twirl::{rotate, Rotation};
///
/// // 3×2 RGB, rows padded to 12 bytes
/// let mut src = vec![0u8; 12 + 9];
/// src[..3].copy_from_slice(&[255, 0, 0]); // top-left red
/// let mut dst = vec![0u8; 3 * 2 * 3];
/// rotate(Rotation::Deg90, &src, &mut dst, 3, 2, 3, 12, 6).unwrap();
/// // top-left ends up top-right of the 2×3 output
/// assert_eq!(&dst[3..6], &[255, 0, 0]);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn rotate(
    rotation: Rotation,
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    channels: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), PixelError> {
    trace_op!(
        degrees = rotation.degrees(),
        width,
        height,
        channels,
        "rotate"
    );
    validate(rotation, src, dst, width, height, channels, src_stride, dst_stride)
        .map_err(|e| crate::rejected("rotate", e))?;
    incant!(
        rotate_impl(rotation, channels, src, dst, width, height, src_stride, dst_stride),
        [v3, arm_v2, wasm128, scalar]
    );
    Ok(())
}

/// Rotate 90° clockwise. Shorthand for [`rotate`] with [`Rotation::Deg90`].
#[allow(clippy::too_many_arguments)]
pub fn rotate_90(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    channels: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), PixelError> {
    rotate(Rotation::Deg90, src, dst, width, height, channels, src_stride, dst_stride)
}

/// Rotate 180°.
#[allow(clippy::too_many_arguments)]
pub fn rotate_180(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    channels: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), PixelError> {
    rotate(Rotation::Deg180, src, dst, width, height, channels, src_stride, dst_stride)
}

/// Rotate 90° counter-clockwise.
#[allow(clippy::too_many_arguments)]
pub fn rotate_270(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    channels: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), PixelError> {
    rotate(Rotation::Deg270, src, dst, width, height, channels, src_stride, dst_stride)
}

/// Rotate by an angle in whole degrees, normalized with
/// [`Rotation::from_degrees`].
#[allow(clippy::too_many_arguments)]
pub fn rotate_degrees(
    degrees: i32,
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    channels: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), PixelError> {
    let rotation =
        Rotation::from_degrees(degrees).map_err(|e| crate::rejected("rotate_degrees", e))?;
    rotate(rotation, src, dst, width, height, channels, src_stride, dst_stride)
}
