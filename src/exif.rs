//! EXIF orientation: turn a camera-tagged image upright.
//!
//! The EXIF orientation tag (1–8) says how a stored image must be
//! transformed for display. Tags 1, 3, 6 and 8 are pure rotations and are
//! applied losslessly through [`rotate`](crate::rotate()). The mirrored tags
//! (2, 4, 5, 7) are rejected.

use crate::PixelError;
use crate::rotate::{Rotation, rotate};

/// The eight EXIF orientations.
///
/// ```text
///     1: Identity    2: FlipH       3: Rotate180   4: FlipV
///     ┌───┐          ┌───┐          ┌───┐          ┌───┐
///     │ F │          │ Ꟊ │          │   │          │   │
///     │   │          │   │          │ Ꟊ │          │ F │
///     └───┘          └───┘          └───┘          └───┘
///
///     5: Transpose   6: Rotate90    7: Transverse  8: Rotate270
///     ┌────┐         ┌────┐         ┌────┐         ┌────┐
///     │ F  │         │  F │         │  Ꟊ │         │ Ꟊ  │
///     └────┘         └────┘         └────┘         └────┘
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// EXIF 1.
    #[default]
    Identity,
    /// Horizontal flip. EXIF 2.
    FlipH,
    /// EXIF 3.
    Rotate180,
    /// Vertical flip. EXIF 4.
    FlipV,
    /// Reflect over the main diagonal. EXIF 5.
    Transpose,
    /// Display needs a 90° clockwise turn. EXIF 6.
    Rotate90,
    /// Reflect over the anti-diagonal. EXIF 7.
    Transverse,
    /// Display needs a 90° counter-clockwise turn. EXIF 8.
    Rotate270,
}

impl Orientation {
    /// Parse an EXIF tag. `None` outside 1–8.
    pub const fn from_exif(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::Identity),
            2 => Some(Self::FlipH),
            3 => Some(Self::Rotate180),
            4 => Some(Self::FlipV),
            5 => Some(Self::Transpose),
            6 => Some(Self::Rotate90),
            7 => Some(Self::Transverse),
            8 => Some(Self::Rotate270),
            _ => None,
        }
    }

    pub const fn to_exif(self) -> u8 {
        match self {
            Self::Identity => 1,
            Self::FlipH => 2,
            Self::Rotate180 => 3,
            Self::FlipV => 4,
            Self::Transpose => 5,
            Self::Rotate90 => 6,
            Self::Transverse => 7,
            Self::Rotate270 => 8,
        }
    }

    /// The rotation that displays this orientation upright, or `None` when
    /// a mirror is involved.
    pub const fn rotation(self) -> Option<Rotation> {
        match self {
            Self::Identity => Some(Rotation::Deg0),
            Self::Rotate90 => Some(Rotation::Deg90),
            Self::Rotate180 => Some(Rotation::Deg180),
            Self::Rotate270 => Some(Rotation::Deg270),
            Self::FlipH | Self::FlipV | Self::Transpose | Self::Transverse => None,
        }
    }

    /// Whether the upright image has width and height swapped.
    pub const fn swaps_axes(self) -> bool {
        matches!(
            self,
            Self::Transpose | Self::Rotate90 | Self::Transverse | Self::Rotate270
        )
    }
}

impl TryFrom<u8> for Orientation {
    type Error = PixelError;

    fn try_from(tag: u8) -> Result<Self, PixelError> {
        Self::from_exif(tag).ok_or(PixelError::InvalidOrientation(tag))
    }
}

fn rotation_for(tag: u8) -> Result<Rotation, PixelError> {
    Orientation::try_from(tag)?
        .rotation()
        .ok_or(PixelError::UnsupportedOrientation(tag))
}

/// Upright `(width, height)` for a stored image with EXIF `tag`.
pub fn oriented_size(tag: u8, width: usize, height: usize) -> Result<(usize, usize), PixelError> {
    Ok(rotation_for(tag)?.output_size(width, height))
}

/// Apply EXIF orientation `tag` to `src`, writing the upright image to `dst`.
///
/// `dst` has the size given by [`oriented_size`]. Tag 1 is a plain copy.
/// Mirrored tags fail with [`PixelError::UnsupportedOrientation`], tags outside
/// 1–8 with [`PixelError::InvalidOrientation`], and `dst` is left untouched.
///
/// ```
/// use twirl::apply_exif_orientation;
///
/// let stored = [10u8, 20, 30, 40];
/// let mut upright = [0u8; 4];
/// apply_exif_orientation(6, &stored, &mut upright, 2, 2, 1, 2, 2).unwrap();
/// assert_eq!(upright, [30, 10, 40, 20]);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn apply_exif_orientation(
    tag: u8,
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    channels: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), PixelError> {
    trace_op!(tag, width, height, channels, "apply_exif_orientation");
    let rotation = rotation_for(tag).map_err(|e| crate::rejected("apply_exif_orientation", e))?;
    rotate(rotation, src, dst, width, height, channels, src_stride, dst_stride)
}
