use core::fmt;

/// Errors from pixel buffer operations.
///
/// Every operation validates its inputs before touching the destination, so
/// an `Err` always means nothing was written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum PixelError {
    /// Width or height is zero, too small for the operation, or overflows.
    InvalidDimensions,
    /// Stride is smaller than `width × channels`.
    InvalidStride,
    /// Buffer is shorter than `(height - 1) × stride + width × channels`.
    BufferTooSmall,
    /// Contiguous buffer length is zero or not a multiple of the pixel size.
    NotPixelAligned,
    /// Destination holds fewer pixels than the source.
    PixelCountMismatch,
    /// Two images that must agree on size do not.
    DimensionMismatch,
    /// Channel count is not accepted by this operation.
    UnsupportedChannels(usize),
    /// Angle in degrees is not a multiple of 90.
    UnsupportedAngle(i32),
    /// Angle in radians is NaN or infinite.
    NonFiniteAngle,
    /// EXIF orientation involves mirroring (tags 2, 4, 5, 7).
    UnsupportedOrientation(u8),
    /// EXIF orientation outside 1..=8.
    InvalidOrientation(u8),
    /// Fill color does not hold exactly one byte per channel.
    ColorLength,
}

impl fmt::Display for PixelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions => write!(f, "width or height is zero, too small, or overflows"),
            Self::InvalidStride => write!(f, "stride is smaller than width * channels"),
            Self::BufferTooSmall => write!(f, "buffer is too small for the given dimensions and stride"),
            Self::NotPixelAligned => write!(f, "buffer length is not a multiple of the pixel size"),
            Self::PixelCountMismatch => write!(f, "destination holds fewer pixels than the source"),
            Self::DimensionMismatch => write!(f, "image dimensions do not match"),
            Self::UnsupportedChannels(n) => write!(f, "unsupported channel count {n}"),
            Self::UnsupportedAngle(deg) => {
                write!(f, "rotation of {deg} degrees is not a multiple of 90")
            }
            Self::NonFiniteAngle => write!(f, "rotation angle is not finite"),
            Self::UnsupportedOrientation(tag) => {
                write!(f, "EXIF orientation {tag} mirrors the image and is not supported")
            }
            Self::InvalidOrientation(tag) => write!(f, "EXIF orientation {tag} is not in 1..=8"),
            Self::ColorLength => write!(f, "color must have one byte per channel"),
        }
    }
}

impl core::error::Error for PixelError {}
