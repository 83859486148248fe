// ---------------------------------------------------------------------------
// Arbitrary-angle rotation with Q16 fixed-point bilinear sampling.
//
// Each destination pixel is mapped back into the source around the two
// image centers. Coordinates that land outside the interpolation area are
// clamped to the nearest interior position, so edges smear instead of
// turning transparent. Weights and rounding are integer-only, which keeps the
// output identical on every SIMD tier.
// ---------------------------------------------------------------------------

use core::f64::consts::FRAC_PI_2;

use archmage::incant;
use archmage::prelude::*;

use crate::PixelError;
use crate::layout::{check_strided, row_mut};
use crate::rotate::Rotation;

/// Q16 one.
const ONE: u64 = 1 << 16;

/// Clamp margin below the last row/column, so `x0 + 1` stays in the image.
const EDGE_EPSILON: f64 = 0.001;

/// Angles within this many radians of a multiple of π/2 count as quarter turns.
const QUARTER_TURN_TOLERANCE: f64 = 1e-9;

/// Resampling filter for [`rotate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum RotateFilter {
    /// Four-tap bilinear with Q16 weights.
    #[default]
    Bilinear,
}

/// Options for [`rotate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RotateParams {
    pub filter: RotateFilter,
}

impl RotateParams {
    pub const fn new(filter: RotateFilter) -> Self {
        Self { filter }
    }
}

/// The discrete rotation `angle_radians` lands on, if it is a multiple of π/2.
pub fn quarter_turn(angle_radians: f64) -> Option<Rotation> {
    if !angle_radians.is_finite() {
        return None;
    }
    let turns = (angle_radians / FRAC_PI_2).round();
    if (angle_radians - turns * FRAC_PI_2).abs() > QUARTER_TURN_TOLERANCE {
        return None;
    }
    Rotation::from_degrees(turns.rem_euclid(4.0) as i32 * 90).ok()
}

/// Size of the axis-aligned box that holds a `width × height` image rotated
/// by `angle_radians`.
///
/// Quarter turns return the exact swapped or unchanged size. Other angles
/// round to the nearest pixel and never return zero.
///
/// ```
/// use twirl::rotated_bounds;
/// use core::f64::consts::FRAC_PI_2;
///
/// assert_eq!(rotated_bounds(200, 100, FRAC_PI_2), (100, 200));
/// assert_eq!(rotated_bounds(100, 100, FRAC_PI_2 / 2.0), (141, 141));
/// ```
pub fn rotated_bounds(width: usize, height: usize, angle_radians: f64) -> (usize, usize) {
    if let Some(r) = quarter_turn(angle_radians) {
        return r.output_size(width, height);
    }
    let cos = angle_radians.cos().abs();
    let sin = angle_radians.sin().abs();
    let (w, h) = (width as f64, height as f64);
    let new_w = (w * cos + h * sin).round() as usize;
    let new_h = (w * sin + h * cos).round() as usize;
    (new_w.max(1), new_h.max(1))
}

// ===========================================================================
// Kernel
// ===========================================================================

struct Geometry {
    sw: usize,
    sh: usize,
    ss: usize,
    dw: usize,
    dh: usize,
    ds: usize,
    cos: f64,
    sin: f64,
}

/// Blend the 2×2 block at `(x0, y0)` with Q16 fractions `fx`, `fy`.
#[inline(always)]
fn sample<const N: usize>(src: &[u8], ss: usize, x0: usize, y0: usize, fx: u64, fy: u64) -> [u8; N] {
    let w00 = ((ONE - fx) * (ONE - fy)) >> 16;
    let w10 = (fx * (ONE - fy)) >> 16;
    let w01 = ((ONE - fx) * fy) >> 16;
    let w11 = (fx * fy) >> 16;

    let top = y0 * ss + x0 * N;
    let bottom = top + ss;
    let p00 = &src[top..top + N];
    let p10 = &src[top + N..top + 2 * N];
    let p01 = &src[bottom..bottom + N];
    let p11 = &src[bottom + N..bottom + 2 * N];

    let mut out = [0u8; N];
    for c in 0..N {
        let acc = p00[c] as u64 * w00
            + p10[c] as u64 * w10
            + p01[c] as u64 * w01
            + p11[c] as u64 * w11;
        out[c] = ((acc + (ONE >> 1)) >> 16) as u8;
    }
    out
}

#[inline(always)]
fn rotate_bilinear_n<const N: usize>(g: &Geometry, src: &[u8], dst: &mut [u8]) {
    let cx_in = (g.sw - 1) as f64 / 2.0;
    let cy_in = (g.sh - 1) as f64 / 2.0;
    let cx_out = (g.dw - 1) as f64 / 2.0;
    let cy_out = (g.dh - 1) as f64 / 2.0;
    let last_x = (g.sw - 1) as f64;
    let last_y = (g.sh - 1) as f64;
    let corner = (g.sh - 1) * g.ss + (g.sw - 1) * N;

    for y in 0..g.dh {
        let ry = y as f64 - cy_out;
        let (d_px, _) = row_mut(dst, y, g.ds, g.dw * N).as_chunks_mut::<N>();
        for (x, d) in d_px.iter_mut().enumerate() {
            let rx = x as f64 - cx_out;
            let mut sx = rx * g.cos + ry * g.sin + cx_in;
            let mut sy = -rx * g.sin + ry * g.cos + cy_in;

            // exactly on the bottom-right pixel: the clamped blend would leak
            // up to 132/65536 of its weight to the neighbors
            if sx == last_x && sy == last_y {
                d.copy_from_slice(&src[corner..corner + N]);
                continue;
            }

            // x0 + 1 and y0 + 1 must stay inside the image
            if sx < 0.0 || sy < 0.0 || sx >= last_x || sy >= last_y {
                sx = sx.clamp(0.0, last_x - EDGE_EPSILON);
                sy = sy.clamp(0.0, last_y - EDGE_EPSILON);
            }

            // both are non-negative here, so truncation is floor
            let x0 = sx as usize;
            let y0 = sy as usize;
            let fx = ((sx - x0 as f64) * ONE as f64) as u64;
            let fy = ((sy - y0 as f64) * ONE as f64) as u64;
            *d = sample::<N>(src, g.ss, x0, y0, fx, fy);
        }
    }
}

#[inline(always)]
fn rotate_bilinear_any(g: &Geometry, bpp: usize, src: &[u8], dst: &mut [u8]) {
    match bpp {
        1 => rotate_bilinear_n::<1>(g, src, dst),
        2 => rotate_bilinear_n::<2>(g, src, dst),
        3 => rotate_bilinear_n::<3>(g, src, dst),
        4 => rotate_bilinear_n::<4>(g, src, dst),
        _ => {}
    }
}

// ===========================================================================
// Per-tier wrappers (dispatch targets for incant!)
// ===========================================================================

fn bilinear_impl_scalar(_t: ScalarToken, g: &Geometry, bpp: usize, s: &[u8], d: &mut [u8]) {
    rotate_bilinear_any(g, bpp, s, d);
}

#[cfg(target_arch = "x86_64")]
#[arcane]
fn bilinear_impl_v3(_t: X64V3Token, g: &Geometry, bpp: usize, s: &[u8], d: &mut [u8]) {
    rotate_bilinear_any(g, bpp, s, d);
}

#[cfg(target_arch = "aarch64")]
#[arcane]
fn bilinear_impl_arm_v2(_t: Arm64V2Token, g: &Geometry, bpp: usize, s: &[u8], d: &mut [u8]) {
    rotate_bilinear_any(g, bpp, s, d);
}

#[cfg(target_arch = "wasm32")]
#[arcane]
fn bilinear_impl_wasm128(_t: Wasm128Token, g: &Geometry, bpp: usize, s: &[u8], d: &mut [u8]) {
    rotate_bilinear_any(g, bpp, s, d);
}

// ===========================================================================
// Public API
// ===========================================================================

/// Rotate `src` by `angle_radians` (positive is clockwise on screen) into a
/// destination of any size, sampling bilinearly.
///
/// The source center maps onto the destination center. Destination pixels
/// whose preimage falls outside the source take the nearest edge value.
/// The source must be at least 2×2; `channels` may be 1 to 4.
///
/// ```
/// use twirl::rotate_bilinear;
///
/// let src = [0u8, 100, 200, 255];
/// let mut dst = [0u8; 4];
/// rotate_bilinear(&src, &mut dst, 1, 2, 2, 2, 2, 2, 2, 0.0).unwrap();
/// assert_eq!(dst, src);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn rotate_bilinear(
    src: &[u8],
    dst: &mut [u8],
    channels: usize,
    src_width: usize,
    src_height: usize,
    src_stride: usize,
    dst_width: usize,
    dst_height: usize,
    dst_stride: usize,
    angle_radians: f64,
) -> Result<(), PixelError> {
    trace_op!(
        angle_radians,
        src_width,
        src_height,
        dst_width,
        dst_height,
        channels,
        "rotate_bilinear"
    );
    let validate = || {
        if !(1..=4).contains(&channels) {
            return Err(PixelError::UnsupportedChannels(channels));
        }
        if !angle_radians.is_finite() {
            return Err(PixelError::NonFiniteAngle);
        }
        if src_width < 2 || src_height < 2 {
            return Err(PixelError::InvalidDimensions);
        }
        check_strided(src.len(), src_width, src_height, src_stride, channels)?;
        check_strided(dst.len(), dst_width, dst_height, dst_stride, channels)
    };
    validate().map_err(|e| crate::rejected("rotate_bilinear", e))?;

    let (sin, cos) = angle_radians.sin_cos();
    let g = Geometry {
        sw: src_width,
        sh: src_height,
        ss: src_stride,
        dw: dst_width,
        dh: dst_height,
        ds: dst_stride,
        cos,
        sin,
    };
    incant!(bilinear_impl(&g, channels, src, dst), [v3, arm_v2, wasm128, scalar]);
    Ok(())
}

/// Rotate by any angle, taking the lossless path when possible.
///
/// Quarter turns (within 1e-9 rad) whose destination has the matching
/// rotated size go through [`crate::rotate()`]; everything else is resampled
/// with `params.filter`.
#[allow(clippy::too_many_arguments)]
pub fn rotate(
    src: &[u8],
    dst: &mut [u8],
    channels: usize,
    src_width: usize,
    src_height: usize,
    src_stride: usize,
    dst_width: usize,
    dst_height: usize,
    dst_stride: usize,
    angle_radians: f64,
    params: &RotateParams,
) -> Result<(), PixelError> {
    if let Some(r) = quarter_turn(angle_radians)
        && r.output_size(src_width, src_height) == (dst_width, dst_height)
        && channels != 2
    {
        return crate::rotate::rotate(
            r, src, dst, src_width, src_height, channels, src_stride, dst_stride,
        );
    }
    match params.filter {
        RotateFilter::Bilinear => rotate_bilinear(
            src,
            dst,
            channels,
            src_width,
            src_height,
            src_stride,
            dst_width,
            dst_height,
            dst_stride,
            angle_radians,
        ),
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;
    extern crate std;
    use super::*;
    use alloc::{vec, vec::Vec};
    use archmage::testing::{CompileTimePolicy, for_each_token_permutation};
    use core::f64::consts::PI;

    fn policy() -> CompileTimePolicy {
        if std::env::var_os("CI").is_some() {
            CompileTimePolicy::Fail
        } else {
            CompileTimePolicy::WarnStderr
        }
    }

    fn make_image(w: usize, h: usize, bpp: usize) -> Vec<u8> {
        (0..w * h * bpp).map(|i| ((i * 37 + i / 7) % 256) as u8).collect()
    }

    /// Same mapping and quantized weights, evaluated in floating point.
    #[allow(clippy::too_many_arguments)]
    fn float_reference(
        src: &[u8],
        bpp: usize,
        sw: usize,
        sh: usize,
        dw: usize,
        dh: usize,
        angle: f64,
    ) -> Vec<u8> {
        let (sin, cos) = angle.sin_cos();
        let (cxi, cyi) = ((sw - 1) as f64 / 2.0, (sh - 1) as f64 / 2.0);
        let (cxo, cyo) = ((dw - 1) as f64 / 2.0, (dh - 1) as f64 / 2.0);
        let mut out = vec![0u8; dw * dh * bpp];
        for y in 0..dh {
            for x in 0..dw {
                let (rx, ry) = (x as f64 - cxo, y as f64 - cyo);
                let mut sx = rx * cos + ry * sin + cxi;
                let mut sy = -rx * sin + ry * cos + cyi;
                if sx == (sw - 1) as f64 && sy == (sh - 1) as f64 {
                    let at = (sh * sw - 1) * bpp;
                    out[(y * dw + x) * bpp..][..bpp].copy_from_slice(&src[at..at + bpp]);
                    continue;
                }
                if sx.floor() < 0.0
                    || sy.floor() < 0.0
                    || sx.floor() >= (sw - 1) as f64
                    || sy.floor() >= (sh - 1) as f64
                {
                    sx = sx.clamp(0.0, (sw - 1) as f64 - 0.001);
                    sy = sy.clamp(0.0, (sh - 1) as f64 - 0.001);
                }
                let (xf, yf) = (sx.floor(), sy.floor());
                let fx = ((sx - xf) * 65536.0).trunc();
                let fy = ((sy - yf) * 65536.0).trunc();
                let w = [
                    ((65536.0 - fx) * (65536.0 - fy) / 65536.0).floor(),
                    (fx * (65536.0 - fy) / 65536.0).floor(),
                    ((65536.0 - fx) * fy / 65536.0).floor(),
                    (fx * fy / 65536.0).floor(),
                ];
                let (x0, y0) = (xf as usize, yf as usize);
                for c in 0..bpp {
                    let p = |xx: usize, yy: usize| src[(yy * sw + xx) * bpp + c] as f64;
                    let v = p(x0, y0) * w[0]
                        + p(x0 + 1, y0) * w[1]
                        + p(x0, y0 + 1) * w[2]
                        + p(x0 + 1, y0 + 1) * w[3];
                    out[(y * dw + x) * bpp + c] = ((v + 32768.0) / 65536.0).floor() as u8;
                }
            }
        }
        out
    }

    #[test]
    fn permutation_matches_float_reference() {
        let cases: &[(usize, usize, usize, usize, f64)] = &[
            (8, 6, 8, 6, 0.3),
            (8, 6, 10, 10, -1.1),
            (5, 9, 7, 7, PI / 5.0),
            (16, 16, 23, 23, PI / 4.0),
            (3, 2, 4, 4, 2.5),
        ];
        let report = for_each_token_permutation(policy(), |perm| {
            for &(sw, sh, dw, dh, angle) in cases {
                for bpp in 1..=4 {
                    let src = make_image(sw, sh, bpp);
                    let mut dst = vec![0u8; dw * dh * bpp];
                    rotate_bilinear(&src, &mut dst, bpp, sw, sh, sw * bpp, dw, dh, dw * bpp, angle)
                        .unwrap();
                    let expected = float_reference(&src, bpp, sw, sh, dw, dh, angle);
                    assert_eq!(dst, expected, "{sw}x{sh}->{dw}x{dh} a={angle} bpp={bpp} tier={perm}");
                }
            }
        });
        std::eprintln!("rotate_bilinear: {report}");
    }

    #[test]
    fn zero_angle_is_identity() {
        for (w, h) in [(2, 2), (3, 7), (13, 5)] {
            for bpp in 1..=4 {
                let src = make_image(w, h, bpp);
                let mut dst = vec![0u8; src.len()];
                rotate_bilinear(&src, &mut dst, bpp, w, h, w * bpp, w, h, w * bpp, 0.0).unwrap();
                assert_eq!(dst, src, "{w}x{h} bpp={bpp}");
            }
        }
    }

    #[test]
    fn far_corners_pin_to_edge_pixels() {
        // 3×3 gray with distinct corners, sampled into a much larger canvas
        let src = [10u8, 0, 20, 0, 0, 0, 30, 0, 40];
        let mut dst = vec![0u8; 21 * 21];
        rotate_bilinear(&src, &mut dst, 1, 3, 3, 3, 21, 21, 21, 0.0).unwrap();
        assert_eq!(dst[0], 10);
        assert_eq!(dst[20], 20);
        assert_eq!(dst[20 * 21], 30);
        assert_eq!(dst[21 * 21 - 1], 40);
    }

    #[test]
    fn one_axis_clamp_blends_along_the_other() {
        // 3×2 → 2×3 at 0°: the bottom output row clamps y to 1 - 0.001 while
        // x = 0.5 stays free, giving weights 33/33/32735/32735
        let src = [255u8, 255, 9, 0, 1, 9];
        let mut dst = [0u8; 6];
        rotate_bilinear(&src, &mut dst, 1, 3, 2, 3, 2, 3, 2, 0.0).unwrap();
        assert_eq!(dst, [255, 132, 128, 69, 1, 5]);
    }

    #[test]
    fn zero_angle_keeps_extreme_corner_pixels() {
        for src in [[0u8, 0, 0, 255], [255, 255, 255, 0], [250, 3, 7, 249]] {
            let mut dst = [0u8; 4];
            rotate_bilinear(&src, &mut dst, 1, 2, 2, 2, 2, 2, 2, 0.0).unwrap();
            assert_eq!(dst, src);
        }
    }

    #[test]
    fn permutation_padded_strides() {
        let (sw, sh, dw, dh) = (7, 5, 9, 8);
        let report = for_each_token_permutation(policy(), |perm| {
            for bpp in 1..=4 {
                let packed_src = make_image(sw, sh, bpp);
                let (ss, ds) = (sw * bpp + 5, dw * bpp + 4);
                let mut src = vec![0x55u8; sh * ss];
                for y in 0..sh {
                    src[y * ss..][..sw * bpp].copy_from_slice(&packed_src[y * sw * bpp..][..sw * bpp]);
                }

                let mut packed = vec![0u8; dw * dh * bpp];
                rotate_bilinear(&packed_src, &mut packed, bpp, sw, sh, sw * bpp, dw, dh, dw * bpp, 0.77)
                    .unwrap();
                let mut dst = vec![0xEEu8; dh * ds];
                rotate_bilinear(&src, &mut dst, bpp, sw, sh, ss, dw, dh, ds, 0.77).unwrap();

                for y in 0..dh {
                    assert_eq!(
                        &dst[y * ds..][..dw * bpp],
                        &packed[y * dw * bpp..][..dw * bpp],
                        "bpp={bpp} row={y} tier={perm}"
                    );
                    assert!(
                        dst[y * ds + dw * bpp..(y + 1) * ds].iter().all(|&b| b == 0xEE),
                        "padding written: bpp={bpp} row={y}"
                    );
                }
            }
        });
        std::eprintln!("rotate_bilinear_padded: {report}");
    }

    #[test]
    fn quarter_turn_detection() {
        assert_eq!(quarter_turn(0.0), Some(Rotation::Deg0));
        assert_eq!(quarter_turn(FRAC_PI_2), Some(Rotation::Deg90));
        assert_eq!(quarter_turn(PI), Some(Rotation::Deg180));
        assert_eq!(quarter_turn(-FRAC_PI_2), Some(Rotation::Deg270));
        assert_eq!(quarter_turn(5.0 * FRAC_PI_2), Some(Rotation::Deg90));
        assert_eq!(quarter_turn(FRAC_PI_2 + 1e-6), None);
        assert_eq!(quarter_turn(f64::NAN), None);
    }

    #[test]
    fn bounds() {
        assert_eq!(rotated_bounds(200, 100, 0.0), (200, 100));
        assert_eq!(rotated_bounds(200, 100, PI), (200, 100));
        assert_eq!(rotated_bounds(200, 100, -FRAC_PI_2), (100, 200));
        assert_eq!(rotated_bounds(100, 100, PI / 4.0), (141, 141));
        assert_eq!(rotated_bounds(1, 1, 0.1), (1, 1));
    }

    #[test]
    fn front_door_takes_lossless_path_for_quarter_turns() {
        let src = [10u8, 20, 30, 40];
        let mut dst = [0u8; 4];
        rotate(&src, &mut dst, 1, 2, 2, 2, 2, 2, 2, FRAC_PI_2, &RotateParams::default()).unwrap();
        assert_eq!(dst, [30, 10, 40, 20]);

        // 1-pixel-wide sources only work through the lossless path
        let src = [1u8, 2, 3];
        let mut dst = [0u8; 3];
        rotate(&src, &mut dst, 1, 1, 3, 1, 3, 1, 3, -FRAC_PI_2, &RotateParams::default()).unwrap();
        assert_eq!(dst, [1, 2, 3]);
    }

    #[test]
    fn front_door_resamples_other_angles() {
        let src = make_image(6, 4, 3);
        let mut a = vec![0u8; 7 * 7 * 3];
        let mut b = vec![0u8; 7 * 7 * 3];
        rotate(&src, &mut a, 3, 6, 4, 18, 7, 7, 21, 0.7, &RotateParams::new(RotateFilter::Bilinear))
            .unwrap();
        rotate_bilinear(&src, &mut b, 3, 6, 4, 18, 7, 7, 21, 0.7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_before_writing() {
        let src = [1u8; 16];
        let mut dst = [0xAAu8; 16];
        assert_eq!(
            rotate_bilinear(&src, &mut dst, 1, 4, 4, 4, 4, 4, 4, f64::NAN),
            Err(PixelError::NonFiniteAngle)
        );
        assert_eq!(
            rotate_bilinear(&src, &mut dst, 1, 4, 4, 4, 4, 4, 4, f64::INFINITY),
            Err(PixelError::NonFiniteAngle)
        );
        assert_eq!(
            rotate_bilinear(&src, &mut dst, 1, 1, 4, 4, 4, 4, 4, 0.5),
            Err(PixelError::InvalidDimensions)
        );
        assert_eq!(
            rotate_bilinear(&src, &mut dst, 1, 4, 4, 4, 0, 4, 4, 0.5),
            Err(PixelError::InvalidDimensions)
        );
        assert_eq!(
            rotate_bilinear(&src, &mut dst, 5, 2, 2, 10, 2, 2, 10, 0.5),
            Err(PixelError::UnsupportedChannels(5))
        );
        assert_eq!(
            rotate_bilinear(&src, &mut dst, 1, 4, 4, 3, 4, 4, 4, 0.5),
            Err(PixelError::InvalidStride)
        );
        assert_eq!(
            rotate_bilinear(&src, &mut dst[..15], 1, 4, 4, 4, 4, 4, 4, 0.5),
            Err(PixelError::BufferTooSmall)
        );
        assert!(dst.iter().all(|&b| b == 0xAA));
    }
}
