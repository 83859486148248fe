// ---------------------------------------------------------------------------
// Alpha compositing over 4-channel buffers: premultiply and matte.
//
// The channel order is a runtime value carrying byte offsets, so one kernel
// serves RGBA, BGRA, ARGB and ABGR.
// ---------------------------------------------------------------------------

use archmage::incant;
use archmage::prelude::*;

use crate::PixelError;
use crate::layout::{check_strided, row_mut};

/// Byte order of a 4-channel pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChannelOrder {
    #[default]
    Rgba,
    Bgra,
    Argb,
    Abgr,
}

impl ChannelOrder {
    /// Byte offsets of `[r, g, b, a]` within a pixel.
    pub const fn offsets(self) -> [usize; 4] {
        match self {
            Self::Rgba => [0, 1, 2, 3],
            Self::Bgra => [2, 1, 0, 3],
            Self::Argb => [1, 2, 3, 0],
            Self::Abgr => [3, 2, 1, 0],
        }
    }

    /// Byte offset of the alpha channel.
    pub const fn alpha(self) -> usize {
        self.offsets()[3]
    }
}

/// `a · b / 255`, rounded to nearest.
#[inline(always)]
pub const fn byte_mul(a: u8, b: u8) -> u8 {
    ((a as u32 * b as u32 + 127) / 255) as u8
}

#[derive(Clone, Copy, Debug)]
enum Blend {
    Premultiply,
    /// Matte color already placed at the pixel's byte offsets, alpha slot unused.
    Matte { color: [u8; 4], premultiplied: bool },
}

#[inline(always)]
fn blend_rows(op: Blend, order: ChannelOrder, buf: &mut [u8], w: usize, h: usize, stride: usize) {
    let ai = order.alpha();
    for y in 0..h {
        let (px, _) = row_mut(buf, y, stride, w * 4).as_chunks_mut::<4>();
        for p in px {
            let a = p[ai];
            match op {
                Blend::Premultiply => {
                    for (i, c) in p.iter_mut().enumerate() {
                        if i != ai {
                            *c = byte_mul(*c, a);
                        }
                    }
                }
                Blend::Matte { color, premultiplied } => {
                    let inv = 255 - a;
                    for (i, c) in p.iter_mut().enumerate() {
                        if i == ai {
                            *c = 255;
                        } else {
                            let fg = if premultiplied { *c } else { byte_mul(*c, a) };
                            *c = fg.saturating_add(byte_mul(color[i], inv));
                        }
                    }
                }
            }
        }
    }
}

// ===========================================================================
// Per-tier wrappers (dispatch targets for incant!)
// ===========================================================================

fn blend_impl_scalar(_t: ScalarToken, op: Blend, o: ChannelOrder, b: &mut [u8], w: usize, h: usize, st: usize) {
    blend_rows(op, o, b, w, h, st);
}

#[cfg(target_arch = "x86_64")]
#[arcane]
fn blend_impl_v3(_t: X64V3Token, op: Blend, o: ChannelOrder, b: &mut [u8], w: usize, h: usize, st: usize) {
    blend_rows(op, o, b, w, h, st);
}

#[cfg(target_arch = "aarch64")]
#[arcane]
fn blend_impl_arm_v2(_t: Arm64V2Token, op: Blend, o: ChannelOrder, b: &mut [u8], w: usize, h: usize, st: usize) {
    blend_rows(op, o, b, w, h, st);
}

#[cfg(target_arch = "wasm32")]
#[arcane]
fn blend_impl_wasm128(_t: Wasm128Token, op: Blend, o: ChannelOrder, b: &mut [u8], w: usize, h: usize, st: usize) {
    blend_rows(op, o, b, w, h, st);
}

// ===========================================================================
// Public API
// ===========================================================================

/// Multiply every color channel of a strided 4-channel image by its alpha.
///
/// Alpha itself is unchanged. Running this on an already premultiplied
/// image darkens it again; callers track which state their buffer is in.
pub fn premultiply(
    buf: &mut [u8],
    width: usize,
    height: usize,
    stride: usize,
    order: ChannelOrder,
) -> Result<(), PixelError> {
    trace_op!(width, height, order = ?order, "premultiply");
    check_strided(buf.len(), width, height, stride, 4).map_err(|e| crate::rejected("premultiply", e))?;
    incant!(
        blend_impl(Blend::Premultiply, order, buf, width, height, stride),
        [v3, arm_v2, wasm128, scalar]
    );
    Ok(())
}

/// Composite a strided 4-channel image over an opaque `[r, g, b]` matte.
///
/// Transparent regions take the matte color and every pixel ends up with
/// alpha 255, not `byte_mul(r, 255 - a) + a`: the matte is opaque, so the
/// result is too. Set `premultiplied` when the color channels already carry
/// their alpha.
///
/// ```
/// use twirl::{matte, ChannelOrder};
///
/// // one fully transparent and one opaque BGRA pixel over white
/// let mut px = [0u8, 0, 0, 0, 10, 20, 30, 255];
/// matte(&mut px, 2, 1, 8, ChannelOrder::Bgra, false, [255, 255, 255]).unwrap();
/// assert_eq!(px, [255, 255, 255, 255, 10, 20, 30, 255]);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn matte(
    buf: &mut [u8],
    width: usize,
    height: usize,
    stride: usize,
    order: ChannelOrder,
    premultiplied: bool,
    rgb: [u8; 3],
) -> Result<(), PixelError> {
    trace_op!(width, height, order = ?order, premultiplied, "matte");
    check_strided(buf.len(), width, height, stride, 4).map_err(|e| crate::rejected("matte", e))?;
    let [ri, gi, bi, _] = order.offsets();
    let mut color = [0u8; 4];
    color[ri] = rgb[0];
    color[gi] = rgb[1];
    color[bi] = rgb[2];
    incant!(
        blend_impl(Blend::Matte { color, premultiplied }, order, buf, width, height, stride),
        [v3, arm_v2, wasm128, scalar]
    );
    Ok(())
}
