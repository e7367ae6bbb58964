//! *flag-forger* mutates one dominant color of a decoded raster image,
//! producing a visually altered but still plausible variant. It was built to
//! generate the "incorrect" choice in a spot-the-fake flag quiz, but works on
//! any image with a few large flat color regions.
//!
//! The pipeline: quantize and histogram the opaque pixels into a ranked list
//! of dominant colors, pick one mid-brightness color as the mutation target,
//! then rewrite every pixel matching that color with either a high-contrast
//! palette swap or a randomized HSV shade adjustment.
//!
//! The engine never touches image files or encodings. Feed it anything that
//! implements [`PixelSource`] (with the `image` feature, `image::RgbaImage`
//! does) and it hands back an independently owned [`Pixmap`] of identical
//! bounds.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extract;
mod hsv;
mod mutate;
mod pixmap;
mod rewrite;

use rand::Rng;

pub use rgb::RGBA8 as Color;

pub use extract::{DominantColor, dominant_colors};
pub use hsv::{hsv_to_rgb, rgb_to_hsv};
pub use mutate::{CONTRAST_PALETTE, drastic_change, shade_adjust};
pub use pixmap::{Bounds, PixelSource, Pixmap, PixmapError};
pub use rewrite::{Mutation, MutationMode, MutationPlan};

const QUANT_STEP: u8 = 16;
const OPAQUE_ALPHA_MIN: u8 = 128;
const DENSITY_DIVISOR: usize = 200;
const COUNT_FLOOR: usize = 10;
const PALETTE_TOLERANCE: u8 = 100;
const QUANTIZED_MATCH_TOLERANCE: u8 = 32;
const RAW_MATCH_TOLERANCE: u8 = 100;
const MIN_TARGET_BRIGHTNESS: u16 = 20;
const MAX_TARGET_BRIGHTNESS: u16 = 240;
const GRAY_SATURATION_CUTOFF: f64 = 0.1;

/// Returns `true` if every RGB channel of `c1` is within `tolerance` of the
/// corresponding channel of `c2`. Alpha is ignored.
///
/// Different callers use different tolerances: 100 when steering the drastic
/// palette away from the original color, 32/100 for the quantized/raw match
/// during the rewrite pass.
pub fn colors_similar(c1: Color, c2: Color, tolerance: u8) -> bool {
    c1.r.abs_diff(c2.r) <= tolerance
        && c1.g.abs_diff(c2.g) <= tolerance
        && c1.b.abs_diff(c2.b) <= tolerance
}

/// Returns a mutated copy of `image`.
///
/// With `correct == true` the copy is pixel-for-pixel identical to the input
/// (the genuine display path). Otherwise one dominant color is selected and
/// rewritten; see [`Mutation`] for what was changed. Randomness comes from
/// the thread-local generator; use [`mutate_with_rng`] to control it.
///
/// This never fails: an image with no extractable dominant color (all
/// transparent, zero-area, or too noisy) comes back unchanged.
pub fn mutate<S: PixelSource>(image: &S, correct: bool) -> Mutation {
    rewrite::run(image, correct, &mut rand::rng())
}

/// Like [`mutate`], but draws all randomness (target selection, mode coin,
/// shade parameters) from the supplied generator. Seed it for reproducible
/// output, or script it in tests to force a specific branch.
pub fn mutate_with_rng<S: PixelSource, R: Rng>(image: &S, correct: bool, rng: &mut R) -> Mutation {
    rewrite::run(image, correct, rng)
}
