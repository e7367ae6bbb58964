//! The pixel rewrite pass: target selection, mode choice, and the sweep
//! that swaps matching pixels for the replacement color.

use log::{debug, warn};
use rand::Rng;
use rand::seq::IndexedRandom;

use super::extract::{self, DominantColor};
use super::mutate::{drastic_change, shade_adjust};
use super::{
    Color, MAX_TARGET_BRIGHTNESS, MIN_TARGET_BRIGHTNESS, PixelSource, Pixmap,
    QUANTIZED_MATCH_TOLERANCE, RAW_MATCH_TOLERANCE, colors_similar,
};

/// Which replacement strategy a mutation used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationMode {
    /// Swap for a fixed high-contrast palette color.
    Drastic,
    /// Perturb the target in HSV space.
    ShadeAdjust,
}

/// The decision a mutation acted on: which dominant color was targeted,
/// what it was rewritten to, and by which strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationPlan {
    /// The dominant color whose pixels were rewritten.
    pub target: DominantColor,
    /// The color matching pixels were rewritten to (alpha is taken from
    /// each original pixel, not from this value).
    pub replacement: Color,
    /// The strategy that produced `replacement`.
    pub mode: MutationMode,
}

/// The outcome of [`mutate`](crate::mutate): the rewritten image plus
/// observability data.
///
/// `modified_pixels == 0` is a valid, if degenerate, outcome — the chosen
/// target and tolerances simply matched nothing.
#[derive(Debug, Clone)]
pub struct Mutation {
    /// The output image; always the same bounds as the input.
    pub image: Pixmap,
    /// What was changed. `None` on the identity path (`correct == true`)
    /// and when no dominant color could be extracted.
    pub plan: Option<MutationPlan>,
    /// How many pixels were rewritten.
    pub modified_pixels: usize,
    /// Total pixels in the image, transparent ones included.
    pub total_pixels: usize,
}

fn unchanged<S: PixelSource>(image: &S, total_pixels: usize) -> Mutation {
    Mutation {
        image: Pixmap::from_source(image),
        plan: None,
        modified_pixels: 0,
        total_pixels,
    }
}

fn mean_brightness(color: Color) -> u16 {
    (color.r as u16 + color.g as u16 + color.b as u16) / 3
}

pub(crate) fn run<S: PixelSource, R: Rng>(image: &S, correct: bool, rng: &mut R) -> Mutation {
    let bounds = image.bounds();
    let total_pixels = bounds.area();

    if correct {
        return unchanged(image, total_pixels);
    }

    let dominant = extract::dominant_colors(image);
    if dominant.is_empty() {
        warn!("no dominant colors found; returning the image unchanged");
        return unchanged(image, total_pixels);
    }
    debug!("found {} dominant colors", dominant.len());

    // Near-black and near-white targets mutate poorly; prefer the midtones.
    let suitable: Vec<DominantColor> = dominant
        .iter()
        .copied()
        .filter(|d| {
            let brightness = mean_brightness(d.color);
            brightness > MIN_TARGET_BRIGHTNESS && brightness < MAX_TARGET_BRIGHTNESS
        })
        .collect();

    let target = match suitable.choose(rng) {
        Some(&color) => color,
        None => {
            debug!("no mid-brightness color available; using the most prominent one");
            dominant[0]
        }
    };

    let mode = if rng.random::<f64>() < 0.5 {
        MutationMode::Drastic
    } else {
        MutationMode::ShadeAdjust
    };
    let replacement = match mode {
        MutationMode::Drastic => drastic_change(target.color),
        MutationMode::ShadeAdjust => shade_adjust(target.color, rng),
    };
    debug!(
        "rewriting {:?} (count {}) to {:?} via {:?}",
        target.color, target.count, replacement, mode
    );

    let mut output = Pixmap::new(bounds);
    let mut modified_pixels = 0usize;

    for y in bounds.min_y..bounds.max_y {
        for x in bounds.min_x..bounds.max_x {
            let px = image.pixel(x, y);

            // A pixel belongs to the target's color family if its bucket is
            // close to the (already quantized) target, or its raw value is
            // within the wider raw tolerance.
            let is_match = colors_similar(extract::quantize(px), target.color, QUANTIZED_MATCH_TOLERANCE)
                || colors_similar(px, target.color, RAW_MATCH_TOLERANCE);

            if is_match {
                output.set(x, y, Color::new(replacement.r, replacement.g, replacement.b, px.a));
                modified_pixels += 1;
            } else {
                output.set(x, y, px);
            }
        }
    }

    debug!("modified {modified_pixels} of {total_pixels} pixels");
    if modified_pixels == 0 {
        warn!("mutation matched no pixels; output equals input");
    }

    Mutation {
        image: output,
        plan: Some(MutationPlan {
            target,
            replacement,
            mode,
        }),
        modified_pixels,
        total_pixels,
    }
}
