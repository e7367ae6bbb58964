//! Dominant color extraction.
//!
//! Opaque pixels are quantized into 16-wide buckets per channel to collapse
//! anti-aliasing noise, histogrammed, and filtered by a density threshold so
//! that only colors covering a meaningful share of the image survive.

use std::cmp;
use std::collections::BTreeMap;

use super::{COUNT_FLOOR, Color, DENSITY_DIVISOR, OPAQUE_ALPHA_MIN, PixelSource, QUANT_STEP};

/// A quantized color together with the number of opaque pixels that mapped
/// to its bucket. Always fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DominantColor {
    /// The bucket's representative color, promoted to alpha 255.
    pub color: Color,
    /// Opaque pixels that quantized to this bucket.
    pub count: usize,
}

pub(crate) fn quantize_channel(c: u8) -> u8 {
    (c / QUANT_STEP) * QUANT_STEP
}

/// Quantizes a pixel to its bucket's representative color, dropping alpha.
pub(crate) fn quantize(color: Color) -> Color {
    Color::new(
        quantize_channel(color.r),
        quantize_channel(color.g),
        quantize_channel(color.b),
        255,
    )
}

/// Extracts the dominant colors of `image`, most prominent first.
///
/// Pixels with alpha below 128 are treated as transparent and not counted.
/// A bucket qualifies when its count strictly exceeds
/// `max(opaque_pixels / 200, 10)`, i.e. roughly 0.5% of the opaque area with
/// a floor of 10 pixels. The result is empty when nothing qualifies; callers
/// must handle that (the rewriter falls back to returning the input
/// unchanged).
///
/// Ties are broken by bucket key order, so the ranking is deterministic for
/// a given image.
pub fn dominant_colors<S: PixelSource>(image: &S) -> Vec<DominantColor> {
    let bounds = image.bounds();
    let mut histogram: BTreeMap<[u8; 3], usize> = BTreeMap::new();
    let mut opaque_pixels = 0usize;

    for y in bounds.min_y..bounds.max_y {
        for x in bounds.min_x..bounds.max_x {
            let px = image.pixel(x, y);
            if px.a < OPAQUE_ALPHA_MIN {
                continue;
            }
            opaque_pixels += 1;
            let key = [
                quantize_channel(px.r),
                quantize_channel(px.g),
                quantize_channel(px.b),
            ];
            *histogram.entry(key).or_insert(0) += 1;
        }
    }

    let threshold = cmp::max(opaque_pixels / DENSITY_DIVISOR, COUNT_FLOOR);

    let mut colors: Vec<DominantColor> = histogram
        .into_iter()
        .filter(|&(_, count)| count > threshold)
        .map(|([r, g, b], count)| DominantColor {
            color: Color::new(r, g, b, 255),
            count,
        })
        .collect();

    // Stable sort keeps the BTreeMap key order for equal counts.
    colors.sort_by(|a, b| b.count.cmp(&a.count));
    colors
}
