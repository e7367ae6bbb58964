//! Replacement color strategies.
//!
//! [`drastic_change`] swaps the target for a fixed high-contrast reference
//! color; [`shade_adjust`] perturbs it in HSV space. The rewriter flips a
//! coin between the two.

use rand::Rng;

use super::hsv::{hsv_to_rgb, rgb_to_hsv};
use super::{Color, GRAY_SATURATION_CUTOFF, PALETTE_TOLERANCE, colors_similar};

/// The fixed, ordered palette of high-contrast reference colors used by
/// [`drastic_change`].
///
/// The order is part of the behavior: the first entry dissimilar to the
/// input wins, so reordering changes which replacement an input maps to.
pub const CONTRAST_PALETTE: [Color; 12] = [
    Color { r: 255, g: 0, b: 0, a: 255 },     // red
    Color { r: 0, g: 255, b: 0, a: 255 },     // green
    Color { r: 0, g: 0, b: 255, a: 255 },     // blue
    Color { r: 255, g: 255, b: 0, a: 255 },   // yellow
    Color { r: 255, g: 0, b: 255, a: 255 },   // magenta
    Color { r: 0, g: 255, b: 255, a: 255 },   // cyan
    Color { r: 255, g: 165, b: 0, a: 255 },   // orange
    Color { r: 128, g: 0, b: 128, a: 255 },   // purple
    Color { r: 255, g: 192, b: 203, a: 255 }, // pink
    Color { r: 0, g: 128, b: 0, a: 255 },     // dark green
    Color { r: 139, g: 69, b: 19, a: 255 },   // brown
    Color { r: 255, g: 20, b: 147, a: 255 },  // deep pink
];

/// Picks the first [`CONTRAST_PALETTE`] entry that is not within tolerance
/// 100 of `color`, preserving the input's alpha.
///
/// If every entry is similar, the channel-wise inverse
/// `(255-r, 255-g, 255-b)` is returned instead. No 8-bit color is actually
/// within 100 of both red and green, so the inverse is a belt-and-braces
/// fallback rather than a reachable path.
pub fn drastic_change(color: Color) -> Color {
    for candidate in CONTRAST_PALETTE {
        if !colors_similar(color, candidate, PALETTE_TOLERANCE) {
            return Color::new(candidate.r, candidate.g, candidate.b, color.a);
        }
    }

    Color::new(255 - color.r, 255 - color.g, 255 - color.b, color.a)
}

/// Produces a randomized shade of `color` by perturbing it in HSV space,
/// preserving the input's alpha.
///
/// Near-gray inputs (saturation below 0.1) are first given a random hue and
/// a saturation in `[0.4, 0.8)`, so grays become visibly colorful instead of
/// receiving an imperceptible tweak. One coin then picks between a
/// brightness move (big darken, or big lighten plus desaturate) and a
/// saturation move (desaturate, or a value/saturation boost depending on
/// where the color already sits).
///
/// Every draw is taken independently from `rng`; two calls on the same input
/// will usually differ.
pub fn shade_adjust<R: Rng>(color: Color, rng: &mut R) -> Color {
    let (mut h, mut s, mut v) = rgb_to_hsv(color.r, color.g, color.b);

    if s < GRAY_SATURATION_CUTOFF {
        s = rng.random_range(0.4..0.8);
        h = rng.random_range(0..360) as f64;
    }

    let adjust_brightness = rng.random::<f64>() < 0.5;
    if adjust_brightness {
        if rng.random::<f64>() < 0.5 {
            // Big darken.
            v *= rng.random_range(0.05..0.20);
        } else {
            // Big lighten, washed out.
            v = (v + 0.4).min(1.0);
            s *= 0.5;
        }
    } else if rng.random::<f64>() < 0.5 {
        s = rng.random_range(0.05..0.5);
    } else if v >= 0.8 {
        v *= rng.random_range(0.2..0.5);
    } else if s >= 0.7 {
        v = (v + 0.5).min(1.0);
    } else {
        s = (s * rng.random_range(1.8..2.5)).min(1.0);
    }

    let (r, g, b) = hsv_to_rgb(h, s, v);
    Color::new(r, g, b, color.a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    /// Replays a fixed sequence of `u64` draws. A draw of 0 maps to the low
    /// end of a float range (and a heads coin); `u64::MAX` maps to just
    /// under the high end (a tails coin).
    struct ScriptRng {
        draws: Vec<u64>,
        next: usize,
    }

    impl ScriptRng {
        fn new(draws: &[u64]) -> ScriptRng {
            ScriptRng {
                draws: draws.to_vec(),
                next: 0,
            }
        }
    }

    impl RngCore for ScriptRng {
        fn next_u32(&mut self) -> u32 {
            self.next_u64() as u32
        }

        fn next_u64(&mut self) -> u64 {
            let value = self.draws[self.next];
            self.next += 1;
            value
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(8) {
                let bytes = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }
    }

    const HEADS: u64 = 0;
    const TAILS: u64 = u64::MAX;

    fn inverse(c: Color) -> Color {
        Color::new(255 - c.r, 255 - c.g, 255 - c.b, c.a)
    }

    #[test]
    fn drastic_picks_first_dissimilar_palette_entry() {
        // Red is similar to the first entry (itself), so green wins.
        let red = Color::new(255, 0, 0, 255);
        assert_eq!(drastic_change(red), Color::new(0, 255, 0, 255));

        // White fails against red immediately.
        let white = Color::new(255, 255, 255, 255);
        assert_eq!(drastic_change(white), Color::new(255, 0, 0, 255));

        // A dull red is still within tolerance of red itself, so the walk
        // continues to green.
        let dull_red = Color::new(200, 60, 60, 255);
        assert_eq!(drastic_change(dull_red), Color::new(0, 255, 0, 255));
    }

    #[test]
    fn drastic_preserves_alpha() {
        let translucent = Color::new(10, 10, 10, 180);
        assert_eq!(drastic_change(translucent).a, 180);
    }

    #[test]
    fn drastic_never_returns_a_similar_color() {
        // Contract over a coarse grid of the whole color cube: the result is
        // either dissimilar under tolerance 100 or the documented inverse.
        for r in (0..=255u8).step_by(17) {
            for g in (0..=255u8).step_by(17) {
                for b in (0..=255u8).step_by(17) {
                    let input = Color::new(r, g, b, 255);
                    let result = drastic_change(input);
                    assert!(
                        !colors_similar(result, input, 100) || result == inverse(input),
                        "drastic_change({input:?}) returned similar {result:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn shade_darken_branch_crushes_value() {
        // heads, heads: brightness move, darken sub-branch; the scripted
        // range draw lands at the low end (factor near 0.05).
        let mut rng = ScriptRng::new(&[HEADS, HEADS, 0]);
        let out = shade_adjust(Color::new(200, 100, 50, 255), &mut rng);
        assert!(
            out.r <= 15 && out.g <= 15 && out.b <= 15,
            "expected a crushed shade, got {out:?}"
        );
        assert_eq!(out.a, 255);
    }

    #[test]
    fn shade_lighten_branch_raises_value_and_halves_saturation() {
        // heads, tails: brightness move, lighten sub-branch. v goes from
        // ~0.78 to 1.0 and saturation halves from 0.75 to 0.375.
        let mut rng = ScriptRng::new(&[HEADS, TAILS]);
        let out = shade_adjust(Color::new(200, 100, 50, 255), &mut rng);
        assert!(out.r >= 254, "got {out:?}");
        assert!(out.g.abs_diff(191) <= 1, "got {out:?}");
        assert!(out.b.abs_diff(159) <= 1, "got {out:?}");
    }

    #[test]
    fn shade_desaturate_branch_washes_out() {
        // tails, heads: saturation move, desaturate sub-branch near 0.05.
        let mut rng = ScriptRng::new(&[TAILS, HEADS, 0]);
        let out = shade_adjust(Color::new(200, 100, 50, 255), &mut rng);
        assert!(out.r >= 195, "value should be untouched, got {out:?}");
        assert!(out.r - out.b <= 15, "should be nearly gray, got {out:?}");
    }

    #[test]
    fn shade_saturated_midtone_gets_value_boost() {
        // tails, tails with v < 0.8 and s >= 0.7: value is raised by 0.5
        // and capped at 1, saturation untouched.
        let mut rng = ScriptRng::new(&[TAILS, TAILS]);
        let out = shade_adjust(Color::new(200, 100, 50, 255), &mut rng);
        assert!(out.r >= 254, "got {out:?}");
        assert!(out.g.abs_diff(127) <= 1, "got {out:?}");
        assert!(out.b.abs_diff(63) <= 1, "got {out:?}");
    }

    #[test]
    fn shade_bright_input_gets_value_cut() {
        // tails, tails with v >= 0.8: value is scaled down into [0.2, 0.5).
        let mut rng = ScriptRng::new(&[TAILS, TAILS, 0]);
        let out = shade_adjust(Color::new(230, 100, 50, 255), &mut rng);
        assert!(
            out.r <= 55 && out.g <= 55 && out.b <= 55,
            "expected a dark shade, got {out:?}"
        );
    }

    #[test]
    fn shade_always_recolors_gray() {
        // Near-gray inputs are forced to a random hue and saturation first,
        // so no branch can leave them unchanged.
        let gray = Color::new(128, 128, 128, 255);
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = shade_adjust(gray, &mut rng);
            assert_ne!(
                (out.r, out.g, out.b),
                (gray.r, gray.g, gray.b),
                "seed {seed} left gray untouched"
            );
            assert_eq!(out.a, 255);
        }
    }

    #[test]
    fn shade_preserves_alpha() {
        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = shade_adjust(Color::new(60, 90, 200, 140), &mut rng);
            assert_eq!(out.a, 140);
        }
    }
}
