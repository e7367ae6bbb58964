//! RGB ↔ HSV conversion.
//!
//! Hue is in degrees `[0, 360)`, saturation and value in `[0, 1]`. Both
//! functions are pure; [`hsv_to_rgb`] assumes the hue is already normalized.

/// Converts an RGB color to `(hue, saturation, value)`.
///
/// Achromatic inputs (`max == min`) report hue 0; black reports saturation 0.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let rf = r as f64 / 255.0;
    let gf = g as f64 / 255.0;
    let bf = b as f64 / 255.0;

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);

    let v = max;
    let s = if max == 0.0 { 0.0 } else { (max - min) / max };

    let mut h = if max == min {
        0.0
    } else if max == rf {
        60.0 * ((gf - bf) / (max - min))
    } else if max == gf {
        60.0 * (2.0 + (bf - rf) / (max - min))
    } else {
        60.0 * (4.0 + (rf - gf) / (max - min))
    };
    if h < 0.0 {
        h += 360.0;
    }

    (h, s, v)
}

/// Converts `(hue, saturation, value)` back to RGB.
///
/// Channel values are truncated, not rounded, so a round trip through
/// [`rgb_to_hsv`] may be off by one unit per channel.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (u8, u8, u8) {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (rf, gf, bf) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (
        ((rf + m) * 255.0) as u8,
        ((gf + m) * 255.0) as u8,
        ((bf + m) * 255.0) as u8,
    )
}
