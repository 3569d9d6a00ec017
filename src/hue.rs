//! Circular hue values and their single-character wire encoding
//!
//! A hue is a position on the color wheel in `[0, 1)`. Wing genes and
//! collected flower hues travel as one printable ASCII character per hue,
//! with a space standing in for "no hue".

use rand::Rng;

/// Sentinel character for a missing hue.
pub const NO_HUE: char = ' ';

/// Sentinel character for a hue above the encodable range.
pub const OVERFLOW_HUE: char = '~';

/// Number of distinct encodable hue symbols.
pub const HUE_STEPS: u32 = 93;

/// Encode a hue into one printable character.
///
/// `None` and negative hues map to the [`NO_HUE`] sentinel, hues above 1
/// to [`OVERFLOW_HUE`]; everything in `[0, 1]` lands in the printable
/// range `'!'..='~'`.
pub fn encode_hue(hue: Option<f32>) -> char {
    match hue {
        None => NO_HUE,
        Some(h) if h < 0.0 => NO_HUE,
        Some(h) if h > 1.0 => OVERFLOW_HUE,
        Some(h) => (((h * HUE_STEPS as f32).floor() as u8) + b'!') as char,
    }
}

/// Decode one character back into a hue.
///
/// The [`NO_HUE`] sentinel decodes to `None`. Any other character maps
/// linearly back to `[0, 1]`, clamped to `[-1, 1]` for out-of-range
/// input. The negative clamp result is deliberate: a below-range symbol
/// decodes to `-1.0` rather than `None`, so only the sentinel itself
/// means "no hue".
pub fn decode_hue(c: char) -> Option<f32> {
    if c == NO_HUE {
        return None;
    }
    let raw = (c as i32 - '!' as i32) as f32 / HUE_STEPS as f32;
    Some(raw.clamp(-1.0, 1.0))
}

/// Draw a uniformly random hue character.
///
/// The range is 32..=126 inclusive, one wider on each side than what
/// [`encode_hue`] can produce, so the sentinel is a (rare) legal draw.
pub fn random_hue(rng: &mut impl Rng) -> char {
    rng.random_range(32u8..=126) as char
}

/// Convert a hue character into an RGB color at the given saturation.
///
/// The sentinel renders as white, matching an unpainted wing patch.
pub fn hue_color(c: char, saturation: f32) -> (u8, u8, u8) {
    match decode_hue(c) {
        None => (255, 255, 255),
        Some(h) => hsv_to_rgb(h, saturation, 1.0),
    }
}

/// Standard HSV to RGB conversion; hue wraps around the color wheel.
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> (u8, u8, u8) {
    let h = hue.rem_euclid(1.0) * 6.0;
    let i = h.floor() as i32 % 6;
    let f = h - h.floor();
    let p = value * (1.0 - saturation);
    let q = value * (1.0 - saturation * f);
    let t = value * (1.0 - saturation * (1.0 - f));
    let (r, g, b) = match i {
        0 => (value, t, p),
        1 => (q, value, p),
        2 => (p, value, t),
        3 => (p, q, value),
        4 => (t, p, value),
        _ => (value, p, q),
    };
    (
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_sentinels_round_trip() {
        assert_eq!(encode_hue(None), ' ');
        assert_eq!(decode_hue(' '), None);
        assert_eq!(encode_hue(Some(-0.25)), ' ');
        assert_eq!(encode_hue(Some(1.5)), '~');
    }

    #[test]
    fn test_round_trip_within_quantization_step() {
        let step = 1.0 / HUE_STEPS as f32;
        for i in 0..1000 {
            let h = i as f32 / 1000.0;
            let decoded = decode_hue(encode_hue(Some(h))).unwrap();
            assert!(
                (decoded - h).abs() <= step,
                "hue {} decoded to {} (off by more than {})",
                h,
                decoded,
                step
            );
        }
    }

    #[test]
    fn test_encode_range_is_printable() {
        for i in 0..=100 {
            let c = encode_hue(Some(i as f32 / 100.0));
            assert!(('!'..='~').contains(&c), "got {:?}", c);
        }
    }

    #[test]
    fn test_decode_out_of_range_is_not_the_sentinel() {
        // Below-range symbols decode to a negative hue, distinct from
        // the "no hue" sentinel; far above-range symbols clamp to 1.0.
        let below = decode_hue('\u{1f}').unwrap();
        assert!(below < 0.0 && below >= -1.0);
        assert_eq!(decode_hue('\u{2500}'), Some(1.0));
    }

    #[test]
    fn test_random_hue_range() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(12345);
        for _ in 0..1000 {
            let c = random_hue(&mut rng);
            let code = c as u32;
            assert!((32..=126).contains(&code), "got {:?}", c);
        }
    }

    #[test]
    fn test_hue_color_sentinel_is_white() {
        assert_eq!(hue_color(' ', 0.9), (255, 255, 255));
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), (255, 0, 0));
        assert_eq!(hsv_to_rgb(1.0 / 3.0, 1.0, 1.0), (0, 255, 0));
        assert_eq!(hsv_to_rgb(2.0 / 3.0, 1.0, 1.0), (0, 0, 255));
    }
}
