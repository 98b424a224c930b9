//! Conversions between RGB and HSV, all channels in `[0, 1]`.
//!
//! Hue is expressed as a fraction of a full turn rather than in degrees.

/// RGB to HSV conversion
#[inline]
pub fn rgb_to_hsv([r, g, b]: [f64; 3]) -> [f64; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta <= 0.0 {
        0.0
    } else if max == b {
        4.0 + (r - g) / delta
    } else if max == g {
        2.0 + (b - r) / delta
    } else {
        (g - b) / delta
    };

    let h = (h / 6.0).rem_euclid(1.0);
    let s = if max > 0.0 { delta / max } else { 0.0 };

    [h, s, max]
}

/// HSV to RGB conversion
#[inline]
pub fn hsv_to_rgb([h, s, v]: [f64; 3]) -> [f64; 3] {
    if s == 0.0 {
        return [v, v, v];
    }

    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match (sector as i64).rem_euclid(6) {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::assert_eq_approx;
    use rstest::rstest;

    #[rstest]
    #[case([1.0, 0.0, 0.0], [0.0, 1.0, 1.0])]
    #[case([0.0, 1.0, 0.0], [1.0 / 3.0, 1.0, 1.0])]
    #[case([0.0, 0.0, 1.0], [2.0 / 3.0, 1.0, 1.0])]
    #[case([1.0, 0.0, 1.0], [5.0 / 6.0, 1.0, 1.0])]
    #[case([0.5, 0.5, 0.5], [0.0, 0.0, 0.5])]
    #[case([0.0, 0.0, 0.0], [0.0, 0.0, 0.0])]
    #[case([0.4, 0.2, 0.1], [1.0 / 18.0, 0.75, 0.4])]
    fn converts_known_colors(#[case] rgb: [f64; 3], #[case] hsv: [f64; 3]) {
        let converted = rgb_to_hsv(rgb);
        for i in 0..3 {
            assert_eq_approx(converted[i], hsv[i], 1e-12);
        }

        let back = hsv_to_rgb(hsv);
        for i in 0..3 {
            assert_eq_approx(back[i], rgb[i], 1e-12);
        }
    }

    #[test]
    fn hue_of_one_wraps_to_red() {
        let rgb = hsv_to_rgb([1.0, 1.0, 1.0]);
        assert_eq!(rgb, [1.0, 0.0, 0.0]);
    }
}
