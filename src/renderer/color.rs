/// Depth at which the hue wheel starts (red).
const DEPTH_OFFSET: f64 = 30.0;
/// Depth range covered by one full turn of the hue wheel.
const DEPTH_SPAN: f64 = 60.0;

/// Map the Lorenz z coordinate to a hue. Not clamped: z outside
/// [-30, 30) yields a hue outside [0, 1) that wraps in `hsb_to_rgba`.
pub fn depth_hue(z: f64) -> f32 {
    ((z + DEPTH_OFFSET) / DEPTH_SPAN) as f32
}

/// Fully saturated, full brightness color for depth `z`.
pub fn depth_color(z: f64) -> [u8; 4] {
    hsb_to_rgba(depth_hue(z), 1.0, 1.0)
}

/// Convert hue/saturation/brightness to RGBA.
/// Only the fractional part of `hue` is used, so 1.25 and -0.75 both read as 0.25.
pub fn hsb_to_rgba(hue: f32, saturation: f32, brightness: f32) -> [u8; 4] {
    let to_u8 = |v: f32| (v * 255.0 + 0.5) as u8;

    if saturation == 0.0 {
        let v = to_u8(brightness);
        return [v, v, v, 255];
    }

    let h = (hue - hue.floor()) * 6.0;
    let f = h - h.floor();
    let p = brightness * (1.0 - saturation);
    let q = brightness * (1.0 - saturation * f);
    let t = brightness * (1.0 - saturation * (1.0 - f));

    // A tiny negative hue wraps to 1.0 - eps, which rounds to 1.0 in f32 and
    // gives h == 6.0. The classic six-case conversion has no arm for 6 and
    // leaves the pixel black; here it falls through to red, the color the
    // wheel returns to after a full turn.
    let (r, g, b) = match h as usize {
        1 => (q, brightness, p),
        2 => (p, brightness, t),
        3 => (p, q, brightness),
        4 => (t, p, brightness),
        5 => (brightness, p, q),
        _ => (brightness, t, p),
    };

    [to_u8(r), to_u8(g), to_u8(b), 255]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_hues() {
        assert_eq!(hsb_to_rgba(0.0, 1.0, 1.0), [255, 0, 0, 255]);
        assert_eq!(hsb_to_rgba(1.0 / 3.0, 1.0, 1.0), [0, 255, 0, 255]);
        assert_eq!(hsb_to_rgba(2.0 / 3.0, 1.0, 1.0), [0, 0, 255, 255]);
    }

    #[test]
    fn test_secondary_hues() {
        assert_eq!(hsb_to_rgba(1.0 / 6.0, 1.0, 1.0), [255, 255, 0, 255]);
        assert_eq!(hsb_to_rgba(0.5, 1.0, 1.0), [0, 255, 255, 255]);
        assert_eq!(hsb_to_rgba(5.0 / 6.0, 1.0, 1.0), [255, 0, 255, 255]);
    }

    #[test]
    fn test_zero_saturation_is_gray() {
        assert_eq!(hsb_to_rgba(0.3, 0.0, 1.0), [255, 255, 255, 255]);
        assert_eq!(hsb_to_rgba(0.3, 0.0, 0.5), [128, 128, 128, 255]);
        assert_eq!(hsb_to_rgba(0.3, 0.0, 0.0), [0, 0, 0, 255]);
    }

    #[test]
    fn test_hue_wraps_above_one() {
        assert_eq!(hsb_to_rgba(1.25, 1.0, 1.0), hsb_to_rgba(0.25, 1.0, 1.0));
        assert_eq!(hsb_to_rgba(2.5, 1.0, 1.0), hsb_to_rgba(0.5, 1.0, 1.0));
    }

    #[test]
    fn test_hue_wraps_below_zero() {
        assert_eq!(hsb_to_rgba(-0.75, 1.0, 1.0), hsb_to_rgba(0.25, 1.0, 1.0));
        assert_eq!(hsb_to_rgba(-0.5, 1.0, 1.0), hsb_to_rgba(0.5, 1.0, 1.0));
    }

    #[test]
    fn test_hue_just_below_one_is_red() {
        let c = hsb_to_rgba(0.99999999, 1.0, 1.0);
        assert_eq!(c[0], 255);
        assert_eq!(c[2], 0);
    }

    #[test]
    fn test_sector_six_is_red_not_black() {
        let hue = -1e-9_f32;
        assert_eq!((hue - hue.floor()) * 6.0, 6.0);
        assert_eq!(hsb_to_rgba(hue, 1.0, 1.0), [255, 0, 0, 255]);
        // Depth a hair below the bottom of the wheel takes the same path.
        assert_eq!(depth_color(-30.0000001), [255, 0, 0, 255]);
    }

    #[test]
    fn test_depth_hue() {
        assert_eq!(depth_hue(-30.0), 0.0);
        assert_eq!(depth_hue(0.0), 0.5);
        assert_eq!(depth_hue(30.0), 1.0);
        assert_eq!(depth_hue(60.0), 1.5);
    }

    #[test]
    fn test_depth_color_midpoint_is_cyan() {
        assert_eq!(depth_color(0.0), [0, 255, 255, 255]);
        assert_eq!(depth_color(-30.0), [255, 0, 0, 255]);
    }

    #[test]
    fn test_depth_color_wraps_instead_of_clamping() {
        // z = 45 -> hue 1.25, which wraps to 0.25 (yellow-green), not clamped to red.
        assert_eq!(depth_color(45.0), depth_color(-15.0));
        assert_ne!(depth_color(45.0), depth_color(30.0));
        assert_eq!(depth_color(30.0), [255, 0, 0, 255]);
    }

    #[test]
    fn test_alpha_always_opaque() {
        for i in -100..=100 {
            assert_eq!(depth_color(i as f64)[3], 255);
        }
    }

    #[test]
    fn test_gradient_continuity() {
        let steps = 600;
        for i in 1..steps {
            let h0 = (i - 1) as f32 / steps as f32;
            let h1 = i as f32 / steps as f32;
            let c0 = hsb_to_rgba(h0, 1.0, 1.0);
            let c1 = hsb_to_rgba(h1, 1.0, 1.0);
            for ch in 0..3 {
                let diff = (c1[ch] as i32 - c0[ch] as i32).abs();
                assert!(
                    diff <= 3,
                    "Color channel {} jumped by {} between h={} and h={}",
                    ch, diff, h0, h1
                );
            }
        }
    }
}
