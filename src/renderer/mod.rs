mod color;
mod font;

// Re-export public API
pub use color::depth_color;
pub use font::render_status;
pub(crate) use font::STATUS_BAR_HEIGHT;

use crate::state::{ScreenPoint, Simulation};

/// Display background.
pub const BACKGROUND: [u8; 4] = [0, 0, 0, 255];
/// Default trail dot size in pixels.
pub const DOT_DIAMETER: u32 = 3;

/// Frame layout: the drawing surface on top, status bar below.
pub struct RenderConfig {
    pub display_width: usize,
    pub display_height: usize,
    pub frame_width: usize,
    pub frame_height: usize,
    /// Bounding-box size of each trail dot.
    pub dot_diameter: u32,
}

impl RenderConfig {
    /// Layout for a drawing surface of exactly `width` x `height` pixels.
    pub fn for_display(width: usize, height: usize) -> Self {
        let display_width = width.max(1);
        let display_height = height.max(1);
        Self {
            display_width,
            display_height,
            frame_width: display_width,
            frame_height: display_height + STATUS_BAR_HEIGHT,
            dot_diameter: DOT_DIAMETER,
        }
    }

    /// Layout to fit a window of the given pixel size. The status bar is
    /// carved out of the bottom; the rest is the drawing surface.
    pub fn fit(pixel_width: usize, pixel_height: usize) -> Self {
        Self::for_display(pixel_width, pixel_height.saturating_sub(STATUS_BAR_HEIGHT))
    }

    pub fn with_dot_diameter(mut self, diameter: u32) -> Self {
        self.dot_diameter = diameter.max(1);
        self
    }

    pub fn buffer_len(&self) -> usize {
        self.frame_width * self.frame_height * 4
    }
}

/// Source-over blend of `color` into the pixel at `off` with coverage `alpha`.
fn over_blend(buf: &mut [u8], off: usize, color: [u8; 4], alpha: f64) {
    for c in 0..3 {
        let dst = buf[off + c] as f64;
        let src = color[c] as f64;
        buf[off + c] = (dst + (src - dst) * alpha).round() as u8;
    }
    buf[off + 3] = 255;
}

/// Fill a disc whose bounding box is `diameter` square with its top-left
/// corner at `top_left`. Edge pixels are blended by coverage; anything
/// outside the display area is skipped.
fn draw_disc(buf: &mut [u8], cfg: &RenderConfig, top_left: ScreenPoint, diameter: u32, color: [u8; 4]) {
    let r = diameter as f64 * 0.5;
    let cx = top_left.x as f64 + r;
    let cy = top_left.y as f64 + r;

    for dy in 0..diameter as i64 {
        let py = top_left.y as i64 + dy;
        if py < 0 || py >= cfg.display_height as i64 {
            continue;
        }
        for dx in 0..diameter as i64 {
            let px = top_left.x as i64 + dx;
            if px < 0 || px >= cfg.display_width as i64 {
                continue;
            }
            let ddx = px as f64 + 0.5 - cx;
            let ddy = py as f64 + 0.5 - cy;
            let dist = (ddx * ddx + ddy * ddy).sqrt();
            let coverage = (r + 0.5 - dist).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                continue;
            }
            let off = (py as usize * cfg.frame_width + px as usize) * 4;
            over_blend(buf, off, color, coverage);
        }
    }
}

/// Draw the whole trail into `buf` (RGBA, `cfg.frame_width` stride).
/// The display area is cleared first; points are painted oldest to newest,
/// so newer points cover older ones.
pub fn render_into(buf: &mut Vec<u8>, sim: &Simulation, cfg: &RenderConfig) {
    buf.resize(cfg.buffer_len(), 0);

    for y in 0..cfg.display_height {
        let row = y * cfg.frame_width * 4;
        for x in 0..cfg.display_width {
            let off = row + x * 4;
            buf[off..off + 4].copy_from_slice(&BACKGROUND);
        }
    }

    for p in sim.history().iter() {
        draw_disc(buf, cfg, p.point, cfg.dot_diameter, p.color);
    }
}

/// Render to a new RGBA buffer (test convenience wrapper).
#[cfg(test)]
pub fn render(sim: &Simulation, cfg: &RenderConfig) -> Vec<u8> {
    let mut buf = Vec::new();
    render_into(&mut buf, sim, cfg);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::LorenzParams;
    use crate::state::{DEFAULT_SCALE, TRAIL_CAPACITY};

    fn test_sim() -> Simulation {
        Simulation::new(LorenzParams::default(), TRAIL_CAPACITY, DEFAULT_SCALE, 800, 600)
    }

    fn pixel(buf: &[u8], cfg: &RenderConfig, x: usize, y: usize) -> [u8; 4] {
        let off = (y * cfg.frame_width + x) * 4;
        [buf[off], buf[off + 1], buf[off + 2], buf[off + 3]]
    }

    #[test]
    fn test_render_config_for_display() {
        let cfg = RenderConfig::for_display(800, 600);
        assert_eq!(cfg.display_width, 800);
        assert_eq!(cfg.display_height, 600);
        assert_eq!(cfg.frame_width, 800);
        assert_eq!(cfg.frame_height, 600 + STATUS_BAR_HEIGHT);
        assert_eq!(cfg.dot_diameter, 3);
    }

    #[test]
    fn test_render_config_fit_round_trips() {
        let a = RenderConfig::for_display(800, 600);
        let b = RenderConfig::fit(a.frame_width, a.frame_height);
        assert_eq!(b.display_width, 800);
        assert_eq!(b.display_height, 600);
    }

    #[test]
    fn test_render_config_tiny_window() {
        let cfg = RenderConfig::fit(0, 5);
        assert_eq!(cfg.display_width, 1);
        assert_eq!(cfg.display_height, 1);
    }

    #[test]
    fn test_dot_diameter_never_zero() {
        let cfg = RenderConfig::for_display(10, 10).with_dot_diameter(0);
        assert_eq!(cfg.dot_diameter, 1);
    }

    #[test]
    fn test_render_buffer_size() {
        let sim = test_sim();
        let cfg = RenderConfig::for_display(800, 600);
        let buf = render(&sim, &cfg);
        assert_eq!(buf.len(), cfg.buffer_len());
    }

    #[test]
    fn test_empty_history_renders_black() {
        let sim = test_sim();
        let cfg = RenderConfig::for_display(64, 48);
        let buf = render(&sim, &cfg);
        for y in 0..cfg.display_height {
            for x in 0..cfg.display_width {
                assert_eq!(pixel(&buf, &cfg, x, y), BACKGROUND);
            }
        }
    }

    #[test]
    fn test_render_clears_previous_frame() {
        let mut sim = test_sim();
        sim.step();
        let cfg = RenderConfig::for_display(800, 600);
        let mut buf = vec![0xFF; cfg.buffer_len()];
        render_into(&mut buf, &sim, &cfg);
        assert_eq!(pixel(&buf, &cfg, 10, 10), BACKGROUND);
    }

    #[test]
    fn test_disc_covers_three_by_three_box() {
        let mut sim = test_sim();
        sim.step();
        let p = *sim.history().newest().unwrap();
        let cfg = RenderConfig::for_display(800, 600);
        let buf = render(&sim, &cfg);
        let (x0, y0) = (p.point.x as usize, p.point.y as usize);

        // Center and edge midpoints are fully covered
        for (dx, dy) in [(1, 1), (0, 1), (2, 1), (1, 0), (1, 2)] {
            assert_eq!(pixel(&buf, &cfg, x0 + dx, y0 + dy), p.color, "({dx},{dy})");
        }
        // Corners are partially covered: lit, but dimmer than the core
        let corner = pixel(&buf, &cfg, x0, y0);
        let core = pixel(&buf, &cfg, x0 + 1, y0 + 1);
        let sum = |c: [u8; 4]| c[0] as u32 + c[1] as u32 + c[2] as u32;
        assert!(sum(corner) > 0);
        assert!(sum(corner) < sum(core));
        // Nothing outside the bounding box
        assert_eq!(pixel(&buf, &cfg, x0 + 3, y0 + 1), BACKGROUND);
        assert_eq!(pixel(&buf, &cfg, x0 + 1, y0 + 3), BACKGROUND);
        assert_eq!(pixel(&buf, &cfg, x0.wrapping_sub(1), y0 + 1), BACKGROUND);
    }

    #[test]
    fn test_single_pixel_dot() {
        let mut sim = test_sim();
        sim.step();
        let p = *sim.history().newest().unwrap();
        let cfg = RenderConfig::for_display(800, 600).with_dot_diameter(1);
        let buf = render(&sim, &cfg);
        let (x0, y0) = (p.point.x as usize, p.point.y as usize);
        assert_eq!(pixel(&buf, &cfg, x0, y0), p.color);
        assert_eq!(pixel(&buf, &cfg, x0 + 1, y0), BACKGROUND);
    }

    #[test]
    fn test_newer_points_drawn_over_older() {
        let mut sim = test_sim();
        // Early steps barely move, so consecutive points overlap on screen.
        for _ in 0..5 {
            sim.step();
        }
        let newest = *sim.history().newest().unwrap();
        let cfg = RenderConfig::for_display(800, 600);
        let buf = render(&sim, &cfg);
        let (x, y) = (newest.point.x as usize + 1, newest.point.y as usize + 1);
        assert_eq!(pixel(&buf, &cfg, x, y), newest.color);
    }

    #[test]
    fn test_offscreen_points_are_clipped() {
        let mut sim = test_sim();
        // Tiny viewport: the attractor spills far outside it.
        sim.set_viewport(8, 8);
        for _ in 0..2000 {
            sim.step();
        }
        let cfg = RenderConfig::for_display(8, 8);
        let buf = render(&sim, &cfg);
        assert_eq!(buf.len(), cfg.buffer_len());
        // Status bar rows are left alone by the trail pass
        let status_start = cfg.display_height * cfg.frame_width * 4;
        assert!(buf[status_start..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_disc_partially_offscreen() {
        let cfg = RenderConfig::for_display(4, 4);
        let mut buf = vec![0u8; cfg.buffer_len()];
        draw_disc(&mut buf, &cfg, ScreenPoint { x: -1, y: -1 }, 3, [255, 0, 0, 255]);
        // (0,0) is the disc center pixel
        assert_eq!(pixel(&buf, &cfg, 0, 0), [255, 0, 0, 255]);
        assert_eq!(pixel(&buf, &cfg, 2, 2), [0, 0, 0, 0]);
    }

    #[test]
    fn test_saturated_points_are_clipped() {
        let cfg = RenderConfig::for_display(16, 16);
        let mut buf = vec![0u8; cfg.buffer_len()];
        for p in [
            ScreenPoint { x: i32::MAX, y: i32::MAX },
            ScreenPoint { x: i32::MIN, y: i32::MIN },
            ScreenPoint { x: i32::MAX - 1, y: 4 },
        ] {
            draw_disc(&mut buf, &cfg, p, 3, [255, 255, 255, 255]);
        }
        assert!(buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_over_blend_half_coverage() {
        let mut buf = vec![0, 0, 0, 255];
        over_blend(&mut buf, 0, [200, 100, 50, 255], 0.5);
        assert_eq!(buf, vec![100, 50, 25, 255]);
    }
}
