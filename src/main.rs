mod audio;
mod config;
mod renderer;
mod solver;
mod state;

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use tracing_subscriber::EnvFilter;

use state::Simulation;

const WINDOW_TITLE: &str = "Lorenz Attractor";

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// YAML config file
    #[arg(long, default_value = config::DEFAULT_PATH)]
    config: PathBuf,

    /// Audio file to loop instead of the configured one
    #[arg(long)]
    audio: Option<PathBuf>,

    /// Run without sound
    #[arg(long)]
    mute: bool,
}

impl Args {
    /// Track to play, if any. CLI wins over config; `--mute` wins over both.
    fn audio_path(&self, cfg: &config::AudioConfig) -> Option<PathBuf> {
        if self.mute {
            return None;
        }
        match &self.audio {
            Some(path) => Some(path.clone()),
            None if cfg.enabled => Some(cfg.path.clone()),
            None => None,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Convert RGBA &[u8] buffer to 0RGB &[u32] buffer for minifb.
fn rgba_to_argb(rgba: &[u8], out: &mut [u32]) {
    for (i, pixel) in rgba.chunks_exact(4).enumerate() {
        out[i] = (pixel[0] as u32) << 16 | (pixel[1] as u32) << 8 | pixel[2] as u32;
    }
}

/// Left side of the status bar: current state and trail length.
fn format_status(sim: &Simulation) -> String {
    let s = &sim.state;
    format!(
        "x {:.2}  y {:.2}  z {:.2}  pts {}  step {}",
        s.x,
        s.y,
        s.z,
        sim.history().len(),
        sim.steps()
    )
}

/// Last window size seen. The laid-out frame can differ from the window (a
/// window shorter than the status bar still gets a one-pixel display), so
/// resizes are detected against this, not against the frame.
struct WindowSize {
    last: (usize, usize),
}

impl WindowSize {
    fn new(size: (usize, usize)) -> Self {
        Self { last: size }
    }

    /// The new size, if it differs from the last one seen. Zero-area sizes
    /// (minimized windows) are ignored.
    fn changed(&mut self, size: (usize, usize)) -> Option<(usize, usize)> {
        if size == self.last || size.0 == 0 || size.1 == 0 {
            return None;
        }
        self.last = size;
        Some(size)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let cfg = config::load(&args.config);
    tracing::debug!(?cfg, "effective config");

    let audio = args.audio_path(&cfg.audio).and_then(|path| audio::start_or_warn(&path));

    let mut sim = Simulation::from_config(&cfg);
    let steps_per_frame = cfg.display.steps_per_frame.max(1);
    let mut render_cfg = renderer::RenderConfig::for_display(cfg.display.width, cfg.display.height)
        .with_dot_diameter(cfg.trail.dot_diameter);
    let mut w = render_cfg.frame_width;
    let mut h = render_cfg.frame_height;
    sim.set_viewport(render_cfg.display_width, render_cfg.display_height);

    let mut window = Window::new(
        WINDOW_TITLE,
        w,
        h,
        WindowOptions {
            resize: true,
            ..WindowOptions::default()
        },
    )
    .map_err(|e| anyhow!("failed to create window: {e}"))?;

    window.set_target_fps(cfg.display.target_fps);

    // Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .context("failed to install Ctrl+C handler")?;

    tracing::info!(
        width = render_cfg.display_width,
        height = render_cfg.display_height,
        capacity = sim.history().capacity(),
        "starting"
    );

    let mut window_size = WindowSize::new((w, h));
    let mut framebuf = vec![0u32; w * h];
    let mut rgba_buf: Vec<u8> = Vec::new();
    let mut paused = false;
    let mut frame_count = 0u32;
    let mut last_fps_time = Instant::now();

    while window.is_open() && running.load(Ordering::SeqCst) {
        // --- Keyboard handling ---
        if window.is_key_pressed(Key::Escape, KeyRepeat::No) {
            break;
        }
        if window.is_key_pressed(Key::Space, KeyRepeat::No) {
            paused = !paused;
            tracing::debug!(paused, "toggled pause");
        }
        if window.is_key_pressed(Key::R, KeyRepeat::No) {
            sim.reset();
            tracing::debug!("trajectory reset");
        }

        // --- Check for window resize ---
        if let Some((new_w, new_h)) = window_size.changed(window.get_size()) {
            render_cfg = renderer::RenderConfig::fit(new_w, new_h).with_dot_diameter(cfg.trail.dot_diameter);
            w = render_cfg.frame_width;
            h = render_cfg.frame_height;
            framebuf = vec![0u32; w * h];
            sim.set_viewport(render_cfg.display_width, render_cfg.display_height);
            tracing::debug!(w, h, "resized");
        }

        if !paused {
            for _ in 0..steps_per_frame {
                sim.step();
            }
        }

        renderer::render_into(&mut rgba_buf, &sim, &render_cfg);
        renderer::render_status(&mut rgba_buf, &render_cfg, &format_status(&sim), if paused { "paused" } else { "" });
        rgba_to_argb(&rgba_buf, &mut framebuf);

        window
            .update_with_buffer(&framebuf, w, h)
            .map_err(|e| anyhow!("failed to present frame: {e}"))?;

        frame_count += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            window.set_title(&format!("{WINDOW_TITLE} ({frame_count} fps)"));
            frame_count = 0;
            last_fps_time = now;
        }
    }

    tracing::info!(steps = sim.steps(), "shutting down");
    drop(audio);
    Ok(())
}
