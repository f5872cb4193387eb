use std::collections::VecDeque;

use crate::config::Config;
use crate::renderer::depth_color;
use crate::solver::{self, LorenzParams};

/// Default number of trail points kept on screen.
pub const TRAIL_CAPACITY: usize = 5000;
/// Pixels per unit of Lorenz state space.
pub const DEFAULT_SCALE: f64 = 10.0;

/// Point in Lorenz state space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LorenzState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl LorenzState {
    /// Starting point of every run: slightly off the unstable origin.
    pub const fn initial() -> Self {
        Self { x: 0.01, y: 0.0, z: 0.0 }
    }
}

impl Default for LorenzState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Integer pixel position. May lie outside the surface; the renderer clips.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

/// One trail record: where to draw, in which color, and the state it came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    /// 1-based index of the step that produced this point.
    pub step: u64,
    pub point: ScreenPoint,
    pub color: [u8; 4],
    pub state: LorenzState,
}

/// Bounded FIFO of trail points, oldest first.
pub struct History {
    points: VecDeque<TrailPoint>,
    capacity: usize,
}

impl History {
    /// Reserve room for up to the default trail length; larger rings grow on demand.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity.min(TRAIL_CAPACITY).saturating_add(1)),
            capacity,
        }
    }

    /// Append a point, evicting the oldest ones once over capacity.
    pub fn push(&mut self, p: TrailPoint) {
        self.points.push_back(p);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate in insertion order (oldest to newest).
    pub fn iter(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }

    #[cfg(test)]
    pub fn oldest(&self) -> Option<&TrailPoint> {
        self.points.front()
    }

    #[cfg(test)]
    pub fn newest(&self) -> Option<&TrailPoint> {
        self.points.back()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// Everything the frame loop mutates: integrator state plus the trail.
pub struct Simulation {
    pub params: LorenzParams,
    pub state: LorenzState,
    /// Pixels per state-space unit used by the projection.
    pub scale: f64,
    history: History,
    width: usize,
    height: usize,
    steps: u64,
}

impl Simulation {
    pub fn new(params: LorenzParams, capacity: usize, scale: f64, width: usize, height: usize) -> Self {
        Self {
            params,
            state: LorenzState::initial(),
            scale,
            history: History::with_capacity(capacity),
            width,
            height,
            steps: 0,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            LorenzParams::from_config(&cfg.physics),
            cfg.trail.capacity,
            cfg.trail.scale,
            cfg.display.width,
            cfg.display.height,
        )
    }

    /// Advance one Euler step and record the projected, colored point.
    pub fn step(&mut self) {
        self.state = solver::euler_step(&self.state, &self.params);
        self.steps += 1;

        let point = self.project(&self.state);
        let color = depth_color(self.state.z);
        self.history.push(TrailPoint {
            step: self.steps,
            point,
            color,
            state: self.state,
        });
    }

    /// Map (x, y) to pixels around the viewport center. z is dropped.
    /// `width / 2` is integer division; the scaled offset truncates toward zero.
    /// Far-off (or diverged, non-finite) states saturate at the i32 range.
    pub fn project(&self, s: &LorenzState) -> ScreenPoint {
        let half_w = i32::try_from(self.width / 2).unwrap_or(i32::MAX);
        let half_h = i32::try_from(self.height / 2).unwrap_or(i32::MAX);
        ScreenPoint {
            x: half_w.saturating_add((s.x * self.scale) as i32),
            y: half_h.saturating_add((s.y * self.scale) as i32),
        }
    }

    /// Back to the initial state with an empty trail.
    pub fn reset(&mut self) {
        self.state = LorenzState::initial();
        self.history.clear();
        self.steps = 0;
    }

    /// Track the drawing surface size. Points already recorded keep their pixels.
    pub fn set_viewport(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    #[cfg(test)]
    pub fn viewport(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Steps taken since creation or the last reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}
