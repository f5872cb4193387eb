use super::params::LorenzParams;
use crate::state::LorenzState;

/// Lorenz vector field at `s`.
/// dx = sigma(y - x), dy = x(rho - z) - y, dz = xy - beta z
pub fn derivatives(s: &LorenzState, p: &LorenzParams) -> (f64, f64, f64) {
    let dx = p.sigma * (s.y - s.x);
    let dy = s.x * (p.rho - s.z) - s.y;
    let dz = s.x * s.y - (p.beta * s.z);
    (dx, dy, dz)
}

/// Explicit Euler step with fixed dt. No error control: discretization
/// drift accumulates over time.
pub fn euler_step(s: &LorenzState, p: &LorenzParams) -> LorenzState {
    let (dx, dy, dz) = derivatives(s, p);
    LorenzState {
        x: s.x + dx * p.dt,
        y: s.y + dy * p.dt,
        z: s.z + dz * p.dt,
    }
}
