/// Lorenz system constants and integration step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LorenzParams {
    /// Prandtl number.
    pub sigma: f64,
    /// Rayleigh number. 28 puts the system in the chaotic regime.
    pub rho: f64,
    /// Geometric factor of the convection cells.
    pub beta: f64,
    /// Fixed Euler step.
    pub dt: f64,
}

impl Default for LorenzParams {
    fn default() -> Self {
        Self {
            sigma: 10.0,
            rho: 28.0,
            beta: 8.0 / 3.0,
            dt: 0.01,
        }
    }
}

impl LorenzParams {
    pub fn from_config(cfg: &crate::config::PhysicsConfig) -> Self {
        Self {
            sigma: cfg.sigma,
            rho: cfg.rho,
            beta: cfg.beta,
            dt: cfg.dt,
        }
    }
}
