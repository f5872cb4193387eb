mod integrate;
mod params;

// Re-export public API
pub use integrate::euler_step;
pub use params::LorenzParams;
