//! Mesh-gradient pixel synthesis.
//!
//! The core is a pure function from [`gradient::GradientOptions`] plus a seeded
//! [`rand::Rng`] to a flat RGBA byte buffer: color seed points are placed on a
//! jittered near-square grid, then every pixel is an inverse-distance-weighted
//! blend of the point colors, optionally perturbed by noise and masked into a
//! rounded rectangle. [`encode`] turns the buffer into PNG/WebP/JPEG bytes.

pub mod color;
pub mod config;
pub mod encode;
pub mod gradient;
pub mod math;
pub mod points;
pub mod rand;
