//! # engine_math
//!
//! Math types for the scene engine. Re-exports [`glam`] for linear algebra
//! and defines the [`Transform3D`] every entity carries.

pub mod transform;

// Re-export glam types for convenience.
pub use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

pub use transform::Transform3D;
