//! # engine_scripts
//!
//! Component scripts compiled into the engine.
//!
//! Scene manifests refer to scripts by project path. [`register_builtin`]
//! binds each built-in to its path so a [`ProjectResolver`] can hand them to
//! the resource manager.
//!
//! [`ProjectResolver`]: engine_core::ProjectResolver

pub mod box_mesh;
pub mod up_down;

use engine_core::ComponentRegistry;

pub use box_mesh::BoxMesh;
pub use up_down::UpDown;

/// Manifest path of [`UpDown`].
pub const UP_DOWN_PATH: &str = "/scripts/UpDown.rs";
/// Manifest path of [`BoxMesh`].
pub const BOX_MESH_PATH: &str = "/scripts/BoxMesh.rs";

/// Register every built-in script under its manifest path.
pub fn register_builtin(registry: &mut ComponentRegistry) -> &mut ComponentRegistry {
    registry
        .register_default::<UpDown>(UP_DOWN_PATH)
        .register_default::<BoxMesh>(BOX_MESH_PATH)
}

/// A registry holding only the built-in scripts.
#[must_use]
pub fn builtin_registry() -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    register_builtin(&mut registry);
    registry
}
