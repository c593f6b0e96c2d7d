//! JSON document formats: the resource manifest, the application config, and
//! scene descriptions.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EngineError;

/// The kind of payload a resource resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// A scene description (JSON).
    Scene,
    /// A component script.
    Component,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scene => f.write_str("scene"),
            Self::Component => f.write_str("component"),
        }
    }
}

/// One manifest entry: an identifier bound to a project path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileResource {
    /// Opaque identifier used by scenes and `ResourceManager::load`.
    #[serde(alias = "uuid")]
    pub id: String,
    /// What the path holds.
    #[serde(rename = "type", alias = "kind")]
    pub kind: ResourceKind,
    /// Project-relative path. Matched case-insensitively.
    #[serde(alias = "file_path")]
    pub path: String,
}

impl FileResource {
    /// Create a manifest entry.
    pub fn new(id: impl Into<String>, kind: ResourceKind, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            path: path.into(),
        }
    }
}

/// The resource manifest (`resource.config.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    /// Every resource the project uses.
    #[serde(default)]
    pub files: Vec<FileResource>,
}

impl FileConfig {
    /// Read a manifest from disk.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        read_json(path)
    }
}

/// The application config (`application.config.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Identifier of the scene installed at startup.
    pub start_scene: String,
}

impl AppConfig {
    /// Read the application config from disk.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        read_json(path)
    }
}

/// A scene description.
///
/// Entities are kept as raw JSON and parsed one at a time, so a single
/// malformed entry only drops that entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// The entities of the scene.
    #[serde(default)]
    pub entities: Vec<Value>,
}

/// One entity in a scene description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityConfig {
    /// The entity name, used by `World::find_by_name`.
    #[serde(default)]
    pub name: String,
    /// Initial position.
    #[serde(default)]
    pub position: [f32; 3],
    /// Initial XYZ Euler rotation, in radians.
    #[serde(default)]
    pub rotation: [f32; 3],
    /// Initial scale.
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
    /// The components attached to the entity.
    #[serde(default)]
    pub components: Vec<ComponentConfig>,
}

fn unit_scale() -> [f32; 3] {
    [1.0; 3]
}

/// One component reference inside an entity config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// Resource identifier of the component script.
    #[serde(alias = "uuid")]
    pub id: String,
    /// Whether the component starts active.
    #[serde(default = "default_active")]
    pub active: bool,
    /// Data handed to `Component::initialize`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

fn default_active() -> bool {
    true
}

/// Read and deserialise a JSON file.
///
/// # Errors
///
/// Returns [`EngineError::Io`] if the file cannot be read and
/// [`EngineError::Json`] if it does not match `T`.
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, EngineError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_manifest_accepts_aliases() {
        let config: FileConfig = serde_json::from_value(json!({
            "files": [
                { "uuid": "a", "type": "scene", "file_path": "/scenes/main.json" },
                { "id": "b", "type": "component", "path": "/scripts/UpDown.rs" }
            ]
        }))
        .unwrap();
        assert_eq!(
            config.files,
            vec![
                FileResource::new("a", ResourceKind::Scene, "/scenes/main.json"),
                FileResource::new("b", ResourceKind::Component, "/scripts/UpDown.rs"),
            ]
        );
    }

    #[test]
    fn test_entity_config_defaults() {
        let config: EntityConfig = serde_json::from_value(json!({ "name": "Box" })).unwrap();
        assert_eq!(config.position, [0.0; 3]);
        assert_eq!(config.scale, [1.0; 3]);
        assert!(config.components.is_empty());
    }

    #[test]
    fn test_component_config_defaults() {
        let config: ComponentConfig = serde_json::from_value(json!({ "uuid": "c" })).unwrap();
        assert_eq!(config.id, "c");
        assert!(config.active);
        assert!(config.data.is_none());
    }

    #[test]
    fn test_scene_keeps_malformed_entities_raw() {
        let scene: SceneConfig =
            serde_json::from_value(json!({ "entities": [{ "name": "ok" }, null] })).unwrap();
        assert_eq!(scene.entities.len(), 2);
        assert!(scene.entities[1].is_null());
    }

    #[test]
    fn test_read_json_missing_file() {
        let err = read_json::<AppConfig>("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, EngineError::Io { .. }));
    }
}
