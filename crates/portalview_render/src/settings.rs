use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const SETTINGS_PATH: &str = "subview.toml";
pub const MIN_SUBVIEW_RECURSION: u32 = 1;
pub const MAX_SUBVIEW_RECURSION: u32 = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubviewSettings {
    #[serde(default = "default_portals")]
    pub portals: bool,
    #[serde(default)]
    pub fast_sky: bool,
    /// Deepest portal view that may itself open another subview.
    #[serde(default = "default_max_recursion")]
    pub max_recursion: u32,
}

impl Default for SubviewSettings {
    fn default() -> Self {
        Self {
            portals: default_portals(),
            fast_sky: false,
            max_recursion: default_max_recursion(),
        }
    }
}

impl SubviewSettings {
    pub fn sanitize(mut self) -> Self {
        self.max_recursion = self
            .max_recursion
            .clamp(MIN_SUBVIEW_RECURSION, MAX_SUBVIEW_RECURSION);
        self
    }

    pub fn from_toml_str(contents: &str) -> io::Result<Self> {
        let parsed = toml::from_str::<Self>(contents).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("failed to deserialize settings: {e}"),
            )
        })?;
        Ok(parsed.sanitize())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let settings = self.clone().sanitize();
        let serialized = toml::to_string_pretty(&settings).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("failed to serialize settings: {e}"),
            )
        })?;
        fs::write(path, serialized)
    }
}

fn default_portals() -> bool {
    true
}

fn default_max_recursion() -> u32 {
    1
}

pub fn load_or_create_settings(path: &Path) -> SubviewSettings {
    match SubviewSettings::load(path) {
        Ok(settings) => settings,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let settings = SubviewSettings::default();
            if let Err(save_err) = settings.save(path) {
                warn!(
                    "Failed to create default settings at {}: {save_err}",
                    path.display()
                );
            }
            settings
        }
        Err(err) => {
            warn!("Failed to load settings from {}: {err}", path.display());
            let settings = SubviewSettings::default();
            if let Err(save_err) = settings.save(path) {
                warn!(
                    "Failed to overwrite settings at {}: {save_err}",
                    path.display()
                );
            }
            settings
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io;
    use std::path::PathBuf;

    use super::{
        load_or_create_settings, SubviewSettings, MAX_SUBVIEW_RECURSION, MIN_SUBVIEW_RECURSION,
    };

    fn scratch_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "portalview_settings_{}_{name}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).expect("create scratch dir");
        dir.join("subview.toml")
    }

    #[test]
    fn missing_fields_take_defaults() {
        let settings = SubviewSettings::from_toml_str("fast_sky = true").expect("parse settings");
        assert!(settings.portals);
        assert!(settings.fast_sky);
        assert_eq!(settings.max_recursion, 1);
    }

    #[test]
    fn recursion_depth_is_clamped() {
        let settings =
            SubviewSettings::from_toml_str("max_recursion = 99").expect("parse settings");
        assert_eq!(settings.max_recursion, MAX_SUBVIEW_RECURSION);

        let settings = SubviewSettings::from_toml_str("max_recursion = 0").expect("parse settings");
        assert_eq!(settings.max_recursion, MIN_SUBVIEW_RECURSION);
    }

    #[test]
    fn malformed_settings_are_invalid_data() {
        let err = SubviewSettings::from_toml_str("portals = \"yes\"")
            .expect_err("portals must be a bool");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn load_or_create_writes_defaults_when_missing() {
        let path = scratch_path("missing");
        let _ = fs::remove_file(&path);

        let settings = load_or_create_settings(&path);
        assert_eq!(settings, SubviewSettings::default());
        assert!(path.exists());

        let custom = SubviewSettings {
            portals: false,
            fast_sky: false,
            max_recursion: 3,
        };
        custom.save(&path).expect("save settings");
        assert_eq!(load_or_create_settings(&path), custom);
    }

    #[test]
    fn load_or_create_replaces_corrupt_file() {
        let path = scratch_path("corrupt");
        fs::write(&path, "max_recursion = [").expect("write corrupt settings");

        let settings = load_or_create_settings(&path);
        assert_eq!(settings, SubviewSettings::default());
        let reloaded = SubviewSettings::load(&path).expect("defaults were written back");
        assert_eq!(reloaded, SubviewSettings::default());
    }
}
