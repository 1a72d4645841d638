use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entity::SceneEntity;
use crate::orientation::Orientation;
use crate::surface::DrawSurface;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Render time in milliseconds; drives remote camera animation.
    #[serde(default)]
    pub time_ms: i32,
    pub viewer: Orientation,
    #[serde(default = "default_viewport")]
    pub viewport: [u32; 4],
    #[serde(default = "default_fov")]
    pub fov_x: f32,
    #[serde(default = "default_fov")]
    pub fov_y: f32,
    #[serde(default)]
    pub entities: Vec<SceneEntity>,
    #[serde(default)]
    pub surfaces: Vec<DrawSurface>,
}

fn default_viewport() -> [u32; 4] {
    [0, 0, 1280, 720]
}

fn default_fov() -> f32 {
    90.0
}

impl Scene {
    pub fn from_toml_str(contents: &str) -> io::Result<Self> {
        toml::from_str::<Self>(contents).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("failed to deserialize scene: {e}"),
            )
        })
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn portal_surfaces(&self) -> impl Iterator<Item = &DrawSurface> {
        self.surfaces.iter().filter(|surface| surface.portal)
    }
}
