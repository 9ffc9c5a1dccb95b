//! TOML scene description.
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the stock scene: one cube five units in front of a camera at the origin,
//! slowly pitching.
//!
//! ```toml
//! [viewport]
//! width = 800
//! height = 600
//!
//! [camera]
//! position = [0.0, 0.0, 0.0]
//! fov_degrees = 90.0
//! near = 0.1
//! far = 1000.0
//!
//! [render]
//! mode = "filled_wireframe"
//! backface_culling = true
//!
//! [[shapes]]
//! kind = "cube"
//! position = [0.0, 0.0, -5.0]
//! spin = { yaw = 0.0, pitch = 0.6 }
//!
//! [[shapes]]
//! kind = "obj"
//! path = "assets/teapot.obj"
//! position = [3.0, 0.0, -8.0]
//! scale = 0.5
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

use crate::camera::{Camera, CameraController};
use crate::engine::RenderMode;
use crate::error::Error;
use crate::math::vec3::Vec3;
use crate::projection::{Projection, Viewport};
use crate::shape::{Shape, ShapeKind};
use crate::transform::{Pose, Rotation};

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub controller: ControllerConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default = "default_shapes")]
    pub shapes: Vec<ShapeConfig>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ViewportConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CameraConfig {
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub yaw: f32,
    #[serde(default)]
    pub pitch: f32,
    #[serde(default = "default_fov")]
    pub fov_degrees: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            yaw: 0.0,
            pitch: 0.0,
            fov_degrees: default_fov(),
            near: default_near(),
            far: default_far(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ControllerConfig {
    #[serde(default = "default_move_speed")]
    pub move_speed: f32,
    #[serde(default = "default_look_sensitivity")]
    pub look_sensitivity: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            move_speed: default_move_speed(),
            look_sensitivity: default_look_sensitivity(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    #[serde(default)]
    pub mode: RenderMode,
    #[serde(default = "default_true")]
    pub backface_culling: bool,
    #[serde(default = "default_true")]
    pub grid: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::default(),
            backface_culling: true,
            grid: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ShapeConfig {
    #[serde(flatten)]
    pub kind: ShapeKind,
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub yaw: f32,
    #[serde(default)]
    pub pitch: f32,
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Rotation rates in radians per second.
    #[serde(default)]
    pub spin: Spin,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Spin {
    #[serde(default)]
    pub yaw: f32,
    #[serde(default)]
    pub pitch: f32,
}

/// Largest accepted viewport side in pixels.
pub const MAX_VIEWPORT_DIMENSION: u32 = 16_384;

// Defaults reproduce the stock demo scene.
fn default_width() -> u32 {
    800
}
fn default_height() -> u32 {
    600
}
fn default_fov() -> f32 {
    90.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    1000.0
}
fn default_move_speed() -> f32 {
    5.0
}
fn default_look_sensitivity() -> f32 {
    0.002
}
fn default_scale() -> f32 {
    1.0
}
fn default_true() -> bool {
    true
}
fn default_shapes() -> Vec<ShapeConfig> {
    vec![ShapeConfig {
        kind: ShapeKind::Cube,
        position: [0.0, 0.0, -5.0],
        yaw: 0.0,
        pitch: 0.0,
        scale: 1.0,
        spin: Spin { yaw: 0.0, pitch: 0.6 },
    }]
}

impl SceneConfig {
    /// The stock scene (same as an empty file).
    pub fn stock() -> Self {
        Self {
            shapes: default_shapes(),
            ..Self::default()
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        info!("Loading scene from '{}'", path.display());
        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|source| Error::Config {
            path: PathBuf::from(path),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Checks the viewport and lens before anything is built from them.
    pub fn validate(&self) -> Result<(), Error> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "viewport {}x{} has no area",
                self.viewport.width, self.viewport.height
            )));
        }
        if self.viewport.width > MAX_VIEWPORT_DIMENSION
            || self.viewport.height > MAX_VIEWPORT_DIMENSION
        {
            return Err(Error::InvalidConfig(format!(
                "viewport {}x{} exceeds the {} pixel limit per side",
                self.viewport.width, self.viewport.height, MAX_VIEWPORT_DIMENSION
            )));
        }
        self.projection().validate(self.viewport().aspect())?;
        if let Some(bad) = self.shapes.iter().find(|s| !(s.scale > 0.0)) {
            return Err(Error::InvalidConfig(format!(
                "shape scale {} must be positive",
                bad.scale
            )));
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport.width, self.viewport.height)
    }

    pub fn projection(&self) -> Projection {
        Projection::from_degrees(self.camera.fov_degrees, self.camera.near, self.camera.far)
    }

    pub fn camera(&self) -> Camera {
        let [x, y, z] = self.camera.position;
        let mut camera = Camera::new(Vec3::new(x, y, z), self.projection());
        camera.rotation = Rotation::new(self.camera.yaw, self.camera.pitch);
        camera
    }

    pub fn controller(&self) -> CameraController {
        CameraController::new(self.controller.move_speed, self.controller.look_sensitivity)
    }

    /// Builds every shape, loading OBJ files as needed.
    pub fn shapes(&self) -> Result<Vec<(Shape, Spin)>, Error> {
        self.shapes
            .iter()
            .map(|config| {
                let [x, y, z] = config.position;
                let pose = Pose {
                    position: Vec3::new(x, y, z),
                    rotation: Rotation::new(config.yaw, config.pitch),
                    scale: config.scale,
                };
                Ok((Shape::from_kind(&config.kind)?.with_pose(pose), config.spin))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use approx::assert_relative_eq;

    #[test]
    fn empty_file_is_stock_scene() {
        let config = SceneConfig::parse("").unwrap();
        assert_eq!(config, SceneConfig::stock());
        assert_eq!(config.shapes.len(), 1);
        assert_eq!(config.shapes[0].kind, ShapeKind::Cube);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_full_scene() {
        let config = SceneConfig::parse(
            r#"
            [viewport]
            width = 320
            height = 200

            [camera]
            position = [0.0, 1.0, 2.0]
            yaw = 0.5
            fov_degrees = 60.0
            near = 0.5
            far = 50.0

            [render]
            mode = "wireframe_vertices"
            backface_culling = false

            [[shapes]]
            kind = "pyramid"
            position = [1.0, 0.0, -4.0]
            scale = 2.0
            spin = { yaw = 1.0 }

            [[shapes]]
            kind = "obj"
            path = "model.obj"
            "#,
        )
        .unwrap();

        assert_eq!(config.viewport.width, 320);
        assert_relative_eq!(config.viewport().aspect(), 1.6);
        assert_relative_eq!(config.camera().rotation.yaw, 0.5);
        assert_relative_eq!(config.projection().fov, 60f32.to_radians());
        assert_eq!(config.render.mode, RenderMode::WireframeVertices);
        assert!(!config.render.backface_culling);
        assert!(config.render.grid);
        assert_eq!(config.shapes[0].kind, ShapeKind::Pyramid);
        assert_relative_eq!(config.shapes[0].spin.yaw, 1.0);
        assert_eq!(
            config.shapes[1].kind,
            ShapeKind::Obj {
                path: PathBuf::from("model.obj")
            }
        );
    }

    #[test]
    fn builds_posed_shapes() {
        let config = SceneConfig::stock();
        let shapes = config.shapes().unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].0.pose.position, Vec3::new(0.0, 0.0, -5.0));
        assert_relative_eq!(shapes[0].1.pitch, 0.6);
    }

    #[test]
    fn rejects_inverted_depth_range() {
        let config = SceneConfig::parse("[camera]\nnear = 10.0\nfar = 1.0").unwrap();
        assert!(matches!(config.validate(), Err(Error::Projection(_))));
    }

    #[test]
    fn rejects_empty_viewport() {
        let config = SceneConfig::parse("[viewport]\nwidth = 0").unwrap();
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_oversized_viewport() {
        let mut config = SceneConfig::stock();
        config.viewport.width = 70_000;
        config.viewport.height = 70_000;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
        assert!(Engine::from_config(&config).is_err());

        config.viewport.width = MAX_VIEWPORT_DIMENSION;
        config.viewport.height = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(SceneConfig::parse("[camera]\nroll = 1.0").is_err());
    }
}
