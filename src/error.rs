//! Crate-level error type for loading, configuration and output.
//!
//! The per-frame projection never fails; everything here happens at setup
//! time or when writing results.

use std::fmt;
use std::path::PathBuf;

use crate::face::FaceError;
use crate::projection::ProjectionError;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// The scene file could not be parsed.
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// The scene file parsed but describes an unusable scene.
    InvalidConfig(String),
    Obj(tobj::LoadError),
    Image(image::ImageError),
    Face(FaceError),
    Projection(ProjectionError),
    /// Errors reported by the windowing backend as plain strings.
    Window(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Config { path, source } => {
                write!(f, "failed to parse '{}': {source}", path.display())
            }
            Self::InvalidConfig(msg) => write!(f, "invalid scene: {msg}"),
            Self::Obj(e) => write!(f, "failed to load OBJ: {e}"),
            Self::Image(e) => write!(f, "failed to write image: {e}"),
            Self::Face(e) => write!(f, "invalid face: {e}"),
            Self::Projection(e) => write!(f, "invalid projection: {e}"),
            Self::Window(msg) => write!(f, "window error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Config { source, .. } => Some(source),
            Self::Obj(e) => Some(e),
            Self::Image(e) => Some(e),
            Self::Face(e) => Some(e),
            Self::Projection(e) => Some(e),
            Self::InvalidConfig(_) | Self::Window(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<tobj::LoadError> for Error {
    fn from(e: tobj::LoadError) -> Self {
        Self::Obj(e)
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e)
    }
}

impl From<FaceError> for Error {
    fn from(e: FaceError) -> Self {
        Self::Face(e)
    }
}

impl From<ProjectionError> for Error {
    fn from(e: ProjectionError) -> Self {
        Self::Projection(e)
    }
}
