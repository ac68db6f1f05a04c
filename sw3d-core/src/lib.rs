/// SW3D Core Library - A software 3D pipeline, step by step
///
/// This library provides the whole rendering path without any GPU: vector and
/// matrix math, mesh generators, perspective projection, a painter's-algorithm
/// rasterizer that draws onto any [`Surface`], and the demo [`Scene`] driver.

pub mod cache;
pub mod error;
pub mod geometry;
pub mod matrix;
pub mod projection;
pub mod render;
pub mod scene;
pub mod shapes;
pub mod surface;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use error::{Error, Result};
pub use geometry::{Face, Mesh, Triangle};
pub use matrix::Matrix;
pub use projection::{Projection, ScreenPoint};
pub use render::{draw_geometry, FaceColor, RenderOptions, Rgb};
pub use scene::{Scene, SceneConfig, StepKind};
pub use surface::{DisplayList, DrawCall, Surface};
pub use transform::{Placement, RotationState, Transform};
pub use vector::Vector4;
