/// WF3D Core Library - homogeneous geometry and wireframe rasterization
///
/// This library provides the pure core of the renderer: the 4xN matrix
/// engine, transform builders, curve and solid generators, the coordinate
/// frame stack, the rasterizer, and the scene script that drives them.
/// Nothing here performs file or terminal I/O.

pub mod curves;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod matrix;
pub mod raster;
pub mod scene;
pub mod script;
pub mod solids;
pub mod stack;
pub mod transform;

// Re-export commonly used types
pub use error::{Error, Result};
pub use frame::{Color, Frame};
pub use geometry::{Edge, Triangle};
pub use matrix::{multiply, Matrix, MatrixKind};
pub use scene::{run_script, FrameSink, Scene, SceneSettings, SinkError};
pub use script::{parse_script, Command};
pub use stack::TransformStack;
pub use transform::{Axis, Transform};
