//! Pulse Core
//!
//! Shared types for the Pulse effect engine: 2D geometry, the drawing
//! surface color type, and the `DrawSurface` abstraction that effect
//! renderers paint into.
//!
//! # Features
//!
//! - **Geometry**: `Point`, `Size`, `Vec2`, `Rect` with the containment
//!   tests particle culling relies on
//! - **Color**: f32 RGBA with linear interpolation and packed-ARGB
//!   conversions
//! - **DrawSurface**: fill/stroke circles and rounded rectangles, a clip
//!   stack with a clip-difference operation, and an opacity stack
//! - **RecordingSurface**: records `DrawCommand`s for deferred execution
//!   and for tests

pub mod color;
pub mod draw;
pub mod geometry;

pub use color::Color;
pub use draw::{
    ClipShape, CornerRadius, DrawCommand, DrawSurface, LineCap, LineJoin, RecordingSurface, Stroke,
};
pub use geometry::{Point, Rect, Size, Vec2};
