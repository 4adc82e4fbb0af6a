//! Drawing surface abstraction
//!
//! The `DrawSurface` trait is the rendering seam between the effect engine
//! and the host platform. Effects only ever fill or stroke circles and
//! rounded rectangles, punch shapes out of the paintable region via the
//! clip stack, and scope group opacity — so that is the whole trait.
//!
//! `RecordingSurface` implements the trait by recording `DrawCommand`s for
//! deferred execution on whatever backend the host wires up. It is also
//! what the engine's tests assert against.

use smallvec::SmallVec;

use crate::color::Color;
use crate::geometry::{Point, Rect, Size};

// ─────────────────────────────────────────────────────────────────────────────
// Stroke Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Line cap style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    /// Flat cap at the endpoint
    #[default]
    Butt,
    /// Rounded cap extending past the endpoint
    Round,
    /// Square cap extending past the endpoint
    Square,
}

/// Line join style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineJoin {
    /// Miter join (sharp corner)
    #[default]
    Miter,
    /// Round join
    Round,
    /// Bevel join (flat corner)
    Bevel,
}

/// Stroke style configuration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    /// Line width
    pub width: f32,
    /// Line cap style
    pub cap: LineCap,
    /// Line join style
    pub join: LineJoin,
    /// Miter limit (for Miter joins)
    pub miter_limit: f32,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            miter_limit: 4.0,
        }
    }
}

impl Stroke {
    /// Create a new stroke with the given width
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    /// Set line cap style
    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    /// Set line join style
    pub fn with_join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Corner Radius
// ─────────────────────────────────────────────────────────────────────────────

/// Per-corner radii for rounded rectangles
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CornerRadius {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadius {
    pub const ZERO: CornerRadius = CornerRadius::uniform(0.0);

    pub const fn uniform(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.top_left == 0.0
            && self.top_right == 0.0
            && self.bottom_right == 0.0
            && self.bottom_left == 0.0
    }
}

impl From<f32> for CornerRadius {
    fn from(radius: f32) -> Self {
        Self::uniform(radius)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Clip Shapes
// ─────────────────────────────────────────────────────────────────────────────

/// Shape used for clipping
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClipShape {
    /// Axis-aligned rectangle clip
    Rect(Rect),
    /// Rounded rectangle clip
    RoundedRect {
        rect: Rect,
        corner_radius: CornerRadius,
    },
    /// Circular clip
    Circle { center: Point, radius: f32 },
}

impl ClipShape {
    /// Create a rectangular clip
    pub fn rect(rect: Rect) -> Self {
        ClipShape::Rect(rect)
    }

    /// Create a rounded rectangle clip
    pub fn rounded_rect(rect: Rect, corner_radius: impl Into<CornerRadius>) -> Self {
        ClipShape::RoundedRect {
            rect,
            corner_radius: corner_radius.into(),
        }
    }

    /// Create a circular clip
    pub fn circle(center: Point, radius: f32) -> Self {
        ClipShape::Circle { center, radius }
    }

    /// Get the bounding rect of this clip shape
    pub fn bounds(&self) -> Rect {
        match self {
            ClipShape::Rect(rect) => *rect,
            ClipShape::RoundedRect { rect, .. } => *rect,
            ClipShape::Circle { center, radius } => {
                Rect::from_center(*center, Size::new(*radius * 2.0, *radius * 2.0))
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Draw Surface Trait
// ─────────────────────────────────────────────────────────────────────────────

/// The drawing operations an effect renderer needs from the host
///
/// Implementations maintain a clip stack and an opacity stack. `push_clip`
/// intersects the paintable region with a shape; `push_clip_out` subtracts
/// the shape from it (the clip-difference operation behind the indicator's
/// ring look). Opacity values multiply with their parents.
pub trait DrawSurface {
    // ─────────────────────────────────────────────────────────────────────
    // State Stacks
    // ─────────────────────────────────────────────────────────────────────

    /// Intersect the paintable region with a shape
    fn push_clip(&mut self, shape: ClipShape);

    /// Subtract a shape from the paintable region
    fn push_clip_out(&mut self, shape: ClipShape);

    /// Pop the top clip from the stack
    fn pop_clip(&mut self);

    /// Push an opacity value (multiplied with parent)
    fn push_opacity(&mut self, opacity: f32);

    /// Pop the top opacity from the stack
    fn pop_opacity(&mut self);

    // ─────────────────────────────────────────────────────────────────────
    // 2D Drawing Operations
    // ─────────────────────────────────────────────────────────────────────

    /// Fill a rectangle with rounded corners
    fn fill_rect(&mut self, rect: Rect, corner_radius: CornerRadius, color: Color);

    /// Stroke a rectangle with rounded corners
    fn stroke_rect(&mut self, rect: Rect, corner_radius: CornerRadius, stroke: &Stroke, color: Color);

    /// Fill a circle
    fn fill_circle(&mut self, center: Point, radius: f32, color: Color);

    /// Stroke a circle
    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: &Stroke, color: Color);

    // ─────────────────────────────────────────────────────────────────────
    // State Queries
    // ─────────────────────────────────────────────────────────────────────

    /// Get the current viewport size
    fn viewport_size(&self) -> Size;

    /// Get the current combined opacity
    fn current_opacity(&self) -> f32;
}

// ─────────────────────────────────────────────────────────────────────────────
// Recorded Commands
// ─────────────────────────────────────────────────────────────────────────────

/// A draw command that can be recorded and replayed
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    // State
    PushClip(ClipShape),
    PushClipOut(ClipShape),
    PopClip,
    PushOpacity(f32),
    PopOpacity,

    // 2D Drawing
    FillRect {
        rect: Rect,
        corner_radius: CornerRadius,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        corner_radius: CornerRadius,
        stroke: Stroke,
        color: Color,
    },
    FillCircle {
        center: Point,
        radius: f32,
        color: Color,
    },
    StrokeCircle {
        center: Point,
        radius: f32,
        stroke: Stroke,
        color: Color,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Recording Surface
// ─────────────────────────────────────────────────────────────────────────────

/// A `DrawSurface` that records commands for deferred execution
///
/// The host replays `take_commands()` against its real canvas each frame.
/// Unbalanced pops are dropped with a warning rather than corrupting the
/// command stream.
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    // Parallel stacks tracking what is currently pushed; entries are the
    // combined values so current_opacity() is O(1).
    opacity_stack: SmallVec<[f32; 4]>,
    clip_depth: usize,
    viewport: Size,
}

impl RecordingSurface {
    /// Create a new recording surface with the given viewport size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            commands: Vec::new(),
            opacity_stack: SmallVec::new(),
            clip_depth: 0,
            viewport: Size::new(width, height),
        }
    }

    /// Create from a Size
    pub fn from_size(size: Size) -> Self {
        Self::new(size.width, size.height)
    }

    /// Get all recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take ownership of recorded commands, leaving the surface empty
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Drop all recorded commands and reset the state stacks
    pub fn clear(&mut self) {
        self.commands.clear();
        self.opacity_stack.clear();
        self.clip_depth = 0;
    }
}

impl DrawSurface for RecordingSurface {
    fn push_clip(&mut self, shape: ClipShape) {
        self.clip_depth += 1;
        self.commands.push(DrawCommand::PushClip(shape));
    }

    fn push_clip_out(&mut self, shape: ClipShape) {
        self.clip_depth += 1;
        self.commands.push(DrawCommand::PushClipOut(shape));
    }

    fn pop_clip(&mut self) {
        if self.clip_depth == 0 {
            tracing::warn!("pop_clip with empty clip stack, ignoring");
            return;
        }
        self.clip_depth -= 1;
        self.commands.push(DrawCommand::PopClip);
    }

    fn push_opacity(&mut self, opacity: f32) {
        let combined = self.current_opacity() * opacity.clamp(0.0, 1.0);
        self.opacity_stack.push(combined);
        self.commands.push(DrawCommand::PushOpacity(opacity));
    }

    fn pop_opacity(&mut self) {
        if self.opacity_stack.pop().is_none() {
            tracing::warn!("pop_opacity with empty opacity stack, ignoring");
            return;
        }
        self.commands.push(DrawCommand::PopOpacity);
    }

    fn fill_rect(&mut self, rect: Rect, corner_radius: CornerRadius, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            corner_radius,
            color,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, corner_radius: CornerRadius, stroke: &Stroke, color: Color) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            corner_radius,
            stroke: *stroke,
            color,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: &Stroke, color: Color) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            stroke: *stroke,
            color,
        });
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn current_opacity(&self) -> f32 {
        self.opacity_stack.last().copied().unwrap_or(1.0)
    }
}
