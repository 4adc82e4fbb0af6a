//! Wave particles
//!
//! A wave is the visible unit of a pulse effect: one expanding circle or
//! rounded rectangle sweeping its radius/size and opacity envelopes as the
//! driven time parameter advances. One parameterized type covers every
//! shipped look; the render style picks between an outline pass, a fill
//! (with optional border stroke), and the clip-punched ring that reads as
//! an "indicator".

use pulse_core::{ClipShape, Color, CornerRadius, DrawSurface, Point, Rect, Size, Stroke};
use serde::{Deserialize, Serialize};

use crate::blend::BlendColor;
use crate::particle::Particle;

/// Wave silhouette
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    /// Expanding circle around the wave center
    #[default]
    Circle,
    /// Expanding rounded rectangle around the wave anchor
    Rectangle,
}

/// How a wave is painted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderStyle {
    /// Stroke only
    Outline,
    /// Fill, with an optional border stroke in a second color
    #[default]
    Filled,
    /// Punch the resting shape out of the fill, leaving a growing ring
    IndicatorClip,
}

/// One wave of a pulse effect
///
/// Field re-synchronization happens every tick from the owning effect, so
/// everything is plain public state; the behavior lives in [`init`],
/// [`drive`], [`is_alive`] and [`draw`].
///
/// [`init`]: WaveParticle::init
/// [`drive`]: WaveParticle::drive
/// [`is_alive`]: WaveParticle::is_alive
/// [`draw`]: WaveParticle::draw
#[derive(Clone, Debug)]
pub struct WaveParticle {
    /// Kinematic/opacity/lifetime state
    pub particle: Particle,
    pub shape: Shape,
    pub style: RenderStyle,

    /// Rectangle anchor: the fixed center the rounded rect grows around
    pub anchor: Point,
    /// Current rectangle size
    pub width: f32,
    pub height: f32,

    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub min_opacity: f32,
    pub max_opacity: f32,

    pub corner_radius: f32,
    pub stroke_width: f32,
    pub stroke_color: Option<BlendColor>,

    /// Radius of the punched-out circle for the indicator look
    pub clip_radius: f32,
    /// Always-drawn ring at the resting radius, independent of style
    pub inner_outline_color: Option<BlendColor>,
    pub inner_outline_width: f32,

    /// Color sweep endpoints; both present enables per-tick blending
    pub color_start: Option<BlendColor>,
    pub color_end: Option<BlendColor>,

    /// Shape punched out by the indicator style, built by `init`
    clip_shape: Option<ClipShape>,
}

impl Default for WaveParticle {
    fn default() -> Self {
        Self {
            particle: Particle::default(),
            shape: Shape::Circle,
            style: RenderStyle::Filled,
            anchor: Point::ZERO,
            width: 0.0,
            height: 0.0,
            min_width: 0.0,
            max_width: 0.0,
            min_height: 0.0,
            max_height: 0.0,
            min_radius: 0.0,
            max_radius: 0.0,
            min_opacity: 0.0,
            max_opacity: 1.0,
            corner_radius: 0.0,
            stroke_width: 0.0,
            stroke_color: None,
            clip_radius: 0.0,
            inner_outline_color: None,
            inner_outline_width: 0.0,
            color_start: None,
            color_end: None,
            clip_shape: None,
        }
    }
}

impl WaveParticle {
    /// Create a wave with a shape and render style
    pub fn new(shape: Shape, style: RenderStyle) -> Self {
        Self {
            shape,
            style,
            ..Default::default()
        }
    }

    /// Build the clip shape the indicator style punches out
    ///
    /// Circle waves punch a circle of `clip_radius` at the wave center;
    /// rectangle waves punch the resting `min_width × min_height` rounded
    /// rect at the anchor.
    pub fn init(&mut self) {
        self.clip_shape = Some(match self.shape {
            Shape::Circle => ClipShape::circle(self.particle.center, self.clip_radius),
            Shape::Rectangle => ClipShape::rounded_rect(
                Rect::from_center(self.anchor, Size::new(self.min_width, self.min_height)),
                self.corner_radius,
            ),
        });
    }

    /// The clip shape built by the last `init`
    pub fn clip_shape(&self) -> Option<ClipShape> {
        self.clip_shape
    }

    /// Advance geometry, opacity, and color as a function of normalized time
    pub fn drive(&mut self, _duration: f32, time: f32) {
        match self.shape {
            Shape::Circle => {
                self.particle.radius = self.min_radius + (self.max_radius - self.min_radius) * time;
            }
            Shape::Rectangle => {
                self.width = self.min_width + (self.max_width - self.min_width) * time;
                self.height = self.min_height + (self.max_height - self.min_height) * time;
            }
        }

        // The asymmetric fade the effect is known for: opacity falls away
        // from the envelope span as time advances, clamped into [0, 1].
        let span = self.max_opacity - self.min_opacity;
        self.particle.opacity = (self.min_opacity + span * (span - time)).clamp(0.0, 1.0);

        if let (Some(start), Some(end)) = (self.color_start, self.color_end) {
            BlendColor::interpolate(&start, &end, time, &mut self.particle.color);
        }
    }

    /// Whether the wave still has anything to show
    pub fn is_alive(&self) -> bool {
        (self.particle.opacity > 0.0
            && (self.particle.radius > 0.0 || self.width > 0.0 || self.height > 0.0))
            || self.particle.always_alive
    }

    /// The rounded rect the wave currently occupies
    fn frame(&self) -> Rect {
        Rect::from_center(self.anchor, Size::new(self.width, self.height))
    }

    /// Color with the wave's opacity written into the alpha channel
    fn shaded(&self, color: BlendColor) -> Color {
        let mut color = color;
        color.set_alpha_fraction(self.particle.opacity);
        color.to_color()
    }

    /// Paint the wave onto a drawing surface
    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        match self.style {
            RenderStyle::Filled => self.draw_filled(surface),
            RenderStyle::IndicatorClip => self.draw_indicator(surface),
            RenderStyle::Outline => self.draw_outline(surface),
        }

        if let Some(outline) = self.inner_outline_color {
            let stroke = Stroke::new(self.inner_outline_width);
            surface.stroke_circle(
                self.particle.center,
                self.min_radius,
                &stroke,
                outline.to_color(),
            );
        }
    }

    fn draw_filled(&self, surface: &mut dyn DrawSurface) {
        let fill = self.shaded(self.particle.color);

        match self.shape {
            Shape::Circle => {
                surface.fill_circle(self.particle.center, self.particle.radius, fill);

                if let Some(stroke_color) = self.stroke_color {
                    let stroke = Stroke::new(self.stroke_width);
                    surface.stroke_circle(
                        self.particle.center,
                        self.particle.radius,
                        &stroke,
                        self.shaded(stroke_color),
                    );
                }
            }
            Shape::Rectangle => {
                surface.fill_rect(self.frame(), CornerRadius::uniform(self.corner_radius), fill);
            }
        }
    }

    fn draw_outline(&self, surface: &mut dyn DrawSurface) {
        let color = self.shaded(self.particle.color);
        let stroke = Stroke::new(self.stroke_width);

        match self.shape {
            Shape::Circle => {
                surface.stroke_circle(self.particle.center, self.particle.radius, &stroke, color);
            }
            Shape::Rectangle => {
                surface.stroke_rect(
                    self.frame(),
                    CornerRadius::uniform(self.corner_radius),
                    &stroke,
                    color,
                );
            }
        }
    }

    fn draw_indicator(&self, surface: &mut dyn DrawSurface) {
        let Some(clip) = self.clip_shape else {
            // Not initialized; nothing sensible to punch out.
            return;
        };

        surface.push_clip_out(clip);

        let fill = self.shaded(self.particle.color);
        match self.shape {
            Shape::Circle => {
                surface.fill_circle(self.particle.center, self.particle.radius, fill);

                if let Some(stroke_color) = self.stroke_color {
                    let stroke = Stroke::new(self.stroke_width);
                    surface.stroke_circle(
                        self.particle.center,
                        self.particle.radius,
                        &stroke,
                        self.shaded(stroke_color),
                    );
                }
            }
            Shape::Rectangle => {
                surface.fill_rect(self.frame(), CornerRadius::uniform(self.corner_radius), fill);
            }
        }

        surface.pop_clip();
    }
}
