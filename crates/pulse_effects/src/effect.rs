//! Effect orchestration
//!
//! A `PulseEffect` owns a fixed array of wave slots, one staggered cycle
//! clock per slot, and the reveal/conceal lifecycle around them. The host
//! supplies frame deltas (`advance`) and a drawing surface (`paint`); the
//! effect supplies everything in between.
//!
//! Per frame, every active wave is re-synchronized from the live
//! configuration before being driven, so configuration changes take hold
//! mid-flight without re-seeding. Waves render in slot order, so
//! same-position overlaps resolve back-to-front deterministically.

use pulse_animation::{stagger_delays, CycleClock, FadeTransition};
use pulse_core::{Color, CornerRadius, DrawSurface, Point, Rect};

use crate::blend::BlendColor;
use crate::config::{EffectConfig, TargetAnchor, TargetRatios};
use crate::error::Result;
use crate::wave::WaveParticle;

/// Lifecycle state of an effect
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EffectState {
    /// Not animating; paints nothing visible
    #[default]
    Idle,
    /// Clocks are advancing
    Running,
    /// Fading out before going idle
    Concealing,
}

type LifecycleCallback = Box<dyn FnMut()>;

/// An animated wave effect anchored to a host-supplied position
pub struct PulseEffect {
    config: EffectConfig,
    /// Wave center (and rectangle anchor) in host coordinates
    origin: Point,
    /// Canonical culling bounds shared by every wave
    bounds: Option<Rect>,
    base_color: BlendColor,

    waves: Vec<Option<WaveParticle>>,
    clocks: Vec<CycleClock>,

    state: EffectState,
    canvas_alpha: f32,
    fade: Option<FadeTransition>,
    interval_remaining_ms: f32,

    on_start: Option<LifecycleCallback>,
    on_end: Option<LifecycleCallback>,
}

impl PulseEffect {
    /// Create an effect from a validated configuration
    pub fn new(config: EffectConfig) -> Result<Self> {
        config.validate()?;

        let mut effect = Self {
            base_color: BlendColor::from_color(config.color),
            config,
            origin: Point::ZERO,
            bounds: None,
            waves: Vec::new(),
            clocks: Vec::new(),
            state: EffectState::Idle,
            canvas_alpha: 0.0,
            fade: None,
            interval_remaining_ms: 0.0,
            on_start: None,
            on_end: None,
        };
        effect.seed_waves();
        Ok(effect)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Placement
    // ─────────────────────────────────────────────────────────────────────

    /// Anchor the effect to a target element using the default ratios
    pub fn attach_to_target(&mut self, anchor: TargetAnchor) {
        self.attach_to_target_with_ratios(anchor, TargetRatios::default());
    }

    /// Anchor the effect to a target element
    ///
    /// Derives the size/radius envelopes from the target bounds and
    /// re-seeds the waves. The host has already transformed the anchor
    /// into final coordinates; no offset walking happens here.
    pub fn attach_to_target_with_ratios(&mut self, anchor: TargetAnchor, ratios: TargetRatios) {
        tracing::debug!(center = ?anchor.center, size = ?anchor.size, "attaching effect to target");
        self.origin = anchor.center;
        self.config.apply_target(&anchor, &ratios);
        self.seed_waves();

        if self.config.auto_start {
            self.start();
        }
    }

    /// Place the effect center directly
    ///
    /// Live waves pick the new origin up on their next tick; the punched
    /// clip shape follows on the next `start`.
    pub fn set_position(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Set the canonical culling bounds shared by every wave
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = Some(bounds);
        for wave in self.waves.iter_mut().flatten() {
            wave.particle.bounds = Some(bounds);
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────

    /// Start (or restart) the wave animation
    pub fn start(&mut self) {
        tracing::debug!(
            count = self.config.count,
            duration_ms = self.config.duration_ms,
            "starting pulse effect"
        );
        self.seed_waves();
        self.canvas_alpha = 0.0;
        self.fade = None;
        self.interval_remaining_ms = self.config.interval_delay_ms as f32;
        self.state = EffectState::Running;
    }

    /// Wind down with the configured conceal duration
    pub fn stop(&mut self) {
        self.stop_with_fade(self.config.conceal_duration_ms);
    }

    /// Wind down with an explicit fade-out duration
    pub fn stop_with_fade(&mut self, duration_ms: u32) {
        if self.state != EffectState::Running {
            return;
        }
        tracing::debug!(duration_ms, "stopping pulse effect");
        self.begin_conceal(duration_ms);
    }

    /// Whether the effect is animating or winding down
    pub fn is_running(&self) -> bool {
        self.state != EffectState::Idle
    }

    pub fn state(&self) -> EffectState {
        self.state
    }

    /// The whole-canvas alpha the reveal/conceal ramp is at
    pub fn canvas_alpha(&self) -> f32 {
        self.canvas_alpha
    }

    /// Invoked when the first wave starts revealing
    pub fn on_start(&mut self, callback: impl FnMut() + 'static) {
        self.on_start = Some(Box::new(callback));
    }

    /// Invoked once the conceal fade completes
    pub fn on_end(&mut self, callback: impl FnMut() + 'static) {
        self.on_end = Some(Box::new(callback));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Configuration
    // ─────────────────────────────────────────────────────────────────────

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    /// Replace the whole configuration, re-validating and re-seeding
    pub fn set_config(&mut self, config: EffectConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.seed_waves();
        Ok(())
    }

    /// Change the base wave color in place
    pub fn set_color(&mut self, color: Color) {
        self.config.color = color;
        self.base_color = BlendColor::from_color(color);
    }

    /// Change the wave count, re-seeding slots and clocks
    pub fn set_count(&mut self, count: u32) -> Result<()> {
        if count == self.config.count {
            return Ok(());
        }
        let mut config = self.config.clone();
        config.count = count;
        self.set_config(config)
    }

    /// Change the cycle duration, re-seeding the stagger spread
    pub fn set_duration_ms(&mut self, duration_ms: u32) -> Result<()> {
        let mut config = self.config.clone();
        config.duration_ms = duration_ms;
        self.set_config(config)
    }

    /// The live waves, in render order
    pub fn waves(&self) -> impl Iterator<Item = &WaveParticle> {
        self.waves.iter().flatten()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Frame advance & painting
    // ─────────────────────────────────────────────────────────────────────

    /// Advance the effect by a frame delta
    pub fn advance(&mut self, dt_ms: f32) {
        if self.state == EffectState::Idle {
            return;
        }

        let mut dt_ms = dt_ms.max(0.0);

        // Whole-wave start delay; spill leftover time into this frame.
        if self.interval_remaining_ms > 0.0 {
            if dt_ms < self.interval_remaining_ms {
                self.interval_remaining_ms -= dt_ms;
                return;
            }
            dt_ms -= self.interval_remaining_ms;
            self.interval_remaining_ms = 0.0;
        }

        if let Some(fade) = &mut self.fade {
            self.canvas_alpha = fade.advance(dt_ms);
            if fade.is_complete() {
                self.fade = None;
                if self.state == EffectState::Concealing {
                    self.finish();
                    return;
                }
            }
        }

        let duration = self.config.duration_ms as f32;
        let count = self.clocks.len();
        let mut last_finished = false;

        for i in 0..count {
            let tick = self.clocks[i].advance(dt_ms);

            if tick.just_started && i == 0 {
                self.begin_reveal();
            }

            if let Some(t) = tick.value {
                let eased = self.config.easing.apply(t);
                if let Some(wave) = self.waves[i].as_mut() {
                    sync_wave(&self.config, self.origin, self.bounds, self.base_color, wave);
                    wave.drive(duration, eased);
                }
                if self.waves[i].as_ref().is_some_and(|wave| !wave.is_alive()) {
                    self.waves[i] = None;
                }
            }

            if tick.just_finished && i == count - 1 {
                last_finished = true;
            }
        }

        if last_finished && self.state == EffectState::Running {
            self.begin_conceal(self.config.conceal_duration_ms);
        }
    }

    /// Paint the current frame in slot order
    pub fn paint(&self, surface: &mut dyn DrawSurface) {
        surface.push_opacity(self.canvas_alpha);

        if let Some(background) = self.config.background {
            let viewport = surface.viewport_size();
            surface.fill_rect(
                Rect::from_origin_size(Point::ZERO, viewport),
                CornerRadius::ZERO,
                background,
            );
        }

        for wave in self.waves.iter().flatten() {
            wave.draw(surface);
        }

        surface.pop_opacity();
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────

    fn seed_waves(&mut self) {
        self.base_color = BlendColor::from_color(self.config.color);
        self.waves.clear();
        self.clocks.clear();

        for delay in stagger_delays(self.config.duration_ms, self.config.count) {
            let mut wave = WaveParticle::new(self.config.shape, self.config.style);
            sync_wave(&self.config, self.origin, self.bounds, self.base_color, &mut wave);
            wave.particle.visible = true;
            // Continuous-repeat waves outlive their geometry; removal is the
            // orchestrator's call, not the particle's.
            wave.particle.always_alive = true;
            wave.init();
            self.waves.push(Some(wave));

            self.clocks.push(
                CycleClock::new(self.config.duration_ms, delay)
                    .with_repeat(self.config.repeat)
                    .with_repeat_mode(self.config.repeat_mode),
            );
        }
    }

    fn begin_reveal(&mut self) {
        tracing::debug!(
            duration_ms = self.config.reveal_duration_ms,
            "revealing pulse effect"
        );

        if self.config.reveal_duration_ms == 0 {
            self.canvas_alpha = 1.0;
        } else {
            self.fade = Some(FadeTransition::reveal(self.config.reveal_duration_ms));
        }

        if let Some(callback) = self.on_start.as_mut() {
            callback();
        }
    }

    fn begin_conceal(&mut self, duration_ms: u32) {
        if duration_ms == 0 {
            self.finish();
            return;
        }
        self.state = EffectState::Concealing;
        self.fade = Some(FadeTransition::conceal(duration_ms));
    }

    fn finish(&mut self) {
        tracing::debug!("pulse effect finished");
        self.state = EffectState::Idle;
        self.canvas_alpha = 0.0;
        self.fade = None;
        for clock in &mut self.clocks {
            clock.reset();
        }
        if let Some(callback) = self.on_end.as_mut() {
            callback();
        }
    }
}

/// Copy the live configuration into a wave; runs before every driven tick
/// so setter changes land without re-seeding
fn sync_wave(
    config: &EffectConfig,
    origin: Point,
    bounds: Option<Rect>,
    base_color: BlendColor,
    wave: &mut WaveParticle,
) {
    wave.shape = config.shape;
    wave.style = config.style;

    wave.min_opacity = config.min_opacity;
    wave.max_opacity = config.max_opacity;
    wave.min_radius = config.min_radius;
    wave.max_radius = config.max_radius;
    wave.min_width = config.min_width;
    wave.max_width = config.max_width;
    wave.min_height = config.min_height;
    wave.max_height = config.max_height;

    wave.corner_radius = config.corner_radius;
    wave.stroke_width = config.stroke_width;
    wave.stroke_color = config.stroke_color.map(BlendColor::from_color);
    wave.clip_radius = config.clip_radius;
    wave.inner_outline_width = config.inner_outline_width;
    wave.inner_outline_color = config.inner_outline_color.map(BlendColor::from_color);

    let sweep_active = config.color_start.is_some() && config.color_end.is_some();
    wave.color_start = config.color_start.map(BlendColor::from_color);
    wave.color_end = config.color_end.map(BlendColor::from_color);
    if !sweep_active {
        wave.particle.color = base_color;
    }

    wave.anchor = origin;
    wave.particle.center = origin;
    wave.particle.bounds = bounds;
    wave.particle.check_bounds = config.check_bounds;
}
