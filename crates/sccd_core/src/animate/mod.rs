//! Animation capability used by binders.
//!
//! # Responsibility
//! - Define the `Animator` seam: set a property now, or tween it over time.
//! - Map animated properties onto inline style of document nodes.
//!
//! # Invariants
//! - Binders never ask whether animation is available; they always call the
//!   animator, and `InstantAnimator` degrades every tween to direct style
//!   assignment.
//! - A new tween on the same node and property replaces the running one;
//!   the replaced tween's completion never runs.
//! - Completions run after the final value has been written.

pub mod instant;
pub mod tween;

use crate::dom::{Document, NodeId};
use std::fmt::{Debug, Formatter};

pub use instant::InstantAnimator;
pub use tween::TweenAnimator;

/// Callback run when a tween finishes.
pub type Completion = Box<dyn FnOnce(&mut Document, &dyn Animator)>;

/// Animatable properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenProp {
    Height,
    Opacity,
    FlexGrow,
    Rotation,
    TranslateX,
}

impl TweenProp {
    /// Inline style property this maps onto.
    pub fn style_name(self) -> &'static str {
        match self {
            Self::Height => "height",
            Self::Opacity => "opacity",
            Self::FlexGrow => "flex-grow",
            Self::Rotation | Self::TranslateX => "transform",
        }
    }
}

/// Property values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenValue {
    Px(f64),
    Number(f64),
    Percent(f64),
    Deg(f64),
    /// Natural size; cannot be interpolated, switches at completion.
    Auto,
}

impl TweenValue {
    pub fn magnitude(self) -> Option<f64> {
        match self {
            Self::Px(value) | Self::Number(value) | Self::Percent(value) | Self::Deg(value) => {
                Some(value)
            }
            Self::Auto => None,
        }
    }

    fn with_magnitude(self, value: f64) -> Self {
        match self {
            Self::Px(_) => Self::Px(value),
            Self::Number(_) => Self::Number(value),
            Self::Percent(_) => Self::Percent(value),
            Self::Deg(_) => Self::Deg(value),
            Self::Auto => Self::Auto,
        }
    }

    /// Value between `self` and `to` at eased progress `t`.
    pub fn lerp(self, to: TweenValue, t: f64) -> TweenValue {
        match (self.magnitude(), to.magnitude()) {
            (Some(from), Some(target)) => to.with_magnitude(from + (target - from) * t),
            _ if t >= 1.0 => to,
            _ => self,
        }
    }
}

/// Easing curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    Linear,
    Power2In,
    Power2Out,
    Power2InOut,
    Power3In,
    Power3Out,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power2In => t.powi(3),
            Self::Power2Out => 1.0 - (1.0 - t).powi(3),
            Self::Power2InOut => {
                if t < 0.5 {
                    4.0 * t.powi(3)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Self::Power3In => t.powi(4),
            Self::Power3Out => 1.0 - (1.0 - t).powi(4),
        }
    }
}

/// One timed property change.
pub struct Tween {
    pub target: NodeId,
    pub prop: TweenProp,
    pub to: TweenValue,
    pub duration_ms: u64,
    pub delay_ms: u64,
    pub ease: Ease,
    pub on_complete: Option<Completion>,
}

impl Debug for Tween {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tween")
            .field("target", &self.target)
            .field("prop", &self.prop)
            .field("to", &self.to)
            .field("duration_ms", &self.duration_ms)
            .field("delay_ms", &self.delay_ms)
            .field("ease", &self.ease)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl Tween {
    pub fn new(target: NodeId, prop: TweenProp, to: TweenValue, duration_ms: u64) -> Self {
        Self {
            target,
            prop,
            to,
            duration_ms,
            delay_ms: 0,
            ease: Ease::Power2Out,
            on_complete: None,
        }
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn on_complete<F>(mut self, done: F) -> Self
    where
        F: FnOnce(&mut Document, &dyn Animator) + 'static,
    {
        self.on_complete = Some(Box::new(done));
        self
    }
}

/// Animation capability.
pub trait Animator {
    /// Writes a property immediately, cancelling running tweens on it.
    fn set(&self, doc: &mut Document, target: NodeId, prop: TweenProp, value: TweenValue);

    /// Starts a tween. Non-blocking.
    fn to(&self, doc: &mut Document, tween: Tween);

    /// Drops every running tween on `target` without running completions.
    fn kill_tweens_of(&self, target: NodeId);

    /// Moves the clock forward by `elapsed_ms`.
    fn advance(&self, doc: &mut Document, elapsed_ms: u64);

    /// Number of tweens still running.
    fn active_tweens(&self) -> usize;

    fn is_idle(&self) -> bool {
        self.active_tweens() == 0
    }
}

/// Writes `value` for `prop` into the inline style of `target`.
pub fn apply_value(doc: &mut Document, target: NodeId, prop: TweenProp, value: TweenValue) {
    let css = match (prop, value) {
        (_, TweenValue::Auto) => "auto".to_string(),
        (TweenProp::Rotation, value) => format!("rotate({})", css_number(value)),
        (TweenProp::TranslateX, value) => format!("translateX({})", css_number(value)),
        (_, value) => css_number(value),
    };
    doc.set_style(target, prop.style_name(), css);
}

/// Reads the current value of `prop` from inline style, if it parses.
pub fn read_value(doc: &Document, target: NodeId, prop: TweenProp) -> Option<TweenValue> {
    let raw = doc.style(target, prop.style_name())?.trim();
    if raw == "auto" {
        return Some(TweenValue::Auto);
    }
    let inner = match prop {
        TweenProp::Rotation => raw.strip_prefix("rotate(")?.strip_suffix(')')?,
        TweenProp::TranslateX => raw.strip_prefix("translateX(")?.strip_suffix(')')?,
        _ => raw,
    };
    parse_css_value(inner)
}

fn parse_css_value(raw: &str) -> Option<TweenValue> {
    let raw = raw.trim();
    if let Some(number) = raw.strip_suffix("px") {
        return number.trim().parse().ok().map(TweenValue::Px);
    }
    if let Some(number) = raw.strip_suffix('%') {
        return number.trim().parse().ok().map(TweenValue::Percent);
    }
    if let Some(number) = raw.strip_suffix("deg") {
        return number.trim().parse().ok().map(TweenValue::Deg);
    }
    raw.parse().ok().map(TweenValue::Number)
}

fn css_number(value: TweenValue) -> String {
    let suffix = match value {
        TweenValue::Px(_) => "px",
        TweenValue::Percent(_) => "%",
        TweenValue::Deg(_) => "deg",
        TweenValue::Number(_) | TweenValue::Auto => "",
    };
    format!("{}{suffix}", format_number(value.magnitude().unwrap_or(0.0)))
}

fn format_number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}
