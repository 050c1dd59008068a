//! Declarative animation timelines.
//!
//! A [`Timeline`] is plain data: an ordered list of steps the platform's
//! animation engine plays back one after another. Each step starts when the
//! previous one finishes (plus its own delay). Nothing here drives time.

use std::time::Duration;

/// Duration of a tween that does not set one.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(500);

/// Easing curve, named as the animation engine expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    Power2InOut,
    SineInOut,
}

impl Ease {
    pub fn name(self) -> &'static str {
        match self {
            Ease::Power2InOut => "power2.inOut",
            Ease::SineInOut => "sine.inOut",
        }
    }
}

/// An animatable property and its target value.
#[derive(Debug, Clone, PartialEq)]
pub enum Prop {
    Opacity(f64),
    /// Vertical translation in pixels.
    TranslateY(f64),
    /// Rotation around the X axis in degrees.
    RotateX(f64),
    ZIndex(i32),
    /// CSS length, e.g. `10vh`.
    Height(String),
}

/// A property animation over time.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween<N> {
    pub targets: Vec<N>,
    pub props: Vec<Prop>,
    pub duration: Duration,
    pub delay: Duration,
    /// `None` uses the timeline's default ease.
    pub ease: Option<Ease>,
}

impl<N> Tween<N> {
    pub fn new(targets: Vec<N>, props: Vec<Prop>) -> Self {
        Self {
            targets,
            props,
            duration: DEFAULT_DURATION,
            delay: Duration::ZERO,
            ease: None,
        }
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step<N> {
    /// Apply props instantly.
    Set { targets: Vec<N>, props: Vec<Prop> },
    Tween(Tween<N>),
    /// Remove a class from an element when playback reaches this point.
    RemoveClass { target: N, class: &'static str },
}

/// An ordered sequence of animation steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline<N> {
    pub default_ease: Ease,
    pub steps: Vec<Step<N>>,
}

impl<N> Timeline<N> {
    pub fn new(default_ease: Ease) -> Self {
        Self {
            default_ease,
            steps: Vec::new(),
        }
    }

    pub fn set(&mut self, targets: Vec<N>, props: Vec<Prop>) -> &mut Self {
        self.steps.push(Step::Set { targets, props });
        self
    }

    pub fn to(&mut self, tween: Tween<N>) -> &mut Self {
        self.steps.push(Step::Tween(tween));
        self
    }

    pub fn remove_class(&mut self, target: N, class: &'static str) -> &mut Self {
        self.steps.push(Step::RemoveClass { target, class });
        self
    }

    /// Ease a tween step actually plays with.
    pub fn effective_ease(&self, tween: &Tween<N>) -> Ease {
        tween.ease.unwrap_or(self.default_ease)
    }

    /// Total playback time: every step runs after the previous one.
    pub fn total_duration(&self) -> Duration {
        self.steps
            .iter()
            .map(|step| match step {
                Step::Tween(t) => t.delay + t.duration,
                Step::Set { .. } | Step::RemoveClass { .. } => Duration::ZERO,
            })
            .sum()
    }
}
