//! Attribute producers.
//!
//! A producer yields one attribute value per frame. It is either constant
//! or a recurrence `next = f(previous)`; either way it keeps the value it
//! produced last. [`Producer::advance`] is the only thing that moves it
//! forward, and a draw calls it exactly once per configured attribute.

use std::fmt;

use scm_shared::{Vec2, MAX_CHANNEL};

use crate::error::UiError;
use crate::layout::Dimension;
use crate::style::{ColorSpec, Palette, Rgba};

/// How a producer computes its next value.
enum Kind<T> {
    Constant(T),
    Recurrence(Box<dyn FnMut(T) -> T>),
}

/// A per-frame value with memory of its previous output.
pub struct Producer<T> {
    kind: Kind<T>,
    last: T,
}

impl<T: Copy> Producer<T> {
    /// A producer that yields `value` forever.
    #[must_use]
    pub fn constant(value: T) -> Self {
        Self {
            kind: Kind::Constant(value),
            last: value,
        }
    }

    /// A producer that yields `f(seed)`, then `f(f(seed))`, and so on.
    #[must_use]
    pub fn recurrence(seed: T, f: impl FnMut(T) -> T + 'static) -> Self {
        Self {
            kind: Kind::Recurrence(Box::new(f)),
            last: seed,
        }
    }

    /// Computes and remembers the next value.
    pub fn advance(&mut self) -> T {
        let next = match &mut self.kind {
            Kind::Constant(value) => *value,
            Kind::Recurrence(f) => f(self.last),
        };
        self.last = next;
        next
    }

    /// The value produced by the last [`Self::advance`], or the seed.
    #[inline]
    #[must_use]
    pub fn last(&self) -> T {
        self.last
    }

    /// Whether the producer depends on its own history.
    #[inline]
    #[must_use]
    pub fn is_recurrent(&self) -> bool {
        matches!(self.kind, Kind::Recurrence(_))
    }
}

impl<T: fmt::Debug> fmt::Debug for Producer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            Kind::Constant(_) => "Constant",
            Kind::Recurrence(_) => "Recurrence",
        };
        f.debug_struct("Producer")
            .field("kind", &kind)
            .field("last", &self.last)
            .finish()
    }
}

/// Foreground or background colour.
///
/// Named and hex colours are resolved the first time the producer runs, so
/// a typo in a colour name surfaces on the first draw.
#[derive(Debug)]
pub struct ColorProducer {
    /// Configured colour not yet resolved.
    pending: Option<ColorSpec>,
    values: Producer<Rgba>,
}

impl ColorProducer {
    /// A constant colour from any [`ColorSpec`].
    #[must_use]
    pub fn fixed(spec: impl Into<ColorSpec>) -> Self {
        Self {
            pending: Some(spec.into()),
            values: Producer::constant(Rgba::WHITE),
        }
    }

    /// A colour recurrence over the four channels, seeded at white.
    #[must_use]
    pub fn recurrence(mut f: impl FnMut(u8, u8, u8, u8) -> (u8, u8, u8, u8) + 'static) -> Self {
        Self {
            pending: None,
            values: Producer::recurrence(Rgba::WHITE, move |c: Rgba| {
                f(c.r, c.g, c.b, c.a).into()
            }),
        }
    }

    /// Resolves a configured name or hex string without advancing.
    ///
    /// # Errors
    ///
    /// [`UiError::UnknownColorName`] or [`UiError::InvalidHexColor`] if the
    /// colour does not resolve. The producer stays unresolved and fails
    /// again on the next call.
    pub fn resolve(&mut self, palette: &Palette) -> Result<(), UiError> {
        if let Some(spec) = &self.pending {
            let color = match spec {
                ColorSpec::Rgba(color) => *color,
                ColorSpec::Named(name) => palette.resolve(name)?,
                ColorSpec::Hex(hex) => Rgba::parse_hex(hex)?,
            };
            self.values = Producer::constant(color);
            self.pending = None;
        }
        Ok(())
    }

    /// Produces this frame's colour.
    ///
    /// # Errors
    ///
    /// Same as [`Self::resolve`].
    pub fn advance(&mut self, palette: &Palette) -> Result<Rgba, UiError> {
        self.resolve(palette)?;
        Ok(self.values.advance())
    }
}

/// Alpha override applied on top of the foreground colour.
#[derive(Debug)]
pub enum OpacityProducer {
    /// Scales the colour's own alpha; `0.5` halves it.
    Ratio(f32),
    /// Recurrence over the previous resolved alpha, seeded at 255.
    Alpha(Producer<u8>),
}

impl OpacityProducer {
    /// Alpha recurrence seeded at fully opaque.
    #[must_use]
    pub fn recurrence(f: impl FnMut(u8) -> u8 + 'static) -> Self {
        Self::Alpha(Producer::recurrence(MAX_CHANNEL, f))
    }

    /// Replaces the alpha channel of `color`.
    pub fn apply(&mut self, color: Rgba) -> Rgba {
        let alpha = match self {
            Self::Ratio(ratio) => scale_channel(color.a, *ratio),
            Self::Alpha(producer) => producer.advance(),
        };
        color.with_alpha(alpha)
    }
}

/// `channel * ratio`, rounded and clamped to a byte.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale_channel(channel: u8, ratio: f32) -> u8 {
    (f32::from(channel) * ratio)
        .round()
        .clamp(0.0, f32::from(MAX_CHANNEL)) as u8
}

/// One axis of a position or scale.
#[derive(Debug)]
pub enum AxisProducer {
    /// Fixed value or percentage of the screen, resolved every frame.
    Fixed(Dimension),
    /// Recurrence over the previous resolved value.
    Values(Producer<f32>),
}

impl AxisProducer {
    /// Recurrence seeded at zero.
    #[must_use]
    pub fn recurrence(f: impl FnMut(f32) -> f32 + 'static) -> Self {
        Self::Values(Producer::recurrence(0.0, f))
    }

    /// Produces this frame's value; `reference` is the matching screen size.
    pub fn advance(&mut self, reference: f32) -> f32 {
        match self {
            Self::Fixed(dimension) => dimension.resolve(reference),
            Self::Values(producer) => producer.advance(),
        }
    }
}

impl From<Dimension> for AxisProducer {
    fn from(dimension: Dimension) -> Self {
        Self::Fixed(dimension)
    }
}

/// A position or scale: two independent axes, or one joint recurrence.
#[derive(Debug)]
pub enum VecProducer {
    /// x against screen width, y against screen height.
    Axes {
        /// Horizontal axis.
        x: AxisProducer,
        /// Vertical axis.
        y: AxisProducer,
    },
    /// `(x, y) = f(prev_x, prev_y)`, seeded at `(0, 0)`.
    Joint(Producer<Vec2>),
}

impl VecProducer {
    /// Both axes fixed.
    #[must_use]
    pub fn fixed(x: f32, y: f32) -> Self {
        Self::Axes {
            x: AxisProducer::Fixed(Dimension::Fixed(x)),
            y: AxisProducer::Fixed(Dimension::Fixed(y)),
        }
    }

    /// Joint recurrence seeded at the origin.
    #[must_use]
    pub fn joint(mut f: impl FnMut(f32, f32) -> (f32, f32) + 'static) -> Self {
        Self::Joint(Producer::recurrence(Vec2::ZERO, move |v: Vec2| {
            f(v.x, v.y).into()
        }))
    }

    /// Replaces the x axis. A joint recurrence is split, freezing y at its
    /// last value.
    pub fn set_x(&mut self, axis: AxisProducer) {
        match self {
            Self::Axes { x, .. } => *x = axis,
            Self::Joint(producer) => {
                let y = producer.last().y;
                *self = Self::Axes {
                    x: axis,
                    y: AxisProducer::Fixed(Dimension::Fixed(y)),
                };
            }
        }
    }

    /// Replaces the y axis. A joint recurrence is split, freezing x at its
    /// last value.
    pub fn set_y(&mut self, axis: AxisProducer) {
        match self {
            Self::Axes { y, .. } => *y = axis,
            Self::Joint(producer) => {
                let x = producer.last().x;
                *self = Self::Axes {
                    x: AxisProducer::Fixed(Dimension::Fixed(x)),
                    y: axis,
                };
            }
        }
    }

    /// Produces this frame's vector.
    pub fn advance(&mut self, screen: Vec2) -> Vec2 {
        match self {
            Self::Axes { x, y } => Vec2::new(x.advance(screen.x), y.advance(screen.y)),
            Self::Joint(producer) => producer.advance(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Vec2 = Vec2::new(640.0, 448.0);

    #[test]
    fn test_constant_ignores_history() {
        let mut p = Producer::constant(7);
        assert!(!p.is_recurrent());
        assert_eq!((p.advance(), p.advance()), (7, 7));
    }

    #[test]
    fn test_recurrence_advances_once_per_call() {
        let mut p = Producer::recurrence(0, |prev| prev + 1);
        assert!(p.is_recurrent());
        assert_eq!(p.last(), 0);
        assert_eq!(p.advance(), 1);
        assert_eq!(p.advance(), 2);
        assert_eq!(p.last(), 2);
    }

    #[test]
    fn test_color_recurrence_seeded_white() {
        let mut c = ColorProducer::recurrence(|r, g, b, a| (r, g.saturating_sub(5), b / 2, a));
        let palette = Palette::standard();
        assert_eq!(c.advance(&palette).unwrap(), Rgba::new(255, 250, 127, 255));
        assert_eq!(c.advance(&palette).unwrap(), Rgba::new(255, 245, 63, 255));
    }

    #[test]
    fn test_unknown_name_fails_on_every_run() {
        let mut c = ColorProducer::fixed("ultraviolet");
        let palette = Palette::standard();
        assert_eq!(
            c.advance(&palette),
            Err(UiError::UnknownColorName("ultraviolet".into()))
        );
        assert!(c.advance(&palette).is_err());
    }

    #[test]
    fn test_opacity_ratio_scales_color_alpha() {
        let mut o = OpacityProducer::Ratio(0.5);
        assert_eq!(o.apply(Rgba::new(255, 0, 0, 128)), Rgba::new(255, 0, 0, 64));
        assert_eq!(o.apply(Rgba::WHITE).a, 128);
        assert_eq!(OpacityProducer::Ratio(3.0).apply(Rgba::WHITE).a, 255);
        assert_eq!(OpacityProducer::Ratio(-1.0).apply(Rgba::WHITE).a, 0);
    }

    #[test]
    fn test_opacity_recurrence_overrides_alpha() {
        let mut o = OpacityProducer::recurrence(|a| a.saturating_sub(100));
        assert_eq!(o.apply(Rgba::BLACK).a, 155);
        assert_eq!(o.apply(Rgba::BLACK).a, 55);
        assert_eq!(o.apply(Rgba::BLACK).a, 0);
    }

    #[test]
    fn test_axes_resolve_percentages_per_axis() {
        let mut v = VecProducer::Axes {
            x: Dimension::Percent(50.0).into(),
            y: Dimension::Percent(50.0).into(),
        };
        assert_eq!(v.advance(SCREEN), Vec2::new(320.0, 224.0));
    }

    #[test]
    fn test_joint_then_split() {
        let mut v = VecProducer::joint(|x, y| (x + 1.0, y + 2.0));
        assert_eq!(v.advance(SCREEN), Vec2::new(1.0, 2.0));
        assert_eq!(v.advance(SCREEN), Vec2::new(2.0, 4.0));

        v.set_x(AxisProducer::recurrence(|x| x - 1.0));
        assert_eq!(v.advance(SCREEN), Vec2::new(-1.0, 4.0));
        assert_eq!(v.advance(SCREEN), Vec2::new(-2.0, 4.0));
    }
}
