//! The sixteen micro-games and the capability they share with the flow controller.
//!
//! Every minigame owns its state outright. It sees the outside world only
//! through [`MiniCtx`] (audio, randomness, phase time) and normalized
//! [`MiniEvent`]s, and draws into a field where `(0, 0)` is the top-left of
//! the play area and `(1, 1)` the bottom-right.

pub mod bureau;
pub mod checklist;
pub mod cloud;
pub mod concepts;
pub mod constellation;
pub mod dog;
pub mod ego;
pub mod endless;
pub mod face;
pub mod legal;
pub mod loading;
pub mod monty;
pub mod motivation;
pub mod noise;
pub mod sausage;
pub mod spaghetti;

use rand_pcg::Pcg32;
use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::symbols::Marker;
use ratzilla::ratatui::text::Span;
use ratzilla::ratatui::widgets::canvas::{Canvas, Context};
use ratzilla::ratatui::Frame;

use crate::audio::AudioBank;
use crate::input::Key;

/// Milliseconds covered by one `tick`.
pub const TICK_MS: f64 = 1000.0 / crate::config::TICKS_PER_SEC as f64;

/// A pointer position in play-area coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn inside(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }

    pub fn dist(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Input as a minigame sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MiniEvent {
    PointerDown(Point),
    PointerUp(Point),
    PointerMove(Point),
    Key(Key),
}

/// Everything a minigame may touch besides its own state.
pub struct MiniCtx<'a> {
    pub audio: &'a mut dyn AudioBank,
    pub rng: &'a mut Pcg32,
    /// Milliseconds since this minigame entered `Playing`.
    pub elapsed_ms: f64,
}

/// One resettable, renderable micro-game.
pub trait Minigame {
    /// Return to a fresh playable configuration. Safe to call repeatedly.
    fn reset(&mut self, ctx: &mut MiniCtx);

    /// React to one event. Returns whether the event changed anything.
    fn handle_input(&mut self, event: &MiniEvent, ctx: &mut MiniCtx) -> bool;

    /// Advance motion by one fixed step of [`TICK_MS`].
    fn tick(&mut self, _ctx: &mut MiniCtx) {}

    fn render(&self, f: &mut Frame, area: Rect, elapsed_ms: f64);
}

/// Field y grows downward; canvas y grows upward.
pub fn up(y: f64) -> f64 {
    1.0 - y
}

/// A braille canvas spanning the unit field.
pub fn field<F>(background: Color, painter: F) -> Canvas<'static, F>
where
    F: Fn(&mut Context),
{
    Canvas::default()
        .marker(Marker::Braille)
        .background_color(background)
        .x_bounds([0.0, 1.0])
        .y_bounds([0.0, 1.0])
        .paint(painter)
}

/// Print `text` horizontally centred on field x = 0.5 at field height `y`.
pub fn print_centered(ctx: &mut Context, cols: u16, y: f64, text: impl Into<String>, style: Style) {
    print_centered_at(ctx, cols, 0.5, y, text, style);
}

/// Print `text` horizontally centred on field x = `x`.
pub fn print_centered_at(
    ctx: &mut Context,
    cols: u16,
    x: f64,
    y: f64,
    text: impl Into<String>,
    style: Style,
) {
    let text = text.into();
    let half = text.chars().count() as f64 / 2.0 / cols.max(1) as f64;
    ctx.print((x - half).max(0.0), up(y), Span::styled(text, style));
}

/// Blink helper: on for `on_ms` out of every `period_ms`.
pub fn blink(elapsed_ms: f64, period_ms: f64, on_ms: f64) -> bool {
    elapsed_ms.rem_euclid(period_ms) < on_ms
}

/// Linear interpolation.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Cycling colour used by the glitchy visuals.
pub fn wobble_color(elapsed_ms: f64, speed: f64) -> Color {
    let t = elapsed_ms / 1000.0 * speed;
    let ch = |phase: f64| (180.0 + 75.0 * (t + phase).sin()).clamp(0.0, 255.0) as u8;
    Color::Rgb(ch(0.0), ch(1.7), ch(0.6))
}

#[cfg(test)]
pub mod testing {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::MiniCtx;
    use crate::audio::MemoryAudioBank;

    /// Owns what a `MiniCtx` borrows.
    pub struct Harness {
        pub audio: MemoryAudioBank,
        pub rng: Pcg32,
        pub elapsed_ms: f64,
    }

    impl Harness {
        pub fn new(seed: u64) -> Self {
            Self {
                audio: MemoryAudioBank::default(),
                rng: Pcg32::seed_from_u64(seed),
                elapsed_ms: 0.0,
            }
        }

        pub fn ctx(&mut self) -> MiniCtx<'_> {
            MiniCtx {
                audio: &mut self.audio,
                rng: &mut self.rng,
                elapsed_ms: self.elapsed_ms,
            }
        }
    }
}
