//! Find the Noise: five clicks, five squirrels.

use rand::Rng;
use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::widgets::canvas::Circle;
use ratzilla::ratatui::Frame;

use super::{blink, field, print_centered, print_centered_at, up, MiniCtx, MiniEvent, Minigame, Point};
use crate::audio::Track;

const MAX_CLICKS: u8 = 5;
const FLASH_MS: f64 = 700.0;
const PUFF_MS: f64 = 140.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Puff {
    at: Point,
    kind: u8,
    when_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Noise {
    clicks: u8,
    puffs: Vec<Puff>,
}

impl Noise {
    pub fn remaining(&self) -> u8 {
        MAX_CLICKS - self.clicks
    }
}

impl Minigame for Noise {
    fn reset(&mut self, _ctx: &mut MiniCtx) {
        *self = Self::default();
    }

    fn handle_input(&mut self, event: &MiniEvent, ctx: &mut MiniCtx) -> bool {
        let MiniEvent::PointerDown(at) = *event else {
            return false;
        };
        if self.clicks >= MAX_CLICKS {
            return false;
        }
        self.clicks += 1;
        self.puffs.push(Puff {
            at,
            kind: ctx.rng.random_range(0..3),
            when_ms: ctx.elapsed_ms,
        });
        let squirrel = if ctx.rng.random_bool(0.5) {
            Track::SquirrelA
        } else {
            Track::SquirrelB
        };
        ctx.audio.play_once(squirrel);
        true
    }

    fn tick(&mut self, ctx: &mut MiniCtx) {
        let now = ctx.elapsed_ms;
        self.puffs.retain(|p| now - p.when_ms < PUFF_MS);
    }

    fn render(&self, f: &mut Frame, area: Rect, elapsed_ms: f64) {
        let cols = area.width;
        let canvas = field(Color::Rgb(255, 35, 190), |ctx| {
            for p in self.puffs.iter().filter(|p| elapsed_ms - p.when_ms < PUFF_MS) {
                let glyph = match p.kind {
                    0 => "(o)",
                    1 => "/\\",
                    _ => "@/",
                };
                ctx.draw(&Circle {
                    x: p.at.x,
                    y: up(p.at.y),
                    radius: 0.03,
                    color: Color::White,
                });
                print_centered_at(ctx, cols, p.at.x, p.at.y, glyph, Style::default().fg(Color::Black));
            }

            let loud = Style::default().fg(Color::Black).add_modifier(Modifier::BOLD);
            if elapsed_ms < FLASH_MS {
                print_centered(ctx, cols, 0.15, "THE NOISE IS A SQUIRREL", loud);
            }
            print_centered(ctx, cols, 0.85, "Click to find the noise.", loud);
            print_centered(ctx, cols, 0.9, format!("Clicks remaining: {}", self.remaining()), loud);

            if self.clicks >= MAX_CLICKS && blink(elapsed_ms, 500.0, 250.0) {
                print_centered(
                    ctx,
                    cols,
                    0.5,
                    "…THE NOISE WAS INSIDE YOU ALL ALONG…",
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                );
            }
        });
        f.render_widget(canvas, area);
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Harness;
    use super::*;

    fn click() -> MiniEvent {
        MiniEvent::PointerDown(Point::new(0.3, 0.4))
    }

    #[test]
    fn each_click_plays_a_squirrel() {
        let mut h = Harness::new(1);
        let mut g = Noise::default();
        g.handle_input(&click(), &mut h.ctx());
        g.handle_input(&click(), &mut h.ctx());
        assert_eq!(g.remaining(), 3);
        let squirrels = h.audio.count_one_shots(Track::SquirrelA)
            + h.audio.count_one_shots(Track::SquirrelB);
        assert_eq!(squirrels, 2);
    }

    #[test]
    fn clicks_stop_counting_at_five() {
        let mut h = Harness::new(2);
        let mut g = Noise::default();
        for _ in 0..8 {
            g.handle_input(&click(), &mut h.ctx());
        }
        assert_eq!(g.remaining(), 0);
        assert_eq!(h.audio.one_shots.len(), 5);
    }

    #[test]
    fn puffs_fade_quickly() {
        let mut h = Harness::new(3);
        let mut g = Noise::default();
        g.handle_input(&click(), &mut h.ctx());
        h.elapsed_ms = 100.0;
        g.tick(&mut h.ctx());
        assert_eq!(g.puffs.len(), 1);
        h.elapsed_ms = 200.0;
        g.tick(&mut h.ctx());
        assert!(g.puffs.is_empty());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut h = Harness::new(4);
        let mut g = Noise::default();
        g.handle_input(&click(), &mut h.ctx());
        g.reset(&mut h.ctx());
        let once = g.clone();
        g.reset(&mut h.ctx());
        assert_eq!(g, once);
        assert_eq!(g.remaining(), MAX_CLICKS);
    }
}
