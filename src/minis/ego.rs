//! Deflate the Ego: a balloon that inflates on its own and shrinks when poked.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::widgets::canvas::{Circle, Line};
use ratzilla::ratatui::Frame;

use super::{field, lerp, print_centered, up, wobble_color, MiniCtx, MiniEvent, Minigame, Point};
use crate::audio::Track;

const CENTER: Point = Point::new(0.5, 0.52);
const START_RADIUS: f64 = 0.25;
/// Growth per tick while inflated.
const GROWTH: f64 = 0.0006;
const HIT_SHRINK: f64 = 0.85;
const HITS_TO_POP: u8 = 6;
const POP_RADIUS: f64 = 0.06;
const POPPED_RADIUS: f64 = 0.04;
const PSST_MS: f64 = 150.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Ego {
    radius: f64,
    hits: u8,
    popped: bool,
    pop_played: bool,
    last_hit_ms: Option<f64>,
    pointer: Option<Point>,
}

impl Default for Ego {
    fn default() -> Self {
        Self {
            radius: START_RADIUS,
            hits: 0,
            popped: false,
            pop_played: false,
            last_hit_ms: None,
            pointer: None,
        }
    }
}

impl Minigame for Ego {
    fn reset(&mut self, _ctx: &mut MiniCtx) {
        *self = Self::default();
    }

    fn handle_input(&mut self, event: &MiniEvent, ctx: &mut MiniCtx) -> bool {
        match *event {
            MiniEvent::PointerMove(p) => {
                self.pointer = Some(p);
                // Leaving the play area is a pop too.
                if !self.popped && !p.inside() {
                    self.popped = true;
                }
                true
            }
            MiniEvent::PointerDown(p) if !self.popped && p.dist(CENTER) <= self.radius => {
                self.hits += 1;
                self.radius *= HIT_SHRINK;
                self.last_hit_ms = Some(ctx.elapsed_ms);
                ctx.audio.play_once(Track::EgoHit);
                if self.hits >= HITS_TO_POP || self.radius < POP_RADIUS {
                    self.popped = true;
                }
                true
            }
            _ => false,
        }
    }

    fn tick(&mut self, ctx: &mut MiniCtx) {
        if !self.popped {
            self.radius += GROWTH;
            return;
        }
        self.radius = lerp(self.radius, POPPED_RADIUS, 0.25);
        if !self.pop_played {
            ctx.audio.play_once(Track::EgoPop);
            self.pop_played = true;
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, elapsed_ms: f64) {
        let cols = area.width;
        let canvas = field(Color::Rgb(40, 0, 80), |ctx| {
            let (cx, cy) = (CENTER.x, up(CENTER.y));
            let tint = wobble_color(elapsed_ms, 3.0);
            for i in (1..=3).rev() {
                ctx.draw(&Circle {
                    x: cx,
                    y: cy,
                    radius: self.radius + i as f64 * 0.012,
                    color: Color::Rgb(60, 20, 100),
                });
            }
            ctx.draw(&Circle {
                x: cx,
                y: cy,
                radius: self.radius,
                color: tint,
            });

            if self.popped {
                let spin = elapsed_ms / 1000.0 * 1.8;
                for i in 0..10 {
                    let a = std::f64::consts::TAU * i as f64 / 10.0 + spin;
                    let reach = self.radius + 0.05;
                    ctx.draw(&Line::new(cx, cy, cx + a.cos() * reach, cy + a.sin() * reach, Color::White));
                }
            }
            ctx.layer();

            if self.last_hit_ms.is_some_and(|t| elapsed_ms - t < PSST_MS) {
                print_centered(
                    ctx,
                    cols,
                    CENTER.y - self.radius * 0.2,
                    "pssst!",
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                );
            }

            if let Some(p) = self.pointer.filter(Point::inside) {
                ctx.draw(&Line::new(p.x, up(p.y), p.x, up(p.y) + 0.06, Color::White));
            }
        });
        f.render_widget(canvas, area);
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Harness;
    use super::*;

    fn poke() -> MiniEvent {
        MiniEvent::PointerDown(CENTER)
    }

    #[test]
    fn grows_until_popped() {
        let mut h = Harness::new(1);
        let mut g = Ego::default();
        g.tick(&mut h.ctx());
        assert!(g.radius > START_RADIUS);
    }

    #[test]
    fn pokes_shrink_and_six_pop() {
        let mut h = Harness::new(1);
        let mut g = Ego::default();
        for _ in 0..5 {
            assert!(g.handle_input(&poke(), &mut h.ctx()));
        }
        assert!(!g.popped);
        assert!((g.radius - START_RADIUS * HIT_SHRINK.powi(5)).abs() < 1e-9);
        g.handle_input(&poke(), &mut h.ctx());
        assert!(g.popped);
        assert_eq!(h.audio.count_one_shots(Track::EgoHit), 6);
    }

    #[test]
    fn miss_outside_balloon_does_nothing() {
        let mut h = Harness::new(1);
        let mut g = Ego::default();
        assert!(!g.handle_input(&MiniEvent::PointerDown(Point::new(0.95, 0.05)), &mut h.ctx()));
        assert_eq!(g.hits, 0);
    }

    #[test]
    fn leaving_the_field_pops() {
        let mut h = Harness::new(1);
        let mut g = Ego::default();
        g.handle_input(&MiniEvent::PointerMove(Point::new(1.4, 0.5)), &mut h.ctx());
        assert!(g.popped);
    }

    #[test]
    fn pop_sound_plays_once() {
        let mut h = Harness::new(1);
        let mut g = Ego::default();
        g.handle_input(&MiniEvent::PointerMove(Point::new(-0.1, 0.5)), &mut h.ctx());
        for _ in 0..20 {
            g.tick(&mut h.ctx());
        }
        assert_eq!(h.audio.count_one_shots(Track::EgoPop), 1);
        assert!(g.radius < 0.05);
    }

    #[test]
    fn reset_reinflates() {
        let mut h = Harness::new(1);
        let mut g = Ego::default();
        g.handle_input(&poke(), &mut h.ctx());
        g.tick(&mut h.ctx());
        g.reset(&mut h.ctx());
        assert_eq!(g, Ego::default());
    }
}
