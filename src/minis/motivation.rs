//! Tag Motivation: catch the dot before it bounces away again.

use rand::Rng;
use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::widgets::canvas::Circle;
use ratzilla::ratatui::Frame;

use super::{field, print_centered, print_centered_at, up, MiniCtx, MiniEvent, Minigame, Point};

/// Field units per tick.
const SPEED: f64 = 0.012;
const EDGE: f64 = 0.02;
const CATCH_RADIUS: f64 = 0.03;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Motivation {
    pos: Point,
    vel: (f64, f64),
    caught: bool,
}

impl Minigame for Motivation {
    fn reset(&mut self, ctx: &mut MiniCtx) {
        let angle = ctx.rng.random_range(0.0..std::f64::consts::TAU);
        *self = Self {
            pos: Point::new(0.5, 0.5),
            vel: (SPEED * angle.cos(), SPEED * angle.sin()),
            caught: false,
        };
    }

    fn handle_input(&mut self, event: &MiniEvent, _ctx: &mut MiniCtx) -> bool {
        match *event {
            MiniEvent::PointerDown(p) if p.dist(self.pos) <= CATCH_RADIUS => {
                self.caught = true;
                true
            }
            _ => false,
        }
    }

    fn tick(&mut self, _ctx: &mut MiniCtx) {
        if self.caught {
            return;
        }
        self.pos.x += self.vel.0;
        self.pos.y += self.vel.1;
        if self.pos.x < EDGE || self.pos.x > 1.0 - EDGE {
            self.vel.0 = -self.vel.0;
        }
        if self.pos.y < EDGE || self.pos.y > 1.0 - EDGE {
            self.vel.1 = -self.vel.1;
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, _elapsed_ms: f64) {
        let cols = area.width;
        let canvas = field(Color::Rgb(10, 10, 20), |ctx| {
            if !self.caught {
                for i in 1..10 {
                    let k = i as f64 / 10.0 * 2.5;
                    ctx.draw(&Circle {
                        x: self.pos.x - self.vel.0 * k,
                        y: up(self.pos.y - self.vel.1 * k),
                        radius: 0.012 - i as f64 * 0.001,
                        color: Color::Rgb(60, 120, 130),
                    });
                }
            }
            ctx.layer();
            ctx.draw(&Circle {
                x: self.pos.x,
                y: up(self.pos.y),
                radius: 0.012,
                color: if self.caught {
                    Color::Rgb(100, 255, 120)
                } else {
                    Color::Rgb(255, 80, 160)
                },
            });
            let (label, style) = if self.caught {
                ("GOT IT", Style::default().fg(Color::Rgb(0, 255, 160)).add_modifier(Modifier::BOLD))
            } else {
                ("MOTIVATION", Style::default().fg(Color::White))
            };
            print_centered_at(ctx, cols, self.pos.x, self.pos.y - 0.05, label, style);
            print_centered(ctx, cols, 0.12, "Motivation Catch-up.", Style::default().fg(Color::White));
        });
        f.render_widget(canvas, area);
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Harness;
    use super::*;

    #[test]
    fn starts_centred_and_moving() {
        let mut h = Harness::new(1);
        let mut g = Motivation::default();
        g.reset(&mut h.ctx());
        assert_eq!(g.pos, Point::new(0.5, 0.5));
        g.tick(&mut h.ctx());
        assert_ne!(g.pos, Point::new(0.5, 0.5));
    }

    #[test]
    fn stays_on_the_field() {
        let mut h = Harness::new(9);
        let mut g = Motivation::default();
        g.reset(&mut h.ctx());
        for _ in 0..2000 {
            g.tick(&mut h.ctx());
            assert!((-SPEED..=1.0 + SPEED).contains(&g.pos.x));
            assert!((-SPEED..=1.0 + SPEED).contains(&g.pos.y));
        }
    }

    #[test]
    fn click_on_target_catches_and_freezes() {
        let mut h = Harness::new(2);
        let mut g = Motivation::default();
        g.reset(&mut h.ctx());
        g.tick(&mut h.ctx());
        let at = g.pos;
        assert!(g.handle_input(&MiniEvent::PointerDown(at), &mut h.ctx()));
        assert!(g.caught);
        g.tick(&mut h.ctx());
        assert_eq!(g.pos, at);
    }

    #[test]
    fn near_miss_does_not_catch() {
        let mut h = Harness::new(2);
        let mut g = Motivation::default();
        g.reset(&mut h.ctx());
        let miss = Point::new(g.pos.x + 0.1, g.pos.y);
        assert!(!g.handle_input(&MiniEvent::PointerDown(miss), &mut h.ctx()));
    }

    #[test]
    fn reset_with_same_seed_matches() {
        let mut a = Harness::new(5);
        let mut b = Harness::new(5);
        let mut g1 = Motivation::default();
        let mut g2 = Motivation::default();
        g1.reset(&mut a.ctx());
        g2.reset(&mut b.ctx());
        assert_eq!(g1, g2);
    }
}
