//! Bureaucratic Maze: a form drifts around; touching it gets you denied.

use rand::Rng;
use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::widgets::canvas::{Circle, Line, Rectangle};
use ratzilla::ratatui::Frame;

use super::{blink, field, print_centered, up, MiniCtx, MiniEvent, Minigame, Point};
use crate::audio::Track;

const FORM_W: f64 = 0.25;
const FORM_H: f64 = 0.12;
const SPEED: f64 = 0.006;
const STAMP_COUNT: usize = 36;
const GRAVITY: f64 = 0.0001;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Stamp {
    at: Point,
    vel: (f64, f64),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bureau {
    form: Point,
    vel: (f64, f64),
    denied: bool,
    stamps: Vec<Stamp>,
    pointer: Option<Point>,
}

impl Bureau {
    fn touching(&self, p: Point) -> bool {
        p.x >= self.form.x
            && p.x <= self.form.x + FORM_W
            && p.y >= self.form.y
            && p.y <= self.form.y + FORM_H
    }

    fn check_touch(&mut self, ctx: &mut MiniCtx) {
        if self.denied {
            return;
        }
        let Some(p) = self.pointer else { return };
        if !self.touching(p) {
            return;
        }
        self.denied = true;
        let origin = Point::new(self.form.x + FORM_W / 2.0, self.form.y + FORM_H / 2.0);
        self.stamps = (0..STAMP_COUNT)
            .map(|_| Stamp {
                at: origin,
                vel: (
                    ctx.rng.random_range(-0.005..0.005),
                    ctx.rng.random_range(-0.005..-0.001),
                ),
            })
            .collect();
        ctx.audio.play_once(Track::DeniedForm);
    }
}

impl Minigame for Bureau {
    fn reset(&mut self, ctx: &mut MiniCtx) {
        let angle = ctx.rng.random_range(0.0..std::f64::consts::TAU);
        *self = Self {
            form: Point::new(
                ctx.rng.random_range(0.2..0.8 - FORM_W),
                ctx.rng.random_range(0.2..0.8 - FORM_H),
            ),
            vel: (SPEED * angle.cos(), SPEED * angle.sin()),
            ..Self::default()
        };
    }

    fn handle_input(&mut self, event: &MiniEvent, ctx: &mut MiniCtx) -> bool {
        let MiniEvent::PointerMove(p) = *event else {
            return false;
        };
        self.pointer = Some(p);
        self.check_touch(ctx);
        true
    }

    fn tick(&mut self, ctx: &mut MiniCtx) {
        if self.denied {
            for s in &mut self.stamps {
                s.at.x += s.vel.0;
                s.at.y += s.vel.1;
                s.vel.1 += GRAVITY;
            }
            return;
        }
        self.form.x += self.vel.0;
        self.form.y += self.vel.1;
        if self.form.x < 0.0 || self.form.x + FORM_W > 1.0 {
            self.vel.0 = -self.vel.0;
        }
        if self.form.y < 0.0 || self.form.y + FORM_H > 1.0 {
            self.vel.1 = -self.vel.1;
        }
        // The form can drift into a pointer that stands still.
        self.check_touch(ctx);
    }

    fn render(&self, f: &mut Frame, area: Rect, elapsed_ms: f64) {
        let cols = area.width;
        let canvas = field(Color::Rgb(240, 240, 255), |ctx| {
            if self.denied {
                for s in &self.stamps {
                    ctx.draw(&Rectangle {
                        x: s.at.x - 0.01,
                        y: up(s.at.y) - 0.006,
                        width: 0.02,
                        height: 0.012,
                        color: Color::Rgb(240, 40, 40),
                    });
                }
                if blink(elapsed_ms, 333.0, 233.0) {
                    print_centered(
                        ctx,
                        cols,
                        0.2,
                        "You touched it.",
                        Style::default().fg(Color::Rgb(255, 60, 60)).add_modifier(Modifier::BOLD),
                    );
                }
            } else {
                ctx.draw(&Rectangle {
                    x: self.form.x,
                    y: up(self.form.y + FORM_H),
                    width: FORM_W,
                    height: FORM_H,
                    color: Color::Rgb(220, 40, 40),
                });
            }

            if let Some(p) = self.pointer {
                let (x, y) = (p.x, up(p.y));
                ctx.draw(&Circle {
                    x,
                    y: y + 0.02,
                    radius: 0.008,
                    color: Color::Black,
                });
                ctx.draw(&Line::new(x, y + 0.012, x, y - 0.015, Color::Black));
                ctx.draw(&Line::new(x, y, x - 0.01, y - 0.008, Color::Black));
                ctx.draw(&Line::new(x, y, x + 0.01, y - 0.008, Color::Black));
                ctx.draw(&Line::new(x, y - 0.015, x - 0.008, y - 0.03, Color::Black));
                ctx.draw(&Line::new(x, y - 0.015, x + 0.008, y - 0.03, Color::Black));
            }

            print_centered(
                ctx,
                cols,
                0.9,
                "Avoid the moving form. Do not touch it!",
                Style::default().fg(Color::Black),
            );
        });
        f.render_widget(canvas, area);
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Harness;
    use super::*;

    fn fresh(seed: u64) -> (Harness, Bureau) {
        let mut h = Harness::new(seed);
        let mut g = Bureau::default();
        g.reset(&mut h.ctx());
        (h, g)
    }

    #[test]
    fn form_spawns_inside_the_middle() {
        let (_, g) = fresh(1);
        assert!(g.form.x >= 0.2 && g.form.x + FORM_W <= 0.8);
        assert!(g.form.y >= 0.2 && g.form.y + FORM_H <= 0.8);
    }

    #[test]
    fn touching_denies_and_stamps() {
        let (mut h, mut g) = fresh(2);
        let inside = Point::new(g.form.x + 0.01, g.form.y + 0.01);
        g.handle_input(&MiniEvent::PointerMove(inside), &mut h.ctx());
        assert!(g.denied);
        assert_eq!(g.stamps.len(), STAMP_COUNT);
        assert_eq!(h.audio.count_one_shots(Track::DeniedForm), 1);

        // A second touch does not stamp again.
        g.handle_input(&MiniEvent::PointerMove(inside), &mut h.ctx());
        assert_eq!(h.audio.count_one_shots(Track::DeniedForm), 1);
    }

    #[test]
    fn denied_form_stops_and_stamps_fall() {
        let (mut h, mut g) = fresh(3);
        let inside = Point::new(g.form.x + 0.01, g.form.y + 0.01);
        g.handle_input(&MiniEvent::PointerMove(inside), &mut h.ctx());
        let form = g.form;
        let before: f64 = g.stamps.iter().map(|s| s.vel.1).sum();
        g.tick(&mut h.ctx());
        let after: f64 = g.stamps.iter().map(|s| s.vel.1).sum();
        assert_eq!(g.form, form);
        assert!(after > before);
    }

    #[test]
    fn form_bounces_inside_the_field() {
        let (mut h, mut g) = fresh(4);
        for _ in 0..3000 {
            g.tick(&mut h.ctx());
            assert!(g.form.x > -SPEED * 2.0 && g.form.x + FORM_W < 1.0 + SPEED * 2.0);
        }
    }

    #[test]
    fn reset_matches_fresh_with_same_seed() {
        let (mut h, mut g) = fresh(5);
        g.handle_input(&MiniEvent::PointerMove(Point::new(g.form.x, g.form.y)), &mut h.ctx());
        let mut h = Harness::new(5);
        g.reset(&mut h.ctx());
        let (_, baseline) = fresh(5);
        assert_eq!(g, baseline);
    }
}
