//! Pollute the Cloud: drag a mower across the sky and leave grey patches.

use rand::Rng;
use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::Span;
use ratzilla::ratatui::widgets::canvas::{Circle, Rectangle};
use ratzilla::ratatui::Frame;

use super::{field, up, MiniCtx, MiniEvent, Minigame, Point};
use crate::audio::Track;

/// Patches only stick inside the cloud band.
const CLOUD_BAND: f64 = 0.6;
const MAX_SPOTS: usize = 400;
const MOWER_SIZE: f64 = 0.06;
/// How long the trimmer keeps running after the last movement.
const TRIM_LINGER_MS: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Spot {
    at: Point,
    r: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cloud {
    spots: Vec<Spot>,
    pointer: Option<Point>,
    trimming_until_ms: f64,
}

impl Cloud {
    fn in_band(p: Point) -> bool {
        p.inside() && p.y < CLOUD_BAND
    }
}

impl Minigame for Cloud {
    fn reset(&mut self, ctx: &mut MiniCtx) {
        ctx.audio.stop(Track::TrimmerLoop);
        *self = Self::default();
    }

    fn handle_input(&mut self, event: &MiniEvent, ctx: &mut MiniCtx) -> bool {
        let MiniEvent::PointerMove(p) = *event else {
            return false;
        };
        let moved = self.pointer.is_some_and(|prev| prev.dist(p) > 0.002);
        self.pointer = Some(p);
        if moved && Self::in_band(p) {
            self.trimming_until_ms = ctx.elapsed_ms + TRIM_LINGER_MS;
            ctx.audio.play_loop(Track::TrimmerLoop, 0.4);
        }
        true
    }

    fn tick(&mut self, ctx: &mut MiniCtx) {
        if ctx.elapsed_ms > self.trimming_until_ms && ctx.audio.is_playing(Track::TrimmerLoop) {
            ctx.audio.stop(Track::TrimmerLoop);
        }
        let Some(p) = self.pointer.filter(|&p| Self::in_band(p)) else {
            return;
        };
        let r = MOWER_SIZE * (0.9 + ctx.rng.random_range(0.0..0.2)) / 2.0;
        self.spots.push(Spot { at: p, r });
        if self.spots.len() > MAX_SPOTS {
            self.spots.remove(0);
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, _elapsed_ms: f64) {
        let canvas = field(Color::Rgb(120, 200, 255), |ctx| {
            ctx.draw(&Rectangle {
                x: 0.0,
                y: 0.0,
                width: 1.0,
                height: 0.2,
                color: Color::Rgb(60, 180, 90),
            });

            let (cx, cy, r) = (0.5, 0.33, 0.12);
            for (dx, dy, k) in [(-1.3, 0.0, 0.8), (0.0, -0.2, 1.1), (1.3, 0.05, 0.85)] {
                ctx.draw(&Circle {
                    x: cx + dx * r,
                    y: up(cy + dy * r),
                    radius: r * k,
                    color: Color::White,
                });
            }
            ctx.layer();

            for s in &self.spots {
                ctx.draw(&Circle {
                    x: s.at.x,
                    y: up(s.at.y),
                    radius: s.r,
                    color: Color::Rgb(80, 80, 90),
                });
            }
            ctx.layer();

            if let Some(p) = self.pointer {
                let half = MOWER_SIZE / 2.0;
                ctx.draw(&Rectangle {
                    x: p.x - half,
                    y: up(p.y) - half,
                    width: MOWER_SIZE,
                    height: MOWER_SIZE,
                    color: Color::Rgb(220, 40, 40),
                });
                ctx.print(
                    p.x - half,
                    up(p.y) + half,
                    Span::styled("▀▀", Style::default().fg(Color::Black)),
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
    use crate::audio::AudioBank;

    fn mv(x: f64, y: f64) -> MiniEvent {
        MiniEvent::PointerMove(Point::new(x, y))
    }

    #[test]
    fn mowing_inside_cloud_leaves_spots() {
        let mut h = Harness::new(1);
        let mut g = Cloud::default();
        g.reset(&mut h.ctx());
        g.handle_input(&mv(0.5, 0.3), &mut h.ctx());
        g.tick(&mut h.ctx());
        g.tick(&mut h.ctx());
        assert_eq!(g.spots.len(), 2);
    }

    #[test]
    fn ground_is_not_mowed() {
        let mut h = Harness::new(1);
        let mut g = Cloud::default();
        g.handle_input(&mv(0.5, 0.9), &mut h.ctx());
        g.tick(&mut h.ctx());
        assert!(g.spots.is_empty());
    }

    #[test]
    fn spots_are_capped() {
        let mut h = Harness::new(2);
        let mut g = Cloud::default();
        g.handle_input(&mv(0.4, 0.2), &mut h.ctx());
        for _ in 0..(MAX_SPOTS + 50) {
            g.tick(&mut h.ctx());
        }
        assert_eq!(g.spots.len(), MAX_SPOTS);
    }

    #[test]
    fn trimmer_runs_only_while_moving() {
        let mut h = Harness::new(3);
        let mut g = Cloud::default();
        g.handle_input(&mv(0.4, 0.2), &mut h.ctx());
        assert!(!h.audio.is_playing(Track::TrimmerLoop));
        g.handle_input(&mv(0.45, 0.2), &mut h.ctx());
        assert!(h.audio.is_playing(Track::TrimmerLoop));

        h.elapsed_ms = 500.0;
        g.tick(&mut h.ctx());
        assert!(!h.audio.is_playing(Track::TrimmerLoop));
    }

    #[test]
    fn reset_restores_baseline_and_silences_trimmer() {
        let mut h = Harness::new(4);
        let mut g = Cloud::default();
        g.handle_input(&mv(0.4, 0.2), &mut h.ctx());
        g.handle_input(&mv(0.5, 0.2), &mut h.ctx());
        g.tick(&mut h.ctx());
        g.reset(&mut h.ctx());
        assert_eq!(g, Cloud::default());
        assert!(!h.audio.is_playing(Track::TrimmerLoop));
        g.reset(&mut h.ctx());
        assert_eq!(g, Cloud::default());
    }
}
