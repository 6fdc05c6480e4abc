//! Sentient Spaghetti: only 'G' may pass.

use rand::Rng;
use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::widgets::canvas::{Circle, Line};
use ratzilla::ratatui::Frame;

use super::{field, print_centered, up, MiniCtx, MiniEvent, Minigame};
use crate::audio::Track;
use crate::input::Key;

const NOODLE_POINTS: usize = 24;
const NOODLE: Color = Color::Rgb(230, 170, 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mood {
    #[default]
    Tangle,
    Column,
    Angry,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Knot {
    x: f64,
    y: f64,
    phase: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Spaghetti {
    mood: Mood,
    knots: Vec<Knot>,
}

impl Minigame for Spaghetti {
    fn reset(&mut self, ctx: &mut MiniCtx) {
        let knots = (0..NOODLE_POINTS)
            .map(|_| Knot {
                x: 0.35 + ctx.rng.random_range(0.0..0.3),
                y: 0.35 + ctx.rng.random_range(0.0..0.3),
                phase: ctx.rng.random_range(0.0..std::f64::consts::TAU),
            })
            .collect();
        *self = Self {
            mood: Mood::Tangle,
            knots,
        };
    }

    fn handle_input(&mut self, event: &MiniEvent, ctx: &mut MiniCtx) -> bool {
        let MiniEvent::Key(key) = *event else {
            return false;
        };
        if matches!(key, Key::Char(c) if c.eq_ignore_ascii_case(&'g')) {
            self.mood = Mood::Column;
            ctx.audio.play_once(Track::SpaghettiOk);
        } else {
            self.mood = Mood::Angry;
            ctx.audio.play_once(Track::SpaghettiWrong);
        }
        true
    }

    fn render(&self, f: &mut Frame, area: Rect, elapsed_ms: f64) {
        let cols = area.width;
        let canvas = field(Color::Rgb(200, 45, 20), |ctx| {
            match self.mood {
                Mood::Tangle => {
                    let t = elapsed_ms / 1000.0 * 60.0;
                    let wobbled: Vec<(f64, f64)> = self
                        .knots
                        .iter()
                        .map(|k| {
                            (
                                k.x + 0.015 * (t * 0.05 + k.phase).sin(),
                                up(k.y + 0.015 * (t * 0.06 + k.phase).cos()),
                            )
                        })
                        .collect();
                    for pair in wobbled.windows(2) {
                        ctx.draw(&Line::new(pair[0].0, pair[0].1, pair[1].0, pair[1].1, NOODLE));
                    }
                }
                Mood::Column => {
                    for i in -4..=4 {
                        let x = 0.5 + i as f64 * 0.012;
                        ctx.draw(&Line::new(x, up(0.3), x, up(0.7), NOODLE));
                    }
                    ctx.draw(&Line::new(0.47, up(0.72), 0.49, up(0.75), Color::Black));
                    ctx.draw(&Line::new(0.49, up(0.75), 0.53, up(0.68), Color::Black));
                }
                Mood::Angry => {
                    ctx.draw(&Circle {
                        x: 0.5,
                        y: 0.5,
                        radius: 0.25,
                        color: Color::Rgb(255, 220, 70),
                    });
                    for side in [-1.0, 1.0] {
                        ctx.draw(&Circle {
                            x: 0.5 + side * 0.07,
                            y: up(0.45),
                            radius: 0.02,
                            color: Color::Black,
                        });
                    }
                    ctx.draw(&Line::new(0.42, up(0.6), 0.5, up(0.55), Color::Black));
                    ctx.draw(&Line::new(0.5, up(0.55), 0.58, up(0.6), Color::Black));
                }
            }
            print_centered(
                ctx,
                cols,
                0.15,
                "Press 'G' once. Any other key offends the spaghetti.",
                Style::default().fg(Color::White),
            );
        });
        f.render_widget(canvas, area);
    }
}
