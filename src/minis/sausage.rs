//! Bad Bad Sausage: every click stuffs another word into the casing.

use rand::seq::IndexedRandom;
use rand::Rng;
use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::widgets::canvas::Rectangle;
use ratzilla::ratatui::Frame;

use super::{field, lerp, print_centered, print_centered_at, up, MiniCtx, MiniEvent, Minigame, Point};
use crate::audio::Track;

const FILL_TARGET: u8 = 8;
/// Casing, as `(x, y, w, h)` with `(x, y)` at the top-left.
const CASING: (f64, f64, f64, f64) = (0.2, 0.39, 0.6, 0.22);
const ARRIVED: f64 = 0.02;

const STUFFING: [&str; 46] = [
    "CORRUPTION", "HUNGER", "SANCTIONS", "PROPAGANDA", "W.M.D.", "SURVEILLANCE",
    "OLIGARCHS", "DISINFORMATION", "DEBT", "STRESS", "BUREAUCRACY", "INFLUENCERS",
    "NUKE", "WAR", "LIFE COACHES", "SPAM EMAILS", "SCROLLING", "MICROTRANSACTIONS",
    "CLICKBAIT", "FAST FOOD", "ADVERTISING", "ALGORITHMS", "FOMO", "COMMUTE",
    "SUBSCRIPTIONS", "INSTANT GRATIFICATION", "OVERWORK", "DATA MINING", "MALWARE",
    "STAGNATION", "GOSSIP", "NOTIFICATIONS", "BURNOUT", "MEETINGS", "MIDLIFE CRISIS",
    "DOOMSCROLLING", "FAKE NEWS", "SURVEILLANCE CAPITALISM", "TERMS OF SERVICE",
    "ADDICTION", "POP-UPS", "EGO", "ANXIETY", "PROCRASTINATION", "PORNOGRAPHY",
    "POLITICIANS",
];

#[derive(Debug, Clone, PartialEq)]
struct Filling {
    at: Point,
    target: Point,
    text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sausage {
    flying: Vec<Filling>,
    filled: u8,
}

impl Sausage {
    pub fn complete(&self) -> bool {
        self.filled >= FILL_TARGET
    }
}

impl Minigame for Sausage {
    fn reset(&mut self, _ctx: &mut MiniCtx) {
        *self = Self::default();
    }

    fn handle_input(&mut self, event: &MiniEvent, ctx: &mut MiniCtx) -> bool {
        let MiniEvent::PointerDown(at) = *event else {
            return false;
        };
        let (x, y, w, h) = CASING;
        let target = Point::new(
            ctx.rng.random_range(x + 0.03..x + w - 0.03),
            ctx.rng.random_range(y + 0.03..y + h - 0.03),
        );
        let text = STUFFING.choose(&mut *ctx.rng).copied().unwrap_or(STUFFING[0]);
        self.flying.push(Filling { at, target, text });
        self.filled = (self.filled + 1).min(FILL_TARGET);
        ctx.audio.play_once(Track::SausageClick);
        true
    }

    fn tick(&mut self, _ctx: &mut MiniCtx) {
        for f in &mut self.flying {
            f.at.x = lerp(f.at.x, f.target.x, 0.08);
            f.at.y = lerp(f.at.y, f.target.y, 0.08);
        }
        self.flying.retain(|f| f.at.dist(f.target) >= ARRIVED);
    }

    fn render(&self, f: &mut Frame, area: Rect, _elapsed_ms: f64) {
        let cols = area.width;
        let canvas = field(Color::Rgb(255, 237, 210), |ctx| {
            let (x, y, w, h) = CASING;
            ctx.draw(&Rectangle {
                x,
                y: up(y + h),
                width: w,
                height: h,
                color: Color::Rgb(200, 80, 70),
            });
            ctx.draw(&Rectangle {
                x: x + 0.02,
                y: up(y + h) + 0.02,
                width: w - 0.04,
                height: h - 0.04,
                color: Color::Rgb(170, 60, 55),
            });

            let bar_y = y + h + 0.05;
            let pct = self.filled as f64 / FILL_TARGET as f64;
            ctx.draw(&Rectangle {
                x,
                y: up(bar_y + 0.02),
                width: w,
                height: 0.02,
                color: Color::Black,
            });
            if pct > 0.0 {
                ctx.draw(&Rectangle {
                    x,
                    y: up(bar_y + 0.02),
                    width: w * pct,
                    height: 0.02,
                    color: Color::Rgb(30, 200, 110),
                });
            }
            ctx.layer();

            for fl in &self.flying {
                print_centered_at(
                    ctx,
                    cols,
                    fl.at.x,
                    fl.at.y,
                    fl.text,
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                );
            }
            print_centered(
                ctx,
                cols,
                y - 0.08,
                "Click to Add 'content' into the sausage.",
                Style::default().fg(Color::Black),
            );
            if self.complete() {
                print_centered(
                    ctx,
                    cols,
                    y - 0.18,
                    "A FINE MEAL!",
                    Style::default().fg(Color::Rgb(200, 80, 70)).add_modifier(Modifier::BOLD),
                );
            }
        });
        f.render_widget(canvas, area);
    }
}
