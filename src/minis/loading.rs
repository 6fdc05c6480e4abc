//! The Loading Bar: it creeps on its own, clicking makes it feel essential.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::widgets::canvas::Rectangle;
use ratzilla::ratatui::Frame;

use super::{field, lerp, print_centered, up, MiniCtx, MiniEvent, Minigame, TICK_MS};

/// Progress per millisecond without help.
const DRIFT_PER_MS: f64 = 0.0002;
const NUDGE: f64 = 0.12;
const BAR: (f64, f64, f64, f64) = (0.15, 0.47, 0.7, 0.06);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Loading {
    progress: f64,
    nudges: u32,
}

impl Minigame for Loading {
    fn reset(&mut self, _ctx: &mut MiniCtx) {
        *self = Self::default();
    }

    fn handle_input(&mut self, event: &MiniEvent, _ctx: &mut MiniCtx) -> bool {
        if !matches!(event, MiniEvent::PointerDown(_)) {
            return false;
        }
        self.progress = (self.progress + NUDGE).clamp(0.0, 1.0);
        self.nudges += 1;
        true
    }

    fn tick(&mut self, _ctx: &mut MiniCtx) {
        self.progress = (self.progress + DRIFT_PER_MS * TICK_MS).clamp(0.0, 1.0);
    }

    fn render(&self, f: &mut Frame, area: Rect, _elapsed_ms: f64) {
        let cols = area.width;
        let canvas = field(Color::Rgb(18, 18, 26), |ctx| {
            print_centered(
                ctx,
                cols,
                0.22,
                "ESSENTIAL LOADING…",
                Style::default().fg(Color::Rgb(240, 240, 240)).add_modifier(Modifier::BOLD),
            );

            let (x, y, w, h) = BAR;
            ctx.draw(&Rectangle {
                x,
                y: up(y + h),
                width: w,
                height: h,
                color: Color::Rgb(40, 40, 70),
            });
            if self.progress > 0.0 {
                let p = self.progress;
                ctx.draw(&Rectangle {
                    x,
                    y: up(y + h),
                    width: w * p,
                    height: h,
                    color: Color::Rgb(80, lerp(170.0, 240.0, p) as u8, lerp(240.0, 170.0, p) as u8),
                });
            }

            print_centered(
                ctx,
                cols,
                y + h * 2.6,
                format!("{}% ESSENTIAL", (self.progress * 100.0).floor() as u32),
                Style::default().fg(Color::White),
            );
            if self.progress < 1.0 {
                print_centered(
                    ctx,
                    cols,
                    0.72,
                    "Click anywhere to make the loading feel more essential.",
                    Style::default().fg(Color::Rgb(210, 210, 210)),
                );
            } else {
                print_centered(
                    ctx,
                    cols,
                    0.76,
                    "LOADING COMPLETE. ESSENTIALNESS UNCHANGED.",
                    Style::default().fg(Color::Rgb(255, 230, 90)).add_modifier(Modifier::BOLD),
                );
            }
            print_centered(
                ctx,
                cols,
                0.86,
                format!("User interventions: {}", self.nudges),
                Style::default().fg(Color::Rgb(180, 180, 180)),
            );
        });
        f.render_widget(canvas, area);
    }
}
