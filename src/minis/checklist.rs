//! Checklist: five essential tasks that change nothing.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::Span;
use ratzilla::ratatui::widgets::canvas::Rectangle;
use ratzilla::ratatui::Frame;

use super::{field, print_centered, up, MiniCtx, MiniEvent, Minigame, Point};
use crate::audio::Track;

const TASKS: [&str; 5] = [
    "REFRESH EMAIL IN CASE OF NEWS",
    "AGREE TO UPDATED TERMS",
    "MOVE ONE FILE TO ANOTHER FOLDER",
    "OPEN PRODUCTIVITY APP, THEN CLOSE IT",
    "THINK ABOUT HYDRATION",
];
const ROW_H: f64 = 0.08;
const ROW_X: f64 = 0.22;
const ROW_W: f64 = 0.56;

/// Top edge of row `i`; the list is centred vertically.
fn row_top(i: usize) -> f64 {
    0.5 - ROW_H * TASKS.len() as f64 / 2.0 + i as f64 * ROW_H
}

fn row_at(p: Point) -> Option<usize> {
    if p.x < ROW_X || p.x > ROW_X + ROW_W {
        return None;
    }
    (0..TASKS.len()).find(|&i| {
        let top = row_top(i);
        p.y >= top && p.y < top + ROW_H
    })
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Checklist {
    done: [bool; TASKS.len()],
}

impl Checklist {
    pub fn all_done(&self) -> bool {
        self.done.iter().all(|&d| d)
    }
}

impl Minigame for Checklist {
    fn reset(&mut self, _ctx: &mut MiniCtx) {
        *self = Self::default();
    }

    fn handle_input(&mut self, event: &MiniEvent, ctx: &mut MiniCtx) -> bool {
        let MiniEvent::PointerDown(p) = *event else {
            return false;
        };
        let Some(i) = row_at(p) else {
            return false;
        };
        self.done[i] = !self.done[i];
        ctx.audio.play_once(Track::NudgeBump);
        true
    }

    fn render(&self, f: &mut Frame, area: Rect, _elapsed_ms: f64) {
        let cols = area.width;
        let canvas = field(Color::Rgb(250, 252, 255), |ctx| {
            print_centered(
                ctx,
                cols,
                0.18,
                "ESSENTIAL CHECKLIST",
                Style::default().fg(Color::Rgb(20, 20, 20)).add_modifier(Modifier::BOLD),
            );
            for (i, task) in TASKS.iter().enumerate() {
                let top = row_top(i);
                let done = self.done[i];
                ctx.draw(&Rectangle {
                    x: ROW_X,
                    y: up(top + ROW_H) + 0.005,
                    width: ROW_W,
                    height: ROW_H - 0.01,
                    color: if done {
                        Color::Rgb(60, 190, 130)
                    } else {
                        Color::Rgb(200, 210, 230)
                    },
                });
                let label = format!("{} {}", if done { "[x]" } else { "[ ]" }, task);
                let style = if done {
                    Style::default().fg(Color::Rgb(40, 140, 80)).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Rgb(20, 20, 20))
                };
                ctx.print(ROW_X + 0.02, up(top + ROW_H / 2.0), Span::styled(label, style));
            }
            if self.all_done() {
                print_centered(
                    ctx,
                    cols,
                    0.8,
                    "ALL BOXES TICKED. NOTHING CHANGED.",
                    Style::default().fg(Color::Rgb(200, 150, 0)).add_modifier(Modifier::BOLD),
                );
            } else {
                print_centered(
                    ctx,
                    cols,
                    0.82,
                    "Click items to perform essential tasks.",
                    Style::default().fg(Color::Rgb(80, 80, 80)),
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

    fn click_row(i: usize) -> MiniEvent {
        MiniEvent::PointerDown(Point::new(0.5, row_top(i) + ROW_H / 2.0))
    }

    #[test]
    fn rows_do_not_overlap() {
        for i in 0..TASKS.len() {
            assert_eq!(row_at(Point::new(0.5, row_top(i) + 0.001)), Some(i));
        }
        assert_eq!(row_at(Point::new(0.1, row_top(0) + 0.01)), None);
        assert_eq!(row_at(Point::new(0.5, 0.05)), None);
    }

    #[test]
    fn clicking_toggles_an_item() {
        let mut h = Harness::new(1);
        let mut g = Checklist::default();
        assert!(g.handle_input(&click_row(2), &mut h.ctx()));
        assert!(g.done[2]);
        g.handle_input(&click_row(2), &mut h.ctx());
        assert!(!g.done[2]);
        assert_eq!(h.audio.count_one_shots(Track::NudgeBump), 2);
    }

    #[test]
    fn ticking_everything_completes() {
        let mut h = Harness::new(1);
        let mut g = Checklist::default();
        for i in 0..TASKS.len() {
            g.handle_input(&click_row(i), &mut h.ctx());
        }
        assert!(g.all_done());
    }

    #[test]
    fn reset_unticks() {
        let mut h = Harness::new(1);
        let mut g = Checklist::default();
        g.handle_input(&click_row(0), &mut h.ctx());
        g.reset(&mut h.ctx());
        assert_eq!(g, Checklist::default());
    }
}
