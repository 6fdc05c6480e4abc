//! Pet the Invisible Dog: press and never let go.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::widgets::canvas::Circle;
use ratzilla::ratatui::Frame;

use super::{blink, field, print_centered, MiniCtx, MiniEvent, Minigame};
use crate::audio::Track;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dog {
    holding: bool,
    ever_pressed: bool,
    bitten: bool,
}

impl Minigame for Dog {
    fn reset(&mut self, ctx: &mut MiniCtx) {
        ctx.audio.stop(Track::DogHold);
        *self = Self::default();
    }

    fn handle_input(&mut self, event: &MiniEvent, ctx: &mut MiniCtx) -> bool {
        match event {
            MiniEvent::PointerDown(_) => {
                self.holding = true;
                self.ever_pressed = true;
                if !self.bitten {
                    ctx.audio.play_loop(Track::DogHold, 1.0);
                }
                true
            }
            MiniEvent::PointerUp(_) => {
                self.holding = false;
                ctx.audio.stop(Track::DogHold);
                if self.ever_pressed {
                    self.bitten = true;
                    ctx.audio.play_once(Track::DogBite);
                }
                true
            }
            _ => false,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, elapsed_ms: f64) {
        let cols = area.width;
        let canvas = field(Color::Rgb(236, 225, 206), |ctx| {
            if self.holding && !self.bitten {
                let r = 0.06 + 0.01 * (elapsed_ms / 1000.0 * 12.0).sin();
                ctx.draw(&Circle {
                    x: 0.5,
                    y: 0.5,
                    radius: r * 1.4,
                    color: Color::Rgb(255, 235, 170),
                });
                ctx.draw(&Circle {
                    x: 0.5,
                    y: 0.5,
                    radius: r,
                    color: Color::Rgb(255, 200, 80),
                });
            }
            if self.bitten && blink(elapsed_ms, 333.0, 200.0) {
                print_centered(
                    ctx,
                    cols,
                    0.45,
                    "HE BIT YOU",
                    Style::default().fg(Color::Rgb(230, 40, 40)).add_modifier(Modifier::BOLD),
                );
            }
            print_centered(
                ctx,
                cols,
                0.8,
                "Hold the mouse button down for the full duration.",
                Style::default().fg(Color::Black),
            );
        });
        f.render_widget(canvas, area);
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Harness;
    use super::super::Point;
    use super::*;
    use crate::audio::AudioBank;

    fn down() -> MiniEvent {
        MiniEvent::PointerDown(Point::new(0.5, 0.5))
    }

    fn release() -> MiniEvent {
        MiniEvent::PointerUp(Point::new(0.5, 0.5))
    }

    #[test]
    fn holding_plays_the_petting_loop() {
        let mut h = Harness::new(1);
        let mut g = Dog::default();
        g.handle_input(&down(), &mut h.ctx());
        assert!(h.audio.is_playing(Track::DogHold));
        assert!(!g.bitten);
    }

    #[test]
    fn letting_go_bites() {
        let mut h = Harness::new(1);
        let mut g = Dog::default();
        g.handle_input(&down(), &mut h.ctx());
        g.handle_input(&release(), &mut h.ctx());
        assert!(g.bitten);
        assert!(!h.audio.is_playing(Track::DogHold));
        assert_eq!(h.audio.count_one_shots(Track::DogBite), 1);
    }

    #[test]
    fn release_without_press_is_harmless() {
        let mut h = Harness::new(1);
        let mut g = Dog::default();
        g.handle_input(&release(), &mut h.ctx());
        assert!(!g.bitten);
    }

    #[test]
    fn bitten_dog_stays_quiet_on_next_press() {
        let mut h = Harness::new(1);
        let mut g = Dog::default();
        g.handle_input(&down(), &mut h.ctx());
        g.handle_input(&release(), &mut h.ctx());
        g.handle_input(&down(), &mut h.ctx());
        assert!(!h.audio.is_playing(Track::DogHold));
    }

    #[test]
    fn reset_stops_the_loop() {
        let mut h = Harness::new(1);
        let mut g = Dog::default();
        g.handle_input(&down(), &mut h.ctx());
        g.reset(&mut h.ctx());
        assert!(!h.audio.is_playing(Track::DogHold));
        assert_eq!(g, Dog::default());
    }
}
