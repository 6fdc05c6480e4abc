//! Monty Stomp: bring the giant foot down on the civilized, avoid the nails.
//!
//! The foot runs an explicit state machine. A press starts a stomp that is
//! latched until the foot reaches the ground, so a quick click still lands.
//!
//! ```text
//! Idle --press--> Descending --ground, held--> Holding --release--> Ascending
//!                     |                                                |
//!                     +----ground, released----> Ascending --top--> Idle
//!                                                Ascending --press--> Descending
//! ```

use rand::Rng;
use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::widgets::canvas::{Circle, Rectangle};
use ratzilla::ratatui::Frame;

use super::{field, lerp, print_centered, up, MiniCtx, MiniEvent, Minigame, TICK_MS};
use crate::audio::Track;

const CREATURES: usize = 6;
const NAILS: usize = 5;
const LIVES: u8 = 3;
const FOOT_W: f64 = 0.18;
const FOOT_H: f64 = 0.3;
/// Foot centre when stomped.
const DOWN_Y: f64 = 0.65;
/// Foot centre at rest, mostly above the field.
const UP_Y: f64 = -FOOT_H * 0.25;
/// Creatures and nails are kept inside the band the foot can reach.
const BAND_TOP: f64 = DOWN_Y - FOOT_H * 0.5;
const BAND_BOTTOM: f64 = DOWN_Y + FOOT_H * 0.25;
const HIT_FLASH_MS: f64 = 220.0;
const MAX_SPEED: f64 = 0.0075;
const AVOID_PUSH: f64 = 0.0004;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StompState {
    #[default]
    Idle,
    Descending,
    Holding,
    Ascending,
}

impl StompState {
    /// Whether the foot squashes what it touches.
    pub fn stomping(self) -> bool {
        matches!(self, StompState::Descending | StompState::Holding)
    }
}

/// An axis-aligned box in field coordinates, `(x, y)` at the top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Body {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    vx: f64,
    live: bool,
}

impl Body {
    fn overlaps_foot(&self, fx: f64, fy: f64) -> bool {
        let (l, r) = (fx - FOOT_W / 2.0, fx + FOOT_W / 2.0);
        let (t, b) = (fy - FOOT_H / 2.0, fy + FOOT_H / 2.0);
        !(r < self.x || l > self.x + self.w || b < self.y || t > self.y + self.h)
    }

    fn keep_in_band(&mut self) {
        self.y = self.y.clamp(BAND_TOP, (BAND_BOTTOM - self.h).max(BAND_TOP));
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Monty {
    creatures: Vec<Body>,
    nails: Vec<Body>,
    foot_x: f64,
    foot_y: f64,
    pressed: bool,
    stomp: StompState,
    lives: u8,
    hit_flash_ms: f64,
}

impl Monty {
    pub fn creatures_left(&self) -> usize {
        self.creatures.iter().filter(|c| c.live).count()
    }

    fn advance_foot(&mut self, ctx: &mut MiniCtx) {
        self.stomp = match self.stomp {
            StompState::Idle | StompState::Ascending if self.pressed => {
                ctx.audio.play_once(Track::MontyStomp);
                StompState::Descending
            }
            StompState::Descending => {
                self.foot_y = lerp(self.foot_y, DOWN_Y, 0.35);
                if self.foot_y >= DOWN_Y - 0.002 {
                    self.foot_y = DOWN_Y;
                    if self.pressed {
                        StompState::Holding
                    } else {
                        StompState::Ascending
                    }
                } else {
                    StompState::Descending
                }
            }
            StompState::Holding if !self.pressed => StompState::Ascending,
            StompState::Holding => StompState::Holding,
            StompState::Ascending => {
                self.foot_y = lerp(self.foot_y, UP_Y, 0.18);
                if self.foot_y <= UP_Y + 0.002 {
                    self.foot_y = UP_Y;
                    StompState::Idle
                } else {
                    StompState::Ascending
                }
            }
            StompState::Idle => StompState::Idle,
        };
    }

    fn squash(&mut self, ctx: &mut MiniCtx) {
        let (fx, fy) = (self.foot_x, self.foot_y);
        for c in self.creatures.iter_mut().filter(|c| c.live) {
            if c.overlaps_foot(fx, fy) {
                c.live = false;
                ctx.audio.play_once(Track::MontyHit);
            }
        }
        for n in self.nails.iter_mut().filter(|n| n.live) {
            if n.overlaps_foot(fx, fy) {
                n.live = false;
                self.lives = self.lives.saturating_sub(1);
                self.hit_flash_ms = HIT_FLASH_MS;
                ctx.audio.play_once(Track::Scream);
            }
        }
    }
}

impl Minigame for Monty {
    fn reset(&mut self, ctx: &mut MiniCtx) {
        let rng = &mut *ctx.rng;
        let creatures = (0..CREATURES)
            .map(|i| {
                let speed = if i < 2 {
                    rng.random_range(0.004..0.006)
                } else {
                    rng.random_range(0.002..0.0036)
                };
                let dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
                let mut c = Body {
                    x: rng.random_range(0.1..0.9),
                    y: rng.random_range(0.4..0.8),
                    w: rng.random_range(0.1..0.16),
                    h: rng.random_range(0.1..0.16),
                    vx: dir * speed,
                    live: true,
                };
                c.keep_in_band();
                c
            })
            .collect();
        let nails = (0..NAILS)
            .map(|_| {
                let dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
                let mut n = Body {
                    x: rng.random_range(0.05..0.95),
                    y: rng.random_range(0.55..0.85),
                    w: 0.05,
                    h: 0.1,
                    vx: dir * rng.random_range(0.002..0.003),
                    live: true,
                };
                n.keep_in_band();
                n
            })
            .collect();
        *self = Self {
            creatures,
            nails,
            foot_x: 0.75,
            foot_y: UP_Y,
            pressed: false,
            stomp: StompState::Idle,
            lives: LIVES,
            hit_flash_ms: 0.0,
        };
    }

    fn handle_input(&mut self, event: &MiniEvent, _ctx: &mut MiniCtx) -> bool {
        match *event {
            MiniEvent::PointerDown(p) => {
                self.foot_x = p.x;
                self.pressed = true;
            }
            MiniEvent::PointerUp(p) => {
                self.foot_x = p.x;
                self.pressed = false;
            }
            MiniEvent::PointerMove(p) => self.foot_x = p.x,
            MiniEvent::Key(_) => return false,
        }
        true
    }

    fn tick(&mut self, ctx: &mut MiniCtx) {
        let foot_x = self.foot_x;
        for c in self.creatures.iter_mut().filter(|c| c.live) {
            let dx = c.x + c.w / 2.0 - foot_x;
            if dx.abs() < 0.25 {
                c.vx = (c.vx + AVOID_PUSH * dx.signum()).clamp(-MAX_SPEED, MAX_SPEED);
            }
            c.x += c.vx;
            if c.x < 0.0 {
                c.x = 0.0;
                c.vx = -c.vx;
            }
            if c.x + c.w > 1.0 {
                c.x = 1.0 - c.w;
                c.vx = -c.vx;
            }
        }
        for n in self.nails.iter_mut().filter(|n| n.live) {
            n.x += n.vx;
            if n.x < 0.0 || n.x + n.w > 1.0 {
                n.vx = -n.vx;
            }
        }

        self.advance_foot(ctx);
        if self.stomp.stomping() {
            self.squash(ctx);
        }
        self.hit_flash_ms = (self.hit_flash_ms - TICK_MS).max(0.0);
    }

    fn render(&self, f: &mut Frame, area: Rect, _elapsed_ms: f64) {
        let cols = area.width;
        let flattened = self.creatures_left() == 0;
        let background = if self.hit_flash_ms > 0.0 || self.lives == 0 {
            Color::Rgb(255, 150, 130)
        } else if flattened {
            Color::Rgb(210, 240, 190)
        } else {
            Color::Rgb(255, 235, 180)
        };
        let canvas = field(background, |ctx| {
            for c in self.creatures.iter().filter(|c| c.live) {
                ctx.draw(&Rectangle {
                    x: c.x,
                    y: up(c.y + c.h),
                    width: c.w,
                    height: c.h,
                    color: Color::Rgb(40, 40, 120),
                });
            }
            for n in self.nails.iter().filter(|n| n.live) {
                ctx.draw(&Rectangle {
                    x: n.x,
                    y: up(n.y + n.h),
                    width: n.w,
                    height: n.h,
                    color: Color::Rgb(110, 110, 110),
                });
            }
            ctx.layer();
            ctx.draw(&Rectangle {
                x: self.foot_x - FOOT_W / 2.0,
                y: up(self.foot_y + FOOT_H / 2.0),
                width: FOOT_W,
                height: FOOT_H,
                color: Color::Rgb(255, 200, 170),
            });

            for i in 0..LIVES {
                ctx.draw(&Circle {
                    x: 0.86 + i as f64 * 0.04,
                    y: up(0.08),
                    radius: 0.012,
                    color: if i < self.lives {
                        Color::Rgb(220, 40, 60)
                    } else {
                        Color::Rgb(120, 120, 120)
                    },
                });
            }

            let status = if self.lives == 0 {
                Some("AND NOW FOR SOMETHING COMPLETELY HURT")
            } else if flattened {
                Some("AND NOW FOR SOMETHING COMPLETELY FLATTENED")
            } else {
                None
            };
            if let Some(text) = status {
                print_centered(
                    ctx,
                    cols,
                    0.25,
                    text,
                    Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
                );
            }
        });
        f.render_widget(canvas, area);
    }
}
