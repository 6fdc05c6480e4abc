//! Legal Malware Text: terms multiply until Space freezes them.
//!
//! Browsers only report key presses, so holding Space is recognised through
//! key auto-repeat: each press keeps the swarm frozen for a short window.

use rand::seq::IndexedRandom;
use rand::Rng;
use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::Frame;

use super::{field, print_centered, print_centered_at, MiniCtx, MiniEvent, Minigame, Point, TICK_MS};
use crate::audio::Track;
use crate::input::Key;

const SPAWN_EVERY_MS: f64 = 80.0;
const MAX_SNIPPETS: usize = 240;
/// One Space press counts as holding for this long.
const HOLD_WINDOW_MS: f64 = 600.0;
/// The legal bed cuts out after this much continuous holding.
const BED_LIMIT_MS: f64 = 3000.0;
const BED_VOLUME: f32 = 0.5;

const TERMS: [&str; 30] = [
    "LIMITED LIABILITY NOTICE",
    "NON-DISCLOSURE ACKNOWLEDGED",
    "FOR INTERNAL USE ONLY",
    "USER CONSENT PENDING",
    "INTELLECTUAL PROPERTY CLAIM",
    "VOID WHERE PROHIBITED",
    "SUBJECT TO AUDIT",
    "LICENSE AGREEMENT EXPIRED",
    "TERMINATION CLAUSE ACTIVE",
    "FORCE MAJEURE INVOKED",
    "CONTRACTUAL OBLIGATION LOOP",
    "THIRD-PARTY DATA SHARING",
    "INDEMNIFICATION REQUIRED",
    "CONFIDENTIALITY BREACH REPORTED",
    "DISPUTE RESOLUTION IN PROGRESS",
    "PATENT PENDING PERPETUITY",
    "WAIVER OF RIGHTS ACCEPTED",
    "JURISDICTION: UNKNOWN",
    "RETENTION POLICY ENABLED",
    "FINAL SETTLEMENT OFFER",
    "NOTICE OF COMPLIANCE FAILURE",
    "MANDATORY UPDATE ENFORCED",
    "CONSENT FORM OUTDATED",
    "SECTION 404 UNAVAILABLE",
    "NON-COMPETE ACTIVATED",
    "EXCLUSIVITY AGREEMENT VIOLATED",
    "TERMS SUBJECT TO CHANGE",
    "PERPETUAL LICENSE GRANTED",
    "CLAUSE 9.3(B) DISPUTED",
    "CONSUMER RIGHTS OVERRIDDEN",
];

#[derive(Debug, Clone, PartialEq)]
struct Snippet {
    at: Point,
    text: &'static str,
    life_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Legal {
    snippets: Vec<Snippet>,
    last_spawn_ms: f64,
    frozen_until_ms: f64,
    bed_started_ms: Option<f64>,
}

impl Legal {
    pub fn holding(&self, now_ms: f64) -> bool {
        now_ms < self.frozen_until_ms
    }

    fn drive_bed(&mut self, ctx: &mut MiniCtx) {
        let now = ctx.elapsed_ms;
        if !self.holding(now) {
            ctx.audio.stop(Track::LegalBed);
            self.bed_started_ms = None;
            return;
        }
        match self.bed_started_ms {
            None => {
                ctx.audio.play_loop(Track::LegalBed, BED_VOLUME);
                self.bed_started_ms = Some(now);
            }
            Some(start) if now - start > BED_LIMIT_MS => ctx.audio.stop(Track::LegalBed),
            Some(_) => {}
        }
    }
}

impl Minigame for Legal {
    fn reset(&mut self, ctx: &mut MiniCtx) {
        ctx.audio.stop(Track::LegalBed);
        *self = Self {
            last_spawn_ms: ctx.elapsed_ms,
            frozen_until_ms: f64::NEG_INFINITY,
            ..Self::default()
        };
    }

    fn handle_input(&mut self, event: &MiniEvent, ctx: &mut MiniCtx) -> bool {
        if *event != MiniEvent::Key(Key::Space) {
            return false;
        }
        self.frozen_until_ms = ctx.elapsed_ms + HOLD_WINDOW_MS;
        true
    }

    fn tick(&mut self, ctx: &mut MiniCtx) {
        self.drive_bed(ctx);

        let now = ctx.elapsed_ms;
        if !self.holding(now) && now - self.last_spawn_ms > SPAWN_EVERY_MS {
            self.last_spawn_ms = now;
            let text = TERMS.choose(&mut *ctx.rng).copied().unwrap_or(TERMS[0]);
            self.snippets.push(Snippet {
                at: Point::new(ctx.rng.random_range(0.0..1.0), ctx.rng.random_range(0.0..1.0)),
                text,
                life_ms: ctx.rng.random_range(1500.0..4000.0),
            });
            if self.snippets.len() > MAX_SNIPPETS {
                self.snippets.remove(0);
            }
        }

        for s in &mut self.snippets {
            s.life_ms -= TICK_MS;
        }
        self.snippets.retain(|s| s.life_ms > 0.0);
    }

    fn render(&self, f: &mut Frame, area: Rect, elapsed_ms: f64) {
        let cols = area.width;
        let frozen = self.holding(elapsed_ms);
        let canvas = field(Color::Rgb(248, 250, 255), |ctx| {
            let ink = if frozen {
                Color::Rgb(60, 160, 255)
            } else {
                Color::Rgb(10, 10, 10)
            };
            for s in &self.snippets {
                print_centered_at(ctx, cols, s.at.x, s.at.y, s.text, Style::default().fg(ink));
            }
            print_centered(
                ctx,
                cols,
                0.12,
                "THE TERMS ARE MULTIPLYING. HOLD SPACE TO FREEZE THEM",
                Style::default().fg(Color::Rgb(20, 20, 20)).add_modifier(Modifier::BOLD),
            );
        });
        f.render_widget(canvas, area);
    }
}
