//! The arcade flow controller.
//!
//! `Arcade` owns the one `Session` and is its only writer. The host calls
//! [`Arcade::tick`] once per frame and [`Arcade::handle_input`] for each
//! event; both take the current timestamp so every timing decision is a pure
//! function of injected time.
//!
//! ```text
//! Start ──begin──▶ Playing ──6 s──▶ Transitioning ──2 s──▶ Playing …
//!                     ▲  │                 │
//!                 confirm│toggle           └─last of pass──▶ End ──restart──▶ Start
//!                     │  ▼
//!                     Menu
//! ```

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use ratzilla::ratatui::layout::Rect;

use crate::audio::{AudioBank, Track};
use crate::config::{Config, ConfigError, BED_VOLUME, NEXT_CUE_VOLUME, TICKS_PER_SEC};
use crate::input::{ClickState, InputEvent, Key, RESTART_BUTTON, START_BUTTON};
use crate::menu::{hover_index, MenuState};
use crate::minis::{MiniCtx, MiniEvent, Minigame, Point};
use crate::registry::{record, Catalog, MinigameId, MinigameRecord};
use crate::sequence::{SequenceMode, SequencePolicy};
use crate::time::{GameTime, PhaseClock};

/// Top-level mode; exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    Menu,
    Playing,
    Transitioning,
    End,
}

/// Everything that lives for one run, from the start screen to the end screen.
///
/// Restarting builds a new `Session` instead of clearing this one.
pub struct Session {
    phase: Phase,
    current: MinigameId,
    clock: PhaseClock,
    sequence: SequencePolicy,
    menu: Option<MenuState>,
    active: Option<Box<dyn Minigame>>,
    frame_time: GameTime,
    /// Randomness handed to minigames.
    rng: Pcg32,
    /// Minigame entries so far this run.
    plays: u64,
}

impl Session {
    fn new(
        mode: SequenceMode,
        catalog: &Catalog,
        seeder: &mut Pcg32,
        now_ms: f64,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            phase: Phase::Start,
            current: catalog.first(),
            clock: PhaseClock::starting_at(now_ms),
            sequence: SequencePolicy::new(mode, catalog, seeder.next_u64())?,
            menu: None,
            active: None,
            frame_time: GameTime::new(TICKS_PER_SEC),
            rng: Pcg32::seed_from_u64(seeder.next_u64()),
            plays: 0,
        })
    }
}

pub struct Arcade<A: AudioBank> {
    catalog: Catalog,
    start_screen: bool,
    play_duration_ms: f64,
    transition_duration_ms: f64,
    audio: A,
    seeder: Pcg32,
    session: Session,
}

impl<A: AudioBank> Arcade<A> {
    /// Validate `config` and open a session at `now_ms`.
    pub fn new(config: &Config, audio: A, seed: u64, now_ms: f64) -> Result<Self, ConfigError> {
        let catalog = config.catalog()?;
        let mut seeder = Pcg32::seed_from_u64(seed);
        let session = Session::new(config.sequence_mode, &catalog, &mut seeder, now_ms)?;
        log::info!(
            "arcade ready: {:?} mode, {} minigames, seed {}",
            config.sequence_mode,
            catalog.len(),
            seed
        );
        let mut arcade = Self {
            catalog,
            start_screen: config.start_screen,
            play_duration_ms: config.play_duration_ms,
            transition_duration_ms: config.transition_duration_ms,
            audio,
            seeder,
            session,
        };
        if !arcade.start_screen {
            arcade.begin(now_ms);
        }
        Ok(arcade)
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn current_record(&self) -> Option<&'static MinigameRecord> {
        record(self.session.current)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn menu(&self) -> Option<&MenuState> {
        self.session.menu.as_ref()
    }

    pub fn active(&self) -> Option<&dyn Minigame> {
        self.session.active.as_deref()
    }

    /// Milliseconds since the current phase began.
    pub fn elapsed(&self, now_ms: f64) -> f64 {
        self.session.clock.elapsed(now_ms)
    }

    /// Advance one frame: at most one phase transition, then minigame motion.
    pub fn tick(&mut self, now_ms: f64) {
        match self.session.phase {
            Phase::Playing if self.session.clock.expired(now_ms, self.play_duration_ms) => {
                self.begin_transition(now_ms);
            }
            Phase::Transitioning
                if self.session.clock.expired(now_ms, self.transition_duration_ms) =>
            {
                self.finish_transition(now_ms);
            }
            _ => {}
        }

        if self.session.phase == Phase::Playing {
            self.step_active(now_ms);
        }
    }

    /// Route one input event according to the current phase.
    ///
    /// `layout` is what the last frame drew: buttons, menu items and the play
    /// area.
    pub fn handle_input(&mut self, event: InputEvent, layout: &ClickState, now_ms: f64) {
        match self.session.phase {
            Phase::Start => {
                if is_activation(event, layout, START_BUTTON) {
                    self.begin(now_ms);
                }
            }
            Phase::End => {
                if is_activation(event, layout, RESTART_BUTTON) {
                    self.restart(now_ms);
                }
            }
            Phase::Menu => self.menu_input(event, layout, now_ms),
            Phase::Playing | Phase::Transitioning => {
                if is_menu_toggle(event) {
                    self.enter_menu(now_ms);
                } else if self.session.phase == Phase::Playing {
                    self.forward(event, layout.play_area, now_ms);
                }
            }
        }
    }

    fn menu_input(&mut self, event: InputEvent, layout: &ClickState, now_ms: f64) {
        let len = self.catalog.len();
        let Some(menu) = self.session.menu.as_mut() else {
            return;
        };
        match event {
            InputEvent::Key(Key::Tab | Key::Esc) => {
                let current = self.session.current;
                log::debug!("menu closed, replaying {}", current);
                self.start_minigame(current, now_ms);
            }
            InputEvent::Key(Key::Up) => {
                menu.move_selection(-1, len);
                log::debug!("menu selection {}", menu.selected);
            }
            InputEvent::Key(Key::Down) => {
                menu.move_selection(1, len);
                log::debug!("menu selection {}", menu.selected);
            }
            InputEvent::Key(Key::Enter) => {
                let chosen = menu.confirm(&self.catalog);
                self.jump_to(chosen, now_ms);
            }
            InputEvent::PointerDown { col, row } => {
                if let Some(index) = hover_index(col, row, &layout.menu_items) {
                    menu.selected = index;
                    let chosen = menu.confirm(&self.catalog);
                    self.jump_to(chosen, now_ms);
                }
            }
            InputEvent::PointerMove { col, row } => menu.set_hover(col, row, &layout.menu_items),
            _ => {}
        }
    }

    fn forward(&mut self, event: InputEvent, play_area: Rect, now_ms: f64) {
        let mini_event = if let InputEvent::Key(key) = event {
            MiniEvent::Key(key)
        } else {
            let Some(p) = event
                .position()
                .and_then(|(col, row)| normalize(play_area, col, row))
            else {
                return;
            };
            match event {
                InputEvent::PointerDown { .. } => MiniEvent::PointerDown(p),
                InputEvent::PointerUp { .. } => MiniEvent::PointerUp(p),
                _ => MiniEvent::PointerMove(p),
            }
        };
        let elapsed_ms = self.session.clock.elapsed(now_ms);
        let current = self.session.current;
        let Session { active, rng, .. } = &mut self.session;
        if let Some(mini) = active.as_mut() {
            let mut ctx = MiniCtx {
                audio: &mut self.audio,
                rng,
                elapsed_ms,
            };
            if mini.handle_input(&mini_event, &mut ctx) {
                log::debug!("{:?} changed {}", mini_event, current);
            }
        }
    }

    fn step_active(&mut self, now_ms: f64) {
        let ticks = self.session.frame_time.update(now_ms);
        let ms_per_tick = self.session.frame_time.ms_per_tick();
        let elapsed_ms = self.session.clock.elapsed(now_ms);
        let Session { active, rng, .. } = &mut self.session;
        let Some(mini) = active.as_mut() else {
            return;
        };
        for i in 0..ticks {
            // Each step sees the time it stands for, not the frame's.
            let behind = (ticks - 1 - i) as f64 * ms_per_tick;
            let mut ctx = MiniCtx {
                audio: &mut self.audio,
                rng: &mut *rng,
                elapsed_ms: (elapsed_ms - behind).max(0.0),
            };
            mini.tick(&mut ctx);
        }
    }

    fn set_phase(&mut self, to: Phase, now_ms: f64) {
        log::info!(
            "{:?} -> {:?} ({})",
            self.session.phase,
            to,
            self.session.current
        );
        self.session.phase = to;
        self.session.clock = PhaseClock::starting_at(now_ms);
    }

    fn begin(&mut self, now_ms: f64) {
        let first = self
            .session
            .sequence
            .next_for_start(&self.catalog, self.session.current);
        self.start_minigame(first, now_ms);
    }

    /// Stop audio, build and reset `id`, enter `Playing`, start its bed.
    fn start_minigame(&mut self, id: MinigameId, now_ms: f64) {
        self.audio.stop_all();
        self.session.menu = None;
        self.session.current = id;
        self.session.plays += 1;

        self.session.active = match record(id) {
            Some(rec) => {
                let mut mini = (rec.spawn)();
                let mut ctx = MiniCtx {
                    audio: &mut self.audio,
                    rng: &mut self.session.rng,
                    elapsed_ms: 0.0,
                };
                mini.reset(&mut ctx);
                Some(mini)
            }
            None => {
                log::error!("minigame {} is not registered", id);
                None
            }
        };

        self.set_phase(Phase::Playing, now_ms);
        self.session.frame_time.restart(now_ms);

        if let Some(bed) = record(id).and_then(|rec| rec.background) {
            debug_assert!(bed.is_bed());
            self.audio.play_loop(bed, BED_VOLUME);
        }
    }

    fn begin_transition(&mut self, now_ms: f64) {
        self.audio.stop_all();
        self.session.active = None;
        self.audio.set_volume(Track::Next, NEXT_CUE_VOLUME);
        self.audio.play_once(Track::Next);
        self.set_phase(Phase::Transitioning, now_ms);
    }

    fn finish_transition(&mut self, now_ms: f64) {
        let current = self.session.current;
        if self.session.sequence.is_last(&self.catalog, current) {
            log::info!("sequence complete after {} plays", self.session.plays);
            self.audio.stop_all();
            self.set_phase(Phase::End, now_ms);
            return;
        }
        let next = self.session.sequence.next(&self.catalog, current);
        self.start_minigame(next, now_ms);
    }

    fn enter_menu(&mut self, now_ms: f64) {
        self.audio.stop_all();
        self.session.active = None;
        self.session.menu = Some(MenuState::enter(&self.catalog, self.session.current));
        self.set_phase(Phase::Menu, now_ms);
    }

    fn jump_to(&mut self, id: MinigameId, now_ms: f64) {
        log::debug!("menu jump to {}", id);
        self.session.sequence.sync_to(&self.catalog, id);
        self.start_minigame(id, now_ms);
    }

    /// Throw the session away and open a fresh one.
    fn restart(&mut self, now_ms: f64) {
        self.audio.stop_all();
        let mode = self.session.sequence.mode();
        match Session::new(mode, &self.catalog, &mut self.seeder, now_ms) {
            Ok(session) => {
                log::info!("{:?} -> Start (new session)", self.session.phase);
                self.session = session;
            }
            Err(e) => {
                log::error!("could not restart: {}", e);
                return;
            }
        }
        if !self.start_screen {
            self.begin(now_ms);
        }
    }
}

fn is_activation(event: InputEvent, layout: &ClickState, button: u16) -> bool {
    match event {
        InputEvent::Key(Key::Enter) => true,
        InputEvent::PointerDown { col, row } => layout.hit_test(col, row) == Some(button),
        _ => false,
    }
}

fn is_menu_toggle(event: InputEvent) -> bool {
    matches!(event, InputEvent::Key(Key::Tab | Key::Esc))
}

/// Map a cell to play-area coordinates, sampling the centre of the cell.
///
/// Cells outside the area map outside `0..=1`. `None` until a play area has
/// been drawn.
pub fn normalize(area: Rect, col: u16, row: u16) -> Option<Point> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    Some(Point::new(
        (col as f64 - area.x as f64 + 0.5) / area.width as f64,
        (row as f64 - area.y as f64 + 0.5) / area.height as f64,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::MemoryAudioBank;
    use crate::input::pixel_to_nearest_cell;
    use crate::config::{PLAY_DURATION_MS, TRANSITION_DURATION_MS};
    use proptest::prelude::*;

    fn config(catalog: &[u8], mode: SequenceMode, start_screen: bool) -> Config {
        Config {
            sequence_mode: mode,
            start_screen,
            catalog: catalog.to_vec(),
            ..Config::default()
        }
    }

    fn arcade(catalog: &[u8], mode: SequenceMode, start_screen: bool) -> Arcade<MemoryAudioBank> {
        Arcade::new(
            &config(catalog, mode, start_screen),
            MemoryAudioBank::default(),
            42,
            0.0,
        )
        .unwrap()
    }

    fn id(n: u8) -> MinigameId {
        MinigameId::new(n).unwrap()
    }

    fn key(k: Key) -> InputEvent {
        InputEvent::Key(k)
    }

    fn no_layout() -> ClickState {
        ClickState::default()
    }

    #[test]
    fn scenario_sequential_pass_ends() {
        let mut a = arcade(&[1, 2, 3], SequenceMode::Sequential, false);
        assert_eq!((a.phase(), a.session.current), (Phase::Playing, id(1)));

        let expected = [
            (5999.0, Phase::Playing, 1),
            (6000.0, Phase::Transitioning, 1),
            (8000.0, Phase::Playing, 2),
            (14000.0, Phase::Transitioning, 2),
            (16000.0, Phase::Playing, 3),
            (22000.0, Phase::Transitioning, 3),
            (24000.0, Phase::End, 3),
        ];
        for (t, phase, n) in expected {
            a.tick(t);
            assert_eq!((a.phase(), a.session.current), (phase, id(n)), "at t={}", t);
        }
        // End holds until the player acts.
        a.tick(100_000.0);
        assert_eq!(a.phase(), Phase::End);
    }

    #[test]
    fn scenario_menu_jump() {
        let mut a = arcade(&[1, 2, 3], SequenceMode::Sequential, false);
        a.tick(6000.0);
        a.tick(8000.0);
        assert_eq!(a.session.current, id(2));

        a.handle_input(key(Key::Tab), &no_layout(), 10_500.0);
        assert_eq!(a.phase(), Phase::Menu);
        assert_eq!(a.menu().map(|m| m.selected), Some(1));

        a.handle_input(key(Key::Down), &no_layout(), 10_600.0);
        assert_eq!(a.menu().map(|m| m.selected), Some(2));

        let plays = a.session.plays;
        a.handle_input(key(Key::Enter), &no_layout(), 10_700.0);
        assert_eq!((a.phase(), a.session.current), (Phase::Playing, id(3)));
        assert_eq!(a.session.plays, plays + 1);
        assert!(a.active().is_some());
        assert_eq!(a.elapsed(10_700.0), 0.0);
        assert_eq!(a.session.sequence.cursor(), 2);
    }

    #[test]
    fn scenario_restart_rewinds_sequence() {
        let mut a = arcade(&[1, 2, 3], SequenceMode::Sequential, true);
        assert_eq!(a.phase(), Phase::Start);
        a.handle_input(key(Key::Enter), &no_layout(), 0.0);
        for t in [6000.0, 8000.0, 14000.0, 16000.0, 22000.0, 24000.0] {
            a.tick(t);
        }
        assert_eq!(a.phase(), Phase::End);

        a.handle_input(key(Key::Enter), &no_layout(), 30_000.0);
        assert_eq!(a.phase(), Phase::Start);
        assert_eq!(a.session.plays, 0);

        a.handle_input(key(Key::Enter), &no_layout(), 31_000.0);
        assert_eq!((a.phase(), a.session.current), (Phase::Playing, id(1)));
        assert_eq!(a.session.sequence.cursor(), 0);
    }

    #[test]
    fn start_button_click_begins() {
        let mut a = arcade(&[1, 2], SequenceMode::Sequential, true);
        let mut layout = ClickState::new();
        layout.add_click_target(Rect::new(30, 10, 20, 3), START_BUTTON);

        a.handle_input(InputEvent::PointerDown { col: 5, row: 5 }, &layout, 0.0);
        assert_eq!(a.phase(), Phase::Start);
        a.handle_input(InputEvent::PointerDown { col: 35, row: 11 }, &layout, 0.0);
        assert_eq!(a.phase(), Phase::Playing);
    }

    #[test]
    fn menu_toggle_ignored_on_start_and_end() {
        let mut a = arcade(&[1, 2], SequenceMode::Sequential, true);
        a.handle_input(key(Key::Tab), &no_layout(), 0.0);
        a.handle_input(key(Key::Esc), &no_layout(), 0.0);
        assert_eq!(a.phase(), Phase::Start);
    }

    #[test]
    fn toggling_menu_twice_replays_current() {
        let mut a = arcade(&[1, 2], SequenceMode::Sequential, false);
        assert!(a.audio.is_playing(Track::CloudBed));

        a.handle_input(key(Key::Tab), &no_layout(), 2000.0);
        assert_eq!(a.phase(), Phase::Menu);
        assert!(a.active().is_none());
        assert!(!a.audio.any_playing());

        a.handle_input(key(Key::Esc), &no_layout(), 3000.0);
        assert_eq!((a.phase(), a.session.current), (Phase::Playing, id(1)));
        assert_eq!(a.elapsed(3000.0), 0.0);
        assert!(a.audio.is_playing(Track::CloudBed));
        assert_eq!(a.session.plays, 2);
    }

    #[test]
    fn menu_opens_from_transition() {
        let mut a = arcade(&[1, 2], SequenceMode::Sequential, false);
        a.tick(PLAY_DURATION_MS);
        assert_eq!(a.phase(), Phase::Transitioning);
        a.handle_input(key(Key::Tab), &no_layout(), PLAY_DURATION_MS + 10.0);
        assert_eq!(a.phase(), Phase::Menu);
        assert_eq!(a.menu().map(|m| m.selected), Some(0));
    }

    #[test]
    fn menu_click_confirms_item() {
        let mut a = arcade(&[1, 2, 3, 4], SequenceMode::Sequential, false);
        a.handle_input(key(Key::Tab), &no_layout(), 100.0);
        let mut layout = ClickState::new();
        layout.menu_items = crate::menu::layout_hitboxes(Rect::new(0, 4, 62, 20), 4, 2, 2);

        a.handle_input(InputEvent::PointerMove { col: 45, row: 8 }, &layout, 150.0);
        assert_eq!(a.menu().and_then(|m| m.hover), Some(3));

        a.handle_input(InputEvent::PointerDown { col: 45, row: 8 }, &layout, 200.0);
        assert_eq!((a.phase(), a.session.current), (Phase::Playing, id(4)));
        assert!(a.menu().is_none());
    }

    #[test]
    fn menu_click_between_items_does_nothing() {
        let mut a = arcade(&[1, 2], SequenceMode::Sequential, false);
        a.handle_input(key(Key::Tab), &no_layout(), 100.0);
        let mut layout = ClickState::new();
        layout.menu_items = crate::menu::layout_hitboxes(Rect::new(0, 4, 62, 20), 2, 2, 2);
        a.handle_input(InputEvent::PointerDown { col: 31, row: 4 }, &layout, 200.0);
        assert_eq!(a.phase(), Phase::Menu);
    }

    #[test]
    fn transition_plays_next_cue_once_quietly() {
        let mut a = arcade(&[1, 2], SequenceMode::Sequential, false);
        a.tick(PLAY_DURATION_MS);
        a.tick(PLAY_DURATION_MS + 500.0);
        assert_eq!(a.audio.count_one_shots(Track::Next), 1);
        assert_eq!(a.audio.volume(Track::Next), Some(NEXT_CUE_VOLUME));
        assert!(a.audio.playing_beds().is_empty());
        assert!(a.active().is_none());
    }

    #[test]
    fn beds_follow_the_active_minigame() {
        // 1 has the cloud bed, 2 has none, 3 has the face bed.
        let mut a = arcade(&[1, 2, 3], SequenceMode::Sequential, false);
        assert_eq!(a.audio.playing_beds(), vec![Track::CloudBed]);
        a.tick(6000.0);
        a.tick(8000.0);
        assert!(a.audio.playing_beds().is_empty());
        a.tick(14000.0);
        a.tick(16000.0);
        assert_eq!(a.audio.playing_beds(), vec![Track::FaceBed]);
        a.tick(22000.0);
        a.tick(24000.0);
        assert!(!a.audio.any_playing());
    }

    #[test]
    fn missing_bed_is_tolerated() {
        let mut a = Arcade::new(
            &config(&[1, 2], SequenceMode::Sequential, false),
            MemoryAudioBank::with_missing(&[Track::CloudBed, Track::Next]),
            1,
            0.0,
        )
        .unwrap();
        assert!(!a.audio.any_playing());
        a.tick(6000.0);
        a.tick(8000.0);
        assert_eq!(a.session.current, id(2));
    }

    #[test]
    fn random_mode_never_ends() {
        let mut a = arcade(&[1, 2], SequenceMode::Random, false);
        let mut now = 0.0;
        let mut prev = a.session.current;
        for _ in 0..50 {
            now += PLAY_DURATION_MS;
            a.tick(now);
            now += TRANSITION_DURATION_MS;
            a.tick(now);
            assert_eq!(a.phase(), Phase::Playing);
            assert_ne!(a.session.current, prev);
            prev = a.session.current;
        }
    }

    #[test]
    fn random_mode_needs_two() {
        let result = Arcade::new(
            &config(&[5], SequenceMode::Random, true),
            MemoryAudioBank::default(),
            1,
            0.0,
        );
        assert!(matches!(result, Err(ConfigError::RandomNeedsTwo(1))));
    }

    #[test]
    fn single_entry_sequential_ends_after_one() {
        let mut a = arcade(&[7], SequenceMode::Sequential, false);
        a.tick(6000.0);
        a.tick(8000.0);
        assert_eq!(a.phase(), Phase::End);
    }

    #[test]
    fn pointer_input_reaches_the_active_minigame() {
        // Minigame 7 starts its hold loop on press.
        let mut a = arcade(&[7], SequenceMode::Sequential, false);
        let mut layout = ClickState::new();
        layout.play_area = Rect::new(0, 2, 80, 20);
        a.handle_input(InputEvent::PointerDown { col: 40, row: 12 }, &layout, 500.0);
        assert!(a.audio.is_playing(Track::DogHold));

        a.handle_input(key(Key::Tab), &layout, 600.0);
        assert!(!a.audio.is_playing(Track::DogHold));
    }

    #[test]
    fn release_on_the_grid_edge_ends_a_hold() {
        let mut a = arcade(&[7], SequenceMode::Sequential, false);
        let mut layout = ClickState::new();
        layout.play_area = Rect::new(0, 2, 80, 20);
        a.handle_input(InputEvent::PointerDown { col: 40, row: 12 }, &layout, 500.0);
        // A release dragged off the page arrives clamped to the last row, below the play area.
        let (col, row) = pixel_to_nearest_cell(400.0, 2000.0, 800.0, 450.0, 80, 30).unwrap();
        a.handle_input(InputEvent::PointerUp { col, row }, &layout, 700.0);
        assert!(!a.audio.is_playing(Track::DogHold));
        assert_eq!(a.audio.count_one_shots(Track::DogBite), 1);
    }

    #[test]
    fn pointer_input_dropped_before_first_frame() {
        let mut a = arcade(&[7], SequenceMode::Sequential, false);
        a.handle_input(InputEvent::PointerDown { col: 40, row: 12 }, &no_layout(), 500.0);
        assert!(!a.audio.is_playing(Track::DogHold));
    }

    #[test]
    fn transition_ignores_gameplay_input() {
        let mut a = arcade(&[7, 1], SequenceMode::Sequential, false);
        let mut layout = ClickState::new();
        layout.play_area = Rect::new(0, 0, 80, 20);
        a.tick(6000.0);
        a.handle_input(InputEvent::PointerDown { col: 40, row: 10 }, &layout, 6100.0);
        assert!(!a.audio.is_playing(Track::DogHold));
    }

    #[test]
    fn normalize_samples_cell_centres() {
        let area = Rect::new(10, 5, 20, 10);
        assert_eq!(normalize(area, 20, 10), Some(Point::new(0.525, 0.55)));
        assert_eq!(normalize(area, 10, 5), Some(Point::new(0.025, 0.05)));
        let outside = normalize(area, 2, 1).unwrap();
        assert!(!outside.inside());
        assert_eq!(normalize(Rect::default(), 0, 0), None);
    }

    #[test]
    fn minigames_tick_at_fixed_rate() {
        let mut a = arcade(&[16], SequenceMode::Sequential, false);
        for i in 1..=60 {
            a.tick(i as f64 * 1000.0 / 60.0);
        }
        assert!(a.session.frame_time.total_ticks >= 59);
    }

    proptest! {
        #[test]
        fn prop_play_expires_regardless_of_frame_rate(
            deltas in proptest::collection::vec(1.0f64..250.0, 1..200),
        ) {
            let mut a = arcade(&[1, 2, 3], SequenceMode::Sequential, true);
            a.handle_input(key(Key::Enter), &no_layout(), 0.0);
            prop_assert_eq!(a.phase(), Phase::Playing);
            let mut now = 0.0;
            for d in &deltas {
                now += d;
                a.tick(now);
                if now < PLAY_DURATION_MS {
                    prop_assert_eq!(a.phase(), Phase::Playing);
                } else {
                    // The first frame at or past the deadline transitions, once.
                    prop_assert_eq!(a.phase(), Phase::Transitioning);
                    prop_assert_eq!(a.session.current, id(1));
                    break;
                }
            }
        }

        #[test]
        fn prop_at_most_one_bed(
            seed in any::<u64>(),
            steps in proptest::collection::vec((1.0f64..3000.0, 0u8..4), 1..120),
        ) {
            let mut a = Arcade::new(
                &config(&(1..=16).collect::<Vec<u8>>(), SequenceMode::Random, false),
                MemoryAudioBank::default(),
                seed,
                0.0,
            )
            .unwrap();
            let mut now = 0.0;
            for (d, action) in steps {
                now += d;
                match action {
                    1 => a.handle_input(key(Key::Tab), &no_layout(), now),
                    2 => a.handle_input(key(Key::Space), &no_layout(), now),
                    3 => a.handle_input(key(Key::Down), &no_layout(), now),
                    _ => {}
                }
                a.tick(now);
                prop_assert!(a.audio.playing_beds().len() <= 1, "{:?}", a.audio.playing_beds());
            }
        }

        #[test]
        fn prop_sequential_visits_each_once(n in 1usize..=16) {
            let ids: Vec<u8> = (1..=n as u8).collect();
            let mut a = arcade(&ids, SequenceMode::Sequential, false);
            let mut seen = vec![a.session.current.get()];
            let mut now = 0.0;
            while a.phase() != Phase::End {
                now += PLAY_DURATION_MS;
                a.tick(now);
                now += TRANSITION_DURATION_MS;
                a.tick(now);
                if a.phase() == Phase::Playing {
                    seen.push(a.session.current.get());
                }
            }
            prop_assert_eq!(seen, ids);
        }
    }
}
