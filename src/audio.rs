//! Named audio assets and the playback boundary.
//!
//! The flow controller and the minigames only talk to [`AudioBank`]. Any
//! operation on a track that failed to load is a silent no-op, so callers
//! never special-case missing assets.

use std::collections::HashMap;

use web_sys::HtmlAudioElement;

/// Every sound the arcade knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    // Per-minigame background beds
    CloudBed,
    FaceBed,
    EgoBed,
    SpaghettiBed,
    FormBed,
    MontyBed,
    LegalBed,
    /// "NEXT!" sting between minigames
    Next,
    // Loops and one-shots owned by individual minigames
    TrimmerLoop,
    DogHold,
    DogBite,
    EgoHit,
    EgoPop,
    ResetClick,
    SpaghettiOk,
    SpaghettiWrong,
    BongGavel,
    NudgeBump,
    DeniedForm,
    SausageClick,
    MontyStomp,
    MontyHit,
    Scream,
    SquirrelA,
    SquirrelB,
}

impl Track {
    pub const ALL: [Track; 25] = [
        Track::CloudBed,
        Track::FaceBed,
        Track::EgoBed,
        Track::SpaghettiBed,
        Track::FormBed,
        Track::MontyBed,
        Track::LegalBed,
        Track::Next,
        Track::TrimmerLoop,
        Track::DogHold,
        Track::DogBite,
        Track::EgoHit,
        Track::EgoPop,
        Track::ResetClick,
        Track::SpaghettiOk,
        Track::SpaghettiWrong,
        Track::BongGavel,
        Track::NudgeBump,
        Track::DeniedForm,
        Track::SausageClick,
        Track::MontyStomp,
        Track::MontyHit,
        Track::Scream,
        Track::SquirrelA,
        Track::SquirrelB,
    ];

    /// Asset path relative to the page.
    pub fn file(self) -> &'static str {
        match self {
            Track::CloudBed => "assets/bg_cloud.m4a",
            Track::FaceBed => "assets/bg_face.mp3",
            Track::EgoBed => "assets/bg_ego.flac",
            Track::SpaghettiBed => "assets/bg_spaghetti.m4a",
            Track::FormBed => "assets/bg_form.wav",
            Track::MontyBed => "assets/bg_monty.wav",
            Track::LegalBed => "assets/bg_legal.mp3",
            Track::Next => "assets/next.wav",
            Track::TrimmerLoop => "assets/cloud_trimmer_loop.mp3",
            Track::DogHold => "assets/dog_while_click1wav.wav",
            Track::DogBite => "assets/dog_bite.wav",
            Track::EgoHit => "assets/ego_hit.wav",
            Track::EgoPop => "assets/ego_pop.wav",
            Track::ResetClick => "assets/reset_click.wav",
            Track::SpaghettiOk => "assets/spaghetti_ok.m4a",
            Track::SpaghettiWrong => "assets/spaghetti_wrong.mp3",
            Track::BongGavel => "assets/bong_gavel.wav",
            Track::NudgeBump => "assets/nudge_bump.mp3",
            Track::DeniedForm => "assets/denied_form.wav",
            Track::SausageClick => "assets/sausage_click.wav",
            Track::MontyStomp => "assets/monty_stomp.wav",
            Track::MontyHit => "assets/monty_hit.wav",
            Track::Scream => "assets/scream.mp3",
            Track::SquirrelA => "assets/squirrel2.wav",
            Track::SquirrelB => "assets/squirrel3.wav",
        }
    }

    /// Background beds are the looping tracks tied to a minigame id.
    pub fn is_bed(self) -> bool {
        matches!(
            self,
            Track::CloudBed
                | Track::FaceBed
                | Track::EgoBed
                | Track::SpaghettiBed
                | Track::FormBed
                | Track::MontyBed
                | Track::LegalBed
        )
    }
}

/// Fire-and-forget playback capability.
pub trait AudioBank {
    /// Start `track` looping at `volume` unless it is already playing.
    fn play_loop(&mut self, track: Track, volume: f32);

    /// Play `track` once from the beginning.
    fn play_once(&mut self, track: Track);

    fn stop(&mut self, track: Track);

    fn is_playing(&self, track: Track) -> bool;

    /// Set volume (0.0 - 1.0)
    fn set_volume(&mut self, track: Track, volume: f32);

    fn stop_all(&mut self) {
        for track in Track::ALL {
            self.stop(track);
        }
    }
}

/// Browser playback through one `<audio>` element per track.
pub struct WebAudioBank {
    elements: HashMap<Track, HtmlAudioElement>,
}

impl WebAudioBank {
    pub fn load() -> Self {
        let mut elements = HashMap::new();
        for track in Track::ALL {
            match HtmlAudioElement::new_with_src(track.file()) {
                Ok(el) => {
                    el.set_preload("auto");
                    elements.insert(track, el);
                }
                Err(e) => log::warn!("audio {:?} unavailable: {:?}", track, e),
            }
        }
        log::info!("loaded {}/{} audio tracks", elements.len(), Track::ALL.len());
        Self { elements }
    }
}

impl AudioBank for WebAudioBank {
    fn play_loop(&mut self, track: Track, volume: f32) {
        let Some(el) = self.elements.get(&track) else { return };
        if !el.paused() {
            return;
        }
        el.set_loop(true);
        el.set_volume(volume.clamp(0.0, 1.0) as f64);
        // Rejected promises (autoplay policy) just leave the track silent.
        let _ = el.play();
    }

    fn play_once(&mut self, track: Track) {
        let Some(el) = self.elements.get(&track) else { return };
        el.set_loop(false);
        el.set_current_time(0.0);
        let _ = el.play();
    }

    fn stop(&mut self, track: Track) {
        let Some(el) = self.elements.get(&track) else { return };
        if el.paused() {
            return;
        }
        let _ = el.pause();
        el.set_current_time(0.0);
    }

    fn is_playing(&self, track: Track) -> bool {
        self.elements
            .get(&track)
            .is_some_and(|el| !el.paused() && !el.ended())
    }

    fn set_volume(&mut self, track: Track, volume: f32) {
        if let Some(el) = self.elements.get(&track) {
            el.set_volume(volume.clamp(0.0, 1.0) as f64);
        }
    }
}

/// In-memory bank that records what would be audible.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryAudioBank {
    looping: HashMap<Track, f32>,
    volumes: HashMap<Track, f32>,
    /// Every one-shot in play order
    pub one_shots: Vec<Track>,
    /// Tracks that behave as if their asset failed to load
    pub missing: Vec<Track>,
}

#[cfg(test)]
impl MemoryAudioBank {
    pub fn with_missing(missing: &[Track]) -> Self {
        Self {
            missing: missing.to_vec(),
            ..Self::default()
        }
    }

    pub fn playing_beds(&self) -> Vec<Track> {
        let mut beds: Vec<Track> = self.looping.keys().copied().filter(|t| t.is_bed()).collect();
        beds.sort_by_key(|t| Track::ALL.iter().position(|a| a == t));
        beds
    }

    pub fn any_playing(&self) -> bool {
        !self.looping.is_empty()
    }

    pub fn volume(&self, track: Track) -> Option<f32> {
        self.volumes.get(&track).copied()
    }

    pub fn count_one_shots(&self, track: Track) -> usize {
        self.one_shots.iter().filter(|&&t| t == track).count()
    }
}

#[cfg(test)]
impl AudioBank for MemoryAudioBank {
    fn play_loop(&mut self, track: Track, volume: f32) {
        if self.missing.contains(&track) {
            return;
        }
        self.looping.entry(track).or_insert(volume);
        self.volumes.insert(track, volume);
    }

    fn play_once(&mut self, track: Track) {
        if self.missing.contains(&track) {
            return;
        }
        self.one_shots.push(track);
    }

    fn stop(&mut self, track: Track) {
        self.looping.remove(&track);
    }

    fn is_playing(&self, track: Track) -> bool {
        self.looping.contains_key(&track)
    }

    fn set_volume(&mut self, track: Track, volume: f32) {
        if !self.missing.contains(&track) {
            self.volumes.insert(track, volume);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_tracks_listed_once() {
        for t in Track::ALL {
            assert_eq!(Track::ALL.iter().filter(|&&x| x == t).count(), 1);
        }
    }

    #[test]
    fn files_are_distinct() {
        let mut files: Vec<&str> = Track::ALL.iter().map(|t| t.file()).collect();
        files.sort_unstable();
        files.dedup();
        assert_eq!(files.len(), Track::ALL.len());
    }

    #[test]
    fn seven_beds() {
        assert_eq!(Track::ALL.iter().filter(|t| t.is_bed()).count(), 7);
        assert!(!Track::Next.is_bed());
    }

    #[test]
    fn memory_bank_loop_is_idempotent() {
        let mut bank = MemoryAudioBank::default();
        bank.play_loop(Track::CloudBed, 0.45);
        bank.play_loop(Track::CloudBed, 0.45);
        assert_eq!(bank.playing_beds(), vec![Track::CloudBed]);
        bank.stop(Track::CloudBed);
        assert!(!bank.is_playing(Track::CloudBed));
    }

    #[test]
    fn missing_track_is_a_no_op() {
        let mut bank = MemoryAudioBank::with_missing(&[Track::EgoBed]);
        bank.play_loop(Track::EgoBed, 1.0);
        bank.play_once(Track::EgoBed);
        bank.stop(Track::EgoBed);
        assert!(!bank.is_playing(Track::EgoBed));
        assert!(bank.one_shots.is_empty());
    }

    #[test]
    fn stop_all_silences_everything() {
        let mut bank = MemoryAudioBank::default();
        bank.play_loop(Track::MontyBed, 0.45);
        bank.play_loop(Track::DogHold, 1.0);
        bank.stop_all();
        assert!(!bank.any_playing());
    }
}
