//! Static minigame catalog: ids, names, objectives, beds and constructors.

use std::fmt;

use crate::audio::Track;
use crate::config::ConfigError;
use crate::minis::{self, Minigame};

/// Number of minigames that ship with the arcade.
pub const MINIGAME_COUNT: u8 = 16;

/// Stable handle for one minigame, always in `1..=MINIGAME_COUNT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MinigameId(u8);

impl MinigameId {
    pub fn new(raw: u8) -> Option<Self> {
        (1..=MINIGAME_COUNT).contains(&raw).then_some(Self(raw))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every registered id in ascending order.
    pub fn all() -> impl Iterator<Item = MinigameId> {
        (1..=MINIGAME_COUNT).map(Self)
    }
}

impl fmt::Display for MinigameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Immutable metadata for one minigame.
pub struct MinigameRecord {
    pub id: MinigameId,
    pub name: &'static str,
    /// Empty means no objective banner.
    pub objective: &'static str,
    /// Looping bed started on entry, if any.
    pub background: Option<Track>,
    /// Builds a blank instance; the flow controller calls `reset` on it.
    pub spawn: fn() -> Box<dyn Minigame>,
}

impl fmt::Debug for MinigameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinigameRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

fn spawn<T: Minigame + Default + 'static>() -> Box<dyn Minigame> {
    Box::new(T::default())
}

static RECORDS: [MinigameRecord; MINIGAME_COUNT as usize] = [
    MinigameRecord {
        id: MinigameId(1),
        name: "Pollute the Cloud",
        objective: "Practice your pollution.",
        background: Some(Track::CloudBed),
        spawn: spawn::<minis::cloud::Cloud>,
    },
    MinigameRecord {
        id: MinigameId(2),
        name: "Find the Noise",
        objective: "Locate the noise.",
        background: None,
        spawn: spawn::<minis::noise::Noise>,
    },
    MinigameRecord {
        id: MinigameId(3),
        name: "The AI Face",
        objective: "Stop AI from becoming Intelligent.",
        background: Some(Track::FaceBed),
        spawn: spawn::<minis::face::Face>,
    },
    MinigameRecord {
        id: MinigameId(4),
        name: "Tag Motivation",
        objective: "Get your Motivation.",
        background: None,
        spawn: spawn::<minis::motivation::Motivation>,
    },
    MinigameRecord {
        id: MinigameId(5),
        name: "Space them",
        objective: "Give them Space.",
        background: None,
        spawn: spawn::<minis::concepts::Concepts>,
    },
    MinigameRecord {
        id: MinigameId(6),
        name: "Deflate the Ego",
        objective: "Deflate the ego.",
        background: Some(Track::EgoBed),
        spawn: spawn::<minis::ego::Ego>,
    },
    MinigameRecord {
        id: MinigameId(7),
        name: "Pet the Invisible Dog",
        objective: "Pet the Invisible Dog.",
        background: None,
        spawn: spawn::<minis::dog::Dog>,
    },
    MinigameRecord {
        id: MinigameId(8),
        name: "Sentient Spaghetti",
        objective: "Only 'G' may pass-ta.",
        background: Some(Track::SpaghettiBed),
        spawn: spawn::<minis::spaghetti::Spaghetti>,
    },
    MinigameRecord {
        id: MinigameId(9),
        name: "Bureaucratic Maze",
        objective: "Do not touch it.",
        background: Some(Track::FormBed),
        spawn: spawn::<minis::bureau::Bureau>,
    },
    MinigameRecord {
        id: MinigameId(10),
        name: "Monty Stomp",
        objective: "Smash the civilized.",
        background: Some(Track::MontyBed),
        spawn: spawn::<minis::monty::Monty>,
    },
    MinigameRecord {
        id: MinigameId(11),
        name: "The Endless Loop",
        objective: "BREAK THE LOOP.",
        background: None,
        spawn: spawn::<minis::endless::EndlessLoop>,
    },
    MinigameRecord {
        id: MinigameId(12),
        name: "Legal Malware Text",
        objective: "Accept the Terms before they accept you.",
        // The legal bed only plays while Space is held; the minigame owns it.
        background: None,
        spawn: spawn::<minis::legal::Legal>,
    },
    MinigameRecord {
        id: MinigameId(13),
        name: "Bad Bad Sausage",
        objective: "Stuff the sausage.",
        background: None,
        spawn: spawn::<minis::sausage::Sausage>,
    },
    MinigameRecord {
        id: MinigameId(14),
        name: "Checklist",
        objective: "",
        background: None,
        spawn: spawn::<minis::checklist::Checklist>,
    },
    MinigameRecord {
        id: MinigameId(15),
        name: "Constellation",
        objective: "",
        background: None,
        spawn: spawn::<minis::constellation::Constellation>,
    },
    MinigameRecord {
        id: MinigameId(16),
        name: "The Loading Bar",
        objective: "",
        background: None,
        spawn: spawn::<minis::loading::Loading>,
    },
];

/// Look up the record for an id.
pub fn record(id: MinigameId) -> Option<&'static MinigameRecord> {
    RECORDS.iter().find(|r| r.id == id)
}

/// The ordered, non-empty, duplicate-free list of minigames for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    ids: Vec<MinigameId>,
}

impl Catalog {
    pub fn from_raw(raw: &[u8]) -> Result<Self, ConfigError> {
        if raw.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        let mut ids: Vec<MinigameId> = Vec::with_capacity(raw.len());
        for &n in raw {
            let id = MinigameId::new(n).ok_or(ConfigError::UnknownMinigame(n))?;
            if ids.contains(&id) {
                return Err(ConfigError::DuplicateMinigame(n));
            }
            ids.push(id);
        }
        Ok(Self { ids })
    }

    pub fn ids(&self) -> &[MinigameId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn get(&self, index: usize) -> Option<MinigameId> {
        self.ids.get(index).copied()
    }

    pub fn index_of(&self, id: MinigameId) -> Option<usize> {
        self.ids.iter().position(|&i| i == id)
    }

    pub fn first(&self) -> MinigameId {
        self.ids[0]
    }

    pub fn last(&self) -> MinigameId {
        self.ids[self.ids.len() - 1]
    }
}
