use std::time::Duration;

use dictionary::DefinitionEntry;

use crate::spring::Spring;

/// Identifies one definition request. Taken from a counter that only grows,
/// so a completion can be matched against the request still wanted.
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// Waiting for the definition of `word`. `attempts` counts the words of
    /// this transition the dictionary had no entry for.
    Loading { word: String, attempts: u32 },
    /// A card is shown; dragging is locked while `cooldown` is not zero.
    Ready {
        entry: DefinitionEntry,
        cooldown: Duration,
    },
    /// Too many consecutive words had no entry.
    NoDefinition { word: String, attempts: u32 },
    /// The lookup itself failed.
    Failed { word: String, message: String },
}

impl Phase {
    pub fn word(&self) -> &str {
        match self {
            Phase::Loading { word, .. }
            | Phase::NoDefinition { word, .. }
            | Phase::Failed { word, .. } => word,
            Phase::Ready { entry, .. } => &entry.word,
        }
    }

    pub fn entry(&self) -> Option<&DefinitionEntry> {
        match self {
            Phase::Ready { entry, .. } => Some(entry),
            _ => None,
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, Phase::Ready { cooldown, .. } if !cooldown.is_zero())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LookaheadStatus {
    Pending,
    Ready(DefinitionEntry),
}

/// The prefetched next card.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookahead {
    pub request: RequestId,
    pub word: String,
    pub attempts: u32,
    pub status: LookaheadStatus,
}

/// Horizontal position of the card, in display units from its rest spot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardMotion {
    pub position: f32,
    /// Where the card was when the current drag began.
    pub drag_origin: Option<f32>,
    pub spring: Option<Spring>,
}

impl CardMotion {
    pub fn is_animating(&self) -> bool {
        self.spring.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InteractionState {
    pub phase: Phase,
    pub current_request: Option<RequestId>,
    pub lookahead: Option<Lookahead>,
    pub card: CardMotion,
    pub next_request: RequestId,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            phase: Phase::Loading {
                word: String::new(),
                attempts: 0,
            },
            current_request: None,
            lookahead: None,
            card: CardMotion::default(),
            next_request: 1,
        }
    }
}

impl InteractionState {
    pub fn allocate_request(&mut self) -> RequestId {
        let request = self.next_request;
        self.next_request += 1;
        request
    }
}
