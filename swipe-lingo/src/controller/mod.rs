//! Word transitions and swipe handling for the card.
//!
//! The controller owns every piece of interaction state. Input, timers and
//! finished requests arrive as [`Intent`]s; anything that has to happen
//! outside the state (network lookups, audio) is returned as an [`Effect`]
//! for the runtime to carry out, and its outcome comes back as another
//! intent.

mod state;

use std::time::Duration;

use dictionary::{pronunciation, DefinitionEntry, DictionaryError, WordSource};

use crate::config::Config;
use crate::spring::Spring;

pub use state::{CardMotion, InteractionState, Lookahead, LookaheadStatus, Phase, RequestId};

/// How far the card moves per unit of pointer movement.
pub const DRAG_ELASTIC: f32 = 0.7;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub swipe_threshold: f32,
    pub cooldown: Duration,
    pub cooldown_step: Duration,
    pub max_not_found_retries: u32,
    pub prefetch: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Self {
            swipe_threshold: config.swipe_threshold,
            cooldown: config.cooldown(),
            cooldown_step: config.cooldown_step(),
            max_not_found_retries: config.max_not_found_retries,
            prefetch: config.prefetch,
        }
    }
}

#[derive(Debug)]
pub enum Intent {
    /// Fetch the first word.
    Start,
    /// Look up a fresh word after running out of retries or failing.
    Retry,
    DefinitionLoaded {
        request: RequestId,
        result: Result<DefinitionEntry, DictionaryError>,
    },
    CooldownTick,
    DragStart,
    /// Pointer moved `offset` display units from where the drag began.
    DragMove {
        offset: f32,
    },
    DragEnd {
        offset: f32,
        velocity: f32,
    },
    AnimationFrame(Duration),
    PlayAudio,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch { request: RequestId, word: String },
    PlayAudio { url: String },
}

pub struct Controller {
    state: InteractionState,
    settings: Settings,
    words: Box<dyn WordSource>,
}

impl Controller {
    pub fn new(settings: Settings, words: Box<dyn WordSource>) -> Self {
        Self {
            state: InteractionState::default(),
            settings,
            words,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.state.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_locked(&self) -> bool {
        self.state.phase.is_locked()
    }

    pub fn card_position(&self) -> f32 {
        self.state.card.position
    }

    pub fn is_animating(&self) -> bool {
        self.state.card.is_animating()
    }

    pub fn lookahead(&self) -> Option<&Lookahead> {
        self.state.lookahead.as_ref()
    }

    pub fn handle(&mut self, intent: Intent) -> Vec<Effect> {
        match intent {
            Intent::Start => self.begin_transition(0),
            Intent::Retry => match self.state.phase {
                Phase::NoDefinition { .. } | Phase::Failed { .. } => self.begin_transition(0),
                _ => Vec::new(),
            },
            Intent::DefinitionLoaded { request, result } => self.on_definition(request, result),
            Intent::CooldownTick => {
                if let Phase::Ready { cooldown, .. } = &mut self.state.phase {
                    *cooldown = cooldown.saturating_sub(self.settings.cooldown_step);
                }
                Vec::new()
            }
            Intent::DragStart => {
                let card = &mut self.state.card;
                card.spring = None;
                card.drag_origin = Some(card.position);
                Vec::new()
            }
            Intent::DragMove { offset } => {
                let card = &mut self.state.card;
                if let Some(origin) = card.drag_origin {
                    card.position = origin + offset * DRAG_ELASTIC;
                }
                Vec::new()
            }
            Intent::DragEnd { offset, velocity } => self.on_drag_end(offset, velocity),
            Intent::AnimationFrame(elapsed) => {
                let card = &mut self.state.card;
                if let Some(spring) = card.spring.as_mut() {
                    spring.step(elapsed);
                    card.position = spring.position;
                    if spring.is_settled() {
                        card.spring = None;
                    }
                }
                Vec::new()
            }
            Intent::PlayAudio => self
                .state
                .phase
                .entry()
                .and_then(|entry| pronunciation(entry).audio)
                .map(|url| vec![Effect::PlayAudio { url }])
                .unwrap_or_default(),
        }
    }

    fn begin_transition(&mut self, attempts: u32) -> Vec<Effect> {
        let word = self.words.next_word();
        let request = self.state.allocate_request();
        tracing::debug!(request, %word, attempts, "looking up word");
        self.state.phase = Phase::Loading {
            word: word.clone(),
            attempts,
        };
        self.state.current_request = Some(request);
        self.state.card = CardMotion::default();
        vec![Effect::Fetch { request, word }]
    }

    fn start_lookahead(&mut self, attempts: u32) -> Vec<Effect> {
        let word = self.words.next_word();
        let request = self.state.allocate_request();
        tracing::debug!(request, %word, attempts, "prefetching word");
        self.state.lookahead = Some(Lookahead {
            request,
            word: word.clone(),
            attempts,
            status: LookaheadStatus::Pending,
        });
        vec![Effect::Fetch { request, word }]
    }

    fn show(&mut self, entry: DefinitionEntry) -> Vec<Effect> {
        self.state.current_request = None;
        self.state.phase = Phase::Ready {
            entry,
            cooldown: self.settings.cooldown,
        };
        self.state.card = CardMotion::default();
        if self.settings.prefetch && self.state.lookahead.is_none() {
            self.start_lookahead(0)
        } else {
            Vec::new()
        }
    }

    fn on_definition(
        &mut self,
        request: RequestId,
        result: Result<DefinitionEntry, DictionaryError>,
    ) -> Vec<Effect> {
        if self.state.current_request == Some(request) {
            return self.on_current_definition(result);
        }
        if self
            .state
            .lookahead
            .as_ref()
            .is_some_and(|lookahead| lookahead.request == request)
        {
            return self.on_lookahead_definition(result);
        }
        tracing::debug!(request, "discarding stale definition");
        Vec::new()
    }

    fn on_current_definition(
        &mut self,
        result: Result<DefinitionEntry, DictionaryError>,
    ) -> Vec<Effect> {
        let (word, attempts) = match &self.state.phase {
            Phase::Loading { word, attempts } => (word.clone(), *attempts),
            _ => (self.state.phase.word().to_owned(), 0),
        };
        match result {
            Ok(entry) => {
                tracing::debug!(word = %entry.word, "definition ready");
                self.show(entry)
            }
            Err(error) if error.is_not_found() => {
                if attempts < self.settings.max_not_found_retries {
                    tracing::debug!(%word, "no entry, trying another word");
                    self.begin_transition(attempts + 1)
                } else {
                    tracing::warn!(%word, attempts, "giving up after consecutive missing entries");
                    self.state.current_request = None;
                    self.state.phase = Phase::NoDefinition { word, attempts };
                    Vec::new()
                }
            }
            Err(error) => {
                tracing::warn!(%word, %error, "definition lookup failed");
                self.state.current_request = None;
                self.state.phase = Phase::Failed {
                    word,
                    message: error.to_string(),
                };
                Vec::new()
            }
        }
    }

    fn on_lookahead_definition(
        &mut self,
        result: Result<DefinitionEntry, DictionaryError>,
    ) -> Vec<Effect> {
        let Some(lookahead) = self.state.lookahead.as_mut() else {
            return Vec::new();
        };
        match result {
            Ok(entry) => {
                lookahead.status = LookaheadStatus::Ready(entry);
                Vec::new()
            }
            Err(error) if error.is_not_found() => {
                let attempts = lookahead.attempts;
                if attempts < self.settings.max_not_found_retries {
                    self.start_lookahead(attempts + 1)
                } else {
                    self.state.lookahead = None;
                    Vec::new()
                }
            }
            Err(error) => {
                tracing::warn!(word = %lookahead.word, %error, "prefetch failed");
                self.state.lookahead = None;
                Vec::new()
            }
        }
    }

    fn on_drag_end(&mut self, offset: f32, velocity: f32) -> Vec<Effect> {
        let swipeable = match &self.state.phase {
            Phase::Ready { cooldown, .. } => cooldown.is_zero(),
            Phase::NoDefinition { .. } | Phase::Failed { .. } => true,
            Phase::Loading { .. } => false,
        };
        // the card this drag began on has been replaced since
        if self.state.card.drag_origin.take().is_none() {
            return Vec::new();
        }
        if swipeable && offset.abs() > self.settings.swipe_threshold {
            return self.commit();
        }
        let card = &mut self.state.card;
        if card.position != 0.0 || velocity != 0.0 {
            card.spring = Some(Spring::card(card.position, velocity * DRAG_ELASTIC));
        }
        Vec::new()
    }

    fn commit(&mut self) -> Vec<Effect> {
        tracing::info!(word = %self.state.phase.word(), "card swiped away");
        match self.state.lookahead.take() {
            Some(Lookahead {
                status: LookaheadStatus::Ready(entry),
                ..
            }) => self.show(entry),
            Some(Lookahead {
                request,
                word,
                attempts,
                status: LookaheadStatus::Pending,
            }) => {
                self.state.phase = Phase::Loading { word, attempts };
                self.state.current_request = Some(request);
                self.state.card = CardMotion::default();
                Vec::new()
            }
            None => self.begin_transition(0),
        }
    }
}

#[cfg(test)]
mod tests;
