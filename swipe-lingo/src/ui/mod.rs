pub mod input;
pub mod render;
pub mod terminal_guard;
pub mod theme;

use std::time::{Duration, Instant};

use crossterm::event::EventStream;
use dictionary::Dictionary;
use futures::StreamExt;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::time::{Interval, MissedTickBehavior};
use tracing::Instrument;

use crate::audio;
use crate::config::Config;
use crate::controller::{Controller, Effect, Intent};
use crate::ui::input::{Action, Gestures, HitAreas};
use crate::ui::terminal_guard::setup_terminal;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Carries out controller effects and feeds their outcome back as intents.
pub struct EffectRunner {
    dictionary: Dictionary,
    audio_player: Vec<String>,
    intents: UnboundedSender<Intent>,
}

impl EffectRunner {
    pub fn new(
        dictionary: Dictionary,
        audio_player: Vec<String>,
        intents: UnboundedSender<Intent>,
    ) -> Self {
        Self {
            dictionary,
            audio_player,
            intents,
        }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Fetch { request, word } => {
                    let dictionary = self.dictionary.clone();
                    let intents = self.intents.clone();
                    let span = tracing::debug_span!("fetch", request, %word);
                    tokio::spawn(
                        async move {
                            let result = dictionary.get_definition(&word).await;
                            // the receiver is gone once the ui has exited
                            let _ = intents.send(Intent::DefinitionLoaded { request, result });
                        }
                        .instrument(span),
                    );
                }
                Effect::PlayAudio { url } => audio::play(&self.audio_player, &url),
            }
        }
    }
}

/// Paces cooldown ticks. Restarted whenever a card locks, so the first tick
/// lands a full step after the card appears.
struct CooldownClock {
    interval: Interval,
}

impl CooldownClock {
    fn new(step: Duration) -> Self {
        let mut interval = tokio::time::interval(step);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    async fn tick(&mut self) {
        self.interval.tick().await;
    }

    fn restart(&mut self) {
        self.interval.reset();
    }
}

fn dispatch(
    controller: &mut Controller,
    runner: &EffectRunner,
    cooldown: &mut CooldownClock,
    intent: Intent,
) {
    let was_locked = controller.is_locked();
    let effects = controller.handle(intent);
    if !was_locked && controller.is_locked() {
        cooldown.restart();
    }
    runner.run(effects);
}

pub async fn run(
    config: &Config,
    mut controller: Controller,
    dictionary: Dictionary,
) -> anyhow::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;
    let (intent_tx, mut intent_rx) = mpsc::unbounded_channel();
    let runner = EffectRunner::new(dictionary, config.audio_player.clone(), intent_tx);
    let mut gestures = Gestures::new(config.units_per_column);
    let mut areas = HitAreas::default();
    let mut events = EventStream::new();

    let mut cooldown = CooldownClock::new(config.cooldown_step());
    let mut frames = tokio::time::interval(FRAME_INTERVAL);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_frame = Instant::now();

    dispatch(&mut controller, &runner, &mut cooldown, Intent::Start);
    loop {
        terminal.draw(|frame| areas = render::draw(frame, &controller, config.units_per_column))?;

        let intents = tokio::select! {
            Some(event) = events.next() => match event {
                Ok(event) => match gestures.translate(&event, &areas, Instant::now()) {
                    Action::Quit => break,
                    Action::Dispatch(intents) => intents,
                    Action::None => Vec::new(),
                },
                Err(error) => {
                    tracing::warn!(%error, "failed to read terminal input");
                    Vec::new()
                }
            },
            Some(intent) = intent_rx.recv() => vec![intent],
            _ = cooldown.tick() => vec![Intent::CooldownTick],
            now = frames.tick(), if controller.is_animating() => {
                let now = now.into_std();
                let elapsed = now.saturating_duration_since(last_frame).min(FRAME_INTERVAL * 4);
                last_frame = now;
                vec![Intent::AnimationFrame(elapsed)]
            }
        };
        if !controller.is_animating() {
            last_frame = Instant::now();
        }
        for intent in intents {
            dispatch(&mut controller, &runner, &mut cooldown, intent);
        }
    }

    drop(guard);
    Ok(())
}
