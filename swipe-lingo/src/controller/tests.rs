use std::collections::VecDeque;
use std::time::Duration;

use dictionary::{DefinitionEntry, DictionaryError, Phonetic, WordSource};

use super::*;

struct ScriptedWords {
    words: VecDeque<&'static str>,
    fallback: usize,
}

impl WordSource for ScriptedWords {
    fn next_word(&mut self) -> String {
        match self.words.pop_front() {
            Some(word) => word.to_owned(),
            None => {
                self.fallback += 1;
                format!("word{}", self.fallback)
            }
        }
    }
}

fn controller(words: &[&'static str], settings: Settings) -> Controller {
    Controller::new(
        settings,
        Box::new(ScriptedWords {
            words: words.iter().copied().collect(),
            fallback: 0,
        }),
    )
}

fn entry(word: &str) -> DefinitionEntry {
    DefinitionEntry {
        word: word.to_owned(),
        phonetic: None,
        phonetics: vec![],
        origin: None,
        meanings: vec![],
    }
}

fn not_found(word: &str) -> Result<DefinitionEntry, DictionaryError> {
    Err(DictionaryError::NotFound {
        word: word.to_owned(),
    })
}

fn fetch(request: RequestId, word: &str) -> Effect {
    Effect::Fetch {
        request,
        word: word.to_owned(),
    }
}

fn loaded(request: RequestId, result: Result<DefinitionEntry, DictionaryError>) -> Intent {
    Intent::DefinitionLoaded { request, result }
}

fn unlock(controller: &mut Controller) {
    while controller.is_locked() {
        controller.handle(Intent::CooldownTick);
    }
}

/// Starts and shows `word` as request 1.
fn ready(words: &[&'static str], settings: Settings) -> Controller {
    let mut controller = controller(words, settings);
    let effects = controller.handle(Intent::Start);
    let Some(Effect::Fetch { request, word }) = effects.into_iter().next() else {
        panic!("start did not fetch");
    };
    controller.handle(loaded(request, Ok(entry(&word))));
    controller
}

/// Drags the card by `offset` and lets go.
fn release(controller: &mut Controller, offset: f32, velocity: f32) -> Vec<Effect> {
    controller.handle(Intent::DragStart);
    controller.handle(Intent::DragMove { offset });
    controller.handle(Intent::DragEnd { offset, velocity })
}

fn shown_word(controller: &Controller) -> Option<&str> {
    controller.phase().entry().map(|entry| entry.word.as_str())
}

#[test]
fn start_fetches_a_word() {
    let mut controller = controller(&["cat"], Settings::default());
    assert_eq!(controller.handle(Intent::Start), vec![fetch(1, "cat")]);
    assert_eq!(
        controller.phase(),
        &Phase::Loading {
            word: "cat".to_owned(),
            attempts: 0
        }
    );
}

#[test]
fn a_loaded_definition_shows_a_locked_card() {
    let controller = ready(&["cat"], Settings::default());
    assert_eq!(shown_word(&controller), Some("cat"));
    assert!(controller.is_locked());
    assert!(matches!(
        controller.phase(),
        Phase::Ready { cooldown, .. } if *cooldown == Duration::from_millis(1000)
    ));
}

#[test]
fn cooldown_counts_down_to_exactly_zero() {
    let mut controller = ready(&["cat"], Settings::default());
    let mut seen = Vec::new();
    for _ in 0..15 {
        controller.handle(Intent::CooldownTick);
        if let Phase::Ready { cooldown, .. } = controller.phase() {
            seen.push(cooldown.as_millis());
        }
    }
    assert_eq!(
        seen,
        vec![900, 800, 700, 600, 500, 400, 300, 200, 100, 0, 0, 0, 0, 0, 0]
    );
    assert!(!controller.is_locked());
}

#[test]
fn swipe_threshold_is_exclusive() {
    let mut controller = ready(&["cat", "dog"], Settings::default());
    unlock(&mut controller);

    for offset in [149.0, -149.0, 150.0, 0.0] {
        let effects = release(&mut controller, offset, 0.0);
        assert!(effects.is_empty());
        assert_eq!(shown_word(&controller), Some("cat"));
    }

    let effects = release(&mut controller, 151.0, 0.0);
    assert_eq!(effects, vec![fetch(2, "dog")]);
    assert_eq!(controller.phase().word(), "dog");
    assert_eq!(shown_word(&controller), None);
}

#[test]
fn left_swipes_commit_too() {
    let mut controller = ready(&["cat", "dog"], Settings::default());
    unlock(&mut controller);
    let effects = release(&mut controller, -151.0, -30.0);
    assert_eq!(effects, vec![fetch(2, "dog")]);
}

#[test]
fn locked_cards_ignore_every_release() {
    let mut controller = ready(&["cat", "dog"], Settings::default());
    for offset in [0.0, 149.0, 151.0, -151.0, 10_000.0] {
        controller.handle(Intent::DragStart);
        controller.handle(Intent::DragMove { offset });
        let effects = controller.handle(Intent::DragEnd {
            offset,
            velocity: 0.0,
        });
        assert!(effects.is_empty());
        assert_eq!(shown_word(&controller), Some("cat"));
        assert!(controller.is_locked());
    }
}

#[test]
fn short_drags_spring_back() {
    let mut controller = ready(&["cat"], Settings::default());
    unlock(&mut controller);

    controller.handle(Intent::DragStart);
    controller.handle(Intent::DragMove { offset: 100.0 });
    assert_eq!(controller.card_position(), 100.0 * DRAG_ELASTIC);
    assert!(controller.state.card.drag_origin.is_some());

    controller.handle(Intent::DragEnd {
        offset: 100.0,
        velocity: 0.0,
    });
    assert!(controller.is_animating());
    assert!(controller.state.card.drag_origin.is_none());
    for _ in 0..200 {
        controller.handle(Intent::AnimationFrame(Duration::from_millis(16)));
    }
    assert!(!controller.is_animating());
    assert_eq!(controller.card_position(), 0.0);
    assert_eq!(shown_word(&controller), Some("cat"));
}

#[test]
fn moves_without_a_drag_are_ignored() {
    let mut controller = ready(&["cat"], Settings::default());
    controller.handle(Intent::DragMove { offset: 80.0 });
    assert_eq!(controller.card_position(), 0.0);
}

#[test]
fn missing_entries_fetch_another_word_right_away() {
    let mut controller = controller(&["zzxqy", "cat"], Settings::default());
    controller.handle(Intent::Start);

    let effects = controller.handle(loaded(1, not_found("zzxqy")));
    assert_eq!(effects, vec![fetch(2, "cat")]);
    assert_eq!(
        controller.phase(),
        &Phase::Loading {
            word: "cat".to_owned(),
            attempts: 1
        }
    );

    controller.handle(loaded(2, Ok(entry("cat"))));
    assert_eq!(shown_word(&controller), Some("cat"));
}

#[test]
fn retries_for_missing_entries_are_bounded() {
    let settings = Settings {
        max_not_found_retries: 2,
        ..Settings::default()
    };
    let mut controller = controller(&["a", "b", "c", "d"], settings);
    controller.handle(Intent::Start);

    assert_eq!(controller.handle(loaded(1, not_found("a"))), vec![fetch(2, "b")]);
    assert_eq!(controller.handle(loaded(2, not_found("b"))), vec![fetch(3, "c")]);
    assert!(controller.handle(loaded(3, not_found("c"))).is_empty());
    assert_eq!(
        controller.phase(),
        &Phase::NoDefinition {
            word: "c".to_owned(),
            attempts: 2
        }
    );

    assert_eq!(controller.handle(Intent::Retry), vec![fetch(4, "d")]);
    assert!(matches!(
        controller.phase(),
        Phase::Loading { attempts: 0, .. }
    ));
}

#[test]
fn fetch_failures_are_shown_and_retryable() {
    let mut controller = controller(&["cat", "dog"], Settings::default());
    controller.handle(Intent::Start);

    assert!(controller
        .handle(loaded(1, Err(DictionaryError::Timeout)))
        .is_empty());
    match controller.phase() {
        Phase::Failed { word, message } => {
            assert_eq!(word, "cat");
            assert!(message.contains("in time"));
        }
        other => panic!("unexpected phase: {other:?}"),
    }

    assert_eq!(controller.handle(Intent::Retry), vec![fetch(2, "dog")]);
}

#[test]
fn retry_is_ignored_while_a_card_is_shown() {
    let mut controller = ready(&["cat"], Settings::default());
    assert!(controller.handle(Intent::Retry).is_empty());
    assert_eq!(shown_word(&controller), Some("cat"));
}

#[test]
fn failed_cards_can_be_swiped_away() {
    let mut controller = controller(&["cat", "dog"], Settings::default());
    controller.handle(Intent::Start);
    controller.handle(loaded(1, Err(DictionaryError::Status(503))));

    let effects = release(&mut controller, 200.0, 0.0);
    assert_eq!(effects, vec![fetch(2, "dog")]);
}

#[test]
fn stale_definitions_are_discarded() {
    let mut controller = controller(&["cat", "dog"], Settings::default());
    controller.handle(Intent::Start);
    controller.handle(Intent::Start);

    assert!(controller.handle(loaded(1, Ok(entry("cat")))).is_empty());
    assert_eq!(controller.phase().word(), "dog");
    assert_eq!(shown_word(&controller), None);

    controller.handle(loaded(2, Ok(entry("dog"))));
    assert_eq!(shown_word(&controller), Some("dog"));

    // a late duplicate must not replace the card either
    controller.handle(loaded(2, Ok(entry("cat"))));
    assert_eq!(shown_word(&controller), Some("dog"));
}

#[test]
fn audio_plays_the_preferred_recording() {
    let mut controller = controller(&["cat"], Settings::default());
    controller.handle(Intent::Start);
    let mut cat = entry("cat");
    cat.phonetics = vec![
        Phonetic {
            text: Some("/kæt/".to_owned()),
            audio: Some("a.mp3".to_owned()),
        },
        Phonetic {
            text: Some("/kat/".to_owned()),
            audio: Some("b.mp3".to_owned()),
        },
    ];
    controller.handle(loaded(1, Ok(cat)));

    assert_eq!(
        controller.handle(Intent::PlayAudio),
        vec![Effect::PlayAudio {
            url: "b.mp3".to_owned()
        }]
    );
    // playing never touches the card
    assert!(controller.is_locked());
    assert_eq!(controller.card_position(), 0.0);
}

#[test]
fn audio_without_recordings_does_nothing() {
    let mut controller = ready(&["cat"], Settings::default());
    assert!(controller.handle(Intent::PlayAudio).is_empty());

    let mut loading = self::controller(&["cat"], Settings::default());
    loading.handle(Intent::Start);
    assert!(loading.handle(Intent::PlayAudio).is_empty());
}

fn prefetching() -> Settings {
    Settings {
        prefetch: true,
        ..Settings::default()
    }
}

#[test]
fn prefetch_fills_the_lookahead_after_each_card() {
    let mut controller = controller(&["cat", "dog"], prefetching());
    controller.handle(Intent::Start);

    assert_eq!(
        controller.handle(loaded(1, Ok(entry("cat")))),
        vec![fetch(2, "dog")]
    );
    assert!(matches!(
        controller.lookahead(),
        Some(Lookahead { word, status: LookaheadStatus::Pending, .. }) if word == "dog"
    ));

    controller.handle(loaded(2, Ok(entry("dog"))));
    assert!(matches!(
        controller.lookahead(),
        Some(Lookahead {
            status: LookaheadStatus::Ready(_),
            ..
        })
    ));
    assert_eq!(shown_word(&controller), Some("cat"));
}

#[test]
fn a_ready_lookahead_is_shown_without_loading() {
    let mut controller = controller(&["cat", "dog", "emu"], prefetching());
    controller.handle(Intent::Start);
    controller.handle(loaded(1, Ok(entry("cat"))));
    controller.handle(loaded(2, Ok(entry("dog"))));
    unlock(&mut controller);

    let effects = release(&mut controller, 300.0, 0.0);
    assert_eq!(shown_word(&controller), Some("dog"));
    assert!(controller.is_locked());
    assert_eq!(effects, vec![fetch(3, "emu")]);
}

#[test]
fn a_pending_lookahead_becomes_the_current_request() {
    let mut controller = controller(&["cat", "dog", "emu"], prefetching());
    controller.handle(Intent::Start);
    controller.handle(loaded(1, Ok(entry("cat"))));
    unlock(&mut controller);

    let effects = release(&mut controller, 300.0, 0.0);
    assert!(effects.is_empty());
    assert_eq!(
        controller.phase(),
        &Phase::Loading {
            word: "dog".to_owned(),
            attempts: 0
        }
    );
    assert!(controller.lookahead().is_none());

    assert_eq!(
        controller.handle(loaded(2, Ok(entry("dog")))),
        vec![fetch(3, "emu")]
    );
    assert_eq!(shown_word(&controller), Some("dog"));
}

#[test]
fn lookahead_misses_pick_another_word() {
    let mut controller = controller(&["cat", "zzxqy", "dog"], prefetching());
    controller.handle(Intent::Start);
    controller.handle(loaded(1, Ok(entry("cat"))));

    assert_eq!(
        controller.handle(loaded(2, not_found("zzxqy"))),
        vec![fetch(3, "dog")]
    );
    assert_eq!(controller.lookahead().map(|lookahead| lookahead.attempts), Some(1));
    assert_eq!(shown_word(&controller), Some("cat"));
}

#[test]
fn lookahead_failures_drop_the_slot_quietly() {
    let mut controller = controller(&["cat", "dog", "emu"], prefetching());
    controller.handle(Intent::Start);
    controller.handle(loaded(1, Ok(entry("cat"))));

    assert!(controller
        .handle(loaded(2, Err(DictionaryError::Timeout)))
        .is_empty());
    assert!(controller.lookahead().is_none());
    assert_eq!(shown_word(&controller), Some("cat"));

    unlock(&mut controller);
    assert_eq!(
        release(&mut controller, 151.0, 0.0),
        vec![fetch(3, "emu")]
    );
}

#[test]
fn without_prefetch_there_is_no_lookahead() {
    let mut controller = controller(&["cat"], Settings::default());
    controller.handle(Intent::Start);
    assert!(controller.handle(loaded(1, Ok(entry("cat")))).is_empty());
    assert!(controller.lookahead().is_none());
}

#[test]
fn lookahead_gives_up_after_the_retry_limit() {
    let settings = Settings {
        max_not_found_retries: 1,
        ..prefetching()
    };
    let mut controller = controller(&["cat", "zzxqy", "qqqx", "dog"], settings);
    controller.handle(Intent::Start);
    controller.handle(loaded(1, Ok(entry("cat"))));

    assert_eq!(
        controller.handle(loaded(2, not_found("zzxqy"))),
        vec![fetch(3, "qqqx")]
    );
    assert!(controller.handle(loaded(3, not_found("qqqx"))).is_empty());
    assert!(controller.lookahead().is_none());
    assert_eq!(shown_word(&controller), Some("cat"));

    unlock(&mut controller);
    assert_eq!(release(&mut controller, 151.0, 0.0), vec![fetch(4, "dog")]);
}

#[test]
fn an_adopted_lookahead_keeps_its_missed_attempts() {
    let settings = Settings {
        max_not_found_retries: 1,
        ..prefetching()
    };
    let mut controller = controller(&["cat", "zzxqy", "qqqx", "dog"], settings);
    controller.handle(Intent::Start);
    controller.handle(loaded(1, Ok(entry("cat"))));
    controller.handle(loaded(2, not_found("zzxqy")));
    unlock(&mut controller);

    assert!(release(&mut controller, 151.0, 0.0).is_empty());
    assert_eq!(
        controller.phase(),
        &Phase::Loading {
            word: "qqqx".to_owned(),
            attempts: 1
        }
    );

    assert!(controller.handle(loaded(3, not_found("qqqx"))).is_empty());
    assert_eq!(
        controller.phase(),
        &Phase::NoDefinition {
            word: "qqqx".to_owned(),
            attempts: 1
        }
    );
}

#[test]
fn a_drag_begun_before_the_card_arrived_cannot_swipe_it() {
    let mut controller = controller(&["cat", "dog"], Settings::default());
    controller.handle(Intent::Start);
    controller.handle(Intent::DragStart);
    controller.handle(Intent::DragMove { offset: 200.0 });

    controller.handle(loaded(1, Ok(entry("cat"))));
    unlock(&mut controller);
    controller.handle(Intent::DragMove { offset: 250.0 });
    assert_eq!(controller.card_position(), 0.0);

    let effects = controller.handle(Intent::DragEnd {
        offset: 250.0,
        velocity: 0.0,
    });
    assert!(effects.is_empty());
    assert_eq!(shown_word(&controller), Some("cat"));
    assert!(!controller.is_animating());
}
