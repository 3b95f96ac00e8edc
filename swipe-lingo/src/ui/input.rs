use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use crate::controller::Intent;

/// How far one arrow key press drags the card, in display units.
pub const KEY_STEP: f32 = 50.0;
/// A release this long after the last movement carries no velocity.
const VELOCITY_WINDOW: Duration = Duration::from_millis(100);

/// Screen regions the last frame drew, used for hit testing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitAreas {
    pub card: Option<Rect>,
    pub audio: Option<Rect>,
}

fn hit(area: Option<Rect>, column: u16, row: u16) -> bool {
    area.is_some_and(|area| area.contains(Position::new(column, row)))
}

#[derive(Debug)]
pub enum Action {
    None,
    Quit,
    Dispatch(Vec<Intent>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Drag {
    Pointer {
        start_column: u16,
        last_column: u16,
        last_moved: Instant,
        velocity: f32,
    },
    Keyboard {
        offset: f32,
    },
}

/// Turns terminal events into drag gestures and other intents.
pub struct Gestures {
    units_per_column: f32,
    drag: Option<Drag>,
}

impl Gestures {
    pub fn new(units_per_column: f32) -> Self {
        Self {
            units_per_column,
            drag: None,
        }
    }

    pub fn translate(&mut self, event: &Event, areas: &HitAreas, now: Instant) -> Action {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key(key),
            Event::Mouse(mouse) => self.on_mouse(mouse, areas, now),
            _ => Action::None,
        }
    }

    fn offset(&self, from: u16, to: u16) -> f32 {
        (f32::from(to) - f32::from(from)) * self.units_per_column
    }

    fn on_key(&mut self, key: &KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('p') => Action::Dispatch(vec![Intent::PlayAudio]),
            KeyCode::Char('r') => Action::Dispatch(vec![Intent::Retry]),
            KeyCode::Left | KeyCode::Char('h') => self.nudge(-KEY_STEP),
            KeyCode::Right | KeyCode::Char('l') => self.nudge(KEY_STEP),
            KeyCode::Char(' ') | KeyCode::Enter => match self.drag {
                Some(Drag::Keyboard { offset }) => {
                    self.drag = None;
                    Action::Dispatch(vec![Intent::DragEnd {
                        offset,
                        velocity: 0.0,
                    }])
                }
                _ => Action::None,
            },
            _ => Action::None,
        }
    }

    fn nudge(&mut self, step: f32) -> Action {
        match self.drag {
            None => {
                self.drag = Some(Drag::Keyboard { offset: step });
                Action::Dispatch(vec![Intent::DragStart, Intent::DragMove { offset: step }])
            }
            Some(Drag::Keyboard { offset }) => {
                let offset = offset + step;
                self.drag = Some(Drag::Keyboard { offset });
                Action::Dispatch(vec![Intent::DragMove { offset }])
            }
            Some(Drag::Pointer { .. }) => Action::None,
        }
    }

    fn on_mouse(&mut self, mouse: &MouseEvent, areas: &HitAreas, now: Instant) -> Action {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                // a press on the audio control never starts a drag
                if hit(areas.audio, mouse.column, mouse.row) {
                    return Action::Dispatch(vec![Intent::PlayAudio]);
                }
                if !hit(areas.card, mouse.column, mouse.row) {
                    return Action::None;
                }
                self.drag = Some(Drag::Pointer {
                    start_column: mouse.column,
                    last_column: mouse.column,
                    last_moved: now,
                    velocity: 0.0,
                });
                Action::Dispatch(vec![Intent::DragStart])
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(Drag::Pointer {
                    start_column,
                    last_column,
                    last_moved,
                    ..
                }) = self.drag
                else {
                    return Action::None;
                };
                let elapsed = now
                    .saturating_duration_since(last_moved)
                    .max(Duration::from_millis(1));
                let velocity = self.offset(last_column, mouse.column) / elapsed.as_secs_f32();
                self.drag = Some(Drag::Pointer {
                    start_column,
                    last_column: mouse.column,
                    last_moved: now,
                    velocity,
                });
                Action::Dispatch(vec![Intent::DragMove {
                    offset: self.offset(start_column, mouse.column),
                }])
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(Drag::Pointer {
                    start_column,
                    last_moved,
                    velocity,
                    ..
                }) = self.drag
                else {
                    return Action::None;
                };
                self.drag = None;
                let velocity = if now.saturating_duration_since(last_moved) > VELOCITY_WINDOW {
                    0.0
                } else {
                    velocity
                };
                Action::Dispatch(vec![Intent::DragEnd {
                    offset: self.offset(start_column, mouse.column),
                    velocity,
                }])
            }
            _ => Action::None,
        }
    }
}
