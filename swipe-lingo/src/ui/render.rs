use dictionary::{project, pronunciation, DefinitionEntry};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};
use ratatui::Frame;

use crate::controller::{Controller, LookaheadStatus, Phase};
use crate::ui::input::HitAreas;
use crate::ui::theme;

const CARD_WIDTH: u16 = 64;
const AUDIO_LABEL: &str = "[♪ play]";

pub fn draw(frame: &mut Frame<'_>, controller: &Controller, units_per_column: f32) -> HitAreas {
    let [title, body, footer] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new(Line::styled(
            "SwipeLingo",
            Style::default()
                .fg(theme::TITLE)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        title,
    );
    draw_footer(frame, controller, footer);

    let phase = controller.phase();
    if let Phase::Loading { .. } = phase {
        let middle = Rect {
            y: body.y + body.height / 2,
            height: body.height.min(1),
            ..body
        };
        frame.render_widget(
            Paragraph::new("Loading...").alignment(Alignment::Center),
            middle,
        );
        return HitAreas::default();
    }

    let card = card_rect(body, controller.card_position(), units_per_column);
    let audio = match phase {
        Phase::Ready { entry, .. } => draw_entry(frame, card, entry, controller.is_locked()),
        Phase::NoDefinition { .. } => {
            draw_message(
                frame,
                card,
                theme::NEUTRAL_BORDER,
                vec![
                    Line::styled(
                        "No definition found",
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Line::default(),
                    Line::styled(
                        "Swipe the card or press r to try another word",
                        Style::default().fg(theme::MUTED),
                    ),
                ],
            );
            None
        }
        Phase::Failed { word, message } => {
            draw_message(
                frame,
                card,
                theme::ERROR,
                vec![
                    Line::styled(
                        format!("Couldn't look up '{word}'"),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Line::default(),
                    Line::styled(message.clone(), Style::default().fg(theme::MUTED)),
                    Line::default(),
                    Line::styled(
                        "Swipe the card or press r to retry",
                        Style::default().fg(theme::MUTED),
                    ),
                ],
            );
            None
        }
        Phase::Loading { .. } => None,
    };
    HitAreas {
        card: Some(card),
        audio,
    }
}

/// The card, centred in `body` and shifted horizontally by its position.
fn card_rect(body: Rect, position: f32, units_per_column: f32) -> Rect {
    let width = CARD_WIDTH.min(body.width.saturating_sub(4)).max(body.width.min(10));
    let height = body.height.saturating_sub(2).max(body.height.min(3));
    let centred = body.x + (body.width - width) / 2;
    let shift = (position / units_per_column).round() as i32;
    let max_x = i32::from(body.right().saturating_sub(width));
    let x = (i32::from(centred) + shift).clamp(i32::from(body.x), max_x.max(i32::from(body.x)));
    Rect {
        x: x as u16,
        y: body.y + (body.height - height) / 2,
        width,
        height,
    }
}

fn card_block(border: ratatui::style::Color) -> Block<'static> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .padding(Padding::horizontal(1))
}

fn draw_entry(
    frame: &mut Frame<'_>,
    card: Rect,
    entry: &DefinitionEntry,
    locked: bool,
) -> Option<Rect> {
    let border = if locked {
        theme::LOCKED_BORDER
    } else {
        theme::SWIPEABLE_BORDER
    };
    let block = card_block(border);
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let pronunciation = pronunciation(entry);
    let mut lines = vec![Line::styled(
        entry.word.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(text) = &pronunciation.text {
        lines.push(Line::styled(
            text.clone(),
            Style::default()
                .fg(theme::MUTED)
                .add_modifier(Modifier::ITALIC),
        ));
    }
    for meaning in project(entry) {
        lines.push(Line::default());
        lines.push(Line::styled(
            meaning.part_of_speech.to_string(),
            Style::default()
                .fg(theme::PART_OF_SPEECH)
                .add_modifier(Modifier::BOLD),
        ));
        for definition in &meaning.definitions {
            lines.push(Line::from(vec![
                Span::raw("• "),
                Span::raw(definition.definition.clone()),
            ]));
            if let Some(example) = &definition.example {
                lines.push(Line::styled(
                    format!("  “{example}”"),
                    Style::default()
                        .fg(theme::MUTED)
                        .add_modifier(Modifier::ITALIC),
                ));
            }
        }
    }

    // the audio control gets a row of its own so it never covers the word
    let (audio, text) = if pronunciation.audio.is_some() {
        let [controls, text] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
        let width = (AUDIO_LABEL.chars().count() as u16).min(controls.width);
        let audio = Rect {
            x: controls.right().saturating_sub(width),
            width,
            ..controls
        };
        frame.render_widget(
            Paragraph::new(Line::styled(
                AUDIO_LABEL,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            audio,
        );
        (Some(audio), text)
    } else {
        (None, inner)
    };
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), text);
    audio
}

fn draw_message(
    frame: &mut Frame<'_>,
    card: Rect,
    border: ratatui::style::Color,
    lines: Vec<Line<'static>>,
) {
    frame.render_widget(
        Paragraph::new(lines)
            .block(card_block(border))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        card,
    );
}

fn draw_footer(frame: &mut Frame<'_>, controller: &Controller, footer: Rect) {
    let mut hints = String::from("drag the card or ←/→ then space · p play · r retry · q quit");
    if controller.settings().prefetch {
        let next = match controller.lookahead().map(|lookahead| &lookahead.status) {
            Some(LookaheadStatus::Ready(_)) => "ready",
            Some(LookaheadStatus::Pending) => "loading",
            None => "none",
        };
        hints.push_str(" · next: ");
        hints.push_str(next);
    }
    frame.render_widget(
        Paragraph::new(Line::styled(hints, Style::default().fg(theme::MUTED)))
            .alignment(Alignment::Center),
        footer,
    );
}
