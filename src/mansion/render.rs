//! Mansion Crawler rendering: narrative panel, control panel, session bar.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::actions::*;
use super::narrative::{FragmentKind, Narrative};
use super::state::GameSession;

/// Rows used by the control list: six controls and one spacer.
const CONTROL_ROWS: u16 = 7;

pub fn render(
    state: &GameSession,
    gesture_progress: u8,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(8),    // Narrative + controls
            Constraint::Length(3), // Session bar
        ])
        .split(area);

    render_title(state, f, chunks[0]);
    if is_narrow_layout(area.width) {
        render_narrow(state, f, chunks[1], click_state);
    } else {
        render_wide(state, f, chunks[1], click_state);
    }
    render_session_bar(state, gesture_progress, f, chunks[2], click_state);
}

fn render_wide(
    state: &GameSession,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    render_narrative(&state.narrative, f, chunks[0]);
    render_controls(state, f, chunks[1], click_state);
}

fn render_narrow(
    state: &GameSession,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(CONTROL_ROWS + 2), // Controls: exact fit
        ])
        .split(area);

    render_narrative(&state.narrative, f, chunks[0]);
    render_controls(state, f, chunks[1], click_state);
}

fn render_title(state: &GameSession, f: &mut Frame, area: Rect) {
    let status = match state.current_location() {
        Some(loc) if state.has_started_game() => format!("  ·  {}", loc.kind().name()),
        _ => String::new(),
    };
    let line = Line::from(vec![
        Span::styled(
            "Mansion Crawler",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(status, Style::default().fg(Color::Gray)),
    ]);
    let title = Paragraph::new(line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, area);
}

/// Styled lines for the narrative, newest fragment on top.
pub fn narrative_lines(narrative: &Narrative) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, fragment) in narrative.fragments().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        let style = match fragment.kind {
            FragmentKind::Title => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            FragmentKind::Heading => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            FragmentKind::Prompt => Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            FragmentKind::Paragraph => Style::default().fg(Color::White),
        };
        for text in &fragment.lines {
            let line = Line::from(Span::styled(text.clone(), style));
            let line = match fragment.kind {
                FragmentKind::Title => line.alignment(Alignment::Center),
                _ => line,
            };
            lines.push(line);
        }
    }
    lines
}

fn render_narrative(narrative: &Narrative, f: &mut Frame, area: Rect) {
    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2) as usize;

    let paragraph = Paragraph::new(narrative_lines(narrative)).wrap(Wrap { trim: false });
    let overflow = paragraph.line_count(inner_width) > inner_height;
    let title = if overflow { " Story (more below) " } else { " Story " };

    let widget = paragraph.block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(title),
    );
    f.render_widget(widget, area);
}

fn render_controls(
    state: &GameSession,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let live = state.has_started_game();
    let key_style = if live {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let label_style = if live {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let control = |key: &'static str, action: Action| {
        Line::from(vec![
            Span::styled(format!(" [{key}] "), key_style),
            Span::styled(action.label(), label_style),
        ])
    };

    let mut cl = ClickableList::new();
    cl.push_clickable(control("W", Action::MoveForward), MOVE_FORWARD);
    cl.push_clickable(control("A", Action::TurnLeft), TURN_LEFT);
    cl.push_clickable(control("D", Action::TurnRight), TURN_RIGHT);
    cl.push_clickable(control("S", Action::TurnAround), TURN_AROUND);
    cl.push(Line::from(""));
    cl.push_clickable(control("F", Action::SearchRoom), SEARCH_ROOM);
    cl.push_clickable(control("E", Action::PickUpItem), PICK_UP_ITEM);

    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1);

    let border = if live { Color::Yellow } else { Color::DarkGray };
    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Controls "),
    );
    f.render_widget(widget, area);
}

fn render_session_bar(
    state: &GameSession,
    gesture_progress: u8,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let bar = session_tabs(state.has_started_game(), gesture_progress).block(block);

    let mut cs = click_state.borrow_mut();
    bar.render(f, area, &mut cs);
}

/// Start is only offered while no game is running; mid-game the same key
/// goes through Restart and its confirmation.
fn session_tabs<'a>(has_started_game: bool, gesture_progress: u8) -> TabBar<'a> {
    let bar = TabBar::new(" │ ");
    let bar = if has_started_game {
        bar.tab("[R] Restart", Style::default().fg(Color::Red), RESTART_GAME)
    } else {
        bar.tab(
            "[Enter] Start",
            Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD),
            START_GAME,
        )
    };
    if gesture_progress == 0 {
        return bar;
    }
    bar.tab(
        format!("Hold {gesture_progress}%"),
        Style::default().fg(Color::Magenta),
        GESTURE_PROGRESS,
    )
}
