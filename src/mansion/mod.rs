//! Mansion Crawler: find the Flashlight, the Battery Pack and the Key, then
//! leave through the front door.
//!
//! Keys: [W] forward, [A]/[D] turn, [S] turn around, [F] search,
//! [E] pick up, [Enter] start, [R] restart. Arrow keys are mapped onto
//! W/A/S/D by the front end.

pub mod actions;
pub mod board;
pub mod config;
pub mod gesture;
pub mod logic;
pub mod narrative;
pub mod render;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};

pub use actions::Action;
pub use config::{ConfigError, SessionConfig};
pub use gesture::{gesture_action, Gesture, GestureDebouncer};
pub use logic::ConfirmRestart;
pub use state::GameSession;

/// A session plus the input and render glue around it.
pub struct MansionGame {
    session: GameSession,
    confirm: Box<dyn ConfirmRestart>,
    gestures: GestureDebouncer,
}

impl MansionGame {
    pub fn new(session: GameSession, confirm: Box<dyn ConfirmRestart>) -> Self {
        Self {
            session,
            confirm,
            gestures: GestureDebouncer::default(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Returns true if the event mapped to an action.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let action = match event {
            InputEvent::Key(ch) => key_action(*ch),
            InputEvent::Click(id) => Action::from_click(*id),
        };
        // Start mid-game would rebuild the board unasked; route it through
        // the restart confirmation instead.
        let action = action.map(|a| match a {
            Action::StartGame if self.session.has_started_game() => Action::RestartGame,
            a => a,
        });
        match action {
            Some(action) => {
                self.apply(action);
                true
            }
            None => false,
        }
    }

    /// Feed one classified gesture frame. Fires an action once the gesture
    /// has been held long enough.
    pub fn handle_gesture(&mut self, now_ms: f64, gesture: Gesture) -> Option<Action> {
        let held = self.gestures.update(now_ms, gesture)?;
        let action = gesture_action(held, self.session.has_started_game());
        self.apply(action);
        Some(action)
    }

    /// Percent toward firing the gesture being held, for the session bar.
    pub fn gesture_progress(&self) -> u8 {
        self.gestures.progress()
    }

    pub fn apply(&mut self, action: Action) {
        self.session.process_action(action, self.confirm.as_mut());
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.session, self.gesture_progress(), f, area, click_state);
    }
}

fn key_action(ch: char) -> Option<Action> {
    match ch.to_ascii_lowercase() {
        'w' => Some(Action::MoveForward),
        'a' => Some(Action::TurnLeft),
        'd' => Some(Action::TurnRight),
        's' => Some(Action::TurnAround),
        'f' => Some(Action::SearchRoom),
        'e' => Some(Action::PickUpItem),
        'r' => Some(Action::RestartGame),
        '\n' | ' ' => Some(Action::StartGame),
        _ => None,
    }
}

// ── Tests ───────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use super::actions::{MOVE_FORWARD, START_GAME};
    use super::state::{Coord, Facing, START};

    fn make_game(confirm: bool) -> MansionGame {
        let session = GameSession::new(SessionConfig::default().with_seed(5), 0);
        MansionGame::new(session, Box::new(move || confirm))
    }

    #[test]
    fn enter_starts_game() {
        let mut g = make_game(true);
        assert!(g.handle_input(&InputEvent::Key('\n')));
        assert!(g.session().has_started_game());
    }

    #[test]
    fn wasd_moves_and_turns() {
        let mut g = make_game(true);
        g.handle_input(&InputEvent::Key(' '));
        g.handle_input(&InputEvent::Key('W'));
        assert_eq!(g.session().player.position, Coord::new(2, 1));
        g.handle_input(&InputEvent::Key('a'));
        assert_eq!(g.session().player.facing, Facing::East);
        g.handle_input(&InputEvent::Key('s'));
        assert_eq!(g.session().player.facing, Facing::West);
        g.handle_input(&InputEvent::Key('d'));
        assert_eq!(g.session().player.facing, Facing::North);
    }

    #[test]
    fn clicks_map_through_action_ids() {
        let mut g = make_game(true);
        assert!(g.handle_input(&InputEvent::Click(START_GAME)));
        assert!(g.handle_input(&InputEvent::Click(MOVE_FORWARD)));
        assert_eq!(g.session().player.position, Coord::new(2, 1));
        assert!(!g.handle_input(&InputEvent::Click(999)));
    }

    #[test]
    fn unmapped_key_is_ignored() {
        let mut g = make_game(true);
        assert!(!g.handle_input(&InputEvent::Key('z')));
        assert_eq!(g.session().game_text(), "<h5>Press Start to play</h5>");
    }

    #[test]
    fn declined_restart_keeps_position() {
        let mut g = make_game(false);
        g.handle_input(&InputEvent::Key('\n'));
        g.handle_input(&InputEvent::Key('w'));
        g.handle_input(&InputEvent::Key('r'));
        assert_eq!(g.session().player.position, Coord::new(2, 1));
    }

    #[test]
    fn start_mid_game_asks_before_wiping_progress() {
        let mut g = make_game(false);
        g.handle_input(&InputEvent::Key('\n'));
        g.handle_input(&InputEvent::Key('w'));
        let moved = Coord::new(2, 1);

        for event in [
            InputEvent::Key('\n'),
            InputEvent::Key(' '),
            InputEvent::Click(START_GAME),
        ] {
            assert!(g.handle_input(&event));
            assert_eq!(g.session().player.position, moved, "{event:?}");
            assert!(g.session().has_started_game());
            assert_eq!(g.session().games_started, 1);
        }
    }

    #[test]
    fn start_mid_game_restarts_once_confirmed() {
        let mut g = make_game(true);
        g.handle_input(&InputEvent::Key('\n'));
        g.handle_input(&InputEvent::Key('w'));
        g.handle_input(&InputEvent::Key(' '));
        assert_eq!(g.session().player.position, START);
        assert_eq!(g.session().games_started, 2);
    }

    #[test]
    fn held_gesture_starts_then_moves() {
        let mut g = make_game(true);
        let mut fired = Vec::new();
        for step in 0..8 {
            let t = step as f64 * 500.0;
            if let Some(a) = g.handle_gesture(t, Gesture::OpenAndClosed) {
                fired.push(a);
            }
        }
        assert_eq!(fired, vec![Action::StartGame]);
        assert!(g.session().has_started_game());
        assert_eq!(g.session().player.position, START);

        let mut moved = None;
        for step in 0..8 {
            let t = 4_000.0 + step as f64 * 500.0;
            moved = moved.or(g.handle_gesture(t, Gesture::Pointing));
        }
        assert_eq!(moved, Some(Action::MoveForward));
        assert_eq!(g.session().player.position, Coord::new(2, 1));
    }

    #[test]
    fn gesture_progress_climbs_then_drops_on_change() {
        let mut g = make_game(true);
        for step in 0..4 {
            g.handle_gesture(step as f64 * 500.0, Gesture::OpenHand);
        }
        assert_eq!(g.gesture_progress(), 50);
        g.handle_gesture(2_000.0, Gesture::ClosedHand);
        assert_eq!(g.gesture_progress(), 0);
    }
}
