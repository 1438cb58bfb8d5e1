//! Player commands and the click-target IDs that produce them.

/// One command for the engine. Buttons, keys and gestures all end up here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    TurnLeft,
    TurnRight,
    TurnAround,
    MoveForward,
    SearchRoom,
    PickUpItem,
    StartGame,
    RestartGame,
    NoAction,
}

impl Action {
    /// Button caption.
    pub fn label(&self) -> &'static str {
        match self {
            Action::TurnLeft => "Turn Left",
            Action::TurnRight => "Turn Right",
            Action::TurnAround => "Turn Around",
            Action::MoveForward => "Move Forward",
            Action::SearchRoom => "Search Room",
            Action::PickUpItem => "Pick Up Item",
            Action::StartGame => "Start",
            Action::RestartGame => "Restart",
            Action::NoAction => "Nothing",
        }
    }

    /// Only meaningful while a game is in progress.
    pub fn needs_running_game(&self) -> bool {
        !matches!(self, Action::StartGame | Action::RestartGame | Action::NoAction)
    }

    pub fn from_click(id: u16) -> Option<Action> {
        CONTROLS
            .iter()
            .find(|(click_id, _)| *click_id == id)
            .map(|&(_, action)| action)
    }
}

// ── Click IDs ─────────────────────────────────────────────────
pub const START_GAME: u16 = 1;
pub const RESTART_GAME: u16 = 2;
/// Gesture hold indicator. Shown in the session bar, fires nothing.
pub const GESTURE_PROGRESS: u16 = 3;

// ── Movement ──────────────────────────────────────────────────
pub const MOVE_FORWARD: u16 = 110;
pub const TURN_LEFT: u16 = 111;
pub const TURN_RIGHT: u16 = 112;
pub const TURN_AROUND: u16 = 113;

// ── Room ──────────────────────────────────────────────────────
pub const SEARCH_ROOM: u16 = 120;
pub const PICK_UP_ITEM: u16 = 121;

/// Every clickable control with the action it fires.
pub const CONTROLS: [(u16, Action); 8] = [
    (START_GAME, Action::StartGame),
    (RESTART_GAME, Action::RestartGame),
    (MOVE_FORWARD, Action::MoveForward),
    (TURN_LEFT, Action::TurnLeft),
    (TURN_RIGHT, Action::TurnRight),
    (TURN_AROUND, Action::TurnAround),
    (SEARCH_ROOM, Action::SearchRoom),
    (PICK_UP_ITEM, Action::PickUpItem),
];
