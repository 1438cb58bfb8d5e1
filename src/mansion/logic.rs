//! Mansion Crawler action resolution: pure functions over `GameSession`.
//!
//! Every call to [`process_action`] rebuilds the narrative from scratch.
//! The action's own text goes in first, the context lines land on top.

use log::{debug, info, warn};

use super::actions::Action;
use super::board::generate_board;
use super::narrative::Fragment;
use super::state::{GameSession, LootLedger, PlayerState, FRONT_DOOR};

pub const RESTART_PROMPT: &str = "Are you sure you wish to reset the game? This cannot be undone!";

const COULD_NOT_PERFORM: &str = "Could not perform action";

const DARKNESS: &str =
    "You open the front door and step through the threshold, only to be met by total darkness.";
const SLAMMED_SHUT: &str =
    "The front door suddenly slams shut, condemning you to walk in eternal darkness.";
const DEAD_FLASHLIGHT: &str = "You attempt to use the flashlight to illuminate your surroundings; \
however, the flashlight is missing its battery pack.";
const LIT_PATH: &str = "You attempt to use the flashlight to illuminate your surroundings, \
which reveals a path moving forward.";
const DREAM: &str =
    "You move across the path only to suddenly awake in your room, realizing it was all a dream.";

/// Asked before a running game is thrown away.
pub trait ConfirmRestart {
    fn confirm_restart(&mut self, message: &str) -> bool;
}

impl<F: FnMut() -> bool> ConfirmRestart for F {
    fn confirm_restart(&mut self, _message: &str) -> bool {
        self()
    }
}

impl GameSession {
    pub fn process_action<C: ConfirmRestart + ?Sized>(&mut self, action: Action, confirm: &mut C) {
        process_action(self, action, confirm);
    }
}

// ── Dispatch ──────────────────────────────────────────────────

pub fn process_action<C: ConfirmRestart + ?Sized>(
    state: &mut GameSession,
    action: Action,
    confirm: &mut C,
) {
    state.narrative.clear();

    if action.needs_running_game() && !state.has_started_game {
        warn!("rejected {:?}: no game in progress", action);
        state.narrative.prepend(Fragment::prompt(COULD_NOT_PERFORM));
    } else {
        debug!("action {:?} at {:?}", action, state.player);
        match action {
            Action::NoAction => state.narrative.prepend(Fragment::prompt(COULD_NOT_PERFORM)),
            Action::MoveForward => move_forward(state),
            Action::TurnLeft => turn_left(state),
            Action::TurnRight => turn_right(state),
            Action::TurnAround => turn_around(state),
            Action::SearchRoom => search_room(state),
            Action::PickUpItem => pick_up_item(state),
            Action::StartGame => start_game(state),
            Action::RestartGame => restart_game(state, confirm),
        }
    }

    update_context(state);
}

// ── Session ───────────────────────────────────────────────────

/// Fresh board, fresh ledger, player back in the Lounge.
pub fn start_game(state: &mut GameSession) {
    state.player = PlayerState::at_start();
    state.has_started_game = true;

    state.narrative.clear();
    state.narrative.prepend_group(vec![
        Fragment::paragraph(
            "You awake to find yourself in a dark room, illuminated slightly by moonlight from a nearby window.",
        ),
        Fragment::prompt("Use the controls to find a way to leave the mansion!"),
        Fragment::title("Welcome to Mansion Crawler"),
    ]);

    state.board = generate_board(
        &mut state.rng,
        state.config.max_searchable_areas,
        state.config.reveal_items,
    );
    state.ledger = LootLedger::default();
    state.games_started += 1;
    info!("game {} started", state.games_started);
}

pub fn restart_game<C: ConfirmRestart + ?Sized>(state: &mut GameSession, confirm: &mut C) {
    if confirm.confirm_restart(RESTART_PROMPT) {
        start_game(state);
    } else {
        debug!("restart declined");
    }
}

// ── Turning ───────────────────────────────────────────────────

pub fn turn_left(state: &mut GameSession) {
    state.player.facing = state.player.facing.turn_left();
    state.narrative.prepend(Fragment::heading("YOU TURNED LEFT"));
}

pub fn turn_right(state: &mut GameSession) {
    state.player.facing = state.player.facing.turn_right();
    state.narrative.prepend(Fragment::heading("YOU TURNED RIGHT"));
}

pub fn turn_around(state: &mut GameSession) {
    state.player.facing = state.player.facing.reverse();
    state.narrative.prepend(Fragment::heading("YOU TURNED AROUND"));
}

// ── Moving ────────────────────────────────────────────────────

pub fn move_forward(state: &mut GameSession) {
    state.narrative.prepend(Fragment::heading("YOU MOVED FORWARD"));

    let target = state.player.forward();
    // The front door sits outside the grid, so it is checked before bounds.
    if target == FRONT_DOOR {
        resolve_front_door(state);
        return;
    }
    if !state.board.is_walkable(target) {
        state.narrative.prepend(Fragment::paragraph("You bumped into a wall."));
        return;
    }

    state.player.position = target;
    if let Some(loc) = state.board.get_mut(target) {
        loc.visit();
    }
    state.narrative.prepend(Fragment::paragraph("You open and go through the door."));
}

/// What happens at the front door for a given set of collected items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorOutcome {
    Locked,
    Darkness,
    DeadFlashlight,
    Escaped,
}

impl DoorOutcome {
    pub fn for_ledger(ledger: &LootLedger) -> Self {
        match (ledger.key, ledger.flashlight, ledger.battery_pack) {
            (false, _, _) => DoorOutcome::Locked,
            (true, false, _) => DoorOutcome::Darkness,
            (true, true, false) => DoorOutcome::DeadFlashlight,
            (true, true, true) => DoorOutcome::Escaped,
        }
    }

    pub fn ends_game(self) -> bool {
        self != DoorOutcome::Locked
    }
}

pub fn resolve_front_door(state: &mut GameSession) {
    let outcome = DoorOutcome::for_ledger(&state.ledger);
    let group = match outcome {
        DoorOutcome::Locked => vec![Fragment::paragraph(
            "The front door is locked and will not budge.",
        )],
        DoorOutcome::Darkness => vec![
            Fragment::lines([DARKNESS, SLAMMED_SHUT]),
            Fragment::title("GAME OVER"),
        ],
        DoorOutcome::DeadFlashlight => vec![
            Fragment::lines([DARKNESS, DEAD_FLASHLIGHT, SLAMMED_SHUT]),
            Fragment::title("GAME OVER"),
        ],
        DoorOutcome::Escaped => vec![
            Fragment::lines([DARKNESS, LIT_PATH, DREAM]),
            Fragment::title("!!!YOU WIN!!!"),
        ],
    };
    state.narrative.prepend_group(group);
    if !outcome.ends_game() {
        return;
    }
    state.has_started_game = false;
    info!(
        "game {} ended: {:?} with {} of 3 items",
        state.games_started,
        outcome,
        state.ledger.count()
    );
}

// ── Searching & looting ───────────────────────────────────────

pub fn search_room(state: &mut GameSession) {
    state.narrative.prepend(Fragment::heading("YOU SEARCHED THE ROOM"));

    let Some(loc) = state.board.get_mut(state.player.position) else {
        warn!("player off the board at {:?}", state.player.position);
        return;
    };
    let first_search = loc.search();
    let label = loc.searchable_label().unwrap_or_default();
    let item = loc.item().name();

    let fragment = match (loc.has_searchable_area(), first_search, loc.has_item(), loc.looted()) {
        (false, ..) => Fragment::paragraph("You do not see anything in the room to search."),
        (true, true, false, _) => {
            Fragment::paragraph(format!("You searched the {label}, but found nothing."))
        }
        (true, false, false, _) => {
            Fragment::paragraph(format!("You searched the {label} again, but still found nothing."))
        }
        (true, true, true, _) => Fragment::lines([
            format!("You searched the {label}."),
            format!("You found a {item}."),
        ]),
        (true, false, true, false) => Fragment::lines([
            format!("You searched the {label}."),
            format!("This is where you found the {item}."),
        ]),
        (true, false, true, true) => Fragment::lines([
            format!("You searched the {label}."),
            format!("This is where you picked up the {item}."),
        ]),
    };
    state.narrative.prepend(fragment);
}

pub fn pick_up_item(state: &mut GameSession) {
    state.narrative.prepend(Fragment::heading("YOU PICKED UP AN ITEM"));

    let Some(loc) = state.board.get_mut(state.player.position) else {
        warn!("player off the board at {:?}", state.player.position);
        return;
    };

    let text = if !loc.has_searchable_area() {
        "There is nothing in this room.".to_string()
    } else if !loc.searched() {
        "You have to at least search the room first, before there is an item to pick up."
            .to_string()
    } else if !loc.has_item() {
        "There is no item in this room to pick up.".to_string()
    } else if loc.looted() {
        format!("You have already picked up the {} in this room.", loc.item().name())
    } else {
        let item = loc.loot();
        state.ledger.collect(item);
        debug!("collected {:?}, ledger now {:?}", item, state.ledger);
        format!("You picked up the {}.", item.name())
    };
    state.narrative.prepend(Fragment::paragraph(text));
}

// ── Context ───────────────────────────────────────────────────

/// Where the player is and what is in front of them.
pub fn update_context(state: &mut GameSession) {
    if !state.has_started_game {
        state.narrative.prepend(Fragment::prompt("Select Start to play"));
        return;
    }

    let forward = state.player.forward();
    let ahead = match state.board.get(forward) {
        Some(loc) if !loc.is_blocked() && loc.visited() => {
            format!("the door to the {}", loc.kind().name())
        }
        Some(loc) if !loc.is_blocked() => "an unknown door".to_string(),
        _ if forward == FRONT_DOOR => "the mansion's front door".to_string(),
        _ => "a wall".to_string(),
    };

    let Some(here) = state.current_location() else {
        return;
    };
    let room = here.kind().name();
    let visible = here
        .searchable_label()
        .filter(|_| here.has_searchable_area());

    state
        .narrative
        .prepend(Fragment::paragraph(format!("You are in the {room}, facing {ahead}.")));
    if let Some(label) = visible {
        state
            .narrative
            .prepend(Fragment::paragraph(format!("In the room, you can see a {label}.")));
    }
}

// ── Tests ─────────────────────────────────────────────────────
