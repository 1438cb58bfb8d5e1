//! Mansion Crawler game state: all data structures, no action logic.
//!
//! The board is a fixed 3×5 grid of [`Location`]s. Each location carries
//! one-way flags (visited / searched / looted) that the resolver in
//! `logic.rs` claims as the player explores.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use super::config::SessionConfig;
use super::narrative::{Fragment, Narrative};

// ── Items ─────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Item {
    Flashlight,
    BatteryPack,
    Key,
    NoItem,
}

impl Item {
    pub fn name(&self) -> &'static str {
        match self {
            Item::Flashlight => "Flashlight",
            Item::BatteryPack => "Battery Pack",
            Item::Key => "Key",
            Item::NoItem => "nothing",
        }
    }
}

/// The three items the player needs, in distribution order.
pub const REQUIRED_ITEMS: [Item; 3] = [Item::Flashlight, Item::BatteryPack, Item::Key];

// ── Rooms ─────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum RoomKind {
    Lounge,
    GrandHall,
    Foyer,
    DiningRoom,
    Kitchen,
    SupplyRoom,
    StaffQuarters,
    WestWingHallway,
    EastWingHallway,
    GuestLodging,
    Study,
    MasterBedroom,
    Ballroom,
    Blocked,
}

impl RoomKind {
    pub fn name(&self) -> &'static str {
        match self {
            RoomKind::Lounge => "Lounge",
            RoomKind::GrandHall => "Grand Hall",
            RoomKind::Foyer => "Foyer",
            RoomKind::DiningRoom => "Dining Room",
            RoomKind::Kitchen => "Kitchen",
            RoomKind::SupplyRoom => "Supply Room",
            RoomKind::StaffQuarters => "Staff Quarters",
            RoomKind::WestWingHallway => "West Wing Hallway",
            RoomKind::EastWingHallway => "East Wing Hallway",
            RoomKind::GuestLodging => "Guest Lodging",
            RoomKind::Study => "Study",
            RoomKind::MasterBedroom => "Master Bedroom",
            RoomKind::Ballroom => "Ballroom",
            RoomKind::Blocked => "wall",
        }
    }
}

/// Candidate searchable-area labels per room. Empty means the room never
/// holds a searchable area.
pub fn searchable_areas(kind: RoomKind) -> &'static [&'static str] {
    match kind {
        RoomKind::GrandHall | RoomKind::WestWingHallway | RoomKind::EastWingHallway => {
            &["stack of boxes on the floor", "supply cabinet against the wall"]
        }
        RoomKind::Foyer => &["mound of assorted items in the corner", "rack full of old coats"],
        RoomKind::DiningRoom => &["collection of various items scattered on the table"],
        RoomKind::Kitchen => &[
            "stack of food baskets",
            "couple of old cooking pots",
            "rack of cupboards",
        ],
        RoomKind::SupplyRoom => &[
            "stack of crates against the wall",
            "myriad set of items scattered on the floor",
            "series of supply cabinets",
        ],
        RoomKind::StaffQuarters | RoomKind::GuestLodging => {
            &["drawer near each of the beds", "set of dressers"]
        }
        RoomKind::Study => &["mound of assorted items in the corner"],
        RoomKind::MasterBedroom => &[
            "wardrobe against the wall",
            "collection of assorted items on the nightstand",
        ],
        RoomKind::Ballroom => &[
            "mound of assorted items in the corner",
            "costume closet against the wall",
        ],
        RoomKind::Lounge | RoomKind::Blocked => &[],
    }
}

// ── Location ──────────────────────────────────────────────────

/// One cell of the board.
#[derive(Clone, Debug, Serialize)]
pub struct Location {
    kind: RoomKind,
    visited: bool,
    searched: bool,
    looted: bool,
    searchable_label: Option<&'static str>,
    item: Item,
}

impl Location {
    pub fn new(kind: RoomKind) -> Self {
        Self {
            kind,
            visited: false,
            searched: false,
            looted: false,
            searchable_label: None,
            item: Item::NoItem,
        }
    }

    /// Attach a searchable area and the item hidden in it (possibly
    /// [`Item::NoItem`]). Blocked cells refuse and stay untouched.
    pub fn add_searchable(&mut self, label: &'static str, item: Item) -> bool {
        if self.is_blocked() {
            return false;
        }
        self.searchable_label = Some(label);
        self.item = item;
        true
    }

    /// Returns true only the first time.
    pub fn visit(&mut self) -> bool {
        if self.visited {
            return false;
        }
        self.visited = true;
        true
    }

    /// Returns true only the first time.
    pub fn search(&mut self) -> bool {
        if self.searched {
            return false;
        }
        self.searched = true;
        true
    }

    /// Hand out the stored item once; every later call yields `NoItem`.
    pub fn loot(&mut self) -> Item {
        if self.looted {
            return Item::NoItem;
        }
        self.looted = true;
        self.item
    }

    pub fn kind(&self) -> RoomKind {
        self.kind
    }

    pub fn item(&self) -> Item {
        self.item
    }

    pub fn searchable_label(&self) -> Option<&'static str> {
        self.searchable_label
    }

    pub fn has_item(&self) -> bool {
        self.item != Item::NoItem
    }

    pub fn has_searchable_area(&self) -> bool {
        self.searchable_label.is_some_and(|label| !label.is_empty())
    }

    pub fn is_blocked(&self) -> bool {
        self.kind == RoomKind::Blocked
    }

    pub fn visited(&self) -> bool {
        self.visited
    }

    pub fn searched(&self) -> bool {
        self.searched
    }

    pub fn looted(&self) -> bool {
        self.looted
    }
}

// ── Geometry ──────────────────────────────────────────────────

/// Board coordinate. Signed so that a step off the edge is representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, facing: Facing) -> Coord {
        Coord::new(self.x + facing.dx(), self.y + facing.dy())
    }
}

pub const BOARD_WIDTH: usize = 5;
pub const BOARD_HEIGHT: usize = 3;

pub const START: Coord = Coord::new(2, 0);
pub const START_FACING: Facing = Facing::South;

/// The mansion's front door: one step south of the Foyer, off the grid.
pub const FRONT_DOOR: Coord = Coord::new(2, 3);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Facing {
    North,
    East,
    South,
    West,
}

impl Facing {
    pub fn dx(self) -> i32 {
        match self {
            Facing::East => 1,
            Facing::West => -1,
            Facing::North | Facing::South => 0,
        }
    }

    pub fn dy(self) -> i32 {
        match self {
            Facing::North => -1,
            Facing::South => 1,
            Facing::East | Facing::West => 0,
        }
    }

    /// Counter-clockwise.
    pub fn turn_left(self) -> Facing {
        match self {
            Facing::North => Facing::West,
            Facing::West => Facing::South,
            Facing::South => Facing::East,
            Facing::East => Facing::North,
        }
    }

    /// Clockwise.
    pub fn turn_right(self) -> Facing {
        match self {
            Facing::North => Facing::East,
            Facing::East => Facing::South,
            Facing::South => Facing::West,
            Facing::West => Facing::North,
        }
    }

    pub fn reverse(self) -> Facing {
        match self {
            Facing::North => Facing::South,
            Facing::South => Facing::North,
            Facing::East => Facing::West,
            Facing::West => Facing::East,
        }
    }
}

// ── Board ─────────────────────────────────────────────────────

#[derive(Clone, Debug, Serialize)]
pub struct Board {
    /// Row-major: `grid[y][x]`.
    pub grid: Vec<Vec<Location>>,
}

impl Board {
    /// The fixed mansion floor plan with no searchable areas yet.
    pub fn layout() -> Self {
        use RoomKind::*;
        let rows: [[RoomKind; BOARD_WIDTH]; BOARD_HEIGHT] = [
            [Kitchen, DiningRoom, Lounge, Study, MasterBedroom],
            [SupplyRoom, Blocked, GrandHall, Blocked, Ballroom],
            [StaffQuarters, WestWingHallway, Foyer, EastWingHallway, GuestLodging],
        ];
        let grid = rows
            .iter()
            .map(|row| row.iter().map(|&kind| Location::new(kind)).collect())
            .collect();
        Self { grid }
    }

    pub fn in_bounds(&self, at: Coord) -> bool {
        at.x >= 0
            && at.y >= 0
            && (at.y as usize) < self.grid.len()
            && (at.x as usize) < self.grid[at.y as usize].len()
    }

    pub fn get(&self, at: Coord) -> Option<&Location> {
        if !self.in_bounds(at) {
            return None;
        }
        Some(&self.grid[at.y as usize][at.x as usize])
    }

    pub fn get_mut(&mut self, at: Coord) -> Option<&mut Location> {
        if !self.in_bounds(at) {
            return None;
        }
        Some(&mut self.grid[at.y as usize][at.x as usize])
    }

    /// In bounds and not a blocker.
    pub fn is_walkable(&self, at: Coord) -> bool {
        self.get(at).is_some_and(|loc| !loc.is_blocked())
    }

    /// All cells in row-major order with their coordinates.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, &Location)> {
        self.grid.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, loc)| (Coord::new(x as i32, y as i32), loc))
        })
    }
}

// ── Player & ledger ───────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerState {
    pub position: Coord,
    pub facing: Facing,
}

impl PlayerState {
    pub fn at_start() -> Self {
        Self {
            position: START,
            facing: START_FACING,
        }
    }

    pub fn forward(&self) -> Coord {
        self.position.step(self.facing)
    }
}

/// Which of the three required items the player has collected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LootLedger {
    pub flashlight: bool,
    pub battery_pack: bool,
    pub key: bool,
}

impl LootLedger {
    /// Record a collected item. `NoItem` is ignored.
    pub fn collect(&mut self, item: Item) {
        match item {
            Item::Flashlight => self.flashlight = true,
            Item::BatteryPack => self.battery_pack = true,
            Item::Key => self.key = true,
            Item::NoItem => {}
        }
    }

    pub fn has(&self, item: Item) -> bool {
        match item {
            Item::Flashlight => self.flashlight,
            Item::BatteryPack => self.battery_pack,
            Item::Key => self.key,
            Item::NoItem => false,
        }
    }

    pub fn count(&self) -> usize {
        REQUIRED_ITEMS.iter().filter(|&&item| self.has(item)).count()
    }
}

// ── Root Session State ────────────────────────────────────────

/// One play-through. Owns every piece of mutable game state.
pub struct GameSession {
    pub config: SessionConfig,
    pub board: Board,
    pub player: PlayerState,
    pub ledger: LootLedger,
    pub has_started_game: bool,
    pub narrative: Narrative,
    /// Shared by every board this session builds, so restarts differ.
    pub rng: ChaCha8Rng,
    pub games_started: u64,
}

impl GameSession {
    /// A session waiting for `StartGame`. Until then the board is the bare
    /// floor plan. `config.seed` wins over `host_seed` when set.
    pub fn new(config: SessionConfig, host_seed: u64) -> Self {
        let mut narrative = Narrative::new();
        narrative.prepend(Fragment::prompt("Press Start to play"));
        let rng = ChaCha8Rng::seed_from_u64(config.seed.unwrap_or(host_seed));
        Self {
            config,
            board: Board::layout(),
            player: PlayerState::at_start(),
            ledger: LootLedger::default(),
            has_started_game: false,
            narrative,
            rng,
            games_started: 0,
        }
    }

    pub fn has_started_game(&self) -> bool {
        self.has_started_game
    }

    /// Current narrative as HTML, newest fragment first.
    pub fn game_text(&self) -> String {
        self.narrative.to_html()
    }

    pub fn narrative(&self) -> &Narrative {
        &self.narrative
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn ledger(&self) -> &LootLedger {
        &self.ledger
    }

    pub fn current_location(&self) -> Option<&Location> {
        self.board.get(self.player.position)
    }
}
