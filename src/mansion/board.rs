//! Board generation: fixed floor plan, random searchable areas and items.
//!
//! 1. Lay out the 3×5 mansion (two blocked cells).
//! 2. Pick `k ∈ [3, max]` eligible rooms by shuffling the eligible cells,
//!    giving each a label from its room's catalog.
//! 3. Hide Flashlight, Battery Pack and Key in three distinct picked rooms.
//! 4. Mark the starting room visited.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use super::state::{searchable_areas, Board, Coord, Item, REQUIRED_ITEMS, START};

/// Cells that may ever hold a searchable area, in row-major order.
pub fn eligible_cells(board: &Board) -> Vec<Coord> {
    board
        .cells()
        .filter(|(_, loc)| !loc.is_blocked() && !searchable_areas(loc.kind()).is_empty())
        .map(|(at, _)| at)
        .collect()
}

/// Number of eligible cells on the fixed floor plan.
pub fn eligible_cell_count() -> usize {
    eligible_cells(&Board::layout()).len()
}

pub fn generate_board<R: Rng>(
    rng: &mut R,
    max_searchable_areas: usize,
    reveal_items: bool,
) -> Board {
    let mut board = Board::layout();

    let mut candidates = eligible_cells(&board);
    let max = max_searchable_areas.clamp(REQUIRED_ITEMS.len(), candidates.len());
    let count = rng.gen_range(REQUIRED_ITEMS.len()..=max);

    candidates.shuffle(rng);
    candidates.truncate(count);

    for &at in &candidates {
        if let Some(loc) = board.get_mut(at) {
            if let Some(&label) = searchable_areas(loc.kind()).choose(rng) {
                loc.add_searchable(label, Item::NoItem);
            }
        }
    }

    for item in REQUIRED_ITEMS {
        let idx = rng.gen_range(0..candidates.len());
        let at = candidates.swap_remove(idx);
        if let Some(loc) = board.get_mut(at) {
            if let Some(label) = loc.searchable_label() {
                loc.add_searchable(label, item);
            }
            if reveal_items {
                debug!("assigned {} to the {} at {:?}", item.name(), loc.kind().name(), at);
            }
        }
    }

    if let Some(start) = board.get_mut(START) {
        start.visit();
    }

    if reveal_items {
        match serde_json::to_string(&board) {
            Ok(json) => debug!("board: {json}"),
            Err(e) => debug!("board dump failed: {e}"),
        }
    }

    board
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mansion::state::RoomKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn board_for(seed: u64) -> Board {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        generate_board(&mut rng, 9, false)
    }

    fn item_cells(board: &Board) -> Vec<(Coord, Item)> {
        board
            .cells()
            .filter(|(_, loc)| loc.has_item())
            .map(|(at, loc)| (at, loc.item()))
            .collect()
    }

    #[test]
    fn twelve_rooms_are_eligible() {
        assert_eq!(eligible_cell_count(), 12);
        let cells = eligible_cells(&Board::layout());
        assert!(!cells.contains(&START));
        assert!(!cells.contains(&Coord::new(1, 1)));
        assert!(!cells.contains(&Coord::new(3, 1)));
    }

    #[test]
    fn every_item_placed_once() {
        let board = board_for(42);
        let items = item_cells(&board);
        assert_eq!(items.len(), 3);
        for item in REQUIRED_ITEMS {
            assert_eq!(items.iter().filter(|(_, i)| *i == item).count(), 1);
        }
    }

    #[test]
    fn items_sit_in_searchable_areas() {
        let board = board_for(7);
        for (_, loc) in board.cells() {
            if loc.has_item() {
                assert!(loc.has_searchable_area());
            }
        }
    }

    #[test]
    fn labels_come_from_room_catalog() {
        let board = board_for(1234);
        for (_, loc) in board.cells() {
            if let Some(label) = loc.searchable_label() {
                assert!(searchable_areas(loc.kind()).contains(&label));
            }
        }
    }

    #[test]
    fn lounge_and_blockers_stay_empty() {
        for seed in 0..50 {
            let board = board_for(seed);
            for (_, loc) in board.cells() {
                if matches!(loc.kind(), RoomKind::Lounge | RoomKind::Blocked) {
                    assert!(!loc.has_searchable_area(), "seed={seed}");
                }
            }
        }
    }

    #[test]
    fn start_is_visited_and_nothing_else() {
        let board = board_for(3);
        let visited: Vec<Coord> = board
            .cells()
            .filter(|(_, loc)| loc.visited())
            .map(|(at, _)| at)
            .collect();
        assert_eq!(visited, vec![START]);
    }

    #[test]
    fn same_seed_same_board() {
        let a = board_for(99);
        let b = board_for(99);
        let summary = |board: &Board| -> Vec<(Option<&'static str>, Item)> {
            board
                .cells()
                .map(|(_, loc)| (loc.searchable_label(), loc.item()))
                .collect()
        };
        assert_eq!(summary(&a), summary(&b));
    }

    #[test]
    fn minimum_range_places_exactly_three() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let board = generate_board(&mut rng, 3, false);
        let areas = board.cells().filter(|(_, loc)| loc.has_searchable_area()).count();
        assert_eq!(areas, 3);
        assert_eq!(item_cells(&board).len(), 3);
    }

    #[test]
    fn out_of_range_max_is_clamped() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let board = generate_board(&mut rng, 100, true);
        let areas = board.cells().filter(|(_, loc)| loc.has_searchable_area()).count();
        assert!((3..=12).contains(&areas));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    proptest! {
        #[test]
        fn prop_searchable_count_in_range(seed in any::<u64>()) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let board = generate_board(&mut rng, 9, false);
            let areas = board.cells().filter(|(_, loc)| loc.has_searchable_area()).count();
            prop_assert!((3..=9).contains(&areas), "got {} areas", areas);
        }

        #[test]
        fn prop_items_distinct_and_complete(seed in any::<u64>()) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let board = generate_board(&mut rng, 9, false);
            let mut items: Vec<Item> = board
                .cells()
                .filter(|(_, loc)| loc.has_item())
                .map(|(_, loc)| loc.item())
                .collect();
            prop_assert_eq!(items.len(), 3);
            items.sort_by_key(|item| item.name());
            items.dedup();
            prop_assert_eq!(items.len(), 3);
        }

        #[test]
        fn prop_blockers_never_searchable(seed in any::<u64>(), max in 3usize..=12) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let board = generate_board(&mut rng, max, false);
            for (_, loc) in board.cells() {
                if loc.is_blocked() {
                    prop_assert!(!loc.has_searchable_area());
                }
            }
        }
    }
}
