//! Board state for the lineup builder: a sparse grid of placed units split
//! into an enemy preview zone and the player's owned zone, plus the single
//! blessing designation and the two league-slot selections.
//!
//! All mutation goes through the operation methods below; the `Reducible`
//! impl at the bottom dispatches UI actions to them. Rejected operations
//! leave the board untouched and surface a feedback notice instead.

use crate::catalog::{self, Unit};
use crate::codec::DecodedState;
use std::collections::BTreeMap;
use std::rc::Rc;
use yew::Reducible;

pub const BOARD_ROWS: u8 = 6;
pub const BOARD_COLS: u8 = 7;
/// Rows below this index belong to the enemy preview zone.
pub const ENEMY_ROW_END: u8 = 3;
/// Maximum occupants of the player zone.
pub const PLAYER_CAP: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zone {
    Enemy,
    Player,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < BOARD_ROWS && col < BOARD_COLS).then_some(Self { row, col })
    }

    /// Parses the `"{row}-{col}"` key used by the URL codec and the DOM
    /// `data-pos` attributes. Out-of-bounds coordinates are rejected.
    pub fn parse(s: &str) -> Option<Self> {
        let (r, c) = s.split_once('-')?;
        Self::new(r.parse().ok()?, c.parse().ok()?)
    }

    pub fn key(&self) -> String {
        format!("{}-{}", self.row, self.col)
    }

    /// Zone membership is derived from the row, never stored authoritatively.
    pub fn zone(&self) -> Zone {
        if self.row < ENEMY_ROW_END {
            Zone::Enemy
        } else {
            Zone::Player
        }
    }
}

/// A unit standing on the board. `zone` is a denormalized copy of
/// `position.zone()` kept for rendering; every move re-derives it from the
/// destination row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedUnit {
    pub unit: &'static Unit,
    pub is_blessed: bool,
    pub blessed_trait: Option<&'static str>,
    pub zone: Zone,
}

impl PlacedUnit {
    fn new(unit: &'static Unit, zone: Zone) -> Self {
        Self {
            unit,
            is_blessed: false,
            blessed_trait: None,
            zone,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeagueSlot {
    Small,
    Large,
}

impl LeagueSlot {
    pub fn allow_list(self) -> &'static [&'static str] {
        match self {
            LeagueSlot::Small => catalog::LEAGUE_SMALL_IDS,
            LeagueSlot::Large => catalog::LEAGUE_LARGE_IDS,
        }
    }
}

/// Where a restored board came from, for the post-restore notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestoreSource {
    Link,
    Draft,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct BoardState {
    pub board: BTreeMap<Position, PlacedUnit>,
    /// At most one position board-wide holds the blessing.
    pub blessed_pos: Option<Position>,
    pub league_small: Option<&'static Unit>,
    pub league_large: Option<&'static Unit>,
    /// Transient user-facing notice from the last operation.
    pub feedback: Option<String>,
    /// Bumped whenever `feedback` is set, so the toast re-triggers.
    pub feedback_seq: u32,
}

impl BoardState {
    fn notify(&mut self, msg: impl Into<String>) {
        self.feedback = Some(msg.into());
        self.feedback_seq = self.feedback_seq.wrapping_add(1);
    }

    pub fn unit_on_board(&self, unit_id: &str) -> bool {
        self.board.values().any(|p| p.unit.id == unit_id)
    }

    /// Player-zone occupants in row-major order.
    pub fn player_units(&self) -> impl Iterator<Item = (&Position, &PlacedUnit)> {
        self.board
            .iter()
            .filter(|(pos, _)| pos.zone() == Zone::Player)
    }

    pub fn player_count(&self) -> usize {
        self.player_units().count()
    }

    pub fn total_cost(&self) -> u32 {
        self.player_units().map(|(_, p)| p.unit.cost as u32).sum()
    }

    /// Places a unit onto an empty or occupied cell. Rejects unknown ids,
    /// units already on the board, and player-zone overflow. Placing onto an
    /// occupied cell replaces the occupant (and drops its blessing).
    pub fn place(&mut self, unit_id: &str, pos: Position) -> bool {
        let Some(unit) = catalog::unit_by_id(unit_id) else {
            self.notify("Unknown unit.");
            return false;
        };
        if self.unit_on_board(unit.id) {
            self.notify(format!("{} is already on the board!", unit.name));
            return false;
        }
        let zone = pos.zone();
        if zone == Zone::Player
            && !self.board.contains_key(&pos)
            && self.player_count() >= PLAYER_CAP
        {
            self.notify(format!("Player area is full (max {PLAYER_CAP} units)!"));
            return false;
        }
        if self.board.insert(pos, PlacedUnit::new(unit, zone)).is_some()
            && self.blessed_pos == Some(pos)
        {
            self.blessed_pos = None;
        }
        true
    }

    /// Places into the first empty player-zone cell, scanning row-major.
    pub fn auto_place(&mut self, unit_id: &str) {
        for row in ENEMY_ROW_END..BOARD_ROWS {
            for col in 0..BOARD_COLS {
                let pos = Position { row, col };
                if !self.board.contains_key(&pos) {
                    let _ = self.place(unit_id, pos);
                    return;
                }
            }
        }
        self.notify("Player area is full!");
    }

    /// Moves a unit; an occupied destination swaps the two units. The
    /// blessing pointer follows whichever unit held it, and both zones are
    /// re-derived from the destination rows.
    pub fn move_unit(&mut self, from: Position, to: Position) {
        if from == to {
            return;
        }
        let Some(mover) = self.board.get(&from).copied() else {
            return;
        };
        let to_zone = to.zone();
        if to_zone == Zone::Player && !self.board.contains_key(&to) {
            let occupied = self.player_units().filter(|(pos, _)| **pos != from).count();
            if occupied >= PLAYER_CAP {
                self.notify("Player area is full!");
                return;
            }
        }
        let displaced = self.board.insert(
            to,
            PlacedUnit {
                zone: to_zone,
                ..mover
            },
        );
        let swapped = displaced.is_some();
        match displaced {
            Some(other) => {
                self.board.insert(
                    from,
                    PlacedUnit {
                        zone: from.zone(),
                        ..other
                    },
                );
            }
            None => {
                self.board.remove(&from);
            }
        }
        // Blessing tracks unit identity, not the coordinate.
        if self.blessed_pos == Some(from) {
            self.blessed_pos = Some(to);
        } else if swapped && self.blessed_pos == Some(to) {
            self.blessed_pos = Some(from);
        }
    }

    pub fn remove(&mut self, pos: Position) {
        if self.board.remove(&pos).is_none() {
            return;
        }
        if self.blessed_pos == Some(pos) {
            self.blessed_pos = None;
        }
    }

    /// Assigns the blessing to `trait_name` on the unit at `pos`, clearing
    /// any previous holder. Toggling the currently blessed trait on the same
    /// unit clears the blessing instead. The trait must be one the occupant
    /// actually owns.
    pub fn toggle_blessing(&mut self, pos: Position, trait_name: &'static str) {
        let Some(occupant) = self.board.get(&pos) else {
            return;
        };
        if !occupant.unit.traits.contains(&trait_name) {
            return;
        }
        let clearing = occupant.is_blessed && occupant.blessed_trait == Some(trait_name);
        if let Some(prev) = self.blessed_pos.take() {
            if let Some(p) = self.board.get_mut(&prev) {
                p.is_blessed = false;
                p.blessed_trait = None;
            }
        }
        if !clearing {
            if let Some(p) = self.board.get_mut(&pos) {
                p.is_blessed = true;
                p.blessed_trait = Some(trait_name);
                self.blessed_pos = Some(pos);
            }
        }
    }

    /// Sets or clears a league slot. Ids outside the slot's allow-list are
    /// ignored; whether the selection actually scores is decided at synergy
    /// time, when board presence is checked.
    pub fn set_league_slot(&mut self, slot: LeagueSlot, unit_id: Option<&str>) {
        let selection = match unit_id {
            None => None,
            Some(id) => {
                if !slot.allow_list().contains(&id) {
                    return;
                }
                catalog::unit_by_id(id)
            }
        };
        match slot {
            LeagueSlot::Small => self.league_small = selection,
            LeagueSlot::Large => self.league_large = selection,
        }
    }

    /// Empties the board and blessing. League slots are left as they are,
    /// matching the reset control's behavior.
    pub fn clear(&mut self) {
        if self.board.is_empty() {
            self.notify("Board is already empty!");
            return;
        }
        self.board.clear();
        self.blessed_pos = None;
        self.notify("Board cleared.");
    }

    /// Replays a validated decode result into an (assumed fresh) board.
    /// Placements go through `place`, so duplicates and overflow are still
    /// rejected entry-by-entry; the blessing only lands if its cell ended up
    /// occupied by a unit that owns the trait.
    pub fn replay(&mut self, decoded: &DecodedState, source: RestoreSource) {
        let mut placed = 0usize;
        for (pos, unit) in &decoded.placements {
            if self.place(unit.id, *pos) {
                placed += 1;
            }
        }
        if let Some((pos, trait_name)) = decoded.blessing {
            if self
                .board
                .get(&pos)
                .is_some_and(|p| p.unit.traits.contains(&trait_name))
            {
                self.toggle_blessing(pos, trait_name);
            }
        }
        self.league_small = decoded.league_small;
        self.league_large = decoded.league_large;
        self.feedback = None;
        let restored_anything =
            placed > 0 || self.league_small.is_some() || self.league_large.is_some();
        match source {
            RestoreSource::Link if placed > 0 => {
                self.notify(format!("{placed} units loaded from link."));
            }
            RestoreSource::Draft if restored_anything => {
                self.notify("Last draft restored.");
            }
            _ => {}
        }
    }
}

#[derive(Clone, Debug)]
pub enum BoardAction {
    Place { unit_id: String, pos: Position },
    AutoPlace { unit_id: String },
    Move { from: Position, to: Position },
    Remove { pos: Position },
    ToggleBlessing { pos: Position, trait_name: &'static str },
    SetLeagueSlot { slot: LeagueSlot, unit_id: Option<String> },
    Clear,
    Restore { decoded: DecodedState, source: RestoreSource },
}

impl Reducible for BoardState {
    type Action = BoardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        match action {
            BoardAction::Place { unit_id, pos } => {
                let _ = new.place(&unit_id, pos);
            }
            BoardAction::AutoPlace { unit_id } => new.auto_place(&unit_id),
            BoardAction::Move { from, to } => new.move_unit(from, to),
            BoardAction::Remove { pos } => new.remove(pos),
            BoardAction::ToggleBlessing { pos, trait_name } => new.toggle_blessing(pos, trait_name),
            BoardAction::SetLeagueSlot { slot, unit_id } => {
                new.set_league_slot(slot, unit_id.as_deref())
            }
            BoardAction::Clear => new.clear(),
            BoardAction::Restore { decoded, source } => new.replay(&decoded, source),
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn position_parse_enforces_bounds() {
        assert_eq!(Position::parse("3-2"), Some(pos(3, 2)));
        assert_eq!(Position::parse("5-6"), Some(pos(5, 6)));
        assert_eq!(Position::parse("6-0"), None);
        assert_eq!(Position::parse("0-7"), None);
        assert_eq!(Position::parse("3"), None);
        assert_eq!(Position::parse("a-b"), None);
    }

    #[test]
    fn zone_is_derived_from_row() {
        assert_eq!(pos(0, 0).zone(), Zone::Enemy);
        assert_eq!(pos(2, 6).zone(), Zone::Enemy);
        assert_eq!(pos(3, 0).zone(), Zone::Player);
        assert_eq!(pos(5, 6).zone(), Zone::Player);
    }

    #[test]
    fn place_rejects_unknown_and_duplicate() {
        let mut b = BoardState::default();
        assert!(!b.place("no-such-unit", pos(3, 0)));
        assert!(b.place("miya", pos(3, 0)));
        assert!(!b.place("miya", pos(3, 1)));
        assert_eq!(b.board.len(), 1);
        assert!(b.feedback.as_deref().unwrap().contains("already on the board"));
    }

    #[test]
    fn place_enforces_player_cap() {
        let mut b = BoardState::default();
        let ids = [
            "miya", "khufra", "alucard", "odette", "lancelot", "masha", "cici", "rafaela",
            "nolan", "valentina",
        ];
        for (i, id) in ids.iter().enumerate() {
            assert!(b.place(id, pos(3 + (i / 7) as u8, (i % 7) as u8)));
        }
        assert_eq!(b.player_count(), 10);
        assert!(!b.place("floryn", pos(5, 0)));
        // The enemy zone is not capped.
        assert!(b.place("floryn", pos(0, 0)));
        assert_eq!(b.player_count(), 10);
    }

    #[test]
    fn place_onto_occupied_replaces_and_drops_blessing() {
        let mut b = BoardState::default();
        assert!(b.place("miya", pos(3, 0)));
        b.toggle_blessing(pos(3, 0), "Marksman");
        assert_eq!(b.blessed_pos, Some(pos(3, 0)));
        assert!(b.place("khufra", pos(3, 0)));
        assert_eq!(b.board[&pos(3, 0)].unit.id, "khufra");
        assert_eq!(b.blessed_pos, None);
        // The displaced unit is gone, so its id is free again.
        assert!(b.place("miya", pos(3, 1)));
    }

    #[test]
    fn auto_place_scans_row_major() {
        let mut b = BoardState::default();
        b.auto_place("miya");
        assert_eq!(b.board[&pos(3, 0)].unit.id, "miya");
        b.auto_place("khufra");
        assert_eq!(b.board[&pos(3, 1)].unit.id, "khufra");
        b.remove(pos(3, 0));
        b.auto_place("odette");
        assert_eq!(b.board[&pos(3, 0)].unit.id, "odette");
    }

    #[test]
    fn auto_place_notices_when_full() {
        let mut b = BoardState::default();
        let ids = [
            "miya", "khufra", "alucard", "odette", "lancelot", "masha", "cici", "rafaela",
            "nolan", "valentina",
        ];
        for id in ids {
            b.auto_place(id);
        }
        b.auto_place("floryn");
        assert!(!b.unit_on_board("floryn"));
        assert!(b.feedback.as_deref().unwrap().contains("full"));
    }

    #[test]
    fn move_swaps_occupied_target() {
        let mut b = BoardState::default();
        b.place("miya", pos(3, 0));
        b.place("khufra", pos(3, 1));
        b.move_unit(pos(3, 0), pos(3, 1));
        assert_eq!(b.board[&pos(3, 0)].unit.id, "khufra");
        assert_eq!(b.board[&pos(3, 1)].unit.id, "miya");
        assert_eq!(b.board.len(), 2);
    }

    #[test]
    fn move_rederives_zone_from_destination() {
        let mut b = BoardState::default();
        b.place("miya", pos(3, 0));
        b.move_unit(pos(3, 0), pos(0, 0));
        assert_eq!(b.board[&pos(0, 0)].zone, Zone::Enemy);
        b.place("khufra", pos(3, 0));
        // Swap across the zone boundary: both zones come from the new rows.
        b.move_unit(pos(0, 0), pos(3, 0));
        assert_eq!(b.board[&pos(3, 0)].unit.id, "miya");
        assert_eq!(b.board[&pos(3, 0)].zone, Zone::Player);
        assert_eq!(b.board[&pos(0, 0)].unit.id, "khufra");
        assert_eq!(b.board[&pos(0, 0)].zone, Zone::Enemy);
    }

    #[test]
    fn move_into_full_player_zone_is_rejected_for_newcomers() {
        let mut b = BoardState::default();
        let ids = [
            "miya", "khufra", "alucard", "odette", "lancelot", "masha", "cici", "rafaela",
            "nolan", "valentina",
        ];
        for id in ids {
            b.auto_place(id);
        }
        b.place("floryn", pos(0, 0));
        b.move_unit(pos(0, 0), pos(5, 0));
        assert_eq!(b.board[&pos(0, 0)].unit.id, "floryn");
        // Moving within the player zone is still fine.
        b.move_unit(pos(3, 0), pos(5, 0));
        assert_eq!(b.board[&pos(5, 0)].unit.id, "miya");
        // And a swap with a player-zone occupant does not change the count.
        b.move_unit(pos(0, 0), pos(5, 0));
        assert_eq!(b.board[&pos(5, 0)].unit.id, "floryn");
        assert_eq!(b.board[&pos(0, 0)].unit.id, "miya");
        assert_eq!(b.player_count(), 10);
    }

    #[test]
    fn blessing_follows_unit_through_moves_and_swaps() {
        let mut b = BoardState::default();
        b.place("miya", pos(3, 0));
        b.place("khufra", pos(3, 1));
        b.toggle_blessing(pos(3, 0), "Marksman");
        b.move_unit(pos(3, 0), pos(4, 4));
        assert_eq!(b.blessed_pos, Some(pos(4, 4)));
        assert!(b.board[&pos(4, 4)].is_blessed);
        // Swap the unblessed unit onto the blessed one's cell.
        b.move_unit(pos(3, 1), pos(4, 4));
        assert_eq!(b.blessed_pos, Some(pos(3, 1)));
        assert_eq!(b.board[&pos(3, 1)].unit.id, "miya");
        assert!(b.board[&pos(3, 1)].is_blessed);
        assert!(!b.board[&pos(4, 4)].is_blessed);
    }

    #[test]
    fn at_most_one_blessing_board_wide() {
        let mut b = BoardState::default();
        b.place("miya", pos(3, 0));
        b.place("khufra", pos(3, 1));
        b.toggle_blessing(pos(3, 0), "Marksman");
        b.toggle_blessing(pos(3, 1), "Defender");
        let blessed: Vec<_> = b.board.values().filter(|p| p.is_blessed).collect();
        assert_eq!(blessed.len(), 1);
        assert_eq!(b.blessed_pos, Some(pos(3, 1)));
        assert!(!b.board[&pos(3, 0)].is_blessed);
    }

    #[test]
    fn retoggling_same_trait_clears_the_blessing() {
        let mut b = BoardState::default();
        b.place("miya", pos(3, 0));
        b.toggle_blessing(pos(3, 0), "Marksman");
        b.toggle_blessing(pos(3, 0), "Marksman");
        assert_eq!(b.blessed_pos, None);
        assert!(!b.board[&pos(3, 0)].is_blessed);
        // A different trait on the same unit reassigns instead.
        b.toggle_blessing(pos(3, 0), "Heartbond");
        assert_eq!(b.board[&pos(3, 0)].blessed_trait, Some("Heartbond"));
    }

    #[test]
    fn blessing_requires_an_owned_trait() {
        let mut b = BoardState::default();
        b.place("miya", pos(3, 0));
        b.toggle_blessing(pos(3, 0), "Mage");
        assert_eq!(b.blessed_pos, None);
    }

    #[test]
    fn remove_clears_blessing_pointer() {
        let mut b = BoardState::default();
        b.place("miya", pos(3, 0));
        b.toggle_blessing(pos(3, 0), "Marksman");
        b.remove(pos(3, 0));
        assert!(b.board.is_empty());
        assert_eq!(b.blessed_pos, None);
    }

    #[test]
    fn league_slots_enforce_their_allow_lists() {
        let mut b = BoardState::default();
        b.set_league_slot(LeagueSlot::Small, Some("aurora"));
        assert_eq!(b.league_small.map(|u| u.id), Some("aurora"));
        // A 5-cost unit cannot occupy the small slot.
        b.set_league_slot(LeagueSlot::Small, Some("ruby"));
        assert_eq!(b.league_small.map(|u| u.id), Some("aurora"));
        b.set_league_slot(LeagueSlot::Large, Some("ruby"));
        assert_eq!(b.league_large.map(|u| u.id), Some("ruby"));
        b.set_league_slot(LeagueSlot::Small, None);
        assert_eq!(b.league_small, None);
    }

    #[test]
    fn clear_empties_board_but_keeps_league_slots() {
        let mut b = BoardState::default();
        b.place("miya", pos(3, 0));
        b.toggle_blessing(pos(3, 0), "Marksman");
        b.set_league_slot(LeagueSlot::Small, Some("aurora"));
        b.clear();
        assert!(b.board.is_empty());
        assert_eq!(b.blessed_pos, None);
        assert_eq!(b.league_small.map(|u| u.id), Some("aurora"));
        // Clearing an already-empty board only produces a notice.
        b.clear();
        assert!(b.feedback.as_deref().unwrap().contains("already empty"));
    }

    #[test]
    fn uniqueness_holds_across_operation_sequences() {
        let mut b = BoardState::default();
        b.place("miya", pos(3, 0));
        b.place("miya", pos(0, 0));
        b.move_unit(pos(3, 0), pos(4, 0));
        b.place("miya", pos(3, 0));
        let count = b.board.values().filter(|p| p.unit.id == "miya").count();
        assert_eq!(count, 1);
    }
}
