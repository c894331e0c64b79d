//! Bidirectional mapping between the board state and its two persistence
//! surfaces: the shareable URL query string and the local-storage snapshot.
//!
//! Encoding is lossy by design outside the player zone; the enemy preview
//! rows never round-trip. Decoding treats every field as hostile: positions
//! must parse in bounds, unit ids must exist in the catalog, blessing names
//! must canonicalize against the global trait whitelist, and league ids must
//! sit on their slot's allow-list. Invalid entries are skipped one by one so
//! a partially valid link still loads.

use crate::catalog::{self, Unit};
use crate::model::{BoardState, LeagueSlot, Position, Zone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The four query keys, values unescaped. Percent-encoding happens at the
/// browser boundary (`URLSearchParams`), never here.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct QueryParts {
    pub comp: Option<String>,
    pub blessed: Option<String>,
    pub gl1: Option<String>,
    pub gl5: Option<String>,
}

impl QueryParts {
    pub fn is_empty(&self) -> bool {
        self.comp.is_none() && self.blessed.is_none() && self.gl1.is_none() && self.gl5.is_none()
    }
}

/// A validated decode result, ready to replay into a fresh board. Occupancy
/// of the blessed cell is only known after replay, so the model re-checks it
/// there; everything else has already been whitelisted.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct DecodedState {
    pub placements: Vec<(Position, &'static Unit)>,
    pub blessing: Option<(Position, &'static str)>,
    pub league_small: Option<&'static Unit>,
    pub league_large: Option<&'static Unit>,
}

/// JSON shape of the local-storage autosave.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct Snapshot {
    /// `"{row}-{col}"` → unit id, player zone only.
    pub board: BTreeMap<String, String>,
    /// `("{row}-{col}", trait)` when a blessing is assigned in the player zone.
    pub blessed: Option<(String, String)>,
    pub gl1: Option<String>,
    pub gl5: Option<String>,
}

fn player_entries(state: &BoardState) -> impl Iterator<Item = (&Position, &'static Unit)> {
    state.player_units().map(|(pos, p)| (pos, p.unit))
}

/// The blessing as persisted: only while its holder stands in the player
/// zone (anything else would dangle after a decode).
fn persisted_blessing(state: &BoardState) -> Option<(Position, &'static str)> {
    let pos = state.blessed_pos?;
    if pos.zone() != Zone::Player {
        return None;
    }
    let placed = state.board.get(&pos)?;
    placed.blessed_trait.map(|t| (pos, t))
}

pub fn encode_query(state: &BoardState) -> QueryParts {
    let comp: Vec<String> = player_entries(state)
        .map(|(pos, unit)| format!("{}:{}", pos.key(), unit.id))
        .collect();
    QueryParts {
        comp: (!comp.is_empty()).then(|| comp.join(",")),
        blessed: persisted_blessing(state).map(|(pos, t)| format!("{}:{}", pos.key(), t)),
        gl1: state.league_small.map(|u| u.id.to_string()),
        gl5: state.league_large.map(|u| u.id.to_string()),
    }
}

fn decode_blessing(value: &str) -> Option<(Position, &'static str)> {
    let (pos_s, trait_s) = value.split_once(':')?;
    let pos = Position::parse(pos_s)?;
    let trait_name = catalog::canonical_trait(trait_s)?;
    Some((pos, trait_name))
}

fn decode_league(id: Option<&str>, slot: LeagueSlot) -> Option<&'static Unit> {
    let id = id?;
    if !slot.allow_list().contains(&id) {
        return None;
    }
    catalog::unit_by_id(id)
}

pub fn decode_query(parts: &QueryParts) -> DecodedState {
    let mut out = DecodedState::default();
    if let Some(comp) = &parts.comp {
        for entry in comp.split(',') {
            let Some((pos_s, id)) = entry.split_once(':') else {
                continue;
            };
            let Some(pos) = Position::parse(pos_s) else {
                continue;
            };
            let Some(unit) = catalog::unit_by_id(id) else {
                continue;
            };
            out.placements.push((pos, unit));
        }
    }
    out.blessing = parts.blessed.as_deref().and_then(decode_blessing);
    out.league_small = decode_league(parts.gl1.as_deref(), LeagueSlot::Small);
    out.league_large = decode_league(parts.gl5.as_deref(), LeagueSlot::Large);
    out
}

pub fn encode_snapshot(state: &BoardState) -> Snapshot {
    Snapshot {
        board: player_entries(state)
            .map(|(pos, unit)| (pos.key(), unit.id.to_string()))
            .collect(),
        blessed: persisted_blessing(state).map(|(pos, t)| (pos.key(), t.to_string())),
        gl1: state.league_small.map(|u| u.id.to_string()),
        gl5: state.league_large.map(|u| u.id.to_string()),
    }
}

pub fn snapshot_json(state: &BoardState) -> Option<String> {
    serde_json::to_string(&encode_snapshot(state)).ok()
}

/// Parses and validates a stored snapshot. A malformed JSON body is an
/// error (the caller discards the snapshot); individually invalid fields
/// inside a well-formed body are skipped like their URL counterparts.
pub fn decode_snapshot_json(json: &str) -> Result<DecodedState, serde_json::Error> {
    let snapshot: Snapshot = serde_json::from_str(json)?;
    let mut out = DecodedState::default();
    for (pos_s, id) in &snapshot.board {
        let Some(pos) = Position::parse(pos_s) else {
            continue;
        };
        let Some(unit) = catalog::unit_by_id(id) else {
            continue;
        };
        out.placements.push((pos, unit));
    }
    out.blessing = snapshot
        .blessed
        .as_ref()
        .and_then(|(pos_s, trait_s)| {
            let pos = Position::parse(pos_s)?;
            let trait_name = catalog::canonical_trait(trait_s)?;
            Some((pos, trait_name))
        });
    out.league_small = decode_league(snapshot.gl1.as_deref(), LeagueSlot::Small);
    out.league_large = decode_league(snapshot.gl5.as_deref(), LeagueSlot::Large);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RestoreSource;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    fn sample_state() -> BoardState {
        let mut b = BoardState::default();
        b.place("chou", pos(3, 0));
        b.place("miya", pos(4, 2));
        b.place("aurora", pos(3, 1));
        b.place("khufra", pos(0, 0)); // preview zone, must not persist
        b.toggle_blessing(pos(4, 2), "Marksman");
        b.set_league_slot(LeagueSlot::Small, Some("aurora"));
        b
    }

    #[test]
    fn encode_is_player_zone_only_and_row_major() {
        let parts = encode_query(&sample_state());
        assert_eq!(
            parts.comp.as_deref(),
            Some("3-0:chou,3-1:aurora,4-2:miya")
        );
        assert_eq!(parts.blessed.as_deref(), Some("4-2:Marksman"));
        assert_eq!(parts.gl1.as_deref(), Some("aurora"));
        assert_eq!(parts.gl5, None);
    }

    #[test]
    fn query_round_trip_reproduces_the_board() {
        let original = sample_state();
        let decoded = decode_query(&encode_query(&original));
        let mut restored = BoardState::default();
        restored.replay(&decoded, RestoreSource::Link);

        let original_player: Vec<_> = original
            .player_units()
            .map(|(p, u)| (*p, u.unit.id))
            .collect();
        let restored_player: Vec<_> = restored
            .player_units()
            .map(|(p, u)| (*p, u.unit.id))
            .collect();
        assert_eq!(original_player, restored_player);
        assert_eq!(restored.blessed_pos, Some(pos(4, 2)));
        assert_eq!(
            restored.board[&pos(4, 2)].blessed_trait,
            Some("Marksman")
        );
        assert_eq!(restored.league_small.map(|u| u.id), Some("aurora"));
        // The preview-zone unit is gone by design.
        assert!(!restored.unit_on_board("khufra"));
    }

    #[test]
    fn snapshot_round_trip_reproduces_the_board() {
        let original = sample_state();
        let json = snapshot_json(&original).unwrap();
        let decoded = decode_snapshot_json(&json).unwrap();
        let mut restored = BoardState::default();
        restored.replay(&decoded, RestoreSource::Draft);
        assert_eq!(restored.player_count(), original.player_count());
        assert_eq!(restored.blessed_pos, Some(pos(4, 2)));
        assert_eq!(restored.league_small.map(|u| u.id), Some("aurora"));
        assert!(restored.feedback.as_deref().unwrap().contains("restored"));
    }

    #[test]
    fn empty_board_encodes_to_nothing() {
        let parts = encode_query(&BoardState::default());
        assert!(parts.is_empty());
    }

    #[test]
    fn invalid_comp_entries_are_skipped_individually() {
        let parts = QueryParts {
            comp: Some("9-9:chou,3-0:not-a-unit,garbage,3-1:miya,3-1,".to_string()),
            ..Default::default()
        };
        let decoded = decode_query(&parts);
        assert_eq!(decoded.placements.len(), 1);
        assert_eq!(decoded.placements[0], (pos(3, 1), catalog::unit_by_id("miya").unwrap()));
    }

    #[test]
    fn tampered_blessing_trait_is_dropped() {
        let parts = QueryParts {
            comp: Some("3-0:miya".to_string()),
            blessed: Some("3-0:<img src=x onerror=alert(1)>".to_string()),
            ..Default::default()
        };
        let decoded = decode_query(&parts);
        assert_eq!(decoded.blessing, None);
        let mut b = BoardState::default();
        b.replay(&decoded, RestoreSource::Link);
        assert_eq!(b.blessed_pos, None);
    }

    #[test]
    fn blessing_on_an_empty_cell_is_dropped_at_replay() {
        let parts = QueryParts {
            comp: Some("3-0:miya".to_string()),
            blessed: Some("5-5:Marksman".to_string()),
            ..Default::default()
        };
        let mut b = BoardState::default();
        b.replay(&decode_query(&parts), RestoreSource::Link);
        assert_eq!(b.blessed_pos, None);
    }

    #[test]
    fn blessing_for_a_trait_the_occupant_lacks_is_dropped() {
        let parts = QueryParts {
            comp: Some("3-0:miya".to_string()),
            // A real catalog trait, but not one of Miya's.
            blessed: Some("3-0:Mage".to_string()),
            ..Default::default()
        };
        let mut b = BoardState::default();
        b.replay(&decode_query(&parts), RestoreSource::Link);
        assert_eq!(b.blessed_pos, None);
    }

    #[test]
    fn league_ids_outside_their_allow_list_are_ignored() {
        let parts = QueryParts {
            gl1: Some("ruby".to_string()),  // 5-cost unit in the 1-cost slot
            gl5: Some("ruby".to_string()),
            ..Default::default()
        };
        let decoded = decode_query(&parts);
        assert_eq!(decoded.league_small, None);
        assert_eq!(decoded.league_large.map(|u| u.id), Some("ruby"));
    }

    #[test]
    fn duplicate_comp_ids_keep_first_at_replay() {
        let parts = QueryParts {
            comp: Some("3-0:miya,3-1:miya".to_string()),
            ..Default::default()
        };
        let mut b = BoardState::default();
        b.replay(&decode_query(&parts), RestoreSource::Link);
        assert_eq!(b.board.len(), 1);
        assert_eq!(b.board[&pos(3, 0)].unit.id, "miya");
    }

    #[test]
    fn malformed_snapshot_json_is_an_error() {
        assert!(decode_snapshot_json("not json {{{").is_err());
        assert!(decode_snapshot_json("[1,2,3]").is_err());
    }

    #[test]
    fn snapshot_with_invalid_fields_still_loads_the_rest() {
        let json = r#"{
            "board": {"3-0": "miya", "8-0": "chou", "3-1": "bogus"},
            "blessed": ["3-0", "NotATrait"],
            "gl1": "aurora",
            "gl5": "aldous"
        }"#;
        let decoded = decode_snapshot_json(json).unwrap();
        assert_eq!(decoded.placements.len(), 1);
        assert_eq!(decoded.blessing, None);
        assert_eq!(decoded.league_small.map(|u| u.id), Some("aurora"));
        assert_eq!(decoded.league_large, None);
    }

    #[test]
    fn blessing_in_preview_zone_is_not_persisted() {
        let mut b = BoardState::default();
        b.place("miya", pos(3, 0));
        b.toggle_blessing(pos(3, 0), "Marksman");
        b.move_unit(pos(3, 0), pos(0, 0));
        let parts = encode_query(&b);
        assert_eq!(parts.blessed, None);
        assert!(encode_snapshot(&b).blessed.is_none());
    }
}
