//! Pure synergy evaluation: turns the player-zone composition plus the two
//! league-slot selections into a ranked trait report. Re-run after every
//! board mutation; never errors, an empty board just yields an empty report.

use crate::catalog;
use crate::model::BoardState;
use serde::Serialize;
use std::collections::BTreeMap;

/// Distinct active traits needed to unlock the season bonus.
const MEOW_BONUS_THRESHOLD: usize = 9;

/// One row of the synergy report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraitEntry {
    pub name: &'static str,
    /// Literal tally of trait occurrences (plus blessing and league bonus).
    pub raw_count: u32,
    /// Raw count rounded down to the nearest even number; the value tier
    /// gating works on. The rival trait mirrors its raw count instead.
    pub active_count: u32,
    /// Largest activation tier reached, 0 when none.
    pub active_tier: u32,
    /// Smallest tier strictly above the raw count, for progress display.
    pub next_threshold: u32,
    pub is_active: bool,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct SynergyReport {
    /// Sorted by active count descending, raw count breaking ties.
    pub entries: Vec<TraitEntry>,
    /// Number of distinct active traits.
    pub active_traits: usize,
    /// Mystic Meow season bonus, unlocked at nine active synergies.
    pub meow_bonus: bool,
    /// Player-zone occupant count (not deduplicated).
    pub unit_count: usize,
    /// Summed gold cost of the player-zone occupants.
    pub total_cost: u32,
}

impl SynergyReport {
    /// Human-readable active-synergy line, e.g. `"K.O.F x4, Bruiser x2"`.
    pub fn summary(&self) -> String {
        let parts: Vec<String> = self
            .entries
            .iter()
            .filter(|e| e.is_active)
            .map(|e| format!("{} x{}", e.name, e.active_count))
            .collect();
        parts.join(", ")
    }
}

/// Read-only export of the current lineup for the surrounding page's
/// share-to-community feature; the network call lives outside this crate.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineupSnapshot {
    pub units: Vec<&'static str>,
    pub synergies: String,
}

/// The rival rule: exactly one of the pair present activates; both present
/// only activates once the gate trait's raw count reaches the gate.
fn rival_active(first_present: bool, second_present: bool, gate_count: u32) -> bool {
    match (first_present, second_present) {
        (true, false) | (false, true) => true,
        (true, true) => gate_count >= catalog::RIVAL_GATE_COUNT,
        (false, false) => false,
    }
}

fn resolve_tiers(name: &'static str, raw: u32) -> TraitEntry {
    let thr = catalog::thresholds(name);
    if name == catalog::RIVAL_TRAIT {
        // Activation is decided by the pair rule, filled in by the caller.
        return TraitEntry {
            name,
            raw_count: raw,
            active_count: raw,
            active_tier: if raw >= 1 { 1 } else { 0 },
            next_threshold: 2,
            is_active: false,
        };
    }
    let active_count = raw / 2 * 2;
    let active_tier = thr
        .iter()
        .rev()
        .find(|t| **t <= active_count)
        .copied()
        .unwrap_or(0);
    let next_threshold = thr
        .iter()
        .find(|t| **t > raw)
        .or(thr.last())
        .copied()
        .unwrap_or(0);
    TraitEntry {
        name,
        raw_count: raw,
        active_count,
        active_tier,
        next_threshold,
        is_active: active_count >= 2,
    }
}

pub fn evaluate(state: &BoardState) -> SynergyReport {
    let player: Vec<_> = state.player_units().map(|(_, p)| p).collect();

    // Defensive dedup by unit id; placement already guarantees uniqueness,
    // but only the first occurrence may count.
    let mut seen: Vec<&str> = Vec::new();
    let mut unique = Vec::new();
    for placed in &player {
        if !seen.contains(&placed.unit.id) {
            seen.push(placed.unit.id);
            unique.push(*placed);
        }
    }

    let mut tallies: BTreeMap<&'static str, u32> = BTreeMap::new();
    for placed in &unique {
        for t in placed.unit.traits {
            *tallies.entry(t).or_insert(0) += 1;
        }
        // Blessing is one extra point on top of the point the unit already
        // contributes by owning the trait.
        if placed.is_blessed {
            if let Some(t) = placed.blessed_trait {
                *tallies.entry(t).or_insert(0) += 1;
            }
        }
    }

    // League slots only score while their unit actually stands in the
    // player zone.
    for selection in [state.league_small, state.league_large] {
        let present = selection
            .is_some_and(|sel| unique.iter().any(|p| p.unit.id == sel.id));
        if present {
            *tallies.entry(catalog::LEAGUE_TRAIT).or_insert(0) += 1;
        }
    }

    let [first, second] = catalog::RIVAL_PAIR;
    let first_present = unique.iter().any(|p| p.unit.id == first);
    let second_present = unique.iter().any(|p| p.unit.id == second);
    let gate_count = tallies
        .get(catalog::RIVAL_GATE_TRAIT)
        .copied()
        .unwrap_or(0);
    let rival_on = rival_active(first_present, second_present, gate_count);

    let mut entries: Vec<TraitEntry> = tallies
        .into_iter()
        .map(|(name, raw)| {
            let mut entry = resolve_tiers(name, raw);
            if name == catalog::RIVAL_TRAIT {
                entry.is_active = rival_on;
            }
            entry
        })
        .collect();
    entries.sort_by(|a, b| {
        b.active_count
            .cmp(&a.active_count)
            .then(b.raw_count.cmp(&a.raw_count))
    });

    let active_traits = entries.iter().filter(|e| e.is_active).count();
    SynergyReport {
        active_traits,
        meow_bonus: active_traits >= MEOW_BONUS_THRESHOLD,
        unit_count: player.len(),
        total_cost: state.total_cost(),
        entries,
    }
}

/// Builds the shareable snapshot: deduplicated player-zone unit ids plus the
/// active-synergy summary line.
pub fn lineup_snapshot(state: &BoardState) -> LineupSnapshot {
    let report = evaluate(state);
    let mut units: Vec<&'static str> = Vec::new();
    for (_, placed) in state.player_units() {
        if !units.contains(&placed.unit.id) {
            units.push(placed.unit.id);
        }
    }
    let summary = report.summary();
    LineupSnapshot {
        units,
        synergies: if summary.is_empty() {
            "None yet".to_string()
        } else {
            summary
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoardState, PlacedUnit, Position};

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    fn entry<'a>(report: &'a SynergyReport, name: &str) -> &'a TraitEntry {
        report
            .entries
            .iter()
            .find(|e| e.name == name)
            .unwrap_or_else(|| panic!("no entry for {name}"))
    }

    #[test]
    fn empty_board_yields_empty_report() {
        let report = evaluate(&BoardState::default());
        assert!(report.entries.is_empty());
        assert_eq!(report.active_traits, 0);
        assert!(!report.meow_bonus);
        assert_eq!(report.summary(), "");
    }

    #[test]
    fn two_bruisers_activate_the_trait() {
        let mut b = BoardState::default();
        b.place("masha", pos(3, 0));
        b.place("jawhead", pos(3, 1));
        let report = evaluate(&b);
        let e = entry(&report, "Bruiser");
        assert_eq!(e.raw_count, 2);
        assert_eq!(e.active_count, 2);
        assert!(e.is_active);
        assert_eq!(e.active_tier, 2);
    }

    #[test]
    fn odd_counts_round_down() {
        let mut b = BoardState::default();
        b.place("masha", pos(3, 0));
        b.place("jawhead", pos(3, 1));
        b.place("aldous", pos(3, 2));
        let e_report = evaluate(&b);
        let e = entry(&e_report, "Bruiser");
        assert_eq!(e.raw_count, 3);
        assert_eq!(e.active_count, 2);
        assert_eq!(e.active_tier, 2);
        assert_eq!(e.next_threshold, 4);
    }

    #[test]
    fn enemy_zone_units_do_not_score() {
        let mut b = BoardState::default();
        b.place("masha", pos(0, 0));
        b.place("jawhead", pos(1, 1));
        assert!(evaluate(&b).entries.is_empty());
    }

    #[test]
    fn blessing_adds_one_raw_point() {
        let mut b = BoardState::default();
        b.place("masha", pos(3, 0));
        b.toggle_blessing(pos(3, 0), "Bruiser");
        let report = evaluate(&b);
        let e = entry(&report, "Bruiser");
        assert_eq!(e.raw_count, 2);
        assert_eq!(e.active_count, 2);
        assert!(e.is_active);
    }

    #[test]
    fn league_slot_scores_only_when_unit_is_fielded() {
        let mut b = BoardState::default();
        b.set_league_slot(crate::model::LeagueSlot::Small, Some("aurora"));
        assert!(evaluate(&b).entries.iter().all(|e| e.name != "Glory League"));
        b.place("aurora", pos(3, 0));
        let report = evaluate(&b);
        assert_eq!(entry(&report, "Glory League").raw_count, 1);
        // Parked in the enemy preview zone it stops counting.
        b.move_unit(pos(3, 0), pos(0, 0));
        assert!(evaluate(&b).entries.iter().all(|e| e.name != "Glory League"));
    }

    #[test]
    fn both_league_slots_stack() {
        let mut b = BoardState::default();
        b.place("aurora", pos(3, 0));
        b.place("ruby", pos(3, 1));
        b.set_league_slot(crate::model::LeagueSlot::Small, Some("aurora"));
        b.set_league_slot(crate::model::LeagueSlot::Large, Some("ruby"));
        let report = evaluate(&b);
        let e = entry(&report, "Glory League");
        assert_eq!(e.raw_count, 2);
        assert!(e.is_active);
    }

    #[test]
    fn rival_rule_is_an_exclusive_or() {
        assert!(rival_active(true, false, 0));
        assert!(rival_active(false, true, 0));
        assert!(!rival_active(false, false, 0));
        assert!(!rival_active(true, true, 10));
        assert!(rival_active(true, true, 11));
    }

    #[test]
    fn lone_rival_activates_through_evaluate() {
        let mut b = BoardState::default();
        b.place("chou", pos(3, 0));
        let report = evaluate(&b);
        let e = entry(&report, "Mortal Rival");
        assert!(e.is_active);
        assert_eq!(e.raw_count, 1);
        assert_eq!(e.active_count, 1);
        assert_eq!(e.active_tier, 1);
    }

    #[test]
    fn rival_pair_together_misses_the_gate() {
        let mut b = BoardState::default();
        b.place("chou", pos(3, 0));
        b.place("valir", pos(3, 1));
        let report = evaluate(&b);
        // Only seven K.O.F units exist, so the gate of eleven stays shut.
        assert!(!entry(&report, "Mortal Rival").is_active);
        assert_eq!(entry(&report, "K.O.F").raw_count, 2);
    }

    #[test]
    fn tier_resolution_walks_the_ladder() {
        let mut b = BoardState::default();
        for (i, id) in ["chou", "paquito", "dyrroth", "aurora", "gusion", "karina"]
            .iter()
            .enumerate()
        {
            b.place(id, pos(3, i as u8));
        }
        let report = evaluate(&b);
        let e = entry(&report, "K.O.F");
        assert_eq!(e.raw_count, 6);
        assert_eq!(e.active_count, 6);
        assert_eq!(e.active_tier, 6);
        assert_eq!(e.next_threshold, 8);
    }

    #[test]
    fn report_sorts_by_active_then_raw() {
        let mut b = BoardState::default();
        // Two Marksman + three K.O.F: K.O.F active at 2 with raw 3 wins the tie.
        b.place("miya", pos(3, 0));
        b.place("granger", pos(3, 1));
        b.place("chou", pos(3, 2));
        b.place("paquito", pos(3, 3));
        b.place("dyrroth", pos(3, 4));
        let report = evaluate(&b);
        assert_eq!(report.entries[0].name, "K.O.F");
        let marksman_idx = report.entries.iter().position(|e| e.name == "Marksman");
        let kof_idx = report.entries.iter().position(|e| e.name == "K.O.F");
        assert!(kof_idx < marksman_idx);
    }

    #[test]
    fn duplicate_ids_count_once() {
        let mut b = BoardState::default();
        b.place("masha", pos(3, 0));
        // Force a duplicate past the placement guard.
        let clone = b.board[&pos(3, 0)];
        let _ = b.board.insert(pos(3, 1), PlacedUnit { ..clone });
        let report = evaluate(&b);
        assert_eq!(entry(&report, "Bruiser").raw_count, 1);
        assert_eq!(report.unit_count, 2);
    }

    #[test]
    fn header_stats_count_cost() {
        let mut b = BoardState::default();
        b.place("chou", pos(3, 0));
        b.place("miya", pos(3, 1));
        b.place("aurora", pos(0, 0));
        let report = evaluate(&b);
        assert_eq!(report.unit_count, 2);
        assert_eq!(report.total_cost, 8);
    }

    #[test]
    fn active_counts_stay_even_and_tiers_stay_on_the_ladder() {
        let mut b = BoardState::default();
        let ids = [
            "chou", "paquito", "dyrroth", "aurora", "gusion", "karina", "masha", "jawhead",
            "aldous", "gatotkaca",
        ];
        for (i, id) in ids.iter().enumerate() {
            b.place(id, pos(3 + (i / 7) as u8, (i % 7) as u8));
        }
        b.toggle_blessing(pos(3, 0), "Bruiser");
        let report = evaluate(&b);
        for e in &report.entries {
            assert!(e.active_count <= e.raw_count, "{}", e.name);
            if e.name != catalog::RIVAL_TRAIT {
                assert_eq!(e.active_count % 2, 0, "{}", e.name);
                assert!(
                    e.active_tier == 0 || catalog::thresholds(e.name).contains(&e.active_tier),
                    "{}",
                    e.name
                );
            }
        }
    }

    #[test]
    fn summary_lists_active_synergies() {
        let mut b = BoardState::default();
        b.place("masha", pos(3, 0));
        b.place("jawhead", pos(3, 1));
        b.place("chou", pos(3, 2));
        let report = evaluate(&b);
        assert!(report.summary().contains("Bruiser x2"));
        assert!(report.summary().contains("Mortal Rival x1"));
    }

    #[test]
    fn snapshot_carries_ids_and_summary() {
        let mut b = BoardState::default();
        b.place("masha", pos(3, 0));
        b.place("jawhead", pos(3, 1));
        let snap = lineup_snapshot(&b);
        assert_eq!(snap.units, vec!["masha", "jawhead"]);
        assert!(snap.synergies.contains("Bruiser x2"));
        let empty = lineup_snapshot(&BoardState::default());
        assert_eq!(empty.synergies, "None yet");
    }
}
