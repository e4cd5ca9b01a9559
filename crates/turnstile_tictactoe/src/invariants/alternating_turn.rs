//! Alternating turn invariant: the marks alternate, starting with `first`.

use super::super::GameRecord;
use super::Invariant;

/// Invariant: players alternate turns.
///
/// The first move belongs to the record's starting mark, consecutive moves
/// never share a mark, and the turn marker names the next mover while the
/// game runs (the last mover once it has ended).
pub struct AlternatingTurnInvariant;

impl Invariant<GameRecord> for AlternatingTurnInvariant {
    fn holds(record: &GameRecord) -> bool {
        let history = record.history();

        let Some(last) = history.last() else {
            return record.turn() == record.first();
        };

        if history[0].mark != record.first() {
            return false;
        }

        if history.windows(2).any(|pair| pair[0].mark == pair[1].mark) {
            return false;
        }

        if record.is_over() {
            record.turn() == last.mark
        } else {
            record.turn() == last.mark.opponent()
        }
    }

    fn description() -> &'static str {
        "Players alternate turns starting with the first mover"
    }
}
