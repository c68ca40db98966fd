use tracing::trace;

use super::roll::RollSet;
use crate::parse::{KeepKind, Selection};

impl Selection {
    /// Keeps the first or last `amount` values of an ascending slice.
    /// Keeping more values than there are keeps all of them.
    fn apply<'a>(&self, rolls: &'a [u32]) -> &'a [u32] {
        let amount = (self.amount as usize).min(rolls.len());

        match self.kind {
            KeepKind::Lowest => &rolls[..amount],
            KeepKind::Highest => &rolls[rolls.len() - amount..],
        }
    }
}

/// Applies each selection, in order, to what the previous one kept.
pub fn apply_selections(rolls: &RollSet, selections: &[Selection]) -> RollSet {
    let kept = selections
        .iter()
        .fold(rolls.values(), |kept, selection| {
            let next = selection.apply(kept);
            trace!(%selection, before = kept.len(), after = next.len(), "applied selection");
            next
        });

    // Slicing from either end keeps the values in ascending order
    RollSet {
        values: kept.to_vec(),
    }
}
