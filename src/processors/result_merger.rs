use crate::models::StationMap;
use std::collections::hash_map::Entry;

/// Folds per-chunk station maps into one.
///
/// The fold is commutative and associative, so the merged statistics do not
/// depend on how many chunks there were or in which order they finished.
pub struct ResultMerger;

impl ResultMerger {
    pub fn new() -> Self {
        Self
    }

    pub fn merge<I>(&self, partials: I) -> StationMap
    where
        I: IntoIterator<Item = StationMap>,
    {
        let mut merged = StationMap::new();
        for partial in partials {
            self.merge_into(&mut merged, partial);
        }
        merged
    }

    /// Merge a single partial map into an accumulator
    pub fn merge_into(&self, merged: &mut StationMap, partial: StationMap) {
        for (station, stats) in partial {
            match merged.entry(station) {
                Entry::Occupied(mut entry) => entry.get_mut().merge(&stats),
                Entry::Vacant(entry) => {
                    entry.insert(stats);
                }
            }
        }
    }
}

impl Default for ResultMerger {
    fn default() -> Self {
        Self::new()
    }
}
