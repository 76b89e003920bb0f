//! Column set-difference

use rustc_hash::FxHashSet;

use crate::model::Value;

use super::{Side, ValueDiff};

/// Compare two columns as sets of values.
///
/// Values only in `old` come first, then values only in `new`; each
/// partition is sorted by [`Value`]'s ordering. Duplicates collapse, so only
/// membership matters.
pub fn column_diff(old: &[Value], new: &[Value]) -> Vec<ValueDiff> {
    let old_set: FxHashSet<&Value> = old.iter().collect();
    let new_set: FxHashSet<&Value> = new.iter().collect();

    let mut only_old: Vec<&Value> = old_set.difference(&new_set).copied().collect();
    let mut only_new: Vec<&Value> = new_set.difference(&old_set).copied().collect();
    only_old.sort_unstable();
    only_new.sort_unstable();

    only_old
        .into_iter()
        .map(|v| ValueDiff::new(v.clone(), Side::Old))
        .chain(only_new.into_iter().map(|v| ValueDiff::new(v.clone(), Side::New)))
        .collect()
}
