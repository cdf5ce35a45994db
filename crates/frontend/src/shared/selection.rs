//! Bulk-selection bookkeeping shared by list pages.
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxState {
    Unchecked,
    Checked,
    Indeterminate,
}

/// Header checkbox state for the visible rows.
pub fn header_state<'a>(
    ids: impl IntoIterator<Item = &'a str>,
    selected: &HashSet<String>,
) -> CheckboxState {
    let (total, picked) = ids.into_iter().fold((0usize, 0usize), |(t, p), id| {
        (t + 1, p + usize::from(selected.contains(id)))
    });
    if total == 0 || picked == 0 {
        CheckboxState::Unchecked
    } else if picked == total {
        CheckboxState::Checked
    } else {
        CheckboxState::Indeterminate
    }
}

pub fn toggle(selected: &mut HashSet<String>, id: &str, checked: bool) {
    if checked {
        selected.insert(id.to_string());
    } else {
        selected.remove(id);
    }
}

pub fn set_all<'a>(
    selected: &mut HashSet<String>,
    ids: impl IntoIterator<Item = &'a str>,
    checked: bool,
) {
    for id in ids {
        toggle(selected, id, checked);
    }
}

/// Drops ids whose rows are gone after a reload.
pub fn retain_existing<'a>(selected: &mut HashSet<String>, ids: impl IntoIterator<Item = &'a str>) {
    let present: HashSet<&str> = ids.into_iter().collect();
    selected.retain(|id| present.contains(id.as_str()));
}

/// Selected ids in row order, for bulk requests.
pub fn selected_in_order<'a>(
    ids: impl IntoIterator<Item = &'a str>,
    selected: &HashSet<String>,
) -> Vec<String> {
    ids.into_iter()
        .filter(|id| selected.contains(*id))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_state() {
        let ids = ["a", "b", "c"];
        let mut selected = HashSet::new();
        assert_eq!(header_state(ids, &selected), CheckboxState::Unchecked);
        toggle(&mut selected, "b", true);
        assert_eq!(header_state(ids, &selected), CheckboxState::Indeterminate);
        set_all(&mut selected, ids, true);
        assert_eq!(header_state(ids, &selected), CheckboxState::Checked);
        assert_eq!(header_state([], &selected), CheckboxState::Unchecked);
    }

    #[test]
    fn test_retain_and_order() {
        let mut selected: HashSet<String> = ["x", "a", "c"].iter().map(|s| s.to_string()).collect();
        retain_existing(&mut selected, ["a", "b", "c"]);
        assert!(!selected.contains("x"));
        assert_eq!(selected_in_order(["c", "b", "a"], &selected), vec!["c", "a"]);
        set_all(&mut selected, ["a", "c"], false);
        assert!(selected.is_empty());
    }
}
