use std::collections::BTreeSet;
use tally_api::endpoints::Id;

/// Multi-select over table rows, keyed by record id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<Id>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.ids.contains(id)
    }

    pub fn toggle(&mut self, id: &Id) {
        if !self.ids.remove(id) {
            self.ids.insert(id.clone());
        }
    }

    pub fn remove(&mut self, id: &Id) {
        self.ids.remove(id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// True only when `visible` is non-empty and every id in it is selected.
    pub fn all_selected<'a>(&self, visible: impl IntoIterator<Item = &'a Id>) -> bool {
        let mut any = false;
        for id in visible {
            any = true;
            if !self.ids.contains(id) {
                return false;
            }
        }
        any
    }

    /// Select every visible id, or deselect exactly those ids when they are
    /// all selected already.
    pub fn toggle_all<'a>(&mut self, visible: impl IntoIterator<Item = &'a Id> + Clone) {
        if self.all_selected(visible.clone()) {
            for id in visible {
                self.ids.remove(id);
            }
        } else {
            self.ids.extend(visible.into_iter().cloned());
        }
    }

    /// Drop ids that are no longer present.
    pub fn retain_present<'a>(&mut self, present: impl IntoIterator<Item = &'a Id>) {
        let present: BTreeSet<&Id> = present.into_iter().collect();
        self.ids.retain(|id| present.contains(id));
    }

    pub fn ids(&self) -> Vec<Id> {
        self.ids.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<Id> {
        values.iter().map(|v| Id::new(*v)).collect()
    }

    #[test]
    fn test_select_all_reflects_visible_set() {
        let visible = ids(&["1", "2", "3"]);
        let mut selection = Selection::default();
        assert!(!selection.all_selected(&visible));

        selection.toggle(&visible[0]);
        selection.toggle(&visible[1]);
        assert!(!selection.all_selected(&visible));

        selection.toggle(&visible[2]);
        assert!(selection.all_selected(&visible));
        assert!(!selection.all_selected(&Vec::<Id>::new()));
    }

    #[test]
    fn test_toggle_all_only_touches_visible_ids() {
        let visible = ids(&["1", "2"]);
        let mut selection = Selection::default();
        selection.toggle(&Id::new("9"));

        selection.toggle_all(&visible);
        assert_eq!(selection.len(), 3);

        selection.toggle_all(&visible);
        assert_eq!(selection.ids(), ids(&["9"]));
    }

    #[test]
    fn test_retain_present() {
        let mut selection = Selection::default();
        selection.toggle_all(&ids(&["1", "2", "3"]));
        selection.retain_present(&ids(&["2", "3", "4"]));
        assert_eq!(selection.ids(), ids(&["2", "3"]));
    }
}
