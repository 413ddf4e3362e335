//! Single-select expand/collapse state

/// At most one expanded identifier per list instance.
///
/// Keyed by entity id, never by row position, so replacing the backing page
/// can never expand the wrong entity through a stale index. Not persisted
/// across remounts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    expanded: Option<String>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapses `id` if it is the expanded entry, otherwise expands it,
    /// replacing any other expansion.
    pub fn toggle(&mut self, id: &str) {
        if self.expanded.as_deref() == Some(id) {
            self.expanded = None;
        } else {
            self.expanded = Some(id.to_owned());
        }
    }

    /// Returns the expanded identifier, if any.
    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    /// Returns `true` if `id` is the expanded entry.
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.as_deref() == Some(id)
    }

    /// Collapses any expansion.
    pub fn clear(&mut self) {
        self.expanded = None;
    }

    /// Silently drops the expansion when its id is absent from `ids`.
    ///
    /// Called after the backing rows are replaced wholesale; a vanished id is
    /// an empty selection, not an error.
    pub fn retain_within<'a>(&mut self, mut ids: impl Iterator<Item = &'a str>) {
        if let Some(expanded) = self.expanded.as_deref()
            && !ids.any(|id| id == expanded)
        {
            self.expanded = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_pair_restores_state() {
        let mut selection = Selection::new();
        selection.toggle("42");
        assert!(selection.is_expanded("42"));
        selection.toggle("42");
        assert_eq!(selection.expanded(), None);
    }

    #[test]
    fn test_toggle_replaces_expansion() {
        let mut selection = Selection::new();
        selection.toggle("42");
        selection.toggle("7");
        assert!(selection.is_expanded("7"));
        assert!(!selection.is_expanded("42"));
    }

    #[test]
    fn test_retain_clears_vanished_id() {
        let mut selection = Selection::new();
        selection.toggle("42");
        selection.retain_within(["7", "8"].into_iter());
        assert_eq!(selection.expanded(), None);
    }

    #[test]
    fn test_retain_keeps_present_id() {
        let mut selection = Selection::new();
        selection.toggle("42");
        selection.retain_within(["41", "42", "43"].into_iter());
        assert!(selection.is_expanded("42"));
    }

    #[test]
    fn test_retain_on_empty_selection() {
        let mut selection = Selection::new();
        selection.retain_within([].into_iter());
        assert_eq!(selection.expanded(), None);
    }
}
