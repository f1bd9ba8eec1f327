use crate::ops::selection::Selection;

/// Which of the two display modes is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// All tasks
    List,
    /// The selected task
    Detail(u64),
}

impl ViewMode {
    /// Derived from the selection alone; there is no other view state
    pub fn of(selection: &Selection) -> Self {
        match selection.id() {
            Some(id) => ViewMode::Detail(id),
            None => ViewMode::List,
        }
    }

    pub fn is_detail(self) -> bool {
        matches!(self, ViewMode::Detail(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_selection_is_list() {
        assert_eq!(ViewMode::of(&Selection::none()), ViewMode::List);
        assert!(!ViewMode::List.is_detail());
    }

    #[test]
    fn selection_is_detail() {
        let mut sel = Selection::none();
        sel.select(4);
        assert_eq!(ViewMode::of(&sel), ViewMode::Detail(4));
        assert!(ViewMode::of(&sel).is_detail());
    }
}
