//! Which note (if any) is on screen and whether it is being edited

/// Navigation state of the note pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavState {
    /// Nothing selected
    #[default]
    Empty,
    /// Viewing a saved note
    View(i64),
    /// Editing an existing note, or a new one when the id is `None`
    Edit(Option<i64>),
}

impl NavState {
    pub fn is_editing(&self) -> bool {
        matches!(self, NavState::Edit(_))
    }

    /// Id of the note this state refers to, if it has one
    pub fn note_id(&self) -> Option<i64> {
        match self {
            NavState::Empty => None,
            NavState::View(id) => Some(*id),
            NavState::Edit(id) => *id,
        }
    }

    /// State after leaving the editor
    pub fn leave_edit(self) -> NavState {
        match self {
            NavState::Edit(Some(id)) => NavState::View(id),
            NavState::Edit(None) => NavState::Empty,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leave_edit() {
        assert_eq!(NavState::Edit(Some(4)).leave_edit(), NavState::View(4));
        assert_eq!(NavState::Edit(None).leave_edit(), NavState::Empty);
        assert_eq!(NavState::View(2).leave_edit(), NavState::View(2));
    }

    #[test]
    fn test_note_id() {
        assert_eq!(NavState::Empty.note_id(), None);
        assert_eq!(NavState::View(7).note_id(), Some(7));
        assert_eq!(NavState::Edit(None).note_id(), None);
        assert!(NavState::Edit(Some(1)).is_editing());
        assert!(!NavState::View(1).is_editing());
    }
}
