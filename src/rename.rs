//! Inline schedule-name editing

use crate::api::UNTITLED;

/// Longest name the field accepts, in characters
pub const MAX_NAME_CHARS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    Editing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameEvent {
    Focus,
    Change(String),
    Blur,
    /// Enter submits the same way leaving the field does
    Enter,
}

/// Emitted on every submit, even when the name did not change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRequest {
    pub schedule_id: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct RenameControl {
    schedule_id: String,
    title: String,
    state: EditState,
}

impl RenameControl {
    /// Start idle, showing `name` as given; see [`Schedule::editable_name`]
    ///
    /// [`Schedule::editable_name`]: crate::api::Schedule::editable_name
    pub fn new(schedule_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schedule_id: schedule_id.into(),
            title: name.into(),
            state: EditState::Idle,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn is_editing(&self) -> bool {
        self.state == EditState::Editing
    }

    pub fn handle(&mut self, event: RenameEvent) -> Option<RenameRequest> {
        match (self.state, event) {
            (_, RenameEvent::Focus) => {
                self.state = EditState::Editing;
                None
            }
            (EditState::Editing, RenameEvent::Change(draft)) => {
                self.title = draft.chars().take(MAX_NAME_CHARS).collect();
                None
            }
            (EditState::Editing, RenameEvent::Blur | RenameEvent::Enter) => Some(self.submit()),
            // Nothing to submit or edit without focus
            (EditState::Idle, _) => None,
        }
    }

    fn submit(&mut self) -> RenameRequest {
        // Only an empty name falls back; whitespace is a name like any other
        if self.title.is_empty() {
            self.title = UNTITLED.to_string();
        }
        self.state = EditState::Idle;
        RenameRequest {
            schedule_id: self.schedule_id.clone(),
            name: self.title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Schedule;

    fn editing(name: &str) -> RenameControl {
        let mut control = RenameControl::new("5d5a", name);
        assert_eq!(control.handle(RenameEvent::Focus), None);
        control
    }

    #[test]
    fn test_starts_idle_with_name() {
        let control = RenameControl::new("5d5a", "Semester 5");
        assert_eq!(control.state(), EditState::Idle);
        assert_eq!(control.title(), "Semester 5");
    }

    #[test]
    fn test_unnamed_schedule_reads_untitled() {
        let schedule: Schedule = serde_json::from_str(r#"{"id": "5d5a", "name": null}"#).unwrap();
        let control = RenameControl::new(schedule.id.clone(), schedule.editable_name());
        assert_eq!(control.title(), "Untitled");
    }

    #[test]
    fn test_focus_then_change_updates_draft() {
        let mut control = editing("Semester 5");
        assert!(control.is_editing());
        assert_eq!(control.handle(RenameEvent::Change("Genap".to_string())), None);
        assert_eq!(control.title(), "Genap");
        assert!(control.is_editing());
    }

    #[test]
    fn test_blur_submits_and_returns_to_idle() {
        let mut control = editing("Semester 5");
        control.handle(RenameEvent::Change("Genap".to_string()));
        let request = control.handle(RenameEvent::Blur);
        assert_eq!(
            request,
            Some(RenameRequest {
                schedule_id: "5d5a".to_string(),
                name: "Genap".to_string(),
            })
        );
        assert_eq!(control.state(), EditState::Idle);
    }

    #[test]
    fn test_enter_submits_unchanged_name() {
        let mut control = editing("Semester 5");
        let request = control.handle(RenameEvent::Enter).unwrap();
        assert_eq!(request.name, "Semester 5");
        assert!(!control.is_editing());
    }

    #[test]
    fn test_empty_draft_becomes_untitled() {
        let mut control = editing("Semester 5");
        control.handle(RenameEvent::Change(String::new()));
        let request = control.handle(RenameEvent::Blur).unwrap();
        assert_eq!(request.name, "Untitled");
        assert_eq!(control.title(), "Untitled");
    }

    #[test]
    fn test_whitespace_draft_is_kept() {
        let mut control = editing("Semester 5");
        control.handle(RenameEvent::Change("  ".to_string()));
        let request = control.handle(RenameEvent::Blur).unwrap();
        assert_eq!(request.name, "  ");
    }

    #[test]
    fn test_draft_is_capped() {
        let mut control = editing("");
        control.handle(RenameEvent::Change("Jadwal kuliah semester lima".to_string()));
        assert_eq!(control.title().chars().count(), MAX_NAME_CHARS);
        assert_eq!(control.title(), "Jadwal kuliah semest");
    }

    #[test]
    fn test_idle_ignores_changes_and_blur() {
        let mut control = RenameControl::new("5d5a", "Semester 5");
        assert_eq!(control.handle(RenameEvent::Change("x".to_string())), None);
        assert_eq!(control.handle(RenameEvent::Blur), None);
        assert_eq!(control.handle(RenameEvent::Enter), None);
        assert_eq!(control.title(), "Semester 5");
    }
}
