use crate::fields::{self, FieldId, UiControl};

/// Modal interactions layered over the current screen.
pub(crate) enum AppPopup {
    /// Option picker for an enumerated field.
    Select(SelectPopup),
    /// Unsaved-changes barrier before leaving the form.
    ConfirmDiscard { user_id: String },
    /// Blocking save-failure notice; dismissing it still leaves the form.
    SaveFailed { user_id: String, message: String },
}

pub(crate) struct SelectPopup {
    pub field: FieldId,
    pub title: String,
    pub options: Vec<String>,
    pub selected: usize,
}

impl SelectPopup {
    /// Build the picker for a field, if it is an enumerated one.
    pub fn from_field(field: FieldId, current: &str) -> Option<Self> {
        let descriptor = fields::descriptor(field);
        let UiControl::Select { options } = descriptor.control else {
            return None;
        };
        let options: Vec<String> = options.iter().map(|s| s.to_string()).collect();
        let selected = options
            .iter()
            .position(|option| option == current)
            .unwrap_or(0);
        Some(Self {
            field,
            title: descriptor.label.to_string(),
            options,
            selected,
        })
    }

    pub fn select_previous(&mut self) {
        if self.options.is_empty() {
            return;
        }
        if self.selected == 0 {
            self.selected = self.options.len().saturating_sub(1);
        } else {
            self.selected -= 1;
        }
    }

    pub fn select_next(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.options.len();
    }

    pub fn selection(&self) -> Option<&str> {
        self.options.get(self.selected).map(String::as_str)
    }
}
