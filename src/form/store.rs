use crate::domain::User;
use crate::fields::{self, FieldId, FieldValues};

use super::draft::{DraftPayload, DraftStore, draft_key};

/// Single source of truth for one in-progress edit session, scoped by the
/// target user identity and a caller-supplied persistence-scope token.
///
/// Every mutation writes the draft back to the store on the same turn, so
/// the session survives navigation and restarts. A restored draft marks
/// `has_editing_history`, which in turn stops a later record load from
/// clobbering local edits.
pub struct FormStore {
    key: String,
    draft_store: Box<dyn DraftStore>,
    user_id: Option<String>,
    values: FieldValues,
    show_more_details: bool,
    has_editing_history: bool,
}

impl FormStore {
    /// Open the edit session for `target_user_id` in the given persistence
    /// scope. A stored draft is restored only when it belongs to the same
    /// user; anything else (a different user's draft, a corrupt payload,
    /// an unavailable store) starts fresh.
    pub fn open(scope: &str, target_user_id: &str, draft_store: Box<dyn DraftStore>) -> Self {
        let key = draft_key(scope);
        let restored = draft_store
            .load(&key)
            .filter(|payload| payload.user_id.as_deref() == Some(target_user_id));

        match restored {
            Some(payload) => Self {
                key,
                draft_store,
                user_id: payload.user_id,
                values: payload.fields_info,
                show_more_details: payload.should_show_more_details,
                has_editing_history: true,
            },
            None => Self {
                key,
                draft_store,
                user_id: None,
                values: fields::default_values(),
                show_more_details: false,
                has_editing_history: false,
            },
        }
    }

    /// Merge a freshly-loaded record into the session. A no-op when the
    /// session already carries unsaved history for this exact user, so a
    /// cache refresh cannot clobber in-progress edits.
    pub fn on_user_loaded(&mut self, user: &User) {
        if self.has_editing_history && self.user_id.as_deref() == Some(user.id.as_str()) {
            return;
        }
        self.user_id = Some(user.id.clone());
        self.values = fields::fields_from_user(user);
        self.persist();
    }

    /// Set exactly one field's value.
    pub fn on_field_changed(&mut self, id: FieldId, value: impl Into<String>) {
        self.values.insert(id, value.into());
        self.persist();
    }

    pub fn on_toggle_more_details(&mut self) {
        self.show_more_details = !self.show_more_details;
        self.persist();
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn value_of(&self, id: FieldId) -> &str {
        fields::value_of(&self.values, id)
    }

    pub fn show_more_details(&self) -> bool {
        self.show_more_details
    }

    pub fn has_editing_history(&self) -> bool {
        self.has_editing_history
    }

    fn persist(&self) {
        let payload = DraftPayload {
            user_id: self.user_id.clone(),
            fields_info: self.values.clone(),
            should_show_more_details: self.show_more_details,
        };
        self.draft_store.save(&self.key, &payload);
    }
}
