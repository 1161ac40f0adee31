use crate::domain::{User, UserPatch};
use crate::fields::{self, FieldId, FieldValues};

/// Submission-readiness flags, recomputed from scratch on every pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Derived {
    /// Every required field has a non-empty trimmed value.
    pub is_complete: bool,
    /// At least one field validator fired.
    pub has_errors: bool,
    /// Field values deep-differ from a fresh extraction of the record.
    pub is_dirty: bool,
    pub is_saving: bool,
    pub can_submit: bool,
}

pub fn derive(values: &FieldValues, loaded: &User, is_saving: bool) -> Derived {
    let is_complete = FieldId::ALL.iter().all(|&id| {
        let descriptor = fields::descriptor(id);
        !descriptor.required || !fields::value_of(values, id).trim().is_empty()
    });
    let has_errors = FieldId::ALL
        .iter()
        .any(|&id| field_error(values, id).is_some());
    let is_dirty = *values != fields::fields_from_user(loaded);

    Derived {
        is_complete,
        has_errors,
        is_dirty,
        is_saving,
        can_submit: is_complete && !has_errors && !is_saving && is_dirty,
    }
}

/// Validation message for one field's current value, if any.
pub fn field_error(values: &FieldValues, id: FieldId) -> Option<String> {
    (fields::descriptor(id).validate)(fields::value_of(values, id))
}

/// What a save request should do. Only `Send` carries a patch, so a
/// request that cannot be submitted never reaches the network layer; the
/// other variants tell the caller what feedback to show instead.
#[derive(Debug, PartialEq)]
pub enum SubmitDecision {
    Send(UserPatch),
    Invalid { issues: usize },
    Unchanged,
    Incomplete,
    Busy,
}

pub fn decide_submit(values: &FieldValues, loaded: &User, is_saving: bool) -> SubmitDecision {
    let derived = derive(values, loaded, is_saving);
    if derived.can_submit {
        return SubmitDecision::Send(fields::patch_from_values(values));
    }
    if derived.has_errors {
        let issues = FieldId::ALL
            .iter()
            .filter(|&&id| field_error(values, id).is_some())
            .count();
        SubmitDecision::Invalid { issues }
    } else if is_saving {
        SubmitDecision::Busy
    } else if !derived.is_dirty {
        SubmitDecision::Unchanged
    } else {
        SubmitDecision::Incomplete
    }
}
