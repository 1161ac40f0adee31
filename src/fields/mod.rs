//! Static registry of the editable profile fields: how each one is read
//! from a user record, written onto a partial update, validated, and
//! presented. The `FieldId` enum is closed, so every `match` over it is
//! checked for exhaustiveness at compile time.

use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{User, UserPatch};

/// Maps each identifier to its current string value, in canonical
/// display order.
pub type FieldValues = IndexMap<FieldId, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    FirstName,
    LastName,
    Age,
    Email,
    Gender,
    City,
    State,
    Country,
    Image,
    BirthDate,
    BloodGroup,
    Height,
    Weight,
    EyeColor,
}

impl FieldId {
    /// Canonical order: the main group followed by the additional group.
    pub const ALL: [FieldId; 14] = [
        FieldId::FirstName,
        FieldId::LastName,
        FieldId::Age,
        FieldId::Email,
        FieldId::Gender,
        FieldId::City,
        FieldId::State,
        FieldId::Country,
        FieldId::Image,
        FieldId::BirthDate,
        FieldId::BloodGroup,
        FieldId::Height,
        FieldId::Weight,
        FieldId::EyeColor,
    ];
}

/// Fields shown unconditionally.
pub const MAIN_FIELDS: [FieldId; 9] = [
    FieldId::FirstName,
    FieldId::LastName,
    FieldId::Age,
    FieldId::Email,
    FieldId::Gender,
    FieldId::City,
    FieldId::State,
    FieldId::Country,
    FieldId::Image,
];

/// Fields shown only when the "additional details" section is expanded.
pub const ADDITIONAL_FIELDS: [FieldId; 5] = [
    FieldId::BirthDate,
    FieldId::BloodGroup,
    FieldId::Height,
    FieldId::Weight,
    FieldId::EyeColor,
];

/// Hint for the rendering layer; carries no behavior of its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiControl {
    Text { placeholder: &'static str },
    Number { min: u32, max: u32 },
    Email { placeholder: &'static str },
    Date,
    UrlWithPreview { placeholder: &'static str },
    Select { options: &'static [&'static str] },
}

pub struct FieldDescriptor {
    pub id: FieldId,
    pub label: &'static str,
    pub required: bool,
    pub control: UiControl,
    pub get: fn(&User) -> String,
    pub apply: fn(&mut UserPatch, &str),
    pub validate: fn(&str) -> Option<String>,
}

pub fn descriptor(id: FieldId) -> &'static FieldDescriptor {
    &DESCRIPTORS[id as usize]
}

/// Extract every field's display value from a loaded record. Absent
/// optionals and numeric fields render as what they print; missing values
/// become the empty string.
pub fn fields_from_user(user: &User) -> FieldValues {
    FieldId::ALL
        .iter()
        .map(|&id| (id, (descriptor(id).get)(user)))
        .collect()
}

/// Every field at its default (empty) value.
pub fn default_values() -> FieldValues {
    FieldId::ALL
        .iter()
        .map(|&id| (id, String::new()))
        .collect()
}

/// Fold every field's patch applier over an empty patch. Numeric fields
/// parse base-10 integers; values that fail to parse are simply not
/// written (submission is gated on validation upstream).
pub fn patch_from_values(values: &FieldValues) -> UserPatch {
    let mut patch = UserPatch::default();
    for &id in &FieldId::ALL {
        (descriptor(id).apply)(&mut patch, value_of(values, id));
    }
    patch
}

/// Current value for a field, defaulting to empty when unset.
pub fn value_of(values: &FieldValues, id: FieldId) -> &str {
    values.get(&id).map(String::as_str).unwrap_or("")
}

const MAX_TEXT_LEN: usize = 80;

const BLOOD_GROUPS: [&str; 8] = ["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

static DESCRIPTORS: [FieldDescriptor; 14] = [
    FieldDescriptor {
        id: FieldId::FirstName,
        label: "First Name",
        required: true,
        control: UiControl::Text {
            placeholder: "Olivia",
        },
        get: |user| user.first_name.clone(),
        apply: |patch, value| patch.first_name = Some(value.to_string()),
        validate: |value| required_text(value, "First name"),
    },
    FieldDescriptor {
        id: FieldId::LastName,
        label: "Last Name",
        required: false,
        control: UiControl::Text {
            placeholder: "Johnson",
        },
        get: |user| user.last_name.clone(),
        apply: |patch, value| patch.last_name = Some(value.to_string()),
        validate: |value| over_length(value, "Last name"),
    },
    FieldDescriptor {
        id: FieldId::Age,
        label: "Age",
        required: true,
        control: UiControl::Number { min: 0, max: 120 },
        get: |user| user.age.to_string(),
        apply: |patch, value| {
            if let Ok(age) = value.trim().parse::<u32>() {
                patch.age = Some(age);
            }
        },
        validate: validate_age,
    },
    FieldDescriptor {
        id: FieldId::Email,
        label: "Email",
        required: true,
        control: UiControl::Email {
            placeholder: "olivia@example.com",
        },
        get: |user| user.email.clone(),
        apply: |patch, value| patch.email = Some(value.to_string()),
        validate: validate_email,
    },
    FieldDescriptor {
        id: FieldId::Gender,
        label: "Gender",
        required: true,
        control: UiControl::Text {
            placeholder: "Female",
        },
        get: |user| user.gender.clone().unwrap_or_default(),
        apply: |patch, value| patch.gender = Some(value.to_string()),
        validate: |value| required_text(value, "Gender"),
    },
    FieldDescriptor {
        id: FieldId::City,
        label: "City",
        required: true,
        control: UiControl::Text {
            placeholder: "Fort Worth",
        },
        get: |user| user.address.city.clone(),
        apply: |patch, value| patch.address_mut().city = Some(value.to_string()),
        validate: |value| required_text(value, "City"),
    },
    FieldDescriptor {
        id: FieldId::State,
        label: "State",
        required: true,
        control: UiControl::Text {
            placeholder: "Texas",
        },
        get: |user| user.address.state.clone(),
        apply: |patch, value| patch.address_mut().state = Some(value.to_string()),
        validate: |value| required_text(value, "State"),
    },
    FieldDescriptor {
        id: FieldId::Country,
        label: "Country",
        required: true,
        control: UiControl::Text {
            placeholder: "United States",
        },
        get: |user| user.address.country.clone().unwrap_or_default(),
        apply: |patch, value| patch.address_mut().country = Some(value.to_string()),
        validate: |value| required_text(value, "Country"),
    },
    FieldDescriptor {
        id: FieldId::Image,
        label: "Profile Image URL",
        required: true,
        control: UiControl::UrlWithPreview {
            placeholder: "https://example.com/image.jpg",
        },
        get: |user| user.image.clone(),
        apply: |patch, value| patch.image = Some(value.to_string()),
        validate: validate_image_url,
    },
    FieldDescriptor {
        id: FieldId::BirthDate,
        label: "Birth Date",
        required: false,
        control: UiControl::Date,
        get: |user| user.birth_date.clone().unwrap_or_default(),
        apply: |patch, value| patch.birth_date = Some(value.to_string()),
        validate: |_| None,
    },
    FieldDescriptor {
        id: FieldId::BloodGroup,
        label: "Blood Group",
        required: false,
        control: UiControl::Select {
            options: &BLOOD_GROUPS,
        },
        get: |user| user.blood_group.clone().unwrap_or_default(),
        apply: |patch, value| patch.blood_group = Some(value.to_string()),
        validate: |_| None,
    },
    FieldDescriptor {
        id: FieldId::Height,
        label: "Height (cm)",
        required: false,
        control: UiControl::Number { min: 0, max: 300 },
        get: |user| user.height.map(|height| height.to_string()).unwrap_or_default(),
        apply: |patch, value| {
            if let Ok(height) = value.trim().parse::<u32>() {
                patch.height = Some(height);
            }
        },
        validate: |_| None,
    },
    FieldDescriptor {
        id: FieldId::Weight,
        label: "Weight (kg)",
        required: false,
        control: UiControl::Number { min: 0, max: 500 },
        get: |user| user.weight.map(|weight| weight.to_string()).unwrap_or_default(),
        apply: |patch, value| {
            if let Ok(weight) = value.trim().parse::<u32>() {
                patch.weight = Some(weight);
            }
        },
        validate: |_| None,
    },
    FieldDescriptor {
        id: FieldId::EyeColor,
        label: "Eye Color",
        required: false,
        control: UiControl::Text {
            placeholder: "Brown",
        },
        get: |user| user.eye_color.clone().unwrap_or_default(),
        apply: |patch, value| patch.eye_color = Some(value.to_string()),
        validate: |_| None,
    },
];

fn required_text(value: &str, label: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some(format!("{label} is required"));
    }
    over_length(value, label)
}

fn over_length(value: &str, label: &str) -> Option<String> {
    if value.chars().count() > MAX_TEXT_LEN {
        return Some(format!("{label} must be less than 80 characters"));
    }
    None
}

fn validate_age(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some("Age is required".to_string());
    }
    match value.trim().parse::<i64>() {
        Ok(age) if (0..=120).contains(&age) => None,
        _ => Some("Age must be between 0 and 120".to_string()),
    }
}

fn validate_email(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some("Email is required".to_string());
    }
    if !email_pattern().is_match(value) {
        return Some("Please enter a valid email".to_string());
    }
    None
}

fn validate_image_url(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some("Profile image URL is required".to_string());
    }
    match Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => None,
        Ok(_) => Some("Profile image must be a valid URL (http/https)".to_string()),
        Err(_) => Some("Profile image must be a valid URL".to_string()),
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptors_are_indexed_by_identifier() {
        for (index, &id) in FieldId::ALL.iter().enumerate() {
            assert_eq!(DESCRIPTORS[index].id, id);
            assert_eq!(descriptor(id).id, id);
        }
    }

    #[test]
    fn display_groups_cover_all_identifiers_exactly_once() {
        let mut covered: Vec<FieldId> = MAIN_FIELDS
            .iter()
            .chain(ADDITIONAL_FIELDS.iter())
            .copied()
            .collect();
        covered.sort_by_key(|&id| id as usize);
        let mut all = FieldId::ALL.to_vec();
        all.sort_by_key(|&id| id as usize);
        assert_eq!(covered, all);
    }

    #[test]
    fn optional_fields_are_always_valid() {
        for id in [FieldId::BirthDate, FieldId::Height, FieldId::Weight, FieldId::EyeColor] {
            assert_eq!((descriptor(id).validate)(""), None);
            assert_eq!((descriptor(id).validate)("anything"), None);
        }
    }

    #[test]
    fn fractional_height_is_not_written_to_the_patch() {
        let mut values = default_values();
        values.insert(FieldId::Height, "180.5".to_string());
        let patch = patch_from_values(&values);
        assert_eq!(patch.height, None);
    }
}
