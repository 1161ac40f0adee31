use userdir::domain::{Address, Company, User};
use userdir::fields::{self, FieldId};
use userdir::form::{
    DraftPayload, FileDraftStore, FormStore, MemoryDraftStore, SubmitDecision, decide_submit,
    derive, draft_key, field_error,
};

fn sample_user(id: &str) -> User {
    User {
        id: id.to_string(),
        first_name: "Olivia".to_string(),
        last_name: "Johnson".to_string(),
        age: 34,
        email: "olivia@example.com".to_string(),
        phone: "+1 555-0142".to_string(),
        image: "https://example.com/olivia.jpg".to_string(),
        university: "University of Texas".to_string(),
        gender: Some("Female".to_string()),
        birth_date: Some("1991-04-02".to_string()),
        blood_group: Some("O-".to_string()),
        height: Some(168.0),
        weight: Some(61.0),
        eye_color: Some("Green".to_string()),
        address: Address {
            city: "Fort Worth".to_string(),
            state: "Texas".to_string(),
            state_code: "TX".to_string(),
            country: Some("United States".to_string()),
        },
        company: Company {
            department: "Engineering".to_string(),
            name: "Acme".to_string(),
            title: "Staff Engineer".to_string(),
        },
    }
}

fn draft_for(user: &User) -> DraftPayload {
    DraftPayload {
        user_id: Some(user.id.clone()),
        fields_info: fields::fields_from_user(user),
        should_show_more_details: true,
    }
}

#[test]
fn fresh_session_starts_with_defaults() {
    let store = FormStore::open("default", "u1", Box::new(MemoryDraftStore::new()));
    assert_eq!(store.user_id(), None);
    assert!(!store.has_editing_history());
    assert!(!store.show_more_details());
    assert_eq!(store.value_of(FieldId::FirstName), "");
}

#[test]
fn matching_draft_is_restored_with_history() {
    let user = sample_user("u1");
    let mut payload = draft_for(&user);
    payload
        .fields_info
        .insert(FieldId::FirstName, "Liv".to_string());
    let seeded = MemoryDraftStore::new().seed(&draft_key("default"), payload);

    let store = FormStore::open("default", "u1", Box::new(seeded));
    assert!(store.has_editing_history());
    assert_eq!(store.user_id(), Some("u1"));
    assert_eq!(store.value_of(FieldId::FirstName), "Liv");
    assert!(store.show_more_details());
}

#[test]
fn another_users_draft_is_ignored() {
    let user = sample_user("u1");
    let seeded = MemoryDraftStore::new().seed(&draft_key("default"), draft_for(&user));

    let mut store = FormStore::open("default", "u2", Box::new(seeded));
    assert!(!store.has_editing_history());
    assert_eq!(store.user_id(), None);
    assert_eq!(store.value_of(FieldId::FirstName), "");

    // Loading the new target populates the session from the record.
    let mut other = sample_user("u2");
    other.first_name = "Mara".to_string();
    store.on_user_loaded(&other);
    assert_eq!(store.user_id(), Some("u2"));
    assert_eq!(store.value_of(FieldId::FirstName), "Mara");
}

#[test]
fn restored_draft_survives_a_record_reload() {
    let user = sample_user("u1");
    let mut payload = draft_for(&user);
    payload
        .fields_info
        .insert(FieldId::Email, "liv@example.com".to_string());
    let seeded = MemoryDraftStore::new().seed(&draft_key("default"), payload);

    let mut store = FormStore::open("default", "u1", Box::new(seeded));
    store.on_user_loaded(&user);
    store.on_user_loaded(&user);
    assert_eq!(store.value_of(FieldId::Email), "liv@example.com");
}

#[test]
fn record_load_populates_a_fresh_session() {
    let user = sample_user("u1");
    let mut store = FormStore::open("default", "u1", Box::new(MemoryDraftStore::new()));
    store.on_user_loaded(&user);
    assert_eq!(store.user_id(), Some("u1"));
    assert_eq!(store.value_of(FieldId::FirstName), "Olivia");
    assert_eq!(store.value_of(FieldId::Height), "168");
    assert!(!store.has_editing_history());
}

#[test]
fn drafts_persist_across_sessions_on_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let user = sample_user("u1");

    {
        let mut store = FormStore::open(
            "default",
            "u1",
            Box::new(FileDraftStore::new(dir.path())),
        );
        store.on_user_loaded(&user);
        store.on_field_changed(FieldId::FirstName, "Liv");
        store.on_toggle_more_details();
    }

    let store = FormStore::open(
        "default",
        "u1",
        Box::new(FileDraftStore::new(dir.path())),
    );
    assert!(store.has_editing_history());
    assert_eq!(store.value_of(FieldId::FirstName), "Liv");
    assert!(store.show_more_details());
}

#[test]
fn scopes_do_not_share_drafts() {
    let dir = tempfile::tempdir().expect("temp dir");
    let user = sample_user("u1");

    let mut store = FormStore::open("left", "u1", Box::new(FileDraftStore::new(dir.path())));
    store.on_user_loaded(&user);
    store.on_field_changed(FieldId::FirstName, "Liv");
    drop(store);

    let store = FormStore::open("right", "u1", Box::new(FileDraftStore::new(dir.path())));
    assert!(!store.has_editing_history());
    assert_eq!(store.value_of(FieldId::FirstName), "");
}

#[test]
fn corrupt_draft_reads_as_absent() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(format!("{}.json", draft_key("default")));
    std::fs::write(&path, "{ not json").expect("write corrupt draft");

    let store = FormStore::open("default", "u1", Box::new(FileDraftStore::new(dir.path())));
    assert!(!store.has_editing_history());
    assert_eq!(store.value_of(FieldId::FirstName), "");
}

#[test]
fn loaded_record_is_not_dirty() {
    let user = sample_user("u1");
    let mut store = FormStore::open("default", "u1", Box::new(MemoryDraftStore::new()));
    store.on_user_loaded(&user);

    let derived = derive(store.values(), &user, false);
    assert!(derived.is_complete);
    assert!(!derived.has_errors);
    assert!(!derived.is_dirty);
    assert!(!derived.can_submit);
}

#[test]
fn a_valid_edit_enables_submission() {
    let user = sample_user("u1");
    let mut store = FormStore::open("default", "u1", Box::new(MemoryDraftStore::new()));
    store.on_user_loaded(&user);
    store.on_field_changed(FieldId::FirstName, "Liv");

    let derived = derive(store.values(), &user, false);
    assert!(derived.is_dirty);
    assert!(derived.can_submit);
}

#[test]
fn each_validation_failure_blocks_submission() {
    let user = sample_user("u1");
    let broken = [
        (FieldId::FirstName, ""),
        (FieldId::Age, "121"),
        (FieldId::Age, "-3"),
        (FieldId::Email, "not-an-email"),
        (FieldId::Image, "ftp://example.com/x.jpg"),
        (FieldId::City, "   "),
    ];

    for (id, value) in broken {
        let mut store = FormStore::open("default", "u1", Box::new(MemoryDraftStore::new()));
        store.on_user_loaded(&user);
        store.on_field_changed(id, value);

        let derived = derive(store.values(), &user, false);
        assert!(derived.is_dirty, "{id:?} should dirty the form");
        assert!(
            field_error(store.values(), id).is_some(),
            "{id:?}={value:?} should carry an error"
        );
        assert!(derived.has_errors);
        assert!(!derived.can_submit, "{id:?}={value:?} should block submit");
    }
}

#[test]
fn saving_blocks_submission() {
    let user = sample_user("u1");
    let mut store = FormStore::open("default", "u1", Box::new(MemoryDraftStore::new()));
    store.on_user_loaded(&user);
    store.on_field_changed(FieldId::FirstName, "Liv");

    let derived = derive(store.values(), &user, true);
    assert!(derived.is_saving);
    assert!(!derived.can_submit);
}

#[test]
fn blocked_save_requests_produce_no_patch() {
    let user = sample_user("u1");

    // Validation failure.
    let mut store = FormStore::open("default", "u1", Box::new(MemoryDraftStore::new()));
    store.on_user_loaded(&user);
    store.on_field_changed(FieldId::Email, "not-an-email");
    assert_eq!(
        decide_submit(store.values(), &user, false),
        SubmitDecision::Invalid { issues: 1 }
    );

    // Nothing changed.
    let mut store = FormStore::open("default", "u1", Box::new(MemoryDraftStore::new()));
    store.on_user_loaded(&user);
    assert_eq!(
        decide_submit(store.values(), &user, false),
        SubmitDecision::Unchanged
    );

    // A save is already in flight.
    let mut store = FormStore::open("default", "u1", Box::new(MemoryDraftStore::new()));
    store.on_user_loaded(&user);
    store.on_field_changed(FieldId::FirstName, "Liv");
    assert_eq!(
        decide_submit(store.values(), &user, true),
        SubmitDecision::Busy
    );
}

#[test]
fn submittable_edit_carries_its_patch() {
    let user = sample_user("u1");
    let mut store = FormStore::open("default", "u1", Box::new(MemoryDraftStore::new()));
    store.on_user_loaded(&user);
    store.on_field_changed(FieldId::FirstName, "Liv");

    let SubmitDecision::Send(patch) = decide_submit(store.values(), &user, false) else {
        panic!("a valid dirty form should submit");
    };
    assert_eq!(patch.first_name.as_deref(), Some("Liv"));
    assert_eq!(patch.age, Some(34));
}

#[test]
fn reverting_an_edit_clears_dirty() {
    let user = sample_user("u1");
    let mut store = FormStore::open("default", "u1", Box::new(MemoryDraftStore::new()));
    store.on_user_loaded(&user);
    store.on_field_changed(FieldId::FirstName, "Liv");
    store.on_field_changed(FieldId::FirstName, "Olivia");

    let derived = derive(store.values(), &user, false);
    assert!(!derived.is_dirty);
    assert!(!derived.can_submit);
}
