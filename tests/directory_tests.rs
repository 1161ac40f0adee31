use std::time::Instant;

use userdir::domain::{Address, Company, User, filter_users_by_name};
use userdir::scroll::{SETTLE_DELAY, ScrollRestore, ScrollableContent};

fn named_user(id: &str, first: &str, last: &str) -> User {
    User {
        id: id.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        age: 30,
        email: format!("{}@example.com", first.to_lowercase()),
        phone: "+1 555-0100".to_string(),
        image: "https://example.com/p.jpg".to_string(),
        university: "State University".to_string(),
        gender: None,
        birth_date: None,
        blood_group: None,
        height: None,
        weight: None,
        eye_color: None,
        address: Address {
            city: "Austin".to_string(),
            state: "Texas".to_string(),
            state_code: "TX".to_string(),
            country: None,
        },
        company: Company {
            department: "Support".to_string(),
            name: "Acme".to_string(),
            title: "Agent".to_string(),
        },
    }
}

#[test]
fn search_matches_name_prefixes_case_insensitively() {
    let users = vec![
        named_user("1", "John", "Smith"),
        named_user("2", "Jolene", "Parker"),
        named_user("3", "Mark", "Johnson"),
        named_user("4", "Mark", "Lee"),
    ];

    let hits = filter_users_by_name(&users, "jo");
    let ids: Vec<&str> = hits.iter().map(|user| user.id.as_str()).collect();
    // John and Jolene by first name, Mark Johnson by last name.
    assert_eq!(ids, vec!["1", "2", "3"]);

    let hits = filter_users_by_name(&users, "mark l");
    let ids: Vec<&str> = hits.iter().map(|user| user.id.as_str()).collect();
    assert_eq!(ids, vec!["4"]);
}

#[test]
fn blank_search_matches_everyone() {
    let users = vec![
        named_user("1", "John", "Smith"),
        named_user("2", "Jolene", "Parker"),
    ];
    assert_eq!(filter_users_by_name(&users, "").len(), 2);
    assert_eq!(filter_users_by_name(&users, "   ").len(), 2);
}

#[test]
fn mid_name_substrings_do_not_match() {
    let users = vec![named_user("1", "John", "Smith")];
    assert!(filter_users_by_name(&users, "ohn").is_empty());
    assert!(filter_users_by_name(&users, "mit").is_empty());
}

/// Records every centering request instead of moving a viewport.
#[derive(Default)]
struct RecordingSurface {
    known: Vec<String>,
    centered: Vec<String>,
}

impl ScrollableContent for RecordingSurface {
    fn scroll_to_user(&mut self, user_id: &str) -> bool {
        if !self.known.iter().any(|id| id == user_id) {
            return false;
        }
        self.centered.push(user_id.to_string());
        true
    }
}

#[test]
fn return_token_scrolls_exactly_once_after_load() {
    let mut surface = RecordingSurface {
        known: vec!["u41".to_string(), "u42".to_string()],
        ..RecordingSurface::default()
    };
    let mut restore = ScrollRestore::new();
    let now = Instant::now();

    restore.arm("u42");

    // Draw passes while the directory is still loading: nothing may fire,
    // no matter how much time passes.
    restore.note_painted(true, now);
    assert_eq!(restore.take_due(now + SETTLE_DELAY * 5), None);

    // First settled draw starts the timer; the scroll lands one settle
    // delay later and only once.
    let loaded_at = now + SETTLE_DELAY * 5;
    restore.note_painted(false, loaded_at);
    assert_eq!(restore.take_due(loaded_at), None);

    if let Some(target) = restore.take_due(loaded_at + SETTLE_DELAY) {
        assert!(surface.scroll_to_user(&target));
    }
    assert_eq!(restore.take_due(loaded_at + SETTLE_DELAY * 2), None);
    assert_eq!(surface.centered, vec!["u42".to_string()]);
}

#[test]
fn filtered_out_target_is_a_silent_noop() {
    let mut surface = RecordingSurface {
        known: vec!["u1".to_string()],
        ..RecordingSurface::default()
    };
    let mut restore = ScrollRestore::new();
    let now = Instant::now();

    restore.arm("u42");
    restore.note_painted(false, now);
    let target = restore.take_due(now + SETTLE_DELAY).expect("due target");
    assert!(!surface.scroll_to_user(&target));
    assert!(surface.centered.is_empty());
}
