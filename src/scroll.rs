//! Scroll-to-item restoration. Navigating back from a detail view carries
//! a return token; once the directory's data has loaded and a frame has
//! been drawn, the matching item is centered after a short settle delay so
//! the freshly-rendered surface has stable geometry first.

use std::time::{Duration, Instant};

/// Delay between the first post-load draw and the actual scroll.
pub const SETTLE_DELAY: Duration = Duration::from_millis(200);

/// A surface that can center one of its items. Grid and list are two
/// interchangeable implementations selected by the view-mode toggle.
pub trait ScrollableContent {
    /// Center the item with the given user id. Returns false when the id
    /// is not in the rendered set (filtered out), which is a no-op, not an
    /// error.
    fn scroll_to_user(&mut self, user_id: &str) -> bool;
}

/// Per-navigation state machine. Starts idle, becomes armed when a token
/// arrives (the data may still be loading at that point), and ends fired
/// once the scroll has run, staying terminal until a new token re-arms it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollRestore {
    Idle,
    Armed {
        user_id: String,
        deadline: Option<Instant>,
    },
    Fired,
}

impl Default for ScrollRestore {
    fn default() -> Self {
        ScrollRestore::Idle
    }
}

impl ScrollRestore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A back-navigation carried a return token. Re-arms from any state.
    pub fn arm(&mut self, user_id: impl Into<String>) {
        *self = ScrollRestore::Armed {
            user_id: user_id.into(),
            deadline: None,
        };
    }

    /// The consuming view went away; a pending target must never fire
    /// against a disposed surface, and view-mode switches do not replay it.
    pub fn cancel(&mut self) {
        *self = ScrollRestore::Idle;
    }

    pub fn is_armed(&self) -> bool {
        matches!(self, ScrollRestore::Armed { .. })
    }

    /// Call after a draw pass. While `loading` is true the machine stays
    /// armed with no deadline; the first settled draw starts the timer.
    pub fn note_painted(&mut self, loading: bool, now: Instant) {
        if let ScrollRestore::Armed { deadline, .. } = self {
            if loading {
                *deadline = None;
            } else if deadline.is_none() {
                *deadline = Some(now + SETTLE_DELAY);
            }
        }
    }

    /// Take the target once its settle deadline has passed. Transitions to
    /// fired exactly once per navigation instance.
    pub fn take_due(&mut self, now: Instant) -> Option<String> {
        let ScrollRestore::Armed {
            user_id,
            deadline: Some(deadline),
        } = self
        else {
            return None;
        };
        if now < *deadline {
            return None;
        }
        let target = std::mem::take(user_id);
        *self = ScrollRestore::Fired;
        Some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn does_not_fire_while_loading() {
        let mut restore = ScrollRestore::new();
        restore.arm("u42");
        let now = Instant::now();
        restore.note_painted(true, now);
        assert_eq!(restore.take_due(now + SETTLE_DELAY * 10), None);
        assert!(restore.is_armed());
    }

    #[test]
    fn fires_once_after_the_settle_delay() {
        let mut restore = ScrollRestore::new();
        restore.arm("u42");
        let now = Instant::now();
        restore.note_painted(false, now);
        assert_eq!(restore.take_due(now), None);
        assert_eq!(restore.take_due(now + SETTLE_DELAY), Some("u42".to_string()));
        assert_eq!(restore.take_due(now + SETTLE_DELAY * 2), None);
        assert_eq!(restore, ScrollRestore::Fired);
    }

    #[test]
    fn loading_resets_a_started_deadline() {
        let mut restore = ScrollRestore::new();
        restore.arm("u7");
        let now = Instant::now();
        restore.note_painted(false, now);
        restore.note_painted(true, now + Duration::from_millis(50));
        assert_eq!(restore.take_due(now + SETTLE_DELAY), None);
    }

    #[test]
    fn new_token_rearms_after_firing() {
        let mut restore = ScrollRestore::new();
        restore.arm("a");
        let now = Instant::now();
        restore.note_painted(false, now);
        restore.take_due(now + SETTLE_DELAY);
        restore.arm("b");
        assert!(restore.is_armed());
    }

    #[test]
    fn cancel_discards_a_pending_target() {
        let mut restore = ScrollRestore::new();
        restore.arm("u42");
        let now = Instant::now();
        restore.note_painted(false, now);
        restore.cancel();
        assert_eq!(restore.take_due(now + SETTLE_DELAY), None);
        assert_eq!(restore, ScrollRestore::Idle);
    }
}
