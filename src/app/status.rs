#[derive(Debug, Clone)]
pub(crate) struct StatusLine {
    message: String,
}

pub(crate) const READY_STATUS: &str = "Ready.";

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: READY_STATUS.to_string(),
        }
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_raw(&mut self, msg: impl Into<String>) {
        self.message = msg.into();
    }

    pub fn ready(&mut self) {
        self.message = READY_STATUS.to_string();
    }

    pub fn saving(&mut self) {
        self.message = "Saving...".to_string();
    }

    pub fn saved(&mut self) {
        self.message = "Profile saved".to_string();
    }

    pub fn save_failed(&mut self, reason: &str) {
        self.message = format!("Failed to update user: {reason}");
    }

    pub fn fetch_failed(&mut self, reason: &str) {
        self.message = format!("Request failed: {reason}");
    }

    pub fn issues_remaining(&mut self, count: usize) {
        self.message = format!("{count} issue(s) remaining");
    }

    pub fn nothing_to_save(&mut self) {
        self.message = "No changes to save".to_string();
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
