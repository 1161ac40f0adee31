mod derive;
mod draft;
mod store;

pub use derive::{Derived, SubmitDecision, decide_submit, derive, field_error};
pub use draft::{DraftPayload, DraftStore, FileDraftStore, MemoryDraftStore, draft_key};
pub use store::FormStore;
