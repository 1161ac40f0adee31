mod nav;
mod options;
mod popup;
mod runtime;
mod status;
mod surfaces;
mod terminal;

pub use nav::Route;
pub use options::UiOptions;
pub use runtime::UserDirectoryUi;

pub(crate) use popup::{AppPopup, SelectPopup};
pub(crate) use surfaces::{GridSurface, ListSurface, ViewMode};
