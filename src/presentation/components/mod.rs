mod details;
mod directory;
mod footer;
mod form;
mod popup;

pub(crate) use details::render_details;
pub(crate) use directory::render_directory;
pub(crate) use footer::{render_footer, render_message};
pub(crate) use form::render_form;
pub(crate) use popup::{render_list_popup, render_notice_popup};
