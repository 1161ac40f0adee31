#![deny(rust_2018_idioms)]

mod app;
pub mod domain;
pub mod fetch;
pub mod fields;
pub mod form;
mod presentation;
pub mod scroll;

pub use app::{Route, UiOptions, UserDirectoryUi};

pub mod prelude {
    pub use super::{Route, UiOptions, UserDirectoryUi};
}
