mod components;
mod view;

pub(crate) use view::{
    BodyView, DirectoryContent, DirectoryView, FormView, PopupRender, UiContext, draw,
};
