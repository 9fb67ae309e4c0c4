//! Server-rendered HTML for the record pages.

mod layout;
mod pages;
mod projects;
mod tasks;

pub use pages::{render_page, EntityView, Labels};
