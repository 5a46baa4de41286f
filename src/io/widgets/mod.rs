//! The handful of UI widgets the game draws with. Each one is built through [`Screen`][super::Screen] methods and
//! does its actual writing when dropped.

mod horizontal;
mod textbox;

pub use self::{horizontal::Horizontal, textbox::Textbox};
