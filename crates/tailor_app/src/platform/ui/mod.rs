//! Plain-text renderers for the terminal front-end. Each takes view-model
//! data and returns the text to print; nothing here touches state.
mod dashboard;
mod editor;
mod login;
pub mod render;
mod uploader;
