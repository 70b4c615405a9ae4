//! UI layer for the directory: app shell, filter panel, and practitioner cards.

pub mod app;
pub mod cards;

pub use app::DirectoryApp;
