//! Controller layer: UI events, directory state, and command orchestration.

pub mod events;
pub mod orchestration;
pub mod state;
