//! Controller layer: UI events and translation of triggers into backend commands.

pub mod events;
pub mod orchestration;
