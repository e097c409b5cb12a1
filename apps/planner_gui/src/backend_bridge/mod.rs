//! Bridge between the UI thread and the backend worker that owns the planner.

pub mod commands;
pub mod runtime;
