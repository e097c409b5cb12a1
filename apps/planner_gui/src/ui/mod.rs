//! UI layer for the planner window: app shell and display-tree widgets.

pub mod app;
pub mod widgets;

pub use app::PlannerApp;
