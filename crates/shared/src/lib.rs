//! Domain and wire types shared by the planner client crates.

pub mod domain;
pub mod protocol;
