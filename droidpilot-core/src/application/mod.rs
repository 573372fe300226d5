//! # Application Module
//!
//! - [`agent`] - session state machine, planner and response extraction

pub mod agent;
