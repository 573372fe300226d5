//! # Agent Module
//!
//! Drives one goal at a time against the tool server, with a language model
//! choosing each step.
//!
//! ## Key Types
//!
//! - [`AgentLoopController`] - accepts goals and spawns one session task each
//! - [`SessionHandle`] - event stream, cancellation and final outcome of a session
//! - [`Planner`] - asks the model for the next [`AgentAction`]
//! - [`ToolCatalog`] - tools the server offered for this session
//! - [`SessionError`] - why a session failed
//!
//! ## Agent Loop
//!
//! 1. Select the device through the bootstrap tool
//! 2. Fetch the tool catalog once
//! 3. Ask the planner for the next action (bounded by `max_iterations`)
//! 4. Invoke the requested tool, record the result, go to 3
//! 5. Stop on a completion marker or on the first failure

mod action;
mod catalog;
mod controller;
mod errors;
mod events;
pub mod extractor;
mod instructions;
mod legacy;
mod models;
mod planner;
mod session;


pub use action::AgentAction;
pub use catalog::{ToolCatalog, ToolDescriptor};
pub use controller::{AgentLoopController, SessionHandle};
pub use errors::{SessionError, StartError};
pub use events::{SessionEvent, SessionObserver};
pub use models::{AgentOptions, SessionOutcome};
pub use planner::Planner;
pub use session::{ConversationTurn, Phase, SessionState};
