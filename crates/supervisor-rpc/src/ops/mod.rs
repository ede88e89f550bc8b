//! Typed wrappers over the dispatch core, one per supervisord method.
//!
//! Each wrapper names its [`Command`](crate::Command), forwards its arguments
//! and picks the decoder for the reply.

mod logs;
mod process;
mod records;
mod status;
mod system;

pub use records::{ProcessConfig, ProcessInfo, ProcessState, StateCode, SupervisorState};
