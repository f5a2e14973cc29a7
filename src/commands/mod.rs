//! Command Handlers
//!
//! Entry points for the menu editor UI. Each handler applies one sequencer
//! operation to the working menu and writes the result to storage.

mod menu_cmd;


pub use menu_cmd::*;
