//! # midihold-types
//!
//! Shared type definitions for midihold.
//! Plain data only: pitch state, key names, the three-byte MIDI message handed
//! to note sinks, log levels, and the command vocabulary the CLI dispatches.

pub mod action;
mod message;
pub mod state;

pub use action::*;
pub use message::{LogLevel, MidiMessage, NOTE_OFF, NOTE_ON};

// Re-export all state types at crate root for convenience
pub use state::*;
