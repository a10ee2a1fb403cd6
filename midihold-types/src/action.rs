use serde::{Deserialize, Serialize};

use crate::state::Pitch;

/// Commands understood by the controller command loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Help,
    Print,
    Reset,
    On,
    Off,
    NoteUp,
    NoteDown,
    KeyUp,
    KeyDown,
    OctaveUp,
    OctaveDown,
    /// Select a pitch by key name and human octave (already shifted to internal)
    Note(Pitch),
    /// Select a raw key index, keeping the octave
    Key(u8),
    /// Select a raw internal octave index, keeping the key
    Octave(u8),
    Exit,
}

/// Result of dispatching a command: lines for the UI to print and the quit flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchResult {
    pub quit: bool,
    pub output: Vec<String>,
}

impl DispatchResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_quit() -> Self {
        Self { quit: true, ..Self::default() }
    }

    pub fn with_output(line: impl Into<String>) -> Self {
        Self { output: vec![line.into()], ..Self::default() }
    }
}
