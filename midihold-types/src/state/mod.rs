pub mod music;

pub use music::*;

use serde::{Deserialize, Serialize};

pub const KEYS_PER_OCTAVE: u8 = 12;
pub const MAX_KEY: u8 = KEYS_PER_OCTAVE - 1;

// Limits keep every selectable octave complete. The highest MIDI note is
// G8 (127), so the partial top octave is disabled.
pub const MAX_OCTAVE: u8 = 9;
pub const MAX_NOTE: u8 = 119;

/// Number of addressable MIDI notes (0..=127).
pub const MIDI_NOTE_COUNT: u8 = 128;

/// Internal octave 0 is displayed as octave -2.
pub const OCTAVE_OFFSET: u8 = 2;

/// Pitch selection and hold flag owned by the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchState {
    /// Selected key (C = 0)
    pub key: u8,
    /// Selected internal octave (human octave -2 = 0)
    pub octave: u8,
    /// Selected MIDI note, always `key + 12 * octave`
    pub note: u8,
    /// MIDI note sounding right now (meaningful only while held)
    pub active_note: u8,
    /// Hold switch
    pub held: bool,
}

impl PitchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_name(&self) -> &'static str {
        Key::from_index(self.key).map_or("?", |k| k.name())
    }

    pub fn octave_human(&self) -> i16 {
        self.octave as i16 - OCTAVE_OFFSET as i16
    }

    pub fn is_consistent(&self) -> bool {
        self.key <= MAX_KEY
            && self.octave <= MAX_OCTAVE
            && self.note <= MAX_NOTE
            && self.note as u16 == self.key as u16 + KEYS_PER_OCTAVE as u16 * self.octave as u16
    }

    pub fn status(&self) -> HoldStatus {
        HoldStatus {
            key: self.key,
            key_name: self.key_name(),
            octave: self.octave,
            octave_human: self.octave_human(),
            note: self.note,
            held: self.held,
        }
    }
}

/// Read-only snapshot of the controller, rendered as the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HoldStatus {
    pub key: u8,
    pub key_name: &'static str,
    pub octave: u8,
    pub octave_human: i16,
    pub note: u8,
    pub held: bool,
}

impl std::fmt::Display for HoldStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "key: {} [{}] oct: {} [{}] note: [{}] is_on: [{}]",
            self.key_name,
            self.key,
            self.octave_human,
            self.octave,
            self.note,
            self.held as u8
        )
    }
}
