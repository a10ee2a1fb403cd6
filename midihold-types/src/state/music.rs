use serde::{Deserialize, Serialize};

use super::{KEYS_PER_OCTAVE, MAX_NOTE, OCTAVE_OFFSET};

/// Musical key (pitch class)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

impl Key {
    pub const ALL: [Key; 12] = [
        Key::C,
        Key::Cs,
        Key::D,
        Key::Ds,
        Key::E,
        Key::F,
        Key::Fs,
        Key::G,
        Key::Gs,
        Key::A,
        Key::As,
        Key::B,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Key::C => "C",
            Key::Cs => "C#",
            Key::D => "D",
            Key::Ds => "D#",
            Key::E => "E",
            Key::F => "F",
            Key::Fs => "F#",
            Key::G => "G",
            Key::Gs => "G#",
            Key::A => "A",
            Key::As => "A#",
            Key::B => "B",
        }
    }

    /// Chromatic index within the octave (C = 0)
    pub fn index(&self) -> u8 {
        *self as u8
    }

    pub fn from_index(index: u8) -> Option<Key> {
        Key::ALL.get(index as usize).copied()
    }

    pub fn is_sharp(&self) -> bool {
        matches!(self, Key::Cs | Key::Ds | Key::Fs | Key::Gs | Key::As)
    }

    /// Parse a key name: a capital letter `A`..`G`, optionally followed by `#`.
    ///
    /// `E#` is rejected. `B#` is accepted as an alias of `B` and shares slot 11.
    pub fn from_name(name: &str) -> Option<Key> {
        let mut chars = name.chars();
        let letter = chars.next()?;
        let sharp = match chars.next() {
            None => false,
            Some('#') => true,
            Some(_) => return None,
        };
        if chars.next().is_some() {
            return None;
        }

        let natural = match letter {
            'C' => Key::C,
            'D' => Key::D,
            'E' => Key::E,
            'F' => Key::F,
            'G' => Key::G,
            'A' => Key::A,
            'B' => Key::B,
            _ => return None,
        };

        match (natural, sharp) {
            (_, false) => Some(natural),
            (Key::E, true) => None,
            (Key::B, true) => Some(Key::B),
            (key, true) => Key::from_index(key.index() + 1),
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A key together with an internal (zero-based) octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pitch {
    pub key: Key,
    pub octave: u8,
}

impl Pitch {
    pub fn new(key: Key, octave: u8) -> Self {
        Self { key, octave }
    }

    /// Absolute MIDI note, or `None` when the pitch lies above the selectable range.
    pub fn note(&self) -> Option<u8> {
        let note = self.key.index() as u16 + KEYS_PER_OCTAVE as u16 * self.octave as u16;
        if note <= MAX_NOTE as u16 {
            Some(note as u8)
        } else {
            None
        }
    }

    pub fn octave_human(&self) -> i16 {
        self.octave as i16 - OCTAVE_OFFSET as i16
    }
}

impl std::fmt::Display for Pitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.key, self.octave_human())
    }
}
