use serde::{Deserialize, Serialize};

/// Status nibble for note-on.
pub const NOTE_ON: u8 = 0x90;
/// Status nibble for note-off.
pub const NOTE_OFF: u8 = 0x80;

/// A three-byte MIDI channel message: `[status, data1, data2]`.
///
/// The controller only ever produces note-on and note-off messages, so the
/// shape is fixed rather than a byte vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MidiMessage([u8; 3]);

impl MidiMessage {
    pub fn new(status: u8, data1: u8, data2: u8) -> Self {
        Self([status, data1 & 0x7F, data2 & 0x7F])
    }

    pub fn note_on(channel: u8, note: u8, velocity: u8) -> Self {
        Self::new(NOTE_ON | (channel & 0x0F), note, velocity)
    }

    pub fn note_off(channel: u8, note: u8, velocity: u8) -> Self {
        Self::new(NOTE_OFF | (channel & 0x0F), note, velocity)
    }

    pub fn status(&self) -> u8 {
        self.0[0]
    }

    pub fn channel(&self) -> u8 {
        self.0[0] & 0x0F
    }

    pub fn note(&self) -> u8 {
        self.0[1]
    }

    pub fn velocity(&self) -> u8 {
        self.0[2]
    }

    pub fn is_note_on(&self) -> bool {
        self.0[0] & 0xF0 == NOTE_ON
    }

    pub fn is_note_off(&self) -> bool {
        self.0[0] & 0xF0 == NOTE_OFF
    }

    pub fn as_bytes(&self) -> &[u8; 3] {
        &self.0
    }
}

impl From<MidiMessage> for [u8; 3] {
    fn from(message: MidiMessage) -> Self {
        message.0
    }
}

/// Severity of a controller log line, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_on_bytes() {
        let msg = MidiMessage::note_on(0, 40, 127);
        assert_eq!(msg.as_bytes(), &[144, 40, 127]);
        assert!(msg.is_note_on());
        assert!(!msg.is_note_off());
    }

    #[test]
    fn note_off_bytes() {
        let msg = MidiMessage::note_off(0, 40, 40);
        assert_eq!(<[u8; 3]>::from(msg), [128, 40, 40]);
        assert!(msg.is_note_off());
    }

    #[test]
    fn channel_is_packed_into_status() {
        let msg = MidiMessage::note_on(9, 36, 100);
        assert_eq!(msg.status(), 0x99);
        assert_eq!(msg.channel(), 9);
        assert!(msg.is_note_on());
    }

    #[test]
    fn data_bytes_are_masked_to_seven_bits() {
        let msg = MidiMessage::note_on(0, 200, 255);
        assert_eq!(msg.note(), 200 & 0x7F);
        assert_eq!(msg.velocity(), 127);
    }

    #[test]
    fn log_levels_are_ordered() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
        let names: Vec<&str> = LogLevel::ALL.iter().map(|l| l.name()).collect();
        assert_eq!(names, vec!["DEBUG", "INFO", "WARNING", "ERROR"]);
    }
}
