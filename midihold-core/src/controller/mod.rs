//! Pitch-hold controller.
//!
//! Keeps a pitch selection (key + octave, or an absolute MIDI note) and, while
//! held, keeps exactly one note sounding on the note sink. Changing the pitch
//! while held starts the new note before stopping the old one so there is no
//! silent gap between them.


use midihold_types::{
    HoldStatus, LogLevel, MidiMessage, PitchState, KEYS_PER_OCTAVE, MAX_KEY, MAX_NOTE, MAX_OCTAVE,
    MIDI_NOTE_COUNT,
};

use crate::sink::{LogSink, NoteSink, NullSink};

/// Channel and velocities used for outgoing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldSettings {
    /// Zero-based MIDI channel (0..=15)
    pub channel: u8,
    pub note_on_velocity: u8,
    pub note_off_velocity: u8,
    /// Velocity of the note-off sweep sent by `reset`
    pub panic_velocity: u8,
}

impl Default for HoldSettings {
    fn default() -> Self {
        Self {
            channel: 0,
            note_on_velocity: 127,
            note_off_velocity: 127,
            panic_velocity: 40,
        }
    }
}

/// Pitch selection plus hold (sustain) switch, reporting to a note sink and a log sink.
pub struct HoldController<N = NullSink, L = NullSink> {
    state: PitchState,
    settings: HoldSettings,
    notes: N,
    log: L,
}

impl HoldController {
    /// Controller with no sinks attached.
    pub fn new() -> Self {
        Self::with_sinks(NullSink, NullSink)
    }
}

impl Default for HoldController {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NoteSink, L: LogSink> HoldController<N, L> {
    pub fn with_sinks(notes: N, log: L) -> Self {
        Self {
            state: PitchState::new(),
            settings: HoldSettings::default(),
            notes,
            log,
        }
    }

    pub fn with_settings(mut self, settings: HoldSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &HoldSettings {
        &self.settings
    }

    pub fn state(&self) -> &PitchState {
        &self.state
    }

    pub fn note(&self) -> u8 {
        self.state.note
    }

    pub fn key(&self) -> u8 {
        self.state.key
    }

    pub fn octave(&self) -> u8 {
        self.state.octave
    }

    pub fn active_note(&self) -> u8 {
        self.state.active_note
    }

    pub fn is_on(&self) -> bool {
        self.state.held
    }

    pub fn key_name(&self) -> &'static str {
        self.state.key_name()
    }

    pub fn octave_human(&self) -> i16 {
        self.state.octave_human()
    }

    pub fn note_sink(&self) -> &N {
        &self.notes
    }

    pub fn note_sink_mut(&mut self) -> &mut N {
        &mut self.notes
    }

    pub fn log_sink(&self) -> &L {
        &self.log
    }

    pub fn log_sink_mut(&mut self) -> &mut L {
        &mut self.log
    }

    pub fn into_sinks(self) -> (N, L) {
        (self.notes, self.log)
    }

    /// Snapshot of the current selection and hold flag.
    pub fn status(&self) -> HoldStatus {
        self.state.status()
    }

    // ------------------------------------------------------------------
    // Pitch mutation
    // ------------------------------------------------------------------

    /// Select an absolute note. Fails for notes above `MAX_NOTE`.
    pub fn set_note(&mut self, note: u8) -> bool {
        if note > MAX_NOTE {
            return false;
        }
        self.trace(format_args!("set_note: {}", note));
        self.state.note = note;
        self.state.octave = note / KEYS_PER_OCTAVE;
        self.state.key = note % KEYS_PER_OCTAVE;
        self.change_note();
        true
    }

    /// Select a key and internal octave. Every key/octave mutation goes through here.
    pub fn set_key_octave(&mut self, key: u8, octave: u8) -> bool {
        if key > MAX_KEY || octave > MAX_OCTAVE {
            return false;
        }
        self.trace(format_args!("set_key_octave: {} {}", key, octave));
        self.state.key = key;
        self.state.octave = octave;
        self.state.note = key + KEYS_PER_OCTAVE * octave;
        self.change_note();
        true
    }

    pub fn set_key(&mut self, key: u8) -> bool {
        self.set_key_octave(key, self.state.octave)
    }

    pub fn set_octave(&mut self, octave: u8) -> bool {
        self.set_key_octave(self.state.key, octave)
    }

    pub fn increment_note(&mut self) -> bool {
        self.set_note(self.state.note.saturating_add(1))
    }

    pub fn decrement_note(&mut self) -> bool {
        match self.state.note.checked_sub(1) {
            Some(note) => self.set_note(note),
            None => false,
        }
    }

    pub fn increment_key(&mut self) -> bool {
        self.set_key(self.state.key.saturating_add(1))
    }

    pub fn decrement_key(&mut self) -> bool {
        match self.state.key.checked_sub(1) {
            Some(key) => self.set_key(key),
            None => false,
        }
    }

    pub fn increment_octave(&mut self) -> bool {
        self.set_octave(self.state.octave.saturating_add(1))
    }

    pub fn decrement_octave(&mut self) -> bool {
        match self.state.octave.checked_sub(1) {
            Some(octave) => self.set_octave(octave),
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Hold
    // ------------------------------------------------------------------

    /// Start holding the selected note.
    ///
    /// Already held: nothing is sent, so the sounding note is never stacked
    /// with a second note-on that `off` could not release.
    pub fn on(&mut self) {
        if self.state.held {
            let active = self.state.active_note;
            self.trace(format_args!("on: already held [{}]", active));
            return;
        }
        self.trace(format_args!("on"));

        self.state.held = true;
        self.state.active_note = self.state.note;
        self.play(self.state.active_note);

        self.emit_status(LogLevel::Info);
    }

    /// Release the held note. Sends a note-off for `active_note` even when not held.
    pub fn off(&mut self) {
        self.trace(format_args!("off"));

        self.stop(self.state.active_note);
        self.state.held = false;

        self.emit_status(LogLevel::Info);
    }

    /// Release everything: switch hold off, select note 0 and send a note-off
    /// for every MIDI note. Meant for recovering a stuck device.
    pub fn reset(&mut self) {
        self.trace(format_args!("reset"));

        self.off();
        self.set_note(0);
        self.state.active_note = self.state.note;
        self.all_notes_off();

        self.emit_status(LogLevel::Info);
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn change_note(&mut self) {
        // re-selecting the sounding note keeps it sounding; on + off of the
        // same note would silence it while still held
        if self.state.held && self.state.note != self.state.active_note {
            // start before stop, otherwise there is a gap of silence
            self.play(self.state.note);
            self.stop(self.state.active_note);
            self.state.active_note = self.state.note;
        }
        self.emit_status(LogLevel::Info);
    }

    fn play(&mut self, note: u8) {
        self.trace(format_args!("play_midi: {}", note));
        let message =
            MidiMessage::note_on(self.settings.channel, note, self.settings.note_on_velocity);
        self.notes.notify(message);
    }

    fn stop(&mut self, note: u8) {
        self.trace(format_args!("stop_midi: {}", note));
        let message =
            MidiMessage::note_off(self.settings.channel, note, self.settings.note_off_velocity);
        self.notes.notify(message);
    }

    fn all_notes_off(&mut self) {
        self.trace(format_args!("reset_midi"));
        for note in 0..MIDI_NOTE_COUNT {
            let message =
                MidiMessage::note_off(self.settings.channel, note, self.settings.panic_velocity);
            self.notes.notify(message);
        }
    }

    fn trace(&mut self, args: std::fmt::Arguments<'_>) {
        if self.log.enabled(LogLevel::Debug) {
            self.log.log(LogLevel::Debug, &args.to_string());
        }
    }

    fn emit_status(&mut self, level: LogLevel) {
        if self.log.enabled(level) {
            let line = self.state.status().to_string();
            self.log.log(level, &line);
        }
    }
}
