//! Collaborators the controller reports to: a note sink for MIDI messages and
//! a log sink for leveled diagnostics.
//!
//! Both are fire-and-forget. A sink never reports failure back to the
//! controller; transport problems are the sink's own business.

use midihold_types::{LogLevel, MidiMessage};

/// Receives the note-on/note-off messages produced by the controller.
pub trait NoteSink {
    fn notify(&mut self, message: MidiMessage);
}

/// Receives leveled diagnostic lines produced by the controller.
pub trait LogSink {
    fn log(&mut self, level: LogLevel, text: &str);

    /// Whether a line at `level` would be recorded. Lets callers skip formatting.
    fn enabled(&self, _level: LogLevel) -> bool {
        true
    }
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullSink;

impl NoteSink for NullSink {
    fn notify(&mut self, _message: MidiMessage) {}
}

impl LogSink for NullSink {
    fn log(&mut self, _level: LogLevel, _text: &str) {}

    fn enabled(&self, _level: LogLevel) -> bool {
        false
    }
}

/// An unset sink is silently skipped.
impl<S: NoteSink> NoteSink for Option<S> {
    fn notify(&mut self, message: MidiMessage) {
        if let Some(sink) = self {
            sink.notify(message);
        }
    }
}

impl<S: LogSink> LogSink for Option<S> {
    fn log(&mut self, level: LogLevel, text: &str) {
        if let Some(sink) = self {
            sink.log(level, text);
        }
    }

    fn enabled(&self, level: LogLevel) -> bool {
        self.as_ref().is_some_and(|sink| sink.enabled(level))
    }
}

impl<S: NoteSink + ?Sized> NoteSink for Box<S> {
    fn notify(&mut self, message: MidiMessage) {
        (**self).notify(message);
    }
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn log(&mut self, level: LogLevel, text: &str) {
        (**self).log(level, text);
    }

    fn enabled(&self, level: LogLevel) -> bool {
        (**self).enabled(level)
    }
}

/// Records every message in order.
impl NoteSink for Vec<MidiMessage> {
    fn notify(&mut self, message: MidiMessage) {
        self.push(message);
    }
}

/// Records every line in order.
impl LogSink for Vec<(LogLevel, String)> {
    fn log(&mut self, level: LogLevel, text: &str) {
        self.push((level, text.to_string()));
    }
}

/// Forwards controller log lines to the `log` facade.
#[derive(Debug, Clone)]
pub struct LogForwarder {
    target: &'static str,
}

impl LogForwarder {
    pub const DEFAULT_TARGET: &'static str = "midihold::controller";

    pub fn new() -> Self {
        Self { target: Self::DEFAULT_TARGET }
    }
}

impl Default for LogForwarder {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for LogForwarder {
    fn log(&mut self, level: LogLevel, text: &str) {
        log::log!(target: self.target, to_log_level(level), "{}", text);
    }

    fn enabled(&self, level: LogLevel) -> bool {
        log::log_enabled!(target: self.target, to_log_level(level))
    }
}

pub fn to_log_level(level: LogLevel) -> log::Level {
    match level {
        LogLevel::Debug => log::Level::Debug,
        LogLevel::Info => log::Level::Info,
        LogLevel::Warning => log::Level::Warn,
        LogLevel::Error => log::Level::Error,
    }
}
