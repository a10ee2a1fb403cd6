//! # midihold-core
//!
//! Backend library for midihold: a pitch-hold controller that turns a selected
//! pitch into MIDI note-on/note-off messages and sustains it across pitch changes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use midihold_core::config::Config;
//! use midihold_core::controller::HoldController;
//! use midihold_core::dispatch::dispatch_command;
//! use midihold_core::midi::MidiOutputManager;
//! use midihold_core::parse::parse_command;
//! use midihold_core::sink::LogForwarder;
//!
//! let config = Config::load();
//! let midi = MidiOutputManager::new(config.client_name());
//! let port = midi.connect(0).expect("no MIDI output");
//!
//! let mut ctrl = HoldController::with_sinks(port, LogForwarder::new())
//!     .with_settings(config.settings());
//!
//! if let Ok(Some(command)) = parse_command("note A# 0") {
//!     let result = dispatch_command(&command, &mut ctrl);
//!     assert!(!result.quit);
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`controller`] — `HoldController`: pitch state, hold switch, start-before-stop handover
//! - [`sink`] — `NoteSink` / `LogSink` traits and the stock sinks
//! - [`midi`] — MIDI output ports via midir; `MidiOutputSink` is a `NoteSink`
//! - [`config`] — TOML configuration (embedded defaults + user override)
//! - [`parse`] — text command parsing (key names, human octaves)
//! - [`dispatch`] — `dispatch_command()`, routes parsed commands to the controller

pub mod config;
pub mod controller;
pub mod dispatch;
pub mod midi;
pub mod parse;
pub mod sink;

pub use controller::{HoldController, HoldSettings};
pub use sink::{LogForwarder, LogSink, NoteSink, NullSink};
