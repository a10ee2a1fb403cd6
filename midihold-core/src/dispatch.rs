use midihold_types::{Command, DispatchResult};

use crate::controller::HoldController;
use crate::parse::HELP;
use crate::sink::{LogSink, NoteSink};

/// Dispatch a command to the controller. Rejected steps are reported as
/// warnings; printable output goes into the returned `DispatchResult`.
pub fn dispatch_command<N: NoteSink, L: LogSink>(
    command: &Command,
    ctrl: &mut HoldController<N, L>,
) -> DispatchResult {
    match command {
        Command::Exit => DispatchResult::with_quit(),
        Command::Help => DispatchResult::with_output(HELP),
        Command::Print => DispatchResult::with_output(ctrl.status().to_string()),
        Command::Reset => {
            ctrl.reset();
            DispatchResult::none()
        }
        Command::On => {
            ctrl.on();
            DispatchResult::none()
        }
        Command::Off => {
            ctrl.off();
            DispatchResult::none()
        }
        Command::NoteUp => step(ctrl.increment_note(), "note+ = MAX"),
        Command::NoteDown => step(ctrl.decrement_note(), "note- = MIN"),
        Command::KeyUp => step(ctrl.increment_key(), "key+ = MAX"),
        Command::KeyDown => step(ctrl.decrement_key(), "key- = MIN"),
        Command::OctaveUp => step(ctrl.increment_octave(), "oct+ = MAX"),
        Command::OctaveDown => step(ctrl.decrement_octave(), "oct- = MIN"),
        Command::Note(pitch) => {
            if !ctrl.set_key_octave(pitch.key.index(), pitch.octave) {
                log::warn!(target: "dispatch", "note - out of range: {}", pitch);
            }
            DispatchResult::none()
        }
        Command::Key(key) => {
            if !ctrl.set_key(*key) {
                log::warn!(target: "dispatch", "key - invalid value: {}", key);
            }
            DispatchResult::none()
        }
        Command::Octave(octave) => {
            if !ctrl.set_octave(*octave) {
                log::warn!(target: "dispatch", "oct - invalid value: {}", octave);
            }
            DispatchResult::none()
        }
    }
}

fn step(applied: bool, limit: &str) -> DispatchResult {
    if !applied {
        log::warn!(target: "dispatch", "{}", limit);
    }
    DispatchResult::none()
}
