use std::io::{self, BufRead, Write};

use midihold_core::config::Config;
use midihold_core::controller::HoldController;
use midihold_core::dispatch::dispatch_command;
use midihold_core::midi::MidiOutputSink;
use midihold_core::parse::parse_command;
use midihold_core::sink::{LogForwarder, LogSink, NoteSink};

/// Read commands from stdin until `exit` or end of input.
pub fn run(port: MidiOutputSink, config: &Config) -> io::Result<()> {
    let mut ctrl =
        HoldController::with_sinks(port, LogForwarder::new()).with_settings(config.settings());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let result = command_loop(stdin.lock(), &mut stdout, &mut ctrl);

    // leave nothing sounding behind
    if ctrl.is_on() {
        ctrl.off();
    }

    let (port, _) = ctrl.into_sinks();
    if port.send_errors() > 0 {
        log::warn!("{} messages could not be sent to {}", port.send_errors(), port.port_name());
    }
    result
}

fn command_loop<R: BufRead, W: Write, N: NoteSink, L: LogSink>(
    input: R,
    output: &mut W,
    ctrl: &mut HoldController<N, L>,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(command)) => {
                let result = dispatch_command(&command, ctrl);
                for text in &result.output {
                    writeln!(output, "{}", text)?;
                }
                if result.quit {
                    writeln!(output, "Exit program...")?;
                    break;
                }
            }
            Err(e) => eprintln!("{}", e),
        }
        output.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use midihold_types::MidiMessage;

    fn session(script: &str) -> (String, HoldController<Vec<MidiMessage>>) {
        let mut ctrl = HoldController::with_sinks(Vec::new(), Default::default());
        let mut out = Vec::new();
        command_loop(script.as_bytes(), &mut out, &mut ctrl).unwrap();
        (String::from_utf8(out).unwrap(), ctrl)
    }

    #[test]
    fn stops_at_exit() {
        let (out, ctrl) = session("note E 1\nprint\nexit\nnote+\n");
        assert_eq!(
            out,
            "key: E [4] oct: 1 [3] note: [40] is_on: [0]\nExit program...\n"
        );
        assert_eq!(ctrl.note(), 40);
    }

    #[test]
    fn bad_lines_are_skipped() {
        let (out, ctrl) = session("bogus\n\nnote E# 1\nkey 3\n");
        assert!(out.is_empty());
        assert_eq!(ctrl.key(), 3);
    }

    #[test]
    fn held_session_ends_at_eof() {
        let (_, ctrl) = session("on\nnote+\n");
        assert!(ctrl.is_on());
        assert_eq!(ctrl.note_sink().len(), 3);
    }
}
