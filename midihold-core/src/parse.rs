//! Text command parsing for the interactive command loop.
//!
//! Pitches are written as a key name plus a human octave, e.g. `note A# 0`.
//! Human octaves start at -2, so the internal octave is the human one plus 2.

use midihold_types::{Command, Key, Pitch, OCTAVE_OFFSET};

/// Highest internal octave the parser accepts. The controller rejects
/// anything above its own limit afterwards.
const MAX_PARSED_OCTAVE: i64 = 10;

pub fn parse_key_name(name: &str) -> Option<Key> {
    Key::from_name(name)
}

/// Parse a signed human octave and shift it to the internal octave index.
pub fn parse_human_octave(text: &str) -> Result<u8, String> {
    let human: i64 = text
        .parse()
        .map_err(|_| format!("Invalid octave: {}", text))?;
    let internal = human + OCTAVE_OFFSET as i64;
    if !(0..=MAX_PARSED_OCTAVE).contains(&internal) {
        return Err(format!("Invalid octave: {}", text));
    }
    Ok(internal as u8)
}

pub fn parse_pitch(key: &str, octave: &str) -> Result<Pitch, String> {
    log::debug!(target: "parse", "parse_pitch: key: {} oct: {}", key, octave);

    if key.is_empty() {
        return Err("Key not set !".to_string());
    }
    if octave.is_empty() {
        return Err("Octave not set !".to_string());
    }

    let internal = parse_human_octave(octave)?;
    let key_value = parse_key_name(key).ok_or_else(|| format!("Invalid key: {}", key))?;
    let pitch = Pitch::new(key_value, internal);

    log::debug!(
        target: "parse",
        "parse_pitch :: key: {} [{}] oct: {} [{}] note: [{}]",
        key,
        key_value.index(),
        octave,
        internal,
        pitch.note().map_or_else(|| "out of range".to_string(), |n| n.to_string())
    );
    Ok(pitch)
}

fn parse_byte_arg(arg: &str) -> Result<u8, String> {
    let value: u64 = arg
        .parse()
        .map_err(|_| format!("Argument '{}' is not an unsigned integer", arg))?;
    u8::try_from(value).map_err(|_| format!("Argument '{}' is > 0xFF", arg))
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    let command = match words.as_slice() {
        ["exit"] => Command::Exit,
        ["help"] => Command::Help,
        ["print"] => Command::Print,
        ["reset"] => Command::Reset,
        ["on"] => Command::On,
        ["off"] => Command::Off,
        ["note+"] => Command::NoteUp,
        ["note-"] => Command::NoteDown,
        ["key+"] => Command::KeyUp,
        ["key-"] => Command::KeyDown,
        ["oct+"] => Command::OctaveUp,
        ["oct-"] => Command::OctaveDown,
        ["note", rest @ ..] => {
            let key = rest.first().copied().unwrap_or("");
            let octave = rest.get(1).copied().unwrap_or("");
            Command::Note(parse_pitch(key, octave)?)
        }
        ["key", arg, ..] => Command::Key(parse_byte_arg(arg)?),
        ["oct", arg, ..] => Command::Octave(parse_byte_arg(arg)?),
        _ => {
            return Err(format!(
                "Unknown command '{}' Type 'help' for command list",
                line
            ))
        }
    };
    Ok(Some(command))
}

pub const HELP: &str = "\
Available commands:
  note [A,A#,B,B#... G#] [-2,7] ( example : note A# 0)
  note+
  note-
  key [0-11]
  key+
  key-
  oct [0-9]
  oct+
  oct-
  on ( hold on )
  off ( hold off )
  print ( print current settings)
  reset ( reset all values, stop all midi notes)
  help
  exit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(parse_key_name("C").map(|k| k.index()), Some(0));
        assert_eq!(parse_key_name("D").map(|k| k.index()), Some(2));
        assert_eq!(parse_key_name("F#").map(|k| k.index()), Some(6));
        assert_eq!(parse_key_name("B#").map(|k| k.index()), Some(11));
        assert_eq!(parse_key_name("E#"), None);
    }

    #[test]
    fn test_human_octave_shift() {
        assert_eq!(parse_human_octave("0"), Ok(2));
        assert_eq!(parse_human_octave("-2"), Ok(0));
        assert_eq!(parse_human_octave("8"), Ok(10));
        assert!(parse_human_octave("-3").is_err());
        assert!(parse_human_octave("9").is_err());
        assert!(parse_human_octave("two").is_err());
    }

    #[test]
    fn test_parse_pitch() {
        let pitch = parse_pitch("E", "1").unwrap();
        assert_eq!(pitch, Pitch::new(Key::E, 3));
        assert_eq!(pitch.note(), Some(40));

        assert_eq!(parse_pitch("", "1"), Err("Key not set !".to_string()));
        assert_eq!(parse_pitch("E", ""), Err("Octave not set !".to_string()));
        assert_eq!(parse_pitch("E#", "1"), Err("Invalid key: E#".to_string()));
        assert_eq!(parse_pitch("C", "x"), Err("Invalid octave: x".to_string()));
    }

    #[test]
    fn test_bare_commands() {
        assert_eq!(parse_command("exit"), Ok(Some(Command::Exit)));
        assert_eq!(parse_command("  on "), Ok(Some(Command::On)));
        assert_eq!(parse_command("oct-"), Ok(Some(Command::OctaveDown)));
        assert_eq!(parse_command("note+"), Ok(Some(Command::NoteUp)));
        assert_eq!(parse_command(""), Ok(None));
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn test_note_command() {
        assert_eq!(
            parse_command("note A# 0"),
            Ok(Some(Command::Note(Pitch::new(Key::As, 2))))
        );
        assert_eq!(parse_command("note"), Err("Key not set !".to_string()));
        assert_eq!(parse_command("note C"), Err("Octave not set !".to_string()));
    }

    #[test]
    fn test_numeric_commands() {
        assert_eq!(parse_command("key 4"), Ok(Some(Command::Key(4))));
        assert_eq!(parse_command("oct 9"), Ok(Some(Command::Octave(9))));
        assert_eq!(
            parse_command("key 256"),
            Err("Argument '256' is > 0xFF".to_string())
        );
        assert_eq!(
            parse_command("oct -1"),
            Err("Argument '-1' is not an unsigned integer".to_string())
        );
    }

    #[test]
    fn test_unknown_commands() {
        assert!(parse_command("key").unwrap_err().starts_with("Unknown command 'key'"));
        assert!(parse_command("exit now").is_err());
        assert!(parse_command("play").is_err());
    }
}
