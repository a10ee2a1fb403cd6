mod runtime;

use std::process::ExitCode;

use midihold_core::config::Config;
use midihold_core::midi::{MidiOutputManager, MidiOutputSink};

const USAGE: &str = "\
usage: midihold [-v|--verbose] [--virtual] [PORT]

  PORT        index of the MIDI output port to open
  --virtual   create a virtual output port instead of opening one
  -v          debug logging

Without PORT or --virtual the available output ports are listed.";

fn init_logging(level: log::LevelFilter) {
    use simplelog::*;

    let mut builder = ConfigBuilder::new();
    builder
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .set_time_format_custom(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ));
    // falls back to UTC when the local offset cannot be determined
    let _ = builder.set_time_offset_to_local();

    if TermLogger::init(level, builder.build(), TerminalMode::Stderr, ColorChoice::Auto).is_err() {
        eprintln!("logger already initialized");
    }

    log::debug!("midihold starting (log level: {:?})", level);
}

fn list_ports(midi: &MidiOutputManager) -> ExitCode {
    println!("Please select one from available controllers and run as command:");
    println!("midihold [n]");
    println!();

    let ports = midi.list_ports();
    if ports.is_empty() {
        eprintln!("No ports available!");
        return ExitCode::FAILURE;
    }
    for port in ports {
        println!("port[{}] {}", port.index, port.name);
    }
    ExitCode::SUCCESS
}

fn open_port(
    midi: &MidiOutputManager,
    config: &Config,
    virtual_port: bool,
    port_arg: &str,
) -> Result<MidiOutputSink, String> {
    if virtual_port {
        #[cfg(unix)]
        return midi.create_virtual(config.virtual_port_name());
        #[cfg(not(unix))]
        return Err("Virtual ports are only supported on unix".to_string());
    }

    let index: usize = port_arg
        .parse()
        .map_err(|_| format!("Argument '{}' is not an unsigned integer", port_arg))?;
    midi.connect(index)
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    let virtual_port = args.iter().any(|a| a == "--virtual");
    let port_arg = args.iter().find(|a| !a.starts_with('-'));

    let config = Config::load();
    let log_level = if verbose { log::LevelFilter::Debug } else { config.log_level() };
    init_logging(log_level);

    println!("starting midihold v{}", env!("CARGO_PKG_VERSION"));
    println!();

    let midi = MidiOutputManager::new(config.client_name());
    if !midi.is_available() {
        eprintln!("MIDI output is not available");
        return ExitCode::FAILURE;
    }

    let port = match (virtual_port, port_arg) {
        (false, None) => return list_ports(&midi),
        (_, arg) => open_port(&midi, &config, virtual_port, arg.map_or("", |a| a.as_str())),
    };

    let port = match port {
        Ok(port) => port,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    println!(" Open port: {}", port.port_name());

    match runtime::run(port, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
