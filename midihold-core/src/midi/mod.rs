use midir::{MidiOutput, MidiOutputConnection};
use midihold_types::MidiMessage;

use crate::sink::NoteSink;

/// Information about an available MIDI port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiPortInfo {
    pub index: usize,
    pub name: String,
}

/// MIDI output manager: enumerates output ports and opens connections.
pub struct MidiOutputManager {
    client_name: String,
    midi_out: Option<MidiOutput>,
    available_ports: Vec<MidiPortInfo>,
}

impl MidiOutputManager {
    pub fn new(client_name: &str) -> Self {
        let midi_out = match MidiOutput::new(client_name) {
            Ok(out) => Some(out),
            Err(e) => {
                log::error!(target: "midi", "cannot create MIDI client: {}", e);
                None
            }
        };
        let mut manager = Self {
            client_name: client_name.to_string(),
            midi_out,
            available_ports: Vec::new(),
        };
        manager.refresh_ports();
        manager
    }

    /// Whether the MIDI backend could be initialized
    pub fn is_available(&self) -> bool {
        self.midi_out.is_some()
    }

    /// Refresh the list of available MIDI output ports
    pub fn refresh_ports(&mut self) {
        self.available_ports.clear();

        if let Some(ref midi_out) = self.midi_out {
            let ports = midi_out.ports();
            for (index, port) in ports.iter().enumerate() {
                if let Ok(name) = midi_out.port_name(port) {
                    self.available_ports.push(MidiPortInfo { index, name });
                }
            }
        }
    }

    /// Get list of available MIDI output ports
    pub fn list_ports(&self) -> &[MidiPortInfo] {
        &self.available_ports
    }

    /// Connect to a MIDI output port by index
    pub fn connect(&self, port_index: usize) -> Result<MidiOutputSink, String> {
        // connect() consumes the MidiOutput, so use a fresh one
        let midi_out = MidiOutput::new(&self.client_name).map_err(|e| e.to_string())?;
        let ports = midi_out.ports();

        if port_index >= ports.len() {
            return Err(format!(
                "Selected port [{}] nPorts [{}]",
                port_index,
                ports.len()
            ));
        }

        let port = &ports[port_index];
        let port_name = midi_out
            .port_name(port)
            .unwrap_or_else(|_| "Unknown".to_string());

        let connection = midi_out
            .connect(port, &format!("{}-out", self.client_name))
            .map_err(|e| e.to_string())?;

        log::info!(target: "midi", "opened port [{}] {}", port_index, port_name);
        Ok(MidiOutputSink::new(connection, port_name))
    }

    /// Create a virtual output port other applications can connect to
    #[cfg(unix)]
    pub fn create_virtual(&self, port_name: &str) -> Result<MidiOutputSink, String> {
        use midir::os::unix::VirtualOutput;

        let midi_out = MidiOutput::new(&self.client_name).map_err(|e| e.to_string())?;
        let connection = midi_out
            .create_virtual(port_name)
            .map_err(|e| e.to_string())?;

        let full_name = format!("{}:{}", self.client_name, port_name);
        log::info!(target: "midi", "created virtual port {}", full_name);
        Ok(MidiOutputSink::new(connection, full_name))
    }
}

/// Note sink writing to an open MIDI output connection.
pub struct MidiOutputSink {
    connection: Option<MidiOutputConnection>,
    port_name: String,
    send_errors: usize,
}

impl MidiOutputSink {
    fn new(connection: MidiOutputConnection, port_name: String) -> Self {
        Self {
            connection: Some(connection),
            port_name,
            send_errors: 0,
        }
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// Number of messages the port refused since it was opened
    pub fn send_errors(&self) -> usize {
        self.send_errors
    }

    pub fn close(&mut self) {
        if let Some(conn) = self.connection.take() {
            conn.close();
        }
    }
}

impl NoteSink for MidiOutputSink {
    fn notify(&mut self, message: MidiMessage) {
        let Some(conn) = self.connection.as_mut() else {
            return;
        };
        if let Err(e) = conn.send(message.as_bytes()) {
            self.send_errors += 1;
            log::warn!(
                target: "midi",
                "send {:?} to {} failed: {}",
                message.as_bytes(),
                self.port_name,
                e
            );
        }
    }
}

impl Drop for MidiOutputSink {
    fn drop(&mut self) {
        self.close();
    }
}
