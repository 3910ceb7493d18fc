//! # Command Server Module
//!
//! This module abstracts over the networking side of the arm executable. The server accepts
//! connections from command clients, receives one command token per request and sends back one
//! text reply per request.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use arm_lib::{dispatcher::Link, params::ArmExecParams};
use comms_if::{
    net::{zmq, MonitoredSocket, MonitoredSocketError, SocketOptions},
    tc,
};
use log::{info, warn};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// How long the server waits for a command before returning to the main loop.
///
/// Units: milliseconds
pub const POLL_INTERVAL_MS: i32 = 10;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// An abstraction over the networking part of the arm executable.
pub struct CmdServer {
    /// REP socket which accepts commands from clients
    cmd_socket: MonitoredSocket,

    /// Connection state last reported to the log
    reported_connected: bool,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors which can occur in the [`CmdServer`]
#[derive(thiserror::Error, Debug)]
pub enum CmdServerError {
    #[error("Socket error: {0}")]
    SocketError(#[from] MonitoredSocketError),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl CmdServer {
    /// Create a new instance of the command server.
    ///
    /// This function will not wait for a connection from a client before returning.
    pub fn new(params: &ArmExecParams) -> Result<Self, CmdServerError> {
        let ctx = zmq::Context::new();

        let socket_options = SocketOptions {
            bind: true,
            block_on_first_connect: false,
            recv_timeout: POLL_INTERVAL_MS,
            send_timeout: 10,
            ..Default::default()
        };

        let cmd_socket = MonitoredSocket::new(
            &ctx,
            zmq::REP,
            socket_options,
            &params.cmd_endpoint,
        )?;

        Ok(Self {
            cmd_socket,
            reported_connected: false,
        })
    }

    /// Log a notice if a client has connected or disconnected since the last call.
    pub fn check_connection(&mut self) {
        let connected = self.cmd_socket.connected();

        if connected != self.reported_connected {
            match connected {
                true => info!("Client connected"),
                false => info!("Client disconnected"),
            }
            self.reported_connected = connected;
        }
    }

    /// Wait up to [`POLL_INTERVAL_MS`] for a command from a client.
    ///
    /// The caller MUST reply to a returned command through the server's [`Link`] implementation
    /// before asking for the next one. Malformed requests are answered here and `None` is
    /// returned.
    pub fn get_cmd(&mut self) -> Option<String> {
        self.recv(0)
    }

    /// Receive one request, answering it straight away if it can't be a command.
    fn recv(&mut self, flags: i32) -> Option<String> {
        let msg = match self.cmd_socket.recv_msg(flags) {
            Ok(m) => m,
            Err(zmq::Error::EAGAIN) => return None,
            Err(e) => {
                warn!("Could not read from command socket: {}", e);
                return None;
            }
        };

        match tc::validate(&msg) {
            Ok(s) => Some(s.to_string()),
            Err(e) => {
                warn!("Rejected a {} byte request: {}", msg.len(), e);
                self.reply(&format!("ERR {}", e));
                None
            }
        }
    }
}

impl Link for CmdServer {
    fn reply(&mut self, text: &str) {
        if let Err(e) = self.cmd_socket.send(text, 0) {
            warn!("Couldn't send reply to client: {}", e);
        }
    }

    fn poll(&mut self) -> Option<String> {
        // Malformed requests are answered inside recv, keep going until a real one or none
        loop {
            match self.cmd_socket.poll(zmq::POLLIN, 0) {
                Ok(n) if n > 0 => (),
                _ => return None,
            }

            if let Some(cmd) = self.recv(zmq::DONTWAIT) {
                return Some(cmd);
            }
        }
    }
}
