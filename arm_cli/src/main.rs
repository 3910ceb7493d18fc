//! # Arm command line
//!
//! Reads command tokens from the terminal, sends each one to the arm executable, and prints the
//! reply.

use color_eyre::{eyre::WrapErr, Result};
use comms_if::{
    net::{zmq, MonitoredSocket, MonitoredSocketError, SocketOptions},
    tc::{ArmTc, MAX_CMD_LEN},
};
use rustyline::{error::ReadlineError, DefaultEditor};
use structopt::StructOpt;

const PROMPT: &str = "arm $ ";
const HISTORY_PATH: &str = "data/arm_cli_history.txt";

#[derive(Debug, StructOpt)]
#[structopt(name = "arm_cli", about = "Send commands to the arm executable")]
struct Opt {
    /// Endpoint of the arm executable's command socket
    #[structopt(short, long, default_value = "tcp://localhost:5020")]
    endpoint: String,

    /// How long to wait for a reply, in milliseconds
    #[structopt(short, long, default_value = "5000")]
    timeout: i32,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let opt = Opt::from_args();

    let ctx = zmq::Context::new();
    let mut socket = connect(&ctx, &opt).wrap_err("Failed to create the command socket")?;

    let mut rl = DefaultEditor::new()?;
    if rl.load_history(HISTORY_PATH).is_err() {
        println!("No history detected");
    }

    println!("Connected to {}, type `help` for the list of commands", opt.endpoint);

    loop {
        let line = match rl.readline(PROMPT) {
            Ok(l) => l,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                println!("Unhandled Error: {:?}", e);
                break;
            }
        };
        rl.add_history_entry(line.as_str()).ok();

        match line.trim() {
            "" => continue,
            "help" => {
                print_help();
                continue;
            }
            "exit" | "quit" => break,
            cmd if cmd.len() > MAX_CMD_LEN => {
                println!("Commands are at most {} bytes long", MAX_CMD_LEN);
                continue;
            }
            cmd => {
                if let Err(e) = socket.send(cmd, 0) {
                    println!("Could not send command: {}", e);
                    continue;
                }

                match socket.recv_string(0) {
                    Ok(Ok(reply)) => println!("{}", reply),
                    Ok(Err(_)) => println!("Reply was not valid UTF-8"),
                    Err(e) => {
                        // A REQ socket can't send again until it gets a reply, start over
                        println!("No reply from the arm ({}), reconnecting", e);
                        socket = connect(&ctx, &opt)?;
                    }
                }
            }
        }
    }

    println!("Exiting...");
    if let Some(dir) = std::path::Path::new(HISTORY_PATH).parent() {
        std::fs::create_dir_all(dir).ok();
    }
    rl.save_history(HISTORY_PATH)
        .wrap_err("Failed to save the history")?;

    Ok(())
}

fn connect(ctx: &zmq::Context, opt: &Opt) -> Result<MonitoredSocket, MonitoredSocketError> {
    let socket_options = SocketOptions {
        bind: false,
        block_on_first_connect: false,
        recv_timeout: opt.timeout,
        send_timeout: opt.timeout,
        linger: 0,
        ..Default::default()
    };

    MonitoredSocket::new(ctx, zmq::REQ, socket_options, &opt.endpoint)
}

fn print_help() {
    println!("Commands:");
    for tc in ArmTc::ALL.iter() {
        println!("  {:<10} {}", format!("{:?}", tc), tc.aliases().join(" | "));
    }
    println!("  help       this list");
    println!("  exit       quit");
}
