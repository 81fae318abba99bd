use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pomod_core::config;
use pomod_core::ipc::{self, ClientMsg, DaemonMsg};
use pomod_core::phase::Phase;
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;

#[derive(Parser)]
#[command(name = "pomodctl", about = "Control the pomod Pomodoro daemon")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Press the primary button: start, or restart, the current phase
    #[command(alias = "start")]
    Press,
    /// Show the current phase and countdown
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let socket_path = config::socket_path();
    let stream = UnixStream::connect(&socket_path)
        .with_context(|| format!("connecting to pomod at {}\nIs the daemon running?", socket_path.display()))?;

    let mut writer = stream.try_clone().context("cloning stream")?;
    let reader = BufReader::new(stream);

    let msg = match cli.command {
        Command::Press => ClientMsg::Press,
        Command::Status => ClientMsg::GetState,
    };

    let line = ipc::encode(&msg);
    writer
        .write_all(line.as_bytes())
        .context("sending command")?;

    // Read response
    for line in reader.lines() {
        let line = line.context("reading response")?;
        let Some(resp) = ipc::decode_daemon(&line) else {
            continue;
        };
        match resp {
            DaemonMsg::State {
                phase,
                remaining_minutes,
                clock,
                status,
                timer,
                version,
                ..
            } => {
                println!("pomod v{}", version);
                println!("  phase:     {}", phase_name(phase));
                match remaining_minutes {
                    Some(m) => println!("  remaining: {} min", m),
                    None => println!("  remaining: idle"),
                }
                println!("  status:    {}", status);
                if !timer.is_empty() {
                    println!("  timer:     {}", timer);
                }
                if !clock.is_empty() {
                    println!("  clock:     {}", clock);
                }
            }
            DaemonMsg::Ack { ok, message } => {
                if ok {
                    println!("{}", message);
                } else {
                    eprintln!("error: {}", message);
                    std::process::exit(1);
                }
            }
            _ => continue,
        }
        break;
    }

    Ok(())
}

fn phase_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Work => "work",
        Phase::Break => "break",
    }
}
