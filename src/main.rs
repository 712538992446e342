//! Red Packet Rain entry point
//!
//! Parses flags, picks a host and runs one session:
//! - terminal (default): background stdin reader + fixed-delay session loop
//! - `--events`: single-thread loop stepping the session between key events
//! - `--headless`: no input, one JSON frame per line on stdout

use std::fs;
use std::io::{self, Write};
use std::process;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use crossterm::{cursor, event, execute, terminal};

use red_packet_rain::input::{InputSource, KeyState, NullInput, SharedSignal, spawn_reader};
use red_packet_rain::renderer::{FrameSink, JsonLinesSink, TerminalRenderer};
use red_packet_rain::report::Report;
use red_packet_rain::sim::StandardSpawn;
use red_packet_rain::{Session, SessionResult, SimulationConfig};

const USAGE: &str = "\
Usage: red-packet-rain [--key=value ...]

  --width=N --height=N     board size in cells (100x40)
  --count=N                red packets on the board (30)
  --duration=MS            session length (5000)
  --tick=MS                delay between ticks (50)
  --radius=R               catch radius (1.5)
  --speed=S                cells per tick while steering (1.5, gravity 0.8)
  --mode=reflective|gravity
  --min-amount=A --max-amount=A
  --seed=N
  --config=FILE.json       base config, overridden by later flags
  --events                 step on key events instead of a reader thread
  --headless               no terminal; JSON frames on stdout
  --json                   JSON summary";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Host {
    Terminal,
    Events,
    Headless,
}

struct Options {
    config: SimulationConfig,
    host: Host,
    json: bool,
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{USAGE}");
        return Ok(());
    }
    let Options { config, host, json } = parse_args(&args)?;

    let result = match host {
        Host::Terminal => with_terminal(false, || play_polling(&config))?,
        Host::Events => with_terminal(true, || play_events(&config))?,
        Host::Headless => {
            let mut spawn = StandardSpawn::for_mode(config.motion);
            let mut sink = JsonLinesSink::new(io::stdout().lock());
            Session::new(&config, &mut spawn)?.run(&NullInput, &mut sink)?
        }
    };

    let report = Report::new(&config, &result);
    let summary = if json {
        report.to_json()?
    } else {
        report.to_string()
    };
    // Keep stdout pure JSON lines in headless mode
    if host == Host::Headless {
        eprintln!("{summary}");
    } else {
        println!("{summary}");
    }
    Ok(())
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut config = match args.iter().find_map(|a| a.strip_prefix("--config=")) {
        Some(path) => {
            let json =
                fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
            SimulationConfig::from_json_str(&json)
                .with_context(|| format!("Failed to parse {path}"))?
        }
        None => SimulationConfig::default(),
    };
    let mut host = Host::Terminal;
    let mut json = false;

    for arg in args {
        let Some(flag) = arg.strip_prefix("--") else {
            bail!("unexpected argument '{arg}'\n\n{USAGE}");
        };
        let (key, value) = flag.split_once('=').unwrap_or((flag, ""));
        match key {
            "config" => {}
            "events" => host = Host::Events,
            "headless" => host = Host::Headless,
            "json" => json = true,
            _ => {
                if !config.apply_flag(key, value)? {
                    bail!("unknown flag --{key}\n\n{USAGE}");
                }
            }
        }
    }

    // Fail before touching the terminal
    config.validate()?;
    Ok(Options { config, host, json })
}

/// Raw mode + alternate screen around `f`; the terminal is restored even
/// when `f` fails
fn with_terminal<T>(key_releases: bool, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::Clear(terminal::ClearType::All),
    )?;
    // Release events need the kitty keyboard protocol; without it a
    // direction sticks until another key overrides it
    let enhanced = key_releases && terminal::supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            stdout,
            event::PushKeyboardEnhancementFlags(event::KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }

    let result = f();

    if enhanced {
        let _ = execute!(stdout, event::PopKeyboardEnhancementFlags);
    }
    let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = stdout.flush();
    result
}

/// Two-task model: stdin reader thread feeding an atomic signal
fn play_polling(config: &SimulationConfig) -> Result<SessionResult> {
    let mut spawn = StandardSpawn::for_mode(config.motion);
    let session = Session::new(config, &mut spawn)?;

    let signal = Arc::new(SharedSignal::new());
    spawn_reader(io::stdin(), Arc::clone(&signal)).context("Failed to start input thread")?;

    let mut renderer = TerminalRenderer::new(io::stdout(), config.bounds());
    Ok(session.run(&signal, &mut renderer)?)
}

/// Single-task model: key events and ticks interleave on this thread
fn play_events(config: &SimulationConfig) -> Result<SessionResult> {
    let mut spawn = StandardSpawn::for_mode(config.motion);
    let mut session = Session::new(config, &mut spawn)?;
    let mut keys = KeyState::new();
    let mut renderer = TerminalRenderer::new(io::stdout(), config.bounds());

    loop {
        let quit = keys.quit_requested();
        let frame = session.step(&keys)?;
        if let Err(e) = renderer.present(&frame) {
            log::warn!("frame {} not presented: {e}", frame.tick);
        }
        if quit || session.is_expired() {
            break;
        }

        // Service key events until the next tick is due
        let wake = Instant::now() + config.tick_interval().min(session.remaining());
        loop {
            let left = wake.saturating_duration_since(Instant::now());
            if left == Duration::ZERO {
                break;
            }
            if event::poll(left)? {
                keys.handle_event(&event::read()?);
            }
        }
        if session.is_expired() {
            break;
        }
    }

    keys.cancel();
    Ok(session.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use red_packet_rain::MotionMode;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_flags() {
        let opts =
            parse_args(&args(&["--width=30", "--mode=gravity", "--headless", "--json"])).unwrap();
        assert_eq!(opts.config.width, 30);
        assert_eq!(opts.config.motion, MotionMode::GravityRespawn);
        assert_eq!(opts.host, Host::Headless);
        assert!(opts.json);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_args(&args(&["--duration=0"])).is_err());
        assert!(parse_args(&args(&["--colour=red"])).is_err());
        assert!(parse_args(&args(&["width=3"])).is_err());
        assert!(parse_args(&args(&["--count=-1"])).is_err());
    }
}
