//! Canvas Arcade headless runner
//!
//! Plays either game with the demo autopilot, restarting after each round,
//! and prints the final scoreboard (optionally the whole frame as JSON).

use std::path::PathBuf;
use std::process::ExitCode;

use canvas_arcade::Settings;
use canvas_arcade::host::{self, Session, Simulation};
use canvas_arcade::sim::{BreakoutState, ShooterState, shooter};

const USAGE: &str = "usage: canvas-arcade <shooter|breakout> [--ticks N] [--rounds N] [--seed N] [--config PATH] [--json]";

/// Tick budget per round (one minute at 60 fps)
const DEFAULT_TICKS: u64 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Game {
    Shooter,
    Breakout,
}

#[derive(Debug, Clone, PartialEq)]
struct Options {
    game: Game,
    ticks: u64,
    rounds: u32,
    seed: Option<u64>,
    config: Option<PathBuf>,
    json: bool,
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{flag} needs a value"))?;
    value
        .parse()
        .map_err(|_| format!("{flag}: not a number: {value}"))
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let game = match args.next().as_deref() {
        Some("shooter") => Game::Shooter,
        Some("breakout") => Game::Breakout,
        Some(other) => return Err(format!("unknown game: {other}")),
        None => return Err("missing game name".to_string()),
    };

    let mut options = Options {
        game,
        ticks: DEFAULT_TICKS,
        rounds: 1,
        seed: None,
        config: None,
        json: false,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--ticks" => options.ticks = parse_number("--ticks", args.next())?,
            "--rounds" => options.rounds = parse_number("--rounds", args.next())?,
            "--seed" => options.seed = Some(parse_number("--seed", args.next())?),
            "--config" => {
                let path = args.next().ok_or("--config needs a path")?;
                options.config = Some(PathBuf::from(path));
            }
            "--json" => options.json = true,
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    Ok(options)
}

/// Seed from the wall clock when none was configured
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(0))
        .unwrap_or(0)
}

fn play<S, F>(session: &mut Session<S>, options: &Options, mut drive: F)
where
    S: Simulation,
    F: FnMut(&mut S) -> S::Input,
{
    for round in 1..=options.rounds {
        let ran = session.advance_with(options.ticks, &mut drive);
        let frame = session.sim().frame();
        println!(
            "round {round}: {} ({ran} ticks, seed {})",
            frame.status_line(),
            session.seed()
        );

        if options.json {
            match serde_json::to_string_pretty(&frame) {
                Ok(json) => println!("{json}"),
                Err(e) => log::error!("Cannot encode frame: {e}"),
            }
        }

        if round < options.rounds {
            session.restart();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    env_logger::init();

    let options = match parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let settings = options
        .config
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();
    let seed = options.seed.or(settings.seed).unwrap_or_else(clock_seed);
    log::info!("Canvas Arcade starting {:?} with seed {}", options.game, seed);

    match options.game {
        Game::Shooter => {
            let mut session = Session::new(ShooterState::new(settings.shooter, seed), seed);
            play(&mut session, &options, |state| {
                for event in state.events() {
                    log::debug!("{event:?}");
                }
                let (input, fire) = host::shooter_autopilot(state);
                if fire {
                    shooter::fire(state);
                }
                input
            });
        }
        Game::Breakout => {
            let mut session = Session::new(BreakoutState::new(settings.breakout), seed);
            play(&mut session, &options, |state| {
                for event in state.events() {
                    log::debug!("{event:?}");
                }
                host::breakout_autopilot(state)
            });
        }
    }

    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host embeds the library directly
}
