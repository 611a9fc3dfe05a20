mod input;
mod ui;

use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use input::{KeyboardInput, NeverQuit};
use mouthflap::core::game_loop::{FrameSource, LandmarkDetector};
use mouthflap::puppet::{PuppetDetector, PuppetSource};
use mouthflap::replay::{ReplayDetector, ReplaySource};
use mouthflap::utils::persistence;
use mouthflap::{build_info, GameConfig, GameLoop, LoopSummary, QuitSignal, Renderer};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use ui::{LogRenderer, TerminalRenderer};

const LOG_FILE: &str = "mouthflap.log";

const PUPPET_CONTROLS: &[(&str, &str)] = &[
    ("[Space]", "Open mouth"),
    ("[0-3]", "Faces"),
    ("[q]", "Quit"),
];
const REPLAY_CONTROLS: &[(&str, &str)] = &[("[q]", "Quit")];

/// Parsed command line.
#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    replay: Option<PathBuf>,
    headless: bool,
    looping: bool,
    ticks: Option<u64>,
    seed: Option<u64>,
}

fn print_help() {
    println!("Mouth Flap - open your mouth to fly\n");
    println!("Usage: mouthflap [OPTIONS]\n");
    println!("Options:");
    println!("  --config <path>   Load settings from a JSON file");
    println!("  --replay <path>   Play back a recorded landmark stream (JSON lines)");
    println!("  --loop            Restart the replay when it ends");
    println!("  --headless        Run without the terminal UI (requires --replay)");
    println!("  --ticks <n>       Stop after n ticks");
    println!("  --seed <n>        Seed wall placement");
    println!("  --version         Show version information");
    println!("  --help            Show this help message");
    println!("\nWithout --replay, a keyboard-driven face stands in for the camera.");
}

fn value_after(args: &[String], i: usize) -> Result<&str, String> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing value for {}", args[i]))
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut i = 1;
    while i < args.len() {
        let value = |i: usize| value_after(args, i);
        match args[i].as_str() {
            "--config" => {
                options.config = Some(PathBuf::from(value(i)?));
                i += 1;
            }
            "--replay" => {
                options.replay = Some(PathBuf::from(value(i)?));
                i += 1;
            }
            "--ticks" => {
                let n = value(i)?;
                options.ticks = Some(n.parse().map_err(|_| format!("Invalid tick count: {}", n))?);
                i += 1;
            }
            "--seed" => {
                let n = value(i)?;
                options.seed = Some(n.parse().map_err(|_| format!("Invalid seed: {}", n))?);
                i += 1;
            }
            "--headless" => options.headless = true,
            "--loop" => options.looping = true,
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }
    if options.headless && options.replay.is_none() {
        return Err("--headless requires --replay".to_string());
    }
    Ok(options)
}

/// Log to a file while the terminal UI owns the screen, to stderr otherwise.
fn init_logging(headless: bool) {
    let env = env_logger::Env::default().default_filter_or("info");
    let mut builder = env_logger::Builder::from_env(env);
    if !headless {
        match persistence::open_log_file(LOG_FILE) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(_) => {
                builder.filter_level(log::LevelFilter::Off);
            }
        }
    }
    builder.init();
}

fn rng_for(options: &Options) -> StdRng {
    match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn run_loop<S, D, R, Q>(
    config: GameConfig,
    options: &Options,
    source: S,
    detector: D,
    renderer: R,
    quit: Q,
) -> mouthflap::Result<LoopSummary>
where
    S: FrameSource,
    D: LandmarkDetector<Frame = S::Frame>,
    R: Renderer,
    Q: QuitSignal,
{
    let mut game = GameLoop::new(config, source, detector, renderer, quit, rng_for(options));
    if let Some(ticks) = options.ticks {
        game = game.with_max_ticks(ticks);
    }
    game.run()
}

fn run_headless(config: GameConfig, options: &Options, replay: &Path) -> io::Result<()> {
    let source = ReplaySource::open(replay)?.looping(options.looping);
    let summary = run_loop(
        config,
        options,
        source,
        ReplayDetector,
        LogRenderer::default(),
        NeverQuit,
    )?;
    print_summary(&summary);
    Ok(())
}

fn run_terminal(config: GameConfig, options: &Options) -> io::Result<LoopSummary> {
    // Open collaborators before touching the terminal so setup errors print normally
    let replay = match &options.replay {
        Some(path) => Some(ReplaySource::open(path)?.looping(options.looping)),
        None => None,
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    let interval = config.tick.tick_interval();

    let result = match replay {
        Some(source) => run_loop(
            config,
            options,
            source,
            ReplayDetector,
            TerminalRenderer::new(terminal, REPLAY_CONTROLS.to_vec()),
            KeyboardInput::new(interval, None),
        ),
        None => {
            let (source, puppet) = PuppetSource::new();
            run_loop(
                config,
                options,
                source,
                PuppetDetector,
                TerminalRenderer::new(terminal, PUPPET_CONTROLS.to_vec()),
                KeyboardInput::new(interval, Some(puppet)),
            )
        }
    };

    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(result?)
}

fn print_summary(summary: &LoopSummary) {
    println!("Stopped: {:?}", summary.stop_reason);
    println!("  Ticks:       {}", summary.ticks);
    println!("  Jumps:       {}", summary.jumps);
    println!("  Crashes:     {}", summary.deaths);
    println!("  Respawns:    {}", summary.respawns);
    println!("  Best score:  {}", summary.best_score);
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("--version") | Some("-v") => {
            println!("{}", build_info::version_string());
            return Ok(());
        }
        Some("--help") | Some("-h") => {
            print_help();
            return Ok(());
        }
        _ => {}
    }

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'mouthflap --help' for usage.");
            std::process::exit(2);
        }
    };

    init_logging(options.headless);

    let config = GameConfig::load(options.config.as_deref())?;

    if let Some(replay) = options.replay.clone().filter(|_| options.headless) {
        return run_headless(config, &options, &replay);
    }

    let summary = run_terminal(config, &options)?;
    print_summary(&summary);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("mouthflap")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_defaults() {
        let options = parse_args(&args(&[])).unwrap();
        assert!(options.config.is_none());
        assert!(!options.headless);
        assert!(options.ticks.is_none());
    }

    #[test]
    fn test_parse_full() {
        let options = parse_args(&args(&[
            "--replay", "run.jsonl", "--headless", "--ticks", "600", "--seed", "9", "--loop",
        ]))
        .unwrap();
        assert_eq!(options.replay, Some(PathBuf::from("run.jsonl")));
        assert!(options.headless);
        assert!(options.looping);
        assert_eq!(options.ticks, Some(600));
        assert_eq!(options.seed, Some(9));
    }

    #[test]
    fn test_headless_needs_replay() {
        assert!(parse_args(&args(&["--headless"])).is_err());
    }

    #[test]
    fn test_missing_value_and_unknown_option() {
        assert!(parse_args(&args(&["--ticks"])).is_err());
        assert!(parse_args(&args(&["--ticks", "many"])).is_err());
        assert!(parse_args(&args(&["--fly"])).is_err());
    }
}
