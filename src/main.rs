// Terminal 2048.
// Controls: W/A/S/D or arrow keys to slide, R to restart, Q to quit.

use clap::{Parser, Subcommand};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use twenty48::animation::AnimationGuide;
use twenty48::config::{GameConfig, MergeRuleKind};
use twenty48::console_interface::{
    ConsoleInput, cleanup_terminal, handle_input, render_board_to_string, render_game,
    run_then_restore, setup_terminal,
};
use twenty48::core::{Direction, GameEngine, WIN_TILE};
use twenty48::models::GameRenderState;

const FRAME_POLL: Duration = Duration::from_millis(16);
const IDLE_POLL: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(name = "twenty48", about = "2048 in the terminal")]
struct Args {
    /// TOML file with board size, merge rule, animation length and seed
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    /// Let 2048 tiles keep merging
    #[arg(long)]
    unbounded: bool,
    /// Square board side length
    #[arg(long)]
    size: Option<i32>,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Interactive game (default)
    Play,
    /// Play moves without a UI and print the final board
    Demo {
        #[arg(long, default_value_t = 200)]
        moves: usize,
        /// Comma separated directions (up/down/left/right or w/a/s/d) instead of random moves
        #[arg(long, value_delimiter = ',')]
        script: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::from_toml(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if args.unbounded {
        config.merge_rule = MergeRuleKind::Unbounded;
    }
    if let Some(size) = args.size {
        config.width = size;
        config.height = size;
    }

    init_logging(&config.log_file)?;

    let seed = config.seed.unwrap_or_else(rand::random);
    info!("starting session with seed {} and {:?}", seed, config);
    let mut rng = StdRng::seed_from_u64(seed);
    let engine = GameEngine::from_config(&config)?;

    match args.mode.unwrap_or(Mode::Play) {
        Mode::Play => {
            let mut terminal = setup_terminal()?;
            let score = run_then_restore(
                || run_interactive(engine, &config, &mut rng, &mut terminal),
                cleanup_terminal,
            )?;
            println!("Final score: {}", score);
        }
        Mode::Demo { moves, script } => {
            let script = script
                .iter()
                .map(|s| s.parse::<Direction>())
                .collect::<Result<Vec<_>, _>>()?;
            run_demo(engine, moves, &script, &mut rng);
        }
    }

    Ok(())
}

fn init_logging(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let log_out = std::fs::OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_out)))
        .init();
    Ok(())
}

fn run_interactive(
    mut engine: GameEngine,
    config: &GameConfig,
    rng: &mut StdRng,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<u64, Box<dyn std::error::Error>> {
    engine.reset(rng);
    let mut animation: Option<AnimationGuide> = None;
    let mut last_delta = None;
    let mut won = false;

    loop {
        render_game(terminal, &GameRenderState {
            engine: &engine,
            animation,
            last_delta,
            won,
            game_over: !engine.can_move(),
        })?;
        if animation.is_some_and(|a| a.reached()) {
            animation = None;
        }

        let timeout = if animation.is_some() { FRAME_POLL } else { IDLE_POLL };
        match handle_input(timeout)? {
            ConsoleInput::Quit => break,
            ConsoleInput::Reset => {
                engine.reset(rng);
                animation = None;
                last_delta = None;
                won = false;
                info!("board reset");
            }
            ConsoleInput::Move(direction) => {
                let outcome = engine.make_move(direction, rng);
                if outcome.reached_win && !won {
                    info!("reached {} with score {}", WIN_TILE, engine.score());
                }
                won |= outcome.reached_win;
                last_delta = Some(outcome.score_delta);
                animation = Some(AnimationGuide::new(config.animation_duration()));
                if !engine.can_move() {
                    info!("game over with score {}", engine.score());
                }
            }
            ConsoleInput::Timeout | ConsoleInput::Unknown => {}
        }
    }

    Ok(engine.score())
}

fn run_demo(mut engine: GameEngine, moves: usize, script: &[Direction], rng: &mut StdRng) {
    engine.reset(rng);
    let moves = if script.is_empty() { moves } else { script.len() };
    let mut played = 0;
    while played < moves && engine.can_move() {
        let direction = match script.get(played) {
            Some(&direction) => direction,
            None => Direction::ALL[rng.random_range(0..Direction::ALL.len())],
        };
        engine.make_move(direction, rng);
        played += 1;
    }
    info!("demo finished after {} moves", played);
    print!("{}", render_board_to_string(&engine));
    println!(
        "Moves: {}, score: {}, highest tile: {}",
        played,
        engine.score(),
        engine.highest_tile()
    );
}
