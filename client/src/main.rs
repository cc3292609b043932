mod config;
mod terminal;

use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use common::games::SessionRng;
use common::games::tictactoe::{
    Difficulty, FirstPlayerMode, GameMode, TicTacToeSession, TicTacToeSessionSettings,
};
use common::scores::FileScoreStore;
use common::{log, logger};

use config::{ensure_device_id, get_config_manager, get_config_path, resolve_scores_path};
use terminal::{TerminalInput, format_scores};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Pvp,
    Computer,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FirstArg {
    Player,
    Computer,
    Random,
}

impl From<FirstArg> for FirstPlayerMode {
    fn from(arg: FirstArg) -> Self {
        match arg {
            FirstArg::Player => FirstPlayerMode::Player,
            FirstArg::Computer => FirstPlayerMode::Computer,
            FirstArg::Random => FirstPlayerMode::Random,
        }
    }
}

#[derive(Parser)]
#[command(name = "tictactoe", about = "Tic-tac-toe against a friend or the computer")]
struct Args {
    #[arg(long, value_enum, default_value = "computer")]
    mode: ModeArg,

    /// Overrides the difficulty stored in the config file
    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,

    /// Who opens in computer games; overrides the config file
    #[arg(long, value_enum)]
    first: Option<FirstArg>,

    #[arg(long)]
    config: Option<PathBuf>,

    /// Fixed seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,

    #[arg(short, long)]
    verbose: bool,

    /// Print this device's scores and exit
    #[arg(long)]
    show_scores: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);

    let config_path = get_config_path(args.config.as_deref());
    let config_manager = get_config_manager(&config_path);
    let (config, device_id) = ensure_device_id(&config_manager)?;

    let scores_path = resolve_scores_path(&config_path, &config.scores_file);
    let store = FileScoreStore::from_yaml_file(&scores_path);
    log!(
        "Device {} using config {} and scores {}",
        device_id,
        config_path.display(),
        scores_path.display()
    );

    let mode = match args.mode {
        ModeArg::Pvp => GameMode::PlayerVsPlayer,
        ModeArg::Computer => GameMode::PlayerVsComputer(
            args.difficulty.map(Difficulty::from).unwrap_or(config.difficulty),
        ),
    };
    // Player-vs-player games always pick the opening side at random.
    let first_player_mode = match mode {
        GameMode::PlayerVsPlayer => FirstPlayerMode::Random,
        GameMode::PlayerVsComputer(_) => args.first.map(FirstPlayerMode::from).unwrap_or(config.first_player),
    };

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    let mut session = TicTacToeSession::new(device_id, &store, rng);
    let mut terminal = TerminalInput::new(BufReader::new(io::stdin()), io::stdout());

    if args.show_scores {
        terminal.print(&format_scores(&session.scores()?));
        return Ok(());
    }

    let settings = TicTacToeSessionSettings {
        mode,
        first_player_mode,
    };
    loop {
        let report = session.run(settings, &mut terminal)?;
        if report.is_abandoned() || !terminal.confirm("Play again? [y/N] ") {
            break;
        }
    }

    terminal.print(&format_scores(&session.scores()?));
    Ok(())
}
