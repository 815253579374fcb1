use clap::Parser;
use judge::{Config, ConsoleInput, FollowRecommendation, Game, MoveInput, RoundResult};
use punto::MaximaxConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Names of the players. The first one is you, the others are played by the computer
    #[clap(num_args(1..), required = true)]
    players: Vec<String>,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Let the search play your cards instead of asking for positions
    #[arg(short, long, default_value_t = false)]
    autoplay: bool,

    /// How many rounds to play
    #[arg(short, long, default_value_t = 1)]
    rounds: usize,

    /// Print the result of every round as a JSON line
    #[arg(long, default_value_t = false)]
    json: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let config = Config {
        rng: StdRng::seed_from_u64(seed),
        search: MaximaxConfig::default(),
    };

    let mut game = Game::new(&args.players, config)?;
    let mut input: Box<dyn MoveInput> = if args.autoplay {
        Box::new(FollowRecommendation)
    } else {
        Box::new(ConsoleInput::stdio())
    };

    let mut wins = vec![0usize; args.players.len()];
    let mut draws = 0;
    for round_idx in 0..args.rounds {
        if round_idx > 0 {
            game.reset();
        }
        let result = game.play_round(input.as_mut())?;
        eprintln!("{}", game.board());
        match &result {
            RoundResult::Won { player, name } => {
                eprintln!("Round {}: {} wins", round_idx + 1, name);
                wins[usize::from(*player) - 1] += 1;
            }
            RoundResult::Draw => {
                eprintln!("Round {}: draw", round_idx + 1);
                draws += 1;
            }
        }
        if args.json {
            println!("{}", serde_json::to_string(&result)?);
        }
    }

    if args.rounds > 1 {
        eprintln!("End result:");
        for (name, num_wins) in args.players.iter().zip(&wins) {
            eprintln!("- {} wins by {}", num_wins, name);
        }
        eprintln!("- {} draws", draws);
    }

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
