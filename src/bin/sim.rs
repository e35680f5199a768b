use clap::Parser;
use rand::{Rng, SeedableRng, rngs::StdRng};

use tilelands::game::{Command, Game, GameConfig, TurnPhase, export_state, process_command};

#[derive(Debug, Parser, Clone)]
#[command(name = "tilelands-sim")]
#[command(about = "Random-play simulator for the tilelands engine")]
struct Args {
    /// Number of games to play
    #[arg(short = 'n', long, default_value_t = 1)]
    num: u32,

    /// Number of players per game
    #[arg(long, default_value_t = 2)]
    players: usize,

    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Dump the final snapshot of each game as JSON
    #[arg(long)]
    json: bool,

    /// Silence the per-game summary
    #[arg(long)]
    quiet: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if args.players == 0 {
        eprintln!("Error: need at least one player");
        std::process::exit(1);
    }

    for game_idx in 0..args.num {
        let config = GameConfig {
            seed: args.seed + game_idx as u64,
            ..GameConfig::default()
        };
        let mut game = Game::new(config);
        for _ in 0..args.players {
            game.add_player().expect("roster is open before start");
        }
        process_command(&mut game, Command::NewGame).expect("fresh game accepts new-game");
        process_command(&mut game, Command::StartGame).expect("prepared game can start");

        let mut rng = StdRng::seed_from_u64(args.seed.wrapping_add(game_idx as u64) ^ 0x51b);
        let mut commands = 0u64;
        while !matches!(game.phase, TurnPhase::Ended) {
            let command = choose_command(&game, &mut rng);
            if let Err(err) = process_command(&mut game, command) {
                eprintln!("Error: engine rejected {command:?}: {err}");
                std::process::exit(1);
            }
            commands += 1;
        }

        if !args.quiet {
            println!("game {game_idx}: {commands} commands, {} cells", game.board.len());
            for player in &game.players {
                println!("  {}: {} points, {} meeples left", player.name, player.score, player.meeples);
            }
        }
        if args.json {
            let snapshot = export_state(&game);
            println!(
                "{}",
                serde_json::to_string_pretty(&snapshot).expect("snapshot serializes")
            );
        }
    }
}

fn choose_command(game: &Game, rng: &mut StdRng) -> Command {
    match &game.phase {
        TurnPhase::NotStarted => Command::StartGame,
        TurnPhase::DrawTile => Command::DrawTile,
        TurnPhase::PlayTile(pending) => {
            if pending.legal_coords.is_empty() || rng.gen_bool(0.25) {
                Command::RotateTile
            } else {
                let coord = pending.legal_coords[rng.gen_range(0..pending.legal_coords.len())];
                Command::PlayTile { coord }
            }
        }
        TurnPhase::PlaceMeeple(pending) => {
            let has_reserve = game.current_player().is_some_and(|p| p.meeples > 0);
            if has_reserve && !pending.claimable.is_empty() && rng.gen_bool(0.5) {
                let claim = pending.claimable[rng.gen_range(0..pending.claimable.len())];
                Command::PlaceMeeple { claim }
            } else {
                Command::SkipMeeple
            }
        }
        TurnPhase::Ended => Command::NewGame,
    }
}
