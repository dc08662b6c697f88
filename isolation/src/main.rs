mod interactive;

use clap::{Parser, Subcommand};
use isolation_agents::{
    ai_move, play_turn, search, Agent, AiError, Evaluatable, MinimaxAgent, RandomAgent, MAX_DEPTH,
};
use isolation_core::{
    perft_detailed, perft_divide, Coord, GameState, GameStatus, Player, Square,
};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Isolation on a 6x6 board against a minimax engine",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play against the engine in a full-screen terminal board
    Play,
    /// Play against the engine by typing coordinates
    Text,
    /// Parse and display a position
    Show {
        /// Position notation, e.g. "1...../....../....../....../....../.....2 1"
        position: String,
    },
    /// Evaluate a position with the mobility heuristic
    Eval {
        position: Option<String>,
    },
    /// Search for the best move of the side to move
    Search {
        position: Option<String>,
        #[arg(short, long, default_value_t = MAX_DEPTH)]
        depth: u8,
    },
    /// Count move paths to a fixed depth
    Perft {
        depth: u8,
        position: Option<String>,
    },
    /// Pit the engine (Player 2) against a random mover (Player 1)
    Selfplay {
        #[arg(short, long, default_value_t = 10)]
        games: u32,
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
        #[arg(short, long, default_value_t = MAX_DEPTH)]
        depth: u8,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn parse_position(position: Option<&str>) -> Result<GameState, String> {
    match position {
        Some(notation) => GameState::from_notation(notation)
            .map_err(|e| format!("Error parsing position: {}", e)),
        None => Ok(GameState::new()),
    }
}

fn display_board(state: &GameState) {
    println!();
    print!("{}", state);
    println!();

    match state.status() {
        GameStatus::InProgress => println!("{} to move", state.side_to_move()),
        GameStatus::Finished { winner } => println!("Game over. {} wins!", winner),
    }
    println!("Position: {}", state.to_notation());
}

fn play_text() -> io::Result<()> {
    let mut state = GameState::new();

    println!("Isolation - Text Mode");
    println!("You are Player 1. Enter a destination as 'x y' (e.g. 1 1).");
    println!("Commands: 'quit', 'new', 'help'");

    loop {
        display_board(&state);

        if state.is_finished() {
            print!("Play again? [y/N] ");
            io::stdout().flush()?;
            let mut answer = String::new();
            io::stdin().read_line(&mut answer)?;
            if answer.trim().eq_ignore_ascii_case("y") {
                state = GameState::new();
                continue;
            }
            break;
        }

        print!("Your move: ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        match input {
            "quit" => break,
            "help" => {
                println!("Enter the square to move to, like '2 2' or '0,5'.");
                println!("Tokens move like chess queens and cannot pass blocked (#) squares.");
                println!("Commands: quit, new, help");
                continue;
            }
            "new" => {
                state = GameState::new();
                println!("New game started!");
                continue;
            }
            _ => {}
        }

        let to = match input.parse::<Square>() {
            Ok(to) => to,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        if let Err(e) = state.attempt_move(Coord::from(to)) {
            println!("Invalid move: {}", e);
            continue;
        }

        if state.is_finished() {
            continue;
        }

        display_board(&state);
        println!("Engine thinking...");

        match ai_move(&mut state) {
            Ok(to) => println!("Engine plays: {}", to),
            Err(AiError::NoLegalMove { winner }) => println!("Engine is stuck. {} wins!", winner),
            Err(e) => println!("Engine error: {}", e),
        }
    }

    Ok(())
}

fn run_search(state: &GameState, depth: u8) {
    println!("Position: {}", state.to_notation());
    println!("Searching to depth {}...", depth);

    let start = std::time::Instant::now();
    let result = search(state, depth);
    let elapsed = start.elapsed();

    match result.best_move {
        Some(best_move) => {
            println!("\nBest move: {}", best_move);
            println!("Score: {}", result.score);
            println!("Depth: {}", result.depth);
            println!("Nodes: {}", result.nodes);
            println!("Time: {:.3}s", elapsed.as_secs_f64());
        }
        None => println!("No legal moves available"),
    }
}

fn run_perft(state: &GameState, depth: u8) {
    println!("Running perft({})...", depth);
    println!("Position: {}", state.to_notation());

    if depth <= 3 {
        for (to, count) in perft_divide(state, depth) {
            println!("{}: {}", to, count);
        }
        println!();
    }

    let start = std::time::Instant::now();
    let results = perft_detailed(state, depth);
    let elapsed = start.elapsed();

    println!("Nodes: {}", results.nodes);
    println!("Finished games along the way: {}", results.finished);
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    if elapsed.as_secs_f64() > 0.0 {
        println!("NPS: {:.0}", results.nodes as f64 / elapsed.as_secs_f64());
    }
}

fn run_selfplay(games: u32, seed: u64, depth: u8) {
    let mut wins = [0u32; 2];

    for game in 0..games {
        let mut random = RandomAgent::with_seed(seed.wrapping_add(u64::from(game)));
        let mut engine = MinimaxAgent::new(depth);
        let mut state = GameState::new();

        while !state.is_finished() {
            let agent: &mut dyn Agent = match state.side_to_move() {
                Player::One => &mut random,
                Player::Two => &mut engine,
            };
            if let Err(e) = play_turn(agent, &mut state) {
                eprintln!("Game {} aborted: {}", game + 1, e);
                break;
            }
        }

        if let Some(winner) = state.winner() {
            wins[winner.index()] += 1;
            println!("Game {}: {} wins", game + 1, winner);
        }
    }

    println!(
        "\n{} vs {}: {} - {}",
        RandomAgent::with_seed(seed).name(),
        MinimaxAgent::new(depth).name(),
        wins[Player::One.index()],
        wins[Player::Two.index()]
    );
}

fn run(command: Command) -> Result<(), String> {
    match command {
        Command::Play => interactive::InteractiveGame::new()
            .run()
            .map_err(|e| format!("Terminal error: {}", e)),
        Command::Text => play_text().map_err(|e| format!("I/O error: {}", e)),
        Command::Show { position } => {
            let state = parse_position(Some(&position))?;
            display_board(&state);
            Ok(())
        }
        Command::Eval { position } => {
            let state = parse_position(position.as_deref())?;
            display_board(&state);
            println!("Evaluation: {} (+ = Player 2, - = Player 1)", state.evaluate());
            println!(
                "(from {}'s perspective: {})",
                state.side_to_move(),
                state.evaluate_for(state.side_to_move())
            );
            Ok(())
        }
        Command::Search { position, depth } => {
            let state = parse_position(position.as_deref())?;
            run_search(&state, depth);
            Ok(())
        }
        Command::Perft { depth, position } => {
            let state = parse_position(position.as_deref())?;
            run_perft(&state, depth);
            Ok(())
        }
        Command::Selfplay { games, seed, depth } => {
            run_selfplay(games, seed, depth);
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}
