use anyhow::{bail, Context, Result};
use clap::Parser;
use eight_puzzle_solver::engine::Board;
use eight_puzzle_solver::genetic::{solve_puzzle_genetic_with_rng, GeneticConfig, Individual};
use eight_puzzle_solver::solver::{search_astar, MAX_CLOSED_STATES};
use eight_puzzle_solver::utils::{board_from_str, format_moves, moves_between};
use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fs;
use std::ops::ControlFlow;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Solve an 8-puzzle with A* and a genetic algorithm",
    long_about = None
)]
struct Args {
    /// Board as nine cells in row-major order, e.g. "1,2,3,4,5,6,7,0,8" (0 or _ is the blank)
    board: Option<String>,

    /// Read the board from a file instead (3x3 grid or nine digits)
    #[clap(short, long, conflicts_with = "board")]
    board_file: Option<PathBuf>,

    /// Number of individuals per generation
    #[clap(long, default_value_t = 100)]
    population: usize,

    /// Maximum number of generations
    #[clap(long, default_value_t = 500)]
    generations: u32,

    /// Per-gene mutation probability
    #[clap(long, default_value_t = 0.05)]
    mutation_rate: f64,

    /// Probability of crossover when breeding
    #[clap(long, default_value_t = 0.8)]
    crossover_rate: f64,

    /// Individuals copied unchanged into the next generation
    #[clap(long, default_value_t = 2)]
    elitism: usize,

    /// Number of moves encoded by each individual
    #[clap(long, default_value_t = 50)]
    genome_length: usize,

    /// Seed for the genetic solver (random when omitted)
    #[clap(long)]
    seed: Option<u64>,

    /// Print genetic progress every N generations (0 disables)
    #[clap(long, default_value_t = 50)]
    report_every: u32,
}

fn read_board(args: &Args) -> Result<Board> {
    if let Some(path) = &args.board_file {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read board file {}", path.display()))?;
        return board_from_str(&content)
            .with_context(|| format!("invalid board in {}", path.display()));
    }
    match &args.board {
        Some(text) => board_from_str(text).with_context(|| format!("invalid board '{}'", text)),
        None => bail!("provide a board argument or --board-file"),
    }
}

fn print_path(path: &[Board]) {
    for (step, board) in path.iter().enumerate() {
        println!("Step {}:\n{}\n", step, board);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let board = read_board(&args)?;
    println!("Initial board:\n{}\n", board);

    if !board.is_solvable() {
        warn!(
            "Board has {} inversions (odd); no solver can reach the goal",
            board.count_inversions()
        );
    }

    println!("--- A* ---");
    let outcome = search_astar(&board, MAX_CLOSED_STATES);
    match outcome.move_count() {
        Some(count) => {
            let moves = moves_between(&outcome.path).unwrap_or_default();
            println!("Solved in {} moves ({} boards expanded)", count, outcome.expanded);
            println!("Moves: {}\n", format_moves(&moves));
        }
        None if outcome.capped => println!(
            "No solution within {} expanded boards.\n",
            MAX_CLOSED_STATES
        ),
        None => println!("No solution: search space exhausted.\n"),
    }

    println!("--- Genetic ---");
    let config = GeneticConfig::default()
        .with_population_size(args.population)
        .with_max_generations(args.generations)
        .with_mutation_rate(args.mutation_rate)
        .with_crossover_rate(args.crossover_rate)
        .with_elitism_count(args.elitism)
        .with_genome_length(args.genome_length);
    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let report_every = args.report_every;
    let mut observer = |generation: u32, fitness: f64, best: &Individual| {
        if report_every > 0 && generation % report_every == 0 {
            info!(
                "generation {:>5}: best fitness {:>8.1}, distance {}",
                generation,
                fitness,
                best.final_distance()
            );
        }
        ControlFlow::Continue(())
    };

    let genetic = solve_puzzle_genetic_with_rng(&board, &config, &mut rng, &mut observer);
    match &genetic {
        Some(best) if best.reached_goal() => {
            println!("Solved in {} moves (fitness {})", best.move_count(), best.fitness());
            println!("Moves: {}\n", format_moves(best.moves()));
        }
        Some(best) => {
            println!(
                "Did not reach the goal; best individual ends {} away (fitness {})\n",
                best.final_distance(),
                best.fitness()
            );
        }
        None => println!("Empty population, nothing evaluated.\n"),
    }

    println!("--- Comparison ---");
    let astar_moves = outcome.move_count();
    let genetic_moves = genetic
        .as_ref()
        .filter(|best| best.reached_goal())
        .map(|best| best.move_count());
    match (astar_moves, genetic_moves) {
        (Some(a), Some(g)) => println!(
            "A*: {} moves, genetic: {} moves ({} extra)",
            a,
            g,
            g.saturating_sub(a)
        ),
        (Some(a), None) => println!("A*: {} moves, genetic: no solution", a),
        (None, Some(g)) => println!("A*: no solution, genetic: {} moves", g),
        (None, None) => println!("Neither solver found a solution."),
    }

    if let Some(count) = astar_moves {
        if count > 0 {
            println!("\nA* solution path:\n");
            print_path(&outcome.path);
        }
    }

    Ok(())
}
