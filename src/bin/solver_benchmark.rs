use clap::Parser;
use eight_puzzle_solver::engine::Board;
use eight_puzzle_solver::genetic::{solve_puzzle_genetic_with_rng, GeneticConfig, NoProgress};
use eight_puzzle_solver::solver::{search_astar, MAX_CLOSED_STATES};
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Compare A* and the genetic solver on random boards",
    long_about = None
)]
struct Args {
    /// Number of random solvable boards to evaluate
    #[clap(short, long, default_value_t = 20)]
    boards: u64,

    /// Seed of the first board; board i uses seed + i
    #[clap(long, default_value_t = 0)]
    start_seed: u64,

    #[clap(long, default_value_t = 100)]
    population: usize,

    #[clap(long, default_value_t = 200)]
    generations: u32,

    #[clap(long, default_value_t = 0.05)]
    mutation_rate: f64,

    #[clap(long, default_value_t = 0.8)]
    crossover_rate: f64,

    #[clap(long, default_value_t = 2)]
    elitism: usize,

    #[clap(long, default_value_t = 50)]
    genome_length: usize,
}

#[derive(Default)]
struct Tally {
    solved: u32,
    total_moves: usize,
    elapsed: Duration,
}

impl Tally {
    fn record(&mut self, moves: Option<usize>, elapsed: Duration) {
        self.elapsed += elapsed;
        if let Some(moves) = moves {
            self.solved += 1;
            self.total_moves += moves;
        }
    }

    fn report(&self, name: &str, boards: u64) {
        let average_moves = if self.solved == 0 {
            0.0
        } else {
            self.total_moves as f64 / self.solved as f64
        };
        println!(
            "{:<8}: solved {:>3}/{:<3}, average moves {:>6.2}, total time {:>8.2?}",
            name, self.solved, boards, average_moves, self.elapsed
        );
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = GeneticConfig::default()
        .with_population_size(args.population)
        .with_max_generations(args.generations)
        .with_mutation_rate(args.mutation_rate)
        .with_crossover_rate(args.crossover_rate)
        .with_elitism_count(args.elitism)
        .with_genome_length(args.genome_length);

    println!("Starting solver comparison for {} boards...", args.boards);

    let mut astar = Tally::default();
    let mut genetic = Tally::default();
    let mut genetic_excess = 0usize;

    for board_idx in 0..args.boards {
        let seed = args.start_seed + board_idx;
        let board = Board::new_random_with_seed(seed);
        println!("\nBoard {} (Seed: {})\n{}", board_idx, seed, board);

        let started = Instant::now();
        let outcome = search_astar(&board, MAX_CLOSED_STATES);
        astar.record(outcome.move_count(), started.elapsed());
        debug!("A* closed {} boards", outcome.expanded);

        let mut rng = SmallRng::seed_from_u64(seed);
        let started = Instant::now();
        let best = solve_puzzle_genetic_with_rng(&board, &config, &mut rng, &mut NoProgress);
        let genetic_moves = best
            .as_ref()
            .filter(|best| best.reached_goal())
            .map(|best| best.move_count());
        genetic.record(genetic_moves, started.elapsed());

        if let (Some(a), Some(g)) = (outcome.move_count(), genetic_moves) {
            genetic_excess += g.saturating_sub(a);
        }

        let describe = |moves: Option<usize>| match moves {
            Some(m) => format!("{} moves", m),
            None => "unsolved".to_string(),
        };
        println!(
            "  A*: {:<10} Genetic: {}",
            describe(outcome.move_count()),
            describe(genetic_moves)
        );
        if let Some(best) = &best {
            if !best.reached_goal() {
                info!(
                    "board {}: genetic best ended {} away from the goal",
                    board_idx,
                    best.final_distance()
                );
            }
        }
    }

    println!("\n--- Comparison Complete ---");
    astar.report("A*", args.boards);
    genetic.report("Genetic", args.boards);
    println!(
        "Extra moves taken by the genetic solver where both succeeded: {}",
        genetic_excess
    );
}
