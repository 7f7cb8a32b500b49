//! Genetic search over fixed-length move sequences.
//!
//! Each candidate is a chromosome of [`Move`]s that is replayed from the
//! starting board. Fitness rewards reaching the goal in few moves and, failing
//! that, ending close to it. A generation is ranked by fitness, the fittest
//! `elitism_count` chromosomes survive unchanged, and the rest of the next
//! generation is bred with tournament selection, single-point crossover and
//! per-gene mutation.
//!
//! Chromosomes and their evaluations are kept apart: a generation owns its
//! chromosomes, and [`evaluate`] is a pure function producing an
//! [`Evaluation`] for each of them. Nothing survives between calls.
//!
//! The genome length bounds how many slides a candidate can make. Boards whose
//! shortest solution is long may need a larger `genome_length` before the
//! solver can reach the goal at all.
use crate::engine::{Board, Move};
use crate::heuristics::{manhattan_distance, tiles_out_of_place};
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::ops::ControlFlow;

/// Default number of genes per chromosome.
pub const GENOME_LENGTH: usize = 50;

/// Number of contestants drawn (with replacement) for each parent.
pub const TOURNAMENT_SIZE: usize = 5;

/// Fitness of a chromosome that reaches the goal with zero moves. Each move
/// made on the way costs one point.
pub const GOAL_FITNESS: f64 = 10_000.0;

const BASE_FITNESS: f64 = 1_000.0;
const DISTANCE_WEIGHT: f64 = 10.0;
const MISPLACED_WEIGHT: f64 = 5.0;
const PROGRESS_BONUS: f64 = 10.0;

/// Parameters for one genetic run.
///
/// Values are used as given. An `elitism_count` larger than the population
/// keeps the whole population; rates outside `[0, 1]` act like the nearest bound.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneticConfig {
    pub population_size: usize,
    pub max_generations: u32,
    /// Per-gene probability of being redrawn.
    pub mutation_rate: f64,
    /// Probability that an offspring mixes two parents instead of cloning the first.
    pub crossover_rate: f64,
    /// Fittest chromosomes copied unchanged into the next generation.
    pub elitism_count: usize,
    pub genome_length: usize,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            mutation_rate: 0.05,
            crossover_rate: 0.8,
            elitism_count: 2,
            genome_length: GENOME_LENGTH,
        }
    }
}

impl GeneticConfig {
    /// Same as [`GeneticConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of individuals per generation.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, generations: u32) -> Self {
        self.max_generations = generations;
        self
    }

    /// Sets the per-gene mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets how many of the fittest chromosomes survive unchanged.
    pub fn with_elitism_count(mut self, count: usize) -> Self {
        self.elitism_count = count;
        self
    }

    /// Sets the number of genes per chromosome.
    pub fn with_genome_length(mut self, length: usize) -> Self {
        self.genome_length = length;
        self
    }
}

/// Outcome of replaying one chromosome from a starting board.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub fitness: f64,
    /// Boards visited, starting with the initial board. Blocked genes add nothing.
    pub path: Vec<Board>,
    /// Moves that were actually applied, one per step of `path`.
    pub moves: Vec<Move>,
    pub reached_goal: bool,
    /// Manhattan distance of the last board in `path`.
    pub final_distance: u32,
}

impl Evaluation {
    /// Number of slides actually applied.
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }
}

/// Replays `chromosome` from `initial` and scores the result.
///
/// Genes naming a slide that would leave the grid are skipped. Replay stops as
/// soon as the goal is reached. A goal-reaching replay scores
/// `GOAL_FITNESS - moves`; any other scores
/// `1000 - 10 * distance - 5 * misplaced - moves + progress`, where `progress`
/// grows by 10 every time the replay reaches a new lowest Manhattan distance.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::{Board, Move, GOAL_STATE};
/// use eight_puzzle_solver::genetic::evaluate;
///
/// let board = Board::new([1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
/// let evaluation = evaluate(&[Move::Down, Move::Right, Move::Up], &board);
/// assert!(evaluation.reached_goal);
/// assert_eq!(evaluation.fitness, 9_999.0);
/// assert_eq!(evaluation.path, vec![board, GOAL_STATE]);
/// ```
pub fn evaluate(chromosome: &[Move], initial: &Board) -> Evaluation {
    let mut current = *initial;
    let mut path = vec![current];
    let mut moves = Vec::new();
    let mut lowest_distance = manhattan_distance(&current);
    let mut progress = 0.0;

    for &gene in chromosome {
        if current.is_goal() {
            break;
        }
        let Some(next) = current.apply_move(gene) else {
            continue;
        };
        current = next;
        path.push(current);
        moves.push(gene);

        let distance = manhattan_distance(&current);
        if distance < lowest_distance {
            lowest_distance = distance;
            progress += PROGRESS_BONUS;
        }
    }

    let reached_goal = current.is_goal();
    let final_distance = manhattan_distance(&current);
    let move_count = moves.len() as f64;
    let fitness = if reached_goal {
        GOAL_FITNESS - move_count
    } else {
        BASE_FITNESS
            - DISTANCE_WEIGHT * final_distance as f64
            - MISPLACED_WEIGHT * tiles_out_of_place(&current) as f64
            - move_count
            + progress
    };

    Evaluation {
        fitness,
        path,
        moves,
        reached_goal,
        final_distance,
    }
}

/// A chromosome together with its evaluation against a particular start board.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    chromosome: Vec<Move>,
    evaluation: Evaluation,
}

impl Individual {
    /// Evaluates `chromosome` from `initial`.
    pub fn new(chromosome: Vec<Move>, initial: &Board) -> Self {
        let evaluation = evaluate(&chromosome, initial);
        Individual {
            chromosome,
            evaluation,
        }
    }

    /// The genes as drawn, blocked ones included.
    pub fn chromosome(&self) -> &[Move] {
        &self.chromosome
    }

    /// The full replay result.
    pub fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }

    /// Fitness score; higher is better.
    pub fn fitness(&self) -> f64 {
        self.evaluation.fitness
    }

    /// Boards visited during replay, starting with the initial board.
    pub fn path(&self) -> &[Board] {
        &self.evaluation.path
    }

    /// Moves applied during replay.
    pub fn moves(&self) -> &[Move] {
        &self.evaluation.moves
    }

    /// Whether the replay ended on `GOAL_STATE`.
    pub fn reached_goal(&self) -> bool {
        self.evaluation.reached_goal
    }

    /// Manhattan distance of the last board reached.
    pub fn final_distance(&self) -> u32 {
        self.evaluation.final_distance
    }

    /// Number of slides along the path.
    pub fn move_count(&self) -> usize {
        self.evaluation.move_count()
    }
}

/// Receives the best individual of every generation.
///
/// Called synchronously between generations; returning `ControlFlow::Break`
/// ends the run, and the solver returns the best individual seen so far.
pub trait GenerationObserver {
    fn on_generation(
        &mut self,
        generation: u32,
        best_fitness: f64,
        best: &Individual,
    ) -> ControlFlow<()>;
}

impl<F> GenerationObserver for F
where
    F: FnMut(u32, f64, &Individual) -> ControlFlow<()>,
{
    fn on_generation(
        &mut self,
        generation: u32,
        best_fitness: f64,
        best: &Individual,
    ) -> ControlFlow<()> {
        self(generation, best_fitness, best)
    }
}

/// Observer that never interrupts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl GenerationObserver for NoProgress {
    fn on_generation(&mut self, _: u32, _: f64, _: &Individual) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Draws `length` directions uniformly at random.
pub fn random_chromosome(rng: &mut impl Rng, length: usize) -> Vec<Move> {
    (0..length).map(|_| Move::random(rng)).collect()
}

/// Draws [`TOURNAMENT_SIZE`] indices uniformly with replacement and returns
/// the one with the highest fitness. Earlier draws win ties.
///
/// # Panics
/// Panics if `fitnesses` is empty.
pub fn tournament_select(fitnesses: &[f64], rng: &mut impl Rng) -> usize {
    let mut best = rng.gen_range(0..fitnesses.len());
    for _ in 1..TOURNAMENT_SIZE {
        let contender = rng.gen_range(0..fitnesses.len());
        if fitnesses[contender] > fitnesses[best] {
            best = contender;
        }
    }
    best
}

/// Single-point crossover applied with probability `rate`.
///
/// When applied, a point is drawn from `[0, min(len1, len2))` and the child is
/// `parent1[..point]` followed by `parent2[point..]`, so it has `parent2`'s
/// length. Otherwise, or when either parent is empty, the child is a copy of
/// `parent1`.
pub fn crossover(parent1: &[Move], parent2: &[Move], rate: f64, rng: &mut impl Rng) -> Vec<Move> {
    if rng.gen::<f64>() >= rate {
        return parent1.to_vec();
    }
    let limit = parent1.len().min(parent2.len());
    if limit == 0 {
        return parent1.to_vec();
    }
    let point = rng.gen_range(0..limit);
    let mut child = Vec::with_capacity(parent2.len());
    child.extend_from_slice(&parent1[..point]);
    child.extend_from_slice(&parent2[point..]);
    child
}

/// Redraws each gene uniformly at random with probability `rate`.
pub fn mutate(chromosome: &mut [Move], rate: f64, rng: &mut impl Rng) {
    for gene in chromosome.iter_mut() {
        if rng.gen::<f64>() < rate {
            *gene = Move::random(rng);
        }
    }
}

/// One evaluated generation. Evaluations share indices with the chromosomes
/// they describe; `ranking` lists those indices by descending fitness.
struct RankedGeneration<'a> {
    chromosomes: &'a [Vec<Move>],
    evaluations: Vec<Evaluation>,
    ranking: Vec<usize>,
}

impl<'a> RankedGeneration<'a> {
    fn evaluate(chromosomes: &'a [Vec<Move>], initial: &Board) -> Self {
        let evaluations: Vec<Evaluation> = chromosomes
            .iter()
            .map(|chromosome| evaluate(chromosome, initial))
            .collect();
        let mut ranking: Vec<usize> = (0..chromosomes.len()).collect();
        ranking.sort_by(|&a, &b| evaluations[b].fitness.total_cmp(&evaluations[a].fitness));
        RankedGeneration {
            chromosomes,
            evaluations,
            ranking,
        }
    }

    fn best(&self) -> Option<Individual> {
        let &index = self.ranking.first()?;
        Some(Individual {
            chromosome: self.chromosomes[index].clone(),
            evaluation: self.evaluations[index].clone(),
        })
    }

    fn breed(&self, config: &GeneticConfig, rng: &mut impl Rng) -> Vec<Vec<Move>> {
        let target = config.population_size;
        let mut next: Vec<Vec<Move>> = Vec::with_capacity(target);

        for &index in self.ranking.iter().take(config.elitism_count.min(target)) {
            next.push(self.chromosomes[index].clone());
        }

        let fitnesses: Vec<f64> = self.evaluations.iter().map(|e| e.fitness).collect();
        while next.len() < target {
            let first = tournament_select(&fitnesses, rng);
            let second = tournament_select(&fitnesses, rng);
            let mut child = crossover(
                &self.chromosomes[first],
                &self.chromosomes[second],
                config.crossover_rate,
                rng,
            );
            mutate(&mut child, config.mutation_rate, rng);
            next.push(child);
        }
        next
    }
}

/// Runs the genetic solver with an entropy-seeded generator.
///
/// See [`solve_puzzle_genetic_with_rng`].
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::GOAL_STATE;
/// use eight_puzzle_solver::genetic::{solve_puzzle_genetic, GeneticConfig, NoProgress};
///
/// let config = GeneticConfig::default();
/// let best = solve_puzzle_genetic(&GOAL_STATE, &config, &mut NoProgress).unwrap();
/// assert!(best.reached_goal());
/// assert_eq!(best.move_count(), 0);
/// ```
pub fn solve_puzzle_genetic(
    initial: &Board,
    config: &GeneticConfig,
    observer: &mut impl GenerationObserver,
) -> Option<Individual> {
    let mut rng = SmallRng::from_entropy();
    solve_puzzle_genetic_with_rng(initial, config, &mut rng, observer)
}

/// Evolves move sequences from `initial` toward `GOAL_STATE`.
///
/// Returns the first top-ranked individual that reaches the goal. If no
/// generation produces one before `max_generations` runs out (or the observer
/// stops the run), returns the fittest individual seen in any generation;
/// check [`Individual::reached_goal`] before treating its path as a solution.
/// Returns `None` only for an empty population.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::{Board, GOAL_STATE};
/// use eight_puzzle_solver::genetic::{solve_puzzle_genetic_with_rng, GeneticConfig, NoProgress};
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
///
/// let start = Board::new([1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
/// let config = GeneticConfig::default().with_max_generations(100);
/// let mut rng = SmallRng::seed_from_u64(7);
/// let best = solve_puzzle_genetic_with_rng(&start, &config, &mut rng, &mut NoProgress).unwrap();
/// assert!(best.reached_goal());
/// assert_eq!(best.path().last(), Some(&GOAL_STATE));
/// ```
pub fn solve_puzzle_genetic_with_rng(
    initial: &Board,
    config: &GeneticConfig,
    rng: &mut impl Rng,
    observer: &mut impl GenerationObserver,
) -> Option<Individual> {
    if config.population_size == 0 {
        return None;
    }

    info!(
        "Genetic search: population {}, up to {} generations, genome length {}",
        config.population_size, config.max_generations, config.genome_length
    );

    let mut chromosomes: Vec<Vec<Move>> = (0..config.population_size)
        .map(|_| random_chromosome(rng, config.genome_length))
        .collect();
    let mut best_ever: Option<Individual> = None;

    for generation in 0..config.max_generations {
        let ranked = RankedGeneration::evaluate(&chromosomes, initial);
        let best = ranked.best()?;
        debug!(
            "Generation {}: best fitness {}, distance {}",
            generation,
            best.fitness(),
            best.final_distance()
        );

        if best_ever
            .as_ref()
            .map_or(true, |champion| best.fitness() > champion.fitness())
        {
            best_ever = Some(best.clone());
        }

        if observer
            .on_generation(generation, best.fitness(), &best)
            .is_break()
        {
            info!("Genetic search stopped by observer at generation {}", generation);
            break;
        }

        if best.reached_goal() {
            info!(
                "Genetic search reached the goal in {} moves at generation {}",
                best.move_count(),
                generation
            );
            return Some(best);
        }

        let next = ranked.breed(config, rng);
        chromosomes = next;
    }

    // Evaluation is pure, so the stored path of the best-ever individual is
    // already what a fresh replay would produce.
    let best = best_ever.or_else(|| RankedGeneration::evaluate(&chromosomes, initial).best());
    if let Some(best) = &best {
        info!(
            "Genetic search finished without success: best fitness {}, distance {}",
            best.fitness(),
            best.final_distance()
        );
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GOAL_STATE;
    use crate::utils::moves_between;

    fn board(cells: [u8; 9]) -> Board {
        Board::new(cells).unwrap()
    }

    fn seeded(seed: u64) -> SmallRng {
        SmallRng::seed_from_u64(seed)
    }

    #[test]
    fn test_evaluate_goal_board() {
        let evaluation = evaluate(&[Move::Up, Move::Left], &GOAL_STATE);
        assert!(evaluation.reached_goal);
        assert_eq!(evaluation.fitness, GOAL_FITNESS);
        assert_eq!(evaluation.path, vec![GOAL_STATE]);
        assert_eq!(evaluation.move_count(), 0);
        assert_eq!(evaluation.final_distance, 0);
    }

    #[test]
    fn test_evaluate_stops_at_goal() {
        let start = board([1, 2, 3, 4, 5, 6, 7, 0, 8]);
        let evaluation = evaluate(&[Move::Right, Move::Up, Move::Up, Move::Left], &start);
        assert!(evaluation.reached_goal);
        assert_eq!(evaluation.moves, vec![Move::Right]);
        assert_eq!(evaluation.path, vec![start, GOAL_STATE]);
        assert_eq!(evaluation.fitness, GOAL_FITNESS - 1.0);
    }

    #[test]
    fn test_evaluate_goal_on_last_gene() {
        let start = board([1, 2, 3, 4, 5, 6, 7, 0, 8]);
        let evaluation = evaluate(&[Move::Right], &start);
        assert!(evaluation.reached_goal);
        assert_eq!(evaluation.fitness, GOAL_FITNESS - 1.0);
    }

    #[test]
    fn test_evaluate_skips_blocked_genes() {
        let start = board([1, 2, 3, 4, 5, 6, 7, 0, 8]);
        let evaluation = evaluate(&[Move::Down, Move::Down, Move::Right], &start);
        assert!(evaluation.reached_goal);
        assert_eq!(evaluation.move_count(), 1);
        assert_eq!(evaluation.path.len(), 2);
        assert_eq!(evaluation.fitness, 9_999.0);
    }

    #[test]
    fn test_evaluate_failure_formula() {
        let start = board([1, 2, 3, 4, 5, 6, 7, 0, 8]);
        let evaluation = evaluate(&[Move::Left], &start);
        assert!(!evaluation.reached_goal);
        assert_eq!(evaluation.final_distance, 2);
        // 1000 - 10 * 2 - 5 * 2 - 1 + 0
        assert_eq!(evaluation.fitness, 969.0);
    }

    #[test]
    fn test_evaluate_progress_bonus_only_on_new_minimum() {
        let start = board([1, 2, 3, 4, 5, 6, 0, 7, 8]);
        let evaluation = evaluate(&[Move::Up, Move::Down, Move::Right], &start);
        assert!(!evaluation.reached_goal);
        assert_eq!(evaluation.move_count(), 3);
        assert_eq!(evaluation.final_distance, 1);
        // 1000 - 10 * 1 - 5 * 1 - 3 + 10
        assert_eq!(evaluation.fitness, 992.0);
        assert_eq!(moves_between(&evaluation.path), Some(evaluation.moves.clone()));
    }

    #[test]
    fn test_failures_never_reach_goal_fitness() {
        let unsolvable = board([1, 2, 3, 4, 5, 6, 8, 7, 0]);
        let mut rng = seeded(11);
        for _ in 0..200 {
            let chromosome = random_chromosome(&mut rng, GENOME_LENGTH);
            let individual = Individual::new(chromosome, &unsolvable);
            assert!(!individual.reached_goal());
            assert!(individual.fitness() < GOAL_FITNESS);
        }
    }

    #[test]
    fn test_goal_fitness_matches_move_count() {
        let start = Board::scrambled(&mut seeded(5), 6);
        let mut rng = seeded(6);
        for _ in 0..500 {
            let individual = Individual::new(random_chromosome(&mut rng, GENOME_LENGTH), &start);
            if individual.reached_goal() {
                assert_eq!(individual.fitness(), GOAL_FITNESS - individual.move_count() as f64);
                assert_eq!(individual.path().last(), Some(&GOAL_STATE));
            } else {
                assert!(individual.fitness() < GOAL_FITNESS);
            }
        }
    }

    #[test]
    fn test_crossover_rate_zero_clones_first_parent() {
        let parent1 = vec![Move::Up; 10];
        let parent2 = vec![Move::Down; 10];
        let mut rng = seeded(1);
        for _ in 0..20 {
            assert_eq!(crossover(&parent1, &parent2, 0.0, &mut rng), parent1);
        }
    }

    #[test]
    fn test_crossover_takes_prefix_and_suffix() {
        let parent1 = vec![Move::Up; 10];
        let parent2 = vec![Move::Down; 10];
        let mut rng = seeded(2);
        for _ in 0..50 {
            let child = crossover(&parent1, &parent2, 1.0, &mut rng);
            assert_eq!(child.len(), 10);
            let point = child.iter().take_while(|&&mv| mv == Move::Up).count();
            assert!(point < 10);
            assert!(child[point..].iter().all(|&mv| mv == Move::Down));
        }
    }

    #[test]
    fn test_crossover_length_follows_second_parent() {
        let mut rng = seeded(3);
        let long = vec![Move::Left; 12];
        let short = vec![Move::Right; 5];
        for _ in 0..50 {
            let child = crossover(&long, &short, 1.0, &mut rng);
            assert_eq!(child.len(), short.len());
            let child = crossover(&short, &long, 1.0, &mut rng);
            assert_eq!(child.len(), long.len());
            assert!(child[5..].iter().all(|&mv| mv == Move::Left));
        }
        assert_eq!(crossover(&[], &long, 1.0, &mut rng), Vec::<Move>::new());
    }

    #[test]
    fn test_mutation_rates() {
        let original = vec![Move::Up; GENOME_LENGTH];
        let mut rng = seeded(4);

        let mut untouched = original.clone();
        mutate(&mut untouched, 0.0, &mut rng);
        assert_eq!(untouched, original);

        let mut redrawn = original.clone();
        mutate(&mut redrawn, 1.0, &mut rng);
        assert_ne!(redrawn, original);
        let changed = redrawn.iter().filter(|&&mv| mv != Move::Up).count();
        assert!(changed >= 20, "only {} of {} genes changed", changed, GENOME_LENGTH);
    }

    #[test]
    fn test_tournament_select_favors_fitter() {
        let fitnesses: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let mut rng = seeded(8);
        let trials = 2_000;
        let total: f64 = (0..trials)
            .map(|_| fitnesses[tournament_select(&fitnesses, &mut rng)])
            .sum();
        let mean_selected = total / trials as f64;
        assert!(mean_selected > 12.0, "mean selected fitness {}", mean_selected);
        assert_eq!(tournament_select(&[42.0], &mut rng), 0);
    }

    #[test]
    fn test_breed_keeps_size_and_elite_prefix() {
        let start = board([1, 2, 3, 4, 5, 6, 8, 7, 0]);
        let mut rng = seeded(17);
        for &(population_size, elitism_count) in &[(7, 3), (10, 0), (5, 9), (1, 1), (6, 6)] {
            let chromosomes: Vec<Vec<Move>> = (0..population_size)
                .map(|_| random_chromosome(&mut rng, GENOME_LENGTH))
                .collect();
            let ranked = RankedGeneration::evaluate(&chromosomes, &start);
            let config = GeneticConfig::default()
                .with_population_size(population_size)
                .with_elitism_count(elitism_count)
                .with_mutation_rate(1.0);
            let next = ranked.breed(&config, &mut rng);

            assert_eq!(next.len(), population_size);
            let elites = elitism_count.min(population_size);
            for i in 0..elites {
                assert_eq!(next[i], chromosomes[ranked.ranking[i]]);
            }
            assert!(next.iter().all(|chromosome| chromosome.len() == GENOME_LENGTH));
        }
    }

    #[test]
    fn test_ranking_is_descending_by_fitness() {
        let start = Board::new_random_with_seed(3);
        let mut rng = seeded(18);
        let chromosomes: Vec<Vec<Move>> = (0..25)
            .map(|_| random_chromosome(&mut rng, GENOME_LENGTH))
            .collect();
        let ranked = RankedGeneration::evaluate(&chromosomes, &start);
        let ordered: Vec<f64> = ranked
            .ranking
            .iter()
            .map(|&i| ranked.evaluations[i].fitness)
            .collect();
        assert!(ordered.windows(2).all(|pair| pair[0] >= pair[1]));
        assert_eq!(ranked.best().map(|best| best.fitness()), ordered.first().copied());
    }

    #[test]
    fn test_solve_goal_board_immediately() {
        let mut calls = Vec::new();
        let mut observer = |generation: u32, fitness: f64, _: &Individual| {
            calls.push((generation, fitness));
            ControlFlow::Continue(())
        };
        let best = solve_puzzle_genetic_with_rng(
            &GOAL_STATE,
            &GeneticConfig::default(),
            &mut seeded(9),
            &mut observer,
        )
        .unwrap();
        assert!(best.reached_goal());
        assert_eq!(best.move_count(), 0);
        assert_eq!(best.path(), &[GOAL_STATE]);
        assert_eq!(calls, vec![(0, GOAL_FITNESS)]);
    }

    #[test_log::test]
    fn test_solve_easy_board() {
        let start = board([1, 2, 3, 4, 5, 6, 0, 7, 8]);
        let config = GeneticConfig::default()
            .with_population_size(100)
            .with_max_generations(100);
        let best = solve_puzzle_genetic_with_rng(&start, &config, &mut seeded(10), &mut NoProgress)
            .unwrap();
        assert!(best.reached_goal());
        assert_eq!(best.path().first(), Some(&start));
        assert_eq!(best.path().last(), Some(&GOAL_STATE));
        assert_eq!(best.fitness(), GOAL_FITNESS - best.move_count() as f64);
        assert_eq!(moves_between(best.path()).as_deref(), Some(best.moves()));
    }

    #[test]
    fn test_empty_population_returns_none() {
        let config = GeneticConfig::default().with_population_size(0);
        assert!(solve_puzzle_genetic(&GOAL_STATE, &config, &mut NoProgress).is_none());
    }

    #[test]
    fn test_zero_generations_returns_best_initial() {
        let start = board([1, 2, 3, 4, 5, 6, 8, 7, 0]);
        let config = GeneticConfig::default().with_max_generations(0);
        let mut calls = 0;
        let mut observer = |_: u32, _: f64, _: &Individual| {
            calls += 1;
            ControlFlow::Continue(())
        };
        let best = solve_puzzle_genetic_with_rng(&start, &config, &mut seeded(12), &mut observer);
        assert!(best.is_some());
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_elitism_keeps_best_fitness_monotonic() {
        let start = board([1, 2, 3, 4, 5, 6, 8, 7, 0]);
        let config = GeneticConfig::default()
            .with_population_size(30)
            .with_max_generations(40)
            .with_elitism_count(1);
        let mut history = Vec::new();
        let mut observer = |_: u32, fitness: f64, _: &Individual| {
            history.push(fitness);
            ControlFlow::Continue(())
        };
        let best = solve_puzzle_genetic_with_rng(&start, &config, &mut seeded(13), &mut observer)
            .unwrap();
        assert_eq!(history.len(), 40);
        assert!(history.windows(2).all(|pair| pair[1] >= pair[0]));
        assert!(!best.reached_goal());
        assert_eq!(best.fitness(), history[history.len() - 1]);
    }

    #[test]
    fn test_elitism_larger_than_population_is_clamped() {
        let start = board([1, 2, 3, 4, 5, 6, 8, 7, 0]);
        let config = GeneticConfig::default()
            .with_population_size(10)
            .with_max_generations(5)
            .with_elitism_count(50);
        let mut history = Vec::new();
        let mut observer = |_: u32, fitness: f64, _: &Individual| {
            history.push(fitness);
            ControlFlow::Continue(())
        };
        solve_puzzle_genetic_with_rng(&start, &config, &mut seeded(14), &mut observer).unwrap();
        assert_eq!(history.len(), 5);
        assert!(history.windows(2).all(|pair| pair[1] == pair[0]));
    }

    #[test]
    fn test_observer_can_stop_the_run() {
        let start = board([1, 2, 3, 4, 5, 6, 8, 7, 0]);
        let config = GeneticConfig::default().with_population_size(20);
        let mut generations = Vec::new();
        let mut observer = |generation: u32, _: f64, _: &Individual| {
            generations.push(generation);
            if generation == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        };
        let best = solve_puzzle_genetic_with_rng(&start, &config, &mut seeded(15), &mut observer);
        assert!(best.is_some());
        assert_eq!(generations, vec![0, 1, 2]);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let start = Board::new_random_with_seed(21);
        let config = GeneticConfig::default()
            .with_population_size(20)
            .with_max_generations(10);
        let first =
            solve_puzzle_genetic_with_rng(&start, &config, &mut seeded(16), &mut NoProgress);
        let second =
            solve_puzzle_genetic_with_rng(&start, &config, &mut seeded(16), &mut NoProgress);
        assert_eq!(first, second);
    }
}
