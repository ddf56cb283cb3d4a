//! Quick search performance test

use knight_tour::schema::SearchConfig;
use knight_tour::search::SearchEngine;
use std::time::Instant;

fn main() {
    println!("=== Search Performance Test ===\n");

    for population_size in [20, 50, 100, 200] {
        println!("Population size: {}", population_size);

        let config = SearchConfig {
            population_size,
            max_generations: Some(2_000),
            random_seed: Some(42),
            ..Default::default()
        };

        let start = Instant::now();
        let mut engine = SearchEngine::new(config);
        let result = engine.run();
        let elapsed = start.elapsed();

        let generations_per_sec = result.stats.generations as f64 / elapsed.as_secs_f64();

        println!("  Generations:    {}", result.stats.generations);
        println!("  Decodes:        {}", result.stats.total_decodes);
        println!("  Elapsed:        {:.2}s", elapsed.as_secs_f64());
        println!("  Gens/sec:       {:.1}", generations_per_sec);
        println!("  Decodes/sec:    {:.0}", result.stats.decodes_per_second);
        println!("  Best fitness:   {}/64", result.stats.best_fitness);
        println!("  Stop reason:    {:?}", result.stats.stop_reason);
        println!();
    }
}
