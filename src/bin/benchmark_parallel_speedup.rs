//! Run the Monte Carlo simulator on one worker and on all cores, then print timings and speedup.
//!
//! Usage: cargo run --release --bin benchmark_parallel_speedup [attackers] [defenders] [trials]

use std::env;
use std::time::Instant;

use risk_odds::parallel::{run_simulation_batches, WorkerPool};
use risk_odds::simulator::BattleParams;

fn main() {
    let args: Vec<String> = env::args().collect();
    let arg = |index: usize, default: &str| args.get(index).cloned().unwrap_or(default.to_string());
    let params = match BattleParams::parse(&arg(1, "30"), &arg(2, "25"), &arg(3, "200000")) {
        Ok(params) => params,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };
    let seed = 12345u64;

    println!(
        "Monte Carlo: {} v {} x {} trials",
        params.attackers(),
        params.defenders(),
        params.trials()
    );
    println!();

    let timed = |pool: WorkerPool| {
        let t0 = Instant::now();
        let result = run_simulation_batches(&params, seed, &pool);
        (result, t0.elapsed())
    };

    let (single, elapsed_single) = timed(WorkerPool::with_workers(1));
    let (all, elapsed_all) = timed(WorkerPool::default_workers());
    let (single, all) = match (single, all) {
        (Ok(single), Ok(all)) => (single, all),
        (Err(err), _) | (_, Err(err)) => {
            eprintln!("worker pool error: {err}");
            std::process::exit(1);
        }
    };

    let trials = params.trials() as f64;
    let single_ms = elapsed_single.as_secs_f64() * 1000.0;
    let all_ms = elapsed_all.as_secs_f64() * 1000.0;
    println!("1 worker:    {:.2} ms  ({:.1} battles/s)", single_ms, trials / elapsed_single.as_secs_f64());
    println!(
        "{} workers:  {:.2} ms  ({:.1} battles/s)",
        rayon::current_num_threads(),
        all_ms,
        trials / elapsed_all.as_secs_f64()
    );

    println!();
    println!("Speedup:     {:.2}x faster (all cores vs one)", single_ms / all_ms);

    assert_eq!(single, all, "worker count must not change results");
    println!("(Results match across worker counts)");
}
