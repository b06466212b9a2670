use std::sync::atomic::Ordering;
use std::time::Instant;

use tracing::info;

use crate::error::Result;
use crate::network::network::Network;
use crate::network::report::format_values;
use crate::train::pass_stats::PassStats;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Repeatedly runs online passes over the dataset, the way the demo driver
/// does, and returns the statistics of the **last completed pass**.
///
/// # Arguments
/// - `network` — mutable reference to the network; modified in place
/// - `inputs`  — training samples, each of input-layer length
/// - `targets` — corresponding targets, each of output-layer length
/// - `config`  — pass count, reporting, optional progress channel and stop flag
///
/// # Termination
/// With `config.passes == None` the loop only ends when:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
///
/// # Panics
/// Panics if `inputs` is empty or lengths mismatch.
pub fn train_loop(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    config: &TrainConfig,
) -> Result<Option<PassStats>> {
    assert!(!inputs.is_empty(), "inputs must not be empty");
    assert_eq!(
        inputs.len(),
        targets.len(),
        "inputs and targets must have equal length"
    );

    let mut last = None;
    let mut pass = 0;

    loop {
        if config.passes.is_some_and(|total| pass >= total) || stop_requested(config) {
            break;
        }
        pass += 1;

        let stats = run_one_pass(network, inputs, targets, pass, config)?;

        if config.report_every > 0 && pass % config.report_every == 0 {
            info!(
                pass,
                first = stats.first_score,
                mean = stats.mean_score,
                min = stats.min_score,
                max = stats.max_score,
                elapsed_ms = stats.elapsed_ms,
                "pass complete"
            );
        }

        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats.clone()).is_err() {
                last = Some(stats);
                break;
            }
        }
        last = Some(stats);
    }

    Ok(last)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn stop_requested(config: &TrainConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::Relaxed))
}

/// One `execute` per sample, in dataset order, collecting score statistics.
fn run_one_pass(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    pass: usize,
    config: &TrainConfig,
) -> Result<PassStats> {
    let t_start = Instant::now();
    let mut first_score = None;
    let mut total = 0.0;
    let mut min_score = f64::INFINITY;
    let mut max_score = f64::NEG_INFINITY;

    for (input, target) in inputs.iter().zip(targets.iter()) {
        let score = network.execute(input, target)?;

        if config.low_score_threshold.is_some_and(|threshold| score < threshold) {
            info!(
                score,
                input = %format_values(input),
                output = %format_values(&network.output()),
                "low score"
            );
        }

        first_score.get_or_insert(score);
        total += score;
        min_score = min_score.min(score);
        max_score = max_score.max(score);
    }

    Ok(PassStats {
        pass,
        total_passes: config.passes,
        first_score: first_score.unwrap_or(0.0),
        mean_score: total / inputs.len() as f64,
        min_score,
        max_score,
        elapsed_ms: t_start.elapsed().as_millis() as u64,
    })
}
