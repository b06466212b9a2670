use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};

use crate::train::pass_stats::PassStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `passes`              — number of full passes over the data; `None` runs
///                           until stopped
/// - `report_every`        — log a summary every this many passes (`0` never)
/// - `low_score_threshold` — log the input and output of any step scoring
///                           below this value
/// - `progress_tx`         — optional channel sender; one `PassStats` is sent
///                           per completed pass.  If the receiver is dropped
///                           the loop terminates early.
/// - `stop_flag`           — optional atomic flag; when set to `true` from
///                           another thread the loop ends after the current
///                           pass.
pub struct TrainConfig {
    pub passes: Option<usize>,
    pub report_every: usize,
    pub low_score_threshold: Option<f64>,
    pub progress_tx: Option<mpsc::Sender<PassStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` that reports every pass, with no
    /// progress channel and no stop flag.
    pub fn new(passes: Option<usize>) -> Self {
        TrainConfig {
            passes,
            report_every: 1,
            low_score_threshold: None,
            progress_tx: None,
            stop_flag: None,
        }
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig::new(None)
    }
}
