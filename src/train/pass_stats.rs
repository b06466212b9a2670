/// Statistics of one pass over the training set, emitted by `train_loop`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the loop
/// sends one `PassStats` value at the end of every completed pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PassStats {
    /// 1-based pass number.
    pub pass: usize,
    /// Total passes requested, `None` when running until stopped.
    pub total_passes: Option<usize>,
    /// Score of the first sample of the pass, before its update.
    pub first_score: f64,
    /// Mean score over all samples of the pass.
    pub mean_score: f64,
    pub min_score: f64,
    pub max_score: f64,
    /// Wall-clock duration of the pass in milliseconds.
    pub elapsed_ms: u64,
}
