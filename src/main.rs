//! Demo driver: trains a network online as an autoencoder over random
//! one-hot samples, pass after pass.
//!
//! Run with:
//!   cargo run --release -- --layers 10,8,8,10 --samples 3000
//! Omit `--passes` to train until the process is killed.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use online_nn::network::report::{format_biases, format_weights};
use online_nn::{one_hot_samples, train_loop, LayerTable, Network, Sgd, TrainConfig, UpdateOrder};

#[derive(Parser, Debug)]
#[command(name = "online-nn")]
#[command(about = "Train a sigmoid network online on random one-hot samples")]
struct Args {
    /// Layer sizes from input to output; input and output must match
    #[arg(short, long, value_delimiter = ',', default_value = "10,8,8,10")]
    layers: Vec<usize>,

    /// Number of one-hot samples in the training set
    #[arg(short, long, default_value_t = 3000)]
    samples: usize,

    /// RNG seed; drawn from entropy when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Gradient-descent step size
    #[arg(long, default_value_t = 1.0)]
    learning_rate: f64,

    /// accumulated or immediate
    #[arg(long, default_value_t = UpdateOrder::Accumulated)]
    update_order: UpdateOrder,

    /// Passes over the training set; runs forever when omitted
    #[arg(short, long)]
    passes: Option<usize>,

    /// Log a summary every N passes
    #[arg(long, default_value_t = 1)]
    report_every: usize,

    /// Log input and output of any step scoring below this value
    #[arg(long, default_value_t = 3.0)]
    show_below: f64,

    /// Start from a network saved with --save instead of --layers
    #[arg(long, conflicts_with = "layers")]
    load: Option<PathBuf>,

    /// Save the trained network here after a bounded run
    #[arg(long)]
    save: Option<PathBuf>,

    /// Print weight and bias state before training
    #[arg(long)]
    dump: bool,

    /// Log filter, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let network = match &args.load {
        Some(path) => Network::load_json(path)
            .with_context(|| format!("failed to load network from {}", path.display()))?,
        None => Network::with_sizes(&args.layers, &mut rng),
    };
    let mut network = network
        .with_optimizer(Sgd::new(args.learning_rate))
        .with_update_order(args.update_order);

    let sizes = network.layer_sizes();
    let (Some(&input), Some(&output)) = (sizes.first(), sizes.last()) else {
        bail!("network has no layers");
    };
    if input != output {
        bail!("autoencoder demo needs equal input and output sizes, got {input} and {output}");
    }

    print!("{}", LayerTable(&network));
    if args.dump {
        print!("{}", format_weights(&network));
        print!("{}", format_biases(&network));
    }

    let samples = one_hot_samples(args.samples, input, &mut rng);
    if samples.is_empty() {
        bail!("no training samples: need --samples > 0 and a non-empty input layer");
    }

    info!(
        samples = samples.len(),
        learning_rate = args.learning_rate,
        update_order = %args.update_order,
        "starting training"
    );

    let mut config = TrainConfig::new(args.passes);
    config.report_every = args.report_every;
    config.low_score_threshold = Some(args.show_below);

    let last = train_loop(&mut network, &samples, &samples, &config)
        .context("training step failed")?;

    if let Some(stats) = last {
        println!(
            "Finished {} passes: mean score {:.6} (min {:.6}, max {:.6})",
            stats.pass, stats.mean_score, stats.min_score, stats.max_score
        );
    }

    if let Some(path) = &args.save {
        network
            .save_json(path)
            .with_context(|| format!("failed to save network to {}", path.display()))?;
        println!("Saved network to {}", path.display());
    }

    Ok(())
}
