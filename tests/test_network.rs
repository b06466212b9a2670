// Integration tests for construction, forward pass, scoring, backpropagation
// and persistence of `Network`.

use approx::assert_relative_eq;
use online_nn::{
    sigmoid, train_loop, Network, NetworkError, Sgd, TrainConfig, UpdateOrder,
};
use online_nn::data::one_hot;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn weight_arrays_match_successor_sizes() {
    let configs: [&[usize]; 5] = [&[1, 1], &[2, 3], &[10, 8, 8, 10], &[4, 0, 2], &[5, 1, 7, 3]];
    for sizes in configs {
        let network = Network::with_sizes(sizes, &mut seeded(0));
        assert_eq!(network.len(), sizes.len());
        for (i, layer) in network.layers().iter().enumerate() {
            let expected = sizes.get(i + 1).map_or(0, |next| sizes[i] * next);
            assert_eq!(layer.weights().len(), expected, "layer {i} of {sizes:?}");
            assert_eq!(layer.len(), sizes[i]);
        }
    }
}

#[test]
fn new_layers_have_zero_biases_and_unit_interval_weights() {
    let network = Network::with_sizes(&[6, 5, 4], &mut seeded(1));
    for layer in network.layers() {
        assert!(layer.biases().iter().all(|&b| b == 0.0));
        assert!(layer.weights().as_slice().iter().all(|&w| (0.0..1.0).contains(&w)));
    }
}

#[test]
fn same_seed_builds_same_network() {
    let a = Network::with_sizes(&[3, 4, 2], &mut seeded(5));
    let b = Network::with_sizes(&[3, 4, 2], &mut seeded(5));
    assert_eq!(a.layers(), b.layers());
}

// ============================================================================
// Forward pass
// ============================================================================

#[test]
fn forward_is_deterministic() {
    let mut network = Network::with_sizes(&[4, 6, 3], &mut seeded(2));
    let input = [0.1, 0.9, -0.3, 0.5];
    let first = network.forward(&input).unwrap();
    let second = network.forward(&input).unwrap();
    assert_eq!(first, second);
}

#[test]
fn identity_pair_forward() {
    let mut network = Network::with_sizes(&[2, 2], &mut seeded(3));
    network.layer_mut(0).unwrap().set_weights(&[1.0, 0.0, 0.0, 1.0]).unwrap();

    let output = network.forward(&[0.5, -0.5]).unwrap();

    assert_eq!(network.layer(0).unwrap().weighted_sums(), vec![0.5, -0.5]);
    assert_relative_eq!(output[0], 0.6225, epsilon = 1e-4);
    assert_relative_eq!(output[1], 0.3775, epsilon = 1e-4);
    assert_relative_eq!(output[0], sigmoid(0.5));
}

#[test]
fn chain_of_single_neurons() {
    let mut network = Network::with_sizes(&[1, 1, 1], &mut seeded(4));
    for i in 0..2 {
        network.layer_mut(i).unwrap().set_weights(&[1.0]).unwrap();
    }

    let output = network.forward(&[0.0]).unwrap();
    assert_relative_eq!(network.layer(1).unwrap().activations()[0], 0.5);
    assert_relative_eq!(output[0], 0.6225, epsilon = 1e-4);

    let score = network.score(&[1.0]).unwrap();
    assert_relative_eq!(score, 0.1426, epsilon = 1e-4);
    assert_relative_eq!(score, (1.0 - sigmoid(0.5)).powi(2));

    // execute reports the same pre-update score
    assert_eq!(network.execute(&[0.0], &[1.0]).unwrap(), score);
}

// ============================================================================
// Scoring
// ============================================================================

#[test]
fn score_is_non_negative() {
    let mut rng = seeded(6);
    let mut network = Network::with_sizes(&[3, 4], &mut rng);
    for _ in 0..50 {
        let input: Vec<f64> = (0..3).map(|_| rng.gen_range(-5.0..5.0)).collect();
        let target: Vec<f64> = (0..4).map(|_| rng.gen_range(-2.0..2.0)).collect();
        network.forward(&input).unwrap();
        assert!(network.score(&target).unwrap() >= 0.0);
    }
}

#[test]
fn score_is_zero_when_target_equals_output() {
    let mut network = Network::with_sizes(&[2, 3], &mut seeded(7));
    let output = network.forward(&[0.2, 0.4]).unwrap();
    assert_eq!(network.score(&output).unwrap(), 0.0);

    let mut off = output.clone();
    off[1] += 1e-3;
    assert!(network.score(&off).unwrap() > 0.0);
}

// ============================================================================
// Backpropagation
// ============================================================================

#[test]
fn single_pair_step_decreases_score() {
    for seed in 0..25 {
        let mut rng = seeded(seed);
        let mut network = Network::with_sizes(&[4, 3], &mut rng);
        let input: Vec<f64> = (0..4).map(|_| rng.gen::<f64>()).collect();
        let target = one_hot(3, (seed % 3) as usize);

        let before = network.execute(&input, &target).unwrap();
        network.forward(&input).unwrap();
        let after = network.score(&target).unwrap();

        assert!(after < before, "seed {seed}: {after} >= {before}");
    }
}

#[test]
fn update_orders_agree_for_single_output() {
    let mut rng = seeded(8);
    let base = Network::with_sizes(&[5, 1], &mut rng);
    let input: Vec<f64> = (0..5).map(|_| rng.gen::<f64>()).collect();

    let mut accumulated = base.clone().with_update_order(UpdateOrder::Accumulated);
    let mut immediate = base.with_update_order(UpdateOrder::Immediate);
    for _ in 0..5 {
        accumulated.execute(&input, &[0.0]).unwrap();
        immediate.execute(&input, &[0.0]).unwrap();
    }

    assert_eq!(accumulated.layers(), immediate.layers());
}

#[test]
fn update_orders_differ_with_several_outputs() {
    let base = Network::with_sizes(&[2, 3], &mut seeded(9));
    let mut accumulated = base.clone();
    let mut immediate = base.with_update_order(UpdateOrder::Immediate);

    accumulated.execute(&[1.0, 0.5], &[0.0, 0.0, 0.0]).unwrap();
    immediate.execute(&[1.0, 0.5], &[0.0, 0.0, 0.0]).unwrap();

    // The first output neuron sees identical state in both orders; the later
    // ones read upstream activations already moved by the first.
    let a = accumulated.layer(0).unwrap().weights();
    let b = immediate.layer(0).unwrap().weights();
    assert_eq!(a.get(0, 0), b.get(0, 0));
    assert_ne!(a.get(0, 2), b.get(0, 2));
}

#[test]
fn backward_updates_hidden_activations() {
    let mut network = Network::with_sizes(&[2, 3, 2], &mut seeded(10));
    network.forward(&[1.0, 0.0]).unwrap();
    let hidden_before = network.layer(1).unwrap().activations();

    network.backward(&[0.0, 1.0]).unwrap();

    assert_ne!(network.layer(1).unwrap().activations(), hidden_before);
}

#[test]
fn learning_rate_scales_the_step() {
    let step = |lr: f64| {
        let mut network = Network::with_sizes(&[1, 1], &mut seeded(11)).with_optimizer(Sgd::new(lr));
        network.execute(&[1.0], &[0.0]).unwrap();
        network.layer(1).unwrap().biases()[0]
    };
    assert_relative_eq!(step(0.5) * 2.0, step(1.0));
    assert_eq!(Sgd::default(), Sgd::new(1.0));
}

#[test]
fn autoencoder_training_reduces_mean_score() {
    let mut network = Network::with_sizes(&[3, 3], &mut seeded(12));
    let data: Vec<Vec<f64>> = (0..3).map(|i| one_hot(3, i)).collect();

    let first = train_loop(&mut network, &data, &data, &TrainConfig::new(Some(1)))
        .unwrap()
        .unwrap();
    let last = train_loop(&mut network, &data, &data, &TrainConfig::new(Some(200)))
        .unwrap()
        .unwrap();

    assert_eq!(last.pass, 200);
    assert!(last.mean_score < first.mean_score / 2.0);
}

#[test]
fn deep_autoencoder_learns() {
    let mut rng = seeded(18);
    let mut network = Network::with_sizes(&[10, 8, 8, 10], &mut rng);
    let data = online_nn::one_hot_samples(300, 10, &mut rng);

    let first = train_loop(&mut network, &data, &data, &TrainConfig::new(Some(1)))
        .unwrap()
        .unwrap();
    let last = train_loop(&mut network, &data, &data, &TrainConfig::new(Some(30)))
        .unwrap()
        .unwrap();

    assert!(last.mean_score < first.mean_score / 2.0);
}

// ============================================================================
// Precondition failures
// ============================================================================

#[test]
fn execute_rejects_too_few_layers() {
    let mut empty = Network::new();
    assert!(matches!(empty.execute(&[], &[]), Err(NetworkError::Structure { layers: 0 })));

    let mut single = Network::with_sizes(&[2], &mut seeded(13));
    let before = single.layers().to_vec();
    assert!(matches!(
        single.execute(&[0.0, 0.0], &[0.0, 0.0]),
        Err(NetworkError::Structure { layers: 1 })
    ));
    assert_eq!(single.layers(), before.as_slice());
}

#[test]
fn execute_rejects_wrong_input_length_without_mutation() {
    let mut network = Network::with_sizes(&[3, 2, 2], &mut seeded(14));
    network.forward(&[0.1, 0.2, 0.3]).unwrap();
    let before = network.layers().to_vec();

    for bad in [vec![0.0; 2], vec![0.0; 4]] {
        let err = network.execute(&bad, &[0.0, 1.0]).unwrap_err();
        assert!(matches!(err, NetworkError::InputShape { expected: 3, .. }));
    }
    assert_eq!(network.layers(), before.as_slice());
}

#[test]
fn execute_rejects_wrong_target_length_without_mutation() {
    let mut network = Network::with_sizes(&[3, 2, 2], &mut seeded(15));
    network.forward(&[0.1, 0.2, 0.3]).unwrap();
    let before = network.layers().to_vec();

    for bad in [vec![0.0; 1], vec![0.0; 3]] {
        let err = network.execute(&[0.1, 0.2, 0.3], &bad).unwrap_err();
        assert!(matches!(err, NetworkError::OutputShape { expected: 2, .. }));
    }
    assert_eq!(network.layers(), before.as_slice());
    assert_eq!(network.last_score(), None);
}

#[test]
fn error_messages_name_the_failure() {
    let mut network = Network::with_sizes(&[2, 2], &mut seeded(16));
    let msg = network.execute(&[0.0], &[0.0, 0.0]).unwrap_err().to_string();
    assert!(msg.contains("shape mismatch (input)"), "{msg}");
    let msg = Network::new().execute(&[], &[]).unwrap_err().to_string();
    assert!(msg.contains("too few layers"), "{msg}");
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn json_round_trip_reproduces_outputs() {
    let mut network = Network::with_sizes(&[4, 3, 2], &mut seeded(17));
    for _ in 0..10 {
        network.execute(&[1.0, 0.0, 0.5, 0.0], &[1.0, 0.0]).unwrap();
    }

    let file = tempfile::NamedTempFile::new().expect("failed to create temp file");
    network.save_json(file.path()).unwrap();
    let mut restored = Network::load_json(file.path()).unwrap();

    let input = [0.3, 0.1, 0.0, 0.9];
    assert_eq!(network.forward(&input).unwrap(), restored.forward(&input).unwrap());
    assert_eq!(restored.layer_sizes(), vec![4, 3, 2]);
}

#[test]
fn loading_garbage_is_a_json_error() {
    let file = tempfile::NamedTempFile::new().expect("failed to create temp file");
    std::fs::write(file.path(), "{ not json").unwrap();
    assert!(matches!(Network::load_json(file.path()), Err(NetworkError::Json(_))));
}

#[test]
fn loading_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("absent.json");
    assert!(matches!(Network::load_json(&path), Err(NetworkError::Io(_))));
}
