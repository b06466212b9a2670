use std::fmt;

use crate::network::network::Network;

/// `Layer Neurons Weights` overview of a network, one row per layer.
pub struct LayerTable<'a>(pub &'a Network);

impl fmt::Display for LayerTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Layer Neurons Weights")?;
        for (i, layer) in self.0.layers().iter().enumerate() {
            writeln!(f, "{:>5} {:>7} {:>7}", i, layer.len(), layer.weights().len())?;
        }
        Ok(())
    }
}

/// Bias of every neuron, one line per layer, two decimals.
pub fn format_biases(network: &Network) -> String {
    let mut out = String::from("Bias state:\n");
    for layer in network.layers() {
        let line: Vec<String> = layer.biases().iter().map(|b| format!("{b:.2}")).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

/// Outgoing weights of every layer, one line per source neuron, layers
/// separated by a dashed rule.
pub fn format_weights(network: &Network) -> String {
    let mut out = String::from("Weight state:\n");
    for layer in network.layers() {
        let weights = layer.weights();
        if weights.cols() > 0 {
            for row in 0..weights.rows() {
                let line: Vec<String> = weights.row(row).iter().map(|w| format!("{w:.2}")).collect();
                out.push_str(&line.join(" "));
                out.push('\n');
            }
        }
        out.push_str("----------\n");
    }
    out
}

/// Space-separated values with six decimals.
pub fn format_values(values: &[f64]) -> String {
    values.iter().map(|v| format!("{v:.6}")).collect::<Vec<_>>().join(" ")
}
