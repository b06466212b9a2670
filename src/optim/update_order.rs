use std::fmt;
use std::str::FromStr;

/// When a backward step writes its updates.
///
/// - `Accumulated` — every gradient of a layer pair is computed from the
///   state left by the forward pass, then all updates are applied together.
/// - `Immediate`   — each weight, activation and bias is moved as soon as its
///   gradient is known, so later neurons of the same pair read values the
///   earlier ones already changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateOrder {
    #[default]
    Accumulated,
    Immediate,
}

impl fmt::Display for UpdateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateOrder::Accumulated => f.write_str("accumulated"),
            UpdateOrder::Immediate => f.write_str("immediate"),
        }
    }
}

impl FromStr for UpdateOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "accumulated" => Ok(UpdateOrder::Accumulated),
            "immediate" => Ok(UpdateOrder::Immediate),
            other => Err(format!("unknown update order '{other}' (expected accumulated or immediate)")),
        }
    }
}
