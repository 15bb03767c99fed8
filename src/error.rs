//! Configuration errors.
//!
//! The simulation itself never fails once a session is running; these are
//! only raised while loading or validating a `SimConfig`.

use std::path::PathBuf;

use thiserror::Error;

/// Which slot arena a capacity check refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Hazard,
    Projectile,
}

impl SlotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotKind::Hazard => "hazard",
            SlotKind::Projectile => "projectile",
        }
    }
}

/// Simulation setup error types.
#[derive(Debug, Error)]
pub enum SimError {
    /// Slot capacity cannot cover the configured session length
    #[error(
        "{} capacity {capacity} is too small: a {secs}s session needs {required} slots",
        .kind.as_str()
    )]
    CapacityTooSmall {
        kind: SlotKind,
        capacity: usize,
        required: usize,
        secs: f64,
    },
    /// A clamp range with min > max
    #[error("invalid range for {name}: [{min}, {max}]")]
    InvalidRange { name: &'static str, min: f64, max: f64 },
    /// A value that must be positive/finite is not
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: f64 },
    /// Config file could not be read
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Config file is not valid JSON for `SimConfig`
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for simulation setup.
pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_message_names_arena() {
        let err = SimError::CapacityTooSmall {
            kind: SlotKind::Hazard,
            capacity: 10,
            required: 1200,
            secs: 600.0,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("hazard capacity 10 is too small"), "{msg}");
        assert!(msg.contains("needs 1200 slots"));
    }
}
