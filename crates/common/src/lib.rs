//! Shared Types: terrain configuration consumed by every other crate.
//!
//! # Invariants
//! - Configuration is plain data; no crate mutates it after startup.
//! - A config that passes `validate()` is safe to hand to mesh generation,
//!   heightfield sampling, and the GPU renderer without further checks.

pub mod types;

pub use types::{ConfigError, TerrainConfig};

pub fn crate_info() -> &'static str {
    "terrascape-common v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("common"));
    }
}
