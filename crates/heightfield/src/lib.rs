//! Heightfield: noise sampling, the normalized height grid, and the CPU
//! reference of the displacement math the terrain shader runs per vertex.
//!
//! # Invariants
//! - A `HeightField` is immutable after construction; regeneration builds a
//!   new field.
//! - `displace::texel_index` is bit-compatible with the WGSL `uv_to_i`
//!   helper: same floor, same signed comparison, same clamp policy.
//! - Field samples are normalized to [0,1] for sources emitting [-1,1].

pub mod displace;
pub mod field;
pub mod noise;

pub use displace::{displaced_position, height_at, texel_index};
pub use field::HeightField;
pub use noise::{CosineSource, NoiseSource};

pub fn crate_info() -> &'static str {
    "terrascape-heightfield v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("heightfield"));
    }
}
