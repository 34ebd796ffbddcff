//! Rendering Adapter: renderer-agnostic heightfield output.
//!
//! # Invariants
//! - Renderers never mutate the heightfield; output derives purely from the
//!   sampled grid.
//! - Both backends read through the same texel-index path the GPU vertex
//!   stage uses, so what they show is what the terrain displaces.

mod renderer;

pub use renderer::{AsciiRenderer, PgmRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "terrascape-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
