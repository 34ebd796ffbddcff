/// A 2D scalar noise source.
///
/// Implementations return a sample nominally in [-1, 1] for a point in
/// noise space. The seed lets stochastic sources vary between runs;
/// deterministic sources may ignore it.
pub trait NoiseSource {
    fn sample(&self, x: f32, y: f32, seed: u32) -> f32;
}

/// Deterministic cosine ridge pattern.
///
/// Cheap, seed-independent, and periodic in both axes. Used as the default
/// terrain source and as a known-answer input in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosineSource;

impl NoiseSource for CosineSource {
    fn sample(&self, x: f32, y: f32, _seed: u32) -> f32 {
        x.cos() * 0.5 + y.cos() * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_peak_at_origin() {
        let source = CosineSource;
        assert_eq!(source.sample(0.0, 0.0, 0), 1.0);
    }

    #[test]
    fn cosine_trough() {
        let source = CosineSource;
        let s = source.sample(std::f32::consts::PI, std::f32::consts::PI, 0);
        assert!(s < -0.99);
    }

    #[test]
    fn cosine_stays_in_range() {
        let source = CosineSource;
        for i in 0..100 {
            for j in 0..100 {
                let s = source.sample(i as f32 * 0.37, j as f32 * 0.53, 0);
                assert!((-1.0..=1.0).contains(&s));
            }
        }
    }

    #[test]
    fn cosine_ignores_seed() {
        let source = CosineSource;
        assert_eq!(source.sample(1.5, 2.5, 0), source.sample(1.5, 2.5, 42));
    }
}
