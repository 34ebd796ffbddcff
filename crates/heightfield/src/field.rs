use crate::displace::texel_index;
use crate::noise::NoiseSource;

/// A square grid of normalized height samples.
///
/// Built once from a noise source and treated as read-only afterwards; the
/// GPU renderer uploads `samples()` verbatim into an `R32Float` texture, and
/// the CPU displacement reference reads the same values through `get`.
pub struct HeightField {
    size: u32,
    samples: Vec<f32>,
}

impl HeightField {
    /// Sample a noise source into a `size x size` grid.
    ///
    /// Each texel (x, y) is sampled at `(x * resolution, y * resolution)` in
    /// noise space and remapped from [-1,1] to [0,1].
    pub fn from_source(source: &impl NoiseSource, size: u32, resolution: f32, seed: u32) -> Self {
        assert!(size > 0, "heightfield size must be positive");

        let mut samples = vec![0.0; size as usize * size as usize];
        for y in 0..size {
            for x in 0..size {
                let s = source.sample(x as f32 * resolution, y as f32 * resolution, seed);
                samples[(y * size + x) as usize] = s * 0.5 + 0.5;
            }
        }

        tracing::debug!(size, resolution, seed, "generated heightfield");

        Self { size, samples }
    }

    /// Side length in texels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Row-major samples, one `f32` per texel.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Direct texel read. Panics on out-of-range coordinates.
    pub fn get(&self, x: u32, y: u32) -> f32 {
        assert!(x < self.size && y < self.size, "texel out of range");
        self.samples[(y * self.size + x) as usize]
    }

    /// The shader's unfiltered load path: map each UV component to a texel
    /// index and read that texel.
    pub fn sample_uv(&self, u: f32, v: f32) -> f32 {
        let x = texel_index(u, self.size);
        let y = texel_index(v, self.size);
        self.get(x, y)
    }

    /// Minimum and maximum sample in the field.
    pub fn min_max(&self) -> (f32, f32) {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for &s in &self.samples {
            min = min.min(s);
            max = max.max(s);
        }
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::CosineSource;

    #[test]
    fn field_has_expected_dimensions() {
        let field = HeightField::from_source(&CosineSource, 16, 0.1, 0);
        assert_eq!(field.size(), 16);
        assert_eq!(field.samples().len(), 256);
    }

    #[test]
    fn cosine_field_is_normalized() {
        let field = HeightField::from_source(&CosineSource, 64, 0.37, 0);
        let (min, max) = field.min_max();
        assert!(min >= 0.0);
        assert!(max <= 1.0);
    }

    #[test]
    fn origin_texel_is_peak() {
        // cos(0) * 0.5 + cos(0) * 0.5 = 1.0, normalized to 1.0.
        let field = HeightField::from_source(&CosineSource, 8, 0.1, 0);
        assert_eq!(field.get(0, 0), 1.0);
    }

    #[test]
    fn sample_uv_matches_get() {
        let field = HeightField::from_source(&CosineSource, 256, 0.1, 0);
        assert_eq!(field.sample_uv(0.0, 0.0), field.get(0, 0));
        assert_eq!(field.sample_uv(0.5, 0.5), field.get(128, 128));
    }

    #[test]
    fn sample_uv_at_one_hits_last_texel() {
        let field = HeightField::from_source(&CosineSource, 256, 0.1, 0);
        assert_eq!(field.sample_uv(1.0, 1.0), field.get(255, 255));
    }

    #[test]
    fn generation_is_deterministic() {
        let a = HeightField::from_source(&CosineSource, 32, 0.2, 3);
        let b = HeightField::from_source(&CosineSource, 32, 0.2, 3);
        assert_eq!(a.samples(), b.samples());
    }

    #[test]
    #[should_panic(expected = "size must be positive")]
    fn zero_size_panics() {
        HeightField::from_source(&CosineSource, 0, 0.1, 0);
    }
}
