use terrascape_heightfield::HeightField;

/// Renderer-agnostic interface over a heightfield.
///
/// The renderer reads the sampled grid and produces output. It never mutates
/// the field. The GPU terrain renderer lives in its own crate; these
/// backends cover headless consumers (CLI, tests, logging).
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render the heightfield.
    fn render(&self, field: &HeightField) -> Self::Output;
}

/// Character ramp from low to high terrain.
const RAMP: &[u8] = b" .:-=+*#%@";

/// Text renderer mapping heights onto a character ramp.
///
/// Downsamples the field to `cols` columns (and half as many rows, since
/// terminal cells are roughly twice as tall as wide) by sampling through the
/// same UV-to-texel mapping the vertex stage uses.
#[derive(Debug, Clone, Copy)]
pub struct AsciiRenderer {
    cols: u32,
}

impl AsciiRenderer {
    pub fn new(cols: u32) -> Self {
        assert!(cols > 0, "cols must be positive");
        Self { cols }
    }
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new(64)
    }
}

impl Renderer for AsciiRenderer {
    type Output = String;

    fn render(&self, field: &HeightField) -> String {
        let rows = (self.cols / 2).max(1);
        let mut out = String::with_capacity((self.cols as usize + 1) * rows as usize);

        for row in 0..rows {
            let v = row as f32 / rows as f32;
            for col in 0..self.cols {
                let u = col as f32 / self.cols as f32;
                let h = field.sample_uv(u, v).clamp(0.0, 1.0);
                let idx = (h * (RAMP.len() - 1) as f32).round() as usize;
                out.push(RAMP[idx] as char);
            }
            out.push('\n');
        }

        out
    }
}

/// Plain-text PGM (P2) grayscale image of the field at full resolution.
///
/// One gray value per texel, heights mapped linearly onto [0, 255].
#[derive(Debug, Clone, Copy, Default)]
pub struct PgmRenderer;

impl Renderer for PgmRenderer {
    type Output = String;

    fn render(&self, field: &HeightField) -> String {
        let size = field.size();
        let mut out = format!("P2\n{size} {size}\n255\n");

        for y in 0..size {
            for x in 0..size {
                let gray = (field.get(x, y).clamp(0.0, 1.0) * 255.0).round() as u32;
                out.push_str(&gray.to_string());
                out.push(if x + 1 == size { '\n' } else { ' ' });
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrascape_heightfield::CosineSource;

    fn test_field(size: u32) -> HeightField {
        HeightField::from_source(&CosineSource, size, 0.2, 0)
    }

    #[test]
    fn ascii_has_expected_shape() {
        let out = AsciiRenderer::new(32).render(&test_field(64));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 16);
        assert!(lines.iter().all(|l| l.len() == 32));
    }

    #[test]
    fn ascii_uses_ramp_characters_only() {
        let out = AsciiRenderer::new(16).render(&test_field(32));
        for c in out.chars() {
            assert!(c == '\n' || RAMP.contains(&(c as u8)));
        }
    }

    #[test]
    fn ascii_peak_renders_densest_char() {
        // Texel (0,0) of the cosine field is exactly 1.0.
        let out = AsciiRenderer::new(8).render(&test_field(64));
        assert_eq!(out.chars().next(), Some('@'));
    }

    #[test]
    fn ascii_is_deterministic() {
        let field = test_field(64);
        let r = AsciiRenderer::default();
        assert_eq!(r.render(&field), r.render(&field));
    }

    #[test]
    fn pgm_header_and_dimensions() {
        let out = PgmRenderer.render(&test_field(16));
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("P2"));
        assert_eq!(lines.next(), Some("16 16"));
        assert_eq!(lines.next(), Some("255"));
        assert_eq!(lines.count(), 16);
    }

    #[test]
    fn pgm_peak_is_white() {
        let out = PgmRenderer.render(&test_field(8));
        let first_row = out.lines().nth(3).unwrap();
        let first: u32 = first_row.split_whitespace().next().unwrap().parse().unwrap();
        assert_eq!(first, 255);
    }
}
