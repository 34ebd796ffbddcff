use crate::field::HeightField;
use glam::{Vec2, Vec3};

/// Map one normalized texture coordinate component to a texel index.
///
/// This is the CPU twin of the shader's `uv_to_i`: `floor(uv * tex_size)`
/// evaluated in the signed domain, then clamped into `[0, tex_size - 1]`.
/// Negative coordinates clamp to the first texel; `uv = 1.0` (every border
/// vertex) clamps to the last texel instead of reading one past it.
///
/// Requires `tex_size >= 1`.
pub fn texel_index(uv: f32, tex_size: u32) -> u32 {
    debug_assert!(tex_size > 0);
    let res = (uv * tex_size as f32).floor() as i32;
    if res < 0 {
        return 0;
    }
    if res >= tex_size as i32 {
        return tex_size - 1;
    }
    res as u32
}

/// Reconstruct the world-space position of a displaced terrain vertex.
///
/// The 2D input position supplies the horizontal plane and the scaled height
/// sample supplies the vertical axis: input x -> world x, input y -> world z,
/// `raw_height * height_scale` -> world y. The axis order is part of the
/// shader contract.
pub fn displaced_position(position: Vec2, raw_height: f32, height_scale: f32) -> Vec3 {
    Vec3::new(position.x, raw_height * height_scale, position.y)
}

/// Scaled terrain height at a UV coordinate, via the unfiltered load path.
pub fn height_at(field: &HeightField, uv: Vec2, height_scale: f32) -> f32 {
    field.sample_uv(uv.x, uv.y) * height_scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::CosineSource;
    use glam::Mat4;

    #[test]
    fn texel_index_interior_points() {
        assert_eq!(texel_index(0.0, 256), 0);
        assert_eq!(texel_index(0.5, 256), 128);
        assert_eq!(texel_index(255.0 / 256.0, 256), 255);
    }

    #[test]
    fn texel_index_upper_boundary_clamps() {
        // uv = 1.0 maps to the last valid texel, not one past it.
        assert_eq!(texel_index(1.0, 256), 255);
        assert_eq!(texel_index(1.5, 256), 255);
    }

    #[test]
    fn texel_index_negative_clamps_to_zero() {
        assert_eq!(texel_index(-0.001, 256), 0);
        assert_eq!(texel_index(-10.0, 256), 0);
    }

    #[test]
    fn texel_index_in_range_for_unit_interval() {
        for i in 0..=1000 {
            let uv = i as f32 / 1000.0;
            let idx = texel_index(uv, 256);
            assert!(idx <= 255, "uv {uv} mapped to {idx}");
        }
    }

    #[test]
    fn texel_index_single_texel_field() {
        assert_eq!(texel_index(0.0, 1), 0);
        assert_eq!(texel_index(0.99, 1), 0);
        assert_eq!(texel_index(1.0, 1), 0);
    }

    #[test]
    fn displacement_scales_height() {
        let world = displaced_position(Vec2::ZERO, 0.5, 10.0);
        assert_eq!(world.y, 5.0);
    }

    #[test]
    fn axis_mapping() {
        // Input x -> world x, input y -> world z, height -> world y.
        let world = displaced_position(Vec2::new(3.0, 7.0), 1.0, 2.0);
        assert_eq!(world, Vec3::new(3.0, 2.0, 7.0));
    }

    #[test]
    fn height_at_uses_texel_load() {
        let field = HeightField::from_source(&CosineSource, 256, 0.1, 0);
        let h = height_at(&field, Vec2::new(0.0, 0.0), 10.0);
        assert_eq!(h, field.get(0, 0) * 10.0);
    }

    #[test]
    fn vertex_evaluation_is_deterministic() {
        // Same field, same settings, same input vertex: bit-identical clip
        // position across repeated evaluation.
        let field = HeightField::from_source(&CosineSource, 64, 0.25, 0);
        let view_proj = Mat4::perspective_rh(1.0, 16.0 / 9.0, 0.1, 1000.0)
            * Mat4::look_at_rh(Vec3::new(5.0, 8.0, 5.0), Vec3::ZERO, Vec3::Y);

        let eval = || {
            let uv = Vec2::new(0.25, 0.75);
            let raw = field.sample_uv(uv.x, uv.y);
            let world = displaced_position(Vec2::new(16.0, 48.0), raw, 4.0);
            view_proj * world.extend(1.0)
        };

        let a = eval();
        let b = eval();
        assert_eq!(a.to_array(), b.to_array());
    }
}
