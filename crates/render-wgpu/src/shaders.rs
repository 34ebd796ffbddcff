/// WGSL shader pair for heightmap-displaced terrain.
///
/// The vertex stage reads one discrete texel per vertex (no filtering) so
/// displacement is deterministic per vertex; the fragment stage re-samples
/// the same texture through the filtering sampler and encodes height in the
/// red channel.
///
/// `uv_to_i` floors into the signed domain and clamps into
/// `[0, tex_size - 1]`; `uv = 1.0` on chunk borders maps to the last texel.
/// Its CPU twin lives in `terrascape_heightfield::displace::texel_index` and
/// carries the unit tests for this contract.
pub const TERRAIN_SHADER: &str = r#"
struct RenderSettings {
    view_proj: mat4x4<f32>,
    height_scale: f32,
    tex_size: u32,
};

@group(0) @binding(0)
var<uniform> settings: RenderSettings;

@group(1) @binding(0)
var heightmap: texture_2d<f32>;

@group(1) @binding(1)
var heightmap_sampler: sampler;

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

fn uv_to_i(uv: f32) -> u32 {
    let res = i32(floor(uv * f32(settings.tex_size)));
    if res < 0 {
        return 0u;
    }
    if res >= i32(settings.tex_size) {
        return settings.tex_size - 1u;
    }
    return u32(res);
}

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    let tex_x = uv_to_i(in.uv.x);
    let tex_y = uv_to_i(in.uv.y);
    let raw_height = textureLoad(heightmap, vec2<u32>(tex_x, tex_y), 0).x;
    let height = raw_height * settings.height_scale;

    var out: VertexOutput;
    out.clip_position = settings.view_proj * vec4<f32>(in.position.x, height, in.position.y, 1.0);
    out.uv = in.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let sample = textureSample(heightmap, heightmap_sampler, in.uv);
    return vec4<f32>(sample.x, 0.0, 0.0, 1.0);
}
"#;
