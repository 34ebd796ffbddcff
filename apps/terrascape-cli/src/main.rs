use clap::{Parser, Subcommand};
use glam::Vec2;
use terrascape_common::TerrainConfig;
use terrascape_heightfield::{CosineSource, HeightField, displaced_position, texel_index};
use terrascape_render::{AsciiRenderer, PgmRenderer, Renderer};
use terrascape_render_wgpu::ChunkMesh;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "terrascape-cli", about = "CLI tool for terrascape operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions
    Info,
    /// Render a generated heightfield as ASCII art
    Preview {
        /// Heightfield side length in texels
        #[arg(short, long, default_value = "128")]
        size: u32,
        /// Noise-space units per texel
        #[arg(short, long, default_value = "0.1")]
        resolution: f32,
        /// Noise seed
        #[arg(long, default_value = "0")]
        seed: u32,
        /// Output width in characters
        #[arg(short, long, default_value = "64")]
        cols: u32,
    },
    /// Write a generated heightfield to a PGM image
    Export {
        /// Output file path
        #[arg(short, long)]
        output: String,
        /// Heightfield side length in texels
        #[arg(short, long, default_value = "512")]
        size: u32,
        /// Noise-space units per texel
        #[arg(short, long, default_value = "0.1")]
        resolution: f32,
        /// Noise seed
        #[arg(long, default_value = "0")]
        seed: u32,
    },
    /// Generate a terrain chunk mesh and print its statistics
    Mesh {
        /// Chunk footprint side length in world units
        #[arg(short, long, default_value = "100")]
        size: u32,
        /// Interior vertex density
        #[arg(short, long, default_value = "1.0")]
        density: f32,
    },
    /// Evaluate the vertex-stage displacement math for one vertex
    Probe {
        /// Texture coordinate U
        #[arg(short, long)]
        u: f32,
        /// Texture coordinate V
        #[arg(short, long)]
        v: f32,
        /// Footprint position X
        #[arg(short, long, default_value = "0.0")]
        x: f32,
        /// Footprint position Z (vertex input Y)
        #[arg(short, long, default_value = "0.0")]
        z: f32,
        /// Heightfield side length in texels
        #[arg(long, default_value = "512")]
        tex_size: u32,
        /// Noise-space units per texel
        #[arg(long, default_value = "0.1")]
        resolution: f32,
        /// Noise seed
        #[arg(long, default_value = "0")]
        seed: u32,
        /// Vertical scale
        #[arg(long, default_value = "1.0")]
        height_scale: f32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("terrascape-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", terrascape_common::crate_info());
            println!("heightfield: {}", terrascape_heightfield::crate_info());
            println!("render: {}", terrascape_render::crate_info());
            let defaults = TerrainConfig::default();
            println!(
                "defaults: tex_size={} chunk_size={} height_scale={}",
                defaults.tex_size, defaults.chunk_size, defaults.height_scale
            );
        }
        Commands::Preview {
            size,
            resolution,
            seed,
            cols,
        } => {
            let field = HeightField::from_source(&CosineSource, size, resolution, seed);
            print!("{}", AsciiRenderer::new(cols).render(&field));
        }
        Commands::Export {
            output,
            size,
            resolution,
            seed,
        } => {
            let field = HeightField::from_source(&CosineSource, size, resolution, seed);
            let pgm = PgmRenderer.render(&field);
            std::fs::write(&output, pgm)?;
            let (min, max) = field.min_max();
            println!("Wrote {size}x{size} heightfield to {output} (range {min:.3}..{max:.3})");
        }
        Commands::Mesh { size, density } => {
            let mesh = ChunkMesh::generate(size, density);
            println!(
                "Chunk {size}x{size} at density {density}: {} vertices, {} indices, {} triangles",
                mesh.vertices.len(),
                mesh.indices.len(),
                mesh.indices.len() / 3
            );
        }
        Commands::Probe {
            u,
            v,
            x,
            z,
            tex_size,
            resolution,
            seed,
            height_scale,
        } => {
            let field = HeightField::from_source(&CosineSource, tex_size, resolution, seed);
            let tex_x = texel_index(u, tex_size);
            let tex_y = texel_index(v, tex_size);
            let raw = field.get(tex_x, tex_y);
            let world = displaced_position(Vec2::new(x, z), raw, height_scale);

            println!("uv=({u}, {v}) -> texel=({tex_x}, {tex_y})");
            println!("raw sample: {raw:.6}");
            println!("scaled height: {:.6}", raw * height_scale);
            println!("world position: ({}, {}, {})", world.x, world.y, world.z);
        }
    }

    Ok(())
}
