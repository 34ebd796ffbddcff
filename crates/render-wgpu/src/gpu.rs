use crate::camera::FlyCamera;
use crate::mesh::{ChunkMesh, TerrainVertex};
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use terrascape_heightfield::HeightField;
use wgpu::util::DeviceExt;

/// Uniform block at group 0, binding 0.
///
/// Layout is a wire contract: a 64-byte column-major matrix, two 4-byte
/// scalars, and 8 bytes of trailing padding for 16-byte uniform alignment.
/// 80 bytes total.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct RenderSettings {
    view_proj: [[f32; 4]; 4],
    height_scale: f32,
    tex_size: u32,
    _padding: [u8; 8],
}

impl RenderSettings {
    fn new(tex_size: u32, height_scale: f32) -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            height_scale,
            tex_size,
            _padding: [0; 8],
        }
    }

    fn update_view_proj(&mut self, camera: &FlyCamera) {
        self.view_proj = camera.view_projection().to_cols_array_2d();
    }
}

/// Bytes per padded texture row for an `R32Float` upload.
fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * std::mem::size_of::<f32>() as u32;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// wgpu-based terrain renderer.
///
/// Owns the displacement pipeline, the heightmap texture, and the terrain
/// chunk buffers. The heightfield itself stays on the CPU side; this type
/// only uploads and binds it.
pub struct TerrainRenderer {
    pipeline: wgpu::RenderPipeline,
    settings: RenderSettings,
    settings_buffer: wgpu::Buffer,
    settings_bind_group: wgpu::BindGroup,
    heightmap_texture: wgpu::Texture,
    heightmap_layout: wgpu::BindGroupLayout,
    heightmap_sampler: wgpu::Sampler,
    heightmap_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    num_indices: u32,
    depth_texture: wgpu::TextureView,
}

impl TerrainRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        field: &HeightField,
        mesh: &ChunkMesh,
        height_scale: f32,
    ) -> Self {
        let settings = RenderSettings::new(field.size(), height_scale);
        let settings_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("render_settings_buffer"),
            contents: bytemuck::bytes_of(&settings),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let settings_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("render_settings_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let settings_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("render_settings_bind_group"),
            layout: &settings_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: settings_buffer.as_entire_binding(),
            }],
        });

        let heightmap_texture = Self::create_heightmap_texture(device, field.size());
        Self::upload_samples(queue, &heightmap_texture, field);

        let heightmap_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("heightmap_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let heightmap_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("heightmap_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let heightmap_bind_group = Self::create_heightmap_bind_group(
            device,
            &heightmap_layout,
            &heightmap_texture,
            &heightmap_sampler,
        );

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("terrain_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::TERRAIN_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("terrain_pipeline_layout"),
            bind_group_layouts: &[&settings_layout, &heightmap_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("terrain_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[TerrainVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("terrain_vertex_buffer"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("terrain_index_buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        tracing::debug!(
            tex_size = field.size(),
            vertices = mesh.vertices.len(),
            "terrain renderer ready"
        );

        Self {
            pipeline,
            settings,
            settings_buffer,
            settings_bind_group,
            heightmap_texture,
            heightmap_layout,
            heightmap_sampler,
            heightmap_bind_group,
            vertex_buffer,
            index_buffer,
            num_indices: mesh.num_indices(),
            depth_texture,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn height_scale(&self) -> f32 {
        self.settings.height_scale
    }

    /// Takes effect at the next `render` call.
    pub fn set_height_scale(&mut self, scale: f32) {
        self.settings.height_scale = scale;
    }

    /// Replace the bound heightmap with a freshly generated field.
    ///
    /// Re-uses the texture when the size is unchanged; otherwise allocates a
    /// new one and rebinds.
    pub fn upload_heightfield(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        field: &HeightField,
    ) {
        if field.size() != self.settings.tex_size {
            self.heightmap_texture = Self::create_heightmap_texture(device, field.size());
            self.heightmap_bind_group = Self::create_heightmap_bind_group(
                device,
                &self.heightmap_layout,
                &self.heightmap_texture,
                &self.heightmap_sampler,
            );
            self.settings.tex_size = field.size();
        }
        Self::upload_samples(queue, &self.heightmap_texture, field);
        tracing::info!(tex_size = field.size(), "heightmap uploaded");
    }

    /// Render one frame of terrain into `view`.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        camera: &FlyCamera,
    ) {
        self.settings.update_view_proj(camera);
        queue.write_buffer(&self.settings_buffer, 0, bytemuck::bytes_of(&self.settings));

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("terrain_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("terrain_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.1,
                            g: 0.2,
                            b: 0.3,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.settings_bind_group, &[]);
            pass.set_bind_group(1, &self.heightmap_bind_group, &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..self.num_indices, 0, 0..1);
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_heightmap_texture(device: &wgpu::Device, size: u32) -> wgpu::Texture {
        device.create_texture(&wgpu::TextureDescriptor {
            label: Some("heightmap_texture"),
            size: wgpu::Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R32Float,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        })
    }

    fn create_heightmap_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        texture: &wgpu::Texture,
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("heightmap_bind_group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    /// Copy field samples into the texture, padding each row to the copy
    /// alignment wgpu requires.
    fn upload_samples(queue: &wgpu::Queue, texture: &wgpu::Texture, field: &HeightField) {
        let size = field.size();
        let bytes_per_row = padded_bytes_per_row(size);
        let pixels_per_row = bytes_per_row / std::mem::size_of::<f32>() as u32;

        let mut padded = vec![0.0_f32; pixels_per_row as usize * size as usize];
        for y in 0..size as usize {
            let src = &field.samples()[y * size as usize..(y + 1) * size as usize];
            let dst = &mut padded[y * pixels_per_row as usize..][..size as usize];
            dst.copy_from_slice(src);
        }

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(&padded),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(size),
            },
            wgpu::Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: 1,
            },
        );
    }

    fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_settings_is_80_bytes() {
        // mat4 (64) + f32 (4) + u32 (4) + trailing padding (8).
        assert_eq!(std::mem::size_of::<RenderSettings>(), 80);
    }

    #[test]
    fn render_settings_defaults() {
        let s = RenderSettings::new(512, 1.0);
        assert_eq!(s.tex_size, 512);
        assert_eq!(s.height_scale, 1.0);
        assert_eq!(s.view_proj, Mat4::IDENTITY.to_cols_array_2d());
    }

    #[test]
    fn update_view_proj_tracks_camera() {
        let mut s = RenderSettings::new(512, 1.0);
        let cam = FlyCamera::default();
        s.update_view_proj(&cam);
        assert_eq!(s.view_proj, cam.view_projection().to_cols_array_2d());
    }

    #[test]
    fn row_padding_respects_copy_alignment() {
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        // 512 texels * 4 bytes is already aligned.
        assert_eq!(padded_bytes_per_row(512), 2048);
        // 10 texels * 4 bytes pads up to one alignment unit.
        assert_eq!(padded_bytes_per_row(10), align);
        assert_eq!(padded_bytes_per_row(512) % align, 0);
        assert_eq!(padded_bytes_per_row(10) % align, 0);
    }

    #[test]
    fn padded_rows_hold_whole_pixels() {
        for width in [1, 10, 100, 512, 513] {
            assert_eq!(
                padded_bytes_per_row(width) % std::mem::size_of::<f32>() as u32,
                0
            );
        }
    }
}
