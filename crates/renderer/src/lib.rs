//! Renderer: wgpu init + depth + lit indexed mesh.
//! wgpu = 26.x, winit = 0.30.x

use std::sync::Arc;

use anyhow::{Context, Result};
use asset::{MeshData, MeshVertex};
use bytemuck::{Pod, Zeroable};
use wgpu::{
    util::DeviceExt,
    BindGroup, BindGroupLayoutDescriptor, BindGroupLayoutEntry, BindingType, BlendState,
    Buffer, BufferBindingType, BufferSize, BufferUsages, ColorTargetState, ColorWrites,
    CommandEncoderDescriptor, DepthBiasState, DepthStencilState, Device, DeviceDescriptor,
    Extent3d, Features, FragmentState, Instance, InstanceDescriptor, Limits, LoadOp, Operations,
    PipelineLayoutDescriptor, PowerPreference, PresentMode, Queue, RenderPassColorAttachment,
    RenderPassDescriptor, RenderPipeline, RenderPipelineDescriptor, ShaderModuleDescriptor,
    ShaderSource, ShaderStages, StoreOp, Surface, SurfaceConfiguration, SurfaceError,
    TextureDescriptor, TextureDimension, TextureFormat, TextureUsages, TextureView,
    TextureViewDescriptor, VertexBufferLayout, VertexState, VertexStepMode,
};
use winit::{dpi::PhysicalSize, window::Window};

pub mod uniforms;

pub use uniforms::{FrameUniforms, OPENGL_TO_WGPU, SceneUniform};

/// Vertex: position + RGBA color + normal.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub color: [f32; 4],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4, 2 => Float32x3],
    };
}

impl From<&MeshVertex> for Vertex {
    fn from(v: &MeshVertex) -> Self {
        Self {
            pos: v.position,
            color: v.color,
            normal: v.normal,
        }
    }
}

const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;

pub struct GpuState {
    // Surface
    surface: Surface<'static>,
    surface_config: SurfaceConfiguration,

    // Device/queue
    device: Device,
    queue: Queue,

    // Pipeline & geometry
    pipeline: RenderPipeline,
    vertex_buf: Buffer,
    index_buf: Buffer,
    index_count: u32,

    // Scene uniforms
    scene_bg: BindGroup,
    scene_buf: Buffer,

    // Depth
    depth_view: TextureView,

    // Size cache
    width: u32,
    height: u32,
}

impl GpuState {
    /// Create GPU state bound to an Arc<Window> and upload `mesh` once.
    pub async fn new(window: Arc<Window>, backends: wgpu::Backends, mesh: &MeshData) -> Result<Self> {
        mesh.validate().context("Refusing to upload mesh")?;

        let PhysicalSize { width, height } = window.inner_size();
        let width = width.max(1);
        let height = height.max(1);

        // Instance & surface
        let instance = Instance::new(&InstanceDescriptor {
            backends,
            ..Default::default()
        });
        let surface: Surface<'static> = instance
            .create_surface(window.clone())
            .context("create_surface failed")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No suitable GPU adapter")?;
        log::info!("Adapter: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(&DeviceDescriptor {
                label: Some("Svarog3D Device"),
                required_features: Features::empty(),
                required_limits: Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: Default::default(),
                trace: Default::default(),
            })
            .await
            .context("request_device failed")?;

        // Surface format (prefer sRGB)
        let caps = surface.get_capabilities(&adapter);
        let surface_format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .context("Surface reports no supported formats")?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let surface_config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let depth_view = create_depth_view(&device, &surface_config);

        // ==== Shaders ====
        let shader = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("Lit WGSL"),
            source: ShaderSource::Wgsl(include_str!("shaders/lit.wgsl").into()),
        });

        // ==== Scene BGL/BG ====
        let scene_bgl = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Scene BGL"),
            entries: &[BindGroupLayoutEntry {
                binding: 0,
                visibility: ShaderStages::VERTEX,
                ty: BindingType::Buffer {
                    ty: BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: BufferSize::new(std::mem::size_of::<SceneUniform>() as u64),
                },
                count: None,
            }],
        });

        // Identity until the first frame writes real matrices.
        let scene_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene UBO"),
            contents: bytemuck::bytes_of(&SceneUniform::default()),
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        });
        let scene_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene BG"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buf.as_entire_binding(),
            }],
        });

        // ==== Pipeline ====
        let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("Lit PipelineLayout"),
            bind_group_layouts: &[&scene_bgl],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&RenderPipelineDescriptor {
            label: Some("Lit Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::LAYOUT],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(ColorTargetState {
                    format: surface_format,
                    blend: Some(BlendState::ALPHA_BLENDING),
                    write_mask: ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        // ==== Geometry ====
        let vertices: Vec<Vertex> = mesh.vertices.iter().map(Vertex::from).collect();
        let vertex_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh VB"),
            contents: bytemuck::cast_slice(&vertices),
            usage: BufferUsages::VERTEX,
        });
        let index_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh IB"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: BufferUsages::INDEX,
        });
        let index_count =
            u32::try_from(mesh.indices.len()).context("Index count does not fit in u32")?;
        log::info!(
            "Uploaded mesh: {} vertices, {} triangles",
            vertices.len(),
            mesh.triangle_count()
        );

        Ok(Self {
            surface,
            surface_config,
            device,
            queue,
            pipeline,
            vertex_buf,
            index_buf,
            index_count,
            scene_bg,
            scene_buf,
            depth_view,
            width,
            height,
        })
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Resize: reconfigure surface & recreate depth view.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.surface_config.width = self.width;
        self.surface_config.height = self.height;
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_view = create_depth_view(&self.device, &self.surface_config);
    }

    /// Render one frame: upload uniforms + clear + draw mesh.
    pub fn render(&mut self, frame_uniforms: &FrameUniforms) -> Result<(), SurfaceError> {
        let scene = frame_uniforms.to_uniform();
        self.queue
            .write_buffer(&self.scene_buf, 0, bytemuck::bytes_of(&scene));

        let frame = self.surface.get_current_texture()?;
        let view = frame.texture.create_view(&Default::default());

        let mut encoder = self
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("MainEncoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("MainPass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(wgpu::Color::BLACK),
                        store: StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(Operations {
                        load: LoadOp::Clear(1.0),
                        store: StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.scene_bg, &[]);
            rpass.set_vertex_buffer(0, self.vertex_buf.slice(..));
            rpass.set_index_buffer(self.index_buf.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.index_count, 0, 0..1);
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    pub fn is_surface_lost(err: &SurfaceError) -> bool {
        matches!(err, SurfaceError::Lost | SurfaceError::Outdated)
    }

    pub fn recreate_surface(&mut self) {
        self.resize(self.width, self.height);
    }
}

/// Create a depth texture view matching the surface config.
fn create_depth_view(device: &Device, sc: &SurfaceConfiguration) -> TextureView {
    let tex = device.create_texture(&TextureDescriptor {
        label: Some("DepthTex"),
        size: Extent3d {
            width: sc.width.max(1),
            height: sc.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&TextureViewDescriptor::default())
}
