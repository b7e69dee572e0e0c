use std::f32::consts::TAU;
use std::mem;

use fringe_core::mesh;
use glam::{Mat4, Quat, Vec3};
use wgpu::util::DeviceExt;
use wgpu::{Device, Queue, SurfaceConfiguration};

use crate::mesh::{GpuMesh, SceneVertex};
use crate::texture::DepthTexture;

const SHADER: &str = include_str!("../shaders/scene.wgsl");

/// Radians per second the spheres spin.
pub const ROTATION_SPEED: f32 = TAU / 12.0;

const NUM_INSTANCES_PER_DIM: u32 = 10;
const SPACE_BETWEEN: f32 = 3.0;

// ---------------------------------------------------------------------------
// Instances
// ---------------------------------------------------------------------------

pub struct Instance {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Instance {
    fn to_raw(&self) -> InstanceRaw {
        InstanceRaw {
            model: Mat4::from_rotation_translation(self.rotation, self.position)
                .to_cols_array_2d(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    model: [[f32; 4]; 4],
}

impl InstanceRaw {
    fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 4,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 12]>() as wgpu::BufferAddress,
                    shader_location: 6,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Lay out the instance grid on the y = 0 plane, each sphere tilted about
/// its own offset direction so no two start in the same orientation.
fn instance_grid() -> Vec<Instance> {
    (0..NUM_INSTANCES_PER_DIM)
        .flat_map(|z| {
            (0..NUM_INSTANCES_PER_DIM).map(move |x| {
                let x = SPACE_BETWEEN * (x as f32 - NUM_INSTANCES_PER_DIM as f32 / 2.0);
                let z = SPACE_BETWEEN * (z as f32 - NUM_INSTANCES_PER_DIM as f32 / 2.0);
                let position = Vec3::new(x, 0.0, z);

                let rotation = if position == Vec3::ZERO {
                    Quat::IDENTITY
                } else {
                    Quat::from_axis_angle(position.normalize(), 45f32.to_radians())
                };

                Instance { position, rotation }
            })
        })
        .collect()
}

/// Advance a rotation by `dt` seconds of spin about the world y axis.
fn advance_rotation(rotation: Quat, dt: f32) -> Quat {
    Quat::from_rotation_y(ROTATION_SPEED * dt) * rotation
}

// ---------------------------------------------------------------------------
// Camera uniform
// ---------------------------------------------------------------------------

/// Must match the `Camera` struct in the scene shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct CameraUniform {
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }
}

// ---------------------------------------------------------------------------
// ScenePass
// ---------------------------------------------------------------------------

/// Renders the instanced sphere grid, depth-tested, into whatever view it
/// is handed: the post pass's offscreen target in normal operation, the
/// surface itself when the effect is bypassed.
pub struct ScenePass {
    mesh: GpuMesh,
    instances: Vec<Instance>,
    instance_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    depth: DepthTexture,
    pipeline: wgpu::RenderPipeline,
}

impl ScenePass {
    pub fn new(device: &Device, config: &SurfaceConfiguration) -> Self {
        let mesh = GpuMesh::scene(device, &mesh::icosphere(1.0, 2), "sphere");

        let instances = instance_grid();
        let instance_data: Vec<InstanceRaw> = instances.iter().map(Instance::to_raw).collect();
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene instances"),
            contents: bytemuck::cast_slice(&instance_data),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene camera"),
            contents: bytemuck::bytes_of(&CameraUniform::new()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_camera_bgl"),
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

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_camera_bg"),
            layout: &camera_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let depth = DepthTexture::new(device, config, "scene depth");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&camera_bgl],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene"),
            source: wgpu::ShaderSource::Wgsl(SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[SceneVertex::desc(), InstanceRaw::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DepthTexture::FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            mesh,
            instances,
            instance_buffer,
            camera_buffer,
            camera_bind_group,
            depth,
            pipeline,
        }
    }

    /// Spin the spheres and push the new transforms to the GPU.
    pub fn update(&mut self, queue: &Queue, dt: f32) {
        for instance in &mut self.instances {
            instance.rotation = advance_rotation(instance.rotation, dt);
        }
        let instance_data: Vec<InstanceRaw> =
            self.instances.iter().map(Instance::to_raw).collect();
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instance_data));
    }

    pub fn set_camera(&self, queue: &Queue, view_proj: Mat4) {
        let uniform = CameraUniform {
            view_proj: view_proj.to_cols_array_2d(),
        };
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&uniform));
    }

    /// The depth buffer is tied to the surface size.
    pub fn resize(&mut self, device: &Device, config: &SurfaceConfiguration) {
        self.depth = DepthTexture::new(device, config, "scene depth");
    }

    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene-pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.camera_bind_group, &[]);
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        self.mesh
            .draw_instanced(&mut pass, 0..self.instances.len() as u32);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
