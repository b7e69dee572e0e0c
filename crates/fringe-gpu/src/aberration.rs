use std::collections::HashMap;

use fringe_core::displace::clamp_displacement;
use fringe_core::mesh;
use wgpu::{Device, SurfaceConfiguration};

use crate::mesh::{GpuMesh, ScreenVertex};
use crate::texture::RenderTarget;

const SHADER: &str = include_str!("../shaders/aberration.wgsl");

// ---------------------------------------------------------------------------
// AberrationPass — fullscreen chromatic-aberration post pass
// ---------------------------------------------------------------------------

/// Owns the offscreen texture the scene renders into and the fullscreen
/// pipeline that resamples it per color channel onto the surface.
///
/// The displacement strength is a pipeline-overridable shader constant, so
/// changing it rebuilds the pipeline but leaves the bind group layout
/// (color texture at binding 0, filtering sampler at binding 1, group 0)
/// untouched.
pub struct AberrationPass {
    target: RenderTarget,
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    pipeline_layout: wgpu::PipelineLayout,
    shader: wgpu::ShaderModule,
    pipeline: wgpu::RenderPipeline,
    quad: GpuMesh,
    format: wgpu::TextureFormat,
    displacement: f32,
}

impl AberrationPass {
    pub fn new(device: &Device, config: &SurfaceConfiguration, displacement: f32) -> Self {
        let displacement = clamp_displacement(displacement);

        let target = RenderTarget::new(device, config, "aberration source");

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("aberration_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let bind_group = Self::build_bind_group(device, &layout, &target);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("aberration_pl"),
            bind_group_layouts: &[&layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("aberration"),
            source: wgpu::ShaderSource::Wgsl(SHADER.into()),
        });

        let pipeline =
            Self::build_pipeline(device, &pipeline_layout, &shader, config.format, displacement);

        // Positions are clip space; the quad spans the whole surface.
        let quad = GpuMesh::screen(device, &mesh::quad(2.0, 2.0), "aberration quad");

        Self {
            target,
            layout,
            bind_group,
            pipeline_layout,
            shader,
            pipeline,
            quad,
            format: config.format,
            displacement,
        }
    }

    fn build_bind_group(
        device: &Device,
        layout: &wgpu::BindGroupLayout,
        target: &RenderTarget,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("aberration_bg"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&target.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&target.sampler),
                },
            ],
        })
    }

    fn build_pipeline(
        device: &Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        format: wgpu::TextureFormat,
        displacement: f32,
    ) -> wgpu::RenderPipeline {
        let constants = HashMap::from([(String::from("displacement"), displacement as f64)]);

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("aberration_pipeline"),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: "vs_main",
                buffers: &[ScreenVertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions {
                    constants: &constants,
                    ..Default::default()
                },
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    /// The view the scene pass renders into.
    pub fn scene_view(&self) -> &wgpu::TextureView {
        &self.target.view
    }

    pub fn displacement(&self) -> f32 {
        self.displacement
    }

    /// Clamp `value` and respecialize the pipeline for it.
    pub fn set_displacement(&mut self, device: &Device, value: f32) {
        let value = clamp_displacement(value);
        if value == self.displacement {
            return;
        }
        self.displacement = value;
        self.pipeline = Self::build_pipeline(
            device,
            &self.pipeline_layout,
            &self.shader,
            self.format,
            value,
        );
        log::debug!("displacement → {value:.3}");
    }

    /// Rebuild the size-dependent resources after a surface resize.
    pub fn resize(&mut self, device: &Device, config: &SurfaceConfiguration) {
        self.target = RenderTarget::new(device, config, "aberration source");
        self.bind_group = Self::build_bind_group(device, &self.layout, &self.target);
    }

    /// Draw the displaced quad to `view`.
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("aberration-pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        self.quad.draw(&mut pass);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::SHADER;

    fn validated_module() -> naga::Module {
        let module = naga::front::wgsl::parse_str(SHADER).expect("shader should parse");
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::default(),
        )
        .validate(&module)
        .expect("shader should validate");
        module
    }

    #[test]
    fn shader_parses_and_validates() {
        validated_module();
    }

    #[test]
    fn shader_has_both_entry_points() {
        let module = validated_module();
        let find = |name: &str| module.entry_points.iter().find(|ep| ep.name == name);
        assert_eq!(
            find("vs_main").expect("missing vs_main").stage,
            naga::ShaderStage::Vertex
        );
        assert_eq!(
            find("fs_main").expect("missing fs_main").stage,
            naga::ShaderStage::Fragment
        );
    }

    #[test]
    fn displacement_is_a_pipeline_override() {
        let module = validated_module();
        assert!(
            module
                .overrides
                .iter()
                .any(|(_, o)| o.name.as_deref() == Some("displacement")),
            "no `displacement` override constant"
        );
    }

    #[test]
    fn shader_binds_texture_and_sampler_only() {
        // Group 0: texture at binding 0, sampler at binding 1, and no
        // uniform buffers anywhere in the module.
        let module = validated_module();
        let mut bindings: Vec<(u32, u32)> = module
            .global_variables
            .iter()
            .filter_map(|(_, var)| var.binding.as_ref())
            .map(|b| (b.group, b.binding))
            .collect();
        bindings.sort_unstable();
        assert_eq!(bindings, vec![(0, 0), (0, 1)]);

        let uniform_count = module
            .global_variables
            .iter()
            .filter(|(_, var)| var.space == naga::AddressSpace::Uniform)
            .count();
        assert_eq!(uniform_count, 0, "live code path must not read uniforms");
    }
}
