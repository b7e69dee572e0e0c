use std::mem;
use std::ops::Range;

use fringe_core::mesh::MeshData;
use wgpu::util::DeviceExt;
use wgpu::Device;

// ---------------------------------------------------------------------------
// Vertex formats
// ---------------------------------------------------------------------------

/// Vertex of the offscreen scene: position, texture coordinates, normal.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
}

impl SceneVertex {
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<SceneVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Vertex of the post-pass quad. Locations match the shader contract:
/// 0 = position (three floats, already clip space), 1 = texture
/// coordinates (two floats).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ScreenVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl ScreenVertex {
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ScreenVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// GpuMesh — uploaded geometry
// ---------------------------------------------------------------------------

pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_indices: u32,
}

impl GpuMesh {
    /// Upload geometry interleaved as `SceneVertex`.
    pub fn scene(device: &Device, data: &MeshData, label: &str) -> Self {
        let vertices: Vec<SceneVertex> = (0..data.vertex_count())
            .map(|i| SceneVertex {
                position: data.positions[i].into(),
                tex_coords: data.tex_coords[i].into(),
                normal: data.normals[i].into(),
            })
            .collect();
        Self::upload(device, bytemuck::cast_slice(&vertices), &data.indices, label)
    }

    /// Upload geometry interleaved as `ScreenVertex` (normals dropped).
    pub fn screen(device: &Device, data: &MeshData, label: &str) -> Self {
        let vertices: Vec<ScreenVertex> = (0..data.vertex_count())
            .map(|i| ScreenVertex {
                position: data.positions[i].into(),
                tex_coords: data.tex_coords[i].into(),
            })
            .collect();
        Self::upload(device, bytemuck::cast_slice(&vertices), &data.indices, label)
    }

    fn upload(device: &Device, vertex_bytes: &[u8], indices: &[u32], label: &str) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} vertices")),
            contents: vertex_bytes,
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} indices")),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            num_indices: indices.len() as u32,
        }
    }

    pub fn draw<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        self.draw_instanced(pass, 0..1);
    }

    pub fn draw_instanced<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>, instances: Range<u32>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.num_indices, 0, instances);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_vertex_is_tightly_packed() {
        assert_eq!(mem::size_of::<SceneVertex>(), 8 * mem::size_of::<f32>());
    }

    #[test]
    fn scene_vertex_layout_matches_struct() {
        let desc = SceneVertex::desc();
        assert_eq!(desc.array_stride, 32);
        assert_eq!(desc.attributes.len(), 3);
        assert_eq!(desc.attributes[1].offset, 12);
        assert_eq!(desc.attributes[2].offset, 20);
    }

    #[test]
    fn screen_vertex_matches_the_binding_contract() {
        // location 0: three floats of position, location 1: two floats of
        // texture coordinates, nothing else.
        let desc = ScreenVertex::desc();
        assert_eq!(desc.array_stride, 20);
        assert_eq!(desc.attributes.len(), 2);

        assert_eq!(desc.attributes[0].shader_location, 0);
        assert_eq!(desc.attributes[0].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(desc.attributes[0].offset, 0);

        assert_eq!(desc.attributes[1].shader_location, 1);
        assert_eq!(desc.attributes[1].format, wgpu::VertexFormat::Float32x2);
        assert_eq!(desc.attributes[1].offset, 12);
    }

    #[test]
    fn vertex_steps_per_vertex_not_per_instance() {
        assert_eq!(SceneVertex::desc().step_mode, wgpu::VertexStepMode::Vertex);
        assert_eq!(ScreenVertex::desc().step_mode, wgpu::VertexStepMode::Vertex);
    }
}
