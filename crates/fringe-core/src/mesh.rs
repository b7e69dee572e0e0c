use glam::{Vec2, Vec3};
use std::f32::consts::PI;

// ---------------------------------------------------------------------------
// MeshData — plain geometry, no GPU types
// ---------------------------------------------------------------------------

/// Indexed triangle geometry as parallel attribute arrays. Uploading this
/// to the GPU (interleaving, buffer creation) happens elsewhere.
#[derive(Debug, Clone)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub tex_coords: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

// ---------------------------------------------------------------------------
// Quad
// ---------------------------------------------------------------------------

/// An axis-aligned quad in the z = 0 plane, centred on the origin.
///
/// Texture coordinates follow image convention: v = 0 along the top edge.
/// A `quad(2.0, 2.0)` therefore spans clip space exactly and samples a
/// texture the right way up when drawn as a fullscreen surface.
pub fn quad(width: f32, height: f32) -> MeshData {
    let hw = width * 0.5;
    let hh = height * 0.5;

    let positions = vec![
        Vec3::new(-hw, -hh, 0.0),
        Vec3::new(hw, -hh, 0.0),
        Vec3::new(hw, hh, 0.0),
        Vec3::new(-hw, hh, 0.0),
    ];
    let tex_coords = vec![
        Vec2::new(0.0, 1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(0.0, 0.0),
    ];
    let normals = vec![Vec3::Z; 4];
    let indices = vec![0, 1, 2, 2, 3, 0];

    MeshData {
        positions,
        tex_coords,
        normals,
        indices,
    }
}

// ---------------------------------------------------------------------------
// Icosphere
// ---------------------------------------------------------------------------

/// A sphere built by subdividing an icosahedron `subdivisions` times and
/// projecting every vertex onto the sphere.
///
/// Texture coordinates are spherical (u from longitude, v from latitude,
/// v = 0 at the north pole); vertices on triangles that straddle the
/// longitude seam are duplicated so the wrap does not smear across the
/// whole texture. Normals are the unit positions.
pub fn icosphere(radius: f32, subdivisions: u32) -> MeshData {
    // Icosahedron vertices: cyclic permutations of (±1, ±phi, 0), normalised.
    let phi = (1.0 + 5.0_f32.sqrt()) * 0.5;
    let inv_norm = 1.0 / (phi * phi + 1.0).sqrt();

    let mut positions: Vec<Vec3> = [
        Vec3::new(-1.0, phi, 0.0),
        Vec3::new(1.0, phi, 0.0),
        Vec3::new(0.0, 1.0, -phi),
        Vec3::new(0.0, 1.0, phi),
        Vec3::new(-phi, 0.0, -1.0),
        Vec3::new(-phi, 0.0, 1.0),
        Vec3::new(phi, 0.0, -1.0),
        Vec3::new(phi, 0.0, 1.0),
        Vec3::new(0.0, -1.0, -phi),
        Vec3::new(0.0, -1.0, phi),
        Vec3::new(-1.0, -phi, 0.0),
        Vec3::new(1.0, -phi, 0.0),
    ]
    .iter()
    .map(|v| *v * inv_norm)
    .collect();

    #[rustfmt::skip]
    let mut indices: Vec<u32> = vec![
         0,  1,  2,   0,  3,  1,   0,  4,  5,   1,  7,  6,
         1,  6,  2,   1,  3,  7,   0,  2,  4,   0,  5,  3,
         2,  6,  8,   2,  8,  4,   3,  5,  9,   3,  9,  7,
        11,  6,  7,  10,  5,  4,  10,  4,  8,  10,  9,  5,
        11,  8,  6,  11,  7,  9,  10,  8, 11,  10, 11,  9,
    ];

    // Subdivide: each triangle becomes four, with edge midpoints pushed
    // back onto the unit sphere.
    for _ in 0..subdivisions {
        let mut new_indices = Vec::with_capacity(indices.len() * 4);
        for tri in indices.chunks(3) {
            let (i1, i2, i3) = (tri[0], tri[1], tri[2]);
            let v1 = positions[i1 as usize];
            let v2 = positions[i2 as usize];
            let v3 = positions[i3 as usize];

            let i12 = positions.len() as u32;
            let i23 = i12 + 1;
            let i13 = i12 + 2;
            positions.push((v1 + v2).normalize());
            positions.push((v2 + v3).normalize());
            positions.push((v1 + v3).normalize());

            new_indices.extend_from_slice(&[
                i1, i12, i13, //
                i2, i23, i12, //
                i3, i13, i23, //
                i12, i23, i13,
            ]);
        }
        indices = new_indices;
    }

    // Spherical texture coordinates, v = 0 at the north pole.
    let mut tex_coords: Vec<Vec2> = positions
        .iter()
        .map(|pos| {
            let r0 = (pos.x * pos.x + pos.z * pos.z).sqrt();
            let u = pos.z.atan2(pos.x) / (PI * 2.0) + 0.5;
            let v = pos.y.atan2(r0) / PI + 0.5;
            Vec2::new(1.0 - u, 1.0 - v)
        })
        .collect();

    // Find vertices on triangles that straddle the u seam: the vertex on
    // the low-u side gets duplicated with u shifted by a full wrap.
    let mut indices_to_split = Vec::new();
    for tri in indices.chunks(3) {
        let t0 = tex_coords[tri[0] as usize];
        let t1 = tex_coords[tri[1] as usize];
        let t2 = tex_coords[tri[2] as usize];

        if (t2.x - t0.x).abs() > 0.5 {
            indices_to_split.push(if t0.x < 0.5 { tri[0] } else { tri[2] });
        }
        if (t1.x - t0.x).abs() > 0.5 {
            indices_to_split.push(if t0.x < 0.5 { tri[0] } else { tri[1] });
        }
        if (t2.x - t1.x).abs() > 0.5 {
            indices_to_split.push(if t1.x < 0.5 { tri[1] } else { tri[2] });
        }
    }

    for &idx in &indices_to_split {
        let i = idx as usize;
        positions.push(positions[i]);
        tex_coords.push(tex_coords[i] + Vec2::new(1.0, 0.0));
        let new_index = (positions.len() - 1) as u32;

        // Repoint the split vertex only in triangles whose other corners
        // sit on the high-u side of the seam.
        for j in 0..indices.len() {
            if indices[j] as usize == i {
                let tri = j / 3;
                let n1 = indices[tri * 3 + (j + 1) % 3] as usize;
                let n2 = indices[tri * 3 + (j + 2) % 3] as usize;
                if tex_coords[n1].x > 0.5 || tex_coords[n2].x > 0.5 {
                    indices[j] = new_index;
                }
            }
        }
    }

    // Unit positions double as normals; scale positions afterwards.
    let normals = positions.clone();
    for pos in &mut positions {
        *pos *= radius;
    }

    MeshData {
        positions,
        tex_coords,
        normals,
        indices,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
