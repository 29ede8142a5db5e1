//! Procedural mesh generation for the fixed scene objects.

/// Vertex and index data for one mesh, ready for GPU upload.
///
/// Positions are in object space; the owning scene object's transform is
/// applied at upload time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Per-vertex unit normals.
    pub normals: Vec<[f32; 3]>,
    /// Per-vertex texture coordinates in `[0, 1]`.
    pub uvs: Vec<[f32; 2]>,
    /// Triangle list indices (counter-clockwise winding seen from outside).
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Generate a UV sphere centered at the origin.
///
/// `segments` is the longitudinal resolution, `rings` the latitudinal one.
/// Vertices run pole to pole; the seam column is duplicated for clean UVs.
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let segments = segments.max(3);
    let rings = rings.max(2);

    let mut mesh = MeshData::default();

    for ring in 0..=rings {
        let phi = std::f32::consts::PI * ring as f32 / rings as f32;
        let (sin_phi, cos_phi) = phi.sin_cos();

        for seg in 0..=segments {
            let theta = std::f32::consts::TAU * seg as f32 / segments as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();

            let normal = [sin_phi * cos_theta, cos_phi, sin_phi * sin_theta];
            mesh.positions
                .push([normal[0] * radius, normal[1] * radius, normal[2] * radius]);
            mesh.normals.push(normal);
            mesh.uvs
                .push([seg as f32 / segments as f32, ring as f32 / rings as f32]);
        }
    }

    let stride = segments + 1;
    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * stride + seg;
            let b = a + stride;
            mesh.indices.extend_from_slice(&[a, a + 1, b]);
            mesh.indices.extend_from_slice(&[b, a + 1, b + 1]);
        }
    }

    mesh
}

/// Generate a square plane of the given side length in the XY plane,
/// facing +Z. The scene rotates it into place.
pub fn plane(size: f32) -> MeshData {
    let h = size / 2.0;
    MeshData {
        positions: vec![[-h, -h, 0.0], [h, -h, 0.0], [h, h, 0.0], [-h, h, 0.0]],
        normals: vec![[0.0, 0.0, 1.0]; 4],
        uvs: vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        indices: vec![0, 1, 2, 2, 3, 0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_vertex_and_triangle_counts() {
        let mesh = uv_sphere(1.0, 32, 16);
        assert_eq!(mesh.vertex_count(), 33 * 17);
        assert_eq!(mesh.triangle_count(), (32 * 16 * 2) as usize);
    }

    #[test]
    fn test_sphere_positions_on_radius() {
        let radius = 2.5;
        let mesh = uv_sphere(radius, 16, 8);
        for p in &mesh.positions {
            let len = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((len - radius).abs() < 1e-4, "vertex off the sphere: {len}");
        }
    }

    #[test]
    fn test_sphere_normals_unit_and_outward() {
        let mesh = uv_sphere(3.0, 16, 8);
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-4);
            let dot = p[0] * n[0] + p[1] * n[1] + p[2] * n[2];
            assert!(dot > 0.0, "normal points inward");
        }
    }

    #[test]
    fn test_sphere_indices_in_bounds() {
        let mesh = uv_sphere(1.0, 12, 6);
        let max = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < max));
        assert_eq!(mesh.indices.len() % 3, 0);
    }

    #[test]
    fn test_sphere_clamps_degenerate_resolution() {
        let mesh = uv_sphere(1.0, 0, 0);
        assert!(mesh.triangle_count() > 0);
    }

    #[test]
    fn test_sphere_winding_faces_outward() {
        let mesh = uv_sphere(1.0, 16, 8);
        // Average the geometric normal of every triangle against its
        // centroid direction; outward winding gives a positive dot.
        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [
                mesh.positions[tri[0] as usize],
                mesh.positions[tri[1] as usize],
                mesh.positions[tri[2] as usize],
            ];
            let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            let n = [
                e1[1] * e2[2] - e1[2] * e2[1],
                e1[2] * e2[0] - e1[0] * e2[2],
                e1[0] * e2[1] - e1[1] * e2[0],
            ];
            let centroid = [
                (a[0] + b[0] + c[0]) / 3.0,
                (a[1] + b[1] + c[1]) / 3.0,
                (a[2] + b[2] + c[2]) / 3.0,
            ];
            let dot = n[0] * centroid[0] + n[1] * centroid[1] + n[2] * centroid[2];
            // Degenerate pole triangles have zero area; skip them.
            let area_sq = n[0] * n[0] + n[1] * n[1] + n[2] * n[2];
            if area_sq > 1e-12 {
                assert!(dot > 0.0, "triangle wound inward");
            }
        }
    }

    #[test]
    fn test_plane_spans_size() {
        let mesh = plane(900.0);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        let xs: Vec<f32> = mesh.positions.iter().map(|p| p[0]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), -450.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 450.0);
    }

    #[test]
    fn test_plane_faces_positive_z() {
        let mesh = plane(10.0);
        assert!(mesh.normals.iter().all(|n| *n == [0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(uv_sphere(1.0, 32, 16), uv_sphere(1.0, 32, 16));
        assert_eq!(plane(900.0), plane(900.0));
    }
}
