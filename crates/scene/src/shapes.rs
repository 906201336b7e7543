//! Procedural shape generators.
//!
//! Each generator produces CPU-side [`MeshData`] that the external renderer
//! uploads and draws; nothing here touches a GL context. Quads are emitted as
//! two triangles with consistently outward (CCW from outside) winding.

use glam::Vec3;

/// Floats per vertex: position(3) + normal(3) + texcoord(2)
pub const VERTEX_STRIDE: usize = 8;

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, u, v]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// 8 floats per vertex, see [`VERTEX_STRIDE`]
    pub vertices: Vec<f32>,
    /// Per-vertex tangents, 3 floats each; empty for generators that do not
    /// emit them
    pub tangents: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / VERTEX_STRIDE
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn has_tangents(&self) -> bool {
        !self.tangents.is_empty()
    }
}

// ── Cube ─────────────────────────────────────────────────────

/// Closed six-face box centered at the origin.
///
/// Per-face outward axis-aligned normals; per-face texture coordinates
/// spanning [0,1]x[0,1] independently. Zero or negative dimensions produce a
/// degenerate or inverted mesh rather than an error.
pub fn cube(width: f32, height: f32, depth: f32) -> MeshData {
    let hw = width * 0.5;
    let hh = height * 0.5;
    let hd = depth * 0.5;

    let faces: [([Vec3; 4], Vec3); 6] = [
        // Front (+Z)
        ([Vec3::new(-hw, -hh, hd), Vec3::new(hw, -hh, hd), Vec3::new(hw, hh, hd), Vec3::new(-hw, hh, hd)], Vec3::Z),
        // Back (-Z)
        ([Vec3::new(hw, -hh, -hd), Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, hh, -hd), Vec3::new(hw, hh, -hd)], Vec3::NEG_Z),
        // Right (+X)
        ([Vec3::new(hw, -hh, hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, hh, -hd), Vec3::new(hw, hh, hd)], Vec3::X),
        // Left (-X)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, -hh, hd), Vec3::new(-hw, hh, hd), Vec3::new(-hw, hh, -hd)], Vec3::NEG_X),
        // Top (+Y)
        ([Vec3::new(-hw, hh, hd), Vec3::new(hw, hh, hd), Vec3::new(hw, hh, -hd), Vec3::new(-hw, hh, -hd)], Vec3::Y),
        // Bottom (-Y)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, -hh, hd), Vec3::new(-hw, -hh, hd)], Vec3::NEG_Y),
    ];

    const FACE_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    let mut vertices = Vec::with_capacity(24 * VERTEX_STRIDE);
    let mut indices = Vec::with_capacity(36);

    for (quad, normal) in &faces {
        let base = (vertices.len() / VERTEX_STRIDE) as u32;
        for (corner, uv) in quad.iter().zip(FACE_UVS.iter()) {
            push_vert(&mut vertices, *corner, *normal, *uv);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData {
        vertices,
        tangents: Vec::new(),
        indices,
    }
}

// ── UV sphere ────────────────────────────────────────────────

/// Upper bound on sphere segment counts. Keeps the vertex grid small enough
/// that `num_lngs * num_lats` index arithmetic stays far from overflow even
/// for pathological scene files (`sphere 1 5e9 5e9`).
pub const MAX_SEGMENTS: u32 = 512;

/// Latitude/longitude sphere centered at the origin.
///
/// Segment counts are clamped to `[3, MAX_SEGMENTS]`. The vertex grid is
/// `num_lngs x num_lats`; both parameters run over `count - 1` steps, so the
/// seam column and the pole rows carry duplicated points. Index lookups wrap
/// out-of-range lat/lng by `count - 1`, matching the reference topology.
///
/// Per-vertex attributes: position, unit normal, texcoord from the spherical
/// parameters, and a tangent along the latitude line. The tangent is
/// normalized by the ring radius, which collapses toward the poles; the
/// near-zero division there is intentional and left as-is.
pub fn sphere(radius: f32, longitude_segments: u32, latitude_segments: u32) -> MeshData {
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    let num_lngs = longitude_segments.clamp(3, MAX_SEGMENTS) as i32;
    let num_lats = latitude_segments.clamp(3, MAX_SEGMENTS) as i32;

    let grid = (num_lngs * num_lats) as usize;
    let mut vertices = Vec::with_capacity(grid * VERTEX_STRIDE);
    let mut tangents = Vec::with_capacity(grid * 3);

    for ilat in 0..num_lats {
        let lat = -FRAC_PI_2 + PI * ilat as f32 / (num_lats - 1) as f32;
        let ring = lat.cos();
        let y = lat.sin();

        for ilng in 0..num_lngs {
            let lng = -PI + TAU * ilng as f32 / (num_lngs - 1) as f32;
            let x = ring * lng.cos();
            let z = -ring * lng.sin();

            let normal = Vec3::new(x, y, z);
            let uv = [(lng + PI) / TAU, (lat + FRAC_PI_2) / PI];
            push_vert(&mut vertices, radius * normal, normal, uv);

            // Derivative along the latitude line, divided by the ring radius.
            let tangent = Vec3::new(-ring * lng.sin(), 0.0, -ring * lng.cos()) / ring;
            tangents.extend_from_slice(&[tangent.x, tangent.y, tangent.z]);
        }
    }

    // Out-of-range lat/lng are corrected by count - 1, not count.
    let wrap = |mut lat: i32, mut lng: i32| -> u32 {
        if lat < 0 {
            lat += num_lats - 1;
        }
        if lng < 0 {
            lng += num_lngs - 1;
        }
        if lat > num_lats - 1 {
            lat -= num_lats - 1;
        }
        if lng > num_lngs - 1 {
            lng -= num_lngs - 1;
        }
        (num_lngs * lat + lng) as u32
    };

    let mut indices = Vec::new();
    let quad = |indices: &mut Vec<u32>, a: u32, b: u32, c: u32, d: u32| {
        indices.extend_from_slice(&[a, b, c, a, c, d]);
    };

    // North fan: pole row num_lats-1 down to its adjacent ring.
    for ilng in 0..num_lngs - 1 {
        quad(
            &mut indices,
            wrap(num_lats - 1, ilng),
            wrap(num_lats - 2, ilng),
            wrap(num_lats - 2, ilng + 1),
            wrap(num_lats - 1, ilng + 1),
        );
    }

    // South fan: pole row 0 up to ring 1.
    for ilng in 0..num_lngs - 1 {
        quad(
            &mut indices,
            wrap(0, ilng),
            wrap(0, ilng + 1),
            wrap(1, ilng + 1),
            wrap(1, ilng),
        );
    }

    // Interior latitude bands.
    for ilat in 2..num_lats - 1 {
        for ilng in 0..num_lngs - 1 {
            quad(
                &mut indices,
                wrap(ilat, ilng),
                wrap(ilat - 1, ilng),
                wrap(ilat - 1, ilng + 1),
                wrap(ilat, ilng + 1),
            );
        }
    }

    MeshData {
        vertices,
        tangents,
        indices,
    }
}

// ── Helpers ──────────────────────────────────────────────────

fn push_vert(v: &mut Vec<f32>, p: Vec3, n: Vec3, uv: [f32; 2]) {
    v.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z, uv[0], uv[1]]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::MeshValidator;

    fn vertex_normal(mesh: &MeshData, i: usize) -> Vec3 {
        let base = i * VERTEX_STRIDE;
        Vec3::new(
            mesh.vertices[base + 3],
            mesh.vertices[base + 4],
            mesh.vertices[base + 5],
        )
    }

    fn vertex_position(mesh: &MeshData, i: usize) -> Vec3 {
        let base = i * VERTEX_STRIDE;
        Vec3::new(
            mesh.vertices[base],
            mesh.vertices[base + 1],
            mesh.vertices[base + 2],
        )
    }

    #[test]
    fn test_cube_counts() {
        let mesh = cube(2.0, 2.0, 2.0);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(!mesh.has_tangents());
    }

    #[test]
    fn test_cube_face_normals_axis_aligned_one_each() {
        let mesh = cube(2.0, 2.0, 2.0);
        let mut expected = vec![
            Vec3::Z,
            Vec3::NEG_Z,
            Vec3::X,
            Vec3::NEG_X,
            Vec3::Y,
            Vec3::NEG_Y,
        ];

        for face in 0..6 {
            let n = vertex_normal(&mesh, face * 4);
            // all 4 face vertices share the normal
            for corner in 1..4 {
                assert_eq!(vertex_normal(&mesh, face * 4 + corner), n);
            }
            let pos = expected.iter().position(|e| *e == n);
            assert!(pos.is_some(), "unexpected face normal {:?}", n);
            expected.remove(pos.unwrap());
        }
        assert!(expected.is_empty());
    }

    #[test]
    fn test_cube_faces_coplanar_and_outward() {
        let mesh = cube(2.0, 3.0, 4.0);
        for face in 0..6 {
            let n = vertex_normal(&mesh, face * 4);
            let p0 = vertex_position(&mesh, face * 4);
            for corner in 1..4 {
                let p = vertex_position(&mesh, face * 4 + corner);
                // coplanar: every corner has the same offset along the normal
                assert!((p.dot(n) - p0.dot(n)).abs() < 1e-6);
            }
            // outward: the face plane sits on the positive side of the origin
            assert!(p0.dot(n) > 0.0);

            // CCW from outside: the first emitted triangle faces the normal
            let a = vertex_position(&mesh, face * 4);
            let b = vertex_position(&mesh, face * 4 + 1);
            let c = vertex_position(&mesh, face * 4 + 2);
            assert!((b - a).cross(c - a).dot(n) > 0.0);
        }
    }

    #[test]
    fn test_cube_uv_spans_unit_square_per_face() {
        let mesh = cube(1.0, 1.0, 1.0);
        for face in 0..6 {
            let mut us = Vec::new();
            let mut vs = Vec::new();
            for corner in 0..4 {
                let base = (face * 4 + corner) * VERTEX_STRIDE;
                us.push(mesh.vertices[base + 6]);
                vs.push(mesh.vertices[base + 7]);
            }
            us.sort_by(|a, b| a.partial_cmp(b).unwrap());
            vs.sort_by(|a, b| a.partial_cmp(b).unwrap());
            assert_eq!((us[0], us[3]), (0.0, 1.0));
            assert_eq!((vs[0], vs[3]), (0.0, 1.0));
        }
    }

    #[test]
    fn test_cube_dimensions() {
        let mesh = cube(2.0, 3.0, 4.0);
        let v = MeshValidator::new(&mesh);
        assert!(v.validate_all().is_empty());
        assert!(v.assert_dimensions_approx([2.0, 3.0, 4.0], 1e-6));
    }

    #[test]
    fn test_sphere_minimum_topology() {
        let mesh = sphere(1.0, 3, 3);
        // 3x3 grid, two fans of 2 quads, no interior band quads
        assert_eq!(mesh.vertex_count(), 9);
        assert_eq!(mesh.triangle_count(), 8);
    }

    #[test]
    fn test_sphere_segment_clamping() {
        let clamped = sphere(1.0, 1, 1);
        let reference = sphere(1.0, 3, 3);
        assert_eq!(clamped, reference);
    }

    #[test]
    fn test_sphere_segment_upper_clamp() {
        // f32 -> u32 casts in the registry saturate at u32::MAX; the grid
        // must still come out at the capped size, not empty or overflowed
        let mesh = sphere(1.0, u32::MAX, u32::MAX);
        assert_eq!(mesh.vertex_count(), (MAX_SEGMENTS * MAX_SEGMENTS) as usize);
        let quads = 2 * (MAX_SEGMENTS - 1) + (MAX_SEGMENTS - 3) * (MAX_SEGMENTS - 1);
        assert_eq!(mesh.triangle_count(), 2 * quads as usize);
    }

    #[test]
    fn test_sphere_counts_general() {
        let lngs = 8;
        let lats = 6;
        let mesh = sphere(2.0, lngs, lats);
        assert_eq!(mesh.vertex_count(), (lngs * lats) as usize);
        let fan_quads = 2 * (lngs - 1);
        let band_quads = (lats - 3) * (lngs - 1);
        assert_eq!(mesh.triangle_count(), 2 * (fan_quads + band_quads) as usize);
    }

    #[test]
    fn test_sphere_normals_unit_and_radial() {
        let radius = 2.5;
        let mesh = sphere(radius, 12, 9);
        let v = MeshValidator::new(&mesh);
        assert!(v.validate_all().is_empty());
        assert!(v.are_normals_normalized(1e-4));

        for i in 0..mesh.vertex_count() {
            let p = vertex_position(&mesh, i);
            assert!((p.length() - radius).abs() < 1e-4);
            let n = vertex_normal(&mesh, i);
            // normal is the unit radial direction
            assert!((p - radius * n).length() < 1e-4);
        }
    }

    #[test]
    fn test_sphere_uv_in_unit_square() {
        let mesh = sphere(1.0, 10, 7);
        for i in 0..mesh.vertex_count() {
            let base = i * VERTEX_STRIDE;
            let u = mesh.vertices[base + 6];
            let v = mesh.vertices[base + 7];
            assert!((0.0..=1.0).contains(&u));
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_sphere_tangents_orthogonal_off_poles() {
        let lngs = 12;
        let lats = 9;
        let mesh = sphere(1.0, lngs, lats);
        assert!(mesh.has_tangents());
        assert_eq!(mesh.tangents.len(), mesh.vertex_count() * 3);

        // skip the pole rows; their tangents are the known degenerate case
        for ilat in 1..(lats - 1) as usize {
            for ilng in 0..lngs as usize {
                let i = ilat * lngs as usize + ilng;
                let t = Vec3::new(
                    mesh.tangents[i * 3],
                    mesh.tangents[i * 3 + 1],
                    mesh.tangents[i * 3 + 2],
                );
                assert!((t.length() - 1.0).abs() < 1e-3);
                assert!(t.dot(vertex_normal(&mesh, i)).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_sphere_seam_column_duplicated() {
        let lngs = 8;
        let lats = 6;
        let mesh = sphere(1.0, lngs, lats);
        // first and last column of each ring coincide (count - 1 parameterization)
        for ilat in 0..lats as usize {
            let first = vertex_position(&mesh, ilat * lngs as usize);
            let last = vertex_position(&mesh, ilat * lngs as usize + (lngs - 1) as usize);
            assert!((first - last).length() < 1e-5);
        }
    }

    #[test]
    fn test_degenerate_cube_not_rejected() {
        let mesh = cube(0.0, 0.0, 0.0);
        assert_eq!(mesh.vertex_count(), 24);
    }
}
