//! Basic mesh generators for structured boxes and simple shells.
//!
//! Generated meshes are [`RawMesh`] values with 1-based connectivity, ready
//! for [`convert`](crate::algs::convert::convert).

use crate::data::mesh::{RawMesh, Tetrahedron, Triangle};
use crate::mesh_error::MeshError;

/// Kuhn split of a hexahedron into six tetrahedra sharing the `0–6`
/// diagonal. Local corners follow the usual hex numbering (`0..=3` bottom,
/// `4..=7` top). Each quad face is cut along the diagonal joining its
/// minimum and maximum corners, which neighbouring cells share, so the split
/// is conforming across cells.
const HEX_TO_TETS: [[usize; 4]; 6] = [
    [0, 1, 2, 6],
    [0, 2, 3, 6],
    [0, 3, 7, 6],
    [0, 7, 4, 6],
    [0, 4, 5, 6],
    [0, 5, 1, 6],
];

fn invalid_geometry(message: impl Into<String>) -> MeshError {
    MeshError::InvalidGeometry(message.into())
}

fn node_id(idx: usize) -> Result<u32, MeshError> {
    u32::try_from(idx + 1).map_err(|_| invalid_geometry(format!("node index {idx} overflows u32")))
}

/// Generate a structured planar box over `[min, max]` at `z = 0` with
/// `nx`×`ny` cells, two counter-clockwise triangles per cell.
pub fn structured_box_2d(
    nx: usize,
    ny: usize,
    min: [f64; 2],
    max: [f64; 2],
) -> Result<RawMesh, MeshError> {
    if nx == 0 || ny == 0 {
        return Err(invalid_geometry("nx and ny must be positive"));
    }

    let dx = (max[0] - min[0]) / nx as f64;
    let dy = (max[1] - min[1]) / ny as f64;
    let mut nodes = Vec::with_capacity((nx + 1) * (ny + 1));
    for j in 0..=ny {
        let y = min[1] + dy * j as f64;
        for i in 0..=nx {
            let x = min[0] + dx * i as f64;
            nodes.push([x, y, 0.0]);
        }
    }

    let mut triangles: Vec<Triangle> = Vec::with_capacity(2 * nx * ny);
    let row_stride = nx + 1;
    for j in 0..ny {
        for i in 0..nx {
            let v0 = node_id(j * row_stride + i)?;
            let v1 = v0 + 1;
            let v3 = node_id(j * row_stride + i + row_stride)?;
            let v2 = v3 + 1;
            triangles.push([v0, v1, v2]);
            triangles.push([v0, v2, v3]);
        }
    }

    Ok(RawMesh::new(nodes, Vec::new(), triangles))
}

/// Generate a structured tetrahedral box over `[min, max]` with
/// `nx`×`ny`×`nz` hexahedral cells, each split into six tetrahedra.
pub fn structured_box_3d(
    nx: usize,
    ny: usize,
    nz: usize,
    min: [f64; 3],
    max: [f64; 3],
) -> Result<RawMesh, MeshError> {
    if nx == 0 || ny == 0 || nz == 0 {
        return Err(invalid_geometry("nx, ny, and nz must be positive"));
    }

    let dx = (max[0] - min[0]) / nx as f64;
    let dy = (max[1] - min[1]) / ny as f64;
    let dz = (max[2] - min[2]) / nz as f64;
    let mut nodes = Vec::with_capacity((nx + 1) * (ny + 1) * (nz + 1));
    for k in 0..=nz {
        let z = min[2] + dz * k as f64;
        for j in 0..=ny {
            let y = min[1] + dy * j as f64;
            for i in 0..=nx {
                let x = min[0] + dx * i as f64;
                nodes.push([x, y, z]);
            }
        }
    }

    let mut tetrahedra: Vec<Tetrahedron> = Vec::with_capacity(6 * nx * ny * nz);
    let row_stride = nx + 1;
    let slab_stride = row_stride * (ny + 1);
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                let base = k * slab_stride + j * row_stride + i;
                let v0 = base;
                let v1 = base + 1;
                let v3 = base + row_stride;
                let v2 = v3 + 1;
                let v4 = base + slab_stride;
                let v5 = v4 + 1;
                let v7 = v4 + row_stride;
                let v6 = v7 + 1;
                let hex = [v0, v1, v2, v3, v4, v5, v6, v7];
                for local in &HEX_TO_TETS {
                    tetrahedra.push([
                        node_id(hex[local[0]])?,
                        node_id(hex[local[1]])?,
                        node_id(hex[local[2]])?,
                        node_id(hex[local[3]])?,
                    ]);
                }
            }
        }
    }

    Ok(RawMesh::new(nodes, tetrahedra, Vec::new()))
}

/// Generate a closed spherical shell (triangulated) with `n_lat` by `n_lon`
/// divisions.
pub fn sphere_shell(radius: f64, n_lat: usize, n_lon: usize) -> Result<RawMesh, MeshError> {
    if radius <= 0.0 {
        return Err(invalid_geometry("radius must be positive"));
    }
    if n_lat < 2 || n_lon < 3 {
        return Err(invalid_geometry(
            "sphere shell requires n_lat >= 2 and n_lon >= 3",
        ));
    }

    let mut nodes = vec![[0.0, 0.0, radius]];
    let mut rings: Vec<Vec<usize>> = Vec::new();

    let two_pi = std::f64::consts::TAU;
    for lat in 1..n_lat {
        let theta = std::f64::consts::PI * (lat as f64) / (n_lat as f64);
        let sin_t = theta.sin();
        let cos_t = theta.cos();
        let mut ring = Vec::with_capacity(n_lon);
        for lon in 0..n_lon {
            let phi = two_pi * (lon as f64) / (n_lon as f64);
            ring.push(nodes.len());
            nodes.push([
                radius * sin_t * phi.cos(),
                radius * sin_t * phi.sin(),
                radius * cos_t,
            ]);
        }
        rings.push(ring);
    }
    let bottom_idx = nodes.len();
    nodes.push([0.0, 0.0, -radius]);

    let mut cells: Vec<[usize; 3]> = Vec::new();
    if let Some(first_ring) = rings.first() {
        for lon in 0..n_lon {
            let next = (lon + 1) % n_lon;
            cells.push([0, first_ring[lon], first_ring[next]]);
        }
    }
    for band in rings.windows(2) {
        let (ring_a, ring_b) = (&band[0], &band[1]);
        for lon in 0..n_lon {
            let next = (lon + 1) % n_lon;
            cells.push([ring_a[lon], ring_b[lon], ring_b[next]]);
            cells.push([ring_a[lon], ring_b[next], ring_a[next]]);
        }
    }
    if let Some(last_ring) = rings.last() {
        for lon in 0..n_lon {
            let next = (lon + 1) % n_lon;
            cells.push([last_ring[lon], bottom_idx, last_ring[next]]);
        }
    }

    let triangles = cells
        .into_iter()
        .map(|[a, b, c]| Ok([node_id(a)?, node_id(b)?, node_id(c)?]))
        .collect::<Result<Vec<Triangle>, MeshError>>()?;
    Ok(RawMesh::new(nodes, Vec::new(), triangles))
}
