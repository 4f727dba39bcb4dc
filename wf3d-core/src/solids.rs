/// Solid generators: box, sphere and torus
use log::debug;

use crate::error::{Error, Result};
use crate::geometry::Triangle;
use crate::matrix::{Matrix, MatrixKind};

/// Append the 12 triangles of a box anchored at its front-top-left corner.
///
/// The box spans `+width` in x, `-height` in y and `-depth` in z. Every face
/// is wound counter-clockwise when seen from outside, so its normal points
/// away from the box.
pub fn cube(triangles: &mut Matrix, x: f32, y: f32, z: f32, width: f32, height: f32, depth: f32) {
    let x2 = x + width;
    let y2 = y - height;
    let z2 = z - depth;

    // Front
    triangles.push_triangle(x, y, z, x, y2, z, x2, y, z);
    triangles.push_triangle(x2, y, z, x, y2, z, x2, y2, z);

    // Back
    triangles.push_triangle(x2, y2, z2, x, y, z2, x2, y, z2);
    triangles.push_triangle(x, y2, z2, x, y, z2, x2, y2, z2);

    // Left
    triangles.push_triangle(x, y, z2, x, y2, z2, x, y, z);
    triangles.push_triangle(x, y, z, x, y2, z2, x, y2, z);

    // Right
    triangles.push_triangle(x2, y, z, x2, y2, z, x2, y, z2);
    triangles.push_triangle(x2, y, z2, x2, y2, z, x2, y2, z2);

    // Top
    triangles.push_triangle(x, y, z2, x, y, z, x2, y, z2);
    triangles.push_triangle(x2, y, z2, x, y, z, x2, y, z);

    // Bottom
    triangles.push_triangle(x, y2, z, x, y2, z2, x2, y2, z);
    triangles.push_triangle(x2, y2, z, x, y2, z2, x2, y2, z2);

    debug!("box at ({}, {}, {}) size {}x{}x{}", x, y, z, width, height, depth);
}

fn check_step(step: u32) -> Result<usize> {
    if step == 0 || step > 360 {
        return Err(Error::InvalidStep(step));
    }
    Ok(step as usize)
}

/// Sample a sphere surface every `step` degrees of azimuth and polar angle.
///
/// Points are ordered azimuth-major: all polar samples for azimuth 0, then
/// for azimuth `step`, and so on. Both ranges include their end value when
/// `step` divides it.
pub fn sphere_points(cx: f32, cy: f32, cz: f32, r: f32, step: u32) -> Result<Matrix> {
    let step = check_step(step)?;
    let mut points = Matrix::new(MatrixKind::Points);
    for azimuth in (0..=360u32).step_by(step) {
        let a = (azimuth as f32).to_radians();
        for polar in (0..=180u32).step_by(step) {
            let p = (polar as f32).to_radians();
            points.push_point(
                r * p.cos() + cx,
                r * p.sin() * a.cos() + cy,
                r * p.sin() * a.sin() + cz,
            );
        }
    }
    Ok(points)
}

/// Append a sphere drawn as unit-length stubs.
///
/// Each sample point gets three edges running one unit along +x, +y and +z.
/// The samples are not joined to their neighbours, and the final sample gets
/// no stubs.
pub fn sphere(edges: &mut Matrix, cx: f32, cy: f32, cz: f32, r: f32, step: u32) -> Result<()> {
    let points = sphere_points(cx, cy, cz, r, step)?;
    let samples = points.width().saturating_sub(1);
    for c in &points.columns()[..samples] {
        edges.push_edge(c.x, c.y, c.z, c.x + 1.0, c.y, c.z);
        edges.push_edge(c.x, c.y, c.z, c.x, c.y + 1.0, c.z);
        edges.push_edge(c.x, c.y, c.z, c.x, c.y, c.z + 1.0);
    }
    debug!("sphere r={} step={}: {} stub edges", r, step, samples * 3);
    Ok(())
}

/// Sample a torus with tube radius `r1` around a ring of radius `r2`.
///
/// `phi` sweeps the ring about the y axis and `theta` sweeps the tube; both
/// cover 0..=360 in `step`-degree increments, phi-major.
pub fn torus_points(cx: f32, cy: f32, cz: f32, r1: f32, r2: f32, step: u32) -> Result<Matrix> {
    let step = check_step(step)?;
    let mut points = Matrix::new(MatrixKind::Points);
    for phi in (0..=360u32).step_by(step) {
        let p = (phi as f32).to_radians();
        for theta in (0..=360u32).step_by(step) {
            let t = (theta as f32).to_radians();
            let ring = r1 * t.cos() + r2;
            points.push_point(p.cos() * ring + cx, r1 * t.sin() + cy, -p.sin() * ring + cz);
        }
    }
    Ok(points)
}

/// Append a torus as triangles, keeping only those that face the viewer.
///
/// Every sample `i` is joined to `i + stride` and `i + stride + 1`, and to
/// `i + stride + 1` and `i + 1`, with indices wrapping around the sample
/// count. `stride` is `360 / step`, one less than the samples per ring.
pub fn torus(
    triangles: &mut Matrix,
    cx: f32,
    cy: f32,
    cz: f32,
    r1: f32,
    r2: f32,
    step: u32,
) -> Result<()> {
    let points = torus_points(cx, cy, cz, r1, r2, step)?;
    let faces = torus_faces(points.width(), 360 / step as usize);
    let at = |i: usize| points.columns()[i];

    let mut emitted = 0;
    for [i, j, k] in &faces {
        let (a, b, c) = (at(*i), at(*j), at(*k));
        let face = Triangle::new(a.xyz().into(), b.xyz().into(), c.xyz().into());
        if face.faces_viewer() {
            triangles.push_triangle(a.x, a.y, a.z, b.x, b.y, b.z, c.x, c.y, c.z);
            emitted += 1;
        }
    }
    debug!("torus r1={} r2={} step={}: {} of {} triangles kept", r1, r2, step, emitted, faces.len());
    Ok(())
}

/// Candidate triangles over a torus grid of `n` points, as point indices.
///
/// Each point pairs with the point `stride` ahead and its successor.
/// `stride` is `360 / step`, one short of the samples per ring, and indices
/// past the end wrap back to the start of the grid.
fn torus_faces(n: usize, stride: usize) -> Vec<[usize; 3]> {
    let mut faces = Vec::with_capacity(2 * n);
    for i in 0..n {
        faces.push([i, (i + stride) % n, (i + stride + 1) % n]);
        faces.push([i, (i + stride + 1) % n, (i + 1) % n]);
    }
    faces
}
