/// Parametric curve generators: circle, Hermite and Bezier
use log::debug;
use nalgebra::{Matrix4, Vector4};

use crate::error::Result;
use crate::matrix::{multiply, Matrix, MatrixKind};

/// Number of segments each curve is split into.
pub const CURVE_STEPS: usize = 100;

/// Parameter increment between consecutive samples.
pub const STEP: f32 = 1.0 / CURVE_STEPS as f32;

/// Parameter value at sample `i`; the last sample lands exactly on 1.
fn param(i: usize) -> f32 {
    i as f32 / CURVE_STEPS as f32
}

/// Append a circle of radius `r` about `(cx, cy, cz)` in the XY plane.
///
/// `sweep` is the total angle covered, in radians, so a full circle is `TAU`.
pub fn circle(edges: &mut Matrix, cx: f32, cy: f32, cz: f32, r: f32, sweep: f32) {
    let at = |t: f32| {
        let angle = sweep * t;
        (r * angle.cos() + cx, r * angle.sin() + cy)
    };
    for i in 0..CURVE_STEPS {
        let (x1, y1) = at(param(i));
        let (x2, y2) = at(param(i + 1));
        edges.push_edge(x1, y1, cz, x2, y2, cz);
    }
    debug!("circle r={} at ({}, {}, {}): {} edges", r, cx, cy, cz, CURVE_STEPS);
}

/// Append a Hermite curve from `(x0, y0)` to `(x1, y1)` with end tangents
/// `(rx0, ry0)` and `(rx1, ry1)`.
#[allow(clippy::too_many_arguments)]
pub fn hermite(
    edges: &mut Matrix,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    rx0: f32,
    ry0: f32,
    rx1: f32,
    ry1: f32,
) -> Result<()> {
    let basis = Matrix4::new(
        2.0, -2.0, 1.0, 1.0, //
        -3.0, 3.0, -2.0, -1.0, //
        0.0, 0.0, 1.0, 0.0, //
        1.0, 0.0, 0.0, 0.0,
    );
    let coefficients = solve_cubic(
        &basis,
        Vector4::new(x0, x1, rx0, rx1),
        Vector4::new(y0, y1, ry0, ry1),
    )?;
    parametric(edges, &coefficients);
    debug!("hermite ({}, {}) -> ({}, {})", x0, y0, x1, y1);
    Ok(())
}

/// Append a cubic Bezier curve through control points `p0..p3`.
#[allow(clippy::too_many_arguments)]
pub fn bezier(
    edges: &mut Matrix,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    x3: f32,
    y3: f32,
) -> Result<()> {
    let basis = Matrix4::new(
        -1.0, 3.0, -3.0, 1.0, //
        3.0, -6.0, 3.0, 0.0, //
        -3.0, 3.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, 0.0,
    );
    let coefficients = solve_cubic(
        &basis,
        Vector4::new(x0, x1, x2, x3),
        Vector4::new(y0, y1, y2, y3),
    )?;
    parametric(edges, &coefficients);
    debug!("bezier ({}, {}) -> ({}, {})", x0, y0, x3, y3);
    Ok(())
}

/// Per-axis `(a, b, c, d)` coefficients of `a t^3 + b t^2 + c t + d`.
struct Cubic {
    x: Vector4<f32>,
    y: Vector4<f32>,
}

fn evaluate(k: &Vector4<f32>, t: f32) -> f32 {
    ((k[0] * t + k[1]) * t + k[2]) * t + k[3]
}

// Both axes ride through one multiply as two coefficient columns.
fn solve_cubic(basis: &Matrix4<f32>, xs: Vector4<f32>, ys: Vector4<f32>) -> Result<Cubic> {
    let basis = Matrix::from_matrix4(basis);
    let mut columns = Matrix::with_capacity(MatrixKind::Points, 2);
    columns.push_column(xs);
    columns.push_column(ys);
    multiply(&basis, &mut columns)?;
    Ok(Cubic {
        x: columns.columns()[0],
        y: columns.columns()[1],
    })
}

fn parametric(edges: &mut Matrix, cubic: &Cubic) {
    for i in 0..CURVE_STEPS {
        let (t1, t2) = (param(i), param(i + 1));
        edges.push_edge(
            evaluate(&cubic.x, t1),
            evaluate(&cubic.y, t1),
            0.0,
            evaluate(&cubic.x, t2),
            evaluate(&cubic.y, t2),
            0.0,
        );
    }
}
