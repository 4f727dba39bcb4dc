/// Line and wireframe rasterization onto a [`Frame`]
use log::trace;
use nalgebra::Point3;

use crate::error::Result;
use crate::frame::{Color, Frame};
use crate::matrix::Matrix;

/// Write one pixel; coordinates outside the frame are clipped silently.
pub fn plot(frame: &mut Frame, x: i32, y: i32, color: Color) {
    frame.set(x, y, color);
}

/// Draw a line with integer error accumulation, endpoints included.
///
/// Works for every octant: the major axis advances each step and the minor
/// axis advances when the accumulated error crosses over. Segments are
/// clipped to the frame first, so any endpoints are accepted.
pub fn draw_line(frame: &mut Frame, color: Color, x1: i32, y1: i32, x2: i32, y2: i32) {
    draw_segment(
        frame,
        color,
        (x1 as f64, y1 as f64),
        (x2 as f64, y2 as f64),
    );
}

fn draw_segment(frame: &mut Frame, color: Color, start: (f64, f64), end: (f64, f64)) {
    if ![start.0, start.1, end.0, end.1].iter().all(|v| v.is_finite()) {
        trace!("skipping non-finite segment {:?} -> {:?}", start, end);
        return;
    }
    let Some((start, end)) = clip(frame, start, end) else {
        return;
    };

    // Clipped endpoints lie within one pixel of the frame.
    let (x1, y1) = (start.0.round() as i64, start.1.round() as i64);
    let (x2, y2) = (end.0.round() as i64, end.1.round() as i64);
    let dx = (x2 - x1).abs();
    let dy = -(y2 - y1).abs();
    let sx = if x1 < x2 { 1 } else { -1 };
    let sy = if y1 < y2 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x1, y1);

    loop {
        plot(frame, x as i32, y as i32, color);
        if x == x2 && y == y2 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Liang-Barsky clip against the frame grown by one pixel on every side.
///
/// Returns `None` when the segment misses the frame entirely. A clipped
/// endpoint sits exactly on the boundary it crossed, and both coordinates are
/// clamped to the box so huge inputs cannot leave a long walk behind.
fn clip(frame: &Frame, start: (f64, f64), end: (f64, f64)) -> Option<((f64, f64), (f64, f64))> {
    let (min_x, max_x) = (-1.0, frame.width() as f64);
    let (min_y, max_y) = (-1.0, frame.height() as f64);
    let dx = end.0 - start.0;
    let dy = end.1 - start.1;

    // (p, q, boundary) per side: left, right, bottom, top.
    let sides = [
        (-dx, start.0 - min_x, Boundary::X(min_x)),
        (dx, max_x - start.0, Boundary::X(max_x)),
        (-dy, start.1 - min_y, Boundary::Y(min_y)),
        (dy, max_y - start.1, Boundary::Y(max_y)),
    ];

    let (mut t0, mut t1) = (0.0, 1.0);
    let (mut entry, mut exit) = (None, None);
    for (p, q, boundary) in sides {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            if r > t0 {
                t0 = r;
                entry = Some(boundary);
            }
        } else {
            if r < t0 {
                return None;
            }
            if r < t1 {
                t1 = r;
                exit = Some(boundary);
            }
        }
    }

    let at = |t: f64, boundary: Option<Boundary>, fallback: (f64, f64)| {
        let (x, y) = match boundary {
            None => fallback,
            Some(Boundary::X(x)) => (x, start.1 + t * dy),
            Some(Boundary::Y(y)) => (start.0 + t * dx, y),
        };
        (x.clamp(min_x, max_x), y.clamp(min_y, max_y))
    };
    Some((at(t0, entry, start), at(t1, exit, end)))
}

#[derive(Debug, Clone, Copy)]
enum Boundary {
    X(f64),
    Y(f64),
}

/// Orthographic projection: round x and y, drop z.
fn project(p: Point3<f32>) -> (f64, f64) {
    (p.x.round() as f64, p.y.round() as f64)
}

/// Draw every edge of an edge list.
pub fn draw_edges(frame: &mut Frame, edges: &Matrix, color: Color) -> Result<()> {
    for edge in edges.edges()? {
        draw_segment(frame, color, project(edge.start), project(edge.end));
    }
    Ok(())
}

/// Draw the outline of every triangle that faces the viewer.
///
/// Returns the number of triangles drawn; the rest were culled.
pub fn draw_polygons(frame: &mut Frame, triangles: &Matrix, color: Color) -> Result<usize> {
    let mut drawn = 0;
    for triangle in triangles.triangles()? {
        if !triangle.faces_viewer() {
            continue;
        }
        for edge in triangle.edges() {
            draw_segment(frame, color, project(edge.start), project(edge.end));
        }
        drawn += 1;
    }
    Ok(drawn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::MatrixKind;

    const WHITE: Color = Color::new(255, 255, 255);

    fn lit(frame: &Frame) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for y in 0..frame.height() as i32 {
            for x in 0..frame.width() as i32 {
                if frame.get(x, y) != Some(Color::BLACK) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_horizontal_line() {
        let mut frame = Frame::new(10, 10);
        draw_line(&mut frame, WHITE, 0, 0, 5, 0);
        assert_eq!(lit(&frame), (0..=5).map(|x| (x, 0)).collect::<Vec<_>>());
    }

    #[test]
    fn test_vertical_line() {
        let mut frame = Frame::new(10, 10);
        draw_line(&mut frame, WHITE, 0, 0, 0, 5);
        let mut expected: Vec<(i32, i32)> = (0..=5).map(|y| (0, y)).collect();
        expected.sort_by_key(|&(x, y)| (y, x));
        assert_eq!(lit(&frame), expected);
    }

    #[test]
    fn test_diagonal_line() {
        let mut frame = Frame::new(10, 10);
        draw_line(&mut frame, WHITE, 0, 0, 5, 5);
        assert_eq!(lit(&frame), (0..=5).map(|i| (i, i)).collect::<Vec<_>>());
    }

    #[test]
    fn test_all_octants_cover_both_endpoints() {
        let center = (20, 20);
        let targets = [
            (30, 24),
            (24, 30),
            (16, 30),
            (10, 24),
            (10, 16),
            (16, 10),
            (24, 10),
            (30, 16),
        ];
        for (tx, ty) in targets {
            let mut frame = Frame::new(41, 41);
            draw_line(&mut frame, WHITE, center.0, center.1, tx, ty);
            let major = (tx - center.0).abs().max((ty - center.1).abs());
            assert_eq!(frame.lit_pixels(), major as usize + 1);
            assert_eq!(frame.get(center.0, center.1), Some(WHITE));
            assert_eq!(frame.get(tx, ty), Some(WHITE));
        }
    }

    #[test]
    fn test_reversed_line_covers_same_count() {
        let mut forward = Frame::new(20, 20);
        let mut backward = Frame::new(20, 20);
        draw_line(&mut forward, WHITE, 1, 2, 17, 9);
        draw_line(&mut backward, WHITE, 17, 9, 1, 2);
        assert_eq!(forward.lit_pixels(), backward.lit_pixels());
    }

    #[test]
    fn test_plot_out_of_bounds_is_noop() {
        let mut frame = Frame::new(8, 8);
        plot(&mut frame, -1, 0, WHITE);
        plot(&mut frame, 8, 0, WHITE);
        plot(&mut frame, 0, 8, WHITE);
        assert_eq!(frame.lit_pixels(), 0);
    }

    #[test]
    fn test_line_partially_outside_is_clipped() {
        let mut frame = Frame::new(8, 8);
        draw_line(&mut frame, WHITE, -4, 3, 11, 3);
        assert_eq!(frame.lit_pixels(), 8);
    }

    #[test]
    fn test_huge_endpoints_are_clipped() {
        let mut frame = Frame::new(8, 8);
        draw_line(&mut frame, WHITE, 0, 0, 2_000_000_000, 0);
        assert_eq!(lit(&frame), (0..8).map(|x| (x, 0)).collect::<Vec<_>>());

        let mut frame = Frame::new(8, 8);
        draw_line(&mut frame, WHITE, i32::MIN, 3, i32::MAX, 3);
        assert_eq!(frame.lit_pixels(), 8);

        let mut frame = Frame::new(8, 8);
        draw_line(&mut frame, WHITE, i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert_eq!(lit(&frame), (0..8).map(|i| (i, i)).collect::<Vec<_>>());
    }

    #[test]
    fn test_line_missing_the_frame_draws_nothing() {
        let mut frame = Frame::new(8, 8);
        draw_line(&mut frame, WHITE, -50, 20, 50, 20);
        draw_line(&mut frame, WHITE, -1_000_000_000, -5, -3, 1_000_000_000);
        assert_eq!(frame.lit_pixels(), 0);
    }

    #[test]
    fn test_non_finite_edges_are_skipped() {
        let mut frame = Frame::new(8, 8);
        let mut edges = Matrix::new(MatrixKind::Edges);
        edges.push_edge(f32::NAN, 0.0, 0.0, 4.0, 4.0, 0.0);
        edges.push_edge(0.0, 0.0, 0.0, f32::INFINITY, 0.0, 0.0);
        edges.push_edge(1.0e30, 1.0, 0.0, -1.0e30, 1.0, 0.0);
        draw_edges(&mut frame, &edges, WHITE).unwrap();
        assert_eq!(lit(&frame), (0..8).map(|x| (x, 1)).collect::<Vec<_>>());
    }

    #[test]
    fn test_draw_edges_rounds_coordinates() {
        let mut frame = Frame::new(10, 10);
        let mut edges = Matrix::new(MatrixKind::Edges);
        edges.push_edge(0.6, 1.4, 99.0, 4.4, 1.4, -99.0);
        draw_edges(&mut frame, &edges, WHITE).unwrap();
        assert_eq!(lit(&frame), (1..=4).map(|x| (x, 1)).collect::<Vec<_>>());
    }

    #[test]
    fn test_draw_edges_rejects_triangle_list() {
        let mut frame = Frame::new(10, 10);
        let tris = Matrix::new(MatrixKind::Triangles);
        assert!(draw_edges(&mut frame, &tris, WHITE).is_err());
    }

    #[test]
    fn test_back_facing_triangle_is_culled() {
        let mut frame = Frame::new(20, 20);
        let mut tris = Matrix::new(MatrixKind::Triangles);
        tris.push_triangle(2.0, 2.0, 0.0, 2.0, 12.0, 0.0, 12.0, 2.0, 0.0);
        assert_eq!(draw_polygons(&mut frame, &tris, WHITE).unwrap(), 0);
        assert_eq!(frame.lit_pixels(), 0);
    }

    #[test]
    fn test_front_facing_triangle_draws_outline() {
        let mut frame = Frame::new(20, 20);
        let mut tris = Matrix::new(MatrixKind::Triangles);
        tris.push_triangle(2.0, 2.0, 0.0, 12.0, 2.0, 0.0, 2.0, 12.0, 0.0);
        assert_eq!(draw_polygons(&mut frame, &tris, WHITE).unwrap(), 1);

        // Two 11-pixel legs and an 11-pixel hypotenuse sharing three corners.
        assert_eq!(frame.lit_pixels(), 30);
        assert_eq!(frame.get(7, 7), Some(WHITE));
        assert_eq!(frame.get(5, 5), Some(Color::BLACK));
    }
}
