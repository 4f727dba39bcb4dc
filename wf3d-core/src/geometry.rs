/// Primitive views over edge and triangle lists
use nalgebra::{Point3, Vector3};

/// A line segment between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub start: Point3<f32>,
    pub end: Point3<f32>,
}

impl Edge {
    pub fn new(start: Point3<f32>, end: Point3<f32>) -> Self {
        Self { start, end }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Point3<f32>; 3],
}

impl Triangle {
    pub fn new(v0: Point3<f32>, v1: Point3<f32>, v2: Point3<f32>) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Unnormalized face normal, `(v1 - v0) x (v2 - v0)`
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0];
        let v1 = self.vertices[1];
        let v2 = self.vertices[2];

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2)
    }

    /// True when the face points toward a viewer looking down the -z axis.
    pub fn faces_viewer(&self) -> bool {
        self.calculate_normal().z > 0.0
    }

    /// The three boundary edges in winding order.
    pub fn edges(&self) -> [Edge; 3] {
        let [a, b, c] = self.vertices;
        [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_clockwise_faces_viewer() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        assert!((tri.calculate_normal() - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-6);
        assert!(tri.faces_viewer());
    }

    #[test]
    fn test_clockwise_faces_away() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        );
        assert!(!tri.faces_viewer());
    }

    #[test]
    fn test_edge_on_triangle_is_culled() {
        // Lies in the y-z plane, so its normal has no z component.
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        );
        assert!(!tri.faces_viewer());
    }

    #[test]
    fn test_edges_close_the_loop() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        );
        let [_, _, last] = tri.edges();
        assert_eq!(last.start, tri.vertices[2]);
        assert_eq!(last.end, tri.vertices[0]);
    }
}
