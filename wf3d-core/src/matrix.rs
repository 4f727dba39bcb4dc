/// Homogeneous-coordinate column store shared by transforms and primitive lists
use std::fmt;

use nalgebra::{Matrix4, Point3, Vector4};

use crate::error::{Error, Result};
use crate::geometry::{Edge, Triangle};

/// Every column is a homogeneous `(x, y, z, w)` point.
pub const ROWS: usize = 4;

/// What the columns of a [`Matrix`] mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixKind {
    /// Exactly four columns forming a 4x4 affine transform.
    Transform,
    /// Free-standing points (or raw coefficient columns).
    Points,
    /// Consecutive column pairs, one pair per edge.
    Edges,
    /// Consecutive column triples, one triple per triangle.
    Triangles,
}

impl MatrixKind {
    /// Number of columns that make up one logical element.
    pub fn stride(self) -> usize {
        match self {
            MatrixKind::Transform => ROWS,
            MatrixKind::Points => 1,
            MatrixKind::Edges => 2,
            MatrixKind::Triangles => 3,
        }
    }
}

impl fmt::Display for MatrixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatrixKind::Transform => "transform",
            MatrixKind::Points => "point-list",
            MatrixKind::Edges => "edge-list",
            MatrixKind::Triangles => "triangle-list",
        };
        f.write_str(name)
    }
}

/// A 4xN matrix stored column by column.
///
/// The active width is the number of stored columns. Capacity is tracked
/// separately and doubles whenever an append would exceed it.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    kind: MatrixKind,
    columns: Vec<Vector4<f32>>,
}

impl Matrix {
    pub fn new(kind: MatrixKind) -> Self {
        Self::with_capacity(kind, 1)
    }

    /// Allocate an empty matrix able to hold `capacity` columns before growing.
    pub fn with_capacity(kind: MatrixKind, capacity: usize) -> Self {
        Self {
            kind,
            columns: Vec::with_capacity(capacity.max(1)),
        }
    }

    /// The 4x4 identity transform.
    pub fn identity() -> Self {
        let mut m = Self::with_capacity(MatrixKind::Transform, ROWS);
        m.set_identity();
        m
    }

    pub fn from_matrix4(m: &Matrix4<f32>) -> Self {
        Self {
            kind: MatrixKind::Transform,
            columns: (0..ROWS).map(|c| m.column(c).into_owned()).collect(),
        }
    }

    /// Overwrite this matrix with the 4x4 identity, retagging it as a transform.
    pub fn set_identity(&mut self) {
        self.kind = MatrixKind::Transform;
        self.columns.clear();
        let identity = Matrix4::<f32>::identity();
        for c in 0..ROWS {
            self.push_column(identity.column(c).into_owned());
        }
    }

    /// View a transform as an nalgebra matrix.
    pub fn to_matrix4(&self) -> Result<Matrix4<f32>> {
        if self.width() != ROWS {
            return Err(Error::DimensionMismatch {
                left: self.width(),
                right: ROWS,
            });
        }
        Ok(Matrix4::from_columns(&self.columns))
    }

    pub fn kind(&self) -> MatrixKind {
        self.kind
    }

    pub fn rows(&self) -> usize {
        ROWS
    }

    /// Active column count.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn capacity(&self) -> usize {
        self.columns.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Vector4<f32>] {
        &self.columns
    }

    /// The xyz part of column `index`, ignoring `w`.
    pub fn point(&self, index: usize) -> Option<Point3<f32>> {
        self.columns
            .get(index)
            .map(|c| Point3::new(c.x, c.y, c.z))
    }

    /// Append a raw homogeneous column.
    pub fn push_column(&mut self, column: Vector4<f32>) {
        self.grow_for(1);
        self.columns.push(column);
    }

    /// Append an affine point (`w = 1`).
    pub fn push_point(&mut self, x: f32, y: f32, z: f32) {
        self.push_column(Vector4::new(x, y, z, 1.0));
    }

    /// Append one edge as two consecutive columns.
    pub fn push_edge(&mut self, x1: f32, y1: f32, z1: f32, x2: f32, y2: f32, z2: f32) {
        debug_assert_eq!(self.kind, MatrixKind::Edges);
        self.grow_for(2);
        self.push_point(x1, y1, z1);
        self.push_point(x2, y2, z2);
    }

    /// Append one triangle as three consecutive columns.
    #[allow(clippy::too_many_arguments)]
    pub fn push_triangle(
        &mut self,
        x1: f32,
        y1: f32,
        z1: f32,
        x2: f32,
        y2: f32,
        z2: f32,
        x3: f32,
        y3: f32,
        z3: f32,
    ) {
        debug_assert_eq!(self.kind, MatrixKind::Triangles);
        self.grow_for(3);
        self.push_point(x1, y1, z1);
        self.push_point(x2, y2, z2);
        self.push_point(x3, y3, z3);
    }

    /// Check that the active width agrees with the matrix's tag.
    pub fn check_shape(&self) -> Result<()> {
        let stride = self.kind.stride();
        let ok = match self.kind {
            MatrixKind::Transform => self.width() == ROWS,
            _ => self.width() % stride == 0,
        };
        if ok {
            Ok(())
        } else {
            Err(Error::RaggedMatrix {
                kind: self.kind,
                width: self.width(),
                stride,
            })
        }
    }

    /// Iterate an edge list two columns at a time.
    pub fn edges(&self) -> Result<impl Iterator<Item = Edge> + '_> {
        self.expect_kind(MatrixKind::Edges)?;
        self.check_shape()?;
        Ok(self.columns.chunks_exact(2).map(|pair| {
            Edge::new(
                Point3::new(pair[0].x, pair[0].y, pair[0].z),
                Point3::new(pair[1].x, pair[1].y, pair[1].z),
            )
        }))
    }

    /// Iterate a triangle list three columns at a time.
    pub fn triangles(&self) -> Result<impl Iterator<Item = Triangle> + '_> {
        self.expect_kind(MatrixKind::Triangles)?;
        self.check_shape()?;
        Ok(self.columns.chunks_exact(3).map(|tri| {
            Triangle::new(
                Point3::new(tri[0].x, tri[0].y, tri[0].z),
                Point3::new(tri[1].x, tri[1].y, tri[1].z),
                Point3::new(tri[2].x, tri[2].y, tri[2].z),
            )
        }))
    }

    /// Apply `transform` to every column of this matrix in place.
    pub fn transform_by(&mut self, transform: &Matrix) -> Result<()> {
        multiply(transform, self)
    }

    fn expect_kind(&self, expected: MatrixKind) -> Result<()> {
        if self.kind == expected {
            Ok(())
        } else {
            Err(Error::KindMismatch {
                expected,
                found: self.kind,
            })
        }
    }

    // Doubles capacity until `extra` more columns fit.
    fn grow_for(&mut self, extra: usize) {
        let needed = self.columns.len() + extra;
        let mut capacity = self.columns.capacity().max(1);
        if needed <= capacity {
            return;
        }
        while capacity < needed {
            capacity *= 2;
        }
        self.columns.reserve_exact(capacity - self.columns.len());
    }
}

/// Compute `a * b`, overwriting the columns of `b` with the product.
///
/// `a` must be exactly four columns wide; every matrix has four rows, so this
/// is the only shape check needed.
pub fn multiply(a: &Matrix, b: &mut Matrix) -> Result<()> {
    if a.width() != b.rows() {
        return Err(Error::DimensionMismatch {
            left: a.width(),
            right: b.rows(),
        });
    }
    let lhs = a.to_matrix4()?;
    for column in b.columns.iter_mut() {
        *column = lhs * *column;
    }
    Ok(())
}
