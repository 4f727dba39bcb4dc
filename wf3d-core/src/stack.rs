/// Relative coordinate system stack
use log::debug;

use crate::error::{Error, Result};
use crate::matrix::{multiply, Matrix};

/// Default bound on the number of nested coordinate frames.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Stack of cumulative transforms, one per nested coordinate frame.
///
/// The base frame is the identity and can never be popped, so the stack is
/// never empty.
#[derive(Debug, Clone)]
pub struct TransformStack {
    frames: Vec<Matrix>,
    max_depth: usize,
}

impl TransformStack {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        let mut frames = Vec::with_capacity(max_depth.clamp(1, 16));
        frames.push(Matrix::identity());
        Self {
            frames,
            max_depth: max_depth.max(1),
        }
    }

    /// Number of frames, including the base frame.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The current (innermost) frame.
    pub fn peek(&self) -> &Matrix {
        &self.frames[self.frames.len() - 1]
    }

    /// Duplicate the top frame so later transforms compose under it.
    pub fn push(&mut self) -> Result<()> {
        if self.frames.len() >= self.max_depth {
            return Err(Error::StackOverflow(self.max_depth));
        }
        let top = self.peek().clone();
        self.frames.push(top);
        debug!("pushed coordinate frame, depth {}", self.depth());
        Ok(())
    }

    /// Discard the top frame, exposing its parent.
    pub fn pop(&mut self) -> Result<Matrix> {
        if self.frames.len() == 1 {
            return Err(Error::StackUnderflow);
        }
        let popped = self.frames.pop().ok_or(Error::StackUnderflow)?;
        debug!("popped coordinate frame, depth {}", self.depth());
        Ok(popped)
    }

    /// Compose a local transform into the top frame: `top := top * local`.
    pub fn apply(&mut self, local: &Matrix) -> Result<()> {
        let mut composed = local.clone();
        multiply(self.peek(), &mut composed)?;
        let last = self.frames.len() - 1;
        self.frames[last] = composed;
        Ok(())
    }

    /// Transform a primitive list into the current frame.
    pub fn transform(&self, list: &mut Matrix) -> Result<()> {
        multiply(self.peek(), list)
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}
