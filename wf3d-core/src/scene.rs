/// Scene interpreter: runs parsed commands against a frame and transform stack
use std::f32::consts::TAU;

use log::{debug, info, warn};

use crate::curves;
use crate::error::{Error, Result};
use crate::frame::{Color, Frame};
use crate::matrix::{Matrix, MatrixKind};
use crate::raster;
use crate::script::Command;
use crate::solids;
use crate::stack::{TransformStack, DEFAULT_MAX_DEPTH};
use crate::transform::Transform;

/// Error type returned by [`FrameSink`] implementations.
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Receives finished frames for display or storage.
pub trait FrameSink {
    fn display(&mut self, frame: &Frame) -> std::result::Result<(), SinkError>;
    fn save(&mut self, frame: &Frame, name: &str) -> std::result::Result<(), SinkError>;
}

/// Fixed parameters for one script execution
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSettings {
    pub width: usize,
    pub height: usize,
    pub color: Color,
    /// Degrees between sphere samples.
    pub sphere_step: u32,
    /// Degrees between torus samples.
    pub torus_step: u32,
    pub max_stack_depth: usize,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            color: Color::new(255, 105, 180),
            sphere_step: 8,
            torus_step: 10,
            max_stack_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Whether execution should carry on after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Frame, transform stack and draw color for one script run.
pub struct Scene {
    settings: SceneSettings,
    frame: Frame,
    stack: TransformStack,
}

impl Scene {
    pub fn new(settings: SceneSettings) -> Self {
        Self {
            frame: Frame::new(settings.width, settings.height),
            stack: TransformStack::with_max_depth(settings.max_stack_depth),
            settings,
        }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn stack(&self) -> &TransformStack {
        &self.stack
    }

    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    /// Reset the frame and stack, then execute commands until `quit` or the end.
    pub fn run<S: FrameSink + ?Sized>(&mut self, commands: &[Command], sink: &mut S) -> Result<()> {
        self.frame.clear();
        self.stack = TransformStack::with_max_depth(self.settings.max_stack_depth);

        for command in commands {
            if self.execute(command, sink)? == Flow::Quit {
                debug!("quit");
                break;
            }
        }
        Ok(())
    }

    /// Execute a single command.
    pub fn execute<S: FrameSink + ?Sized>(&mut self, command: &Command, sink: &mut S) -> Result<Flow> {
        debug!("{}", command.name());

        match command {
            Command::Line { start, end } => {
                let mut edges = Matrix::with_capacity(MatrixKind::Edges, 2);
                edges.push_edge(start.x, start.y, start.z, end.x, end.y, end.z);
                self.draw_edges(edges)?;
            }
            Command::Circle { center, radius } => {
                let mut edges = Matrix::with_capacity(MatrixKind::Edges, 2 * curves::CURVE_STEPS);
                curves::circle(&mut edges, center.x, center.y, center.z, *radius, TAU);
                self.draw_edges(edges)?;
            }
            Command::Hermite([x0, y0, x1, y1, rx0, ry0, rx1, ry1]) => {
                let mut edges = Matrix::with_capacity(MatrixKind::Edges, 2 * curves::CURVE_STEPS);
                curves::hermite(&mut edges, *x0, *y0, *x1, *y1, *rx0, *ry0, *rx1, *ry1)?;
                self.draw_edges(edges)?;
            }
            Command::Bezier([x0, y0, x1, y1, x2, y2, x3, y3]) => {
                let mut edges = Matrix::with_capacity(MatrixKind::Edges, 2 * curves::CURVE_STEPS);
                curves::bezier(&mut edges, *x0, *y0, *x1, *y1, *x2, *y2, *x3, *y3)?;
                self.draw_edges(edges)?;
            }
            Command::Box { corner, size } => {
                let mut triangles = Matrix::with_capacity(MatrixKind::Triangles, 36);
                solids::cube(&mut triangles, corner.x, corner.y, corner.z, size.x, size.y, size.z);
                self.draw_polygons(triangles)?;
            }
            Command::Sphere { center, radius } => {
                let mut edges = Matrix::new(MatrixKind::Edges);
                solids::sphere(
                    &mut edges,
                    center.x,
                    center.y,
                    center.z,
                    *radius,
                    self.settings.sphere_step,
                )?;
                self.draw_edges(edges)?;
            }
            Command::Torus { center, r1, r2 } => {
                let mut triangles = Matrix::new(MatrixKind::Triangles);
                solids::torus(
                    &mut triangles,
                    center.x,
                    center.y,
                    center.z,
                    *r1,
                    *r2,
                    self.settings.torus_step,
                )?;
                self.draw_polygons(triangles)?;
            }
            Command::Scale(s) => self.stack.apply(&Transform::scale(s.x, s.y, s.z))?,
            Command::Move(d) => self.stack.apply(&Transform::translate(d.x, d.y, d.z))?,
            Command::Rotate { axis, degrees } => {
                self.stack.apply(&Transform::rotate(*axis, *degrees))?
            }
            Command::Push => {
                if let Err(e) = self.stack.push() {
                    warn!("push ignored: {}", e);
                }
            }
            Command::Pop => {
                if let Err(e) = self.stack.pop() {
                    warn!("pop ignored: {}", e);
                }
            }
            Command::Display => {
                info!("displaying frame ({} lit pixels)", self.frame.lit_pixels());
                sink.display(&self.frame).map_err(Error::Sink)?;
            }
            Command::Save(name) => {
                info!("saving frame to {}", name);
                sink.save(&self.frame, name).map_err(Error::Sink)?;
            }
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn draw_edges(&mut self, mut edges: Matrix) -> Result<()> {
        self.stack.transform(&mut edges)?;
        raster::draw_edges(&mut self.frame, &edges, self.settings.color)
    }

    fn draw_polygons(&mut self, mut triangles: Matrix) -> Result<()> {
        self.stack.transform(&mut triangles)?;
        let drawn = raster::draw_polygons(&mut self.frame, &triangles, self.settings.color)?;
        debug!("{} of {} triangles drawn", drawn, triangles.width() / 3);
        Ok(())
    }
}

/// Parse and run a script in a fresh scene, returning the final frame.
pub fn run_script<S: FrameSink + ?Sized>(
    source: &str,
    settings: SceneSettings,
    sink: &mut S,
) -> Result<Frame> {
    let commands = crate::script::parse_script(source)?;
    let mut scene = Scene::new(settings);
    scene.run(&commands, sink)?;
    Ok(scene.frame)
}
