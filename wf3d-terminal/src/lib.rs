/// Terminal front end: frame display, image output and configuration
use crossterm::{
    cursor,
    event::{self, Event, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use log::{info, warn};
use std::io::{self, stdout, IsTerminal, Write};
use std::time::Duration;
use wf3d_core::{Frame, FrameSink, SinkError};

pub mod config;
pub mod output;
pub mod renderer;

pub use config::Wf3dConfig;
pub use renderer::AsciiRenderer;

/// Hands frames to the terminal and to image files.
pub struct TerminalSink {
    display_enabled: bool,
    saved: Vec<std::path::PathBuf>,
}

impl TerminalSink {
    pub fn new(display_enabled: bool) -> Self {
        Self {
            display_enabled,
            saved: Vec::new(),
        }
    }

    /// Paths written by `save` commands so far.
    pub fn saved(&self) -> &[std::path::PathBuf] {
        &self.saved
    }
}

impl FrameSink for TerminalSink {
    fn display(&mut self, frame: &Frame) -> Result<(), SinkError> {
        if !self.display_enabled {
            info!("display disabled, skipping");
            return Ok(());
        }
        if !stdout().is_terminal() {
            warn!("stdout is not a terminal, skipping display");
            return Ok(());
        }
        FrameViewer::new(frame).run()?;
        Ok(())
    }

    fn save(&mut self, frame: &Frame, name: &str) -> Result<(), SinkError> {
        let path = output::save_frame(frame, name)?;
        info!("wrote {}", path.display());
        self.saved.push(path);
        Ok(())
    }
}

/// Full-screen view of one frame; any key returns.
pub struct FrameViewer<'a> {
    frame: &'a Frame,
    running: bool,
}

impl<'a> FrameViewer<'a> {
    pub fn new(frame: &'a Frame) -> Self {
        Self {
            frame,
            running: true,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        self.render()?;
        while self.running {
            if event::poll(Duration::from_millis(100))? {
                match event::read()? {
                    Event::Key(KeyEvent {
                        kind: KeyEventKind::Press,
                        ..
                    }) => self.running = false,
                    Event::Resize(_, _) => self.render()?,
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        // Bottom line is kept for the status bar.
        let rows = (height as usize).saturating_sub(1);
        let mut renderer = AsciiRenderer::new(width as usize, rows);
        renderer.resample(self.frame);

        let mut stdout = stdout();
        queue!(stdout, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;
        renderer.draw(&mut stdout)?;

        queue!(
            stdout,
            cursor::MoveTo(0, height.saturating_sub(1)),
            SetForegroundColor(TermColor::Yellow),
            Print(format!(
                "WF3D | {}x{} frame, {} lit pixels | press any key to continue",
                self.frame.width(),
                self.frame.height(),
                self.frame.lit_pixels()
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wf3d_core::{run_script, SceneSettings};

    #[test]
    fn test_disabled_display_is_a_noop() {
        let mut sink = TerminalSink::new(false);
        assert!(sink.display(&Frame::new(2, 2)).is_ok());
    }

    #[test]
    fn test_script_saves_through_sink() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("line");
        let script = format!(
            "line\n0 0 0 10 10 0\nsave\n{}\ndisplay\n",
            target.to_str().unwrap()
        );

        let mut sink = TerminalSink::new(false);
        let settings = SceneSettings {
            width: 16,
            height: 16,
            ..SceneSettings::default()
        };
        run_script(&script, settings, &mut sink).unwrap();

        assert_eq!(sink.saved().to_vec(), vec![target.with_extension("png")]);
        assert!(sink.saved()[0].exists());
    }
}
