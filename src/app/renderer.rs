//! Renderer Actor: dedicated thread that owns stdout.
//!
//! The main loop paints whole frames and hands them over; this thread
//! diffs each frame against the last one it showed and flushes the
//! resulting escape sequences in a single write.

use super::messages::RenderCommand;
use crate::render::diff::{render_diff, render_full, DiffState};
use crate::render::Grid;
use crossbeam_channel::Receiver;
use std::io::{self, Write};
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Render statistics, logged when the thread exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderStats {
    /// Total frames rendered.
    pub frames: u64,
    /// Total cells written across all frames.
    pub cells_changed: u64,
    /// Total bytes written to the terminal.
    pub bytes_written: u64,
    /// Smoothed render time in microseconds.
    pub avg_render_us: u64,
}

/// Diffing front buffer plus an output sink.
pub struct Renderer<W: Write> {
    current: Grid,
    diff_state: DiffState,
    output: Vec<u8>,
    sink: W,
    stats: RenderStats,
    needs_full_redraw: bool,
}

impl<W: Write> Renderer<W> {
    /// A renderer that assumes nothing about what is on screen.
    pub fn new(sink: W, width: u16, height: u16) -> Self {
        Self {
            current: Grid::new(width, height),
            diff_state: DiffState::new(),
            output: Vec::with_capacity(64 * 1024),
            sink,
            stats: RenderStats::default(),
            needs_full_redraw: true,
        }
    }

    /// Statistics so far.
    pub const fn stats(&self) -> RenderStats {
        self.stats
    }

    /// The sink (for tests).
    pub const fn sink(&self) -> &W {
        &self.sink
    }

    /// Show `next`, writing only what changed since the last frame.
    pub fn render(&mut self, next: Grid) -> io::Result<()> {
        let start = Instant::now();
        self.output.clear();
        self.output.extend_from_slice(b"\x1b[?25l");

        let result = if self.needs_full_redraw {
            self.needs_full_redraw = false;
            render_full(&next, &mut self.output, &mut self.diff_state)
        } else {
            render_diff(&self.current, &next, &mut self.output, &mut self.diff_state)
        };

        self.sink.write_all(&self.output)?;
        self.sink.flush()?;
        self.current = next;

        let elapsed = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        self.stats.frames += 1;
        self.stats.cells_changed += result.cells_changed as u64;
        self.stats.bytes_written += self.output.len() as u64;
        self.stats.avg_render_us = if self.stats.frames == 1 {
            elapsed
        } else {
            (self.stats.avg_render_us * 15 + elapsed) / 16
        };
        Ok(())
    }

    /// Forget the screen contents; the next frame is drawn in full.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.current.resize(width, height);
        self.diff_state.reset();
        self.needs_full_redraw = true;
    }
}

/// Renderer actor that handles terminal output.
pub struct RendererActor {
    handle: Option<JoinHandle<()>>,
}

impl RendererActor {
    /// Spawn the render thread writing to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS refuses to spawn the thread.
    pub fn spawn(receiver: Receiver<RenderCommand>, width: u16, height: u16) -> io::Result<Self> {
        let handle = thread::Builder::new()
            .name("codereel-render".to_string())
            .spawn(move || {
                let mut renderer = Renderer::new(io::stdout(), width, height);
                if let Err(e) = Self::run_loop(&receiver, &mut renderer) {
                    tracing::error!(error = %e, "render thread failed");
                }
                let stats = renderer.stats();
                tracing::debug!(
                    frames = stats.frames,
                    cells = stats.cells_changed,
                    bytes = stats.bytes_written,
                    avg_us = stats.avg_render_us,
                    "render thread exiting"
                );
            })?;

        Ok(Self { handle: Some(handle) })
    }

    /// Wait for the render thread to finish (send `Shutdown` first).
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("render thread panicked");
            }
        }
    }

    fn run_loop<W: Write>(receiver: &Receiver<RenderCommand>, renderer: &mut Renderer<W>) -> io::Result<()> {
        // Blocks until a command arrives; a dropped sender ends the loop.
        while let Ok(command) = receiver.recv() {
            match command {
                RenderCommand::Frame(grid) => renderer.render(*grid)?,
                RenderCommand::Resize { width, height } => renderer.resize(width, height),
                RenderCommand::Shutdown => break,
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for RendererActor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RendererActor")
            .field("running", &self.handle.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Pen;
    use crate::style::Rgb;

    #[test]
    fn test_first_frame_is_full_then_diffs() {
        let mut renderer = Renderer::new(Vec::new(), 4, 2);
        renderer.render(Grid::new(4, 2)).unwrap();
        assert_eq!(renderer.stats().cells_changed, 8);

        let mut next = Grid::new(4, 2);
        next.put_str(0, 1, "x", Pen::new(Rgb::WHITE, Rgb::BLACK), 4);
        renderer.render(next).unwrap();
        assert_eq!(renderer.stats().cells_changed, 9);
        assert_eq!(renderer.stats().frames, 2);
        assert!(String::from_utf8_lossy(renderer.sink()).ends_with('x'));
    }

    #[test]
    fn test_resize_forces_full_redraw() {
        let mut renderer = Renderer::new(Vec::new(), 2, 1);
        renderer.render(Grid::new(2, 1)).unwrap();
        renderer.resize(3, 1);
        renderer.render(Grid::new(3, 1)).unwrap();
        assert_eq!(renderer.stats().cells_changed, 5);
    }
}
