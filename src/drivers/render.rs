use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};
use crate::drivers::plot::{render_frame_png, PlotStyle};
use crate::drivers::PlotError;
/// Drawing surface the controller talks to.
pub trait Renderer {
    fn draw_window(&mut self, xs: &[f64], ys: &[f64]);
    fn set_x_limits(&mut self, min: f64, max: f64);
    fn set_y_limits(&mut self, min: f64, max: f64);
    /// Persists the current frame at `path`.
    fn save(&mut self, path: &Path, dpi: u32) -> Result<(), PlotError>;
    /// Asks the surface to close itself after `delay`. Must not block.
    fn schedule_close(&mut self, delay: Duration) -> Result<(), PlotError>;
}
/// What is currently on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotFrame {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub x_limits: (f64, f64),
    pub y_limits: (f64, f64),
}
impl Default for PlotFrame {
    fn default() -> Self {
        Self {
            xs: Vec::new(),
            ys: Vec::new(),
            x_limits: (0.0, 100.0),
            y_limits: (-1.0, 1.0),
        }
    }
}
impl PlotFrame {
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.xs
            .iter()
            .zip(&self.ys)
            .map(|(x, y)| [*x, *y])
            .collect()
    }
}
/// In-memory renderer: keeps the frame for whoever displays it and writes
/// PNG snapshots with plotters.
#[derive(Debug, Default)]
pub struct FrameCanvas {
    frame: PlotFrame,
    style: PlotStyle,
    close_at: Option<Instant>,
}
impl FrameCanvas {
    pub fn new(style: PlotStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }
    pub fn frame(&self) -> &PlotFrame {
        &self.frame
    }
    pub fn style(&self) -> &PlotStyle {
        &self.style
    }
    pub fn close_requested(&self) -> bool {
        self.close_at.is_some()
    }
    pub fn close_due(&self, now: Instant) -> bool {
        self.close_at.map_or(false, |at| now >= at)
    }
    /// Time left until a scheduled close, if any.
    pub fn close_remaining(&self, now: Instant) -> Option<Duration> {
        self.close_at.map(|at| at.saturating_duration_since(now))
    }
}
impl Renderer for FrameCanvas {
    fn draw_window(&mut self, xs: &[f64], ys: &[f64]) {
        self.frame.xs.clear();
        self.frame.xs.extend_from_slice(xs);
        self.frame.ys.clear();
        self.frame.ys.extend_from_slice(ys);
    }
    fn set_x_limits(&mut self, min: f64, max: f64) {
        self.frame.x_limits = (min, max);
    }
    fn set_y_limits(&mut self, min: f64, max: f64) {
        self.frame.y_limits = (min, max);
    }
    fn save(&mut self, path: &Path, dpi: u32) -> Result<(), PlotError> {
        let png = render_frame_png(&self.frame, &self.style, dpi)?;
        fs::write(path, png)?;
        log::debug!("wrote {} at {dpi} dpi", path.display());
        Ok(())
    }
    fn schedule_close(&mut self, delay: Duration) -> Result<(), PlotError> {
        if self.close_at.is_some() {
            return Err(PlotError::CloseAlreadyScheduled);
        }
        self.close_at = Some(Instant::now() + delay);
        Ok(())
    }
}
