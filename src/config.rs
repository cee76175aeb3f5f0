use std::path::PathBuf;
use std::time::Duration;
use crate::drivers::{PlotError, SnapshotNamer};
/// Fixed settings of the plotter. Nothing here is read from the command line
/// or the environment.
#[derive(Clone, Debug)]
pub struct PlotterConfig {
    /// Cadence of the window's tick.
    pub tick_interval: Duration,
    /// Upper bound of a single input readiness check.
    pub poll_timeout: Duration,
    /// Number of trailing samples shown and used for y scaling.
    pub window_len: usize,
    pub y_padding: f64,
    pub snapshot_dpi: u32,
    pub close_delay: Duration,
    pub output_dir: PathBuf,
    pub snapshot_base: String,
    pub snapshot_ext: String,
}
impl Default for PlotterConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(200),
            poll_timeout: Duration::from_millis(10),
            window_len: 100,
            y_padding: 0.1,
            snapshot_dpi: 300,
            close_delay: Duration::from_millis(500),
            output_dir: PathBuf::from("plots"),
            snapshot_base: "plot".to_owned(),
            snapshot_ext: "png".to_owned(),
        }
    }
}
impl PlotterConfig {
    /// Defaults with snapshots going to `<home>/Desktop/plots`.
    pub fn from_home() -> Result<Self, PlotError> {
        let home = dirs::home_dir().ok_or(PlotError::NoHomeDirectory)?;
        Ok(Self {
            output_dir: home.join("Desktop").join("plots"),
            ..Self::default()
        })
    }
    pub fn snapshot_namer(&self) -> SnapshotNamer {
        SnapshotNamer::new(
            self.output_dir.clone(),
            self.snapshot_base.clone(),
            self.snapshot_ext.clone(),
        )
    }
}
