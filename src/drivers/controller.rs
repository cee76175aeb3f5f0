use std::path::PathBuf;
use std::time::Duration;
use crate::config::PlotterConfig;
use crate::drivers::buffer::{Sample, SampleBuffer, WindowBounds};
use crate::drivers::render::Renderer;
use crate::drivers::sentinel::is_sentinel;
use crate::drivers::snapshot::SnapshotNamer;
use crate::drivers::source::{LineSource, StreamReader};
use crate::types::{StreamState, TickOutcome};
/// Three decimals, with non-finite values spelled `nan`, `inf`, `-inf`.
fn status_value(value: f64) -> String {
    if value.is_nan() {
        "nan".to_owned()
    } else {
        format!("{value:.3}")
    }
}
/// Tick-driven state machine: reads whatever input is ready, keeps the
/// samples, redraws, and on `STOP` saves a snapshot and asks the window to close.
pub struct PlotController<S: LineSource> {
    reader: StreamReader<S>,
    buffer: SampleBuffer,
    state: StreamState,
    namer: SnapshotNamer,
    window_len: usize,
    y_padding: f64,
    snapshot_dpi: u32,
    close_delay: Duration,
}
impl<S: LineSource> PlotController<S> {
    pub fn new(source: S, config: &PlotterConfig) -> Self {
        Self {
            reader: StreamReader::new(source, config.poll_timeout),
            buffer: SampleBuffer::new(),
            state: StreamState::Running,
            namer: config.snapshot_namer(),
            window_len: config.window_len,
            y_padding: config.y_padding,
            snapshot_dpi: config.snapshot_dpi,
            close_delay: config.close_delay,
        }
    }
    pub fn state(&self) -> StreamState {
        self.state
    }
    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }
    pub fn window(&self) -> &[Sample] {
        self.buffer.window(self.window_len)
    }
    pub fn source_mut(&mut self) -> &mut S {
        self.reader.source_mut()
    }
    pub fn on_tick<R: Renderer>(&mut self, renderer: &mut R) -> TickOutcome {
        if self.state == StreamState::Finished {
            return TickOutcome::idle(self.state);
        }
        let mut accepted = 0;
        let mut stop_requested = false;
        for line in self.reader.drain() {
            if is_sentinel(&line) {
                // anything queued behind the sentinel is dropped
                log::info!("stop token received after {} samples", self.buffer.len());
                stop_requested = true;
                break;
            }
            match line.trim().parse::<f64>() {
                Ok(value) => {
                    self.buffer.append(value);
                    accepted += 1;
                    println!("Plotting {} → {}", self.buffer.len(), status_value(value));
                }
                Err(_) => log::trace!("ignoring non-numeric line {line:?}"),
            }
        }
        self.redraw(renderer);
        let snapshot = if stop_requested {
            self.finalize(renderer)
        } else {
            None
        };
        TickOutcome {
            accepted,
            state: self.state,
            snapshot,
        }
    }
    fn redraw<R: Renderer>(&self, renderer: &mut R) {
        let window = self.window();
        if window.is_empty() {
            return;
        }
        let xs: Vec<f64> = window.iter().map(|s| s.index as f64).collect();
        let ys: Vec<f64> = window.iter().map(|s| s.value).collect();
        renderer.draw_window(&xs, &ys);
        let bounds =
            WindowBounds::from_window(window, self.buffer.len(), self.window_len, self.y_padding);
        renderer.set_x_limits(bounds.x.0, bounds.x.1);
        if let Some((y_min, y_max)) = bounds.y {
            renderer.set_y_limits(y_min, y_max);
        }
    }
    fn finalize<R: Renderer>(&mut self, renderer: &mut R) -> Option<PathBuf> {
        let saved = match self
            .namer
            .next_path()
            .and_then(|path| renderer.save(&path, self.snapshot_dpi).map(|()| path))
        {
            Ok(path) => {
                println!("Plot saved to: {}", path.display());
                Some(path)
            }
            Err(err) => {
                log::warn!("snapshot not saved: {err}");
                None
            }
        };
        if let Err(err) = renderer.schedule_close(self.close_delay) {
            log::warn!("close fallback: {err}");
        }
        self.state = StreamState::Finished;
        log::info!("stream finished");
        saved
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::render::FrameCanvas;
    use crate::drivers::source::ManualSource;
    use crate::drivers::PlotError;
    use std::fs;
    use std::path::Path;
    #[derive(Default)]
    struct RecordingRenderer {
        draws: Vec<(Vec<f64>, Vec<f64>)>,
        x_limits: Option<(f64, f64)>,
        y_limits: Option<(f64, f64)>,
        saves: Vec<(PathBuf, u32)>,
        close_requests: Vec<Duration>,
        fail_save: bool,
        fail_close: bool,
    }
    impl Renderer for RecordingRenderer {
        fn draw_window(&mut self, xs: &[f64], ys: &[f64]) {
            self.draws.push((xs.to_vec(), ys.to_vec()));
        }
        fn set_x_limits(&mut self, min: f64, max: f64) {
            self.x_limits = Some((min, max));
        }
        fn set_y_limits(&mut self, min: f64, max: f64) {
            self.y_limits = Some((min, max));
        }
        fn save(&mut self, path: &Path, dpi: u32) -> Result<(), PlotError> {
            if self.fail_save {
                return Err(PlotError::Plot("disk full".into()));
            }
            fs::write(path, b"")?;
            self.saves.push((path.to_path_buf(), dpi));
            Ok(())
        }
        fn schedule_close(&mut self, delay: Duration) -> Result<(), PlotError> {
            if self.fail_close {
                return Err(PlotError::Window("no event loop".into()));
            }
            self.close_requests.push(delay);
            Ok(())
        }
    }
    fn controller(dir: &Path, lines: &[&str]) -> PlotController<ManualSource> {
        let config = PlotterConfig {
            output_dir: dir.to_path_buf(),
            ..PlotterConfig::default()
        };
        PlotController::new(ManualSource::new(lines.iter().copied()), &config)
    }
    #[test]
    fn numeric_lines_are_buffered_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = ["1.5", "-2", "1e3", "0.001", "42"];
        let mut ctl = controller(dir.path(), &inputs);
        let mut renderer = RecordingRenderer::default();
        let outcome = ctl.on_tick(&mut renderer);
        assert_eq!(outcome.accepted, inputs.len());
        assert_eq!(outcome.state, StreamState::Running);
        assert!(outcome.snapshot.is_none());
        let samples = ctl.buffer().samples();
        assert_eq!(samples.len(), inputs.len());
        for (i, (sample, raw)) in samples.iter().zip(inputs).enumerate() {
            assert_eq!(sample.index, i);
            assert_eq!(sample.value, raw.parse::<f64>().unwrap());
        }
        assert_eq!(renderer.x_limits, Some((0.0, 5.0)));
        assert!(renderer.saves.is_empty());
    }
    #[test]
    fn lines_after_sentinel_are_discarded_and_stream_finishes() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctl = controller(dir.path(), &["3.5", "STOP", "9.9"]);
        let mut renderer = RecordingRenderer::default();
        let outcome = ctl.on_tick(&mut renderer);
        assert_eq!(outcome.accepted, 1);
        assert_eq!(outcome.state, StreamState::Finished);
        assert_eq!(outcome.snapshot, Some(dir.path().join("plot.png")));
        assert_eq!(ctl.buffer().len(), 1);
        assert_eq!(ctl.buffer().samples()[0].value, 3.5);
        assert_eq!(renderer.saves, vec![(dir.path().join("plot.png"), 300)]);
        assert_eq!(renderer.close_requests, vec![Duration::from_millis(500)]);
        let (lo, hi) = renderer.y_limits.unwrap();
        assert!((lo - 3.4).abs() < 1e-9 && (hi - 3.6).abs() < 1e-9);
    }
    #[test]
    fn ticks_after_finish_change_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctl = controller(dir.path(), &["1.0", "STOP"]);
        let mut renderer = RecordingRenderer::default();
        ctl.on_tick(&mut renderer);
        let draws_after_finish = renderer.draws.len();
        ctl.source_mut().push_line("2.0");
        ctl.source_mut().push_line("STOP");
        for _ in 0..3 {
            let outcome = ctl.on_tick(&mut renderer);
            assert_eq!(outcome, TickOutcome::idle(StreamState::Finished));
        }
        assert_eq!(ctl.buffer().len(), 1);
        assert_eq!(ctl.source_mut().pending(), 2);
        assert_eq!(renderer.saves.len(), 1);
        assert_eq!(renderer.close_requests.len(), 1);
        assert_eq!(renderer.draws.len(), draws_after_finish);
    }
    #[test]
    fn malformed_line_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctl = controller(dir.path(), &["abc", "stop", ""]);
        let mut renderer = RecordingRenderer::default();
        let outcome = ctl.on_tick(&mut renderer);
        assert_eq!(outcome, TickOutcome::idle(StreamState::Running));
        assert!(ctl.buffer().is_empty());
        assert!(renderer.draws.is_empty());
        assert!(renderer.x_limits.is_none());
    }
    #[test]
    fn samples_accumulate_across_ticks() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctl = controller(dir.path(), &["1", "x", "2"]);
        let mut renderer = RecordingRenderer::default();
        assert_eq!(ctl.on_tick(&mut renderer).accepted, 2);
        assert_eq!(ctl.on_tick(&mut renderer).accepted, 0);
        ctl.source_mut().push_line("3 ");
        assert_eq!(ctl.on_tick(&mut renderer).accepted, 1);
        let values: Vec<f64> = ctl.buffer().samples().iter().map(|s| s.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
        assert_eq!(renderer.draws.last().unwrap().0, vec![0.0, 1.0, 2.0]);
    }
    #[test]
    fn redraw_uses_last_hundred_samples() {
        let dir = tempfile::tempdir().unwrap();
        let lines: Vec<String> = (0..150).map(|i| i.to_string()).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let mut ctl = controller(dir.path(), &refs);
        let mut renderer = RecordingRenderer::default();
        ctl.on_tick(&mut renderer);
        let window = ctl.window();
        assert_eq!(window.len(), 100);
        assert_eq!(window[0].index, 50);
        assert_eq!(window[99].index, 149);
        let (xs, ys) = renderer.draws.last().unwrap();
        assert_eq!(xs.first(), Some(&50.0));
        assert_eq!(xs.last(), Some(&149.0));
        assert_eq!(ys.len(), 100);
        assert_eq!(renderer.x_limits, Some((50.0, 150.0)));
        let (lo, hi) = renderer.y_limits.unwrap();
        assert!((lo - 49.9).abs() < 1e-9 && (hi - 149.1).abs() < 1e-9);
    }
    #[test]
    fn failed_save_still_finishes() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctl = controller(dir.path(), &["1", "STOP"]);
        let mut renderer = RecordingRenderer {
            fail_save: true,
            ..RecordingRenderer::default()
        };
        let outcome = ctl.on_tick(&mut renderer);
        assert_eq!(outcome.state, StreamState::Finished);
        assert!(outcome.snapshot.is_none());
        assert_eq!(renderer.close_requests.len(), 1);
        assert_eq!(ctl.buffer().len(), 1);
    }
    #[test]
    fn failed_close_request_still_finishes() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctl = controller(dir.path(), &["STOP"]);
        let mut renderer = RecordingRenderer {
            fail_close: true,
            ..RecordingRenderer::default()
        };
        let outcome = ctl.on_tick(&mut renderer);
        assert_eq!(outcome.state, StreamState::Finished);
        assert_eq!(outcome.snapshot, Some(dir.path().join("plot.png")));
        assert!(renderer.draws.is_empty());
    }
    #[test]
    fn successive_runs_do_not_overwrite_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlotterConfig {
            output_dir: dir.path().join("plots"),
            snapshot_dpi: 40,
            ..PlotterConfig::default()
        };
        let mut saved = Vec::new();
        for run in 0..2 {
            let source = ManualSource::new([format!("{run}.5"), "STOP".to_owned()]);
            let mut ctl = PlotController::new(source, &config);
            let mut canvas = FrameCanvas::default();
            let outcome = ctl.on_tick(&mut canvas);
            assert!(canvas.close_requested());
            saved.push(outcome.snapshot.unwrap());
        }
        assert_eq!(
            saved,
            vec![
                dir.path().join("plots").join("plot.png"),
                dir.path().join("plots").join("plot_1.png"),
            ]
        );
        for path in &saved {
            let decoded = image::open(path).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (256, 192));
        }
    }
    #[test]
    fn status_values_print_like_fixed_point() {
        assert_eq!(status_value(3.14159), "3.142");
        assert_eq!(status_value(-2.0), "-2.000");
        assert_eq!(status_value(f64::NAN), "nan");
        assert_eq!(status_value(f64::INFINITY), "inf");
        assert_eq!(status_value(f64::NEG_INFINITY), "-inf");
    }
    #[test]
    fn extreme_values_still_finish_with_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlotterConfig {
            output_dir: dir.path().to_path_buf(),
            snapshot_dpi: 40,
            ..PlotterConfig::default()
        };
        let source = ManualSource::new(["-1e308", "1e308", "STOP"]);
        let mut ctl = PlotController::new(source, &config);
        let mut canvas = FrameCanvas::default();
        let outcome = ctl.on_tick(&mut canvas);
        assert_eq!(outcome.accepted, 2);
        assert_eq!(outcome.state, StreamState::Finished);
        assert_eq!(canvas.frame().y_limits, (-1e308 - 0.1, 1e308 + 0.1));
        let path = outcome.snapshot.unwrap();
        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (256, 192));
        assert!(canvas.close_requested());
    }
}
