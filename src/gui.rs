// src/gui.rs
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use eframe::egui;
use egui::Color32;
use egui_plot::{Line, Plot, PlotBounds, PlotPoints};
use plotters::style::RGBColor;
use crate::config::PlotterConfig;
use crate::drivers::{
    drawable_range, FrameCanvas, LineSource, PlotController, PlotError, PlotStyle,
};
use crate::types::StreamState;

const WINDOW_TITLE: &str = "Live Measurement Plot";

/// Window host: owns the tick and shows whatever the controller last drew.
pub struct LivePlotApp<S: LineSource> {
    controller: PlotController<S>,
    canvas: FrameCanvas,
    tick_interval: Duration,
    next_tick: Instant,
    interrupted: Arc<AtomicBool>,
    closing: bool,
}

impl<S: LineSource> LivePlotApp<S> {
    pub fn new(
        controller: PlotController<S>,
        canvas: FrameCanvas,
        config: &PlotterConfig,
        interrupted: Arc<AtomicBool>,
    ) -> Self {
        Self {
            controller,
            canvas,
            tick_interval: config.tick_interval,
            next_tick: Instant::now(),
            interrupted,
            closing: false,
        }
    }

    pub fn state(&self) -> StreamState {
        self.controller.state()
    }

    pub fn canvas(&self) -> &FrameCanvas {
        &self.canvas
    }

    /// Runs a tick if one is due at `now`. Returns true once the window should close.
    pub fn step(&mut self, now: Instant) -> bool {
        if now >= self.next_tick {
            self.controller.on_tick(&mut self.canvas);
            self.next_tick = now + self.tick_interval;
        }
        self.interrupted.load(Ordering::Relaxed) || self.canvas.close_due(now)
    }

    fn next_wakeup(&self, now: Instant) -> Duration {
        let tick = self.next_tick.saturating_duration_since(now);
        match self.canvas.close_remaining(now) {
            Some(close) => tick.min(close),
            None => tick,
        }
    }

    fn draw_plot(&self, ui: &mut egui::Ui) {
        let frame = self.canvas.frame();
        let style = self.canvas.style();
        let (x_min, x_max) = drawable_range(frame.x_limits);
        let (y_min, y_max) = drawable_range(frame.y_limits);
        let RGBColor(r, g, b) = style.line_color;
        let color = Color32::from_rgb(r, g, b);
        ui.vertical_centered(|ui| ui.heading(style.title.as_str()));
        Plot::new("live_plot")
            .x_axis_label(style.x_label.as_str())
            .y_axis_label(style.y_label.as_str())
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [x_min, y_min],
                    [x_max, y_max],
                ));
                plot_ui.line(
                    Line::new(PlotPoints::new(frame.points()))
                        .color(color)
                        .width(2.0),
                );
            });
    }
}

impl<S: LineSource> eframe::App for LivePlotApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        if self.step(now) && !self.closing {
            self.closing = true;
            if self.interrupted.load(Ordering::Relaxed) {
                log::info!("interrupt received, closing the plot window");
            }
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            let status = match self.controller.state() {
                StreamState::Running => "running",
                StreamState::Finished => "finished",
            };
            ui.label(format!("{} samples, {status}", self.controller.buffer().len()));
        });
        egui::CentralPanel::default().show(ctx, |ui| self.draw_plot(ui));
        ctx.request_repaint_after(self.next_wakeup(Instant::now()));
    }
}

/// Opens the plot window and drives `controller` until the window closes,
/// either on its own after `STOP`, by the user, or on interrupt.
pub fn run_loop<S: LineSource + 'static>(
    controller: PlotController<S>,
    config: &PlotterConfig,
    interrupted: Arc<AtomicBool>,
) -> Result<(), PlotError> {
    let app = LivePlotApp::new(
        controller,
        FrameCanvas::new(PlotStyle::default()),
        config,
        interrupted,
    );
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([960.0, 720.0])
        .with_title(WINDOW_TITLE);
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Box::new(app)
        }),
    )?;
    Ok(())
}
