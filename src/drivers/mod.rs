// src/drivers/mod.rs
pub mod buffer;
pub mod controller;
pub mod error;
pub mod feeder;
pub mod plot;
pub mod render;
pub mod sentinel;
pub mod snapshot;
pub mod source;
pub use buffer::{Sample, SampleBuffer, WindowBounds};
pub use controller::PlotController;
pub use error::PlotError;
pub use feeder::PlotFeeder;
pub use plot::{drawable_range, render_frame_png, PlotStyle};
pub use render::{FrameCanvas, PlotFrame, Renderer};
pub use sentinel::{is_sentinel, SENTINEL};
pub use snapshot::{next_path, SnapshotNamer};
pub use source::{ChannelSource, LineSource, ManualSource, StreamReader};
