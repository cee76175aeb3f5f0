use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::LineSeries;
use plotters::prelude::*;
use crate::drivers::error::PlotError;
use crate::drivers::render::PlotFrame;
#[derive(Clone, Debug)]
pub struct PlotStyle {
    /// Figure size in inches; the pixel size is this times the dpi.
    pub figure_inches: (f64, f64),
    pub background: RGBColor,
    pub line_color: RGBColor,
    /// Line width in points (1/72 inch).
    pub line_width_pt: f64,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            figure_inches: (6.4, 4.8),
            background: WHITE,
            line_color: RGBColor(31, 119, 180),
            line_width_pt: 2.0,
            title: "Live Measurement Plot".to_owned(),
            x_label: "Point Index".to_owned(),
            y_label: "Value".to_owned(),
        }
    }
}
impl PlotStyle {
    pub fn pixel_size(&self, dpi: u32) -> (u32, u32) {
        let dpi = f64::from(dpi);
        (
            (self.figure_inches.0 * dpi).round() as u32,
            (self.figure_inches.1 * dpi).round() as u32,
        )
    }
}
/// Rasterizes `frame` to PNG bytes at `dpi`.
///
/// When text cannot be drawn (no usable system font) the frame is drawn again
/// without title and axis labels instead of failing the snapshot.
pub fn render_frame_png(
    frame: &PlotFrame,
    style: &PlotStyle,
    dpi: u32,
) -> Result<Vec<u8>, PlotError> {
    if dpi == 0 {
        return Err(PlotError::InvalidDpi);
    }
    let (width, height) = style.pixel_size(dpi);
    let buffer = match draw_frame(frame, style, (width, height), dpi, true) {
        Ok(buffer) => buffer,
        Err(err) => {
            log::warn!("labelled render failed ({err}); retrying without text");
            draw_frame(frame, style, (width, height), dpi, false)?
        }
    };
    encode_png(&buffer, width, height)
}
fn draw_frame(
    frame: &PlotFrame,
    style: &PlotStyle,
    (width, height): (u32, u32),
    dpi: u32,
    with_text: bool,
) -> Result<Vec<u8>, PlotError> {
    // points -> pixels
    let px = |pt: f64| pt * f64::from(dpi) / 72.0;
    let mut buffer = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&style.background)?;
        let (x_min, x_max) = drawable_range(frame.x_limits);
        let (y_min, y_max) = drawable_range(frame.y_limits);
        let mut builder = ChartBuilder::on(&root);
        builder.margin(px(12.0) as u32);
        if with_text {
            builder
                .caption(&style.title, ("sans-serif", px(12.0)).into_font())
                .set_label_area_size(LabelAreaPosition::Left, px(48.0) as u32)
                .set_label_area_size(LabelAreaPosition::Bottom, px(36.0) as u32);
        }
        let mut chart = builder.build_cartesian_2d(x_min..x_max, y_min..y_max)?;
        let mut mesh = chart.configure_mesh();
        mesh.light_line_style(&RGBColor(235, 235, 235))
            .bold_line_style(&RGBColor(200, 200, 200));
        if with_text {
            mesh.x_desc(style.x_label.as_str())
                .y_desc(style.y_label.as_str())
                .label_style(("sans-serif", px(10.0)).into_font());
        }
        mesh.draw()?;
        let line_width = px(style.line_width_pt).round().max(1.0) as u32;
        let series = frame.xs.iter().copied().zip(frame.ys.iter().copied());
        chart.draw_series(LineSeries::new(
            series,
            style.line_color.stroke_width(line_width),
        ))?;
        root.present()?;
    }
    Ok(buffer)
}
/// Largest magnitude an axis limit may have; mesh key points cannot be
/// computed once the span itself overflows.
pub const AXIS_LIMIT: f64 = 1e300;
/// Turns arbitrary limits into a finite range with room between its ends.
pub fn drawable_range((lo, hi): (f64, f64)) -> (f64, f64) {
    if !lo.is_finite() || !hi.is_finite() {
        return (-1.0, 1.0);
    }
    let lo = lo.clamp(-AXIS_LIMIT, AXIS_LIMIT);
    let hi = hi.clamp(-AXIS_LIMIT, AXIS_LIMIT);
    let span = hi - lo;
    let scale = lo.abs().max(hi.abs());
    // a span below float resolution at this magnitude cannot be stepped through
    if span < f64::EPSILON || span <= scale * 1e-12 {
        let mid = lo / 2.0 + hi / 2.0;
        let pad = (scale * 1e-3).max(0.5);
        (mid - pad, mid + pad)
    } else {
        (lo, hi)
    }
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, PlotError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| PlotError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
