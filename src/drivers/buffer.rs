/// One ingested value together with its position in the stream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub index: usize,
    pub value: f64,
}
/// Axis limits derived from a window of samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowBounds {
    pub x: (f64, f64),
    /// `None` when the window holds no finite value.
    pub y: Option<(f64, f64)>,
}
impl WindowBounds {
    /// `total` is the number of samples in the whole buffer, `window_len` the
    /// nominal window size; the x range always ends at `total`.
    pub fn from_window(
        window: &[Sample],
        total: usize,
        window_len: usize,
        y_padding: f64,
    ) -> Self {
        let x = (total.saturating_sub(window_len) as f64, total as f64);
        let y = window
            .iter()
            .map(|s| s.value)
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
            .map(|(lo, hi)| (lo - y_padding, hi + y_padding));
        Self { x, y }
    }
}
/// Append-only sample store. `samples[i].index == i` always holds.
#[derive(Debug, Default)]
pub struct SampleBuffer {
    samples: Vec<Sample>,
}
impl SampleBuffer {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn append(&mut self, value: f64) -> Sample {
        let sample = Sample {
            index: self.samples.len(),
            value,
        };
        self.samples.push(sample);
        sample
    }
    pub fn len(&self) -> usize {
        self.samples.len()
    }
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
    /// Borrowed view of the last `len` samples, or everything if fewer are held.
    pub fn window(&self, len: usize) -> &[Sample] {
        let start = self.samples.len().saturating_sub(len);
        &self.samples[start..]
    }
}
