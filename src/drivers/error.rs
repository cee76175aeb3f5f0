use thiserror::Error;
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to render plot: {0}")]
    Plot(String),
    #[error("resolution must be greater than zero dpi")]
    InvalidDpi,
    #[error("window close already scheduled")]
    CloseAlreadyScheduled,
    #[error("could not resolve the user's home directory")]
    NoHomeDirectory,
    #[error("plotter process has no stdin pipe")]
    FeederStdinUnavailable,
    #[error("plot window failed: {0}")]
    Window(String),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for PlotError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        PlotError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for PlotError {
    fn from(value: image::ImageError) -> Self {
        PlotError::Plot(value.to_string())
    }
}
impl From<eframe::Error> for PlotError {
    fn from(value: eframe::Error) -> Self {
        PlotError::Window(value.to_string())
    }
}
