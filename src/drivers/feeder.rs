use std::io::Write;
use std::process::{Child, ChildStdin, Command, Stdio};
use crate::drivers::sentinel::SENTINEL;
use crate::drivers::PlotError;
/// Producer side: runs a plotter as a child process and streams points to its
/// stdin, one per line, finishing with the stop token.
pub struct PlotFeeder {
    child: Child,
    stdin: Option<ChildStdin>,
}
impl PlotFeeder {
    pub fn spawn(mut command: Command) -> Result<Self, PlotError> {
        let mut child = command.stdin(Stdio::piped()).spawn()?;
        let stdin = child
            .stdin
            .take()
            .ok_or(PlotError::FeederStdinUnavailable)?;
        log::debug!("plotter started with pid {}", child.id());
        Ok(Self {
            child,
            stdin: Some(stdin),
        })
    }
    pub fn is_running(&self) -> bool {
        self.stdin.is_some()
    }
    /// No-op once the feeder has been stopped.
    pub fn send_point(&mut self, value: f64) -> Result<(), PlotError> {
        let Some(stdin) = self.stdin.as_mut() else {
            return Ok(());
        };
        writeln!(stdin, "{value:.6}")?;
        stdin.flush()?;
        Ok(())
    }
    /// Sends the stop token, closes the pipe and waits for the plotter to exit.
    pub fn stop(&mut self) -> Result<(), PlotError> {
        let Some(mut stdin) = self.stdin.take() else {
            return Ok(());
        };
        let sent = writeln!(stdin, "{SENTINEL}").and_then(|()| stdin.flush());
        drop(stdin);
        let status = self.child.wait()?;
        log::debug!("plotter exited: {status}");
        sent?;
        Ok(())
    }
}
impl Drop for PlotFeeder {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            log::warn!("failed to stop plotter: {err}");
        }
    }
}
