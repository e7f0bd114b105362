//! Best-effort display of the saved chart in the platform's image viewer.

use crate::ImageViewer;
use cdcplot_common::Result;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Hands the image to the desktop's default viewer without waiting for it.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemViewer;

impl SystemViewer {
    /// The opener command for the current platform.
    fn command(path: &Path) -> Command {
        #[cfg(target_os = "macos")]
        {
            let mut command = Command::new("open");
            command.arg(path);
            command
        }
        #[cfg(target_os = "windows")]
        {
            let mut command = Command::new("cmd");
            command.args(["/C", "start", ""]).arg(path);
            command
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            let mut command = Command::new("xdg-open");
            command.arg(path);
            command
        }
    }
}

impl ImageViewer for SystemViewer {
    fn show(&self, path: &Path) -> Result<()> {
        let child = Self::command(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        debug!(pid = child.id(), "Launched image viewer for {}", path.display());
        Ok(())
    }
}

/// Shows `path` with `viewer`, downgrading any failure to a warning.
pub fn show_best_effort(viewer: &dyn ImageViewer, path: &Path) {
    if let Err(e) = viewer.show(path) {
        warn!("Could not display '{}': {e}", path.display());
    }
}
