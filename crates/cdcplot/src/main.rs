//! Main entry point for cdcplot.

use cdcplot::CdcPlotApp;
use cdcplot_common::init_default_logging;
use std::process::ExitCode;
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let app = match CdcPlotApp::from_env() {
        Ok(app) => app,
        Err(e) => {
            // Without a valid config there is no logging section to honour.
            let _ = init_default_logging();
            error!("{e}");
            return ExitCode::from(e.exit_code());
        }
    };

    if let Err(e) = app.init_logging() {
        eprintln!("{e}");
    }

    match app.run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
