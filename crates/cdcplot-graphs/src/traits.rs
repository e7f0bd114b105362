//! Renderer and viewer trait definitions.

use crate::GraphConfig;
use async_trait::async_trait;
use cdcplot_common::Result;
use std::path::Path;

/// Trait for graph renderers that can generate visualizations.
#[async_trait]
pub trait GraphRenderer: Send + Sync {
    /// The type of data this renderer expects.
    type Data: Send + Sync;

    /// Renders a graph of `data` and writes it to `path`.
    async fn render_to_file(&self, config: &GraphConfig, data: &Self::Data, path: &Path)
        -> Result<()>;

    /// Gets the name of this graph type.
    fn name(&self) -> &'static str;

    /// Gets the description of this graph type.
    fn description(&self) -> &'static str;
}

/// Something that can present a saved image to the user.
pub trait ImageViewer: Send + Sync {
    /// Presents the image at `path`.
    fn show(&self, path: &Path) -> Result<()>;
}
