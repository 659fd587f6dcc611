use crate::config::Config;
use crate::dial::{Geometry, view};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),
    #[error("PNG error: {0}")]
    Png(#[from] cairo::IoError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Renders a single frame at `sweep` degrees onto a square PNG.
pub fn write_png(config: &Config, sweep: f64, size: i32, path: &Path) -> Result<(), SnapshotError> {
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, size, size)?;
    {
        let cr = cairo::Context::new(&surface)?;
        let geometry = Geometry::resolve(size as f64, size as f64, config.padding, config);
        view::paint(&cr, &view::render(&geometry, crate::dial::engine::wrap(sweep), config))?;
    }
    let mut file = fs_err::File::create(path)?;
    surface.write_to_png(&mut file)?;
    Ok(())
}
