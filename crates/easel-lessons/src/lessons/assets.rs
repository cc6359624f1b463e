use std::path::Path;

use anyhow::{Context, Result};

use easel_engine::render::ImageData;

/// Loads `path` as RGBA8, or a checkerboard when no path is given.
pub fn load_image(path: Option<&Path>) -> Result<ImageData> {
    let Some(path) = path else {
        return Ok(ImageData::checkerboard(256, 32, [240, 240, 240, 255], [200, 60, 60, 255]));
    };

    let decoded = image::open(path)
        .with_context(|| format!("failed to load image {}", path.display()))?
        .to_rgba8();
    let (width, height) = decoded.dimensions();
    log::info!("loaded {} ({width}x{height})", path.display());

    ImageData::new(width, height, decoded.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_checkerboard() {
        let img = load_image(None).unwrap();
        assert_eq!((img.width(), img.height()), (256, 256));
    }

    #[test]
    fn missing_file_names_path() {
        let err = load_image(Some(Path::new("/definitely/not/here.png"))).unwrap_err();
        assert!(format!("{err:#}").contains("here.png"));
    }
}
