//! Texture asset loading with a procedural fallback.

use std::path::Path;

use tracing::{info, warn};

use veld_render::TexturePixels;

/// Load the ground texture from disk as RGBA8 pixels.
///
/// When the file is missing or undecodable a procedural checkerboard
/// stands in, so a fresh checkout still starts with a visible ground.
pub fn load_ground_texture(path: &Path) -> TexturePixels {
    match image::open(path) {
        Ok(img) => {
            let rgba = img.to_rgba8();
            let (width, height) = rgba.dimensions();
            info!(path = %path.display(), width, height, "ground texture loaded");
            TexturePixels {
                data: rgba.into_raw(),
                width,
                height,
            }
        }
        Err(error) => {
            warn!(
                path = %path.display(),
                %error,
                "ground texture unavailable, using checkerboard"
            );
            checkerboard(256, 256, 32)
        }
    }
}

/// Generate a two-tone checkerboard, RGBA8.
pub fn checkerboard(width: u32, height: u32, cell: u32) -> TexturePixels {
    let dark = [0x2e, 0x52, 0x2a, 0xff];
    let light = [0x4a, 0x78, 0x3c, 0xff];

    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let on = ((x / cell) + (y / cell)) % 2 == 0;
            data.extend_from_slice(if on { &dark } else { &light });
        }
    }

    TexturePixels {
        data,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkerboard_dimensions_and_size() {
        let tex = checkerboard(64, 32, 8);
        assert_eq!(tex.width, 64);
        assert_eq!(tex.height, 32);
        assert_eq!(tex.data.len(), 64 * 32 * 4);
    }

    #[test]
    fn test_checkerboard_alternates_cells() {
        let tex = checkerboard(16, 16, 8);
        let pixel = |x: u32, y: u32| {
            let idx = ((y * 16 + x) * 4) as usize;
            &tex.data[idx..idx + 4]
        };
        // Adjacent cells differ, diagonal cells match.
        assert_ne!(pixel(0, 0), pixel(8, 0));
        assert_ne!(pixel(0, 0), pixel(0, 8));
        assert_eq!(pixel(0, 0), pixel(8, 8));
    }

    #[test]
    fn test_missing_file_falls_back_to_checkerboard() {
        let tex = load_ground_texture(Path::new("does/not/exist.png"));
        assert_eq!(tex.width, 256);
        assert_eq!(tex.height, 256);
        assert_eq!(tex.data.len(), 256 * 256 * 4);
    }
}
