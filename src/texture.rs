use std::fmt;
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

/// Side length of generated fallback tiles.
pub const FALLBACK_SIZE: u32 = 256;

/// Logical surface names used by the scene geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Wood,
    Paper,
    Wallpaper,
    Carpet,
    Couch,
    Glass,
    Ground,
}

impl Surface {
    pub const ALL: [Surface; 7] = [
        Surface::Wood,
        Surface::Paper,
        Surface::Wallpaper,
        Surface::Carpet,
        Surface::Couch,
        Surface::Glass,
        Surface::Ground,
    ];

    /// File the surface is loaded from, relative to the texture directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Surface::Wood => "wood.jpg",
            Surface::Paper => "paper.jpg",
            Surface::Wallpaper => "wallpaper.jpg",
            Surface::Carpet => "carpet.jpg",
            Surface::Couch => "couch.jpg",
            Surface::Glass => "glass.jpg",
            Surface::Ground => "ground.jpg",
        }
    }

    /// Sampling policy outside [0, 1]: tileable surfaces repeat, the rest
    /// clamp.
    pub fn wrap_mode(self) -> WrapMode {
        match self {
            Surface::Wood | Surface::Ground | Surface::Wallpaper | Surface::Carpet
            | Surface::Couch => WrapMode::Repeat,
            Surface::Paper => WrapMode::Clamp,
            Surface::Glass => WrapMode::ClampToEdge,
        }
    }

    /// Base color of the generated pattern substituted when loading fails.
    pub fn fallback_bias(self) -> [u8; 3] {
        match self {
            Surface::Wood => [120, 80, 50],
            Surface::Paper => [235, 225, 205],
            Surface::Wallpaper => [200, 190, 170],
            Surface::Carpet => [140, 40, 40],
            Surface::Couch => [150, 60, 50],
            Surface::Glass => [180, 200, 215],
            Surface::Ground => [110, 100, 90],
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Surface::Wood => "wood",
            Surface::Paper => "paper",
            Surface::Wallpaper => "wallpaper",
            Surface::Carpet => "carpet",
            Surface::Couch => "couch",
            Surface::Glass => "glass",
            Surface::Ground => "ground",
        };
        f.write_str(name)
    }
}

/// Texture coordinate wrap policy, mapped onto sampler address modes by the
/// renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    Repeat,
    Clamp,
    ClampToEdge,
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("texture {path} is missing or unreadable: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Decoded RGBA pixels for one surface, ready for GPU upload.
#[derive(Debug, Clone)]
pub struct SurfaceImage {
    pub surface: Surface,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    /// True when the file could not be read and a generated pattern was
    /// substituted.
    pub fell_back: bool,
}

/// Loads one surface, substituting the generated pattern on failure.
///
/// Loading is attempted exactly once; a failure is reported as a diagnostic
/// and never aborts the process.
pub fn load_surface(dir: &Path, surface: Surface) -> SurfaceImage {
    match decode(&dir.join(surface.file_name())) {
        Ok((width, height, pixels)) => {
            info!("loaded {surface} texture ({width}x{height})");
            SurfaceImage {
                surface,
                width,
                height,
                pixels,
                fell_back: false,
            }
        }
        Err(err) => {
            warn!("{err}; using generated pattern for {surface}");
            SurfaceImage {
                surface,
                width: FALLBACK_SIZE,
                height: FALLBACK_SIZE,
                pixels: fallback_pattern(FALLBACK_SIZE, surface.fallback_bias()),
                fell_back: true,
            }
        }
    }
}

/// Loads every surface the scene references, in a fixed order.
pub fn load_surfaces(dir: &Path) -> Vec<SurfaceImage> {
    Surface::ALL
        .iter()
        .map(|&surface| load_surface(dir, surface))
        .collect()
}

/// Deterministic speckled tile: the bias color plus a small per-pixel
/// variation derived from the pixel coordinates.
pub fn fallback_pattern(size: u32, bias: [u8; 3]) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            pixels.push(bias[0].saturating_add(((x % 16) * 2) as u8));
            pixels.push(bias[1].saturating_add((y % 16) as u8));
            pixels.push(bias[2].saturating_add(((x + y) % 16) as u8));
            pixels.push(255);
        }
    }
    pixels
}

fn decode(path: &Path) -> Result<(u32, u32, Vec<u8>), AssetError> {
    let image = image::open(path).map_err(|source| AssetError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok((width, height, rgba.into_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_pattern_is_deterministic() {
        let a = fallback_pattern(32, [200, 190, 170]);
        let b = fallback_pattern(32, [200, 190, 170]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 32 * 32 * 4);
    }

    #[test]
    fn wallpaper_fallback_matches_the_speckle_formula() {
        let pixels = fallback_pattern(16, Surface::Wallpaper.fallback_bias());
        // pixel (x=3, y=2)
        let idx = ((2 * 16 + 3) * 4) as usize;
        assert_eq!(pixels[idx], 200 + 3 * 2);
        assert_eq!(pixels[idx + 1], 190 + 2);
        assert_eq!(pixels[idx + 2], 170 + 5);
        assert_eq!(pixels[idx + 3], 255);
    }

    #[test]
    fn missing_file_degrades_to_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let image = load_surface(dir.path(), Surface::Wallpaper);
        assert!(image.fell_back);
        assert_eq!(image.width, FALLBACK_SIZE);
        assert_eq!(
            image.pixels,
            fallback_pattern(FALLBACK_SIZE, Surface::Wallpaper.fallback_bias())
        );
    }

    #[test]
    fn real_file_loads_without_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let mut rgb = image::RgbImage::new(8, 8);
        for pixel in rgb.pixels_mut() {
            *pixel = image::Rgb([90, 60, 30]);
        }
        rgb.save(dir.path().join("wood.jpg")).unwrap();

        let image = load_surface(dir.path(), Surface::Wood);
        assert!(!image.fell_back);
        assert_eq!((image.width, image.height), (8, 8));
        assert_eq!(image.pixels.len(), 8 * 8 * 4);
    }

    #[test]
    fn tileable_surfaces_repeat_and_the_rest_clamp() {
        assert_eq!(Surface::Wood.wrap_mode(), WrapMode::Repeat);
        assert_eq!(Surface::Ground.wrap_mode(), WrapMode::Repeat);
        assert_eq!(Surface::Wallpaper.wrap_mode(), WrapMode::Repeat);
        assert_eq!(Surface::Carpet.wrap_mode(), WrapMode::Repeat);
        assert_eq!(Surface::Couch.wrap_mode(), WrapMode::Repeat);
        assert_eq!(Surface::Paper.wrap_mode(), WrapMode::Clamp);
        assert_eq!(Surface::Glass.wrap_mode(), WrapMode::ClampToEdge);
    }
}
