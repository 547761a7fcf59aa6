//! Sprite loading and caching.
//!
//! Game logic only ever needs a sprite's pixel dimensions (for bounding
//! boxes) and a representative colour (for the terminal renderer), so a
//! decoded image is reduced to a `Sprite` right after loading.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::RgbaImage;

use crate::error::AssetError;

/// Colour used for sprites whose pixels are all fully transparent.
const FALLBACK_TINT: [u8; 3] = [255, 255, 255];

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    /// File name the sprite was loaded from.
    pub name: String,
    pub width: i32,
    pub height: i32,
    /// Alpha-weighted average colour of the image.
    pub tint: [u8; 3],
}

impl Sprite {
    /// A sprite with fixed dimensions and colour, not backed by a file.
    pub fn solid(name: &str, width: i32, height: i32, tint: [u8; 3]) -> Self {
        Sprite {
            name: name.to_string(),
            width,
            height,
            tint,
        }
    }

    fn from_image(name: &str, img: &RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Sprite {
            name: name.to_string(),
            width: width as i32,
            height: height as i32,
            tint: average_tint(img),
        }
    }
}

/// Alpha-weighted mean of every pixel's RGB channels.
pub fn average_tint(img: &RgbaImage) -> [u8; 3] {
    let mut sums = [0u64; 3];
    let mut weight = 0u64;
    for px in img.pixels() {
        let a = px[3] as u64;
        for c in 0..3 {
            sums[c] += px[c] as u64 * a;
        }
        weight += a;
    }
    if weight == 0 {
        return FALLBACK_TINT;
    }
    [
        (sums[0] / weight) as u8,
        (sums[1] / weight) as u8,
        (sums[2] / weight) as u8,
    ]
}

// ── Loaders ──────────────────────────────────────────────────────────────────

/// Source of sprites by file name.
pub trait SpriteLoader {
    fn load(&self, name: &str) -> Result<Sprite, AssetError>;
}

/// Decodes image files from a directory with the `image` crate.
pub struct ImageLoader {
    root: PathBuf,
}

impl ImageLoader {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        ImageLoader {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl SpriteLoader for ImageLoader {
    fn load(&self, name: &str) -> Result<Sprite, AssetError> {
        let path = self.root.join(name);
        if !path.is_file() {
            return Err(AssetError::Missing(path));
        }

        log::debug!("Loading sprite from {:?}", path);
        let img = image::open(&path)
            .map_err(|source| AssetError::Load {
                path: path.clone(),
                source,
            })?
            .to_rgba8();

        let sprite = Sprite::from_image(name, &img);
        if sprite.width == 0 || sprite.height == 0 {
            return Err(AssetError::Empty(path));
        }
        log::info!(
            "Loaded sprite {} ({}x{}) from {:?}",
            name,
            sprite.width,
            sprite.height,
            path
        );
        Ok(sprite)
    }
}

// ── Cache ────────────────────────────────────────────────────────────────────

/// Loads each sprite at most once and hands out shared references.
/// Failed loads are not cached, so the next request tries the disk again.
pub struct Assets<L: SpriteLoader> {
    loader: L,
    cache: HashMap<String, Rc<Sprite>>,
}

impl<L: SpriteLoader> Assets<L> {
    pub fn new(loader: L) -> Self {
        Assets {
            loader,
            cache: HashMap::new(),
        }
    }

    pub fn get(&mut self, name: &str) -> Result<Rc<Sprite>, AssetError> {
        if let Some(sprite) = self.cache.get(name) {
            return Ok(Rc::clone(sprite));
        }
        match self.loader.load(name) {
            Ok(sprite) => {
                let sprite = Rc::new(sprite);
                self.cache.insert(name.to_string(), Rc::clone(&sprite));
                Ok(sprite)
            }
            Err(err) => {
                log::error!("Unable to load sprite image {}: {}", name, err);
                Err(err)
            }
        }
    }

    /// Number of distinct sprites loaded so far.
    pub fn loaded(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn tint_of_solid_image() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([200, 100, 50, 255]));
        assert_eq!(average_tint(&img), [200, 100, 50]);
    }

    #[test]
    fn tint_ignores_transparent_pixels() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 0]));
        img.put_pixel(1, 0, Rgba([10, 20, 30, 255]));
        assert_eq!(average_tint(&img), [10, 20, 30]);
    }

    #[test]
    fn tint_of_fully_transparent_image_falls_back() {
        let img = RgbaImage::from_pixel(3, 3, Rgba([90, 90, 90, 0]));
        assert_eq!(average_tint(&img), FALLBACK_TINT);
    }

    #[test]
    fn from_image_records_dimensions() {
        let img = RgbaImage::from_pixel(12, 7, Rgba([1, 2, 3, 255]));
        let sprite = Sprite::from_image("ship.png", &img);
        assert_eq!(sprite.width, 12);
        assert_eq!(sprite.height, 7);
        assert_eq!(sprite.name, "ship.png");
    }
}
