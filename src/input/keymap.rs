use crate::synth::note::KeyIndex;
use image::RgbaImage;
use std::fmt;
use std::path::Path;

/// Bounding rectangle of a key's pixels, in bitmap coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl KeyBounds {
    fn point(x: u32, y: u32) -> Self {
        Self {
            x,
            y,
            width: 1,
            height: 1,
        }
    }

    fn include(&mut self, x: u32, y: u32) {
        let right = (self.x + self.width).max(x + 1);
        let bottom = (self.y + self.height).max(y + 1);
        self.x = self.x.min(x);
        self.y = self.y.min(y);
        self.width = right - self.x;
        self.height = bottom - self.y;
    }
}

#[derive(Debug)]
pub enum KeyMapError {
    Image(image::ImageError),
    BufferSize { expected: usize, actual: usize },
    Dimensions { expected: (u32, u32), actual: (u32, u32) },
    KeyOutOfRange { key: KeyIndex, x: u32, y: u32, key_count: usize },
    NoKeys,
}

impl fmt::Display for KeyMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMapError::Image(e) => write!(f, "Failed to decode key map image: {}", e),
            KeyMapError::BufferSize { expected, actual } => write!(
                f,
                "Key map buffer holds {} bytes, expected {}.",
                actual, expected
            ),
            KeyMapError::Dimensions { expected, actual } => write!(
                f,
                "Key map is {}x{}, expected {}x{}.",
                actual.0, actual.1, expected.0, expected.1
            ),
            KeyMapError::KeyOutOfRange {
                key,
                x,
                y,
                key_count,
            } => write!(
                f,
                "Pixel ({}, {}) encodes key {} but the instrument has {} keys.",
                x, y, key, key_count
            ),
            KeyMapError::NoKeys => write!(f, "Key map contains no keys."),
        }
    }
}

impl std::error::Error for KeyMapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KeyMapError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for KeyMapError {
    fn from(e: image::ImageError) -> Self {
        KeyMapError::Image(e)
    }
}

/// Reads the key stored in one RGBA pixel.
///
/// The key index lives in the red channel. Red 0 is key 0 only when the pixel is
/// not fully transparent; transparent pixels are the gaps around the keys.
pub fn decode_pixel([r, _, _, a]: [u8; 4]) -> Option<KeyIndex> {
    match (r, a) {
        (0, 0) => None,
        (r, _) => Some(r),
    }
}

/// Pixel-exact hit-testing against irregular key shapes.
pub struct KeyMap {
    pixels: RgbaImage,
    bounds: Vec<Option<KeyBounds>>,
}

impl KeyMap {
    /// Validates that every key pixel names one of the instrument's `key_count` keys.
    pub fn new(pixels: RgbaImage, key_count: usize) -> Result<Self, KeyMapError> {
        let mut bounds: Vec<Option<KeyBounds>> = vec![None; key_count];
        for (x, y, pixel) in pixels.enumerate_pixels() {
            let Some(key) = decode_pixel(pixel.0) else {
                continue;
            };
            let slot = bounds
                .get_mut(key as usize)
                .ok_or(KeyMapError::KeyOutOfRange {
                    key,
                    x,
                    y,
                    key_count,
                })?;
            *slot = Some(match *slot {
                Some(mut b) => {
                    b.include(x, y);
                    b
                }
                None => KeyBounds::point(x, y),
            });
        }
        if bounds.iter().all(Option::is_none) {
            return Err(KeyMapError::NoKeys);
        }
        Ok(Self { pixels, bounds })
    }

    pub fn from_rgba(
        width: u32,
        height: u32,
        data: Vec<u8>,
        key_count: usize,
    ) -> Result<Self, KeyMapError> {
        let expected = width as usize * height as usize * 4;
        let actual = data.len();
        let pixels = RgbaImage::from_raw(width, height, data)
            .ok_or(KeyMapError::BufferSize { expected, actual })?;
        Self::new(pixels, key_count)
    }

    /// Loads a color map image, which must be exactly `width` x `height`.
    pub fn open(
        path: impl AsRef<Path>,
        width: u32,
        height: u32,
        key_count: usize,
    ) -> Result<Self, KeyMapError> {
        let pixels = image::open(path)?.to_rgba8();
        if pixels.dimensions() != (width, height) {
            return Err(KeyMapError::Dimensions {
                expected: (width, height),
                actual: pixels.dimensions(),
            });
        }
        Self::new(pixels, key_count)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn bounds(&self, key: KeyIndex) -> Option<KeyBounds> {
        self.bounds.get(key as usize).copied().flatten()
    }

    /// The key under bitmap pixel (`x`, `y`). Anything outside the bitmap is no key.
    pub fn index_at(&self, x: i32, y: i32) -> Option<KeyIndex> {
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return None;
        }
        decode_pixel(self.pixels.get_pixel(x as u32, y as u32).0)
    }
}
