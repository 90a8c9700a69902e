pub mod controller;
pub mod keymap;
pub mod layout;

pub use self::controller::{ControllerState, Effect, InputController, InputState};
pub use self::keymap::{KeyBounds, KeyMap, KeyMapError};

/// Pointer position relative to the top-left corner of the rendered keyboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPosition {
    pub x: f32,
    pub y: f32,
}

/// Size the keyboard is currently drawn at on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    /// The size of a surface `width` wide that keeps the bitmap's aspect ratio.
    pub fn from_width(width: f32, bitmap_width: u32, bitmap_height: u32) -> Self {
        Self {
            width,
            height: bitmap_height as f32 * width / bitmap_width as f32,
        }
    }

    /// Rescales a position on the rendered surface to bitmap pixel coordinates,
    /// truncating toward zero. A surface with no area maps nowhere.
    pub fn to_bitmap(
        &self,
        position: PointerPosition,
        bitmap_width: u32,
        bitmap_height: u32,
    ) -> Option<(i32, i32)> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return None;
        }
        let x = bitmap_width as f32 * position.x / self.width;
        let y = bitmap_height as f32 * position.y / self.height;
        Some((x as i32, y as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rescale_to_bitmap() {
        let surface = SurfaceSize {
            width: 1378.0,
            height: 400.0,
        };
        let position = PointerPosition { x: 100.0, y: 399.0 };
        assert_eq!(surface.to_bitmap(position, 689, 200), Some((50, 199)));
    }

    #[test]
    fn test_rescale_truncates_toward_zero() {
        let surface = SurfaceSize {
            width: 689.0,
            height: 200.0,
        };
        let position = PointerPosition { x: -0.5, y: 10.9 };
        assert_eq!(surface.to_bitmap(position, 689, 200), Some((0, 10)));
        let position = PointerPosition { x: -3.0, y: 250.0 };
        assert_eq!(surface.to_bitmap(position, 689, 200), Some((-3, 250)));
    }

    #[test]
    fn test_empty_surface_maps_nowhere() {
        let position = PointerPosition { x: 1.0, y: 1.0 };
        for surface in [
            SurfaceSize {
                width: 0.0,
                height: 100.0,
            },
            SurfaceSize {
                width: f32::NAN,
                height: 100.0,
            },
        ] {
            assert_eq!(surface.to_bitmap(position, 689, 200), None);
        }
    }

    #[test]
    fn test_height_from_width_keeps_aspect_ratio() {
        let surface = SurfaceSize::from_width(344.5, 689, 200);
        assert_eq!(surface.height, 100.0);
    }
}
