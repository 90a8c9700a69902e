use eframe::egui::{self, Color32, Pos2, Rect, Stroke};
use std::time::Instant;
use supersaw_keys::audio::CpalBackend;
use supersaw_keys::input::keymap::decode_pixel;
use supersaw_keys::input::{PointerPosition, SurfaceSize};
use supersaw_keys::instrument::Instrument;
use supersaw_keys::synth::note::{is_black_key, KeyIndex};

const GRID_SPACING: f32 = 40.0;
const BASE_COLOR: Color32 = Color32::from_rgb(24, 18, 40);
const BASE_BRIGHTER_COLOR: Color32 = Color32::from_rgb(70, 40, 110);
const GRID_COLOR: Color32 = Color32::from_rgb(200, 80, 220);

pub fn run(instrument: Instrument<CpalBackend>) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 560.0])
            .with_title("supersaw-keys"),
        ..Default::default()
    };
    eframe::run_native(
        "supersaw-keys",
        options,
        Box::new(move |cc| Box::new(KeyboardApp::new(cc, instrument))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run window: {}", e))
}

struct KeyboardApp {
    instrument: Instrument<CpalBackend>,
    keyboard_texture: egui::TextureHandle,
    /// Last pointer position seen over the keyboard.
    last_pointer: Option<Pos2>,
}

impl KeyboardApp {
    fn new(cc: &eframe::CreationContext<'_>, instrument: Instrument<CpalBackend>) -> Self {
        let key_map = instrument.key_map();
        let rgba: Vec<u8> = key_map
            .pixels()
            .pixels()
            .flat_map(|pixel| key_color(decode_pixel(pixel.0)))
            .collect();
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [key_map.width() as usize, key_map.height() as usize],
            &rgba,
        );
        let keyboard_texture =
            cc.egui_ctx
                .load_texture("keyboard", image, egui::TextureOptions::LINEAR);
        Self {
            instrument,
            keyboard_texture,
            last_pointer: None,
        }
    }

    fn handle_pointer(&mut self, ctx: &egui::Context, keyboard: Rect, surface: SurfaceSize) {
        let (hover, pressed, released) = ctx.input(|i| {
            (
                i.pointer.hover_pos(),
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
            )
        });
        let inside = hover.filter(|pos| keyboard.contains(*pos));
        match inside {
            Some(pos) => {
                let position = PointerPosition {
                    x: pos.x - keyboard.left(),
                    y: pos.y - keyboard.top(),
                };
                if self.last_pointer != Some(pos) {
                    self.instrument.on_pointer_move(position, surface);
                }
                if pressed {
                    self.instrument.on_pointer_down(position, surface);
                }
            }
            None => {
                if self.last_pointer.is_some() {
                    self.instrument.on_pointer_leave();
                }
            }
        }
        self.last_pointer = inside;
        // anywhere in the window, so a key can't get stuck
        if released {
            self.instrument.on_pointer_up();
        }
    }

    fn paint_grid(&self, painter: &egui::Painter, rect: Rect) {
        let base = if self.instrument.controller().brightness_on() {
            BASE_BRIGHTER_COLOR
        } else {
            BASE_COLOR
        };
        painter.rect_filled(rect, 0.0, base);

        let stroke = Stroke::new(1.0, GRID_COLOR);
        let position = self.instrument.animator().position();
        let offset = position.rem_euclid(GRID_SPACING as f64) as f32;
        let mut y = rect.top() + offset;
        while y < rect.bottom() {
            painter.line_segment(
                [egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)],
                stroke,
            );
            y += GRID_SPACING;
        }
        let mut x = rect.left();
        while x < rect.right() {
            painter.line_segment(
                [egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())],
                stroke,
            );
            x += GRID_SPACING;
        }
    }

    fn paint_keyboard(&self, painter: &egui::Painter, rect: Rect) {
        let full_uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        painter.image(self.keyboard_texture.id(), rect, full_uv, Color32::WHITE);

        let controller = self.instrument.controller();
        let hovered = controller
            .hover_key()
            .filter(|&key| Some(key) != controller.pressed_key());
        if let Some((key_rect, _)) = hovered.and_then(|key| self.key_rects(key, rect)) {
            let highlight = Color32::from_rgba_unmultiplied(255, 255, 255, 40);
            painter.rect_filled(key_rect, 0.0, highlight);
        }
        if let Some(key) = controller.pressed_key() {
            if let Some((key_rect, uv)) = self.key_rects(key, rect) {
                // pressed keys sink by 4% of the keyboard height
                let pressed_rect = key_rect.translate(egui::vec2(0.0, rect.height() * 0.04));
                painter.rect_filled(key_rect, 0.0, BASE_COLOR);
                painter.image(
                    self.keyboard_texture.id(),
                    pressed_rect,
                    uv,
                    Color32::from_rgb(255, 200, 255),
                );
            }
        }
    }

    /// Screen rect and texture uv rect of a key's bounding box.
    fn key_rects(&self, key: KeyIndex, keyboard: Rect) -> Option<(Rect, Rect)> {
        let key_map = self.instrument.key_map();
        let bounds = key_map.bounds(key)?;
        let (w, h) = (key_map.width() as f32, key_map.height() as f32);
        let uv = Rect::from_min_max(
            egui::pos2(bounds.x as f32 / w, bounds.y as f32 / h),
            egui::pos2(
                (bounds.x + bounds.width) as f32 / w,
                (bounds.y + bounds.height) as f32 / h,
            ),
        );
        let screen = Rect::from_min_max(
            keyboard.lerp_inside(uv.min.to_vec2()),
            keyboard.lerp_inside(uv.max.to_vec2()),
        );
        Some((screen, uv))
    }
}

impl eframe::App for KeyboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (bitmap_width, bitmap_height) = {
            let key_map = self.instrument.key_map();
            (key_map.width(), key_map.height())
        };
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::BLACK))
            .show(ctx, |ui| {
                let available = ui.available_rect_before_wrap();
                let surface =
                    SurfaceSize::from_width(available.width(), bitmap_width, bitmap_height);
                let keyboard = Rect::from_min_size(
                    egui::pos2(available.left(), available.bottom() - surface.height),
                    egui::vec2(surface.width, surface.height),
                );
                let grid = Rect::from_min_max(
                    available.min,
                    egui::pos2(available.right(), keyboard.top()),
                );

                self.handle_pointer(ctx, keyboard, surface);
                self.instrument.on_tick(Instant::now());

                let painter = ui.painter();
                self.paint_grid(painter, grid);
                self.paint_keyboard(painter, keyboard);
            });

        if self.instrument.is_animating() {
            ctx.request_repaint();
        }
    }
}

fn key_color(key: Option<KeyIndex>) -> [u8; 4] {
    match key {
        None => [0, 0, 0, 0],
        Some(key) if is_black_key(key) => [28, 26, 34, 255],
        Some(_) => [236, 234, 242, 255],
    }
}
