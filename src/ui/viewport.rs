use bevy_egui::egui;

use crate::browser::{Orientation, DEFAULT_ZOOM};
use crate::catalog::AssetHandle;
use crate::projector::{Preview, ProjectedView};

/// Unit cube corners and edges for wireframe previews
const CUBE_CORNERS: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];
const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 2), (2, 3), (3, 0),
    (4, 5), (5, 6), (6, 7), (7, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

const SPRITE_CELLS: usize = 8;

/// Draw the preview into `size` and return the rect it occupies.
/// The area senses drags so the window does not move while the model is rotated.
pub fn render_viewport(
    ui: &mut egui::Ui,
    view: Option<&ProjectedView>,
    parts_shown: usize,
    size: egui::Vec2,
) -> egui::Rect {
    let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
    let rect = response.rect;
    painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(24, 22, 20));

    match view.map(|v| &v.preview) {
        None | Some(Preview::Hidden) => {}
        Some(Preview::Graphic(handle)) => draw_sprite(&painter, rect, *handle),
        Some(Preview::Model { model, orientation }) => {
            draw_model(&painter, rect, *model, orientation, 0.0, 1.0);
        }
        Some(Preview::Composite { parts, orientation }) => {
            // parts stack top to bottom like body segments
            let count = parts.len() as f32;
            for (i, part) in parts.iter().enumerate() {
                let offset = (i as f32 - (count - 1.0) / 2.0) * 0.9;
                draw_model(&painter, rect, *part, orientation, offset, 0.6);
            }
        }
    }

    if let Some(orientation) = view.and_then(|v| v.preview.orientation()) {
        painter.text(
            rect.left_bottom() + egui::vec2(6.0, -6.0),
            egui::Align2::LEFT_BOTTOM,
            format!(
                "rot {}/{}  zoom {}  parts {}",
                orientation.rotation_x, orientation.rotation_z, orientation.zoom, parts_shown
            ),
            egui::FontId::monospace(11.0),
            egui::Color32::GRAY,
        );
    }

    rect
}

/// Stand-in for a decoded sprite: a pixel pattern derived from the handle
fn draw_sprite(painter: &egui::Painter, rect: egui::Rect, handle: AssetHandle) {
    let side = rect.width().min(rect.height()) * 0.5;
    let cell = side / SPRITE_CELLS as f32;
    let origin = rect.center() - egui::vec2(side, side) / 2.0;
    let color = handle_color(handle);
    let mut bits = seed(handle);
    for row in 0..SPRITE_CELLS {
        for col in 0..SPRITE_CELLS / 2 {
            bits = bits.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            if bits >> 63 == 0 {
                continue;
            }
            // mirrored halves read as a sprite
            for c in [col, SPRITE_CELLS - 1 - col] {
                let min = origin + egui::vec2(c as f32 * cell, row as f32 * cell);
                painter.rect_filled(
                    egui::Rect::from_min_size(min, egui::vec2(cell, cell)),
                    0.0,
                    color,
                );
            }
        }
    }
}

fn draw_model(
    painter: &egui::Painter,
    rect: egui::Rect,
    handle: AssetHandle,
    orientation: &Orientation,
    vertical_offset: f32,
    size: f32,
) {
    let scale = rect.height().min(rect.width()) * 0.18 * DEFAULT_ZOOM as f32 / orientation.zoom as f32;
    let (sin_yaw, cos_yaw) = orientation.yaw_radians().sin_cos();
    let (sin_pitch, cos_pitch) = orientation.pitch_radians().sin_cos();

    let project = |[x, y, z]: [f32; 3]| -> egui::Pos2 {
        let (x, y, z) = (x * size, y * size + vertical_offset, z * size);
        // yaw around the vertical axis, then pitch toward the viewer
        let (x, z) = (x * cos_yaw - z * sin_yaw, x * sin_yaw + z * cos_yaw);
        let (y, _z) = (y * cos_pitch - z * sin_pitch, y * sin_pitch + z * cos_pitch);
        rect.center() + egui::vec2(x, y) * scale
    };

    let stroke = egui::Stroke::new(1.5, handle_color(handle));
    for (a, b) in CUBE_EDGES {
        painter.line_segment([project(CUBE_CORNERS[a]), project(CUBE_CORNERS[b])], stroke);
    }
}

fn seed(handle: AssetHandle) -> u64 {
    (handle.0 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1
}

fn handle_color(handle: AssetHandle) -> egui::Color32 {
    let hue = (seed(handle) >> 40) as f32 / (1u64 << 24) as f32;
    egui::ecolor::Hsva::new(hue, 0.55, 0.9, 1.0).into()
}
