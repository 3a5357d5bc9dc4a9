use egui::{Align2, Color32, FontId, Pos2, Rect, RichText, Stroke, Ui};

use super::theme::{grid_colors, grid_font_sizes, GridColors};
use crate::grid::{GridArea, GridLayout, ItemCell};
use crate::rename::{RenameControl, RenameEvent, RenameRequest, MAX_NAME_CHARS};

const LABEL_GUTTER_WIDTH: f32 = 64.0;
const NAME_FONT_SIZE: f32 = 32.0;

/// Pixel geometry of a laid-out grid anchored at `origin`
struct GridGeometry {
    origin: Pos2,
    gutter: f32,
    day_width: f32,
    px_per_minute: f32,
}

impl GridGeometry {
    fn new(layout: &GridLayout, origin: Pos2, width: f32) -> Self {
        let gutter = if layout.options.show_label {
            LABEL_GUTTER_WIDTH
        } else {
            0.0
        };
        let days = (layout.columns() - layout.options.mapper().label_offset()).max(1);
        Self {
            origin,
            gutter,
            day_width: ((width - gutter) / days as f32).max(0.0),
            px_per_minute: layout.options.px_per_minute,
        }
    }

    fn col_x(&self, col: i32) -> f32 {
        let day_col = if self.gutter > 0.0 {
            if col <= 1 {
                return self.origin.x;
            }
            col - 2
        } else {
            col - 1
        };
        self.origin.x + self.gutter + day_col as f32 * self.day_width
    }

    fn row_y(&self, row: i32) -> f32 {
        self.origin.y + (row - 1) as f32 * self.px_per_minute
    }

    fn rect(&self, area: GridArea) -> Rect {
        Rect::from_min_max(
            egui::pos2(self.col_x(area.col_start), self.row_y(area.row_start)),
            egui::pos2(self.col_x(area.col_end), self.row_y(area.row_end)),
        )
    }
}

/// Paint the weekly timetable; no interaction beyond scrolling
pub fn render_schedule_grid(ui: &mut Ui, layout: &GridLayout) {
    let colors = grid_colors();
    let (label_size, _) = grid_font_sizes(layout.options.mobile);

    egui::ScrollArea::vertical().show(ui, |ui| {
        let width = ui.available_width();
        let (grid_rect, _) = ui.allocate_exact_size(egui::vec2(width, layout.height()), egui::Sense::hover());
        let geometry = GridGeometry::new(layout, grid_rect.min, width);
        let painter = ui.painter();

        // Hour bands at the bottom
        for area in &layout.markers {
            painter.rect_stroke(geometry.rect(*area), 0.0, Stroke::new(0.95, colors.marker_border));
        }

        for label in &layout.labels {
            painter.text(
                geometry.rect(label.area).center(),
                Align2::CENTER_CENTER,
                &label.text,
                FontId::proportional(label_size),
                colors.text,
            );
        }

        for cell in &layout.items {
            render_item_cell(ui, &geometry, cell, &colors, layout.options.mobile);
        }

        // Headers paint last so they sit above everything else
        let painter = ui.painter();
        for header in &layout.headers {
            let rect = geometry.rect(header.area);
            painter.rect_filled(rect, 0.0, colors.header_bg);
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                &header.text,
                FontId::proportional(label_size),
                colors.text,
            );
        }
    });
}

fn render_item_cell(ui: &Ui, geometry: &GridGeometry, cell: &ItemCell, colors: &GridColors, mobile: bool) {
    let area_rect = geometry.rect(cell.area);
    let rect = Rect::from_min_size(
        area_rect.min,
        egui::vec2(area_rect.width() * 0.95, area_rect.height()),
    );

    ui.painter().rect_filled(rect, 8.0, colors.item_bg);

    let painter = ui.painter().with_clip_rect(rect.intersect(ui.clip_rect()));
    let (_, name_size) = grid_font_sizes(mobile);
    let content = &cell.content;
    let mut y = rect.min.y + 5.0;

    if let Some(time_range) = &content.time_range {
        let header_font = FontId::proportional(11.0);
        let time_rect = painter.text(
            egui::pos2(rect.min.x + 4.0, y),
            Align2::LEFT_TOP,
            time_range,
            header_font.clone(),
            colors.secondary_text,
        );
        if let Some(room) = &content.header_room {
            // Room keeps to the right 40% of the cell
            let room_rect = Rect::from_min_max(
                egui::pos2(rect.max.x - rect.width() * 0.4, y),
                egui::pos2(rect.max.x - 4.0, y + time_rect.height()),
            );
            painter.with_clip_rect(room_rect.intersect(painter.clip_rect())).text(
                egui::pos2(room_rect.max.x, y),
                Align2::RIGHT_TOP,
                room,
                header_font,
                colors.secondary_text,
            );
        }
        y = time_rect.max.y + 2.0;
    }

    let name_galley = painter.layout(
        content.name.clone(),
        FontId::proportional(name_size),
        colors.text,
        (rect.width() - 8.0).max(1.0),
    );
    let name_height = name_galley.rect.height();
    painter.galley(egui::pos2(rect.min.x + 4.0, y), name_galley, colors.text);
    y += name_height;

    if let Some(room) = &content.footer_room {
        painter.text(
            egui::pos2(rect.min.x + 4.0, y),
            Align2::LEFT_TOP,
            room,
            FontId::proportional(name_size - 2.0),
            colors.secondary_text,
        );
    }
}

/// Editable schedule title; returns a request whenever the field is submitted
pub fn render_rename_control(ui: &mut Ui, control: &mut RenameControl) -> Option<RenameRequest> {
    let mut request = None;
    let field_id = ui.make_persistent_id("form-field-schedule-name");
    let font = FontId::proportional(NAME_FONT_SIZE);

    ui.horizontal(|ui| {
        let mut buffer = control.title().to_string();
        let text_width = ui.fonts(|f| {
            f.layout_no_wrap(buffer.clone(), font.clone(), Color32::WHITE).size().x
        });

        let response = ui.add(
            egui::TextEdit::singleline(&mut buffer)
                .id(field_id)
                .char_limit(MAX_NAME_CHARS)
                .font(font.clone())
                .frame(false)
                .desired_width(text_width.max(40.0) + 8.0),
        );

        if response.gained_focus() {
            control.handle(RenameEvent::Focus);
        }
        if response.changed() {
            control.handle(RenameEvent::Change(buffer));
        }
        if response.lost_focus() {
            let event = if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                RenameEvent::Enter
            } else {
                RenameEvent::Blur
            };
            request = control.handle(event);
        }

        if !control.is_editing() {
            let edit = ui.add(
                egui::Button::new(
                    RichText::new(egui_phosphor::regular::PENCIL_SIMPLE)
                        .size(NAME_FONT_SIZE)
                        .color(Color32::WHITE),
                )
                .frame(false),
            );
            if edit.hovered() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
            }
            if edit.clicked() {
                response.request_focus();
            }
        }
    });

    request
}

/// Title for viewers who may not rename the schedule
pub fn render_schedule_name(ui: &mut Ui, name: &str) {
    ui.label(RichText::new(name).size(NAME_FONT_SIZE).color(Color32::WHITE));
}
