//! Weekly timetable layout
//!
//! Everything here works in 1-based grid coordinates: one row per minute
//! (60 per hour) and one column per day, plus an optional label gutter on
//! the left. Rendering turns these into pixels; nothing in this module knows
//! about egui.

use tracing::{debug, warn};

use crate::api::{format_label, parse_label, LabelError, ScheduleItem};

/// Days a schedule item may fall on, in column order
pub const DAYS: [&str; 6] = ["Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu"];

/// Total one-minute rows in the grid
pub const GRID_ROWS: i32 = 990;

/// Header cell text above the label gutter
pub const LABEL_HEADER: &str = "Jam";

// Header cells cover rows 1..60
const HEADER_ROW_END: i32 = 60;

/// Converts between time labels, minute offsets and grid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridMapper {
    pub start_hour: i32,
    pub show_header: bool,
    pub show_label: bool,
}

impl GridMapper {
    fn header_shift(&self) -> i32 {
        if self.show_header {
            0
        } else {
            30
        }
    }

    /// 1 when the label gutter takes the first column
    pub fn label_offset(&self) -> i32 {
        if self.show_label {
            1
        } else {
            0
        }
    }

    /// "HH.00" for the hour `idx` hours after `start_hour`
    pub fn row_label_for_hour_offset(&self, idx: i32) -> String {
        let minute = idx * 60;
        format_label(minute / 60 + self.start_hour, minute % 60)
    }

    /// Grid row where a "HH.MM" label starts
    ///
    /// The two-hour shift and the half-hour pull-up without a header line the
    /// items up with the hour labels; keep them exactly as they are.
    pub fn label_to_minute_offset(&self, label: &str) -> Result<i32, LabelError> {
        let (hour, minute) = parse_label(label)?;
        Ok((hour - self.start_hour + 2) * 60 + minute - self.header_shift())
    }

    /// First row of the 60-row band for offset `offset`
    ///
    /// Hour markers pass their index from `start_hour`.
    pub fn minute_offset_to_row(&self, offset: i32) -> i32 {
        (offset + 1) * 60 - self.header_shift()
    }

    /// 1-based column for a day name, 0 when the day is not one of [`DAYS`]
    pub fn day_to_column(&self, day: &str) -> i32 {
        match DAYS.iter().position(|d| *d == day) {
            Some(idx) => idx as i32 + 1 + self.label_offset(),
            None => 0,
        }
    }
}

/// A rectangle on the grid; end row and end column are exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridArea {
    pub row_start: i32,
    pub col_start: i32,
    pub row_end: i32,
    pub col_end: i32,
}

impl GridArea {
    pub fn new(row_start: i32, col_start: i32, row_end: i32, col_end: i32) -> Self {
        Self {
            row_start,
            col_start,
            row_end,
            col_end,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridOptions {
    pub start_hour: i32,
    pub end_hour: i32,
    pub px_per_minute: f32,
    pub show_label: bool,
    pub show_header: bool,
    pub show_room: bool,
    pub mobile: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            start_hour: 7,
            end_hour: 21,
            px_per_minute: 0.9,
            show_label: true,
            show_header: true,
            show_room: true,
            mobile: false,
        }
    }
}

impl GridOptions {
    pub fn mapper(&self) -> GridMapper {
        GridMapper {
            start_hour: self.start_hour,
            show_header: self.show_header,
            show_label: self.show_label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextCell {
    pub area: GridArea,
    pub text: String,
}

/// What an item cell shows besides its position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemContent {
    /// "start - end", hidden on mobile
    pub time_range: Option<String>,
    /// Room next to the time range (desktop)
    pub header_room: Option<String>,
    pub name: String,
    /// Room below the name (mobile)
    pub footer_room: Option<String>,
}

impl ItemContent {
    pub fn new(item: &ScheduleItem, show_room: bool, mobile: bool) -> Self {
        let room = show_room.then(|| item.room.clone());
        if mobile {
            Self {
                time_range: None,
                header_room: None,
                name: item.name.clone(),
                footer_room: room,
            }
        } else {
            Self {
                time_range: Some(format!("{} - {}", item.start, item.end)),
                header_room: room,
                name: item.name.clone(),
                footer_room: None,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCell {
    /// Position in the schedule's item list; later items paint on top
    pub index: usize,
    pub area: GridArea,
    pub content: ItemContent,
}

/// Every cell of one rendered schedule, in paint order per layer
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub options: GridOptions,
    pub headers: Vec<TextCell>,
    pub markers: Vec<GridArea>,
    pub labels: Vec<TextCell>,
    pub items: Vec<ItemCell>,
}

impl GridLayout {
    pub fn build(items: &[ScheduleItem], options: GridOptions) -> Self {
        let mapper = options.mapper();
        let label_offset = mapper.label_offset();
        let hours = (options.end_hour - options.start_hour + 1).max(0);

        let mut headers = Vec::new();
        if options.show_header {
            let mut column = 1;
            if options.show_label {
                headers.push(TextCell {
                    area: GridArea::new(1, column, HEADER_ROW_END, column + 1),
                    text: LABEL_HEADER.to_string(),
                });
                column += 1;
            }
            for day in DAYS {
                headers.push(TextCell {
                    area: GridArea::new(1, column, HEADER_ROW_END, column + 1),
                    text: day.to_string(),
                });
                column += 1;
            }
        }

        let first_day_column = 1 + label_offset;
        let markers = (0..hours)
            .map(|idx| {
                let row = mapper.minute_offset_to_row(idx);
                GridArea::new(row, first_day_column, row + 60 + 1, first_day_column + DAYS.len() as i32)
            })
            .collect();

        let labels = if options.show_label {
            (0..hours)
                .map(|idx| {
                    let row = mapper.minute_offset_to_row(idx);
                    TextCell {
                        area: GridArea::new(row + 30, 1, row + 90, 2),
                        text: mapper.row_label_for_hour_offset(idx),
                    }
                })
                .collect()
        } else {
            Vec::new()
        };

        let items = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let area = match item_area(&mapper, item) {
                    Ok(Some(area)) => area,
                    Ok(None) => {
                        debug!(day = %item.day, name = %item.name, "Item day is not on the grid");
                        return None;
                    }
                    Err(e) => {
                        warn!(name = %item.name, "Skipping item: {}", e);
                        return None;
                    }
                };
                Some(ItemCell {
                    index,
                    area,
                    content: ItemContent::new(item, options.show_room, options.mobile),
                })
            })
            .collect();

        Self {
            options,
            headers,
            markers,
            labels,
            items,
        }
    }

    /// Pixel height of the whole grid
    pub fn height(&self) -> f32 {
        GRID_ROWS as f32 * self.options.px_per_minute
    }

    /// Number of grid columns (days plus the label gutter)
    pub fn columns(&self) -> i32 {
        DAYS.len() as i32 + self.options.mapper().label_offset()
    }
}

/// Grid area for an item, `None` when its day has no column
fn item_area(mapper: &GridMapper, item: &ScheduleItem) -> Result<Option<GridArea>, LabelError> {
    let column = mapper.day_to_column(&item.day);
    if column == 0 {
        return Ok(None);
    }
    let start = mapper.label_to_minute_offset(&item.start)?;
    let end = mapper.label_to_minute_offset(&item.end)?;
    Ok(Some(GridArea::new(start, column, end, column + 1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn item(day: &str, start: &str, end: &str) -> ScheduleItem {
        ScheduleItem {
            day: day.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            room: "2.2404".to_string(),
            name: "Basis Data - A".to_string(),
        }
    }

    fn mapper(show_header: bool, show_label: bool) -> GridMapper {
        GridMapper {
            start_hour: 7,
            show_header,
            show_label,
        }
    }

    #[test]
    fn test_row_labels() {
        let m = mapper(true, true);
        assert_eq!(m.row_label_for_hour_offset(0), "07.00");
        assert_eq!(m.row_label_for_hour_offset(3), "10.00");
        assert_eq!(m.row_label_for_hour_offset(14), "21.00");
    }

    #[test]
    fn test_label_to_minute_offset() {
        let m = mapper(true, true);
        assert_eq!(m.label_to_minute_offset("07.00"), Ok(120));
        assert_eq!(m.label_to_minute_offset("08.00"), Ok(180));
        assert_eq!(m.label_to_minute_offset("09.40"), Ok(280));

        let no_header = mapper(false, true);
        assert_eq!(no_header.label_to_minute_offset("08.00"), Ok(150));
    }

    #[test]
    fn test_label_to_minute_offset_rejects_bad_labels() {
        assert!(mapper(true, true).label_to_minute_offset("delapan").is_err());
    }

    #[test]
    fn test_minute_offset_to_row() {
        let m = mapper(true, true);
        assert_eq!(m.minute_offset_to_row(0), 60);
        assert_eq!(m.minute_offset_to_row(1), 120);
        assert_eq!(mapper(false, true).minute_offset_to_row(1), 90);
    }

    #[test]
    fn test_row_mapping_preserves_order() {
        for show_header in [true, false] {
            let m = mapper(show_header, true);
            let mut previous = None;
            for hour in 7..=21 {
                for minute in [0, 15, 30, 59] {
                    let label = format_label(hour, minute);
                    let row = m.minute_offset_to_row(m.label_to_minute_offset(&label).unwrap());
                    if let Some(prev) = previous {
                        assert!(row > prev, "{} did not move down the grid", label);
                    }
                    previous = Some(row);
                }
            }
        }
    }

    #[test]
    fn test_day_to_column() {
        let with_gutter = mapper(true, true);
        assert_eq!(with_gutter.day_to_column("Senin"), 2);
        assert_eq!(with_gutter.day_to_column("Sabtu"), 7);

        let without_gutter = mapper(true, false);
        assert_eq!(without_gutter.day_to_column("Senin"), 1);
        assert_eq!(without_gutter.day_to_column("Sabtu"), 6);
    }

    #[test]
    fn test_day_to_column_is_injective_and_bounded() {
        for show_label in [true, false] {
            let m = mapper(true, show_label);
            let offset = m.label_offset();
            let columns: Vec<i32> = DAYS.iter().map(|d| m.day_to_column(d)).collect();
            assert!(columns.iter().all(|c| (1 + offset..=6 + offset).contains(c)));
            let distinct: HashSet<i32> = columns.iter().copied().collect();
            assert_eq!(distinct.len(), DAYS.len());
        }
    }

    #[test]
    fn test_unknown_day_is_column_zero() {
        assert_eq!(mapper(true, true).day_to_column("Minggu"), 0);
        assert_eq!(mapper(true, false).day_to_column("senin"), 0);
    }

    #[test]
    fn test_item_lands_on_its_label_and_day() {
        let options = GridOptions::default();
        let layout = GridLayout::build(&[item("Senin", "08.00", "09.00")], options);
        let m = options.mapper();

        assert_eq!(layout.items.len(), 1);
        let area = layout.items[0].area;
        assert_eq!(area.row_start, m.label_to_minute_offset("08.00").unwrap());
        assert_eq!(area.row_end, m.label_to_minute_offset("09.00").unwrap());
        assert_eq!(area.col_start, m.day_to_column("Senin"));
        assert_eq!(area.col_end, area.col_start + 1);
    }

    #[test]
    fn test_item_running_to_midnight_is_placed() {
        let layout = GridLayout::build(&[item("Jumat", "22.00", "24.00")], GridOptions::default());
        assert_eq!(layout.items.len(), 1);
        assert_eq!(layout.items[0].area.row_start, 1020);
        assert_eq!(layout.items[0].area.row_end, 1140);
    }

    #[test]
    fn test_empty_schedule_has_only_frame_cells() {
        let layout = GridLayout::build(&[], GridOptions::default());
        assert!(layout.items.is_empty());
        assert_eq!(layout.headers.len(), 7);
        assert_eq!(layout.headers[0].text, LABEL_HEADER);
        assert_eq!(layout.markers.len(), 15);
        assert_eq!(layout.labels.len(), 15);
        assert_eq!(layout.labels[0].text, "07.00");
        assert_eq!(layout.labels[14].text, "21.00");
    }

    #[test]
    fn test_markers_and_labels_positions() {
        let layout = GridLayout::build(&[], GridOptions::default());
        assert_eq!(layout.markers[0], GridArea::new(60, 2, 121, 8));
        assert_eq!(layout.labels[0].area, GridArea::new(90, 1, 150, 2));

        let bare = GridLayout::build(
            &[],
            GridOptions {
                show_label: false,
                show_header: false,
                ..GridOptions::default()
            },
        );
        assert!(bare.headers.is_empty());
        assert!(bare.labels.is_empty());
        assert_eq!(bare.markers[0], GridArea::new(30, 1, 91, 7));
        assert_eq!(bare.columns(), 6);
    }

    #[test]
    fn test_headers_without_gutter_start_at_first_column() {
        let layout = GridLayout::build(
            &[],
            GridOptions {
                show_label: false,
                ..GridOptions::default()
            },
        );
        assert_eq!(layout.headers.len(), 6);
        assert_eq!(layout.headers[0].text, "Senin");
        assert_eq!(layout.headers[0].area, GridArea::new(1, 1, 60, 2));
    }

    #[test]
    fn test_items_with_unknown_day_or_bad_label_are_dropped() {
        let items = vec![
            item("Minggu", "08.00", "09.00"),
            item("Rabu", "jam 8", "09.00"),
            item("Kamis", "10.00", "11.40"),
        ];
        let layout = GridLayout::build(&items, GridOptions::default());
        assert_eq!(layout.items.len(), 1);
        assert_eq!(layout.items[0].index, 2);
    }

    #[test]
    fn test_overlapping_and_inverted_items_are_kept() {
        let items = vec![
            item("Senin", "08.00", "10.00"),
            item("Senin", "09.00", "11.00"),
            item("Selasa", "09.40", "08.00"),
        ];
        let layout = GridLayout::build(&items, GridOptions::default());
        assert_eq!(layout.items.len(), 3);
        let inverted = layout.items[2].area;
        assert!(inverted.row_end < inverted.row_start);
    }

    #[test]
    fn test_item_content_desktop_and_mobile() {
        let it = item("Senin", "08.00", "09.40");

        let desktop = ItemContent::new(&it, true, false);
        assert_eq!(desktop.time_range.as_deref(), Some("08.00 - 09.40"));
        assert_eq!(desktop.header_room.as_deref(), Some("2.2404"));
        assert_eq!(desktop.footer_room, None);

        let mobile = ItemContent::new(&it, true, true);
        assert_eq!(mobile.time_range, None);
        assert_eq!(mobile.header_room, None);
        assert_eq!(mobile.footer_room.as_deref(), Some("2.2404"));

        let no_room = ItemContent::new(&it, false, true);
        assert_eq!(no_room.footer_room, None);
        assert_eq!(no_room.name, "Basis Data - A");
    }

    #[test]
    fn test_height_follows_scale() {
        let layout = GridLayout::build(
            &[],
            GridOptions {
                px_per_minute: 0.5,
                ..GridOptions::default()
            },
        );
        assert_eq!(layout.height(), 495.0);
    }
}
