mod app;
mod theme;
mod views;

pub use app::JadwalApp;
pub use theme::{setup_fonts, setup_theme};
pub use views::{render_rename_control, render_schedule_grid, render_schedule_name};
