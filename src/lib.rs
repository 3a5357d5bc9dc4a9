//! Weekly class-schedule viewer: REST client, timetable layout and the
//! egui screen that ties them together.

pub mod api;
pub mod cli;
pub mod config;
pub mod grid;
pub mod rename;
pub mod timing;
pub mod ui;
pub mod view;
