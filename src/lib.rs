//! Month-grid calendar: the grid builder plus the HTTP and terminal views
//! that present it.

pub mod calendar;
pub mod config;
pub mod text;
pub mod theme;
pub mod web;
