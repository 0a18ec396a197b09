pub mod anchors;
pub mod calculator;
pub mod carousel;
pub mod config;
pub mod contact;
pub mod error;
pub mod faq;
pub mod format;
pub mod header;
pub mod menu;
pub mod models;
pub mod theme;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;
