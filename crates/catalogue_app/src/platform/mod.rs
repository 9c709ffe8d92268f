pub mod address_bar;
pub mod app;
pub mod config;
pub mod effects;
pub mod input;
pub mod relay;
pub mod ui;
