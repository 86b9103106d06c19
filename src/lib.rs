//! Film Panda: an interactive dashboard over the IMDb top 250 films.
//!
//! The [`data`] module is the GUI-free core (load, filter, aggregate);
//! [`state`], [`ui`] and [`app`] draw it with egui.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
