mod actions;
mod app;
mod card;
mod dom;
mod palette;
mod persistence;
mod render;
mod sketch;
mod state;
mod util;
mod views;

pub use app::run;
