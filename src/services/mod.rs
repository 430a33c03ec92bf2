// Service module exports

pub mod app;
pub mod classifier;
pub mod events;
pub mod grid;
pub mod layout;
pub mod position;
pub mod range;
pub mod settings;
pub mod time_units;
