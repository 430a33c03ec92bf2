// Module exports for models

pub mod event;
pub mod layout;
pub mod range;
pub mod settings;
pub mod ui;
