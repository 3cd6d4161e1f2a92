// Module exports for models

pub mod countdown;
pub mod particle;
pub mod settings;
pub mod target_date;
