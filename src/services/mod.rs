// Service module exports

pub mod clock;
pub mod countdown;
pub mod particles;
pub mod presentation;
pub mod pulse;
pub mod settings;
