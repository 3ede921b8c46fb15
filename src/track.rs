pub mod configuration;
pub mod item;
