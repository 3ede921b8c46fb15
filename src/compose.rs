pub mod builder;
pub mod track;
