pub mod bbox;
pub mod render;
pub mod trace;
