pub mod draw;
pub mod geometry;
pub mod input;
pub mod time;
