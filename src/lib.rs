pub mod app;
pub mod events;
pub mod grid;
pub mod surface;
