pub mod geometry;
pub mod path;
pub mod ring;
pub mod xml;
