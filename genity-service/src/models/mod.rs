pub mod genity;

pub use genity::Genity;
