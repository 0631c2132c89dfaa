pub mod genity;

pub use genity::{CreateGenityRequest, GenityResponse, UpdateGenityRequest};
