pub mod genity;
pub mod health;

pub use genity::{create_genity, delete_genity, get_genity, query_genitys, update_genity};
pub use health::{health_check, metrics_endpoint};
