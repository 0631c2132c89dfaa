pub mod pagination;

pub use pagination::{Page, PageParams, Pages};
