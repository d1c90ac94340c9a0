pub mod cost;
pub mod metric;
pub mod resource;
