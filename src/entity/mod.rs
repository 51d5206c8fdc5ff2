pub mod api;
pub mod category;
pub mod endpoint;
pub mod stats;
