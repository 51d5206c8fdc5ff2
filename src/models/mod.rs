pub mod api;
pub mod category;
pub mod endpoint;
pub mod listing;
pub mod stats;

pub use api::*;
pub use category::*;
pub use endpoint::*;
pub use listing::*;
pub use stats::*;
