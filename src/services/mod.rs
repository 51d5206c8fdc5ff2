pub mod assembly;
pub mod dashboard;
pub mod filter;
pub mod listing;

pub use assembly::{AssemblyService, Loaded};
pub use dashboard::{CategoryShare, DashboardService, DashboardSummary, TopApi, TrendPoint};
pub use filter::{FilterQuery, SortKey, ALL};
pub use listing::{validate_optional, validate_required, CreateListing, ListingService};
