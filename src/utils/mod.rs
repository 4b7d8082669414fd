pub mod aggregation;
pub mod layout;
pub mod normalize;
pub mod time;
pub mod validation;

pub use aggregation::{aggregate_top_n, total_value};
pub use layout::compute_pyramid_rows;
pub use normalize::{apply_filters, coverage_percent, normalize_series, NormalizeOptions, SeriesView};
pub use validation::validate_username;
