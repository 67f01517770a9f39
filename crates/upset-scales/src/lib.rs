pub mod filter;
pub mod format;
pub mod layout;
pub mod model;
pub mod scale;
pub mod scales;

pub use filter::{Filtered, filter_set_size, starting_min_size};
pub use layout::{Margins, Sizes, compute_sizes, has_risk_data};
pub use model::{DataError, MarginalCode, Pattern, codes_equal};
pub use scale::{BandScale, LinearScale};
pub use scales::{Scales, compute_scales, count_scale};
