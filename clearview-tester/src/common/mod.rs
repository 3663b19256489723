pub mod reports;
pub mod util;

pub use reports::ScenarioResult;
pub use util::{artifacts_dir, capture_artifacts, split_csv};
