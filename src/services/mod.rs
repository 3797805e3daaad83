pub mod dashboard;
pub mod differential;
pub mod outcome_extractor;
pub mod pipeline;
pub mod schedule_fetcher;

pub use dashboard::*;
pub use differential::*;
pub use outcome_extractor::*;
pub use pipeline::*;
pub use schedule_fetcher::*;
