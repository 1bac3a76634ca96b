pub mod output;
pub mod professor_fetch;
pub mod school_search;

pub use output::ProfessorWriter;
pub use professor_fetch::{FetchOutcome, ProfessorFetch, StopReason};
pub use school_search::SchoolSearch;
