//! The harvest pipeline: per-author pagination and batch orchestration.

mod batch;
mod paginate;

pub use batch::{artifact_file_name, AuthorOutcome, BatchRunner, RunConfig, RunSummary};
pub use paginate::Paginator;
