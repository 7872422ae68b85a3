//! Core data structures shared across the harvest and export pipelines.

mod author;
mod consolidated;
mod volume;

pub use author::{load_author_list, parse_author_list, AuthorQuery};
pub use consolidated::ConsolidatedResult;
pub use volume::{
    AccessInfo, FormatAvailability, ImageLinks, IndustryIdentifier, SaleInfo, Volume, VolumeInfo,
};
