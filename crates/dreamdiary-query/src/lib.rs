pub mod cache;
pub mod catalog;
pub mod cloud;
pub mod error;
pub mod filter;
pub mod stats;

#[cfg(test)]
mod fixtures;

pub use cache::StatsCache;
pub use catalog::{tag_catalog, TagCount};
pub use cloud::{CloudTag, CloudTier, TagCloud};
pub use error::QueryError;
pub use filter::{filter_dreams, DreamFilter, TypeFilter};
pub use stats::{DreamStats, MoodShare, TagRank, TAG_CLOUD_LIMIT, TOP_TAGS_LIMIT};
