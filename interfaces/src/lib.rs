pub mod defs;

pub use defs::{CuratedArticle, Explanation, PipelineReport, RawArticle};
