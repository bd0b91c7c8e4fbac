pub mod fixed;
pub mod newsapi;

pub use fixed::FixedArticleSource;
pub use newsapi::NewsApiSource;
