pub mod extractor;
pub mod fetcher;
pub mod pipeline;
pub mod store;

pub use extractor::*;
pub use fetcher::*;
pub use pipeline::*;
pub use store::*;
