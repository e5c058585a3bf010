pub mod fetcher;
pub mod ingestor;

pub use fetcher::{FetchRequest, FetchResponse, Fetcher, Method};
pub use ingestor::CatalogIngestor;
