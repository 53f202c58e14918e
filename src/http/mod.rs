//! HTTP transport for a single fetch: interface-bound client construction,
//! the request itself, and reduction of its result to an outcome.
mod client;
mod fetcher;


pub use fetcher::HttpFetcher;
