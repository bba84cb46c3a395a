pub mod client;
pub mod models;
pub mod store;

pub use client::GitHubClient;
pub use store::DataStore;
