//! GitHub API adapter

mod client;
mod graphql;
mod link;

pub use client::GitHubClientImpl;
