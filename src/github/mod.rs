//! GitHub API access.

pub mod graphql;

pub use graphql::{GraphqlClient, DEFAULT_GRAPHQL_URL};
