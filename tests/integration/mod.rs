//! Integration tests for repository binary detection

mod cli_parse;
mod graphql_client;
mod scan_end_to_end;
mod support;
