//! Integration tests for the repository, service and HTTP layers.

mod api_test;
mod helpers;
mod repository_test;
