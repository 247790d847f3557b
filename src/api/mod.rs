//! REST API access
//!
//! `client` holds transport and error handling, `pagination` normalizes list
//! responses, and `endpoints` adds one typed method per backend route.

pub mod client;
pub mod endpoints;
pub mod pagination;

pub use client::{ApiClient, Download, ACCESS_TOKEN_ENV};
pub use pagination::{collect_pages, ListResponse, Page};
