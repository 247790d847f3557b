//! vatu-tracker - terminal client for a personal-finance REST backend
//!
//! The backend owns transactions, categories, envelopes, savings goals,
//! recurring templates and reports. This crate wraps its REST API with typed
//! models, adds client-side budgeting helpers (funding plans, goal pace, due
//! buckets), validates input before sending it, and caches reads locally.
//!
//! # Architecture
//!
//! - `config`: paths and user settings
//! - `error`: the crate error type and field-level form errors
//! - `models`: wire types for every backend resource
//! - `api`: HTTP transport, pagination and one method per endpoint
//! - `cache`: the on-disk query cache and its invalidation rules
//! - `budget`: pure envelope, funding, savings and schedule calculations
//! - `forms`: string input to validated payloads
//! - `services`: cached, invalidating operations over the API
//! - `display`: table and detail rendering
//! - `export`: saving server exports and local envelope snapshots
//! - `cli`: clap subcommands and their handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use vatu_tracker::config::{Settings, TrackerPaths};
//! use vatu_tracker::services::EnvelopeService;
//! use vatu_tracker::session::Session;
//!
//! let paths = TrackerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let session = Session::open(&paths, settings, std::env::var("VATU_ACCESS_TOKEN").ok())?;
//! for envelope in EnvelopeService::new(&session).list()? {
//!     println!("{}", envelope);
//! }
//! session.finish()?;
//! ```

pub mod api;
pub mod budget;
pub mod cache;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod file_io;
pub mod forms;
pub mod models;
pub mod services;
pub mod session;

pub use error::{TrackerError, TrackerResult};
