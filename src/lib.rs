//! # Plaints - complaint intake for a college campus
//!
//! Students and staff file complaints against a small taxonomy of categories,
//! subcategories, and departments. Every complaint gets a priority derived
//! from its category and subcategory and a tracking ID to follow it up.
//!
//! ## Features
//!
//! - **Taxonomy lookups**: options come from the store, with built-in tables
//!   as a fallback when the store cannot be read
//! - **Validated intake**: required fields, attachment type and size, and a
//!   server-derived priority that the client cannot override
//! - **Flat-file storage**: complaints stored as markdown files with YAML
//!   frontmatter in a `.plaints/` directory
//! - **HTTP API** and **CLI** over the same intake path
//!
//! ## Quick Start
//!
//! ```bash
//! # Initialize a store with the built-in taxonomy
//! plaints init
//!
//! # File a complaint
//! plaints submit --email s@x.com --department "Computer Science" \
//!     --category hostel --sub-category electricity \
//!     --description "No power in block C"
//!
//! # Serve the HTTP API
//! plaints serve --port 5000
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions and handlers
//! - [`config`]: Configuration loading and management
//! - [`error`]: Error types and result aliases
//! - [`intake`]: Submission validation and persistence
//! - [`model`]: Data models (Complaint, TaxonomyOption, Priority, etc.)
//! - [`server`]: HTTP routes
//! - [`storage`]: File-based storage and markdown parsing
//! - [`taxonomy`]: Option lookups and priority derivation
//! - [`validation`]: Input validation utilities

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles `plaints.toml` configuration files and project discovery.
pub mod config;

/// Error types and result aliases.
///
/// Defines `PlaintsError` enum and `Result<T>` type alias.
pub mod error;

/// Complaint intake: validation, priority override, and persistence.
pub mod intake;

pub mod logging;

/// Data models for complaints and taxonomy options.
pub mod model;

/// HTTP interface built on axum.
pub mod server;

/// File-based storage layer.
///
/// Handles reading/writing complaints as markdown files with YAML frontmatter.
pub mod storage;

/// Taxonomy resolver with built-in fallback tables.
pub mod taxonomy;

/// Input validation utilities.
pub mod validation;
