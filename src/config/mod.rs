//! Configuration module for autoru-dump
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. All sections are optional; the defaults match the reference
//! deployment, so the scraper also runs with no file at all.
//!
//! # Example
//!
//! ```no_run
//! use autoru_dump::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Scraping up to {} pages", config.site.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetchConfig, OutputConfig, ProxyConfig, SelectorConfig, SiteConfig};

// Re-export parser functions
pub use parser::{default_config, load_config};
