//! Shared test fixtures for daycare-match crates.
//!
//! This crate provides input builders and small matching scenarios. It
//! depends only on `daycare-match-core` so every other crate can use it as
//! a dev-dependency.
//!
//! - [`input`] - a builder for [`MatchingInput`](daycare_match_core::MatchingInput)
//! - [`scenarios`] - named scenarios with known optimal outcomes
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! daycare-match-test = { workspace = true }
//! ```
//!
//! ```
//! use daycare_match_test::scenarios;
//!
//! let ctx = scenarios::derive(&scenarios::pooling());
//! assert_eq!(ctx.children().len(), 2);
//! ```

pub mod input;
pub mod scenarios;

pub use input::InputBuilder;
