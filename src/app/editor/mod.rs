//! Vim-like editor functionality
//!
//! This module provides the text side of vim-style text objects:
//! - Delimiter pairs and their trigger characters
//! - Document snapshots with offset/position conversion
//! - Text object resolution (`i(`, `a"`, counts, nearest pair)
//! - Cursor motions and batched text operations

pub mod document;
pub mod motions;
pub mod operations;
pub mod pairs;
pub mod text_objects;

pub use document::{Document, Position, Range, Span};
pub use operations::{BatchError, TextEdit};
pub use pairs::DelimiterPair;
pub use text_objects::{ResolveError, Resolver, ResolverOptions, Scope, TextObjectRange};
