//! Core capture model: image codec, geometry validation, bbox tree, record.
//!
//! A capture flows through this module leaf to root: the screenshot is
//! decoded and normalized first, its dimensions become the [`Bounds`]
//! context, the recursive element tree is validated against that context,
//! and the assembled [`CaptureRecord`] owns the split-file persistence
//! contract.
//!
//! # Design Principles
//!
//! 1. **Context, not state**: the image bounds are threaded explicitly
//!    through every recursive validation call, never held globally.
//!
//! 2. **Permissive wire types**: raw payload types ([`RawBBoxNode`]) admit
//!    invalid data so that validation can report precisely what is wrong
//!    instead of failing opaquely during deserialization.
//!
//! 3. **Validate once**: invariants are established at construction and not
//!    re-checked; validated types expose read-only accessors.

mod geometry;
mod image;
mod record;
mod tree;

// Re-export core types for convenient access
pub use geometry::{validate_bbox, Axis, BBox, Bounds, GeometryError};
pub use image::{CaptureImage, DecodeError};
pub use record::{CaptureMetadata, CaptureRecord};
pub use tree::{BBoxNode, RawBBoxNode, TagError, TreeError, MAX_DEPTH};
