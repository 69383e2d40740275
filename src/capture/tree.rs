//! The recursive bounding-box tree describing captured UI elements.
//!
//! The wire payload carries an unvalidated tree ([`RawBBoxNode`]); building a
//! [`BBoxNode`] from it checks every node against the same image [`Bounds`],
//! threading that context through each level of recursion. Validation is
//! fail-fast: the first invalid node anywhere in the tree rejects the whole
//! capture.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

use super::geometry::{validate_bbox, BBox, Bounds, GeometryError};

/// Maximum nesting depth accepted for a bbox tree.
///
/// The payload comes from untrusted network callers; this bound keeps a
/// pathologically deep (or maliciously crafted) tree from exhausting the
/// stack during recursive validation. Real DOM trees stay far below it.
pub const MAX_DEPTH: usize = 128;

/// A tag that failed validation.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum TagError {
    #[error("tag must be a non-empty string")]
    Empty,
}

/// A bbox tree that failed validation.
///
/// Geometry and arity errors carry the offending node's tag so a failure
/// deep in the tree can be located from the message alone.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TreeError {
    #[error("invalid tag: {0}")]
    Tag(#[from] TagError),

    #[error("bbox for tag '{tag}' must contain exactly four elements (x1, y1, x2, y2), got {len}")]
    BBoxArity { tag: String, len: usize },

    #[error("invalid bbox for tag '{tag}': {source}")]
    Geometry {
        tag: String,
        #[source]
        source: GeometryError,
    },

    #[error("bbox tree exceeds the maximum nesting depth of {max}")]
    TooDeep { max: usize },
}

/// An unvalidated bbox tree node, as deserialized from the wire payload.
///
/// Fields are permissive on purpose: the tag may be absent, the bbox may
/// have the wrong arity, and coordinates may be negative. [`BBoxNode::build`]
/// turns this into a validated tree or reports precisely what is wrong.
#[derive(Clone, Debug, Deserialize)]
pub struct RawBBoxNode {
    #[serde(default)]
    pub tag: Option<String>,

    pub bbox: Vec<i64>,

    #[serde(default)]
    pub children: Vec<RawBBoxNode>,

    #[serde(default)]
    pub meta: BTreeMap<String, Value>,
}

/// A validated node of the capture's element tree.
///
/// Invariants (non-empty tag, ordered non-negative in-bounds bbox) are
/// established by [`BBoxNode::build`] and never re-checked; fields are
/// therefore read-only after construction.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BBoxNode {
    tag: String,
    bbox: BBox,
    children: Vec<BBoxNode>,
    meta: BTreeMap<String, Value>,
}

impl BBoxNode {
    /// Validates a raw tree against the image bounds, recursively.
    ///
    /// Every node is checked against the same `bounds` value, in document
    /// order: a node's own tag and bbox first, then its children. The first
    /// error encountered is returned; sibling errors are not aggregated.
    ///
    /// The `meta` mapping is opaque to validation and copied through
    /// unmodified.
    pub fn build(raw: RawBBoxNode, bounds: Bounds) -> Result<Self, TreeError> {
        Self::build_at(raw, bounds, 0)
    }

    fn build_at(raw: RawBBoxNode, bounds: Bounds, depth: usize) -> Result<Self, TreeError> {
        if depth >= MAX_DEPTH {
            return Err(TreeError::TooDeep { max: MAX_DEPTH });
        }

        let tag = validate_tag(raw.tag)?;

        let bbox = match raw.bbox.as_slice() {
            &[x1, y1, x2, y2] => BBox::new(x1, y1, x2, y2),
            other => {
                return Err(TreeError::BBoxArity {
                    tag,
                    len: other.len(),
                });
            }
        };
        validate_bbox(&bbox, bounds).map_err(|source| TreeError::Geometry {
            tag: tag.clone(),
            source,
        })?;

        let mut children = Vec::with_capacity(raw.children.len());
        for child in raw.children {
            children.push(Self::build_at(child, bounds, depth + 1)?);
        }

        Ok(Self {
            tag,
            bbox,
            children,
            meta: raw.meta,
        })
    }

    /// Returns the element's tag name.
    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the element's bounding box.
    #[inline]
    pub fn bbox(&self) -> &BBox {
        &self.bbox
    }

    /// Returns the element's nested children, in document order.
    #[inline]
    pub fn children(&self) -> &[BBoxNode] {
        &self.children
    }

    /// Returns the element's opaque metadata.
    #[inline]
    pub fn meta(&self) -> &BTreeMap<String, Value> {
        &self.meta
    }

    /// Returns the number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(BBoxNode::node_count)
            .sum::<usize>()
    }
}

/// Rejects absent, empty, and whitespace-only tags.
fn validate_tag(tag: Option<String>) -> Result<String, TagError> {
    match tag {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(TagError::Empty),
    }
}
