//! The top-level capture record: ingest, split persistence, and reload.
//!
//! A [`CaptureRecord`] is built once from an upload payload and is immutable
//! afterwards. Construction order is a correctness property: the image is
//! decoded first because its dimensions are the validation context for the
//! bbox tree. Persistence splits the record into two sibling files sharing a
//! base name, `{name}.json` (metadata) and `{name}.png` (screenshot), and
//! the pair round-trips losslessly through [`CaptureRecord::load`].

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};
use url::Url;

use super::geometry::Bounds;
use super::image::CaptureImage;
use super::tree::{BBoxNode, RawBBoxNode};
use crate::error::CaptureError;

/// The wire shape of an upload payload, prior to any validation.
#[derive(Debug, Deserialize)]
struct RawCapture {
    url: String,
    timestamp: String,
    image: String,
    bbox_tree: RawBBoxNode,
}

/// The persisted-metadata projection of a record.
///
/// This is everything except the raw image payload, which is written as a
/// sibling PNG file instead, plus the derived `image_size` so the metadata
/// file is self-describing about the bounds its tree was validated against.
#[derive(Serialize)]
pub struct CaptureMetadata<'a> {
    pub url: &'a Url,
    pub timestamp: &'a DateTime<FixedOffset>,
    pub bbox_tree: &'a BBoxNode,
    pub image_size: Bounds,
}

/// The stored metadata file as read back from disk.
#[derive(Deserialize)]
struct StoredMetadata {
    url: Url,
    timestamp: DateTime<FixedOffset>,
    bbox_tree: RawBBoxNode,
    image_size: Bounds,
}

/// One validated web UI capture: a screenshot plus its element tree.
#[derive(Clone, Debug)]
pub struct CaptureRecord {
    url: Url,
    timestamp: DateTime<FixedOffset>,
    bbox_tree: BBoxNode,
    image: CaptureImage,
}

impl CaptureRecord {
    /// Validates an upload payload into a capture record.
    ///
    /// Validation order: the wire JSON is parsed, the embedded image is
    /// decoded (establishing the bounds context), the url and timestamp are
    /// checked, and finally the bbox tree is validated against the bounds.
    /// The first failure wins; a record is assembled only if every step
    /// succeeds.
    ///
    /// # Errors
    /// Any of the validation error variants of [`CaptureError`].
    pub fn from_upload(raw: &[u8]) -> Result<Self, CaptureError> {
        let payload: RawCapture = serde_json::from_slice(raw).map_err(CaptureError::Payload)?;

        // Image first: its dimensions are required context for the tree.
        let image = CaptureImage::from_base64(&payload.image)?;
        let bounds = image.size();

        let url = Url::parse(&payload.url)?;
        let timestamp =
            parse_timestamp(&payload.timestamp).map_err(|source| CaptureError::Timestamp {
                value: payload.timestamp.clone(),
                source,
            })?;

        let bbox_tree = BBoxNode::build(payload.bbox_tree, bounds)?;

        Ok(Self {
            url,
            timestamp,
            bbox_tree,
            image,
        })
    }

    /// Writes the record to `directory` as a `{name}.json` / `{name}.png`
    /// pair, creating the directory (and parents) if missing.
    ///
    /// The metadata file is written before the image file; callers may treat
    /// its presence as a completion signal for lightweight polling. A failure
    /// in between leaves a metadata file without its image, which readers
    /// must treat as an incomplete record. Concurrent callers must target
    /// distinct `(directory, name)` pairs; this function neither generates
    /// names nor remembers any sequence state.
    ///
    /// Returns `(metadata_path, image_path)` on success.
    pub fn persist(
        &self,
        directory: &Path,
        name: &str,
    ) -> Result<(PathBuf, PathBuf), CaptureError> {
        fs::create_dir_all(directory)?;
        let metadata_path = directory.join(format!("{name}.json"));
        let image_path = directory.join(format!("{name}.png"));

        let file = File::create(&metadata_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.metadata()).map_err(|source| {
            CaptureError::MetadataWrite {
                path: metadata_path.clone(),
                source,
            }
        })?;

        self.image
            .save(&image_path)
            .map_err(|source| CaptureError::ImageWrite {
                path: image_path.clone(),
                source,
            })?;

        Ok((metadata_path, image_path))
    }

    /// Reloads a persisted `{name}.json` / `{name}.png` pair, re-running
    /// tree validation against the reloaded image's dimensions.
    ///
    /// The stored `image_size` must match the actual dimensions of the
    /// sibling PNG; a mismatch means the pair is not a consistent record.
    pub fn load(directory: &Path, name: &str) -> Result<Self, CaptureError> {
        let metadata_path = directory.join(format!("{name}.json"));
        let image_path = directory.join(format!("{name}.png"));

        let file = File::open(&metadata_path)?;
        let stored: StoredMetadata =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                CaptureError::MetadataParse {
                    path: metadata_path,
                    source,
                }
            })?;

        let bytes = fs::read(&image_path)?;
        let image =
            CaptureImage::from_bytes(&bytes).map_err(|source| CaptureError::ImageRead {
                path: image_path,
                source,
            })?;

        let bounds = image.size();
        if stored.image_size != bounds {
            return Err(CaptureError::ImageSizeMismatch {
                stored: stored.image_size,
                actual: bounds,
            });
        }
        let bbox_tree = BBoxNode::build(stored.bbox_tree, bounds)?;

        Ok(Self {
            url: stored.url,
            timestamp: stored.timestamp,
            bbox_tree,
            image,
        })
    }

    /// Returns the metadata projection that `persist` serializes.
    pub fn metadata(&self) -> CaptureMetadata<'_> {
        CaptureMetadata {
            url: &self.url,
            timestamp: &self.timestamp,
            bbox_tree: &self.bbox_tree,
            image_size: self.image.size(),
        }
    }

    /// Returns the capture's source page URL.
    #[inline]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the capture's timestamp.
    #[inline]
    pub fn timestamp(&self) -> &DateTime<FixedOffset> {
        &self.timestamp
    }

    /// Returns the validated element tree.
    #[inline]
    pub fn bbox_tree(&self) -> &BBoxNode {
        &self.bbox_tree
    }

    /// Returns the decoded screenshot.
    #[inline]
    pub fn image(&self) -> &CaptureImage {
        &self.image
    }

    /// Returns the screenshot dimensions.
    #[inline]
    pub fn image_size(&self) -> Bounds {
        self.image.size()
    }
}

/// Parses an ISO-8601 date-time, with or without a UTC offset.
///
/// Extensions commonly send naive timestamps like `2024-01-01T00:00:00`;
/// those are interpreted as UTC. Offsets present in the input are kept.
fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).or_else(|err| {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc().fixed_offset())
            .map_err(|_| err)
    })
}
