#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`SbomBuilderError`)
//! - [`config`]: Converter configuration (`ConverterConfig`, builder)
//! - [`types`]: Input records and the document graph (`PackageInfo`, `SliceInfo`, `PathInfo`, `DocumentGraph`)
//! - [`manifest`]: zstd + jsonwall manifest decoding (`read_manifest`, `parse_jsonwall`)
//! - [`normalize`]: Manifest records to builder inputs (`normalize`, `process_*`)
//! - [`builder`]: File classification and graph construction (`DocumentBuilder`, `build_document`, `FileKind`)
//! - [`sbom`]: SPDX 2.3 JSON serialization (`to_spdx_json`, `write_spdx_json`)
//! - [`converter`]: End-to-end orchestrator (`Converter`)
//!
//! # Architecture
//!
//! ```text
//! manifest.wall --> read_manifest --> ManifestData
//!                                         |
//!                                     normalize
//!                                         |
//!                        (slices, packages, paths)
//!                                         |
//!                                  DocumentBuilder
//!                                         |
//!                                   DocumentGraph
//!                                         |
//!                                    to_spdx_json
//!                                         |
//!                                manifest.spdx.json
//! ```

pub mod builder;
pub mod config;
pub mod converter;
pub mod error;
pub mod manifest;
pub mod normalize;
pub mod sbom;
pub mod types;

// --- Public API Re-exports ---

// Converter (main orchestrator)
pub use converter::Converter;

// Configuration
pub use config::{ConverterConfig, ConverterConfigBuilder};

// Error
pub use error::SbomBuilderError;

// Types
pub use types::{
    Checksum, ChecksumAlgorithm, CreationInfo, Creator, DocumentGraph, FileNode, PackageInfo,
    PackageNode, PathInfo, Relationship, RelationshipType, SliceInfo,
};

// Builder
pub use builder::{DocumentBuilder, FileKind, build_document, owner_of};

// Manifest
pub use manifest::{ManifestData, read_manifest};
pub use normalize::{NormalizedManifest, normalize};

// Serialization
pub use sbom::{SpdxOptions, to_spdx_json, write_spdx_json};
