//! Scratch-file lifecycle and image processing for the mirroring pipeline.
//!
//! Owns the scratch directory where in-flight media and avatar downloads
//! land, generates collision-resistant filenames, and turns profile photos
//! into small data-URI thumbnails. Scratch files are RAII-guarded: they are
//! removed on every exit path, so a delivery attempt can never leak its
//! temporary media.

pub mod error;
pub mod filename;
pub mod image_ops;
pub mod mime;
pub mod scratch;

pub use {
    error::{Error, Result},
    scratch::{ScratchDir, TempFile},
};
