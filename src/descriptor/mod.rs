//! Dataset descriptor module
//!
//! This module provides the XML tree used for ERDDAP dataset descriptors,
//! reading and writing it, and the patcher that finalises generated
//! fragments.

pub mod errors;
pub mod element;
pub mod reader;
pub mod writer;
pub mod patcher;
pub mod tables;
pub(crate) mod constants;
#[cfg(test)]
mod tests;

pub use errors::{ErddapError, ErddapResult};
pub use element::{Element, XmlNode};
pub use reader::{parse_document, parse_fragment, read_document, read_fragment, XmlDocument};
pub use writer::{to_document_bytes, to_fragment_string, write_document, write_fragment};
pub use patcher::{update_xml, DescriptorPatcher};
pub use tables::{colorbar_range, ioos_category, ColorBarRange};
