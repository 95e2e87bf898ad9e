//! Master configuration and reload flags
//!
//! Adds finished descriptors to ERDDAP's `datasets.xml` and raises the
//! per-dataset flag file that makes ERDDAP reload a dataset.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::descriptor::constants::{attrs, elements};
use crate::descriptor::element::{Element, XmlNode};
use crate::descriptor::errors::{ErddapError, ErddapResult};
use crate::descriptor::reader::{self, XmlDocument};
use crate::descriptor::writer;

/// File name the registry insists on
pub const DATASETS_XML: &str = "datasets.xml";

/// Flag directory under the big parent directory
pub const FLAG_DIR: &str = "flag";

/// How a fragment ended up in the master document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Appended as the last dataset
    Appended,
    /// Replaced a dataset with the same ID at its old position
    Replaced,
}

/// Put `fragment` into the master document
pub fn merge_fragment(document: &mut XmlDocument, fragment: Element) -> MergeOutcome {
    if document.root.name != elements::ERDDAP_DATASETS {
        warn!("Master document root is <{}>, expected <{}>", document.root.name, elements::ERDDAP_DATASETS);
    }

    let existing = fragment.attribute(attrs::DATASET_ID).and_then(|id| {
        document.root.element_position(|e| {
            e.name == elements::DATASET && e.attribute(attrs::DATASET_ID) == Some(id)
        })
    });

    match existing {
        Some(index) => {
            document.root.replace_child_at(index, fragment);
            MergeOutcome::Replaced
        }
        None => {
            document.root.children.push(XmlNode::Element(fragment));
            MergeOutcome::Appended
        }
    }
}

/// Add a fragment to a `datasets.xml` file, rewriting it wholesale
pub fn add_to_datasets_xml<P: AsRef<Path>>(datasets_xml: P, fragment: &Element) -> ErddapResult<MergeOutcome> {
    let path = datasets_xml.as_ref();
    if path.file_name().and_then(|n| n.to_str()) != Some(DATASETS_XML) {
        return Err(ErddapError::InvalidPath(format!("{} is not {}", path.display(), DATASETS_XML)));
    }

    let mut document = reader::read_document(path)?;
    let outcome = merge_fragment(&mut document, fragment.clone());
    writer::write_document(path, &document)?;

    let id = fragment.attribute(attrs::DATASET_ID).unwrap_or("<unnamed>");
    match outcome {
        MergeOutcome::Appended => info!("Added dataset {} to {}", id, path.display()),
        MergeOutcome::Replaced => warn!("Replaced existing dataset {} in {}", id, path.display()),
    }
    Ok(outcome)
}

/// Touch `<bpd>/flag/<dataset_id>` so ERDDAP reloads the dataset
pub fn raise_flag<P: AsRef<Path>>(big_parent_directory: P, dataset_id: &str) -> ErddapResult<PathBuf> {
    let flag_dir = big_parent_directory.as_ref().join(FLAG_DIR);
    fs::create_dir_all(&flag_dir)?;

    let flag = flag_dir.join(dataset_id);
    OpenOptions::new().create(true).append(true).open(&flag)?;
    info!("Raised reload flag {}", flag.display());
    Ok(flag)
}
