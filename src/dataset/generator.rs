//! GenerateDatasetsXml runner
//!
//! Runs ERDDAP's `GenerateDatasetsXml.sh` non-interactively and loads the
//! descriptor fragment it leaves in `<bigParentDirectory>/logs`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info};

use crate::descriptor::element::Element;
use crate::descriptor::errors::{ErddapError, ErddapResult};
use crate::descriptor::reader;

/// File name the runner insists on
pub const GENERATOR_SCRIPT: &str = "GenerateDatasetsXml.sh";

/// Where the generator writes its result, relative to the big parent directory
pub const GENERATOR_OUTPUT: &str = "logs/GenerateDatasetsXml.out";

/// Dataset type used when none is given
pub const DEFAULT_DATASET_TYPE: &str = "EDDTableFromNcCFFiles";

/// Generator questions between the file name regex and infoUrl that we
/// answer with the generator's own default
const BLANK_PARAMETERS: usize = 7;

/// Answers passed to the generator, in the order it asks for them
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorRequest {
    pub dataset_type: String,
    pub data_dir: String,
    pub file_name_regex: String,
    pub info_url: String,
    pub institution: String,
    pub summary: String,
    pub title: String,
}

impl GeneratorRequest {
    /// Request with the generator-side defaults for the descriptive fields
    pub fn new(data_dir: &str, file_name_regex: &str) -> Self {
        GeneratorRequest {
            dataset_type: DEFAULT_DATASET_TYPE.to_string(),
            data_dir: data_dir.to_string(),
            file_name_regex: file_name_regex.to_string(),
            info_url: "http://example.com".to_string(),
            institution: "Some Organization".to_string(),
            summary: "This is some data".to_string(),
            title: "NETCDF File".to_string(),
        }
    }

    /// Command line arguments for the generator script
    pub fn arguments(&self) -> Vec<String> {
        let mut args = vec![
            self.dataset_type.clone(),
            self.data_dir.clone(),
            self.file_name_regex.clone(),
        ];
        args.extend(std::iter::repeat(String::new()).take(BLANK_PARAMETERS));
        args.push(self.info_url.clone());
        args.push(self.institution.clone());
        args.push(self.summary.clone());
        args.push(self.title.clone());
        args
    }
}

/// Runs the generator script for one ERDDAP installation
pub struct GeneratorRunner {
    /// Absolute path to GenerateDatasetsXml.sh
    script: PathBuf,
    /// ERDDAP big parent directory
    big_parent_directory: PathBuf,
}

impl GeneratorRunner {
    /// Create a runner, checking both paths up front
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(script: P, big_parent_directory: Q) -> ErddapResult<Self> {
        let script = script.as_ref();
        if script.file_name().and_then(|n| n.to_str()) != Some(GENERATOR_SCRIPT) {
            return Err(ErddapError::InvalidPath(format!(
                "{} is not {}", script.display(), GENERATOR_SCRIPT
            )));
        }
        let script = fs::canonicalize(script).map_err(|e| {
            ErddapError::InvalidPath(format!("{}: {}", script.display(), e))
        })?;

        let bpd = big_parent_directory.as_ref();
        let big_parent_directory = fs::canonicalize(bpd).map_err(|e| {
            ErddapError::InvalidPath(format!("{}: {}", bpd.display(), e))
        })?;

        Ok(GeneratorRunner { script, big_parent_directory })
    }

    pub fn big_parent_directory(&self) -> &Path {
        &self.big_parent_directory
    }

    /// Path of the generator's output fragment
    pub fn output_path(&self) -> PathBuf {
        self.big_parent_directory.join(GENERATOR_OUTPUT)
    }

    /// Run the generator and parse the fragment it produced
    pub fn run(&self, request: &GeneratorRequest) -> ErddapResult<Element> {
        let working_dir = self.script.parent().unwrap_or_else(|| Path::new("."));
        let args = request.arguments();
        debug!("Running /bin/bash {} {:?} in {}", self.script.display(), args, working_dir.display());

        let output = Command::new("/bin/bash")
            .arg(&self.script)
            .args(&args)
            .current_dir(working_dir)
            .output()
            .map_err(|e| ErddapError::GenericError(format!(
                "failed to execute program '{}': {}", self.script.display(), e
            )))?;

        if !output.status.success() {
            return Err(ErddapError::GeneratorFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let outlog = self.output_path();
        info!("Dataset template successfully generated. See: {}", outlog.display());
        reader::read_fragment(&outlog)
    }
}
