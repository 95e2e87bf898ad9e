//! ERDDAP descriptor constants
//!
//! Element and attribute names used by `datasets.xml` and the fragments
//! `GenerateDatasetsXml.sh` produces.

/// Text ERDDAP treats as "remove this attribute"
pub const NULL_TEXT: &str = "null";

/// Element names
pub mod elements {
    /// Root of a single dataset descriptor
    pub const DATASET: &str = "dataset";

    /// Root of the master configuration file
    pub const ERDDAP_DATASETS: &str = "erddapDatasets";

    pub const ADD_ATTRIBUTES: &str = "addAttributes";
    pub const AXIS_VARIABLE: &str = "axisVariable";
    pub const DATA_VARIABLE: &str = "dataVariable";
    pub const SOURCE_NAME: &str = "sourceName";
    pub const DESTINATION_NAME: &str = "destinationName";
    pub const FILE_NAME_REGEX: &str = "fileNameRegex";
}

/// Attribute names, on elements (`datasetID`) or as `<att name=...>`
pub mod attrs {
    pub const DATASET_ID: &str = "datasetID";
    pub const COVERAGE_CONTENT_TYPE: &str = "coverage_content_type";
    pub const IOOS_CATEGORY: &str = "ioos_category";
    pub const COLOR_BAR_MINIMUM: &str = "colorBarMinimum";
    pub const COLOR_BAR_MAXIMUM: &str = "colorBarMaximum";
}
