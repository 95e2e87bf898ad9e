//! Dataset descriptor patcher
//!
//! Finalises a fragment produced by `GenerateDatasetsXml.sh`: fills in the
//! dataset details and institution metadata, fixes the axis naming the
//! generator gets wrong for model grids, and enriches variables with
//! colorbar ranges and IOOS categories.
//!
//! The steps run in a fixed order because later ones look at names the
//! earlier ones rewrite. After an error the tree is left half-patched and
//! must be discarded.

use log::{debug, info};

use crate::config::dataset_config::{DatasetDetails, DatasetsDetails, VariableOverrides};
use crate::config::metadata::{MetadataEntry, MetadataTable};
use crate::descriptor::constants::{attrs, elements, NULL_TEXT};
use crate::descriptor::element::Element;
use crate::descriptor::errors::{ErddapError, ErddapResult};
use crate::descriptor::tables;

/// Comment attached to the time axis
pub const TIME_AXIS_COMMENT: &str = "time values are UTC at the centre of the intervals over which the calculated model results are averaged";

/// Value of `coverage_content_type` for every variable
pub const MODEL_RESULT: &str = "modelResult";

/// Dataset IDs containing this never get `history`/`name` placeholders
const BATHYMETRY_MARKER: &str = "Bathymetry";

/// Placeholder attributes blanked on every data variable
const DATA_VARIABLE_PLACEHOLDERS: [&str; 5] = [
    "cell_measures",
    "cell_methods",
    "interval_operation",
    "interval_write",
    "online_operation",
];

/// Attributes the generator wrongly derives for grid-index axes
const GRID_INDEX_STALE_ATTRIBUTES: [&str; 3] = ["source_name", "standard_name", "units"];

/// Tide gauge axis replacements: source name to new destination name
const TIDE_GAUGE_AXES: [(&str, &str); 2] = [("nav_lon", "longitude"), ("nav_lat", "latitude")];

/// Applies dataset details and metadata to a generated descriptor
pub struct DescriptorPatcher<'a> {
    /// Metadata applied to the root attributes
    metadata: &'a MetadataTable,
    /// Details for every known dataset
    details: &'a DatasetsDetails,
    /// Data variable destination name overrides
    variables: &'a VariableOverrides,
}

impl<'a> DescriptorPatcher<'a> {
    pub fn new(
        metadata: &'a MetadataTable,
        details: &'a DatasetsDetails,
        variables: &'a VariableOverrides,
    ) -> Self {
        DescriptorPatcher { metadata, details, variables }
    }

    /// Patch `root` in place for the dataset `dataset_id`
    ///
    /// Fails with [`ErddapError::UnknownDataset`] before touching the tree
    /// if the ID has no details, and with [`ErddapError::TemplateShape`]
    /// when an element or attribute the patch must edit is missing.
    pub fn patch(&self, root: &mut Element, dataset_id: &str) -> ErddapResult<()> {
        let details = self
            .details
            .get(dataset_id)
            .ok_or_else(|| ErddapError::UnknownDataset(dataset_id.to_string()))?;

        info!("Patching dataset descriptor for {}", dataset_id);

        apply_details(root, dataset_id, details)?;
        apply_metadata(root, self.metadata)?;
        add_global_placeholders(root, dataset_id);
        fix_grid_index_axes(root)?;
        annotate_axes(root);
        if details.is_tide_gauge() {
            replace_tide_gauge_axes(root);
        }
        annotate_data_variables(root, self.variables);

        debug!("Finished patching {}", dataset_id);
        Ok(())
    }
}

/// Convenience wrapper around [`DescriptorPatcher::patch`]
pub fn update_xml(
    root: &mut Element,
    dataset_id: &str,
    metadata: &MetadataTable,
    details: &DatasetsDetails,
    variables: &VariableOverrides,
) -> ErddapResult<()> {
    DescriptorPatcher::new(metadata, details, variables).patch(root, dataset_id)
}

/// First `<att>` with the given name anywhere below `root`
fn find_att<'e>(root: &'e mut Element, name: &str) -> ErddapResult<&'e mut Element> {
    root.find_att_mut(name)
        .ok_or_else(|| ErddapError::TemplateShape(format!("{} attribute element", name)))
}

fn apply_details(root: &mut Element, dataset_id: &str, details: &DatasetDetails) -> ErddapResult<()> {
    root.set_attribute(attrs::DATASET_ID, dataset_id);

    root.find_mut(|e| e.name == elements::FILE_NAME_REGEX)
        .ok_or_else(|| ErddapError::TemplateShape(format!("{} element", elements::FILE_NAME_REGEX)))?
        .set_text(&details.file_name_regex);

    if let Some(keywords) = &details.keywords {
        find_att(root, "keywords")?.set_text(keywords);
    }

    let summary = format!("{}\n\n{}", details.title, details.summary);
    find_att(root, "summary")?.set_text(&summary);
    find_att(root, "title")?.set_text(&details.title);
    Ok(())
}

/// Apply a metadata table to the dataset attributes
///
/// Running it again over its own output leaves the tree unchanged.
pub fn apply_metadata(root: &mut Element, metadata: &MetadataTable) -> ErddapResult<()> {
    for entry in metadata {
        match &entry.after {
            Some(after) => insert_metadata_after(root, entry, after)?,
            None => {
                find_att(root, &entry.name)?.set_text(&entry.text);
            }
        }
    }
    Ok(())
}

fn insert_metadata_after(root: &mut Element, entry: &MetadataEntry, after: &str) -> ErddapResult<()> {
    let node = Element::att(&entry.name, &entry.text);
    root.insert_after_first(|e| e.is_att(after), |e| e.is_att(&entry.name), node)
        .map_err(|_| ErddapError::TemplateShape(format!("{} attribute element (needed by {})", after, entry.name)))?;
    debug!("Inserted {} after {}", entry.name, after);
    Ok(())
}

fn add_global_placeholders(root: &mut Element, dataset_id: &str) {
    let attributes = root.child_or_insert(elements::ADD_ATTRIBUTES);
    attributes.push_child(Element::att("NCO", NULL_TEXT));
    if !dataset_id.contains(BATHYMETRY_MARKER) {
        attributes.push_child(Element::att("history", NULL_TEXT));
        attributes.push_child(Element::att("name", NULL_TEXT));
    }
}

/// Text of a direct child element, e.g. `sourceName`
fn child_text(element: &Element, name: &str) -> Option<String> {
    element.child(name).and_then(Element::text)
}

fn set_destination_name(variable: &mut Element, name: &str) {
    variable.child_or_insert(elements::DESTINATION_NAME).set_text(name);
}

fn grid_name(axis_letter: &str) -> String {
    format!("grid{}", axis_letter.to_uppercase())
}

/// Paths to every `tag` element below `root`
///
/// Variables of child datasets in aggregating datasets are included.
fn variable_paths(root: &Element, tag: &str) -> Vec<Vec<usize>> {
    root.paths_to_all(&|e: &Element| e.name == tag)
}

/// Axes sourced from `x`/`y` are grid indices, not longitude/latitude
fn fix_grid_index_axes(root: &mut Element) -> ErddapResult<()> {
    for path in variable_paths(root, elements::AXIS_VARIABLE) {
        let axis = match root.at_path_mut(&path) {
            Some(axis) => axis,
            None => continue,
        };
        let source = match child_text(axis, elements::SOURCE_NAME) {
            Some(s) if s == "x" || s == "y" => s,
            _ => continue,
        };

        set_destination_name(axis, &grid_name(&source));

        let attributes = axis.child_mut(elements::ADD_ATTRIBUTES).ok_or_else(|| {
            ErddapError::TemplateShape(format!("{} element of axis {}", elements::ADD_ATTRIBUTES, source))
        })?;
        find_att(attributes, "long_name")?.set_text(&source.to_uppercase());
        for name in GRID_INDEX_STALE_ATTRIBUTES {
            if attributes.remove_children_where(|e| e.is_att(name)) == 0 {
                return Err(ErddapError::TemplateShape(format!("{} attribute element", name)));
            }
        }
        debug!("Axis {} marked as grid index {}", source, grid_name(&source));
    }
    Ok(())
}

fn annotate_axes(root: &mut Element) {
    for path in variable_paths(root, elements::AXIS_VARIABLE) {
        let axis = match root.at_path_mut(&path) {
            Some(axis) => axis,
            None => continue,
        };
        let mut destination = child_text(axis, elements::DESTINATION_NAME).unwrap_or_default();

        let attributes = axis.child_or_insert(elements::ADD_ATTRIBUTES);
        attributes.push_child(Element::att(attrs::COVERAGE_CONTENT_TYPE, MODEL_RESULT));

        if destination == "time" {
            attributes.push_child(Element::att("comment", TIME_AXIS_COMMENT));
        }

        if matches!(destination.as_str(), "x" | "y" | "z") {
            destination = grid_name(&destination);
            set_destination_name(axis, &destination);
        }

        if let Some(category) = tables::ioos_category(&destination) {
            axis.child_or_insert(elements::ADD_ATTRIBUTES)
                .push_child(Element::att(attrs::IOOS_CATEGORY, category));
        }
    }
}

/// Swap the model grid coordinate axes for plain longitude/latitude axes
fn replace_tide_gauge_axes(root: &mut Element) {
    for path in variable_paths(root, elements::AXIS_VARIABLE) {
        let replacement = root
            .at_path(&path)
            .and_then(|axis| child_text(axis, elements::SOURCE_NAME))
            .and_then(|source| {
                TIDE_GAUGE_AXES
                    .iter()
                    .find(|(from, _)| *from == source)
                    .map(|(from, to)| {
                        Element::new(elements::AXIS_VARIABLE)
                            .with_child(Element::new(elements::SOURCE_NAME).with_text(from))
                            .with_child(Element::new(elements::DESTINATION_NAME).with_text(to))
                    })
            });

        if let Some(axis) = replacement {
            debug!("Replacing tide gauge axis at {:?}", path);
            root.replace_at_path(&path, axis);
        }
    }
}

fn annotate_data_variables(root: &mut Element, overrides: &VariableOverrides) {
    for path in variable_paths(root, elements::DATA_VARIABLE) {
        let variable = match root.at_path_mut(&path) {
            Some(variable) => variable,
            None => continue,
        };
        let mut name = child_text(variable, elements::DESTINATION_NAME).unwrap_or_default();

        if let Some(o) = overrides.get(&name) {
            debug!("Renaming data variable {} to {}", name, o.destination_name);
            name = o.destination_name.clone();
            set_destination_name(variable, &name);
        }

        let attributes = variable.child_or_insert(elements::ADD_ATTRIBUTES);

        if let Some(range) = tables::colorbar_range(&name) {
            set_colorbar_bound(attributes, attrs::COLOR_BAR_MINIMUM, &range.minimum);
            set_colorbar_bound(attributes, attrs::COLOR_BAR_MAXIMUM, &range.maximum);
        }

        attributes.push_child(Element::att(attrs::COVERAGE_CONTENT_TYPE, MODEL_RESULT));
        for placeholder in DATA_VARIABLE_PLACEHOLDERS {
            attributes.push_child(Element::att(placeholder, NULL_TEXT));
        }

        if let Some(category) = tables::ioos_category(&name) {
            attributes.push_child(Element::att(attrs::IOOS_CATEGORY, category));
        }
    }
}

/// Update a colorbar bound in place, or append it typed as double
fn set_colorbar_bound(attributes: &mut Element, name: &str, value: &str) {
    let existing = attributes
        .element_position(|e| e.is_att(name))
        .and_then(|i| attributes.children[i].as_element_mut());
    match existing {
        Some(att) => att.set_text(value),
        None => attributes.push_child(Element::att(name, value).with_attribute("type", "double")),
    }
}
