use std::collections::HashMap;

use crate::config::dataset_config::{DatasetDetails, DatasetsDetails, VariableOverride, VariableOverrides};
use crate::descriptor::element::Element;
use crate::descriptor::reader::parse_fragment;

pub const DATASET_ID: &str = "ubcSSg3DTracerFields1hV19-05";

/// A fragment shaped like GenerateDatasetsXml output for a model grid
pub const GRID_FRAGMENT: &str = r#"
<dataset type="EDDGridFromNcFiles" datasetID="generated_id" active="true">
    <reloadEveryNMinutes>10080</reloadEveryNMinutes>
    <fileDir>/results/SalishSea/</fileDir>
    <fileNameRegex>.*</fileNameRegex>
    <!-- sourceAttributes>
        <att name="Conventions">CF-1.6</att>
    </sourceAttributes -->
    <addAttributes>
        <att name="cdm_data_type">Grid</att>
        <att name="infoUrl">???</att>
        <att name="institution">???</att>
        <att name="keywords">generated, keywords</att>
        <att name="license">[standard]</att>
        <att name="summary">generated summary</att>
        <att name="title">generated title</att>
    </addAttributes>
    <axisVariable>
        <sourceName>time_counter</sourceName>
        <destinationName>time</destinationName>
        <addAttributes>
            <att name="long_name">Time axis</att>
        </addAttributes>
    </axisVariable>
    <axisVariable>
        <sourceName>deptht</sourceName>
        <destinationName>z</destinationName>
    </axisVariable>
    <axisVariable>
        <sourceName>y</sourceName>
        <destinationName>latitude</destinationName>
        <addAttributes>
            <att name="long_name">Latitude</att>
            <att name="source_name">y</att>
            <att name="standard_name">latitude</att>
            <att name="units">degrees_north</att>
        </addAttributes>
    </axisVariable>
    <axisVariable>
        <sourceName>x</sourceName>
        <destinationName>longitude</destinationName>
        <addAttributes>
            <att name="long_name">Longitude</att>
            <att name="source_name">x</att>
            <att name="standard_name">longitude</att>
            <att name="units">degrees_east</att>
        </addAttributes>
    </axisVariable>
    <dataVariable>
        <sourceName>votemper</sourceName>
        <destinationName>votemper</destinationName>
        <dataType>float</dataType>
        <addAttributes>
            <att name="colorBarMaximum" type="double">32.0</att>
            <att name="long_name">Temperature</att>
        </addAttributes>
    </dataVariable>
    <dataVariable>
        <sourceName>vosaline</sourceName>
        <destinationName>vosaline</destinationName>
        <dataType>float</dataType>
    </dataVariable>
    <dataVariable>
        <sourceName>e3t</sourceName>
        <destinationName>e3t</destinationName>
        <dataType>float</dataType>
    </dataVariable>
</dataset>
"#;

pub fn grid_fragment() -> Element {
    parse_fragment(GRID_FRAGMENT).unwrap()
}

pub fn details_entry(dataset_type: &str, keywords: Option<&str>) -> DatasetDetails {
    DatasetDetails {
        file_name_regex: r".*SalishSea_1h_\d{8}_\d{8}_grid_T\.nc$".to_string(),
        title: "Green, Salish Sea, 3d Tracer Fields, Hourly".to_string(),
        summary: "3d salinity and water temperature field values".to_string(),
        keywords: keywords.map(str::to_string),
        dataset_type: dataset_type.to_string(),
    }
}

pub fn details_for(dataset_id: &str, dataset_type: &str) -> DatasetsDetails {
    let mut details = HashMap::new();
    details.insert(dataset_id.to_string(), details_entry(dataset_type, None));
    details
}

pub fn details_with_keywords(dataset_id: &str, keywords: &str) -> DatasetsDetails {
    let mut details = HashMap::new();
    details.insert(dataset_id.to_string(), details_entry("grid", Some(keywords)));
    details
}

pub fn overrides() -> VariableOverrides {
    let mut overrides = HashMap::new();
    overrides.insert("votemper".to_string(), VariableOverride { destination_name: "temperature".to_string() });
    overrides.insert("vosaline".to_string(), VariableOverride { destination_name: "salinity".to_string() });
    overrides
}

/// Names of the `<att>` children of an `addAttributes` element
pub fn att_names(attributes: &Element) -> Vec<String> {
    attributes
        .children_named("att")
        .filter_map(|a| a.attribute("name").map(str::to_string))
        .collect()
}

/// Text of the named `<att>` directly inside `attributes`
pub fn att_text(attributes: &Element, name: &str) -> Option<String> {
    attributes
        .child_elements()
        .find(|e| e.is_att(name))
        .and_then(Element::text)
}

pub fn axis<'a>(root: &'a Element, source: &str) -> &'a Element {
    root.children_named("axisVariable")
        .find(|a| a.child("sourceName").and_then(Element::text).as_deref() == Some(source))
        .unwrap()
}

pub fn data_variable<'a>(root: &'a Element, source: &str) -> &'a Element {
    root.children_named("dataVariable")
        .find(|a| a.child("sourceName").and_then(Element::text).as_deref() == Some(source))
        .unwrap()
}

pub fn destination(variable: &Element) -> String {
    variable.child("destinationName").and_then(Element::text).unwrap()
}
