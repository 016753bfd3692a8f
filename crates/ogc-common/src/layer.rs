//! WMS layer records.

use serde::{Deserialize, Serialize};

use crate::{Style, WmsServiceInfo};

/// A WMS layer that survived the EPSG:3857 filter.
///
/// Every layer in the output set has a `Name` and an `EPSG:3857` CRS
/// declaration on itself or an ancestor layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none", default)]
    pub abstract_: Option<String>,
    pub styles: Vec<Style>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub online_resource: Option<String>,
}

/// Result of the WMS extraction pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WmsCapabilities {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub service: Option<WmsServiceInfo>,
    pub layers: Vec<Layer>,
}
