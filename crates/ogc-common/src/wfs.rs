//! WFS capabilities model.
//!
//! These records are the stable export surface: the serde wire names match
//! the JSON schema consumed downstream, so renames here are breaking
//! changes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ParsedError, Wgs84BoundingBox};

/// Aggregate root produced by the WFS extraction pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WfsCapabilities {
    pub service: WfsServiceInfo,
    pub provider: WfsProvider,
    pub operations: Vec<WfsOperation>,
    /// Post-filter set: every entry supports a GeoJSON-family output format
    /// and an EPSG:4326-equivalent CRS.
    pub feature_types: Vec<WfsFeatureType>,
    pub endpoints: WfsEndpoints,
    /// Computed over the pre-filter feature type set.
    pub validation: WfsValidation,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub errors: Option<Vec<ParsedError>>,
}

/// Service identification across both dialects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WfsServiceInfo {
    #[serde(rename = "type")]
    pub service_type: String,
    pub title: String,
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none", default)]
    pub abstract_: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub keywords: Option<Vec<String>>,
    pub versions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fees: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub access_constraints: Option<String>,
}

/// Service provider block (`ows:ServiceProvider` or the 1.x
/// `ContactInformation` fallback).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WfsProvider {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub contact: Option<WfsProviderContact>,
}

impl WfsProvider {
    /// Placeholder used when the document carries no provider block.
    pub fn unknown() -> Self {
        Self {
            name: "Unknown Provider".to_string(),
            site: None,
            contact: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WfsProviderContact {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub individual_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub position_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,
}

/// HTTP binding verb for an operation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    #[serde(rename = "GET")]
    Get,
    #[serde(rename = "POST")]
    Post,
}

/// One HTTP binding of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationMethod {
    #[serde(rename = "type")]
    pub method: HttpMethod,
    pub url: String,
}

/// A WFS operation with its bindings and declared parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WfsOperation {
    pub name: String,
    pub methods: Vec<OperationMethod>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub parameters: Option<OperationParameters>,
}

/// Declared operation parameters. Recognized names get typed fields;
/// everything else lands in the flattened map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OperationParameters {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub output_formats: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub result_type: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub srs_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub count_supported: Option<bool>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Vec<String>>,
}

impl OperationParameters {
    pub fn is_empty(&self) -> bool {
        self.output_formats.is_none()
            && self.result_type.is_none()
            && self.srs_names.is_none()
            && self.count_supported.is_none()
            && self.other.is_empty()
    }
}

/// A queryable feature type. CRS identifiers are stored normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WfsFeatureType {
    pub name: String,
    pub title: String,
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none", default)]
    pub abstract_: Option<String>,
    #[serde(rename = "defaultCRS")]
    pub default_crs: String,
    #[serde(rename = "otherCRS", skip_serializing_if = "Option::is_none", default)]
    pub other_crs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub wgs84_bounding_box: Option<Wgs84BoundingBox>,
    #[serde(rename = "metadataURL", skip_serializing_if = "Option::is_none", default)]
    pub metadata_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub output_formats: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub schema: Option<SchemaInfo>,
}

/// Schema hint derived from the feature type's qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaInfo {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub element_name: Option<String>,
    #[serde(rename = "namespaceURI", skip_serializing_if = "Option::is_none", default)]
    pub namespace_uri: Option<String>,
}

/// Endpoint shortcuts derived from the operation bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WfsEndpoints {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub get_feature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub describe_feature_type: Option<String>,
}

/// Target-CRS support flags over the service's full feature type set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WfsValidation {
    #[serde(rename = "supportsEPSG4326")]
    pub supports_epsg_4326: bool,
    #[serde(rename = "supportsEPSG3857")]
    pub supports_epsg_3857: bool,
}

/// Flattened legacy projection of [`WfsCapabilities`] for simple consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WfsSimpleCapabilities {
    pub service: WfsServiceData,
    pub feature_types: Vec<WfsFeatureTypeData>,
}

/// Legacy service view: service identity plus provider fields folded in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WfsServiceData {
    pub name: String,
    pub title: String,
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none", default)]
    pub abstract_: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub contact: Option<crate::ContactInfo>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fees: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub access_constraints: Option<String>,
    pub provider_name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub provider_site: Option<String>,
}

/// Legacy feature type view with per-type compatibility booleans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WfsFeatureTypeData {
    pub name: String,
    pub title: String,
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none", default)]
    pub abstract_: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub keywords: Option<Vec<String>>,
    #[serde(rename = "defaultSRS")]
    pub default_srs: String,
    #[serde(rename = "otherSRS", skip_serializing_if = "Option::is_none", default)]
    pub other_srs: Option<Vec<String>>,
    pub output_formats: Vec<String>,
    #[serde(rename = "supportsGeoJSON")]
    pub supports_geojson: bool,
    #[serde(rename = "supportsEPSG4326")]
    pub supports_epsg_4326: bool,
}
