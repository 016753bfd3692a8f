//! Validation and summary reporting over an extracted WFS model.
//!
//! Everything here is a pure function of the model: no mutation, no I/O,
//! and failures come back as string lists rather than errors.

use serde::{Deserialize, Serialize};

use ogc_common::WfsCapabilities;

/// Outcome of the required-field checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Check the model against the minimal required-field rules.
///
/// Shape constraints the type system already guarantees (method verbs,
/// bounding-box corner arity) are not re-checked; everything else that the
/// exported schema requires is.
pub fn validate(capabilities: &WfsCapabilities) -> ValidationReport {
    let mut errors = Vec::new();

    if capabilities.service.service_type != "WFS" {
        errors.push(r#"service.type must be "WFS""#.to_string());
    }
    if capabilities.service.title.is_empty() {
        errors.push("Missing required field: service.title".to_string());
    }
    if capabilities.service.versions.is_empty() {
        errors.push("Missing required field: service.versions".to_string());
    }
    if capabilities.provider.name.is_empty() {
        errors.push("Missing required field: provider.name".to_string());
    }

    for (index, op) in capabilities.operations.iter().enumerate() {
        if op.name.is_empty() {
            errors.push(format!("operations[{index}].name is required"));
        }
        for (m_index, method) in op.methods.iter().enumerate() {
            if method.url.is_empty() {
                errors.push(format!(
                    "operations[{index}].methods[{m_index}].url is required"
                ));
            }
        }
    }

    for (index, ft) in capabilities.feature_types.iter().enumerate() {
        if ft.name.is_empty() {
            errors.push(format!("featureTypes[{index}].name is required"));
        }
        if ft.title.is_empty() {
            errors.push(format!("featureTypes[{index}].title is required"));
        }
        if ft.default_crs.is_empty() {
            errors.push(format!("featureTypes[{index}].defaultCRS is required"));
        }
    }

    if let Some(parsed_errors) = &capabilities.errors {
        for (index, err) in parsed_errors.iter().enumerate() {
            if err.code.is_empty() {
                errors.push(format!("errors[{index}].code is required"));
            }
            if err.message.is_empty() {
                errors.push(format!("errors[{index}].message is required"));
            }
        }
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

/// Aggregate statistics derived from an extracted model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitiesSummary {
    pub service_name: String,
    pub total_operations: usize,
    pub compatible_feature_types: usize,
    #[serde(rename = "supportsEPSG4326")]
    pub supports_epsg_4326: bool,
    #[serde(rename = "supportsEPSG3857")]
    pub supports_epsg_3857: bool,
    /// Union of formats declared across operations and feature types, in
    /// first-seen order.
    pub output_formats: Vec<String>,
    pub versions: Vec<String>,
}

/// Derive summary statistics by pure aggregation over the model.
pub fn summarize(capabilities: &WfsCapabilities) -> CapabilitiesSummary {
    let mut output_formats: Vec<String> = Vec::new();
    let mut push_format = |format: &str, formats: &mut Vec<String>| {
        if !formats.iter().any(|f| f == format) {
            formats.push(format.to_string());
        }
    };

    for op in &capabilities.operations {
        if let Some(formats) = op
            .parameters
            .as_ref()
            .and_then(|p| p.output_formats.as_ref())
        {
            for format in formats {
                push_format(format, &mut output_formats);
            }
        }
    }
    for ft in &capabilities.feature_types {
        if let Some(formats) = &ft.output_formats {
            for format in formats {
                push_format(format, &mut output_formats);
            }
        }
    }

    CapabilitiesSummary {
        service_name: capabilities.service.title.clone(),
        total_operations: capabilities.operations.len(),
        compatible_feature_types: capabilities.feature_types.len(),
        supports_epsg_4326: capabilities.validation.supports_epsg_4326,
        supports_epsg_3857: capabilities.validation.supports_epsg_3857,
        output_formats,
        versions: capabilities.service.versions.clone(),
    }
}

/// Serialize the model to the stable export artifact: 2-space indented
/// JSON in the downstream schema. Clipboard and file export paths must use
/// this same serialization byte for byte.
pub fn to_json_pretty(capabilities: &WfsCapabilities) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(capabilities)
}
