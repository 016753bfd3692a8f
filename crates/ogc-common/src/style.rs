//! WMS layer styles.

use serde::{Deserialize, Serialize};

/// A style declared as a direct child of a WMS `Layer`.
///
/// Declaration order within the layer is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub legend_url: Option<String>,
}
