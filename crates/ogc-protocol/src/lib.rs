//! OGC GetCapabilities parsing.
//!
//! Supports:
//! - WMS 1.1.1 and 1.3.0 capabilities documents
//! - WFS 1.0.0/1.1.0 (`Service`/`Capability`) and WFS 2.x (OWS dialect)
//!
//! The pipelines consume already-fetched XML text and return strongly-typed
//! models from `ogc-common`; all failures come back as data, never panics.

pub mod dom;
pub mod exceptions;
pub mod report;
pub mod wfs;
pub mod wms;

pub use dom::{element_text, Document, Element};
pub use exceptions::{detect_exception, is_wfs_capabilities_document, DetectedException};
pub use report::{summarize, to_json_pretty, validate, CapabilitiesSummary, ValidationReport};
pub use wfs::{
    extract_wfs_capabilities, parse_wfs_capabilities, parse_wfs_simple, simple_view,
};
pub use wms::{extract_layers, extract_service_info, parse_wms_capabilities};
