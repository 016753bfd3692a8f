//! Common types and utilities shared across the OGC capabilities crates.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod layer;
pub mod service;
pub mod style;
pub mod wfs;

pub use bbox::Wgs84BoundingBox;
pub use error::{CapabilitiesError, CapabilitiesResult, ParsedError};
pub use layer::{Layer, WmsCapabilities};
pub use service::{ContactAddress, ContactInfo, WmsServiceInfo};
pub use style::Style;
pub use wfs::{
    HttpMethod, OperationMethod, OperationParameters, SchemaInfo, WfsCapabilities, WfsEndpoints,
    WfsFeatureType, WfsFeatureTypeData, WfsOperation, WfsProvider, WfsProviderContact,
    WfsServiceData, WfsServiceInfo, WfsSimpleCapabilities, WfsValidation,
};
