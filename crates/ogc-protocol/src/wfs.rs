//! WFS GetCapabilities extraction across two dialect families.
//!
//! WFS 1.x uses bare `Service`/`Capability`/`FeatureType` elements; WFS 2.x
//! wraps service metadata in OWS elements (`ows:ServiceIdentification`,
//! `ows:OperationsMetadata`). The dialect is selected once, by element
//! presence rather than the declared version number, and service, provider
//! and operation extraction dispatch on it. Feature types are similar
//! enough across versions to merge into a single pass that tries the 1.x
//! tag name first and the 2.x-prefixed name second.

use ogc_common::{
    crs, CapabilitiesError, CapabilitiesResult, ContactInfo, HttpMethod, OperationMethod,
    OperationParameters, ParsedError, SchemaInfo, WfsCapabilities, WfsEndpoints, WfsFeatureType,
    WfsFeatureTypeData, WfsOperation, WfsProvider, WfsProviderContact, WfsServiceData,
    WfsServiceInfo, WfsSimpleCapabilities, WfsValidation, Wgs84BoundingBox,
};

use crate::dom::{element_text, non_empty, Document, Element};
use crate::exceptions::{detect_exception, is_wfs_capabilities_document};

pub(crate) const NO_COMPATIBLE_FEATURE_TYPES: &str =
    "No feature types found that support both GeoJSON output format and EPSG:4326 coordinate system";

const DEFAULT_SERVICE_TITLE: &str = "Web Feature Service";
const DEFAULT_VERSION: &str = "2.0.0";

/// Dialect family, selected by a single presence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WfsDialect {
    /// `Service`/`Capability`/`Request` (WFS 1.0.0/1.1.0).
    Wfs1,
    /// OWS-prefixed metadata (WFS 2.x).
    Wfs2,
}

fn detect_dialect(doc: &Document) -> WfsDialect {
    if doc.first_by_tag("ows:ServiceIdentification").is_some() {
        WfsDialect::Wfs2
    } else {
        WfsDialect::Wfs1
    }
}

/// Full WFS pipeline: parse, document-type check, exception check, extract,
/// compatibility check.
pub fn parse_wfs_capabilities(text: &str) -> CapabilitiesResult<WfsCapabilities> {
    let doc = Document::parse(text)?;

    if !is_wfs_capabilities_document(&doc) {
        return Err(CapabilitiesError::NotWfsCapabilities);
    }
    if let Some(exception) = detect_exception(&doc) {
        return Err(CapabilitiesError::ServiceException(exception.wfs_message()));
    }

    let capabilities = extract_wfs_capabilities(&doc);
    if capabilities.feature_types.is_empty() {
        return Err(CapabilitiesError::Validation(
            NO_COMPATIBLE_FEATURE_TYPES.to_string(),
        ));
    }

    Ok(capabilities)
}

/// Legacy/simple pipeline: runs the detailed pipeline and reshapes the
/// result. Never a second parse.
pub fn parse_wfs_simple(text: &str) -> CapabilitiesResult<WfsSimpleCapabilities> {
    let capabilities = parse_wfs_capabilities(text)?;
    Ok(simple_view(&capabilities))
}

/// Build the complete model from an already-parsed document. Pure; does not
/// apply the pipeline's document-type check. An embedded service exception
/// does not abort extraction here; it is recorded as a diagnostic in the
/// model's `errors` list instead.
pub fn extract_wfs_capabilities(doc: &Document) -> WfsCapabilities {
    let dialect = detect_dialect(doc);
    let mut diagnostics = Vec::new();

    if let Some(exception) = detect_exception(doc) {
        diagnostics.push(exception.to_parsed_error());
    }

    let service = extract_service(doc, dialect, &mut diagnostics);
    let provider = extract_provider(doc, dialect);
    let operations = extract_operations(doc, dialect);
    let all_feature_types = extract_feature_types(doc, &operations);
    let endpoints = extract_endpoints(&operations);
    // Computed over the unfiltered set so it reflects overall capability
    // even when the filtered list ends up empty.
    let validation = crs_support(&all_feature_types);
    let feature_types = filter_feature_types(all_feature_types, &operations);

    WfsCapabilities {
        service,
        provider,
        operations,
        feature_types,
        endpoints,
        validation,
        errors: (!diagnostics.is_empty()).then_some(diagnostics),
    }
}

// === Service identification ===

fn extract_service(
    doc: &Document,
    dialect: WfsDialect,
    diagnostics: &mut Vec<ParsedError>,
) -> WfsServiceInfo {
    let versions = extract_versions(doc);

    let (title, abstract_, keywords, fees, access_constraints) = match dialect {
        WfsDialect::Wfs2 => {
            let Some(si) = doc.first_by_tag("ows:ServiceIdentification") else {
                // Unreachable by construction of the dialect check; kept
                // total rather than panicking on a malformed tree.
                return fallback_service(versions, diagnostics);
            };
            let keywords: Vec<String> = si
                .descendants("ows:Keyword")
                .iter()
                .map(|k| k.text())
                .filter(|k| !k.is_empty())
                .collect();
            (
                element_text(si, "ows:Title"),
                non_empty(element_text(si, "ows:Abstract")),
                keywords,
                non_empty(element_text(si, "ows:Fees")),
                non_empty(element_text(si, "ows:AccessConstraints")),
            )
        }
        WfsDialect::Wfs1 => match doc.first_by_tag("Service") {
            Some(service) => {
                let keywords: Vec<String> = service
                    .first("KeywordList")
                    .map(|list| {
                        list.descendants("Keyword")
                            .iter()
                            .map(|k| k.text())
                            .filter(|k| !k.is_empty())
                            .collect()
                    })
                    .unwrap_or_default();
                (
                    element_text(service, "Title"),
                    non_empty(element_text(service, "Abstract")),
                    keywords,
                    non_empty(element_text(service, "Fees")),
                    non_empty(element_text(service, "AccessConstraints")),
                )
            }
            None => return fallback_service(versions, diagnostics),
        },
    };

    let title = if title.is_empty() {
        diagnostics.push(
            ParsedError::new(
                "MissingServiceTitle",
                "Service title not found in capabilities document",
            )
            .with_hint("Using default title"),
        );
        DEFAULT_SERVICE_TITLE.to_string()
    } else {
        title
    };

    WfsServiceInfo {
        service_type: "WFS".to_string(),
        title,
        abstract_,
        keywords: (!keywords.is_empty()).then_some(keywords),
        versions,
        fees,
        access_constraints,
    }
}

fn fallback_service(versions: Vec<String>, diagnostics: &mut Vec<ParsedError>) -> WfsServiceInfo {
    diagnostics.push(
        ParsedError::new(
            "MissingServiceIdentification",
            "No service identification block found in capabilities document",
        )
        .with_hint("Using default title"),
    );
    WfsServiceInfo {
        service_type: "WFS".to_string(),
        title: DEFAULT_SERVICE_TITLE.to_string(),
        abstract_: None,
        keywords: None,
        versions,
        fees: None,
        access_constraints: None,
    }
}

/// Versions from the root `version` attribute plus any `ows:Value` children
/// of an `AcceptVersions` parameter, deduplicated; defaults to 2.0.0.
fn extract_versions(doc: &Document) -> Vec<String> {
    let mut versions: Vec<String> = Vec::new();

    if let Some(root) = doc.root() {
        if let Some(version) = root.attr("version") {
            if !version.is_empty() {
                versions.push(version.to_string());
            }
        }
    }

    for value in doc.elements_by_tag("ows:Value") {
        let Some(parent) = value.parent() else { continue };
        if parent.attr("name") == Some("AcceptVersions") {
            let version = value.text();
            if !version.is_empty() && !versions.contains(&version) {
                versions.push(version);
            }
        }
    }

    if versions.is_empty() {
        versions.push(DEFAULT_VERSION.to_string());
    }
    versions
}

// === Provider ===

fn extract_provider(doc: &Document, dialect: WfsDialect) -> WfsProvider {
    match dialect {
        WfsDialect::Wfs2 => provider_from_ows(doc),
        WfsDialect::Wfs1 => provider_from_service(doc),
    }
}

fn provider_from_ows(doc: &Document) -> WfsProvider {
    let Some(sp) = doc.first_by_tag("ows:ServiceProvider") else {
        return WfsProvider::unknown();
    };
    let service_contact = sp.first("ows:ServiceContact");
    let contact_info = service_contact.and_then(|c| c.first("ows:ContactInfo"));
    let address = contact_info.and_then(|c| c.first("ows:Address"));

    WfsProvider {
        name: non_empty(element_text(sp, "ows:ProviderName"))
            .unwrap_or_else(|| "Unknown Provider".to_string()),
        site: sp
            .first("ows:ProviderSite")
            .and_then(|e| e.attr("xlink:href"))
            .map(str::to_string),
        contact: service_contact.map(|sc| WfsProviderContact {
            individual_name: non_empty(element_text(sc, "ows:IndividualName")),
            position_name: non_empty(element_text(sc, "ows:PositionName")),
            phone: contact_info
                .map(|ci| element_text(ci, "ows:Voice"))
                .and_then(non_empty),
            email: address
                .map(|a| element_text(a, "ows:ElectronicMailAddress"))
                .and_then(non_empty),
        }),
    }
}

fn provider_from_service(doc: &Document) -> WfsProvider {
    let Some(service) = doc.first_by_tag("Service") else {
        return WfsProvider::unknown();
    };
    let contact_info = service.first("ContactInformation");
    let person_primary = contact_info.and_then(|ci| ci.first("ContactPersonPrimary"));

    WfsProvider {
        name: person_primary
            .map(|p| element_text(p, "ContactOrganization"))
            .and_then(non_empty)
            .unwrap_or_else(|| "Unknown Provider".to_string()),
        site: None,
        contact: contact_info.map(|ci| WfsProviderContact {
            individual_name: person_primary
                .map(|p| element_text(p, "ContactPerson"))
                .and_then(non_empty),
            position_name: non_empty(element_text(ci, "ContactPosition")),
            phone: non_empty(element_text(ci, "ContactVoiceTelephone")),
            email: non_empty(element_text(ci, "ContactElectronicMailAddress")),
        }),
    }
}

// === Operations ===

fn extract_operations(doc: &Document, dialect: WfsDialect) -> Vec<WfsOperation> {
    let mut operations = match dialect {
        WfsDialect::Wfs2 => operations_from_ows(doc),
        WfsDialect::Wfs1 => Vec::new(),
    };
    // Some servers declare a 2.x service block but keep the 1.x request
    // tree; fall back whenever the OWS pass found nothing.
    if operations.is_empty() {
        operations = operations_from_capability(doc);
    }
    operations
}

fn operations_from_ows(doc: &Document) -> Vec<WfsOperation> {
    let Some(metadata) = doc.first_by_tag("ows:OperationsMetadata") else {
        return Vec::new();
    };

    let mut operations = Vec::new();
    for op in metadata.descendants("ows:Operation") {
        let Some(name) = op.attr("name") else { continue };

        let mut methods = Vec::new();
        for dcp in op.descendants("ows:DCP") {
            let Some(http) = dcp.first("ows:HTTP") else { continue };
            for get in http.descendants("ows:Get") {
                if let Some(href) = get.attr("xlink:href") {
                    methods.push(OperationMethod {
                        method: HttpMethod::Get,
                        url: href.to_string(),
                    });
                }
            }
            for post in http.descendants("ows:Post") {
                if let Some(href) = post.attr("xlink:href") {
                    methods.push(OperationMethod {
                        method: HttpMethod::Post,
                        url: href.to_string(),
                    });
                }
            }
        }

        operations.push(WfsOperation {
            name: name.to_string(),
            methods,
            parameters: extract_operation_parameters(op),
        });
    }
    operations
}

fn extract_operation_parameters(op: Element<'_>) -> Option<OperationParameters> {
    let mut params = OperationParameters::default();

    for param in op.descendants("ows:Parameter") {
        let Some(name) = param.attr("name") else { continue };
        let values: Vec<String> = param
            .descendants("ows:Value")
            .iter()
            .map(|v| v.text())
            .filter(|v| !v.is_empty())
            .collect();
        if values.is_empty() {
            continue;
        }
        match name {
            "outputFormat" => params.output_formats = Some(values),
            "resultType" => params.result_type = Some(values),
            "srsName" => params.srs_names = Some(values),
            other => {
                params.other.insert(other.to_string(), values);
            }
        }
    }

    for constraint in op.descendants("ows:Constraint") {
        if matches!(
            constraint.attr("name"),
            Some("CountDefault") | Some("ImplementsResultPaging")
        ) {
            params.count_supported = Some(true);
        }
    }

    (!params.is_empty()).then_some(params)
}

fn operations_from_capability(doc: &Document) -> Vec<WfsOperation> {
    let Some(request) = doc
        .first_by_tag("Capability")
        .and_then(|c| c.first("Request"))
    else {
        return Vec::new();
    };

    let mut operations = Vec::new();
    for op in request.children() {
        let mut methods = Vec::new();
        if let Some(http) = op.first("DCPType").and_then(|d| d.first("HTTP")) {
            if let Some(href) = http
                .first("Get")
                .and_then(|g| g.first("OnlineResource"))
                .and_then(|o| o.attr("xlink:href"))
            {
                methods.push(OperationMethod {
                    method: HttpMethod::Get,
                    url: href.to_string(),
                });
            }
            if let Some(href) = http
                .first("Post")
                .and_then(|p| p.first("OnlineResource"))
                .and_then(|o| o.attr("xlink:href"))
            {
                methods.push(OperationMethod {
                    method: HttpMethod::Post,
                    url: href.to_string(),
                });
            }
        }
        if !methods.is_empty() {
            operations.push(WfsOperation {
                name: op.tag().to_string(),
                methods,
                parameters: None,
            });
        }
    }
    operations
}

// === Feature types ===

/// Single merged pass over `FeatureType` and `wfs:FeatureType` elements.
///
/// Entries without a name or a resolvable default CRS are dropped silently:
/// such a feature type is unusable for cross-version comparison, and the
/// pipeline reports document-level problems only. Per-type output formats
/// inherit the `GetFeature` operation's global list when absent; this runs
/// before filtering so operation-level declarations count.
fn extract_feature_types(doc: &Document, operations: &[WfsOperation]) -> Vec<WfsFeatureType> {
    let global_formats = global_output_formats(operations);

    let mut elements = doc.elements_by_tag("FeatureType");
    elements.extend(doc.elements_by_tag("wfs:FeatureType"));

    elements
        .into_iter()
        .filter_map(|ft| extract_feature_type(ft, &global_formats))
        .collect()
}

fn extract_feature_type(ft: Element<'_>, global_formats: &[String]) -> Option<WfsFeatureType> {
    let name = dual_text(ft, "Name", "wfs:Name")?;
    let raw_crs = dual_text(ft, "DefaultCRS", "wfs:DefaultCRS")
        .or_else(|| dual_text(ft, "DefaultSRS", "SRS"))?;

    let title = dual_text(ft, "Title", "wfs:Title").unwrap_or_else(|| name.clone());

    let mut other_crs = Vec::new();
    let mut other_elements = ft.descendants("OtherCRS");
    other_elements.extend(ft.descendants("wfs:OtherCRS"));
    other_elements.extend(ft.descendants("OtherSRS"));
    for el in other_elements {
        let text = el.text();
        if !text.is_empty() {
            other_crs.push(crs::normalize(&text));
        }
    }

    let output_formats = {
        let own = feature_type_output_formats(ft);
        if own.is_empty() {
            global_formats.to_vec()
        } else {
            own
        }
    };

    Some(WfsFeatureType {
        schema: schema_info(&name),
        title,
        abstract_: dual_text(ft, "Abstract", "wfs:Abstract"),
        default_crs: crs::normalize(&raw_crs),
        other_crs: (!other_crs.is_empty()).then_some(other_crs),
        wgs84_bounding_box: parse_bounding_box(ft),
        metadata_url: extract_metadata_url(ft),
        output_formats: (!output_formats.is_empty()).then_some(output_formats),
        name,
    })
}

/// Look up a field by the 1.x tag name first, the 2.x-prefixed name second.
fn dual_text(ft: Element<'_>, plain: &str, prefixed: &str) -> Option<String> {
    non_empty(element_text(ft, plain)).or_else(|| non_empty(element_text(ft, prefixed)))
}

fn global_output_formats(operations: &[WfsOperation]) -> Vec<String> {
    operations
        .iter()
        .find(|op| op.name == "GetFeature")
        .and_then(|op| op.parameters.as_ref())
        .and_then(|p| p.output_formats.clone())
        .unwrap_or_default()
}

fn feature_type_output_formats(ft: Element<'_>) -> Vec<String> {
    let Some(formats) = ft.first("OutputFormats") else {
        return Vec::new();
    };
    formats
        .descendants("Format")
        .iter()
        .map(|f| f.text())
        .filter(|f| !f.is_empty())
        .collect()
}

/// OWS corners first, then the WFS 1.x `LatLongBoundingBox` attribute form.
/// Numeric parse failures degrade to `None`, never an error.
fn parse_bounding_box(ft: Element<'_>) -> Option<Wgs84BoundingBox> {
    let bbox = ft
        .first("ows:WGS84BoundingBox")
        .or_else(|| ft.first("WGS84BoundingBox"))
        .or_else(|| ft.first("LatLongBoundingBox"))?;

    let lower = element_text(bbox, "ows:LowerCorner");
    let upper = element_text(bbox, "ows:UpperCorner");
    if !lower.is_empty() && !upper.is_empty() {
        if let Some(parsed) = Wgs84BoundingBox::from_corner_text(&lower, &upper) {
            return Some(parsed);
        }
    }

    match (
        bbox.attr("minx"),
        bbox.attr("miny"),
        bbox.attr("maxx"),
        bbox.attr("maxy"),
    ) {
        (Some(minx), Some(miny), Some(maxx), Some(maxy)) => {
            Wgs84BoundingBox::from_extent_attrs(minx, miny, maxx, maxy)
        }
        _ => None,
    }
}

fn extract_metadata_url(ft: Element<'_>) -> Option<String> {
    let mut elements = ft.descendants("MetadataURL");
    elements.extend(ft.descendants("ows:Metadata"));

    for el in elements {
        if let Some(href) = el.attr("xlink:href") {
            return Some(href.to_string());
        }
        if let Some(href) = el
            .first("OnlineResource")
            .and_then(|o| o.attr("xlink:href"))
        {
            return Some(href.to_string());
        }
    }
    None
}

fn schema_info(name: &str) -> Option<SchemaInfo> {
    let element_name = match name.split_once(':') {
        Some((_, local)) => local.to_string(),
        None => name.to_string(),
    };
    Some(SchemaInfo {
        element_name: Some(element_name),
        // Resolving the prefix would need the document's namespace
        // declarations, which this layer never interprets.
        namespace_uri: None,
    })
}

// === Endpoints, validation flags, filtering ===

fn extract_endpoints(operations: &[WfsOperation]) -> WfsEndpoints {
    let base = operations
        .iter()
        .find(|op| !op.methods.is_empty())
        .map(|op| match op.methods[0].url.split_once('?') {
            Some((base, _)) => base.to_string(),
            None => op.methods[0].url.clone(),
        });

    WfsEndpoints {
        base,
        get_feature: first_method_url(operations, "GetFeature"),
        describe_feature_type: first_method_url(operations, "DescribeFeatureType"),
    }
}

fn first_method_url(operations: &[WfsOperation], name: &str) -> Option<String> {
    operations
        .iter()
        .find(|op| op.name == name)
        .and_then(|op| op.methods.first())
        .map(|m| m.url.clone())
}

fn crs_support(feature_types: &[WfsFeatureType]) -> WfsValidation {
    let mut validation = WfsValidation::default();
    for ft in feature_types {
        for crs_id in all_crs(ft) {
            if crs::is_epsg_4326(crs_id) {
                validation.supports_epsg_4326 = true;
            }
            if crs::is_epsg_3857(crs_id) {
                validation.supports_epsg_3857 = true;
            }
        }
    }
    validation
}

fn all_crs(ft: &WfsFeatureType) -> impl Iterator<Item = &str> {
    std::iter::once(ft.default_crs.as_str())
        .chain(ft.other_crs.iter().flatten().map(String::as_str))
}

/// Keep a feature type iff its CRS set contains an EPSG:4326-equivalent and
/// its effective output formats contain a GeoJSON-family entry.
fn filter_feature_types(
    feature_types: Vec<WfsFeatureType>,
    operations: &[WfsOperation],
) -> Vec<WfsFeatureType> {
    let global_formats = global_output_formats(operations);

    feature_types
        .into_iter()
        .filter(|ft| {
            if !all_crs(ft).any(crs::is_epsg_4326) {
                return false;
            }
            let effective = ft
                .output_formats
                .as_deref()
                .unwrap_or(global_formats.as_slice());
            effective.iter().any(|f| crs::is_geojson_format(f))
        })
        .collect()
}

// === Legacy projection ===

/// Flatten the detailed model into the legacy view for simple consumers.
pub fn simple_view(capabilities: &WfsCapabilities) -> WfsSimpleCapabilities {
    let service = WfsServiceData {
        name: capabilities.service.service_type.clone(),
        title: capabilities.service.title.clone(),
        abstract_: capabilities.service.abstract_.clone(),
        keywords: capabilities.service.keywords.clone(),
        contact: capabilities.provider.contact.as_ref().map(|c| ContactInfo {
            person: c.individual_name.clone(),
            organization: Some(capabilities.provider.name.clone()),
            position: c.position_name.clone(),
            address: None,
            phone: c.phone.clone(),
            fax: None,
            email: c.email.clone(),
        }),
        fees: capabilities.service.fees.clone(),
        access_constraints: capabilities.service.access_constraints.clone(),
        provider_name: capabilities.provider.name.clone(),
        provider_site: capabilities.provider.site.clone(),
    };

    let feature_types = capabilities
        .feature_types
        .iter()
        .map(|ft| {
            let output_formats = ft.output_formats.clone().unwrap_or_default();
            WfsFeatureTypeData {
                name: ft.name.clone(),
                title: ft.title.clone(),
                abstract_: ft.abstract_.clone(),
                keywords: None,
                default_srs: ft.default_crs.clone(),
                other_srs: ft.other_crs.clone(),
                supports_geojson: output_formats.iter().any(|f| crs::is_geojson_format(f)),
                supports_epsg_4326: all_crs(ft).any(crs::is_epsg_4326),
                output_formats,
            }
        })
        .collect();

    WfsSimpleCapabilities {
        service,
        feature_types,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_detection() {
        let wfs2 = Document::parse(
            "<wfs:WFS_Capabilities><ows:ServiceIdentification/></wfs:WFS_Capabilities>",
        )
        .unwrap();
        assert_eq!(detect_dialect(&wfs2), WfsDialect::Wfs2);

        let wfs1 =
            Document::parse("<WFS_Capabilities><Service/></WFS_Capabilities>").unwrap();
        assert_eq!(detect_dialect(&wfs1), WfsDialect::Wfs1);
    }

    #[test]
    fn test_versions_from_root_and_accept_versions() {
        let doc = Document::parse(
            r#"<wfs:WFS_Capabilities version="2.0.0">
                 <ows:OperationsMetadata>
                   <ows:Operation name="GetCapabilities">
                     <ows:Parameter name="AcceptVersions">
                       <ows:AllowedValues>
                         <ows:Value>2.0.0</ows:Value>
                         <ows:Value>1.1.0</ows:Value>
                       </ows:AllowedValues>
                     </ows:Parameter>
                   </ows:Operation>
                 </ows:OperationsMetadata>
               </wfs:WFS_Capabilities>"#,
        )
        .unwrap();
        // ows:Value parents here are ows:AllowedValues, not the parameter,
        // so only the root attribute counts.
        assert_eq!(extract_versions(&doc), ["2.0.0"]);
    }

    #[test]
    fn test_versions_from_direct_parameter_values() {
        let doc = Document::parse(
            r#"<wfs:WFS_Capabilities>
                 <ows:Parameter name="AcceptVersions">
                   <ows:Value>2.0.0</ows:Value>
                   <ows:Value>1.1.0</ows:Value>
                 </ows:Parameter>
               </wfs:WFS_Capabilities>"#,
        )
        .unwrap();
        assert_eq!(extract_versions(&doc), ["2.0.0", "1.1.0"]);
    }

    #[test]
    fn test_versions_default() {
        let doc = Document::parse("<wfs:WFS_Capabilities/>").unwrap();
        assert_eq!(extract_versions(&doc), ["2.0.0"]);
    }

    #[test]
    fn test_standalone_extraction_records_exception_diagnostic() {
        let doc = Document::parse(
            r#"<WFS_Capabilities version="1.1.0">
                 <ServiceException code="Busy">try later</ServiceException>
                 <Service><Title>T</Title></Service>
               </WFS_Capabilities>"#,
        )
        .unwrap();
        let capabilities = extract_wfs_capabilities(&doc);
        let errors = capabilities.errors.unwrap();
        assert!(errors
            .iter()
            .any(|e| e.code == "Busy" && e.message == "try later"));
    }

    #[test]
    fn test_schema_info_from_qualified_name() {
        let schema = schema_info("topp:states").unwrap();
        assert_eq!(schema.element_name.as_deref(), Some("states"));
        assert!(schema.namespace_uri.is_none());

        let schema = schema_info("roads").unwrap();
        assert_eq!(schema.element_name.as_deref(), Some("roads"));
    }

    #[test]
    fn test_endpoints_strip_query() {
        let operations = vec![WfsOperation {
            name: "GetFeature".to_string(),
            methods: vec![OperationMethod {
                method: HttpMethod::Get,
                url: "https://example.com/wfs?service=WFS".to_string(),
            }],
            parameters: None,
        }];
        let endpoints = extract_endpoints(&operations);
        assert_eq!(endpoints.base.as_deref(), Some("https://example.com/wfs"));
        assert_eq!(
            endpoints.get_feature.as_deref(),
            Some("https://example.com/wfs?service=WFS")
        );
        assert!(endpoints.describe_feature_type.is_none());
    }
}
