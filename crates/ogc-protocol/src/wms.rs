//! WMS GetCapabilities extraction.
//!
//! Walks a WMS 1.1.1/1.3.0 document for service metadata and the layers
//! usable in a Web Mercator viewer: named layers whose CRS set, including
//! CRS inherited from ancestor layers, contains `EPSG:3857`.

use ogc_common::{
    CapabilitiesError, CapabilitiesResult, ContactAddress, ContactInfo, Layer, Style,
    WmsCapabilities, WmsServiceInfo,
};

use crate::dom::{element_text, non_empty, Document, Element};
use crate::exceptions::detect_exception;

pub(crate) const NO_SERVICE_INFO: &str = "No service information found in the XML document";
pub(crate) const NO_MERCATOR_LAYERS: &str = "No layers with EPSG:3857 projection found";

/// Full WMS pipeline: parse, exception check, extract, validate.
///
/// Fails with [`CapabilitiesError::ServiceException`] before attempting any
/// extraction when the document is an error payload.
pub fn parse_wms_capabilities(text: &str) -> CapabilitiesResult<WmsCapabilities> {
    let doc = Document::parse(text)?;

    if let Some(exception) = detect_exception(&doc) {
        return Err(CapabilitiesError::ServiceException(exception.wms_message()));
    }

    let service = extract_service_info(&doc);
    let layers = extract_layers(&doc);

    if service.is_none() {
        return Err(CapabilitiesError::Validation(NO_SERVICE_INFO.to_string()));
    }
    if layers.is_empty() {
        return Err(CapabilitiesError::Validation(NO_MERCATOR_LAYERS.to_string()));
    }

    Ok(WmsCapabilities { service, layers })
}

/// Service identity and contact metadata, or `None` when the document has
/// no `Service` element. The caller decides whether that is fatal.
pub fn extract_service_info(doc: &Document) -> Option<WmsServiceInfo> {
    let service = doc.first_by_tag("Service")?;
    Some(WmsServiceInfo {
        name: element_text(service, "Name"),
        title: element_text(service, "Title"),
        abstract_: non_empty(element_text(service, "Abstract")),
        keywords: extract_keywords(service),
        contact: extract_contact(service),
        fees: non_empty(element_text(service, "Fees")),
        access_constraints: non_empty(element_text(service, "AccessConstraints")),
    })
}

/// Every `Layer` in document order that has a `Name` and Web Mercator
/// support. Layers failing either test are omitted, not reported.
pub fn extract_layers(doc: &Document) -> Vec<Layer> {
    doc.elements_by_tag("Layer")
        .into_iter()
        .filter(|layer| has_web_mercator_crs(*layer))
        .filter_map(|layer| {
            let name = non_empty(element_text(layer, "Name"))?;
            Some(Layer {
                name,
                title: non_empty(element_text(layer, "Title")),
                abstract_: non_empty(element_text(layer, "Abstract")),
                styles: extract_styles(layer),
                online_resource: extract_online_resource(layer),
            })
        })
        .collect()
}

/// WMS capability inheritance: a layer supports EPSG:3857 when it, or any
/// ancestor `Layer`, declares a direct `CRS` child with that exact text.
fn has_web_mercator_crs(layer: Element<'_>) -> bool {
    if declares_web_mercator(layer) {
        return true;
    }
    let mut ancestor = layer.parent();
    while let Some(el) = ancestor {
        if el.tag() == "Layer" && declares_web_mercator(el) {
            return true;
        }
        ancestor = el.parent();
    }
    false
}

fn declares_web_mercator(layer: Element<'_>) -> bool {
    layer
        .children()
        .any(|child| child.tag() == "CRS" && child.text() == "EPSG:3857")
}

/// Direct `Style` children only, in declaration order. A child layer's
/// styles belong to the child, not to this layer.
fn extract_styles(layer: Element<'_>) -> Vec<Style> {
    layer
        .children()
        .filter(|child| child.tag() == "Style")
        .map(|style| Style {
            name: element_text(style, "Name"),
            title: non_empty(element_text(style, "Title")),
            legend_url: extract_legend_url(style),
        })
        .collect()
}

fn extract_legend_url(style: Element<'_>) -> Option<String> {
    style
        .first("LegendURL")?
        .first("OnlineResource")?
        .attr("xlink:href")
        .map(str::to_string)
}

fn extract_online_resource(layer: Element<'_>) -> Option<String> {
    layer
        .first("DCPType")?
        .first("OnlineResource")?
        .attr("xlink:href")
        .map(str::to_string)
}

fn extract_keywords(service: Element<'_>) -> Vec<String> {
    let Some(keyword_list) = service.first("KeywordList") else {
        return Vec::new();
    };
    keyword_list
        .descendants("Keyword")
        .iter()
        .map(|k| k.text())
        .filter(|k| !k.is_empty())
        .collect()
}

fn extract_contact(service: Element<'_>) -> Option<ContactInfo> {
    let info = service.first("ContactInformation")?;
    let person_primary = info.first("ContactPersonPrimary");
    let address = info.first("ContactAddress");

    Some(ContactInfo {
        person: person_primary
            .map(|p| element_text(p, "ContactPerson"))
            .and_then(non_empty),
        organization: person_primary
            .map(|p| element_text(p, "ContactOrganization"))
            .and_then(non_empty),
        position: non_empty(element_text(info, "ContactPosition")),
        address: address.map(|a| ContactAddress {
            address_type: non_empty(element_text(a, "AddressType")),
            street: non_empty(element_text(a, "Address")),
            city: non_empty(element_text(a, "City")),
            state: non_empty(element_text(a, "StateOrProvince")),
            post_code: non_empty(element_text(a, "PostCode")),
            country: non_empty(element_text(a, "Country")),
        }),
        phone: non_empty(element_text(info, "ContactVoiceTelephone")),
        fax: non_empty(element_text(info, "ContactFacsimileTelephone")),
        email: non_empty(element_text(info, "ContactElectronicMailAddress")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(xml: &str) -> Document {
        Document::parse(xml).unwrap()
    }

    #[test]
    fn test_layer_with_direct_crs() {
        let d = doc(
            "<WMS_Capabilities><Capability>
               <Layer><Name>a</Name><CRS>EPSG:3857</CRS></Layer>
             </Capability></WMS_Capabilities>",
        );
        let layers = extract_layers(&d);
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].name, "a");
    }

    #[test]
    fn test_layer_without_mercator_crs_is_omitted() {
        let d = doc(
            "<WMS_Capabilities><Capability>
               <Layer><Name>a</Name><CRS>EPSG:4326</CRS></Layer>
             </Capability></WMS_Capabilities>",
        );
        assert!(extract_layers(&d).is_empty());
    }

    #[test]
    fn test_layer_without_name_is_omitted() {
        let d = doc(
            "<WMS_Capabilities><Capability>
               <Layer><Title>unnamed</Title><CRS>EPSG:3857</CRS></Layer>
             </Capability></WMS_Capabilities>",
        );
        assert!(extract_layers(&d).is_empty());
    }

    #[test]
    fn test_crs_match_is_exact() {
        let d = doc(
            "<WMS_Capabilities><Capability>
               <Layer><Name>a</Name><CRS>EPSG:3857x</CRS></Layer>
             </Capability></WMS_Capabilities>",
        );
        assert!(extract_layers(&d).is_empty());
    }

    #[test]
    fn test_no_service_element() {
        let d = doc("<WMS_Capabilities><Capability/></WMS_Capabilities>");
        assert!(extract_service_info(&d).is_none());
    }
}
