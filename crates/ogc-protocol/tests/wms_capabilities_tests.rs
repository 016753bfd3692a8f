//! End-to-end tests for the WMS extraction pipeline.

use ogc_common::CapabilitiesError;
use ogc_protocol::{extract_layers, extract_service_info, parse_wms_capabilities, Document};

const WMS_DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<WMS_Capabilities version="1.3.0">
  <Service>
    <Name>WMS</Name>
    <Title>Demo Map Server</Title>
    <Abstract>Test server</Abstract>
    <KeywordList>
      <Keyword>weather</Keyword>
      <Keyword>forecast</Keyword>
    </KeywordList>
    <ContactInformation>
      <ContactPersonPrimary>
        <ContactPerson>Jane Roe</ContactPerson>
        <ContactOrganization>Example Org</ContactOrganization>
      </ContactPersonPrimary>
      <ContactPosition>Administrator</ContactPosition>
      <ContactAddress>
        <AddressType>postal</AddressType>
        <Address>1 Main St</Address>
        <City>Springfield</City>
        <StateOrProvince>IL</StateOrProvince>
        <PostCode>62701</PostCode>
        <Country>USA</Country>
      </ContactAddress>
      <ContactVoiceTelephone>+1 555 0100</ContactVoiceTelephone>
      <ContactElectronicMailAddress>ops@example.com</ContactElectronicMailAddress>
    </ContactInformation>
    <Fees>none</Fees>
    <AccessConstraints>none</AccessConstraints>
  </Service>
  <Capability>
    <Layer>
      <Title>Root</Title>
      <CRS>EPSG:3857</CRS>
      <Layer>
        <Title>Middle</Title>
        <Layer>
          <Name>leaf</Name>
          <Title>Leaf Layer</Title>
          <Style>
            <Name>default</Name>
            <Title>Default</Title>
            <LegendURL>
              <OnlineResource xlink:href="https://example.com/legend.png"/>
            </LegendURL>
          </Style>
          <Style>
            <Name>alt</Name>
          </Style>
        </Layer>
      </Layer>
      <Layer>
        <Name>direct</Name>
        <CRS>EPSG:3857</CRS>
      </Layer>
    </Layer>
    <Layer>
      <Name>outside</Name>
      <CRS>EPSG:4326</CRS>
    </Layer>
  </Capability>
</WMS_Capabilities>"#;

// ============================================================================
// Extraction
// ============================================================================

#[test]
fn test_service_info_extraction() {
    let capabilities = parse_wms_capabilities(WMS_DOC).unwrap();
    let service = capabilities.service.unwrap();
    assert_eq!(service.name, "WMS");
    assert_eq!(service.title, "Demo Map Server");
    assert_eq!(service.abstract_.as_deref(), Some("Test server"));
    assert_eq!(service.keywords, ["weather", "forecast"]);
    assert_eq!(service.fees.as_deref(), Some("none"));

    let contact = service.contact.unwrap();
    assert_eq!(contact.person.as_deref(), Some("Jane Roe"));
    assert_eq!(contact.organization.as_deref(), Some("Example Org"));
    assert_eq!(contact.email.as_deref(), Some("ops@example.com"));
    let address = contact.address.unwrap();
    assert_eq!(address.city.as_deref(), Some("Springfield"));
    assert_eq!(address.post_code.as_deref(), Some("62701"));
}

#[test]
fn test_ancestor_crs_inheritance() {
    // "leaf" sits three Layer levels deep and never declares EPSG:3857
    // itself; it inherits from the root layer.
    let capabilities = parse_wms_capabilities(WMS_DOC).unwrap();
    let names: Vec<&str> = capabilities.layers.iter().map(|l| l.name.as_str()).collect();
    assert!(names.contains(&"leaf"));
    assert!(names.contains(&"direct"));
    // Outside the mercator subtree, excluded silently.
    assert!(!names.contains(&"outside"));
    // The group layers above "leaf" surface its name through the lossy
    // descendant lookup, so the leaf name appears three times.
    assert_eq!(names.iter().filter(|n| **n == "leaf").count(), 3);
    assert_eq!(capabilities.layers.len(), 4);
}

#[test]
fn test_styles_in_declaration_order() {
    let capabilities = parse_wms_capabilities(WMS_DOC).unwrap();
    let leaf = capabilities
        .layers
        .iter()
        .find(|l| l.title.as_deref() == Some("Leaf Layer"))
        .unwrap();
    assert_eq!(leaf.styles.len(), 2);
    assert_eq!(leaf.styles[0].name, "default");
    assert_eq!(
        leaf.styles[0].legend_url.as_deref(),
        Some("https://example.com/legend.png")
    );
    assert_eq!(leaf.styles[1].name, "alt");
    assert!(leaf.styles[1].legend_url.is_none());
}

#[test]
fn test_nested_layer_styles_stay_with_their_layer() {
    let doc = Document::parse(
        "<WMS_Capabilities><Capability>
           <Layer><Name>parent</Name><CRS>EPSG:3857</CRS>
             <Layer><Name>child</Name>
               <Style><Name>child-style</Name></Style>
             </Layer>
           </Layer>
         </Capability></WMS_Capabilities>",
    )
    .unwrap();
    let layers = extract_layers(&doc);
    let parent = layers.iter().find(|l| l.name == "parent").unwrap();
    assert!(parent.styles.is_empty());
    let child = layers.iter().find(|l| l.name == "child").unwrap();
    assert_eq!(child.styles[0].name, "child-style");
}

// ============================================================================
// Pipeline errors
// ============================================================================

#[test]
fn test_service_exception_message() {
    let err = parse_wms_capabilities(
        r#"<ServiceException code="AccessDenied">Not allowed</ServiceException>"#,
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Service Exception (AccessDenied): Not allowed"
    );
    assert!(matches!(err, CapabilitiesError::ServiceException(_)));
}

#[test]
fn test_exception_takes_precedence_over_layers() {
    // Valid-looking layers after the exception must not be extracted.
    let err = parse_wms_capabilities(
        r#"<Root>
             <ServiceException code="Busy">try later</ServiceException>
             <Service><Name>WMS</Name><Title>T</Title></Service>
             <Layer><Name>a</Name><CRS>EPSG:3857</CRS></Layer>
           </Root>"#,
    )
    .unwrap_err();
    assert!(matches!(err, CapabilitiesError::ServiceException(_)));
}

#[test]
fn test_malformed_xml() {
    let err = parse_wms_capabilities("<Layer><Name>X</Layer").unwrap_err();
    assert!(matches!(err, CapabilitiesError::MalformedXml(_)));
}

#[test]
fn test_missing_service_info() {
    let err = parse_wms_capabilities(
        "<WMS_Capabilities><Capability><Layer><Name>a</Name><CRS>EPSG:3857</CRS></Layer></Capability></WMS_Capabilities>",
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "No service information found in the XML document"
    );
}

#[test]
fn test_no_mercator_layers() {
    let err = parse_wms_capabilities(
        "<WMS_Capabilities><Service><Name>WMS</Name><Title>T</Title></Service>
         <Capability><Layer><Name>a</Name><CRS>EPSG:4326</CRS></Layer></Capability>
         </WMS_Capabilities>",
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "No layers with EPSG:3857 projection found");
}

#[test]
fn test_extractors_are_usable_standalone() {
    let doc = Document::parse(WMS_DOC).unwrap();
    assert!(extract_service_info(&doc).is_some());
    assert_eq!(extract_layers(&doc).len(), 4);
}
