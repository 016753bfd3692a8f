//! Service-level exception detection.
//!
//! A syntactically valid capabilities response can be nothing but an error
//! payload from the remote service. Detection runs before any structural
//! extraction and short-circuits the pipeline on a match.

use ogc_common::ParsedError;

use crate::dom::{element_text, Document, Element};

/// Which exception container matched. Determines the message prefix each
/// pipeline renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionDialect {
    /// Legacy `ServiceException` with a `code` attribute.
    ServiceException,
    /// OWS `ows:Exception` with `exceptionCode` and `ows:ExceptionText`.
    OwsException,
    /// `ExceptionReport` wrapping one or more `Exception` children.
    ExceptionReport,
}

/// An embedded service error extracted from an otherwise well-formed
/// document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedException {
    pub dialect: ExceptionDialect,
    pub code: Option<String>,
    pub message: String,
}

impl DetectedException {
    /// Message in the form the WMS pipeline surfaces, e.g.
    /// `Service Exception (AccessDenied): Not allowed`.
    pub fn wms_message(&self) -> String {
        match &self.code {
            Some(code) => format!("Service Exception ({}): {}", code, self.message),
            None => format!("Service Exception: {}", self.message),
        }
    }

    /// Message in the form the WFS pipeline surfaces. Empty text degrades
    /// to `Unknown error`.
    pub fn wfs_message(&self) -> String {
        let prefix = match self.dialect {
            ExceptionDialect::ServiceException => "WFS Service Exception",
            _ => "WFS Exception",
        };
        let message = if self.message.is_empty() {
            "Unknown error"
        } else {
            &self.message
        };
        match &self.code {
            Some(code) => format!("{prefix} ({code}): {message}"),
            None => format!("{prefix}: {message}"),
        }
    }

    /// Diagnostic record form for embedding in an output model.
    pub fn to_parsed_error(&self) -> ParsedError {
        ParsedError::new(
            self.code.clone().unwrap_or_else(|| "NoApplicableCode".to_string()),
            self.message.clone(),
        )
    }
}

/// Scan a parsed document for an embedded service error.
///
/// Checks the three dialects in order and returns the first match:
/// 1. legacy `ServiceException`;
/// 2. standalone OWS `ows:Exception` (not wrapped in a report);
/// 3. `ExceptionReport` / `ows:ExceptionReport` (only the first wrapped
///    exception is reported).
pub fn detect_exception(doc: &Document) -> Option<DetectedException> {
    if let Some(el) = doc.first_by_tag("ServiceException") {
        return Some(DetectedException {
            dialect: ExceptionDialect::ServiceException,
            code: attr_non_empty(el, "code"),
            message: el.text(),
        });
    }

    // Standalone only: an ows:Exception wrapped in a report belongs to the
    // report dialect below.
    for el in doc.elements_by_tag("ows:Exception") {
        if inside_exception_report(el) {
            continue;
        }
        return Some(DetectedException {
            dialect: ExceptionDialect::OwsException,
            code: attr_non_empty(el, "exceptionCode"),
            message: element_text(el, "ows:ExceptionText"),
        });
    }

    let report = doc
        .first_by_tag("ExceptionReport")
        .or_else(|| doc.first_by_tag("ows:ExceptionReport"))?;
    let exception = report
        .first("Exception")
        .or_else(|| report.first("ows:Exception"))?;
    let message = {
        let text = element_text(exception, "ExceptionText");
        if text.is_empty() {
            element_text(exception, "ows:ExceptionText")
        } else {
            text
        }
    };
    Some(DetectedException {
        dialect: ExceptionDialect::ExceptionReport,
        code: attr_non_empty(exception, "exceptionCode"),
        message,
    })
}

/// Whether the document has a `WFS_Capabilities` (or `wfs:WFS_Capabilities`)
/// element. The WFS pipeline rejects documents that don't.
pub fn is_wfs_capabilities_document(doc: &Document) -> bool {
    doc.first_by_tag("WFS_Capabilities").is_some()
        || doc.first_by_tag("wfs:WFS_Capabilities").is_some()
}

fn inside_exception_report(el: Element<'_>) -> bool {
    let mut ancestor = el.parent();
    while let Some(e) = ancestor {
        if e.tag() == "ExceptionReport" || e.tag() == "ows:ExceptionReport" {
            return true;
        }
        ancestor = e.parent();
    }
    false
}

fn attr_non_empty(el: Element<'_>, name: &str) -> Option<String> {
    el.attr(name)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_service_exception() {
        let doc = Document::parse(
            r#"<ServiceException code="AccessDenied">Not allowed</ServiceException>"#,
        )
        .unwrap();
        let exc = detect_exception(&doc).unwrap();
        assert_eq!(exc.dialect, ExceptionDialect::ServiceException);
        assert_eq!(exc.wms_message(), "Service Exception (AccessDenied): Not allowed");
        assert_eq!(
            exc.wfs_message(),
            "WFS Service Exception (AccessDenied): Not allowed"
        );
    }

    #[test]
    fn test_legacy_service_exception_without_code() {
        let doc =
            Document::parse("<ServiceException>Layer not defined</ServiceException>").unwrap();
        let exc = detect_exception(&doc).unwrap();
        assert_eq!(exc.code, None);
        assert_eq!(exc.wms_message(), "Service Exception: Layer not defined");
    }

    #[test]
    fn test_ows_exception() {
        let doc = Document::parse(
            r#"<ows:Exception exceptionCode="InvalidParameterValue">
                 <ows:ExceptionText>Bad TYPENAME</ows:ExceptionText>
               </ows:Exception>"#,
        )
        .unwrap();
        let exc = detect_exception(&doc).unwrap();
        assert_eq!(exc.dialect, ExceptionDialect::OwsException);
        assert_eq!(
            exc.wfs_message(),
            "WFS Exception (InvalidParameterValue): Bad TYPENAME"
        );
    }

    #[test]
    fn test_exception_report_first_only() {
        let doc = Document::parse(
            r#"<ows:ExceptionReport>
                 <ows:Exception exceptionCode="OperationNotSupported">
                   <ows:ExceptionText>GetGmlObject is not supported</ows:ExceptionText>
                 </ows:Exception>
                 <ows:Exception exceptionCode="MissingParameterValue">
                   <ows:ExceptionText>service</ows:ExceptionText>
                 </ows:Exception>
               </ows:ExceptionReport>"#,
        )
        .unwrap();
        let exc = detect_exception(&doc).unwrap();
        assert_eq!(exc.dialect, ExceptionDialect::ExceptionReport);
        assert_eq!(
            exc.wfs_message(),
            "WFS Exception (OperationNotSupported): GetGmlObject is not supported"
        );
    }

    #[test]
    fn test_wrapped_ows_exception_belongs_to_report_dialect() {
        // The wrapped ows:Exception must not be picked up by the standalone
        // check even when the report is nested below the document root.
        let doc = Document::parse(
            r#"<wfs:WFS_Capabilities>
                 <ows:ExceptionReport>
                   <ows:Exception exceptionCode="OperationProcessingFailed">
                     <ows:ExceptionText>backing store offline</ows:ExceptionText>
                   </ows:Exception>
                 </ows:ExceptionReport>
               </wfs:WFS_Capabilities>"#,
        )
        .unwrap();
        let exc = detect_exception(&doc).unwrap();
        assert_eq!(exc.dialect, ExceptionDialect::ExceptionReport);
        assert_eq!(exc.code.as_deref(), Some("OperationProcessingFailed"));
    }

    #[test]
    fn test_exception_report_without_children() {
        let doc = Document::parse("<ExceptionReport></ExceptionReport>").unwrap();
        assert!(detect_exception(&doc).is_none());
    }

    #[test]
    fn test_empty_text_falls_back_to_unknown_error() {
        let doc = Document::parse(
            r#"<ows:Exception exceptionCode="NoApplicableCode"></ows:Exception>"#,
        )
        .unwrap();
        let exc = detect_exception(&doc).unwrap();
        assert_eq!(exc.wfs_message(), "WFS Exception (NoApplicableCode): Unknown error");
    }

    #[test]
    fn test_service_exception_checked_first() {
        let doc = Document::parse(
            r#"<Root>
                 <ServiceException code="A">legacy</ServiceException>
                 <ows:Exception exceptionCode="B"><ows:ExceptionText>ows</ows:ExceptionText></ows:Exception>
               </Root>"#,
        )
        .unwrap();
        let exc = detect_exception(&doc).unwrap();
        assert_eq!(exc.dialect, ExceptionDialect::ServiceException);
    }

    #[test]
    fn test_no_exception() {
        let doc = Document::parse("<WMS_Capabilities><Service/></WMS_Capabilities>").unwrap();
        assert!(detect_exception(&doc).is_none());
    }

    #[test]
    fn test_is_wfs_capabilities_document() {
        let doc = Document::parse("<wfs:WFS_Capabilities version=\"2.0.0\"/>").unwrap();
        assert!(is_wfs_capabilities_document(&doc));

        let doc = Document::parse("<WFS_Capabilities/>").unwrap();
        assert!(is_wfs_capabilities_document(&doc));

        let doc = Document::parse("<WMS_Capabilities/>").unwrap();
        assert!(!is_wfs_capabilities_document(&doc));
    }

    #[test]
    fn test_to_parsed_error_defaults_code() {
        let doc = Document::parse("<ServiceException>oops</ServiceException>").unwrap();
        let parsed = detect_exception(&doc).unwrap().to_parsed_error();
        assert_eq!(parsed.code, "NoApplicableCode");
        assert_eq!(parsed.message, "oops");
    }
}
