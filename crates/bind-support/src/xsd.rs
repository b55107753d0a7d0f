//! Well-known namespace URIs.

/// XML Schema namespace; built-in simple types live here.
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// XML Schema instance namespace, home of the `type` and `nil` attributes.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Namespace permanently bound to the `xml` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Name of the polymorphic type hint attribute in [`XSI_NAMESPACE`].
pub const TYPE_ATTRIBUTE: &str = "type";

/// Name of the nil marker attribute in [`XSI_NAMESPACE`].
pub const NIL_ATTRIBUTE: &str = "nil";

/// The XSD `anyType` name, which accepts any simple or complex content.
pub const ANY_TYPE: &str = "anyType";

/// Returns true if `namespace` is the XML Schema namespace.
pub fn is_xsd(namespace: &str) -> bool {
    namespace == XSD_NAMESPACE
}
