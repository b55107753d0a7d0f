//! Field descriptors: the schema metadata for one element.

use std::fmt;

use wsbind_support::xsd::{XSD_NAMESPACE, is_xsd};

/// Upper occurrence bound of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaxOccurs {
    One,
    Unbounded,
}

/// A namespace-qualified schema type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName {
    pub namespace: &'static str,
    pub name: &'static str,
}

impl TypeName {
    pub const fn new(namespace: &'static str, name: &'static str) -> Self {
        TypeName { namespace, name }
    }

    pub fn matches(&self, namespace: &str, name: &str) -> bool {
        self.namespace == namespace && self.name == name
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}{}", self.namespace, self.name)
    }
}

/// Immutable metadata for one schema element.
///
/// Descriptors are assembled once per `(owner type, field)` by the
/// [`DescriptorCache`](crate::cache::DescriptorCache) and shared afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    namespace: &'static str,
    name: &'static str,
    type_name: TypeName,
    min_occurs: u32,
    max_occurs: MaxOccurs,
    qualified: bool,
}

impl FieldDescriptor {
    pub const fn new(
        namespace: &'static str,
        name: &'static str,
        type_name: TypeName,
        min_occurs: u32,
        max_occurs: MaxOccurs,
        qualified: bool,
    ) -> Self {
        FieldDescriptor {
            namespace,
            name,
            type_name,
            min_occurs,
            max_occurs,
            qualified,
        }
    }

    /// The schema namespace of the element, whether or not it is qualified.
    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    /// The element's local name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The namespace the element appears in on the wire: its schema
    /// namespace when qualified, the empty namespace otherwise.
    pub fn element_namespace(&self) -> &'static str {
        if self.qualified { self.namespace } else { "" }
    }

    pub fn type_name(&self) -> TypeName {
        self.type_name
    }

    pub fn min_occurs(&self) -> u32 {
        self.min_occurs
    }

    pub fn max_occurs(&self) -> MaxOccurs {
        self.max_occurs
    }

    pub fn is_qualified(&self) -> bool {
        self.qualified
    }

    pub fn is_optional(&self) -> bool {
        self.min_occurs == 0
    }

    pub fn is_repeated(&self) -> bool {
        self.max_occurs == MaxOccurs::Unbounded
    }

    /// True when the declared type is a built-in XSD type.
    pub fn is_xsd_type(&self) -> bool {
        is_xsd(self.type_name.namespace)
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max = match self.max_occurs {
            MaxOccurs::One => "1".to_string(),
            MaxOccurs::Unbounded => "unbounded".to_string(),
        };
        write!(
            f,
            "{{{}}}{} : {} [{}..{}]",
            self.element_namespace(),
            self.name,
            self.type_name,
            self.min_occurs,
            max
        )
    }
}

/// Static field definition as emitted by generated entity code.
///
/// `FieldDef` values are `const`, so generated types declare their fields as
/// constants and hand them to [`TypeSchema`](crate::TypeSchema), which turns
/// them into cached [`FieldDescriptor`]s.
///
/// ```rust
/// use wsbind::descriptor::{FieldDef, MaxOccurs};
/// use wsbind_support::xsd::XSD_NAMESPACE;
///
/// const NS: &str = "urn:sobject.tooling.soap.sforce.com";
/// const FIELDS_TO_NULL: FieldDef = FieldDef::element(NS, "fieldsToNull").repeated();
/// const HIGH_RISK_COUNT: FieldDef = FieldDef::element(NS, "HighRiskCount").of_type(XSD_NAMESPACE, "int");
///
/// assert_eq!(FIELDS_TO_NULL.max_occurs, MaxOccurs::Unbounded);
/// assert_eq!(HIGH_RISK_COUNT.type_name.name, "int");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub field: &'static str,
    pub namespace: &'static str,
    pub name: &'static str,
    pub type_name: TypeName,
    pub min_occurs: u32,
    pub max_occurs: MaxOccurs,
    pub qualified: bool,
}

impl FieldDef {
    /// An optional, single, qualified `xsd:string` element named `name`.
    pub const fn element(namespace: &'static str, name: &'static str) -> Self {
        FieldDef {
            field: name,
            namespace,
            name,
            type_name: TypeName::new(XSD_NAMESPACE, "string"),
            min_occurs: 0,
            max_occurs: MaxOccurs::One,
            qualified: true,
        }
    }

    pub const fn of_type(self, namespace: &'static str, name: &'static str) -> Self {
        FieldDef {
            type_name: TypeName::new(namespace, name),
            ..self
        }
    }

    /// Uses a field key different from the element name.
    pub const fn field(self, field: &'static str) -> Self {
        FieldDef { field, ..self }
    }

    pub const fn required(self) -> Self {
        FieldDef {
            min_occurs: 1,
            ..self
        }
    }

    pub const fn repeated(self) -> Self {
        FieldDef {
            max_occurs: MaxOccurs::Unbounded,
            ..self
        }
    }

    pub const fn unqualified(self) -> Self {
        FieldDef {
            qualified: false,
            ..self
        }
    }

    pub const fn to_descriptor(&self) -> FieldDescriptor {
        FieldDescriptor::new(
            self.namespace,
            self.name,
            self.type_name,
            self.min_occurs,
            self.max_occurs,
            self.qualified,
        )
    }
}
