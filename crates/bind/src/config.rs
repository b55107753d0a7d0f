//! Reader and writer configuration.
//!
//! Both halves deserialize with `serde`, so an application can keep them in
//! whatever configuration file it already loads.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `reader.trim_text` | `false` | Trim string leaves before conversion |
//! | `reader.strict_namespaces` | `true` | Match elements on namespace and local name |
//! | `reader.check_type_derivation` | `true` | Reject type hints not derived from the declared type |
//! | `writer.xml_declaration` | `true` | Emit `<?xml version="1.0" encoding="UTF-8"?>` |
//! | `writer.indent` | none | Indentation width; compact output when unset |
//! | `writer.prefixes` | `xsi`, `xsd` | Preferred prefix per namespace URI |
//!
//! # Example
//!
//! ```rust
//! use wsbind::config::{BindConfig, WriterConfig};
//!
//! let config = BindConfig {
//!     writer: WriterConfig {
//!         indent: Some(2),
//!         ..Default::default()
//!     }
//!     .with_prefix("urn:sobject.tooling.soap.sforce.com", "sf"),
//!     ..Default::default()
//! };
//! assert_eq!(config.writer.prefix_for("urn:sobject.tooling.soap.sforce.com"), Some("sf"));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use wsbind_support::xsd::{XSD_NAMESPACE, XSI_NAMESPACE};

/// Combined configuration handed to a [`TypeMapper`](crate::TypeMapper).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindConfig {
    pub reader: ReaderConfig,
    pub writer: WriterConfig,
}

/// Options for [`XmlInputStream`](crate::xml::XmlInputStream) and the read path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Trim leading and trailing whitespace of string leaves.
    pub trim_text: bool,

    /// Compare element namespaces when matching descriptors. When false,
    /// only local names are compared.
    pub strict_namespaces: bool,

    /// Require a type hint to name the declared type or one derived from it.
    pub check_type_derivation: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            trim_text: false,
            strict_namespaces: true,
            check_type_derivation: true,
        }
    }
}

/// Options for [`XmlOutputStream`](crate::xml::XmlOutputStream).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Emit the XML declaration before the root element.
    pub xml_declaration: bool,

    /// Indentation width in spaces.
    pub indent: Option<usize>,

    /// Preferred prefix keyed by namespace URI.
    pub prefixes: BTreeMap<String, String>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        let mut prefixes = BTreeMap::new();
        prefixes.insert(XSI_NAMESPACE.to_string(), "xsi".to_string());
        prefixes.insert(XSD_NAMESPACE.to_string(), "xsd".to_string());
        Self {
            xml_declaration: true,
            indent: None,
            prefixes,
        }
    }
}

impl WriterConfig {
    /// Adds or replaces the preferred prefix for `namespace`.
    pub fn with_prefix(mut self, namespace: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.prefixes.insert(namespace.into(), prefix.into());
        self
    }

    pub fn prefix_for(&self, namespace: &str) -> Option<&str> {
        self.prefixes.get(namespace).map(String::as_str)
    }
}
