//! Namespace prefix scopes shared by the reader and the writer.

use std::fmt;

use wsbind_support::xsd::XML_NAMESPACE;

/// A namespace-resolved element or type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct QName {
    pub namespace: String,
    pub local_name: String,
}

impl QName {
    pub fn new(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        QName {
            namespace: namespace.into(),
            local_name: local_name.into(),
        }
    }

    pub fn matches(&self, namespace: &str, local_name: &str) -> bool {
        self.namespace == namespace && self.local_name == local_name
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            f.write_str(&self.local_name)
        } else {
            write!(f, "{{{}}}{}", self.namespace, self.local_name)
        }
    }
}

/// Splits `prefix:local` into its parts; an unprefixed name has prefix `""`.
pub(crate) fn split_qname(raw: &str) -> (&str, &str) {
    match raw.split_once(':') {
        Some((prefix, local)) => (prefix, local),
        None => ("", raw),
    }
}

#[derive(Debug)]
struct Binding {
    prefix: String,
    namespace: String,
}

/// Prefix bindings of the currently open elements, innermost last.
///
/// The empty prefix stands for the default namespace.
#[derive(Debug, Default)]
pub(crate) struct NamespaceScopes {
    frames: Vec<Vec<Binding>>,
}

impl NamespaceScopes {
    pub(crate) fn push(&mut self) {
        self.frames.push(Vec::new());
    }

    pub(crate) fn pop(&mut self) {
        self.frames.pop();
    }

    /// Binds `prefix` in the innermost open scope.
    pub(crate) fn declare(&mut self, prefix: &str, namespace: &str) {
        if let Some(frame) = self.frames.last_mut() {
            frame.push(Binding {
                prefix: prefix.to_string(),
                namespace: namespace.to_string(),
            });
        }
    }

    fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.frames.iter().rev().flat_map(|frame| frame.iter().rev())
    }

    /// The namespace `prefix` currently stands for.
    pub(crate) fn namespace_of(&self, prefix: &str) -> Option<&str> {
        if prefix == "xml" {
            return Some(XML_NAMESPACE);
        }
        match self.bindings().find(|b| b.prefix == prefix) {
            Some(binding) => Some(&binding.namespace),
            None if prefix.is_empty() => Some(""),
            None => None,
        }
    }

    /// A non-empty prefix currently bound to `namespace` and not shadowed.
    pub(crate) fn prefix_of(&self, namespace: &str) -> Option<&str> {
        self.bindings()
            .filter(|b| !b.prefix.is_empty() && b.namespace == namespace)
            .map(|b| b.prefix.as_str())
            .find(|prefix| self.namespace_of(prefix) == Some(namespace))
    }

    pub(crate) fn is_bound(&self, prefix: &str) -> bool {
        self.bindings().any(|b| b.prefix == prefix)
    }
}
