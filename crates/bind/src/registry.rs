//! Type registry: resolves wire type names to constructors or simple types.
//!
//! The registry is filled once at startup and then shared read-only by every
//! [`TypeMapper`](crate::TypeMapper). XSD built-in types are always known and
//! never need registering.

use std::collections::HashMap;

use wsbind_support::ScalarKind;
use wsbind_support::xsd::{ANY_TYPE, is_xsd};

use crate::descriptor::TypeName;
use crate::entity::Bindable;
use crate::error::{BindError, Result};
use crate::schema::TypeSchema;

/// Creates a blank (all slots unset) entity.
pub type Factory = fn() -> Box<dyn Bindable>;

/// A registered complex type.
#[derive(Debug, Clone, Copy)]
pub struct ComplexType {
    pub schema: &'static TypeSchema,
    pub factory: Factory,
}

/// What a type name resolves to.
#[derive(Debug, Clone, Copy)]
pub enum TypeEntry {
    /// A leaf type held as the given scalar.
    Simple(ScalarKind),
    /// An entity type.
    Complex(ComplexType),
    /// `xsd:anyType`: the wire decides between leaf and entity.
    Any,
}

fn new_boxed<T: Bindable + Default>() -> Box<dyn Bindable> {
    Box::new(T::default())
}

/// Map of `(namespace, name)` to registered types.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: HashMap<String, HashMap<String, TypeEntry>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an entity type under the name in its schema.
    pub fn register<T: Bindable + Default>(&mut self) -> &mut Self {
        let schema = T::default().schema();
        self.register_factory(schema, new_boxed::<T>)
    }

    pub fn register_factory(&mut self, schema: &'static TypeSchema, factory: Factory) -> &mut Self {
        let type_name = schema.type_name();
        tracing::debug!(type_name = %type_name, "registered complex type");
        self.insert(type_name, TypeEntry::Complex(ComplexType { schema, factory }))
    }

    /// Registers a schema simple type (an enumeration or a restricted string
    /// such as an ID) held as `kind`.
    pub fn register_simple(&mut self, type_name: TypeName, kind: ScalarKind) -> &mut Self {
        tracing::debug!(type_name = %type_name, kind = %kind, "registered simple type");
        self.insert(type_name, TypeEntry::Simple(kind))
    }

    fn insert(&mut self, type_name: TypeName, entry: TypeEntry) -> &mut Self {
        self.types
            .entry(type_name.namespace.to_string())
            .or_default()
            .insert(type_name.name.to_string(), entry);
        self
    }

    /// Resolves a type name, including the XSD built-ins.
    pub fn lookup(&self, namespace: &str, name: &str) -> Option<TypeEntry> {
        if is_xsd(namespace) {
            if name == ANY_TYPE {
                return Some(TypeEntry::Any);
            }
            if let Some(kind) = ScalarKind::from_xsd_name(name) {
                return Some(TypeEntry::Simple(kind));
            }
        }
        self.types.get(namespace)?.get(name).copied()
    }

    /// Like [`lookup`](Self::lookup), failing with `UnknownType`.
    pub fn resolve(&self, namespace: &str, name: &str) -> Result<TypeEntry> {
        self.lookup(namespace, name)
            .ok_or_else(|| BindError::unknown_type(namespace, name))
    }

    /// Constructs a blank entity of a registered complex type.
    pub fn create(&self, namespace: &str, name: &str) -> Result<Box<dyn Bindable>> {
        match self.resolve(namespace, name)? {
            TypeEntry::Complex(complex) => Ok((complex.factory)()),
            _ => Err(BindError::unknown_type(namespace, name)),
        }
    }

    pub fn contains(&self, namespace: &str, name: &str) -> bool {
        self.types
            .get(namespace)
            .is_some_and(|names| names.contains_key(name))
    }

    /// Number of registered (non built-in) types.
    pub fn len(&self) -> usize {
        self.types.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
