//! Per-type schema: the ordered field list a bindable type serializes.
//!
//! A derived type's field list is its base's list followed by its own
//! declarations, computed once when the schema is built. Generated entities
//! keep their schema in a `static` and hand it out from
//! [`Bindable::schema`](crate::Bindable::schema):
//!
//! ```rust
//! use std::sync::LazyLock;
//! use wsbind::descriptor::{FieldDef, TypeName};
//! use wsbind::TypeSchema;
//!
//! const NS: &str = "urn:sobject.tooling.soap.sforce.com";
//!
//! static SOBJECT: LazyLock<TypeSchema> = LazyLock::new(|| {
//!     TypeSchema::new(
//!         TypeName::new(NS, "sObject"),
//!         &[FieldDef::element(NS, "fieldsToNull").repeated(), FieldDef::element(NS, "Id")],
//!     )
//! });
//!
//! static CHECK: LazyLock<TypeSchema> = LazyLock::new(|| {
//!     TypeSchema::extends(
//!         TypeName::new(NS, "SecurityHealthCheck"),
//!         &SOBJECT,
//!         &[FieldDef::element(NS, "Score")],
//!     )
//! });
//!
//! let names: Vec<_> = CHECK.fields().iter().map(|f| f.name()).collect();
//! assert_eq!(names, ["fieldsToNull", "Id", "Score"]);
//! assert!(CHECK.is_subtype_of(SOBJECT.type_name()));
//! ```

use std::sync::Arc;

use crate::cache::DescriptorCache;
use crate::descriptor::{FieldDef, FieldDescriptor, MaxOccurs, TypeName};

/// The qualified name, base and ordered fields of one complex type.
#[derive(Debug)]
pub struct TypeSchema {
    type_name: TypeName,
    base: Option<&'static TypeSchema>,
    own_fields: Vec<Arc<FieldDescriptor>>,
    fields: Vec<Arc<FieldDescriptor>>,
}

impl TypeSchema {
    /// A root type with no base.
    pub fn new(type_name: TypeName, defs: &[FieldDef]) -> Self {
        Self::build(type_name, None, defs)
    }

    /// A type extending `base`; base fields serialize first.
    pub fn extends(type_name: TypeName, base: &'static TypeSchema, defs: &[FieldDef]) -> Self {
        Self::build(type_name, Some(base), defs)
    }

    fn build(type_name: TypeName, base: Option<&'static TypeSchema>, defs: &[FieldDef]) -> Self {
        let cache = DescriptorCache::global();
        let own_fields: Vec<_> = defs
            .iter()
            .map(|def| cache.describe_def(type_name, def))
            .collect();

        let mut fields = base.map(|b| b.fields.clone()).unwrap_or_default();
        fields.extend(own_fields.iter().cloned());

        tracing::debug!(
            type_name = %type_name,
            base = ?base.map(|b| b.type_name),
            fields = fields.len(),
            "built type schema"
        );

        TypeSchema {
            type_name,
            base,
            own_fields,
            fields,
        }
    }

    pub fn type_name(&self) -> TypeName {
        self.type_name
    }

    pub fn base(&self) -> Option<&'static TypeSchema> {
        self.base
    }

    /// All fields in wire order, inherited ones first.
    pub fn fields(&self) -> &[Arc<FieldDescriptor>] {
        &self.fields
    }

    /// Fields declared by this type itself, in declaration order.
    pub fn own_fields(&self) -> &[Arc<FieldDescriptor>] {
        &self.own_fields
    }

    /// Finds a field (own or inherited) by element local name.
    pub fn field(&self, name: &str) -> Option<&Arc<FieldDescriptor>> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// The cached descriptor for one of this type's own field definitions.
    pub fn describe(&self, def: &FieldDef) -> Arc<FieldDescriptor> {
        DescriptorCache::global().describe_def(self.type_name, def)
    }

    /// True if this type is `other` or extends it, directly or transitively.
    pub fn is_subtype_of(&self, other: TypeName) -> bool {
        let mut current = Some(self);
        while let Some(schema) = current {
            if schema.type_name == other {
                return true;
            }
            current = schema.base;
        }
        false
    }

    /// Descriptor for a document whose root element is named after the type.
    pub fn root_descriptor(&self) -> FieldDescriptor {
        FieldDescriptor::new(
            self.type_name.namespace,
            self.type_name.name,
            self.type_name,
            1,
            MaxOccurs::One,
            true,
        )
    }
}
