//! # wsbind
//!
//! Schema-driven XML data binding for SOAP object APIs.
//!
//! Generated entity types describe each of their fields with a
//! [`FieldDef`](descriptor::FieldDef); this crate turns those definitions into
//! shared descriptors and moves entities to and from namespace-qualified XML
//! with exact wire compatibility: element order follows the schema, unset
//! fields are omitted, repeated fields become sibling elements and subtypes
//! travel with an `xsi:type` hint.
//!
//! ## Architecture
//!
//! - **Descriptors** ([`descriptor`], [`cache`]): immutable per-field
//!   metadata, built once per `(type, field)` and shared process-wide.
//! - **Schemas** ([`TypeSchema`]): a type's name, base and ordered field
//!   list, base fields first.
//! - **Registry** ([`TypeRegistry`]): wire type names to entity factories and
//!   schema simple types, filled at startup.
//! - **Streams** ([`xml`]): a lookahead reader and a prefix-managing writer
//!   on top of `quick-xml`.
//! - **Mapper** ([`TypeMapper`]): presence, cardinality and polymorphism
//!   handling for every field an entity reads or writes.
//! - **Entities** ([`Bindable`]): the contract generated types implement.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::{Arc, LazyLock};
//! use wsbind::descriptor::{FieldDef, TypeName};
//! use wsbind::xml::{XmlInputStream, XmlOutputStream};
//! use wsbind::{Bindable, Result, Slot, TypeMapper, TypeRegistry, TypeSchema};
//!
//! const NS: &str = "urn:sobject.tooling.soap.sforce.com";
//! const SCORE: FieldDef = FieldDef::element(NS, "Score");
//!
//! static CHECK: LazyLock<TypeSchema> =
//!     LazyLock::new(|| TypeSchema::new(TypeName::new(NS, "HealthCheck"), &[SCORE]));
//!
//! #[derive(Debug, Clone, Default, PartialEq)]
//! struct HealthCheck {
//!     score: Slot<String>,
//! }
//!
//! impl Bindable for HealthCheck {
//!     fn schema(&self) -> &'static TypeSchema {
//!         &CHECK
//!     }
//!
//!     fn read_fields(&mut self, input: &mut XmlInputStream<'_>, mapper: &TypeMapper) -> Result<()> {
//!         mapper.read_slot(input, &CHECK.describe(&SCORE), &mut self.score)
//!     }
//!
//!     fn write_fields(&self, output: &mut XmlOutputStream<'_>, mapper: &TypeMapper) -> Result<()> {
//!         mapper.write_slot(output, &CHECK.describe(&SCORE), &self.score)
//!     }
//! }
//!
//! let mut registry = TypeRegistry::new();
//! registry.register::<HealthCheck>();
//! let mapper = TypeMapper::new(Arc::new(registry));
//!
//! let check = HealthCheck { score: Slot::new("87.5".to_string()) };
//! let xml = wsbind::to_xml_string(&check, &mapper)?;
//! assert!(xml.ends_with("<ns1:Score>87.5</ns1:Score></ns1:HealthCheck>"));
//!
//! let back: HealthCheck = wsbind::from_xml_str(&xml, &mapper)?;
//! assert_eq!(back, check);
//! # Ok::<(), wsbind::BindError>(())
//! ```

pub mod cache;
pub mod config;
pub mod descriptor;
pub mod document;
pub mod entity;
pub mod error;
pub mod mapper;
pub mod registry;
pub mod schema;
pub mod value;
pub mod xml;

pub use config::{BindConfig, ReaderConfig, WriterConfig};
pub use document::{
    from_xml_reader, from_xml_slice, from_xml_str, to_xml_string, to_xml_vec, to_xml_writer,
};
pub use entity::{Bindable, EntityAny};
pub use error::{BindError, Result};
pub use mapper::TypeMapper;
pub use registry::{TypeEntry, TypeRegistry};
pub use schema::TypeSchema;
pub use value::{Enumeration, FieldValue, Value, ValueRef};

pub use wsbind_support::{Base64Binary, Scalar, ScalarKind, ScalarRef, Slot};
