//! The type mapper: descriptor-driven dispatch between streams and values.
//!
//! Entities call [`TypeMapper::read_slot`] and [`TypeMapper::write_slot`]
//! once per field, in schema order. The mapper decides presence from the
//! lookahead tag, expands repeated fields, resolves `xsi:type` hints through
//! the [`TypeRegistry`] and recurses into nested entities.
//!
//! ## Read rules
//!
//! | Next tag | Field | Result |
//! |----------|-------|--------|
//! | does not match | optional | `None`, nothing consumed |
//! | does not match | required | `MalformedDocument` |
//! | matches, `xsi:nil="true"` | any | element skipped, treated as absent |
//! | matches | simple type | text converted per the declared type |
//! | matches | complex type | entity from the type hint, else the declared type |
//!
//! A repeated field reads matching siblings until the next tag differs and
//! always yields a sequence, possibly empty.
//!
//! ## Write rules
//!
//! An unset slot writes nothing. A repeated field writes one element per
//! item. An entity whose runtime type differs from the declared type gets an
//! `xsi:type` hint; so does a leaf stored in an `anyType` field.

use std::sync::Arc;

use wsbind_support::xsd::{ANY_TYPE, XSD_NAMESPACE};
use wsbind_support::{ScalarKind, Slot};

use crate::config::BindConfig;
use crate::descriptor::{FieldDescriptor, TypeName};
use crate::entity::Bindable;
use crate::error::{BindError, Result};
use crate::registry::{ComplexType, TypeEntry, TypeRegistry};
use crate::value::{FieldValue, Mismatch, Value, ValueRef};
use crate::xml::{QName, StartTag, Tag, XmlInputStream, XmlOutputStream};

enum Resolved {
    Scalar(ScalarKind),
    Object(ComplexType),
}

fn is_any_type(type_name: TypeName) -> bool {
    type_name.matches(XSD_NAMESPACE, ANY_TYPE)
}

fn expected_name(descriptor: &FieldDescriptor) -> QName {
    QName::new(descriptor.element_namespace(), descriptor.name())
}

fn matches_element(name: &QName, descriptor: &FieldDescriptor, strict_namespaces: bool) -> bool {
    name.local_name == descriptor.name()
        && (!strict_namespaces || name.namespace == descriptor.element_namespace())
}

fn describe_next(input: &mut XmlInputStream<'_>) -> String {
    match input.peek_tag() {
        Ok(Tag::Start(tag)) => format!("<{}>", tag.name),
        Ok(Tag::End(name)) => format!("</{name}>"),
        Ok(Tag::Eof) => "end of document".to_string(),
        Err(_) => "unreadable content".to_string(),
    }
}

fn not_derived(descriptor: &FieldDescriptor, hint: &QName) -> BindError {
    BindError::malformed(format!(
        "<{}> is declared as {} but carries type hint {hint}",
        descriptor.name(),
        descriptor.type_name()
    ))
}

/// Turns a value the field type refused into the matching error.
pub(crate) fn mismatch_error(descriptor: &FieldDescriptor, mismatch: Mismatch) -> BindError {
    let element = descriptor.name().to_string();
    let type_name = descriptor.type_name().name.to_string();
    match mismatch {
        Mismatch::Scalar { kind, text } => BindError::TypeConversion {
            element,
            type_name,
            text,
            reason: format!("an xsd:{kind} value does not fit this field"),
        },
        Mismatch::Literal(text) => BindError::TypeConversion {
            element,
            type_name,
            text,
            reason: "not a member of the enumeration".to_string(),
        },
        Mismatch::Object(found) => BindError::malformed(format!(
            "<{element}> holds {found}, which this field cannot store"
        )),
        Mismatch::List => BindError::malformed(format!(
            "<{element}> is a sequence but this field holds a single value"
        )),
    }
}

/// Reads and writes fields according to their descriptors.
///
/// A mapper is immutable and can be shared between threads; every traversal
/// brings its own stream.
#[derive(Debug, Clone)]
pub struct TypeMapper {
    registry: Arc<TypeRegistry>,
    config: BindConfig,
}

impl TypeMapper {
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self::with_config(registry, BindConfig::default())
    }

    pub fn with_config(registry: Arc<TypeRegistry>, config: BindConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn config(&self) -> &BindConfig {
        &self.config
    }

    /// True when the next tag is an occurrence of `descriptor`'s element.
    pub fn is_element(&self, input: &mut XmlInputStream<'_>, descriptor: &FieldDescriptor) -> Result<bool> {
        let strict = input.config().strict_namespaces;
        Ok(match input.peek_tag()? {
            Tag::Start(tag) => matches_element(&tag.name, descriptor, strict),
            _ => false,
        })
    }

    /// Reads one field. `None` means the element was absent (or nil).
    pub fn read_field(
        &self,
        input: &mut XmlInputStream<'_>,
        descriptor: &FieldDescriptor,
    ) -> Result<Option<Value>> {
        if descriptor.is_repeated() {
            return self.read_repeated(input, descriptor).map(Some);
        }

        if !self.is_element(input, descriptor)? {
            if descriptor.is_optional() {
                tracing::trace!(element = descriptor.name(), "optional element absent");
                return Ok(None);
            }
            return Err(BindError::malformed(format!(
                "expected <{}>, found {}",
                expected_name(descriptor),
                describe_next(input)
            )));
        }
        self.read_element(input, descriptor)
    }

    fn read_repeated(&self, input: &mut XmlInputStream<'_>, descriptor: &FieldDescriptor) -> Result<Value> {
        let mut items = Vec::new();
        let mut occurrences = 0usize;
        while self.is_element(input, descriptor)? {
            occurrences += 1;
            if let Some(item) = self.read_element(input, descriptor)? {
                items.push(item);
            }
        }

        if occurrences == 0 && !descriptor.is_optional() {
            return Err(BindError::malformed(format!(
                "expected at least one <{}>, found {}",
                expected_name(descriptor),
                describe_next(input)
            )));
        }
        tracing::trace!(element = descriptor.name(), count = items.len(), "read repeated element");
        Ok(Value::List(items))
    }

    fn read_element(
        &self,
        input: &mut XmlInputStream<'_>,
        descriptor: &FieldDescriptor,
    ) -> Result<Option<Value>> {
        let tag = input.consume_start_tag()?;
        if tag.nil {
            tracing::trace!(element = descriptor.name(), "nil element treated as absent");
            input.skip_element(&tag.name)?;
            return Ok(None);
        }

        let check_derivation = input.config().check_type_derivation;
        let value = match self.resolve(descriptor, &tag, check_derivation)? {
            Resolved::Scalar(kind) => Value::Scalar(input.read_scalar(descriptor, kind)?),
            Resolved::Object(complex) => {
                let mut entity = (complex.factory)();
                entity.read_fields(input, self)?;
                Value::Object(entity)
            }
        };
        input.consume_end_tag(&tag.name)?;
        Ok(Some(value))
    }

    /// Picks the representation of an element from its declared type and
    /// optional type hint.
    fn resolve(&self, descriptor: &FieldDescriptor, tag: &StartTag, check_derivation: bool) -> Result<Resolved> {
        let declared = descriptor.type_name();
        let hinted = match &tag.type_hint {
            Some(hint) => {
                let entry = self.registry.resolve(&hint.namespace, &hint.local_name)?;
                tracing::debug!(
                    element = descriptor.name(),
                    declared = %declared,
                    hint = %hint,
                    "resolved type hint"
                );
                Some((hint, entry))
            }
            None => None,
        };

        match self.registry.lookup(declared.namespace, declared.name) {
            Some(TypeEntry::Simple(kind)) => match hinted {
                Some((hint, TypeEntry::Complex(_))) if check_derivation => {
                    Err(not_derived(descriptor, hint))
                }
                _ => Ok(Resolved::Scalar(kind)),
            },
            Some(TypeEntry::Any) => Ok(match hinted {
                Some((_, TypeEntry::Simple(kind))) => Resolved::Scalar(kind),
                Some((_, TypeEntry::Complex(complex))) => Resolved::Object(complex),
                Some((_, TypeEntry::Any)) | None => Resolved::Scalar(ScalarKind::String),
            }),
            declared_entry => match hinted {
                Some((hint, TypeEntry::Complex(complex))) => {
                    if check_derivation && !complex.schema.is_subtype_of(declared) {
                        return Err(not_derived(descriptor, hint));
                    }
                    Ok(Resolved::Object(complex))
                }
                Some((hint, _)) if check_derivation => Err(not_derived(descriptor, hint)),
                _ => match declared_entry {
                    Some(TypeEntry::Complex(complex)) => Ok(Resolved::Object(complex)),
                    _ => Err(BindError::unknown_type(declared.namespace, declared.name)),
                },
            },
        }
    }

    /// Writes one field; `None` writes nothing.
    pub fn write_field(
        &self,
        output: &mut XmlOutputStream<'_>,
        descriptor: &FieldDescriptor,
        value: Option<ValueRef<'_>>,
    ) -> Result<()> {
        let Some(value) = value else {
            tracing::trace!(element = descriptor.name(), "unset slot omitted");
            return Ok(());
        };

        match value {
            ValueRef::List(items) => {
                tracing::trace!(element = descriptor.name(), count = items.len(), "writing repeated element");
                for item in items {
                    self.write_field(output, descriptor, Some(item))?;
                }
                Ok(())
            }
            ValueRef::Scalar(scalar) => {
                output.write_start_tag(descriptor.element_namespace(), descriptor.name())?;
                if is_any_type(descriptor.type_name()) {
                    output.write_type_hint(XSD_NAMESPACE, scalar.kind().xsd_name())?;
                }
                output.write_text(&scalar.to_lexical())?;
                output.write_end_tag()
            }
            ValueRef::Object(entity) => {
                output.write_start_tag(descriptor.element_namespace(), descriptor.name())?;
                let runtime = entity.schema().type_name();
                if runtime != descriptor.type_name() {
                    tracing::debug!(
                        element = descriptor.name(),
                        declared = %descriptor.type_name(),
                        runtime = %runtime,
                        "writing type hint"
                    );
                    output.write_type_hint(runtime.namespace, runtime.name)?;
                }
                entity.write_fields(output, self)?;
                output.write_end_tag()
            }
        }
    }

    /// Reads a field into a typed slot. An absent element leaves the slot
    /// untouched.
    pub fn read_slot<T: FieldValue>(
        &self,
        input: &mut XmlInputStream<'_>,
        descriptor: &FieldDescriptor,
        slot: &mut Slot<T>,
    ) -> Result<()> {
        if let Some(value) = self.read_field(input, descriptor)? {
            let value = T::from_value(value).map_err(|m| mismatch_error(descriptor, m))?;
            slot.set(value);
        }
        Ok(())
    }

    /// Writes a typed slot; an unset slot writes nothing.
    pub fn write_slot<T: FieldValue>(
        &self,
        output: &mut XmlOutputStream<'_>,
        descriptor: &FieldDescriptor,
        slot: &Slot<T>,
    ) -> Result<()> {
        self.write_field(output, descriptor, slot.get().map(|value| value.to_value()))
    }

    /// Reads a whole document whose root element is described by `root`.
    /// Anything but whitespace after the root element is an error.
    pub fn read_document<T: FieldValue>(
        &self,
        input: &mut XmlInputStream<'_>,
        root: &FieldDescriptor,
    ) -> Result<T> {
        let value = self.read_field(input, root)?.ok_or_else(|| {
            BindError::malformed(format!("document has no <{}> root element", expected_name(root)))
        })?;
        match input.peek_tag()? {
            Tag::Eof => {}
            Tag::Start(tag) => {
                return Err(BindError::malformed(format!(
                    "unexpected element <{}> after the root element",
                    tag.name
                )));
            }
            Tag::End(name) => {
                return Err(BindError::malformed(format!("unexpected </{name}> after the root element")));
            }
        }
        T::from_value(value).map_err(|m| mismatch_error(root, m))
    }

    /// Writes `value` as a whole document and flushes the stream.
    pub fn write_document<T: FieldValue>(
        &self,
        output: &mut XmlOutputStream<'_>,
        root: &FieldDescriptor,
        value: &T,
    ) -> Result<()> {
        self.write_field(output, root, Some(value.to_value()))?;
        output.finish()
    }

    /// Writes an entity as a whole document named by `root`.
    pub fn write_entity(
        &self,
        output: &mut XmlOutputStream<'_>,
        root: &FieldDescriptor,
        entity: &dyn Bindable,
    ) -> Result<()> {
        self.write_field(output, root, Some(ValueRef::Object(entity)))?;
        output.finish()
    }
}
