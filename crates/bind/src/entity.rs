//! The contract every schema-mapped type implements.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::descriptor::FieldDescriptor;
use crate::error::Result;
use crate::mapper::TypeMapper;
use crate::schema::TypeSchema;
use crate::value::Mismatch;
use crate::xml::{XmlInputStream, XmlOutputStream};

/// A node of a bindable object graph.
///
/// Implementations read and write their slots field by field through the
/// [`TypeMapper`], in the order given by [`schema`](Bindable::schema). A type
/// that extends another keeps the base as a value and delegates to it before
/// handling its own fields:
///
/// ```rust,ignore
/// fn read_fields(&mut self, input: &mut XmlInputStream<'_>, mapper: &TypeMapper) -> Result<()> {
///     self.base.read_fields(input, mapper)?;
///     let schema = Self::type_schema();
///     mapper.read_slot(input, &schema.describe(&SCORE), &mut self.score)?;
///     Ok(())
/// }
/// ```
///
/// The enclosing element (start tag, type hint, end tag) belongs to the
/// mapper; entities only see their own content.
pub trait Bindable: EntityAny + fmt::Debug {
    /// The schema of the runtime type.
    fn schema(&self) -> &'static TypeSchema;

    /// Populates the slots from the element content at the cursor.
    fn read_fields(&mut self, input: &mut XmlInputStream<'_>, mapper: &TypeMapper) -> Result<()>;

    /// Emits every set slot in schema order.
    fn write_fields(&self, output: &mut XmlOutputStream<'_>, mapper: &TypeMapper) -> Result<()>;

    /// Ordered descriptors, inherited fields first.
    fn fields(&self) -> &'static [Arc<FieldDescriptor>] {
        self.schema().fields()
    }
}

/// Object-safe `Any`, `Clone` and `PartialEq` for bindable types.
///
/// Implemented for every `Bindable + Clone + PartialEq` type; never implement
/// it by hand.
pub trait EntityAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
    fn clone_entity(&self) -> Box<dyn Bindable>;
    fn eq_entity(&self, other: &dyn Bindable) -> bool;
}

impl<T> EntityAny for T
where
    T: Bindable + Clone + PartialEq,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn clone_entity(&self) -> Box<dyn Bindable> {
        Box::new(self.clone())
    }

    fn eq_entity(&self, other: &dyn Bindable) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}

impl Clone for Box<dyn Bindable> {
    fn clone(&self) -> Self {
        self.clone_entity()
    }
}

impl PartialEq for dyn Bindable {
    fn eq(&self, other: &Self) -> bool {
        self.eq_entity(other)
    }
}

/// Recovers a concrete entity from a dynamically typed one.
pub fn downcast_entity<T: Bindable>(entity: Box<dyn Bindable>) -> std::result::Result<T, Mismatch> {
    let type_name = entity.schema().type_name();
    entity
        .into_any()
        .downcast::<T>()
        .map(|boxed| *boxed)
        .map_err(|_| Mismatch::Object(type_name))
}
