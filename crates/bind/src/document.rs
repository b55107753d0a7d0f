//! Whole-document helpers for bindable entities.
//!
//! The root element is named after the entity's schema type (see
//! [`TypeSchema::root_descriptor`](crate::TypeSchema::root_descriptor)); the
//! mapper's configuration decides the declaration, indentation and prefixes.
use std::io::{BufRead, Write};

use crate::entity::{Bindable, downcast_entity};
use crate::error::{BindError, Result};
use crate::mapper::{TypeMapper, mismatch_error};
use crate::xml::{XmlInputStream, XmlOutputStream};

/// Serialize an entity as an XML document into a writer.
///
/// # Examples
///
/// ```ignore
/// use wsbind::to_xml_writer;
///
/// let mut file = std::fs::File::create("check.xml")?;
/// to_xml_writer(&mut file, &check, &mapper)?;
/// ```
pub fn to_xml_writer<W, T>(writer: W, value: &T, mapper: &TypeMapper) -> Result<()>
where
    W: Write,
    T: Bindable,
{
    let root = value.schema().root_descriptor();
    let mut output = XmlOutputStream::new(writer, mapper.config().writer.clone());
    mapper.write_entity(&mut output, &root, value)
}

/// Serialize an entity to an XML byte vector.
pub fn to_xml_vec<T>(value: &T, mapper: &TypeMapper) -> Result<Vec<u8>>
where
    T: Bindable,
{
    let mut buffer = Vec::new();
    to_xml_writer(&mut buffer, value, mapper)?;
    Ok(buffer)
}

/// Serialize an entity to an XML string.
///
/// # Examples
///
/// ```ignore
/// use wsbind::to_xml_string;
///
/// let xml = to_xml_string(&check, &mapper)?;
/// assert!(xml.contains("<sf:Score>"));
/// ```
pub fn to_xml_string<T>(value: &T, mapper: &TypeMapper) -> Result<String>
where
    T: Bindable,
{
    let bytes = to_xml_vec(value, mapper)?;
    String::from_utf8(bytes).map_err(|e| BindError::malformed(format!("output is not UTF-8: {e}")))
}

/// Deserialize an entity from an XML reader.
///
/// The document root must be an element named after `T`'s schema type and
/// must decode to `T` itself; a root carrying a type hint for a subtype is
/// rejected. Use [`TypeMapper::read_document`] with `Box<dyn Bindable>` to
/// accept any registered subtype.
pub fn from_xml_reader<R, T>(reader: R, mapper: &TypeMapper) -> Result<T>
where
    R: BufRead,
    T: Bindable + Default,
{
    let root = T::default().schema().root_descriptor();
    let mut input = XmlInputStream::new(reader, mapper.config().reader.clone());
    let entity: Box<dyn Bindable> = mapper.read_document(&mut input, &root)?;
    downcast_entity::<T>(entity).map_err(|m| mismatch_error(&root, m))
}

/// Deserialize an entity from an XML string.
///
/// # Examples
///
/// ```ignore
/// use wsbind::from_xml_str;
///
/// let check: SecurityHealthCheck = from_xml_str(&xml, &mapper)?;
/// ```
pub fn from_xml_str<T>(s: &str, mapper: &TypeMapper) -> Result<T>
where
    T: Bindable + Default,
{
    from_xml_reader(s.as_bytes(), mapper)
}

/// Deserialize an entity from an XML byte slice.
pub fn from_xml_slice<T>(v: &[u8], mapper: &TypeMapper) -> Result<T>
where
    T: Bindable + Default,
{
    from_xml_reader(v, mapper)
}
