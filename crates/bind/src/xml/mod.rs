//! Streaming XML input and output.
//!
//! Both streams sit directly on `quick-xml` and are deliberately small: they
//! know about tags, text, namespaces and the `xsi` attributes, and nothing
//! about descriptors or entities. The [`TypeMapper`](crate::TypeMapper)
//! drives them.
//!
//! ## Reading
//!
//! [`XmlInputStream`] turns the document into a queue of start tags, end tags
//! and text, resolving every element name and `xsi:type` value to a
//! [`QName`]. [`peek_tag`](XmlInputStream::peek_tag) looks one tag ahead,
//! which is how optional elements are detected without consuming input.
//!
//! ```rust
//! use wsbind::config::ReaderConfig;
//! use wsbind::xml::{Tag, XmlInputStream};
//!
//! let xml = r#"<sf:Score xmlns:sf="urn:sobject.tooling.soap.sforce.com">87.5</sf:Score>"#;
//! let mut input = XmlInputStream::new(xml.as_bytes(), ReaderConfig::default());
//! assert!(matches!(input.peek_tag().unwrap(), Tag::Start(tag) if tag.name.local_name == "Score"));
//!
//! let tag = input.consume_start_tag().unwrap();
//! assert_eq!(input.read_text().unwrap(), "87.5");
//! input.consume_end_tag(&tag.name).unwrap();
//! ```
//!
//! ## Writing
//!
//! [`XmlOutputStream`] declares prefixes as elements need them, preferring
//! the ones configured in [`WriterConfig`](crate::config::WriterConfig):
//!
//! ```rust
//! use wsbind::config::WriterConfig;
//! use wsbind::xml::XmlOutputStream;
//!
//! let mut buffer = Vec::new();
//! let config = WriterConfig {
//!     xml_declaration: false,
//!     ..Default::default()
//! }
//! .with_prefix("urn:sobject.tooling.soap.sforce.com", "sf");
//! {
//!     let mut out = XmlOutputStream::new(&mut buffer, config);
//!     out.write_start_tag("urn:sobject.tooling.soap.sforce.com", "Score").unwrap();
//!     out.write_text("87.5").unwrap();
//!     out.write_end_tag().unwrap();
//!     out.finish().unwrap();
//! }
//! assert_eq!(
//!     String::from_utf8(buffer).unwrap(),
//!     r#"<sf:Score xmlns:sf="urn:sobject.tooling.soap.sforce.com">87.5</sf:Score>"#
//! );
//! ```

mod namespace;
mod reader;
mod writer;

pub use namespace::QName;
pub use reader::{Attribute, StartTag, Tag, XmlInputStream};
pub use writer::XmlOutputStream;
