//! Streaming XML output with prefix management.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use wsbind_support::xsd::{TYPE_ATTRIBUTE, XSI_NAMESPACE};

use super::namespace::NamespaceScopes;
use crate::config::WriterConfig;
use crate::error::{BindError, Result};

/// Emits tags, text and type hints to a sink.
///
/// Every namespaced element is written with a prefix; the default namespace
/// is never declared, so unprefixed elements are in no namespace. A prefix is
/// declared on the first element that needs it and reused by descendants.
/// An element closed right after it was opened is written self-closing.
pub struct XmlOutputStream<'a> {
    writer: Writer<Box<dyn Write + 'a>>,
    config: WriterConfig,
    pending: Option<BytesStart<'static>>,
    open: Vec<String>,
    scopes: NamespaceScopes,
    generated: usize,
    declaration_written: bool,
}

impl<'a> XmlOutputStream<'a> {
    pub fn new<W: Write + 'a>(sink: W, config: WriterConfig) -> Self {
        let sink: Box<dyn Write + 'a> = Box::new(sink);
        let writer = match config.indent {
            Some(width) => Writer::new_with_indent(sink, b' ', width),
            None => Writer::new(sink),
        };
        Self {
            writer,
            config,
            pending: None,
            open: Vec::new(),
            scopes: NamespaceScopes::default(),
            generated: 0,
            declaration_written: false,
        }
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Opens an element. An empty `namespace` writes an unqualified name.
    pub fn write_start_tag(&mut self, namespace: &str, local_name: &str) -> Result<()> {
        self.flush_pending()?;
        if self.open.is_empty() && self.config.xml_declaration && !self.declaration_written {
            self.writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
            self.declaration_written = true;
        }

        self.scopes.push();
        let (qualified, declared) = if namespace.is_empty() {
            (local_name.to_string(), None)
        } else {
            let (prefix, declared) = self.bind_prefix(namespace);
            (format!("{prefix}:{local_name}"), declared.then_some(prefix))
        };

        let mut start = BytesStart::new(qualified.clone());
        if let Some(prefix) = declared {
            start.push_attribute((format!("xmlns:{prefix}").as_str(), namespace));
        }
        self.pending = Some(start);
        self.open.push(qualified);
        Ok(())
    }

    /// Adds an `xsi:type` attribute naming `{namespace}type_name` to the
    /// element just opened.
    pub fn write_type_hint(&mut self, namespace: &str, type_name: &str) -> Result<()> {
        if self.pending.is_none() {
            return Err(BindError::malformed(
                "type hint must directly follow a start tag",
            ));
        }
        let xsi = self.bind_on_pending(XSI_NAMESPACE);
        let value = if namespace.is_empty() {
            type_name.to_string()
        } else {
            let prefix = self.bind_on_pending(namespace);
            format!("{prefix}:{type_name}")
        };
        if let Some(start) = self.pending.as_mut() {
            start.push_attribute((format!("{xsi}:{TYPE_ATTRIBUTE}").as_str(), value.as_str()));
        }
        Ok(())
    }

    /// Writes escaped character content inside the open element.
    pub fn write_text(&mut self, text: &str) -> Result<()> {
        if self.open.is_empty() {
            return Err(BindError::malformed("text outside of an element"));
        }
        if text.is_empty() {
            return Ok(());
        }
        self.flush_pending()?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    /// Closes the innermost open element.
    pub fn write_end_tag(&mut self) -> Result<()> {
        let name = self
            .open
            .pop()
            .ok_or_else(|| BindError::malformed("end tag without an open element"))?;
        match self.pending.take() {
            Some(start) => self.writer.write_event(Event::Empty(start))?,
            None => self.writer.write_event(Event::End(BytesEnd::new(name)))?,
        }
        self.scopes.pop();
        Ok(())
    }

    /// Checks that every element was closed and flushes the sink.
    pub fn finish(&mut self) -> Result<()> {
        if let Some(open) = self.open.last() {
            return Err(BindError::malformed(format!("element <{open}> was never closed")));
        }
        self.writer.get_mut().flush()?;
        Ok(())
    }

    fn flush_pending(&mut self) -> Result<()> {
        if let Some(start) = self.pending.take() {
            self.writer.write_event(Event::Start(start))?;
        }
        Ok(())
    }

    /// Returns the prefix for `namespace`, declaring it in the innermost
    /// scope when none is visible. The flag is true for a new declaration.
    fn bind_prefix(&mut self, namespace: &str) -> (String, bool) {
        if let Some(prefix) = self.scopes.prefix_of(namespace) {
            return (prefix.to_string(), false);
        }
        let preferred = self
            .config
            .prefix_for(namespace)
            .filter(|prefix| !self.scopes.is_bound(prefix))
            .map(str::to_string);
        let prefix = match preferred {
            Some(prefix) => prefix,
            None => self.generate_prefix(),
        };
        self.scopes.declare(&prefix, namespace);
        (prefix, true)
    }

    fn bind_on_pending(&mut self, namespace: &str) -> String {
        let (prefix, declared) = self.bind_prefix(namespace);
        if declared {
            if let Some(start) = self.pending.as_mut() {
                start.push_attribute((format!("xmlns:{prefix}").as_str(), namespace));
            }
        }
        prefix
    }

    fn generate_prefix(&mut self) -> String {
        loop {
            self.generated += 1;
            let candidate = format!("ns{}", self.generated);
            let reserved = self.config.prefixes.values().any(|p| *p == candidate);
            if !reserved && !self.scopes.is_bound(&candidate) {
                return candidate;
            }
        }
    }
}
