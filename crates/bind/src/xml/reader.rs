//! Forward-only, lookahead-capable XML input cursor.

use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::sync::Arc;

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use wsbind_support::xsd::{NIL_ATTRIBUTE, TYPE_ATTRIBUTE, XSI_NAMESPACE};
use wsbind_support::{Scalar, ScalarKind};

use super::namespace::{NamespaceScopes, QName, split_qname};
use crate::config::ReaderConfig;
use crate::descriptor::FieldDescriptor;
use crate::error::{BindError, Result};

/// One attribute of a start tag, namespace-resolved and unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: QName,
    pub value: String,
}

/// A resolved start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    pub name: QName,
    pub attributes: Vec<Attribute>,
    /// The `xsi:type` hint, resolved against the namespaces in scope.
    pub type_hint: Option<QName>,
    /// True when the element carries `xsi:nil="true"`.
    pub nil: bool,
}

impl StartTag {
    pub fn attribute(&self, namespace: &str, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.matches(namespace, local_name))
            .map(|a| a.value.as_str())
    }
}

/// What [`XmlInputStream::peek_tag`] sees next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag<'t> {
    Start(&'t StartTag),
    End(&'t QName),
    Eof,
}

#[derive(Debug)]
enum Token {
    Start(StartTag),
    End(QName),
    Text(String),
    Eof,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Start(tag) => format!("<{}>", tag.name),
            Token::End(name) => format!("</{}>", name),
            Token::Text(_) => "text content".to_string(),
            Token::Eof => "end of document".to_string(),
        }
    }
}

fn is_blank(text: &str) -> bool {
    text.bytes().all(|b| matches!(b, b' ' | b'\n' | b'\r' | b'\t'))
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| BindError::malformed(format!("invalid UTF-8: {e}")))
}

fn unescape_text(raw: &str) -> Result<String> {
    unescape(raw)
        .map(|text| text.into_owned())
        .map_err(|e| BindError::malformed(format!("bad escape in {raw:?}: {e}")))
}

/// Sequential cursor over one XML document.
///
/// Adjacent text, CDATA and entity references are merged into one text token;
/// comments, processing instructions and the XML declaration are skipped. A
/// self-closing element is reported as a start tag followed by its end tag.
///
/// One stream serves one document traversal.
pub struct XmlInputStream<'a> {
    reader: Reader<Box<dyn BufRead + 'a>>,
    buf: Vec<u8>,
    tokens: VecDeque<Token>,
    scopes: NamespaceScopes,
    open: Vec<QName>,
    config: ReaderConfig,
}

impl<'a> XmlInputStream<'a> {
    pub fn new<R: BufRead + 'a>(source: R, config: ReaderConfig) -> Self {
        let source: Box<dyn BufRead + 'a> = Box::new(source);
        let mut reader = Reader::from_reader(source);
        reader.config_mut().trim_text(false);
        Self {
            reader,
            buf: Vec::new(),
            tokens: VecDeque::new(),
            scopes: NamespaceScopes::default(),
            open: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Looks at the next tag without consuming it. Whitespace between tags is
    /// skipped; any other text here is a structural error.
    pub fn peek_tag(&mut self) -> Result<Tag<'_>> {
        loop {
            self.fill()?;
            match self.tokens.front() {
                Some(Token::Text(text)) if is_blank(text) => {
                    self.tokens.pop_front();
                }
                Some(Token::Text(text)) => {
                    return Err(BindError::malformed(format!(
                        "unexpected text {text:?} between elements"
                    )));
                }
                _ => break,
            }
        }
        Ok(match self.tokens.front() {
            Some(Token::Start(tag)) => Tag::Start(tag),
            Some(Token::End(name)) => Tag::End(name),
            _ => Tag::Eof,
        })
    }

    /// Consumes the next start tag.
    pub fn consume_start_tag(&mut self) -> Result<StartTag> {
        self.peek_tag()?;
        match self.tokens.pop_front() {
            Some(Token::Start(tag)) => Ok(tag),
            Some(other) => {
                let found = other.describe();
                self.tokens.push_front(other);
                Err(BindError::malformed(format!("expected a start tag, found {found}")))
            }
            None => Err(BindError::malformed("unexpected end of input")),
        }
    }

    /// Consumes the end tag of `name`.
    pub fn consume_end_tag(&mut self, name: &QName) -> Result<()> {
        self.peek_tag()?;
        match self.tokens.front() {
            Some(Token::End(end)) if end == name => {
                self.tokens.pop_front();
                Ok(())
            }
            Some(token) => Err(BindError::malformed(format!(
                "expected </{name}>, found {}",
                token.describe()
            ))),
            None => Err(BindError::malformed("unexpected end of input")),
        }
    }

    /// Reads the text content of the element whose start tag was just
    /// consumed, leaving its end tag in place.
    pub fn read_text(&mut self) -> Result<String> {
        self.fill()?;
        let text = match self.tokens.pop_front() {
            Some(Token::Text(text)) => text,
            Some(other) => {
                self.tokens.push_front(other);
                String::new()
            }
            None => String::new(),
        };

        self.fill()?;
        match self.tokens.front() {
            Some(Token::End(_)) => Ok(text),
            Some(Token::Start(tag)) => Err(BindError::malformed(format!(
                "unexpected child element <{}> in simple content",
                tag.name
            ))),
            _ => Err(BindError::malformed("unterminated element")),
        }
    }

    /// Reads a leaf element's text and converts it to `kind`.
    pub fn read_scalar(&mut self, descriptor: &FieldDescriptor, kind: ScalarKind) -> Result<Scalar> {
        let raw = self.read_text()?;
        let text = if self.config.trim_text {
            raw.trim()
        } else {
            raw.as_str()
        };
        kind.parse(text)
            .map_err(|err| BindError::conversion(descriptor.name(), kind.xsd_name(), err))
    }

    /// Discards everything up to and including the end tag of `name`.
    pub fn skip_element(&mut self, name: &QName) -> Result<()> {
        let mut depth = 0usize;
        loop {
            self.fill()?;
            match self.tokens.pop_front() {
                Some(Token::Start(_)) => depth += 1,
                Some(Token::End(end)) if depth == 0 => {
                    if &end == name {
                        return Ok(());
                    }
                    return Err(BindError::malformed(format!(
                        "expected </{name}>, found </{end}>"
                    )));
                }
                Some(Token::End(_)) => depth -= 1,
                Some(Token::Text(_)) => {}
                Some(Token::Eof) | None => {
                    return Err(BindError::malformed(format!("unterminated element <{name}>")));
                }
            }
        }
    }

    /// Reads events until at least one token is queued.
    fn fill(&mut self) -> Result<()> {
        let mut text = String::new();
        let mut has_text = false;

        while self.tokens.is_empty() {
            self.buf.clear();
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event.into_owned(),
                Err(quick_xml::Error::Io(err)) => {
                    let err = Arc::try_unwrap(err)
                        .unwrap_or_else(|shared| io::Error::new(shared.kind(), shared.to_string()));
                    return Err(BindError::Io(err));
                }
                Err(err) => {
                    return Err(BindError::malformed(format!(
                        "{err} at byte {}",
                        self.reader.buffer_position()
                    )));
                }
            };

            match event {
                Event::Text(raw) => {
                    text.push_str(&unescape_text(utf8(&raw)?)?);
                    has_text = true;
                }
                Event::CData(raw) => {
                    text.push_str(utf8(&raw)?);
                    has_text = true;
                }
                Event::GeneralRef(reference) => {
                    let name = utf8(&reference)?;
                    text.push_str(&unescape_text(&format!("&{name};"))?);
                    has_text = true;
                }
                Event::Start(start) => {
                    self.flush_text(&mut text, &mut has_text);
                    let tag = self.open_element(&start)?;
                    self.tokens.push_back(Token::Start(tag));
                }
                Event::Empty(start) => {
                    self.flush_text(&mut text, &mut has_text);
                    let tag = self.open_element(&start)?;
                    let name = tag.name.clone();
                    self.tokens.push_back(Token::Start(tag));
                    self.close_element()?;
                    self.tokens.push_back(Token::End(name));
                }
                Event::End(_) => {
                    self.flush_text(&mut text, &mut has_text);
                    let name = self.close_element()?;
                    self.tokens.push_back(Token::End(name));
                }
                Event::Eof => {
                    if let Some(open) = self.open.last() {
                        return Err(BindError::malformed(format!(
                            "unexpected end of document inside <{open}>"
                        )));
                    }
                    self.flush_text(&mut text, &mut has_text);
                    self.tokens.push_back(Token::Eof);
                }
                Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => {}
            }
        }
        Ok(())
    }

    fn flush_text(&mut self, text: &mut String, has_text: &mut bool) {
        if *has_text {
            self.tokens.push_back(Token::Text(std::mem::take(text)));
            *has_text = false;
        }
    }

    fn open_element(&mut self, start: &BytesStart<'_>) -> Result<StartTag> {
        let mut raw_attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute =
                attribute.map_err(|e| BindError::malformed(format!("bad attribute: {e}")))?;
            let key = utf8(attribute.key.as_ref())?.to_string();
            let value = unescape_text(utf8(&attribute.value)?)?;
            raw_attributes.push((key, value));
        }

        self.scopes.push();
        for (key, value) in &raw_attributes {
            if key == "xmlns" {
                self.scopes.declare("", value);
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                self.scopes.declare(prefix, value);
            }
        }

        let name = self.resolve(utf8(start.name().as_ref())?)?;

        let mut attributes = Vec::with_capacity(raw_attributes.len());
        let mut type_hint = None;
        let mut nil = false;
        for (key, value) in raw_attributes {
            if key == "xmlns" || key.starts_with("xmlns:") {
                continue;
            }
            let (prefix, local_name) = split_qname(&key);
            let namespace = if prefix.is_empty() {
                ""
            } else {
                self.scopes.namespace_of(prefix).ok_or_else(|| {
                    BindError::malformed(format!("undeclared namespace prefix {prefix:?}"))
                })?
            };

            if namespace == XSI_NAMESPACE && local_name == TYPE_ATTRIBUTE {
                type_hint = Some(self.resolve(value.trim())?);
            } else if namespace == XSI_NAMESPACE && local_name == NIL_ATTRIBUTE {
                nil = matches!(value.trim(), "true" | "1");
            }
            attributes.push(Attribute {
                name: QName::new(namespace, local_name),
                value,
            });
        }

        self.open.push(name.clone());
        Ok(StartTag {
            name,
            attributes,
            type_hint,
            nil,
        })
    }

    fn close_element(&mut self) -> Result<QName> {
        self.scopes.pop();
        self.open
            .pop()
            .ok_or_else(|| BindError::malformed("end tag without a matching start tag"))
    }

    /// Resolves a prefixed name against the namespaces in scope.
    fn resolve(&self, raw: &str) -> Result<QName> {
        let (prefix, local_name) = split_qname(raw);
        let namespace = self.scopes.namespace_of(prefix).ok_or_else(|| {
            BindError::malformed(format!("undeclared namespace prefix {prefix:?} in {raw:?}"))
        })?;
        Ok(QName::new(namespace, local_name))
    }
}
