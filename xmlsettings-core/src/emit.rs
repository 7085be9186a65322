//! Token-level XML writer.
//!
//! A thin emitter over a growing string that keeps the most recent start tag
//! open until content forces it closed. A start tag still open when its
//! element ends collapses to a self-closing tag, so `<numFoo attr="1" />`
//! and `<Name>value</Name>` both fall out of the same four calls. Entity
//! escaping goes through [`quick_xml::escape`]; no formatting or indentation
//! is ever produced.

use quick_xml::escape::{escape, partial_escape};

/// Streaming XML token writer with deferred start-tag completion.
pub struct XmlEmitter {
    out: String,
    open: Vec<String>,
    pending: bool,
}

impl XmlEmitter {
    /// Creates an empty emitter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            out: String::new(),
            open: Vec::new(),
            pending: false,
        }
    }

    /// Writes the document declaration.
    pub fn start_document(&mut self) {
        self.out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
    }

    /// Opens an element. The start tag stays open for attributes until text,
    /// a child element, or the element's end arrives.
    pub fn start_element(&mut self, name: &str) {
        self.seal();
        self.out.push('<');
        self.out.push_str(name);
        self.open.push(name.to_string());
        self.pending = true;
    }

    /// Writes an attribute onto the currently open start tag.
    pub fn write_attribute(&mut self, name: &str, value: &str) {
        debug_assert!(self.pending, "attribute written with no open start tag");
        self.out.push(' ');
        self.out.push_str(name);
        self.out.push_str("=\"");
        self.out.push_str(&escape(value));
        self.out.push('"');
    }

    /// Writes text content inside the current element.
    pub fn write_text(&mut self, text: &str) {
        self.seal();
        self.out.push_str(&partial_escape(text));
    }

    /// Closes the current element: ` />` if its start tag is still open,
    /// a full end tag otherwise. Closing with nothing open is a no-op.
    pub fn end_element(&mut self) {
        let Some(name) = self.open.pop() else {
            return;
        };
        if self.pending {
            self.out.push_str(" />");
            self.pending = false;
        } else {
            self.out.push_str("</");
            self.out.push_str(&name);
            self.out.push('>');
        }
    }

    /// Consumes the emitter, returning the document text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.out
    }

    fn seal(&mut self) {
        if self.pending {
            self.out.push('>');
            self.pending = false;
        }
    }
}

impl Default for XmlEmitter {
    fn default() -> Self {
        Self::new()
    }
}
