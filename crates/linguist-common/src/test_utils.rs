//! Test utilities and shared test helpers for linguist-rs.
//!
//! Provides one-time test logging and a small builder that renders Qt
//! Linguist TS documents, so tests can describe catalogs inline instead of
//! keeping a fixture file per edge case.

use std::fmt::Write;
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// Safe to call multiple times; only the first call installs a subscriber.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// One `<message>` element of a TS document under construction.
#[derive(Debug, Clone, Default)]
pub struct MessageFixture {
    source: String,
    comment: Option<String>,
    translation: Option<String>,
    status: Option<String>,
    locations: Vec<(String, u32)>,
}

impl MessageFixture {
    /// A message with the given source text and no translation element.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    /// Set the disambiguation comment.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Set the translation text.
    pub fn translation(mut self, text: impl Into<String>) -> Self {
        self.translation = Some(text.into());
        self
    }

    /// Set the `type` attribute of the translation element.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        if self.translation.is_none() {
            self.translation = Some(String::new());
        }
        self
    }

    /// Add a `<location>` element.
    pub fn location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.locations.push((file.into(), line));
        self
    }
}

/// Renders a TS document from contexts and messages in insertion order.
#[derive(Debug, Clone, Default)]
pub struct TsDocumentBuilder {
    language: Option<String>,
    contexts: Vec<(String, Vec<MessageFixture>)>,
}

impl TsDocumentBuilder {
    /// A document whose root carries `language`.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            contexts: Vec::new(),
        }
    }

    /// A document whose root has no `language` attribute.
    pub fn without_language() -> Self {
        Self::default()
    }

    /// Append a message to `context`, creating the context on first use.
    pub fn message(mut self, context: &str, message: MessageFixture) -> Self {
        match self.contexts.iter_mut().find(|(name, _)| name == context) {
            Some((_, messages)) => messages.push(message),
            None => self.contexts.push((context.to_string(), vec![message])),
        }
        self
    }

    /// Render the document as XML text.
    pub fn build(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n");
        match &self.language {
            Some(language) => {
                let _ = writeln!(out, "<TS version=\"2.0\" language=\"{}\">", escape(language));
            }
            None => out.push_str("<TS version=\"2.0\">\n"),
        }
        for (name, messages) in &self.contexts {
            let _ = writeln!(out, "<context>\n    <name>{}</name>", escape(name));
            for message in messages {
                out.push_str("    <message>\n");
                for (file, line) in &message.locations {
                    let _ = writeln!(
                        out,
                        "        <location filename=\"{}\" line=\"{line}\"/>",
                        escape(file)
                    );
                }
                let _ = writeln!(out, "        <source>{}</source>", escape(&message.source));
                if let Some(comment) = &message.comment {
                    let _ = writeln!(out, "        <comment>{}</comment>", escape(comment));
                }
                if let Some(text) = &message.translation {
                    match &message.status {
                        Some(status) => {
                            let _ = writeln!(
                                out,
                                "        <translation type=\"{}\">{}</translation>",
                                escape(status),
                                escape(text)
                            );
                        }
                        None => {
                            let _ = writeln!(out, "        <translation>{}</translation>", escape(text));
                        }
                    }
                }
                out.push_str("    </message>\n");
            }
            out.push_str("</context>\n");
        }
        out.push_str("</TS>\n");
        out
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
