//! Tamia HTML loader
//!
//! Parses markup with html5ever and converts the result into a
//! `tamia_dom::Document`, so components can be bound to real pages.

mod parser;

pub use parser::HtmlParser;

use tamia_dom::Document;

/// Parse an HTML string into a document
pub fn parse(html: &str) -> Result<Document, ParseError> {
    HtmlParser::new().parse(html)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),
}
