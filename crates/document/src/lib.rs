//! XML site configuration parser.
//!
//! [`parse`] turns a raw document into a typed [`Configuration`]. Named
//! sections go through fixed-field extractors; free-form sections go through
//! the generic extractor in [`extract`]. [`to_document`] writes a
//! configuration back out in the same format.

pub mod error;
pub mod extract;
mod sections;
pub mod writer;

pub use error::{DocumentError, Location};
pub use extract::extract_node;
pub use writer::to_document;

use sitecfg_types::Configuration;

/// Parses a raw XML document into a [`Configuration`].
///
/// Only malformed XML is an error. Missing sections and fields resolve to
/// empty values.
pub fn parse(raw: &str) -> Result<Configuration, DocumentError> {
    let doc = roxmltree::Document::parse(raw)?;
    let root = doc.root_element();
    log::debug!(
        "Parsing site configuration rooted at <{}>",
        root.tag_name().name()
    );
    Ok(sections::configuration(root))
}
