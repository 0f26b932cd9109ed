//! Document body parsing module.
//!
//! Loading is one blocking pass: the XML is parsed into a navigable tree, the
//! body's children are classified and constructed, and list nesting is
//! reconstructed for every sibling sequence (the body and each table cell).

mod body_parser;
mod classify;
mod list;
mod loader;
mod options;
mod paragraph;
mod table;

pub use body_parser::BodyParser;
pub(crate) use body_parser::load_document;
pub use classify::{classify, classify_tag, Classified, ElementKind};
pub use list::{
    apply_list_markup, list_entries, process_list_levels, ListEntry, ListMarkup, CLOSE_ITEM,
    CLOSE_LEVEL,
};
pub use options::LoadOptions;
pub use crate::xml::ParseMode;
