use std::{io, path::Path};

use thiserror::Error;

/// An unrecoverable error while reading an input profile document.
///
/// Everything below the structural level degrades to defaults and is
/// reported through [`Problems`](crate::Problems) instead.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("root node 'InputProfile' not found")]
    NoRootNode,
    #[error("expected element <{expected}>, found <{found}>")]
    UnexpectedElement { expected: String, found: String },
    #[error("could not open file '{}': {1}", .0.display())]
    Open(Box<Path>, io::Error),
    #[error("could not read input profile: {0}")]
    Read(io::Error),
}

/// An unrecoverable error while writing an input profile document.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("could not serialize XML: {0}")]
    Xml(#[from] quick_xml::DeError),
    #[error("could not write output: {0}")]
    Io(#[from] io::Error),
}
