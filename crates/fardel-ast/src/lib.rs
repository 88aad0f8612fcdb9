//! # fardel-ast
//!
//! Parsing facade for the fardel bundler.
//!
//! This crate owns everything that touches JavaScript syntax: parsing source
//! text into an AST with OXC, collecting the module's static import/export
//! structure, and rewriting module syntax into the call-based convention the
//! emitted bundle expects (`require(specifier)` / `module.exports`).
//!
//! The rest of the bundler never sees an AST. It sees a [`ScannedModule`]:
//! the ordered list of raw import specifiers plus an opaque rewritten body.
//!
//! ## Quick Start
//!
//! ```
//! use fardel_ast::{scan, ParseOptions};
//!
//! let source = r#"
//! import { greet } from "./greet.js";
//! greet();
//! "#;
//!
//! let module = scan(source, &ParseOptions::default()).unwrap();
//! assert_eq!(module.specifiers(), ["./greet.js"]);
//!
//! let body = module.into_factory_body(source);
//! assert!(body.contains(r#"require("./greet.js")"#));
//! ```
//!
//! Parsing is all-or-nothing: any syntax error fails the whole scan with a
//! [`AstError::Parse`], and module constructs the rewrite cannot express fail
//! with [`AstError::Unsupported`]. There is no partial extraction.

mod error;
mod parser;
mod rewrite;
mod scan;

pub use error::{AstError, Result};
pub use parser::ParseOptions;
pub use scan::{scan, ScannedModule};
