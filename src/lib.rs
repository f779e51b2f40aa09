//! Mantle - Directive Template Compiler
//!
//! Templates are plain text with a small set of tags:
//!
//! ```text
//! @use:<path>                      include another resource
//! @section:<name>                  capture a named block ...
//! <content>
//! @endsection                      ... up to here
//! @place:<name>, ?@place:<name>    place a captured block
//! @markdown:<path>                 include a resource rendered as HTML
//! @inject:<type>                   place registered assets
//! {{-- comment --}}                removed from the output
//! {{key}}, {{!key}}                escaped and raw values
//! {{key||default}}, {{!key||default}}
//! ```
//!
//! # Examples
//!
//! ```
//! use mantle::{Engine, MemoryLoader, Store};
//! use serde_json::json;
//!
//! let engine = Engine::default()
//!     .with_loader(MemoryLoader::new().with("layout", "<title>@place:title</title>\n@inject:js"))
//!     .with_injectable("js", "app.js", 5);
//!
//! let template = "@use:layout\n@section:title\n{{site.name}}\n@endsection";
//! let store = Store::new().with_must("site", json!({ "name": "Mantle" }));
//!
//! assert_eq!(
//!     engine.compile(template, &store).unwrap(),
//!     "<title>Mantle</title>\n<script src=\"app.js\"></script>"
//! );
//! ```
mod compile;
mod config;
mod data;
mod engine;
mod escape;
mod inject;
mod loader;
mod log;
mod markdown;
mod minify;
mod pipe;
mod region;
mod section;
mod store;

pub use compile::{compile, Lexer, Token};
pub use config::{Builder, Options};
pub use data::Data;
pub use engine::Engine;
pub use escape::{escape, Escape, HtmlEscape};
pub use inject::{Content, Injectable, Injectables, DEFAULT_PRIORITY};
pub use loader::{FileLoader, Loader, MemoryLoader, Renderable, Resource};
pub use log::{Error, ErrorKind, Pointer, Visual};
pub use markdown::{markdown, CommonMark, Markdown};
pub use minify::minify;
pub use region::Region;
pub use section::Sections;
pub use store::Store;
