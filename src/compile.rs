mod lex;
mod pipeline;
mod stage;

pub use lex::{Lexer, Token};
pub(crate) use lex::is_argument;
pub(crate) use pipeline::Pipeline;

use crate::{log::Error, Engine, Store};

/// Compile a template with a default [`Engine`].
///
/// The default `Engine` resolves resources from files relative to the
/// working directory and has no registered injectables, so this is mostly
/// useful for templates that only contain sections and variables.
///
/// # Errors
///
/// Returns an [`Error`] if an included resource cannot be loaded.
///
/// # Examples
///
/// ```
/// use mantle::Store;
///
/// let template = "@section:who\nworld\n@endsection Hello, @place:who!";
/// let output = mantle::compile(template, &Store::new());
///
/// assert_eq!(output.unwrap(), "Hello, world!");
/// ```
pub fn compile(text: &str, store: &Store) -> Result<String, Error> {
    Engine::default().compile(text, store)
}
