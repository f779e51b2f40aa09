use crate::region::Region;
use std::fmt::Display;

/// Types emitted by the Lexer.
///
/// Every region of a template belongs to exactly one token, so writing the
/// literal text of each token in order reproduces the template.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    /// Literal text.
    Raw,
    /// `@use:<path>`
    Use,
    /// `@section:`, the section name follows on the same line.
    BeginSection,
    /// `@endsection`
    EndSection,
    /// `@place:<name>`, or `?@place:<name>` when optional.
    Place {
        /// Unknown names resolve to nothing instead of staying in the output.
        optional: bool,
    },
    /// `@markdown:<path>`
    Markdown,
    /// `@inject:<type>`
    Inject,
    /// `{{--`
    BeginComment,
    /// `--}}`
    EndComment,
    /// `{{key}}`, or `{{!key}}` when raw.
    Variable {
        /// The value bypasses the escaper.
        raw: bool,
    },
    /// `{{key||default}}`, or `{{!key||default}}` when raw.
    Default {
        /// The value bypasses the escaper.
        raw: bool,
    },
}

impl Token {
    /// Return the argument of the tag found at the given [`Region`].
    ///
    /// This is the path of `@use:` and `@markdown:`, the name of `@place:`,
    /// the type of `@inject:` and the text between the braces of a variable,
    /// without the leading `!`. Tokens without an argument return an empty
    /// string.
    ///
    /// # Examples
    ///
    /// ```
    /// use mantle::{Lexer, Token};
    ///
    /// let source = "{{!user.name}}";
    /// let (token, region) = Lexer::new(source).next().unwrap();
    ///
    /// assert_eq!(token, Token::Variable { raw: true });
    /// assert_eq!(token.argument(source, region), "user.name");
    /// ```
    pub fn argument<'source>(&self, source: &'source str, region: Region) -> &'source str {
        let (prefix, suffix) = match self {
            Token::Use => ("@use:".len(), 0),
            Token::Markdown => ("@markdown:".len(), 0),
            Token::Inject => ("@inject:".len(), 0),
            Token::Place { optional: true } => ("?@place:".len(), 0),
            Token::Place { optional: false } => ("@place:".len(), 0),
            Token::Variable { raw } | Token::Default { raw } => (2 + usize::from(*raw), 2),
            _ => return "",
        };

        source
            .get(region.begin + prefix..region.end - suffix)
            .unwrap_or_default()
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Raw => write!(f, "raw"),
            Token::Use => write!(f, "use"),
            Token::BeginSection => write!(f, "begin section"),
            Token::EndSection => write!(f, "end section"),
            Token::Place { optional: false } => write!(f, "place"),
            Token::Place { optional: true } => write!(f, "optional place"),
            Token::Markdown => write!(f, "markdown"),
            Token::Inject => write!(f, "inject"),
            Token::BeginComment => write!(f, "begin comment"),
            Token::EndComment => write!(f, "end comment"),
            Token::Variable { raw: false } => write!(f, "variable"),
            Token::Variable { raw: true } => write!(f, "raw variable"),
            Token::Default { raw: false } => write!(f, "variable with default"),
            Token::Default { raw: true } => write!(f, "raw variable with default"),
        }
    }
}

/// Markers that open a tag within text.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum Marker {
    Use,
    Markdown,
    BeginSection,
    EndSection,
    Place,
    OptionalPlace,
    Inject,
    BeginComment,
    EndComment,
    BeginVariable,
}

impl Marker {
    /// Convert the text matched by the marker pattern into a [`Marker`].
    ///
    /// Returns `None` for text that is not a marker.
    pub(crate) fn parse(text: &str) -> Option<Self> {
        let marker = match text {
            "@section:" => Self::BeginSection,
            "@endsection" => Self::EndSection,
            "?@place:" => Self::OptionalPlace,
            "@place:" => Self::Place,
            "@inject:" => Self::Inject,
            "{{--" => Self::BeginComment,
            "--}}" => Self::EndComment,
            "{{" => Self::BeginVariable,
            _ if text.eq_ignore_ascii_case("@use:") => Self::Use,
            _ if text.eq_ignore_ascii_case("@markdown:") => Self::Markdown,
            _ => return None,
        };

        Some(marker)
    }
}
