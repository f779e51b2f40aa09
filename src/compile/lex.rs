pub mod token;

pub use self::token::Token;

use self::token::Marker;
use crate::region::Region;
use regex::Regex;
use std::sync::LazyLock;

/// Matches the beginning of every tag.
///
/// Alternatives are tried in order at each position, so `{{--` wins over
/// `{{`. The inclusion markers ignore ASCII case.
static MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i:@use:|@markdown:)|@section:|@endsection|\?@place:|@place:|@inject:|\{\{--|--\}\}|\{\{",
    )
    .expect("marker pattern must compile")
});

/// Provides methods to read a template as [`Token`] instances.
///
/// A tag that is missing a required part, such as `@use:` without a path,
/// is not a tag at all and is returned as part of the surrounding
/// [`Token::Raw`] text.
///
/// # Examples
///
/// ```
/// use mantle::{Lexer, Token};
///
/// let source = "<head>@inject:css</head>";
/// let tokens: Vec<_> = Lexer::new(source).map(|(token, _)| token).collect();
///
/// assert_eq!(tokens, vec![Token::Raw, Token::Inject, Token::Raw]);
/// ```
pub struct Lexer<'source> {
    /// Reference to the source text.
    pub source: &'source str,
    /// Position within source.
    pub cursor: usize,
    /// Temporary storage for a [`Token`] that will be read on the
    /// following call to `.next`.
    buffer: Option<(Token, Region)>,
}

impl<'source> Lexer<'source> {
    /// Create a new [`Lexer`] over the given source.
    #[inline]
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            cursor: 0,
            buffer: None,
        }
    }

    /// Return the next [`Token`] and [`Region`], or `None` when the source
    /// is exhausted.
    fn lex(&mut self) -> Option<(Token, Region)> {
        // Always prefer taking from the buffer when possible.
        if let Some(next) = self.buffer.take() {
            return Some(next);
        }
        let from = self.cursor;
        let length = self.source.len();
        if from >= length {
            return None;
        }

        let mut search = from;
        while let Some(found) = MARKERS.find_at(self.source, search) {
            let (begin, end) = (found.start(), found.end());
            let tag = Marker::parse(found.as_str()).and_then(|m| self.lex_tag(m, end));

            match tag {
                Some((token, to)) => {
                    self.cursor = to;
                    let region = Region::new(begin..to);
                    if begin == from {
                        return Some((token, region));
                    }
                    self.buffer = Some((token, region));

                    return Some((Token::Raw, Region::new(from..begin)));
                }
                None => {
                    // Not a tag, resume one character later so overlapping
                    // markers such as `{{{{` are still found.
                    search = begin + self.source[begin..].chars().next().map_or(1, char::len_utf8);
                }
            }
        }

        self.cursor = length;
        Some((Token::Raw, Region::new(from..length)))
    }

    /// Finish lexing the tag opened by the given [`Marker`], which ends
    /// at `from`.
    ///
    /// Returns the [`Token`] and the end of the tag, or `None` if the tag
    /// is malformed.
    fn lex_tag(&self, marker: Marker, from: usize) -> Option<(Token, usize)> {
        let with_argument = |token: Token| self.lex_argument(from).map(|to| (token, to));

        match marker {
            Marker::Use => with_argument(Token::Use),
            Marker::Markdown => with_argument(Token::Markdown),
            Marker::Inject => with_argument(Token::Inject),
            Marker::Place => with_argument(Token::Place { optional: false }),
            Marker::OptionalPlace => with_argument(Token::Place { optional: true }),
            Marker::BeginSection => Some((Token::BeginSection, from)),
            Marker::EndSection => Some((Token::EndSection, from)),
            Marker::BeginComment => Some((Token::BeginComment, from)),
            Marker::EndComment => Some((Token::EndComment, from)),
            Marker::BeginVariable => self.lex_variable(from),
        }
    }

    /// Return the end of the argument beginning at `from`, or `None` if no
    /// argument is present.
    fn lex_argument(&self, from: usize) -> Option<usize> {
        let length = argument_length(&self.source[from..]);

        (length > 0).then_some(from + length)
    }

    /// Return the variable [`Token`] and its end for a tag whose `{{`
    /// ends at `from`.
    ///
    /// The tag must close with `}}` on the same line, may not contain
    /// another `{`, and must name a key. A tag whose closing braces belong to
    /// a `--}}` comment marker is not a variable.
    fn lex_variable(&self, from: usize) -> Option<(Token, usize)> {
        let rest = &self.source[from..];
        let close = rest.find("}}")?;
        let body = &rest[..close];
        if body.contains(['\n', '{']) || body.ends_with("--") {
            return None;
        }

        let (raw, inner) = match body.strip_prefix('!') {
            Some(inner) => (true, inner),
            None => (false, body),
        };
        let token = match inner.split_once("||") {
            Some((key, _)) if key.is_empty() => return None,
            Some(_) => Token::Default { raw },
            None if inner.is_empty() => return None,
            None => Token::Variable { raw },
        };

        Some((token, from + close + 2))
    }
}

impl Iterator for Lexer<'_> {
    type Item = (Token, Region);

    fn next(&mut self) -> Option<Self::Item> {
        self.lex()
    }
}

/// Return the length in bytes of the argument at the start of the text.
///
/// An argument is a run of identifier characters, `-`, `.` and `/` that
/// ends on an identifier character, so `@use:footer.` stops before the
/// period.
fn argument_length(text: &str) -> usize {
    let mut word_end = 0;

    for (index, char) in text.char_indices() {
        if is_word(char) {
            word_end = index + char.len_utf8();
        } else if !matches!(char, '-' | '.' | '/') {
            break;
        }
    }

    word_end
}

/// Return true if the whole text can be read as the argument of a tag, such
/// as the name in `@place:<name>` or the type in `@inject:<type>`.
pub(crate) fn is_argument(text: &str) -> bool {
    !text.is_empty() && argument_length(text) == text.len()
}

/// Return true if the given character may appear anywhere in an identifier,
/// meaning an `xid_continue`.
fn is_word(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}
