//! The passes that run after inclusion.
//!
//! Every pass re-lexes the current text and rewrites only the tokens it is
//! responsible for. The text of every other token is copied unchanged, so a
//! pass never disturbs tags that belong to a later pass.
use super::lex::{is_argument, Lexer, Token};
use crate::{
    data::Data,
    escape::Escape,
    inject::Injectables,
    log::{error_write, Error},
    pipe::Pipe,
    region::Region,
    section::Sections,
};
use serde_json::Value;
use std::convert::Infallible;

/// Rewrite the text, calling `handle` for every token.
///
/// When `handle` returns false the text of the token is copied into the
/// buffer instead. Returns the new text and the number of tokens that were
/// handled.
pub(crate) fn rewrite<F, E>(text: &str, mut handle: F) -> Result<(String, usize), E>
where
    F: FnMut(&mut String, Token, Region) -> Result<bool, E>,
{
    let mut buffer = String::with_capacity(text.len());
    let mut count = 0;

    for (token, region) in Lexer::new(text) {
        if handle(&mut buffer, token, region)? {
            count += 1;
        } else {
            buffer.push_str(&text[region]);
        }
    }

    Ok((buffer, count))
}

/// Rewrite every block that begins with the `open` token and ends with the
/// nearest following `close` token.
///
/// `handle` receives the [`Region`] between the two tokens and the region of
/// the whole block. Opening tokens without a matching close, and closing
/// tokens without an opening, are copied as text.
fn rewrite_blocks<F>(text: &str, open: Token, close: Token, mut handle: F) -> String
where
    F: FnMut(&mut String, Region, Region),
{
    let tokens: Vec<_> = Lexer::new(text).collect();

    // Index of the first `close` token after each position.
    let mut next_close = vec![None; tokens.len()];
    let mut nearest = None;
    for (index, (token, _)) in tokens.iter().enumerate().rev() {
        next_close[index] = nearest;
        if *token == close {
            nearest = Some(index);
        }
    }

    let mut buffer = String::with_capacity(text.len());
    let mut index = 0;

    while let Some(&(token, region)) = tokens.get(index) {
        let found = (token == open).then(|| next_close[index]).flatten();
        let Some(end_index) = found else {
            buffer.push_str(&text[region]);
            index += 1;
            continue;
        };
        let end = tokens[end_index].1;
        index = end_index + 1;

        handle(&mut buffer, region.between(end), region.combine(end));
    }

    buffer
}

/// Move every `@section:` block out of the text and into the [`Sections`].
///
/// The first line of the block is the name, everything after it is the
/// content. A block without a line break, or with a name that `@place:`
/// could never refer to, is left in the text.
pub(crate) fn capture(text: &str, sections: &mut Sections) -> String {
    rewrite_blocks(
        text,
        Token::BeginSection,
        Token::EndSection,
        |buffer, inner, block| match split_section(&text[inner]) {
            Some((name, content)) => {
                tracing::trace!(name, "captured section");
                sections.define(name, content);
            }
            None => buffer.push_str(&text[block]),
        },
    )
}

fn split_section(body: &str) -> Option<(&str, &str)> {
    let (name, content) = body.split_once('\n')?;
    let name = name.trim();
    if !is_argument(name) {
        return None;
    }

    Some((name, content.trim()))
}

/// Replace `@place:` and `?@place:` tags with the content of their section.
///
/// Optional tags naming an unknown section are removed, required tags naming
/// an unknown section stay in the text.
pub(crate) fn place(text: &str, sections: &Sections) -> String {
    let placed = rewrite(text, |buffer, token, region| -> Result<bool, Infallible> {
        let Token::Place { optional } = token else {
            return Ok(false);
        };
        match sections.get(token.argument(text, region)) {
            Some(content) => buffer.push_str(content),
            None if optional => {}
            None => return Ok(false),
        }

        Ok(true)
    });

    placed.map_or_else(|never| match never {}, |(text, _)| text)
}

/// Replace `@inject:` tags naming a known type with the rendered entries of
/// that type. Tags naming an unknown type stay in the text.
pub(crate) fn inject(text: &str, injectables: &Injectables) -> String {
    let injected = rewrite(text, |buffer, token, region| -> Result<bool, Infallible> {
        if token != Token::Inject {
            return Ok(false);
        }
        let kind = token.argument(text, region);
        if !injectables.contains(kind) {
            return Ok(false);
        }
        buffer.push_str(&injectables.render(kind));

        Ok(true)
    });

    injected.map_or_else(|never| match never {}, |(text, _)| text)
}

/// Remove everything between `{{--` and the nearest following `--}}`,
/// including the markers.
pub(crate) fn strip_comments(text: &str) -> String {
    rewrite_blocks(text, Token::BeginComment, Token::EndComment, |_, _, _| {})
}

/// Replace variable tags with values from the [`Data`].
///
/// `{{key}}` is replaced only when the key exists. `{{key||default}}` is
/// always replaced, using the default text when the key does not exist or
/// holds null.
/// Values pass through the [`Escape`] unless the tag begins with `!`.
pub(crate) fn interpolate(text: &str, data: &Data, escaper: &dyn Escape) -> Result<String, Error> {
    let (text, _) = rewrite(text, |buffer, token, region| -> Result<bool, Error> {
        let argument = token.argument(text, region);
        let (value, raw) = match token {
            Token::Variable { raw } => match data.get(argument) {
                Some(value) => (value.clone(), raw),
                None => return Ok(false),
            },
            Token::Default { raw } => {
                let (key, default) = argument.split_once("||").unwrap_or((argument, ""));
                let value = data
                    .get(key)
                    .filter(|value| !value.is_null())
                    .cloned()
                    .unwrap_or_else(|| Value::String(default.to_string()));
                (value, raw)
            }
            _ => return Ok(false),
        };

        let mut pipe = Pipe::new(buffer);
        let written = if raw {
            pipe.write_value(&value)
        } else {
            pipe.write_escaped(&value, escaper)
        };
        written.map_err(error_write)?;

        Ok(true)
    })?;

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::{capture, inject, interpolate, place, strip_comments};
    use crate::{data::Data, escape::HtmlEscape, inject::Injectables, section::Sections, Store};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_capture() {
        let mut sections = Sections::new();
        let text = capture(
            "a@section:title\n  Welcome home  \n@endsection b",
            &mut sections,
        );

        assert_eq!(text, "a b");
        assert_eq!(sections.get("title"), Some("Welcome home"));
    }

    #[test]
    fn test_capture_overwrites_and_trims_name() {
        let mut sections = Sections::new().with("title", "old");
        capture("@section: title \r\nnew\n@endsection", &mut sections);

        assert_eq!(sections.get("title"), Some("new"));
    }

    #[test]
    fn test_capture_malformed_is_literal() {
        let mut sections = Sections::new();
        let source = "@section:title@endsection @section:\nbody\n@endsection";

        assert_eq!(capture(source, &mut sections), source);
        assert!(sections.is_empty());
    }

    #[test]
    fn test_capture_unreachable_name_is_literal() {
        let mut sections = Sections::new();
        let source = "@section:hero:top\nHi\n@endsection[@place:hero:top]";

        assert_eq!(capture(source, &mut sections), source);
        let source = "@section:main content\nHi\n@endsection";

        assert_eq!(capture(source, &mut sections), source);
        assert!(sections.is_empty());
    }

    #[test]
    fn test_capture_many_unpaired() {
        let mut sections = Sections::new();
        let source = "@section:".repeat(20_000);

        assert_eq!(capture(&source, &mut sections), source);
        assert!(sections.is_empty());
    }

    #[test]
    fn test_capture_unpaired_is_literal() {
        let mut sections = Sections::new();

        assert_eq!(capture("@endsection @section:a\n", &mut sections), "@endsection @section:a\n");
        assert!(sections.is_empty());
    }

    #[test]
    fn test_capture_nearest_end() {
        let mut sections = Sections::new();
        let text = capture(
            "@section:a\n1\n@endsection|@section:b\n2\n@endsection",
            &mut sections,
        );

        assert_eq!(text, "|");
        assert_eq!(sections.get("a"), Some("1"));
        assert_eq!(sections.get("b"), Some("2"));
    }

    #[test]
    fn test_place() {
        let sections = Sections::new().with("title", "Home");

        assert_eq!(
            place("@place:title|?@place:title|?@place:side|@place:side", &sections),
            "Home|Home||@place:side"
        );
    }

    #[test]
    fn test_place_exact_name() {
        let sections = Sections::new().with("nav", "<nav>");

        assert_eq!(place("@place:navbar", &sections), "@place:navbar");
    }

    #[test]
    fn test_place_content_not_rescanned() {
        let sections = Sections::new()
            .with("a", "?@place:b")
            .with("b", "B");

        assert_eq!(place("@place:a", &sections), "?@place:b");
    }

    #[test]
    fn test_inject() {
        let injectables = Injectables::new()
            .with("js", "app.js", 5)
            .with("footer", "<p>fin</p>", 5);

        assert_eq!(
            inject("@inject:js|@inject:footer|@inject:css|@inject:nope", &injectables),
            "<script src=\"app.js\"></script>\n|<p>fin</p>\n||@inject:nope"
        );
    }

    #[test]
    fn test_strip_comments() {
        let source = "a{{-- one\ntwo --}}b{{--x--}}c --}} {{-- d";

        assert_eq!(strip_comments(source), "abc --}} {{-- d");
        assert_eq!(strip_comments(&strip_comments(source)), strip_comments(source));
    }

    #[test]
    fn test_strip_comments_unclosed_variable() {
        assert_eq!(strip_comments("a{{-- TODO {{name --}}b"), "ab");
        assert_eq!(strip_comments("a{{--{{x||--}}b"), "ab");
    }

    #[test]
    fn test_interpolate() {
        let data = helper_data(json!({ "user": { "name": "<Ada>" }, "gone": null }));
        let output = interpolate(
            "{{user.name}}|{{!user.name}}|{{missing}}|[{{gone}}]",
            &data,
            &HtmlEscape,
        );

        assert_eq!(output.unwrap(), "&lt;Ada&gt;|<Ada>|{{missing}}|[]");
    }

    #[test]
    fn test_interpolate_defaults() {
        let data = helper_data(json!({ "user": { "age": 30 } }));
        let output = interpolate(
            "{{user.age||18}}|{{user.height||<b>}}|{{!user.height||<b>}}|{{x||}}",
            &data,
            &HtmlEscape,
        );

        assert_eq!(output.unwrap(), "30|&lt;b&gt;|<b>|");
    }

    #[test]
    fn test_interpolate_default_for_null() {
        let data = helper_data(json!({ "user": { "age": null } }));
        let output = interpolate("{{user.age||18}}|[{{user.age}}]", &data, &HtmlEscape);

        assert_eq!(output.unwrap(), "18|[]");
    }

    #[test]
    fn test_interpolate_keys_are_exact() {
        let data = helper_data(json!({ "name": "Ada" }));
        let output = interpolate("{{ name }}", &data, &HtmlEscape);

        assert_eq!(output.unwrap(), "{{ name }}");
    }

    fn helper_data(value: serde_json::Value) -> Data {
        Data::flatten(&Store::from_value(value).unwrap())
    }
}
