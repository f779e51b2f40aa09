use super::{
    lex::Token,
    stage::{capture, inject, interpolate, place, rewrite, strip_comments},
};
use crate::{
    data::Data,
    engine::Engine,
    loader::Loader,
    log::{error_depth, Error},
    markdown::Markdown,
    region::Region,
    section::Sections,
};

/// Resolves the tags of a template in a fixed order.
///
/// Inclusion runs first, then section capture, placement, markdown
/// inclusion, injection, comment removal and finally variables. When an
/// inclusion pass replaced any tag, the included text may contain tags of
/// its own, so the pipeline starts over on the new text.
pub struct Pipeline<'engine, 'sections> {
    /// The engine providing the loader, escaper and registered injectables.
    engine: &'engine Engine,
    /// Flattened data for this call.
    data: &'engine Data,
    /// Sections captured so far.
    sections: &'sections mut Sections,
    /// Number of times the pipeline has started over.
    depth: usize,
    /// Name of the template, used in errors.
    name: Option<&'engine str>,
}

impl<'engine, 'sections> Pipeline<'engine, 'sections> {
    /// Create a new Pipeline.
    pub fn new(
        engine: &'engine Engine,
        data: &'engine Data,
        sections: &'sections mut Sections,
    ) -> Self {
        Self {
            engine,
            data,
            sections,
            depth: 0,
            name: None,
        }
    }

    /// Set the name of the template, which is attached to errors.
    pub fn with_name(mut self, name: Option<&'engine str>) -> Self {
        self.name = name;

        self
    }

    /// Resolve every tag in the text and return the trimmed result.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if an included resource cannot be loaded or
    /// evaluated, or if inclusions are nested deeper than the configured
    /// maximum depth.
    pub fn run(mut self, text: &str) -> Result<String, Error> {
        let output = self.process(text)?;

        Ok(output.trim().to_string())
    }

    fn process(&mut self, text: &str) -> Result<String, Error> {
        let (text, count) = self.include(text, Token::Use)?;
        if count > 0 {
            return self.restart(&text);
        }

        let text = capture(&text, self.sections);
        let text = place(&text, self.sections);

        let (text, count) = self.include(&text, Token::Markdown)?;
        if count > 0 {
            return self.restart(&text);
        }

        let text = inject(&text, self.engine.injectables());
        let text = strip_comments(&text);

        interpolate(&text, self.data, self.engine.escaper())
    }

    /// Run the pipeline again on text that had inclusions resolved.
    fn restart(&mut self, text: &str) -> Result<String, Error> {
        self.depth += 1;
        let limit = self.engine.options().max_depth;
        if self.depth > limit {
            tracing::warn!(limit, "inclusion depth exceeded");
            let error = error_depth(limit);
            return Err(match self.name {
                Some(name) => error.with_name(name),
                None => error,
            });
        }
        tracing::debug!(depth = self.depth, "restarting pipeline");

        self.process(text)
    }

    /// Replace every tag of the given kind, either [`Token::Use`] or
    /// [`Token::Markdown`], with the text of the resource it names.
    ///
    /// Returns the new text and the number of replaced tags.
    fn include(&self, text: &str, kind: Token) -> Result<(String, usize), Error> {
        rewrite(text, |buffer, token, region| -> Result<bool, Error> {
            if token != kind {
                return Ok(false);
            }
            let path = token.argument(text, region);
            let included = self
                .load(path)
                .map_err(|e| self.locate(e, text, region))?;

            if kind == Token::Markdown {
                tracing::trace!(path, "included markdown");
                buffer.push_str(&self.engine.markdown().render(&included));
            } else {
                tracing::trace!(path, "included resource");
                buffer.push_str(&included);
            }

            Ok(true)
        })
    }

    /// Load the resource at the given path and evaluate it with the data.
    fn load(&self, path: &str) -> Result<String, Error> {
        self.engine.loader().load(path)?.evaluate(self.data)
    }

    /// Point an [`Error`] without a visual at the tag that caused it.
    ///
    /// After a restart the text no longer matches the named template, so the
    /// name is only attached before the first restart.
    fn locate(&self, error: Error, text: &str, region: Region) -> Error {
        if error.has_visual() {
            return error;
        }
        let error = error.with_pointer(text, region);
        match (self.name, error.name()) {
            (Some(name), None) if self.depth == 0 => error.with_name(name),
            _ => error,
        }
    }
}
