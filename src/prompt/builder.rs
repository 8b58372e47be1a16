// src/prompt/builder.rs
//! Template parsing and rendering.
//!
//! A template is parsed once into literal runs and placeholder slots, so
//! rendering is a single pass that never re-scans substituted values.

use std::path::Path;

use thiserror::Error;

use super::default::DEFAULT_TEMPLATE;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template: {0}")]
    Read(#[from] std::io::Error),

    #[error("unknown placeholder {{{0}}}; expected {{person}} or {{event}}")]
    UnknownPlaceholder(String),

    #[error("placeholder opened at byte {0} is never closed")]
    UnclosedPlaceholder(usize),

    #[error("unmatched '}}' at byte {0}; write '}}}}' for a literal brace")]
    UnmatchedBrace(usize),

    #[error("template never uses {{{0}}}")]
    MissingPlaceholder(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Person,
    Event,
}

/// A parsed prompt template with `{person}` and `{event}` slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    segments: Vec<Segment>,
}

impl PromptTemplate {
    /// Parse template text. `{{` and `}}` produce literal braces.
    pub fn parse(text: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = text.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(TemplateError::UnclosedPlaceholder(offset));
                    }

                    let slot = match name.trim() {
                        "person" => Segment::Person,
                        "event" => Segment::Event,
                        _ => return Err(TemplateError::UnknownPlaceholder(name)),
                    };
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(slot);
                }
                '}' => return Err(TemplateError::UnmatchedBrace(offset)),
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        if !segments.contains(&Segment::Person) {
            return Err(TemplateError::MissingPlaceholder("person"));
        }
        if !segments.contains(&Segment::Event) {
            return Err(TemplateError::MissingPlaceholder("event"));
        }

        Ok(Self { segments })
    }

    /// Read and parse a template file.
    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Substitute both values. Pure: identical inputs give identical output.
    pub fn render(&self, person: &str, event: &str) -> String {
        let mut prompt = String::with_capacity(self.len_hint(person, event));
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => prompt.push_str(text),
                Segment::Person => prompt.push_str(person),
                Segment::Event => prompt.push_str(event),
            }
        }
        prompt
    }

    fn len_hint(&self, person: &str, event: &str) -> usize {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Literal(text) => text.len(),
                Segment::Person => person.len(),
                Segment::Event => event.len(),
            })
            .sum()
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        // The built-in text is covered by tests; a parse failure here is a
        // programming error in default.rs.
        Self::parse(DEFAULT_TEMPLATE).unwrap_or_else(|e| panic!("built-in template is invalid: {e}"))
    }
}

/// Render the built-in template.
pub fn build_prompt(person: &str, event: &str) -> String {
    PromptTemplate::default().render(person, event)
}
