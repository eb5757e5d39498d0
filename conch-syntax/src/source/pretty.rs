// This file is part of conch, a POSIX-style shell.
// Copyright (C) 2026 conch authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Pretty-printing diagnostic messages containing references to source code
//!
//! Errors from the parser and the word expansion are converted to a
//! [`Message`], an intermediate structure holding a title and source-code
//! [`Annotation`]s. A message can in turn be converted to an
//! `annotate_snippets::Group` and rendered into the string that is written to
//! the standard error:
//!
//! ```
//! # use conch_syntax::parser::parse_line;
//! # use conch_syntax::source::pretty::Message;
//! let error = parse_line("echo 'unterm").unwrap_err();
//! let message = Message::from(&error);
//! let text = message.render();
//! assert!(text.contains("single quote"));
//! ```

use super::Location;
use std::borrow::Cow;

/// Type of annotation
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnnotationType {
    Error,
    Warning,
    Info,
    Note,
    Help,
}

/// Source code fragment annotated with a label
///
/// Annotations are part of an entire [`Message`].
#[derive(Clone, Debug)]
pub struct Annotation<'a> {
    /// Type of annotation
    pub r#type: AnnotationType,
    /// String that describes the annotated part of the source code
    pub label: Cow<'a, str>,
    /// Position of the annotated fragment in the source code
    pub location: &'a Location,
}

impl<'a> Annotation<'a> {
    /// Creates a new annotation.
    #[must_use]
    pub fn new(r#type: AnnotationType, label: Cow<'a, str>, location: &'a Location) -> Self {
        Annotation {
            r#type,
            label,
            location,
        }
    }
}

/// Entire diagnostic message
#[derive(Clone, Debug)]
pub struct Message<'a> {
    /// Type of this message
    pub r#type: AnnotationType,
    /// String that communicates the most important information in this message
    pub title: Cow<'a, str>,
    /// References to source code fragments annotated with additional information
    pub annotations: Vec<Annotation<'a>>,
}

impl Message<'_> {
    /// Renders this message to a plain string ending with a newline.
    #[must_use]
    pub fn render(&self) -> String {
        let group = annotate_snippets::Group::from(self);
        let renderer = annotate_snippets::Renderer::plain();
        format!("{}\n", renderer.render(&[group]))
    }
}

/// Converts [`AnnotationType`] into `annotate_snippets::Level`.
impl<'a> From<AnnotationType> for annotate_snippets::Level<'a> {
    fn from(r#type: AnnotationType) -> Self {
        use AnnotationType::*;
        match r#type {
            Error => Self::ERROR,
            Warning => Self::WARNING,
            Info => Self::INFO,
            Note => Self::NOTE,
            Help => Self::HELP,
        }
    }
}

/// Converts [`AnnotationType`] into `annotate_snippets::AnnotationKind`.
impl From<AnnotationType> for annotate_snippets::AnnotationKind {
    fn from(r#type: AnnotationType) -> Self {
        use AnnotationType::*;
        match r#type {
            Error | Warning => Self::Primary,
            Info | Note | Help => Self::Context,
        }
    }
}

/// Converts [`Message`] into `annotate_snippets::Group`.
impl<'a> From<&'a Message<'a>> for annotate_snippets::Group<'a> {
    fn from(message: &'a Message<'a>) -> Self {
        // Convert each annotation into a snippet, merging annotations that
        // refer to the same code into one snippet.
        let mut snippets: Vec<(
            &super::Code,
            annotate_snippets::Snippet<'a, annotate_snippets::Annotation<'a>>,
            Vec<annotate_snippets::Annotation<'a>>,
        )> = Vec::new();
        for annotation in &message.annotations {
            let range = annotation.location.range.clone();
            let as_annotation = annotate_snippets::AnnotationKind::from(annotation.r#type)
                .span(range)
                .label(&annotation.label);
            let code = &*annotation.location.code;
            if let Some((_, _, annotations)) =
                snippets.iter_mut().find(|&&mut (c, _, _)| c == code)
            {
                annotations.push(as_annotation);
            } else {
                let line_start = code
                    .start_line_number
                    .get()
                    .try_into()
                    .unwrap_or(usize::MAX);
                let snippet = annotate_snippets::Snippet::source(code.value.as_str())
                    .line_start(line_start)
                    .path(code.source.label());
                snippets.push((code, snippet, vec![as_annotation]));
            }
        }

        annotate_snippets::Level::from(message.r#type)
            .primary_title(&*message.title)
            .elements(
                snippets
                    .into_iter()
                    .map(|(_, snippet, annotations)| snippet.annotations(annotations)),
            )
    }
}
