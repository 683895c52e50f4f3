//! Leading-comment annotation grammar
//!
//! Components are declared with `//@` markers at the top of a file:
//!
//! ```text
//! //@root
//! //@type: registry:block
//! //@name: login-form
//! //@title: Login form
//! //@description: Email and password login
//! //- with remember-me support
//! //@category: auth, forms
//! //@resource: ./login.css
//! ```
//!
//! Scanning stops at the first line of code.

use crate::model::{Annotation, ComponentType};
use tracing::warn;

type MarkerHandler = fn(&mut Annotation, &str);

const MARKERS: &[(&str, MarkerHandler)] = &[
    ("//@root", |annotation, _| annotation.is_root = true),
    ("//@type", |annotation, value| match value.parse::<ComponentType>() {
        Ok(component_type) => annotation.component_type = component_type,
        Err(e) => warn!("Ignoring @type annotation: {}", e),
    }),
    ("//@name", |annotation, value| {
        annotation.name = Some(value.to_string())
    }),
    ("//@title", |annotation, value| {
        annotation.title = Some(value.to_string())
    }),
    ("//@description", |annotation, value| {
        annotation.description = Some(value.to_string())
    }),
    ("//-", |annotation, value| {
        let description = annotation.description.get_or_insert_with(String::new);
        description.push('\n');
        description.push_str(value);
    }),
    ("//@category", |annotation, value| {
        annotation.categories = split_list(value).collect();
    }),
    ("//@resource", |annotation, value| {
        annotation.resource_paths.extend(split_list(value));
    }),
];

/// Parse the leading comment block of a file into an [`Annotation`]
pub fn parse_annotation(content: &str) -> Annotation {
    let mut annotation = Annotation::default();
    let mut in_block_comment = false;

    for (index, line) in content.lines().enumerate() {
        let line = line.trim_start_matches('\u{feff}').trim();

        if in_block_comment {
            if line.contains("*/") {
                in_block_comment = false;
            }
            continue;
        }

        if line.is_empty() || (index == 0 && line.starts_with("#!")) {
            continue;
        }

        if line.starts_with("//") {
            apply_marker(&mut annotation, line);
            continue;
        }

        if let Some(rest) = line.strip_prefix("/*") {
            in_block_comment = !rest.contains("*/");
            continue;
        }

        break;
    }

    annotation
}

fn apply_marker(annotation: &mut Annotation, line: &str) {
    let found = MARKERS
        .iter()
        .find_map(|(marker, handler)| marker_value(line, marker).map(|rest| (rest, handler)));
    if let Some((rest, handler)) = found {
        let value = rest.strip_prefix(':').unwrap_or(rest).trim();
        handler(annotation, value);
    }
}

/// Text after `marker`, if `line` carries it as a whole word
///
/// `//@category` does not match `//@categories`; a word marker must be
/// followed by `:`, whitespace or the end of the line.
fn marker_value<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(marker)?;
    let word_marker = marker.ends_with(|c: char| c.is_ascii_alphanumeric());
    match rest.chars().next() {
        Some(next) if word_marker && next != ':' && !next.is_whitespace() => None,
        _ => Some(rest),
    }
}

fn split_list(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
}
