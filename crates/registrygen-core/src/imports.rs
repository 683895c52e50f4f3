//! Top-level import statement scanner
//!
//! Recognizes the three module-loading forms that matter for dependency
//! tracking:
//!
//! ```text
//! import Default, { a, b as c } from "spec";
//! import "spec";
//! import Name = require("spec");
//! ```
//!
//! Statements must begin a line. Dynamic `import()` calls and re-exports are
//! not tracked.

use regex::Regex;
use std::sync::LazyLock;

static IMPORT_FROM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)^[ \t]*import[ \t]+(?:type[ \t]+)?(?P<clause>[\w$*{},\s]+?)\s+from\s*["'](?P<spec>[^"'\n]+)["']"#,
    )
    .expect("import-from pattern is valid")
});

static IMPORT_SIDE_EFFECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*import\s*["'](?P<spec>[^"'\n]+)["']"#)
        .expect("side-effect import pattern is valid")
});

static IMPORT_REQUIRE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)^[ \t]*import[ \t]+(?:type[ \t]+)?(?P<name>[\w$]+)\s*=\s*require\(\s*["'](?P<spec>[^"'\n]+)["']\s*\)"#,
    )
    .expect("import-require pattern is valid")
});

/// One import statement as written in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedImport {
    pub statement: String,
    pub specifier: String,
    /// `default as X`, `* as X`, `orig as local` or a bare name
    pub symbols: Vec<String>,
}

/// Scan a file for import statements, in source order
pub fn scan_imports(content: &str) -> Vec<ScannedImport> {
    let masked = mask_non_code(content);
    let content = masked.as_str();
    let mut found: Vec<(usize, ScannedImport)> = Vec::new();

    for caps in IMPORT_FROM.captures_iter(content) {
        let Some(whole) = caps.get(0) else { continue };
        found.push((
            whole.start(),
            ScannedImport {
                statement: statement_text(content, whole.end(), whole.as_str()),
                specifier: caps["spec"].to_string(),
                symbols: parse_clause(&caps["clause"]),
            },
        ));
    }

    for caps in IMPORT_SIDE_EFFECT.captures_iter(content) {
        let Some(whole) = caps.get(0) else { continue };
        found.push((
            whole.start(),
            ScannedImport {
                statement: statement_text(content, whole.end(), whole.as_str()),
                specifier: caps["spec"].to_string(),
                symbols: Vec::new(),
            },
        ));
    }

    for caps in IMPORT_REQUIRE.captures_iter(content) {
        let Some(whole) = caps.get(0) else { continue };
        found.push((
            whole.start(),
            ScannedImport {
                statement: statement_text(content, whole.end(), whole.as_str()),
                specifier: caps["spec"].to_string(),
                symbols: vec![format!("* as {}", &caps["name"])],
            },
        ));
    }

    found.sort_by_key(|(start, _)| *start);
    found.into_iter().map(|(_, import)| import).collect()
}

/// Blank out block comments and template literal bodies
///
/// Masked characters become spaces of the same byte length and newlines are
/// kept, so offsets and line starts match the original text.
fn mask_non_code(content: &str) -> String {
    #[derive(Clone, Copy, PartialEq)]
    enum State {
        Code,
        LineComment,
        BlockComment,
        Quoted(char),
        Template,
    }

    let mut masked = String::with_capacity(content.len());
    let mut state = State::Code;
    let mut chars = content.chars().peekable();

    let blank = |masked: &mut String, c: char| {
        if c == '\n' {
            masked.push('\n');
        } else {
            masked.extend(std::iter::repeat_n(' ', c.len_utf8()));
        }
    };

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '/' if chars.peek() == Some(&'/') => {
                    state = State::LineComment;
                    masked.push(c);
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = State::BlockComment;
                    masked.push_str("  ");
                }
                '"' | '\'' => {
                    state = State::Quoted(c);
                    masked.push(c);
                }
                '`' => {
                    state = State::Template;
                    masked.push(c);
                }
                _ => masked.push(c),
            },
            State::LineComment => {
                if c == '\n' {
                    state = State::Code;
                }
                masked.push(c);
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Code;
                    masked.push_str("  ");
                } else {
                    blank(&mut masked, c);
                }
            }
            State::Quoted(quote) => {
                masked.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        masked.push(escaped);
                    }
                } else if c == quote || c == '\n' {
                    state = State::Code;
                }
            }
            State::Template => {
                if c == '\\' {
                    blank(&mut masked, c);
                    if let Some(escaped) = chars.next() {
                        blank(&mut masked, escaped);
                    }
                } else if c == '`' {
                    state = State::Code;
                    masked.push(c);
                } else {
                    blank(&mut masked, c);
                }
            }
        }
    }

    masked
}

fn statement_text(content: &str, end: usize, matched: &str) -> String {
    let mut statement = matched.trim().to_string();
    if content[end..].starts_with(';') {
        statement.push(';');
    }
    statement
}

/// Render the binding clause of an import into symbol descriptions
fn parse_clause(clause: &str) -> Vec<String> {
    let clause = clause.trim();
    let mut symbols = Vec::new();

    let (head, named) = match clause.find('{') {
        Some(open) => {
            let close = clause.rfind('}').filter(|&c| c > open).unwrap_or(clause.len());
            (&clause[..open], Some(&clause[open + 1..close]))
        }
        None => (clause, None),
    };

    for part in head.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.strip_prefix('*') {
            Some(rest) => {
                let rest = rest.trim();
                let name = rest.strip_prefix("as").map(str::trim).unwrap_or(rest);
                symbols.push(format!("* as {}", name));
            }
            None => symbols.push(format!("default as {}", part)),
        }
    }

    if let Some(named) = named {
        for element in named.split(',') {
            let mut tokens: Vec<&str> = element.split_whitespace().collect();
            if tokens.len() > 1 && tokens[0] == "type" && tokens[1] != "as" {
                tokens.remove(0);
            }
            match tokens.as_slice() {
                [] => {}
                [original, "as", local] => symbols.push(format!("{} as {}", original, local)),
                _ => symbols.push(tokens.join(" ")),
            }
        }
    }

    symbols
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_and_named_imports() {
        let imports = scan_imports("import React, { useState, useEffect as effect } from \"react\";\n");
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].specifier, "react");
        assert_eq!(
            imports[0].symbols,
            vec!["default as React", "useState", "useEffect as effect"]
        );
        assert_eq!(
            imports[0].statement,
            "import React, { useState, useEffect as effect } from \"react\";"
        );
    }

    #[test]
    fn test_namespace_import() {
        let imports = scan_imports("import * as Dialog from '@radix-ui/react-dialog'\n");
        assert_eq!(imports[0].specifier, "@radix-ui/react-dialog");
        assert_eq!(imports[0].symbols, vec!["* as Dialog"]);
    }

    #[test]
    fn test_multiline_named_import() {
        let source = "import {\n  Card,\n  CardHeader,\n  type CardProps,\n} from \"@/components/ui/card\";\n";
        let imports = scan_imports(source);
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].specifier, "@/components/ui/card");
        assert_eq!(imports[0].symbols, vec!["Card", "CardHeader", "CardProps"]);
    }

    #[test]
    fn test_type_only_import() {
        let imports = scan_imports("import type { Props } from \"./types\";\n");
        assert_eq!(imports[0].specifier, "./types");
        assert_eq!(imports[0].symbols, vec!["Props"]);
    }

    #[test]
    fn test_side_effect_import_has_no_symbols() {
        let imports = scan_imports("import \"./globals.css\";\n");
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].specifier, "./globals.css");
        assert!(imports[0].symbols.is_empty());
    }

    #[test]
    fn test_import_equals_require() {
        let imports = scan_imports("import fs = require(\"fs\");\n");
        assert_eq!(imports[0].specifier, "fs");
        assert_eq!(imports[0].symbols, vec!["* as fs"]);
    }

    #[test]
    fn test_source_order_is_preserved() {
        let source = "import \"./a.css\";\n\
                      import b from \"./b\";\n\
                      import c = require(\"./c\");\n\
                      import { d } from \"./d\";\n";
        let specs: Vec<_> = scan_imports(source)
            .into_iter()
            .map(|i| i.specifier)
            .collect();
        assert_eq!(specs, vec!["./a.css", "./b", "./c", "./d"]);
    }

    #[test]
    fn test_non_top_level_and_commented_imports_are_skipped() {
        let source = "// import x from \"nope\";\n\
                      const y = await import(\"./lazy\");\n\
                      export { z } from \"./z\";\n";
        assert!(scan_imports(source).is_empty());
    }

    #[test]
    fn test_imports_inside_block_comments_are_skipped() {
        let source = "/*\nimport legacy from \"lodash\";\n*/\n\
                      /** import \"./old.css\"; */\n\
                      export const a = 1;\n";
        assert!(scan_imports(source).is_empty());
    }

    #[test]
    fn test_imports_inside_template_literals_are_skipped() {
        let source = "const doc = `\nimport { x } from \"./example\";\n`;\n\
                      import { real } from \"./real\";\n";
        let imports = scan_imports(source);
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].specifier, "./real");
        assert_eq!(imports[0].statement, "import { real } from \"./real\";");
    }

    #[test]
    fn test_comment_markers_inside_strings_do_not_hide_imports() {
        let source = "const glob = \"src/*\";\n\
                      import { a } from \"./a\";\n\
                      const end = \"*/\";\n";
        let imports = scan_imports(source);
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].specifier, "./a");
    }

    #[test]
    fn test_code_after_block_comment_is_scanned() {
        let source = "/* header é */\nimport React from \"react\";\n";
        let imports = scan_imports(source);
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].symbols, vec!["default as React"]);
    }
}
