//! Language descriptors
//!
//! Each supported language is a single record in [`LANGUAGES`]. The lexer is
//! driven entirely by these records, so adding a language never touches the
//! engine.

use std::collections::HashMap;

use regex::Regex;
use tracing::{debug, warn};

use crate::core::error::{LitdocError, Result};
use crate::core::escape::pattern_literal;

// =============================================================================
// DESCRIPTOR TYPES
// =============================================================================

/// How a language treats backtick template literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplateLiterals {
    /// The language has no template literals.
    #[default]
    Unsupported,
    /// Template literals with `${...}` expression holes.
    TopLevel,
    /// Inside an expression hole. Only the lexer enters this state; a
    /// descriptor never starts in it.
    NestedExpression,
}

/// A here-document rule.
///
/// A heredoc opens with `start_prefix`, a delimiter matching `start_body`,
/// then `start_suffix`. It closes at the literal text
/// `stop_prefix + delimiter + stop_suffix`, where any run of `stop_indent`
/// characters may sit between the stop prefix and the delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeredocRule {
    /// Regex that must match just before `start_prefix`; empty for none.
    /// It is part of the opening, so it must not contain capture groups.
    pub start_after: &'static str,
    pub start_prefix: &'static str,
    /// Regex for the delimiter; must not contain capture groups.
    pub start_body: &'static str,
    pub start_suffix: &'static str,
    pub stop_prefix: &'static str,
    pub stop_indent: &'static str,
    pub stop_suffix: &'static str,
}

impl HeredocRule {
    /// Regex for the opening of this heredoc, capturing the delimiter in
    /// the named group `group`.
    pub(crate) fn start_pattern(&self, group: &str) -> String {
        let after = if self.start_after.is_empty() {
            String::new()
        } else {
            format!("(?:{})", self.start_after)
        };
        format!(
            "{}{}(?P<{}>{}){}",
            after,
            pattern_literal(self.start_prefix),
            group,
            self.start_body,
            pattern_literal(self.start_suffix)
        )
    }

    /// Regex for the text that closes a heredoc opened with `delimiter`.
    pub(crate) fn stop_pattern(&self, delimiter: &str) -> String {
        let indent = if self.stop_indent.is_empty() {
            String::new()
        } else {
            format!("[{}]*", pattern_literal(self.stop_indent))
        };
        format!(
            "{}{}{}{}",
            pattern_literal(self.stop_prefix),
            indent,
            pattern_literal(delimiter),
            pattern_literal(self.stop_suffix)
        )
    }
}

/// Lexical rules for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageDescriptor {
    pub name: &'static str,
    /// File extensions, without the leading dot.
    pub extensions: &'static [&'static str],
    pub inline_comments: &'static [&'static str],
    /// `(open, close)` pairs.
    pub block_comments: &'static [(&'static str, &'static str)],
    /// Multi-character quotes such as `"""`; closed by the same literal.
    pub long_strings: &'static [&'static str],
    /// Single-character quotes; backslash escapes, closed by a raw newline.
    pub short_strings: &'static [&'static str],
    pub heredocs: &'static [HeredocRule],
    pub template_literals: TemplateLiterals,
    /// The whole document is one doc block and is never lexed.
    pub doc_only: bool,
}

impl LanguageDescriptor {
    /// The marker used to write doc blocks back out, if the language has one.
    pub fn save_marker(&self) -> Option<&'static str> {
        self.inline_comments.first().copied().filter(|m| !m.is_empty())
    }

    /// The close token paired with a block comment open token.
    pub fn block_comment_close(&self, open: &str) -> Option<&'static str> {
        self.block_comments
            .iter()
            .find(|(o, _)| *o == open)
            .map(|(_, close)| *close)
    }

    /// False for languages like CSS, whose doc blocks can be read but not
    /// written back.
    pub fn has_inline_comments(&self) -> bool {
        self.save_marker().is_some()
    }

    fn matches_extension(&self, extension: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(extension))
    }
}

const NONE: &[&str] = &[];
const C_STYLE_BLOCK: &[(&str, &str)] = &[("/*", "*/")];

/// `<<` opens a heredoc only after whitespace, a command separator or the
/// start of a line. `<<<` here-strings and `1<<n` shifts stay code.
const SHELL_HEREDOC_AFTER: &str = r"(?m:^)|[ \t;&|(]";
const SHELL_WORD: &str = r"[A-Za-z_][A-Za-z0-9_]*";

const fn shell_heredoc(
    start_prefix: &'static str,
    start_body: &'static str,
    start_suffix: &'static str,
    strip_tabs: bool,
) -> HeredocRule {
    HeredocRule {
        start_after: SHELL_HEREDOC_AFTER,
        start_prefix,
        start_body,
        start_suffix,
        stop_prefix: "\n",
        stop_indent: if strip_tabs { "\t" } else { "" },
        stop_suffix: "",
    }
}

/// `<<WORD`, `<<'WORD'`, `<<"WORD"` and their `<<-` forms, whose closing
/// line may be indented with tabs.
const SHELL_HEREDOCS: &[HeredocRule] = &[
    shell_heredoc("<<", SHELL_WORD, "", false),
    shell_heredoc("<<'", r"[^'\r\n]+", "'", false),
    shell_heredoc("<<\"", r#"[^"\r\n]+"#, "\"", false),
    shell_heredoc("<<-", SHELL_WORD, "", true),
    shell_heredoc("<<-'", r"[^'\r\n]+", "'", true),
    shell_heredoc("<<-\"", r#"[^"\r\n]+"#, "\"", true),
];

// =============================================================================
// LANGUAGE TABLE
// =============================================================================

/// Every language known to the engine, in resolution order.
///
/// Extension lookup takes the first record that claims the extension, so
/// `verilog` wins `.v` over `vlang` unless a directive selects `vlang`.
pub static LANGUAGES: &[LanguageDescriptor] = &[
    // C++11 or newer; raw strings are `R"delim( ... )delim"`.
    LanguageDescriptor {
        name: "c_cpp",
        extensions: &["cc", "cpp", "c", "h"],
        inline_comments: &["//"],
        block_comments: C_STYLE_BLOCK,
        long_strings: NONE,
        short_strings: &["\""],
        heredocs: &[HeredocRule {
            start_after: "",
            start_prefix: "R\"",
            start_body: r"[^()\\ \r\n]{0,16}",
            start_suffix: "(",
            stop_prefix: ")",
            stop_indent: "",
            stop_suffix: "\"",
        }],
        template_literals: TemplateLiterals::Unsupported,
        doc_only: false,
    },
    LanguageDescriptor {
        name: "css",
        extensions: &["css"],
        inline_comments: NONE,
        block_comments: C_STYLE_BLOCK,
        long_strings: NONE,
        short_strings: &["\"", "'"],
        heredocs: &[],
        template_literals: TemplateLiterals::Unsupported,
        doc_only: false,
    },
    LanguageDescriptor {
        name: "go",
        extensions: &["go"],
        inline_comments: &["//"],
        block_comments: C_STYLE_BLOCK,
        // Raw strings.
        long_strings: &["`"],
        short_strings: &["\"", "'"],
        heredocs: &[],
        template_literals: TemplateLiterals::Unsupported,
        doc_only: false,
    },
    LanguageDescriptor {
        name: "html",
        extensions: &["html", "htm"],
        inline_comments: NONE,
        block_comments: &[("<!--", "-->")],
        long_strings: NONE,
        short_strings: NONE,
        heredocs: &[],
        template_literals: TemplateLiterals::Unsupported,
        doc_only: false,
    },
    LanguageDescriptor {
        name: "javascript",
        extensions: &["js", "mjs", "cjs", "ts"],
        inline_comments: &["//"],
        block_comments: C_STYLE_BLOCK,
        long_strings: NONE,
        short_strings: &["\"", "'"],
        heredocs: &[],
        template_literals: TemplateLiterals::TopLevel,
        doc_only: false,
    },
    LanguageDescriptor {
        name: "python",
        extensions: &["py", "pyi"],
        inline_comments: &["#"],
        block_comments: &[],
        long_strings: &["\"\"\"", "'''"],
        short_strings: &["\"", "'"],
        heredocs: &[],
        template_literals: TemplateLiterals::Unsupported,
        doc_only: false,
    },
    LanguageDescriptor {
        name: "rust",
        extensions: &["rs"],
        inline_comments: &["//"],
        block_comments: C_STYLE_BLOCK,
        long_strings: NONE,
        // Single quotes are lifetimes as often as they are chars.
        short_strings: &["\""],
        heredocs: &[],
        template_literals: TemplateLiterals::Unsupported,
        doc_only: false,
    },
    LanguageDescriptor {
        name: "shell",
        extensions: &["sh", "bash"],
        inline_comments: &["#"],
        block_comments: &[],
        long_strings: NONE,
        short_strings: &["\"", "'"],
        heredocs: SHELL_HEREDOCS,
        template_literals: TemplateLiterals::Unsupported,
        doc_only: false,
    },
    LanguageDescriptor {
        name: "toml",
        extensions: &["toml"],
        inline_comments: &["#"],
        block_comments: &[],
        long_strings: &["\"\"\"", "'''"],
        short_strings: &["\"", "'"],
        heredocs: &[],
        template_literals: TemplateLiterals::Unsupported,
        doc_only: false,
    },
    LanguageDescriptor {
        name: "verilog",
        extensions: &["v", "sv"],
        inline_comments: &["//"],
        block_comments: C_STYLE_BLOCK,
        long_strings: NONE,
        short_strings: &["\""],
        heredocs: &[],
        template_literals: TemplateLiterals::Unsupported,
        doc_only: false,
    },
    LanguageDescriptor {
        name: "vlang",
        extensions: &["v"],
        inline_comments: &["//"],
        block_comments: C_STYLE_BLOCK,
        long_strings: NONE,
        short_strings: &["\"", "'"],
        heredocs: &[],
        template_literals: TemplateLiterals::Unsupported,
        doc_only: false,
    },
    // A document that is nothing but docs.
    LanguageDescriptor {
        name: "litdoc-html",
        extensions: &["lithtml"],
        inline_comments: NONE,
        block_comments: &[],
        long_strings: NONE,
        short_strings: NONE,
        heredocs: &[],
        template_literals: TemplateLiterals::Unsupported,
        doc_only: true,
    },
];

// =============================================================================
// LANGUAGE REGISTRY
// =============================================================================

/// Default marker word for the in-source language directive.
pub const DEFAULT_DIRECTIVE: &str = "litdoc-lexer";

/// Resolves a document to its language descriptor.
pub struct LanguageRegistry {
    languages: &'static [LanguageDescriptor],
    /// Extension -> language name aliases, consulted after the table.
    aliases: HashMap<String, String>,
    directive: Regex,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self::with_directive(DEFAULT_DIRECTIVE)
    }

    /// Create a registry that looks for `<word>: <language>` on the first line.
    pub fn with_directive(word: &str) -> Self {
        // Only the first line is searched.
        let directive = Regex::new(&format!(
            r"\A[^\r\n]*?{}:[ \t]*([\w-]+)",
            pattern_literal(word)
        ))
        .unwrap_or_else(|_| unreachable!("escaped directive word always compiles"));
        Self {
            languages: LANGUAGES,
            aliases: HashMap::new(),
            directive,
        }
    }

    /// Map an extra extension onto a registered language.
    pub fn associate(&mut self, extension: &str, language: &str) {
        self.aliases.insert(
            normalize_extension(extension).to_ascii_lowercase(),
            language.to_string(),
        );
    }

    pub fn languages(&self) -> &'static [LanguageDescriptor] {
        self.languages
    }

    pub fn by_name(&self, name: &str) -> Option<&'static LanguageDescriptor> {
        self.languages.iter().find(|l| l.name == name)
    }

    /// The language named by a directive on the first line of `source`.
    pub fn directive<'s>(&self, source: &'s str) -> Option<&'s str> {
        self.directive
            .captures(source)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Resolve from an optional directive and a file extension.
    ///
    /// A directive naming a registered language wins. Otherwise the first
    /// language claiming the extension is used, then configured aliases.
    pub fn resolve(
        &self,
        directive: Option<&str>,
        extension: &str,
    ) -> Result<&'static LanguageDescriptor> {
        if let Some(name) = directive {
            if let Some(language) = self.by_name(name) {
                debug!(language = language.name, "resolved language from directive");
                return Ok(language);
            }
            warn!(directive = name, "unknown language directive; falling back to extension");
        }

        let extension = normalize_extension(extension);
        let found = self
            .languages
            .iter()
            .find(|l| l.matches_extension(extension))
            .or_else(|| {
                self.aliases
                    .get(&extension.to_ascii_lowercase())
                    .and_then(|name| self.by_name(name))
            });

        match found {
            Some(language) => {
                debug!(language = language.name, extension, "resolved language from extension");
                Ok(language)
            }
            None => Err(LitdocError::Resolution {
                directive: directive.map(str::to_string),
                extension: extension.to_string(),
            }),
        }
    }

    /// Resolve the language for `source`, honoring any directive it carries.
    pub fn resolve_source(
        &self,
        source: &str,
        extension: &str,
    ) -> Result<&'static LanguageDescriptor> {
        self.resolve(self.directive(source), extension)
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_extension(extension: &str) -> &str {
    extension.strip_prefix('.').unwrap_or(extension)
}

// =============================================================================
// TESTS
// =============================================================================
