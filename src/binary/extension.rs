//! Known-text extension allow-list.
//!
//! Paths whose extension is listed here are treated as text without looking
//! at their content.

use once_cell::sync::Lazy;
use std::collections::HashSet;

static KNOWN_TEXT_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Documentation
        ".md", ".markdown", ".mdx", ".txt", ".rst", ".adoc", ".asciidoc", ".org", ".tex",
        ".bib", ".man", ".1", ".log", ".csv", ".tsv",
        // Data and configuration
        ".json", ".jsonc", ".json5", ".yaml", ".yml", ".toml", ".xml", ".ini", ".cfg",
        ".conf", ".config", ".properties", ".env", ".editorconfig", ".plist", ".hcl",
        ".tf", ".tfvars", ".nix", ".cue", ".rego", ".graphql", ".gql", ".proto",
        ".avsc", ".sql", ".ipynb",
        // Lockfiles and VCS metadata
        ".lock", ".sum", ".mod", ".gitignore", ".gitattributes", ".gitmodules",
        ".gitkeep", ".mailmap", ".dockerignore", ".npmignore", ".helmignore",
        ".prettierrc", ".eslintrc", ".babelrc", ".npmrc", ".nvmrc", ".python-version",
        ".ruby-version", ".tool-versions", ".codecov",
        // Web
        ".html", ".htm", ".xhtml", ".css", ".scss", ".sass", ".less", ".svg", ".vue",
        ".svelte", ".astro", ".hbs", ".handlebars", ".mustache", ".ejs", ".pug",
        ".twig", ".liquid", ".njk",
        // Source code
        ".go", ".rs", ".py", ".pyi", ".pyx", ".rb", ".erb", ".rake", ".gemspec", ".php",
        ".js", ".mjs", ".cjs", ".jsx", ".ts", ".mts", ".cts", ".tsx", ".java", ".kt",
        ".kts", ".scala", ".sc", ".groovy", ".gradle", ".clj", ".cljs", ".edn", ".c",
        ".h", ".cc", ".cpp", ".cxx", ".hpp", ".hh", ".hxx", ".inl", ".m", ".mm",
        ".swift", ".cs", ".csx", ".fs", ".fsx", ".vb", ".dart", ".lua", ".pl", ".pm",
        ".t", ".r", ".jl", ".ex", ".exs", ".erl", ".hrl", ".hs", ".lhs", ".ml", ".mli",
        ".elm", ".zig", ".nim", ".v", ".sv", ".vhd", ".vhdl", ".asm", ".s", ".f90",
        ".cob", ".sol", ".wat",
        // Shell and build
        ".sh", ".bash", ".zsh", ".fish", ".ksh", ".ps1", ".psm1", ".bat", ".cmd",
        ".mk", ".make", ".cmake", ".bzl", ".bazel", ".star", ".dockerfile",
        ".containerfile", ".justfile", ".tpl", ".tmpl", ".j2", ".jinja", ".jinja2",
        ".gotmpl", ".patch", ".diff", ".in", ".am", ".ac", ".spec",
    ]
    .into_iter()
    .collect()
});

/// Returns true when the final segment of `path` has an extension on the
/// known-text allow-list. Matching is case-insensitive and includes the dot.
///
/// A trailing dot (`"file."`) or a segment without a dot has no extension.
pub fn is_known_text_extension(path: &str) -> bool {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let Some(dot) = file_name.rfind('.') else {
        return false;
    };
    if dot + 1 == file_name.len() {
        return false;
    }
    let extension = file_name[dot..].to_ascii_lowercase();
    KNOWN_TEXT_EXTENSIONS.contains(extension.as_str())
}
