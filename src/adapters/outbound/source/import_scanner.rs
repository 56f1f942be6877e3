//! Import-site extraction for JavaScript and TypeScript sources using tree-sitter.

use crate::analysis::domain::{matches_package, FileUsage, ImportKind, ImportRecord, UsageReport};
use crate::ports::outbound::UsageScanner;
use crate::shared::logging::Logger;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use std::path::Path;
use tracing::{debug, trace, warn};
use tree_sitter::{Language, Node, Parser};
use walkdir::{DirEntry, WalkDir};

/// Directories never descended into.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    "out",
    ".next",
    ".nuxt",
    "coverage",
    ".git",
    ".turbo",
];

/// TreeSitterImportScanner adapter implementing [`UsageScanner`]
///
/// Walks the project without following symlinks, parses every JS/TS source
/// file and keeps the import sites that reference the target package or one
/// of its subpaths.
pub struct TreeSitterImportScanner {
    logger: Logger,
    excluded_dirs: Vec<String>,
}

impl TreeSitterImportScanner {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger: logger.child("import_scanner"),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }

    /// Adds directory names to skip on top of [`DEFAULT_EXCLUDED_DIRS`].
    pub fn with_extra_excluded_dirs(mut self, dirs: &[String]) -> Self {
        for dir in dirs {
            if !self.excluded_dirs.contains(dir) {
                self.excluded_dirs.push(dir.clone());
            }
        }
        self
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.excluded_dirs.iter().any(|d| d == name))
    }

    fn scan_file(&self, parser: &mut Parser, path: &Path, package: &str) -> Vec<ImportRecord> {
        let Some(language) = language_for(path) else {
            return Vec::new();
        };
        let source = match read_regular_file(path) {
            Ok(source) => source,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable source file");
                return Vec::new();
            }
        };
        if parser.set_language(&language).is_err() {
            return Vec::new();
        }
        let Some(tree) = parser.parse(&source, None) else {
            debug!(path = %path.display(), "Parser produced no tree");
            return Vec::new();
        };
        extract_imports(tree.root_node(), &source, package)
    }
}

impl UsageScanner for TreeSitterImportScanner {
    fn scan(&self, project_dir: &Path, package: &str) -> Result<UsageReport> {
        self.logger.in_scope(|| {
            let mut parser = Parser::new();
            let mut files = Vec::new();
            let mut scanned = 0usize;

            let walker = WalkDir::new(project_dir)
                .follow_links(false)
                .into_iter()
                .filter_entry(|entry| !self.is_excluded(entry));

            for entry in walker {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        debug!(error = %e, "Skipping unreadable directory entry");
                        continue;
                    }
                };
                if !entry.file_type().is_file() || language_for(entry.path()).is_none() {
                    continue;
                }
                scanned += 1;

                let imports = self.scan_file(&mut parser, entry.path(), package);
                if imports.is_empty() {
                    continue;
                }
                let relative = entry.path().strip_prefix(project_dir).unwrap_or(entry.path());
                let relative = to_forward_slashes(relative);
                trace!(file = %relative, imports = imports.len(), "Found import sites");
                files.push(FileUsage::new(relative, imports));
            }

            debug!(
                package,
                scanned_files = scanned,
                matching_files = files.len(),
                "Import scan completed"
            );
            Ok(UsageReport::new(package.to_string(), files))
        })
    }
}

/// Maps a source file extension to its grammar.
fn language_for(path: &Path) -> Option<Language> {
    match path.extension()?.to_str()? {
        "ts" | "mts" | "cts" => Some(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
        "tsx" => Some(tree_sitter_typescript::LANGUAGE_TSX.into()),
        "js" | "jsx" | "mjs" | "cjs" => Some(tree_sitter_javascript::LANGUAGE.into()),
        _ => None,
    }
}

fn to_forward_slashes(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Collects every import site for `package` below `root`.
///
/// Iterative depth-first traversal, so deeply nested sources cannot overflow
/// the stack.
pub fn extract_imports(root: Node<'_>, source: &str, package: &str) -> Vec<ImportRecord> {
    let mut records = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        match node.kind() {
            "import_statement" => import_statement(node, source, package, &mut records),
            "export_statement" => export_statement(node, source, package, &mut records),
            "call_expression" => call_expression(node, source, package, &mut records),
            _ => {}
        }

        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }

    records
}

fn text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

fn unquote(raw: &str) -> &str {
    raw.trim_matches(|c| c == '"' || c == '\'' || c == '`')
}

/// Value of a string literal node.
fn string_value(node: Node<'_>, source: &str) -> Option<String> {
    (node.kind() == "string").then(|| unquote(text(node, source)).to_string())
}

fn line_of(node: Node<'_>) -> usize {
    node.start_position().row + 1
}

fn named_child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.named_children(&mut cursor).find(|child| child.kind() == kind);
    found
}

/// Original names from `{ a, b as c }` style lists.
fn specifier_names(list: Node<'_>, specifier_kind: &str, source: &str) -> Vec<String> {
    let mut cursor = list.walk();
    let names = list
        .named_children(&mut cursor)
        .filter(|child| child.kind() == specifier_kind)
        .filter_map(|child| child.child_by_field_name("name"))
        .map(|name| unquote(text(name, source)).to_string())
        .collect();
    names
}

fn push(
    records: &mut Vec<ImportRecord>,
    kind: ImportKind,
    source: &str,
    specifiers: Vec<String>,
    line: usize,
) {
    records.push(ImportRecord {
        kind,
        source: source.to_string(),
        specifiers,
        line,
    });
}

fn import_statement(node: Node<'_>, source: &str, package: &str, records: &mut Vec<ImportRecord>) {
    let line = line_of(node);

    // import x = require("pkg")
    if let Some(clause) = named_child_of_kind(node, "import_require_clause") {
        let Some(module) = clause
            .child_by_field_name("source")
            .and_then(|s| string_value(s, source))
        else {
            return;
        };
        if matches_package(&module, package) {
            let local = named_child_of_kind(clause, "identifier")
                .map(|id| vec![text(id, source).to_string()])
                .unwrap_or_default();
            push(records, ImportKind::Default, &module, local, line);
        }
        return;
    }

    let Some(module) = node
        .child_by_field_name("source")
        .and_then(|s| string_value(s, source))
    else {
        return;
    };
    if !matches_package(&module, package) {
        return;
    }

    let Some(clause) = named_child_of_kind(node, "import_clause") else {
        push(records, ImportKind::SideEffect, &module, Vec::new(), line);
        return;
    };

    let mut cursor = clause.walk();
    for part in clause.named_children(&mut cursor) {
        match part.kind() {
            "identifier" => push(
                records,
                ImportKind::Default,
                &module,
                vec![text(part, source).to_string()],
                line,
            ),
            "namespace_import" => {
                let local = named_child_of_kind(part, "identifier")
                    .map(|id| vec![text(id, source).to_string()])
                    .unwrap_or_default();
                push(records, ImportKind::Namespace, &module, local, line);
            }
            "named_imports" => push(
                records,
                ImportKind::Named,
                &module,
                specifier_names(part, "import_specifier", source),
                line,
            ),
            _ => {}
        }
    }
}

fn export_statement(node: Node<'_>, source: &str, package: &str, records: &mut Vec<ImportRecord>) {
    let Some(module) = node
        .child_by_field_name("source")
        .and_then(|s| string_value(s, source))
    else {
        return;
    };
    if !matches_package(&module, package) {
        return;
    }

    let specifiers = named_child_of_kind(node, "export_clause")
        .map(|clause| specifier_names(clause, "export_specifier", source))
        .unwrap_or_default();
    push(records, ImportKind::ReExport, &module, specifiers, line_of(node));
}

fn call_expression(node: Node<'_>, source: &str, package: &str, records: &mut Vec<ImportRecord>) {
    let Some(function) = node.child_by_field_name("function") else {
        return;
    };
    let kind = match function.kind() {
        "import" => ImportKind::Dynamic,
        "identifier" if text(function, source) == "require" => ImportKind::Require,
        _ => return,
    };

    let Some(module) = node
        .child_by_field_name("arguments")
        .and_then(|args| args.named_child(0))
        .and_then(|arg| string_value(arg, source))
    else {
        return;
    };
    if !matches_package(&module, package) {
        return;
    }

    let specifiers = match kind {
        ImportKind::Require => require_bindings(node, source),
        _ => Vec::new(),
    };
    push(records, kind, &module, specifiers, line_of(node));
}

/// Names bound by `const x = require(...)` or `const { a, b: c } = require(...)`.
/// Destructured bindings report the original property names.
fn require_bindings(call: Node<'_>, source: &str) -> Vec<String> {
    let Some(declarator) = call.parent().filter(|p| p.kind() == "variable_declarator") else {
        return Vec::new();
    };
    let Some(binding) = declarator.child_by_field_name("name") else {
        return Vec::new();
    };

    match binding.kind() {
        "identifier" => vec![text(binding, source).to_string()],
        "object_pattern" => {
            let mut cursor = binding.walk();
            let names = binding
                .named_children(&mut cursor)
                .filter_map(|property| match property.kind() {
                    "shorthand_property_identifier_pattern" => {
                        Some(text(property, source).to_string())
                    }
                    "pair_pattern" => property
                        .child_by_field_name("key")
                        .map(|key| unquote(text(key, source)).to_string()),
                    "object_assignment_pattern" => property
                        .child_by_field_name("left")
                        .map(|left| text(left, source).to_string()),
                    _ => None,
                })
                .collect();
            names
        }
        _ => Vec::new(),
    }
}
