use serde::Serialize;
use std::collections::BTreeSet;

/// Syntactic form of an import site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportKind {
    /// `import { a, b as c } from "pkg"`
    Named,
    /// `import pkg from "pkg"` and `import pkg = require("pkg")`
    Default,
    /// `import * as pkg from "pkg"`
    Namespace,
    /// `require("pkg")`
    Require,
    /// `import("pkg")`
    Dynamic,
    /// `export { a } from "pkg"` and `export * from "pkg"`
    ReExport,
    /// `import "pkg"`
    SideEffect,
}

/// One import site referencing the target package.
///
/// For named and re-export forms `specifiers` holds the original exported
/// identifiers, never the local aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRecord {
    pub kind: ImportKind,
    pub source: String,
    pub specifiers: Vec<String>,
    pub line: usize,
}

/// All import sites in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileUsage {
    pub path: String,
    pub imports: Vec<ImportRecord>,
    pub lines: Vec<usize>,
}

impl FileUsage {
    pub fn new(path: String, mut imports: Vec<ImportRecord>) -> Self {
        imports.sort_by_key(|record| record.line);
        let mut lines: Vec<usize> = imports.iter().map(|record| record.line).collect();
        lines.dedup();
        Self {
            path,
            imports,
            lines,
        }
    }
}

/// Aggregate view across every file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageBreakdown {
    pub named_imports: Vec<String>,
    pub default_imports: usize,
    pub namespace_imports: usize,
}

/// Result of scanning a project for one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    pub package: String,
    pub files: Vec<FileUsage>,
    pub total_imports: usize,
    pub breakdown: UsageBreakdown,
}

impl UsageReport {
    /// Builds the report; files are ordered by path and the breakdown is
    /// derived from their records.
    pub fn new(package: String, mut files: Vec<FileUsage>) -> Self {
        files.sort_by(|a, b| a.path.cmp(&b.path));

        let mut named = BTreeSet::new();
        let mut breakdown = UsageBreakdown::default();
        let mut total_imports = 0;

        for record in files.iter().flat_map(|file| file.imports.iter()) {
            total_imports += 1;
            match record.kind {
                ImportKind::Named | ImportKind::ReExport => {
                    named.extend(record.specifiers.iter().cloned());
                }
                ImportKind::Default | ImportKind::Require => breakdown.default_imports += 1,
                ImportKind::Namespace => breakdown.namespace_imports += 1,
                ImportKind::Dynamic | ImportKind::SideEffect => {}
            }
        }
        breakdown.named_imports = named.into_iter().collect();

        Self {
            package,
            files,
            total_imports,
            breakdown,
        }
    }

    pub fn file_paths(&self) -> Vec<&str> {
        self.files.iter().map(|file| file.path.as_str()).collect()
    }
}

/// True when `source` is `package` itself or one of its subpaths.
pub fn matches_package(source: &str, package: &str) -> bool {
    source == package
        || source
            .strip_prefix(package)
            .is_some_and(|rest| rest.starts_with('/'))
}
