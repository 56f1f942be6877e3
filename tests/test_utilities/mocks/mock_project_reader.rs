use depsight::prelude::*;
use std::collections::HashSet;
use std::path::Path;

/// Mock ProjectReader backed by in-memory project state
#[derive(Clone)]
pub struct MockProjectReader {
    pub manifest: Option<PackageJson>,
    pub lockfiles: Vec<String>,
    pub files: HashSet<String>,
    pub coverage: CoverageSignal,
    pub tsconfig: TsConfigSignal,
    pub lint: LintSignal,
}

impl MockProjectReader {
    /// A project whose `package.json` is the given JSON document.
    pub fn new(manifest_json: &str) -> Self {
        Self {
            manifest: Some(serde_json::from_str(manifest_json).unwrap()),
            ..Self::without_manifest()
        }
    }

    pub fn without_manifest() -> Self {
        Self {
            manifest: None,
            lockfiles: Vec::new(),
            files: HashSet::new(),
            coverage: CoverageSignal::not_found(),
            tsconfig: TsConfigSignal::not_found(),
            lint: LintSignal::new(None, None),
        }
    }

    pub fn with_lockfile(mut self, name: &str) -> Self {
        self.lockfiles.push(name.to_string());
        self
    }

    pub fn with_file(mut self, relative_path: &str) -> Self {
        self.files.insert(relative_path.to_string());
        self
    }

    pub fn with_coverage(mut self, coverage: CoverageSignal) -> Self {
        self.coverage = coverage;
        self
    }

    pub fn with_tsconfig(mut self, tsconfig: TsConfigSignal) -> Self {
        self.tsconfig = tsconfig;
        self
    }

    pub fn with_lint(mut self, lint: LintSignal) -> Self {
        self.lint = lint;
        self
    }
}

impl ProjectReader for MockProjectReader {
    fn read_manifest(&self, project_dir: &Path) -> Result<PackageJson> {
        match &self.manifest {
            Some(manifest) => Ok(manifest.clone()),
            None => anyhow::bail!("No package.json found in {}", project_dir.display()),
        }
    }

    fn present_lockfiles(&self, _project_dir: &Path) -> Vec<String> {
        self.lockfiles.clone()
    }

    fn file_exists(&self, _project_dir: &Path, relative_path: &str) -> bool {
        self.files.contains(relative_path)
    }

    fn read_coverage(&self, _project_dir: &Path) -> CoverageSignal {
        self.coverage.clone()
    }

    fn read_tsconfig(&self, _project_dir: &Path) -> TsConfigSignal {
        self.tsconfig.clone()
    }

    fn read_lint_setup(&self, _project_dir: &Path, _manifest: Option<&PackageJson>) -> LintSignal {
        self.lint.clone()
    }
}
