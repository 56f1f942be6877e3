use depsight::analysis::domain::ImportRecord;
use depsight::prelude::*;
use std::path::Path;

/// Mock UsageScanner returning one default import per configured file
#[derive(Default, Clone)]
pub struct MockUsageScanner {
    pub files: Vec<String>,
    pub should_fail: bool,
}

impl MockUsageScanner {
    pub fn new(files: &[&str]) -> Self {
        Self {
            files: files.iter().map(|f| f.to_string()).collect(),
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            files: Vec::new(),
            should_fail: true,
        }
    }
}

impl UsageScanner for MockUsageScanner {
    fn scan(&self, _project_dir: &Path, package: &str) -> Result<UsageReport> {
        if self.should_fail {
            anyhow::bail!("Mock usage scan failure");
        }
        let files = self
            .files
            .iter()
            .map(|path| {
                FileUsage::new(
                    path.clone(),
                    vec![ImportRecord {
                        kind: ImportKind::Default,
                        source: package.to_string(),
                        specifiers: Vec::new(),
                        line: 1,
                    }],
                )
            })
            .collect();
        Ok(UsageReport::new(package.to_string(), files))
    }
}
