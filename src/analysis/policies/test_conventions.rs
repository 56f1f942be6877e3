/// Extensions a test file may use, independent of the source file's own.
const TEST_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];
const TEST_MARKERS: &[&str] = &["test", "spec"];
const MIRROR_ROOTS: &[&str] = &["test", "tests", "__tests__"];
const SOURCE_ROOT: &str = "src";

/// TestConventions policy: where a test for a source file may live.
///
/// Conventions, for `src/lib/user.ts`:
/// - colocated: `src/lib/user.test.ts`, `src/lib/user.spec.tsx`, ...
/// - sibling `__tests__`: `src/lib/__tests__/user.test.ts`, `src/lib/__tests__/user.ts`
/// - mirrored tree: `test/lib/user.test.ts`, `tests/lib/user.spec.js`, `__tests__/lib/user.test.ts`
///
/// Only candidate paths are produced here; checking them against the
/// file system is the caller's job.
pub struct TestConventions;

impl TestConventions {
    /// True when `path` is itself a test file.
    pub fn is_test_file(path: &str) -> bool {
        let file_name = path.rsplit('/').next().unwrap_or(path);
        path.split('/').any(|segment| segment == "__tests__")
            || TEST_MARKERS
                .iter()
                .any(|marker| file_name.contains(&format!(".{}.", marker)))
    }

    /// Candidate test-file paths for the project-relative source `path`.
    pub fn candidates(path: &str) -> Vec<String> {
        let (dir, file_name) = match path.rsplit_once('/') {
            Some((dir, file_name)) => (dir, file_name),
            None => ("", path),
        };
        let stem = file_name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(file_name);

        let mut candidates = Vec::new();
        let tests_dir = join(dir, "__tests__");

        for ext in TEST_EXTENSIONS {
            for marker in TEST_MARKERS {
                candidates.push(join(dir, &format!("{}.{}.{}", stem, marker, ext)));
                candidates.push(join(&tests_dir, &format!("{}.{}.{}", stem, marker, ext)));
            }
            candidates.push(join(&tests_dir, &format!("{}.{}", stem, ext)));
        }

        let relative_dir = if dir == SOURCE_ROOT {
            ""
        } else {
            dir.strip_prefix(SOURCE_ROOT)
                .and_then(|rest| rest.strip_prefix('/'))
                .unwrap_or(dir)
        };
        for root in MIRROR_ROOTS {
            let mirrored = join(root, relative_dir);
            for ext in TEST_EXTENSIONS {
                for marker in TEST_MARKERS {
                    candidates.push(join(&mirrored, &format!("{}.{}.{}", stem, marker, ext)));
                }
            }
        }

        candidates.sort();
        candidates.dedup();
        candidates
    }
}

fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else if name.is_empty() {
        dir.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_test_file() {
        assert!(TestConventions::is_test_file("src/user.test.ts"));
        assert!(TestConventions::is_test_file("src/user.spec.jsx"));
        assert!(TestConventions::is_test_file("src/__tests__/user.ts"));
        assert!(!TestConventions::is_test_file("src/user.ts"));
        assert!(!TestConventions::is_test_file("src/latest.ts"));
    }

    #[test]
    fn test_colocated_candidates() {
        let candidates = TestConventions::candidates("src/lib/user.ts");
        assert!(candidates.contains(&"src/lib/user.test.ts".to_string()));
        assert!(candidates.contains(&"src/lib/user.spec.tsx".to_string()));
        assert!(candidates.contains(&"src/lib/user.test.js".to_string()));
    }

    #[test]
    fn test_tests_directory_candidates() {
        let candidates = TestConventions::candidates("src/lib/user.ts");
        assert!(candidates.contains(&"src/lib/__tests__/user.test.ts".to_string()));
        assert!(candidates.contains(&"src/lib/__tests__/user.ts".to_string()));
    }

    #[test]
    fn test_mirrored_candidates_drop_src_root() {
        let candidates = TestConventions::candidates("src/lib/user.ts");
        assert!(candidates.contains(&"test/lib/user.test.ts".to_string()));
        assert!(candidates.contains(&"tests/lib/user.spec.js".to_string()));
        assert!(candidates.contains(&"__tests__/lib/user.test.ts".to_string()));
    }

    #[test]
    fn test_root_level_file() {
        let candidates = TestConventions::candidates("index.js");
        assert!(candidates.contains(&"index.test.js".to_string()));
        assert!(candidates.contains(&"__tests__/index.test.ts".to_string()));
        assert!(candidates.contains(&"tests/index.spec.ts".to_string()));
    }

    #[test]
    fn test_file_directly_under_src() {
        let candidates = TestConventions::candidates("src/app.tsx");
        assert!(candidates.contains(&"test/app.test.tsx".to_string()));
        assert!(candidates.contains(&"src/app.test.tsx".to_string()));
    }
}
