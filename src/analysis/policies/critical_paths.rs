use std::sync::LazyLock;

static ROUTE_DIRECTORY: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?i)(^|/)(api|routes)/").expect("route directory pattern is valid")
});

const API_POINTS: u32 = 10;
const MIDDLEWARE_POINTS: u32 = 5;
const AUTH_POINTS: u32 = 5;
const MAX_POINTS: u32 = 20;

/// Which high-blast-radius areas a set of files touches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CriticalPathHits {
    pub api: bool,
    pub middleware: bool,
    pub auth: bool,
}

impl CriticalPathHits {
    /// 10 for API/route directories, 5 each for middleware and auth,
    /// capped at 20.
    pub fn score(&self) -> u32 {
        let mut score = 0;
        if self.api {
            score += API_POINTS;
        }
        if self.middleware {
            score += MIDDLEWARE_POINTS;
        }
        if self.auth {
            score += AUTH_POINTS;
        }
        score.min(MAX_POINTS)
    }

    /// Human names of the areas hit, in fixed order.
    pub fn areas(&self) -> Vec<&'static str> {
        let mut areas = Vec::new();
        if self.api {
            areas.push("API routes");
        }
        if self.middleware {
            areas.push("middleware");
        }
        if self.auth {
            areas.push("auth");
        }
        areas
    }

    pub fn any(&self) -> bool {
        self.api || self.middleware || self.auth
    }
}

/// CriticalPaths policy: classifies project-relative file paths.
///
/// API usage means a path segment named `api` or `routes` is a directory
/// on the way to the file. Middleware and auth are case-insensitive
/// substrings anywhere in the path.
pub struct CriticalPaths;

impl CriticalPaths {
    pub fn detect<'a, I>(paths: I) -> CriticalPathHits
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut hits = CriticalPathHits::default();
        for path in paths {
            let lower = path.to_lowercase();
            hits.api |= ROUTE_DIRECTORY.is_match(&lower);
            hits.middleware |= lower.contains("middleware");
            hits.auth |= lower.contains("auth");
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_and_routes_directories() {
        assert!(CriticalPaths::detect(["src/api/users.ts"]).api);
        assert!(CriticalPaths::detect(["app/api/session/route.ts"]).api);
        assert!(CriticalPaths::detect(["src/routes/index.js"]).api);
        assert!(CriticalPaths::detect(["API/handler.ts"]).api);
        assert!(!CriticalPaths::detect(["src/apiClient.ts"]).api);
        assert!(!CriticalPaths::detect(["src/rapid/x.ts"]).api);
    }

    #[test]
    fn test_substring_matches() {
        let hits = CriticalPaths::detect(["src/Middleware.ts", "lib/oauth/provider.ts"]);
        assert!(hits.middleware);
        assert!(hits.auth);
        assert!(!hits.api);
        assert_eq!(hits.score(), 10);
    }

    #[test]
    fn test_score_is_capped() {
        let hits = CriticalPaths::detect(["src/api/auth/middleware.ts"]);
        assert_eq!(hits.areas(), vec!["API routes", "middleware", "auth"]);
        assert_eq!(hits.score(), 20);
    }

    #[test]
    fn test_api_plus_auth() {
        let hits = CriticalPaths::detect(["src/api/users.ts", "src/auth/session.ts"]);
        assert_eq!(hits.score(), 15);
    }

    #[test]
    fn test_no_hits() {
        let hits = CriticalPaths::detect(["src/utils/format.ts"]);
        assert!(!hits.any());
        assert_eq!(hits.score(), 0);
    }
}
