use crate::core::cleaners::LocationCleaner;
use crate::core::host::AppHost;
use crate::log_warn;
use glob::glob;
use std::path::PathBuf;

/// Cleans caller-supplied directories, one level deep.
///
/// Entries containing glob metacharacters are expanded; anything else is
/// used verbatim. Use with care: whatever directory is named gets emptied.
#[derive(Debug, Default, Clone)]
pub struct CustomPathsCleaner {
    patterns: Vec<String>,
}

impl CustomPathsCleaner {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CustomPathsCleaner {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }
}

fn is_pattern(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

impl LocationCleaner for CustomPathsCleaner {
    fn name(&self) -> &str {
        "Custom Paths"
    }

    fn find_paths(&self, _host: &dyn AppHost) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        // Blank entries come from stray commas on the command line.
        for pattern in self.patterns.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
            // --- Plain paths ---
            // Kept even when missing; the clear step reports them as absent.
            if !is_pattern(pattern) {
                paths.push(PathBuf::from(pattern));
                continue;
            }
            // --- Glob patterns ---
            // Matches that cannot be read are dropped.
            match glob(pattern) {
                Ok(matches) => paths.extend(matches.flatten()),
                Err(e) => log_warn!("Ignoring invalid pattern '{}': {}", pattern, e),
            }
        }
        paths
    }
}
