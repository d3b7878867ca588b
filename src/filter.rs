//! Glob-based selection of repository paths.

use anyhow::{Context, Result};
use glob::Pattern;

/// Selects the candidates matching any of `patterns`, preserving candidate
/// order. An empty pattern list selects everything. Standard shell glob
/// semantics apply (`*`, `?`, `[...]`).
pub fn filter_paths<I, S>(candidates: I, patterns: &[String]) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let candidates: Vec<String> = candidates.into_iter().map(Into::into).collect();
    if patterns.is_empty() {
        return Ok(candidates);
    }
    let compiled: Vec<Pattern> = patterns
        .iter()
        .map(|p| Pattern::new(p).with_context(|| format!("invalid pattern \"{p}\"")))
        .collect::<Result<_>>()?;
    Ok(candidates
        .into_iter()
        .filter(|candidate| compiled.iter().any(|p| p.matches(candidate)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_pattern_list_selects_everything() {
        let candidates = paths(&["alpha", "beta", "sub/gamma"]);
        let selected = filter_paths(candidates.clone(), &[]).unwrap();
        assert_eq!(selected, candidates);
    }

    #[test]
    fn union_of_patterns_without_duplicates() {
        let candidates = paths(&["alpha", "apex", "beta", "gamma"]);
        let patterns = vec!["a*".to_string(), "b*".to_string(), "al*".to_string()];
        let selected = filter_paths(candidates, &patterns).unwrap();
        // "alpha" matches both a* and al* but appears once.
        assert_eq!(selected, paths(&["alpha", "apex", "beta"]));
    }

    #[test]
    fn question_mark_and_class_globbing() {
        let candidates = paths(&["r1", "r2", "r10"]);
        let selected = filter_paths(candidates.clone(), &["r?".to_string()]).unwrap();
        assert_eq!(selected, paths(&["r1", "r2"]));

        let selected = filter_paths(candidates, &["r[13]*".to_string()]).unwrap();
        assert_eq!(selected, paths(&["r1", "r10"]));
    }

    #[test]
    fn single_bare_pattern() {
        let candidates = paths(&["alpha", "beta"]);
        let selected = filter_paths(candidates, &["beta".to_string()]).unwrap();
        assert_eq!(selected, paths(&["beta"]));
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let err = filter_paths(paths(&["alpha"]), &["[".to_string()]).unwrap_err();
        assert!(err.to_string().contains("invalid pattern"));
    }
}
