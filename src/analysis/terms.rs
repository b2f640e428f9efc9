use crate::model::{CommitRecord, TermCount};
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Tokens are runs of word characters, at least two long, apostrophes allowed.
pub const TOKEN_PATTERN: &str = r"\w[\w']+";

/// Merge boilerplate and structural English words that carry no signal.
pub const STOPWORDS: &[&str] = &[
    // merge boilerplate
    "merge", "merged", "branch", "pull", "request", "remote", "tracking", "origin",
    "master", "main", "head", "https", "http", "github", "com", "www", "signed", "off",
    "co", "authored",
    // structural English
    "the", "and", "to", "of", "in", "for", "on", "with", "at", "by", "from", "into",
    "is", "it", "this", "that", "be", "as", "are", "was", "an", "or", "not", "but",
    "if", "so", "we", "you", "can", "will", "should", "all", "some", "when", "use",
    "via", "its", "also", "has", "have", "had", "do", "does", "no",
];

/// Term frequency over every commit message, most frequent first. Terms are
/// lowercased; equal counts keep first-seen order.
pub fn term_frequency(records: &[CommitRecord]) -> Vec<TermCount> {
    let Ok(token) = Regex::new(TOKEN_PATTERN) else {
        return Vec::new();
    };
    let stopwords: HashSet<&str> = STOPWORDS.iter().copied().collect();

    let corpus = records
        .iter()
        .map(|r| r.message.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut terms: Vec<TermCount> = Vec::new();

    for m in token.find_iter(&corpus) {
        let lower = m.as_str().to_lowercase();
        let term = lower.strip_suffix("'s").unwrap_or(lower.as_str()).trim_end_matches('\'').to_string();
        if term.chars().count() < 2 || stopwords.contains(term.as_str()) {
            continue;
        }
        match index.get(&term) {
            Some(&i) => terms[i].count += 1,
            None => {
                index.insert(term.clone(), terms.len());
                terms.push(TermCount { term, count: 1 });
            }
        }
    }

    terms.sort_by(|a, b| b.count.cmp(&a.count));
    terms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::testing::commit;
    use pretty_assertions::assert_eq;

    #[test]
    fn token_pattern_compiles() {
        assert!(Regex::new(TOKEN_PATTERN).is_ok());
    }

    #[test]
    fn counts_every_non_stopword() {
        let rows = vec![
            commit("a", "2024-01-01", 0, 0, "Merge branch 'dev' into main"),
            commit("a", "2024-01-02", 0, 0, "Fix parser crash\n\nThe parser's state leaked"),
            commit("a", "2024-01-03", 0, 0, "parser: add tests for the lexer"),
        ];
        let terms = term_frequency(&rows);
        let top: Vec<(&str, u64)> = terms.iter().map(|t| (t.term.as_str(), t.count)).collect();

        assert_eq!(top[0], ("parser", 3));
        assert!(top.contains(&("dev", 1)));
        assert!(top.contains(&("lexer", 1)));
        assert!(top.contains(&("crash", 1)));
        assert!(!top.iter().any(|(t, _)| ["merge", "branch", "into", "main", "the", "for"].contains(t)));
        let total: u64 = terms.iter().map(|t| t.count).sum();
        // fix parser crash parser state leaked parser add tests lexer dev
        assert_eq!(total, 11);
    }

    #[test]
    fn non_ascii_terms_are_counted() {
        let rows = vec![commit("a", "2024-01-01", 0, 0, "修复 登录 修复")];
        let terms = term_frequency(&rows);
        assert_eq!(terms[0], TermCount { term: "修复".into(), count: 2 });
        assert_eq!(terms[1], TermCount { term: "登录".into(), count: 1 });
    }

    #[test]
    fn no_messages_no_terms() {
        assert!(term_frequency(&[]).is_empty());
    }
}
