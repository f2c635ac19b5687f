//! Token-set string similarity, 0-100.

use std::collections::BTreeSet;

use strsim::normalized_levenshtein;

fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    normalized_levenshtein(a, b) * 100.0
}

fn join_with_base(base: &str, extra: &[&str]) -> String {
    if extra.is_empty() {
        return base.to_string();
    }
    if base.is_empty() {
        return extra.join(" ");
    }
    format!("{} {}", base, extra.join(" "))
}

/// Token-set similarity: compare the sorted token intersection against each
/// side's full sorted token set and keep the best pairwise ratio. Word order
/// and duplicated words don't count against a match; a title whose tokens
/// all appear in the other string scores 100.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let set_a: BTreeSet<&str> = a.split_whitespace().collect();
    let set_b: BTreeSet<&str> = b.split_whitespace().collect();
    if set_a.is_empty() || set_b.is_empty() {
        return 0;
    }

    let common: Vec<&str> = set_a.intersection(&set_b).copied().collect();
    let only_a: Vec<&str> = set_a.difference(&set_b).copied().collect();
    let only_b: Vec<&str> = set_b.difference(&set_a).copied().collect();

    let base = common.join(" ");
    let with_a = join_with_base(&base, &only_a);
    let with_b = join_with_base(&base, &only_b);

    let best = ratio(&base, &with_a)
        .max(ratio(&base, &with_b))
        .max(ratio(&with_a, &with_b));
    best.round() as u8
}

/// Best-scoring choice for `query`. Returns `None` for an empty choice list
/// or when every choice scores 0; ties keep the earliest choice.
pub fn extract_best<'a>(query: &str, choices: &'a [String]) -> Option<(&'a str, u8)> {
    let mut best: Option<(&'a str, u8)> = None;
    for choice in choices {
        let score = token_set_ratio(query, choice);
        match best {
            Some((_, s)) if s >= score => {}
            _ => best = Some((choice, score)),
        }
    }
    match best {
        Some((_, 0)) | None => None,
        hit => hit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_100() {
        assert_eq!(token_set_ratio("ground worker", "ground worker"), 100);
    }

    #[test]
    fn token_subset_scores_100() {
        assert_eq!(token_set_ratio("worker", "ground worker"), 100);
        assert_eq!(token_set_ratio("senior ground worker", "worker ground"), 100);
    }

    #[test]
    fn near_miss_scores_high_not_perfect() {
        let score = token_set_ratio("ground worker", "grounds worker");
        assert!(score >= 85 && score < 100, "got {}", score);
    }

    #[test]
    fn disjoint_tokens_score_low() {
        let score = token_set_ratio("ground worker", "economist");
        assert!(score < 50, "got {}", score);
    }

    #[test]
    fn empty_inputs_score_zero() {
        assert_eq!(token_set_ratio("", "ground worker"), 0);
        assert_eq!(token_set_ratio("ground worker", ""), 0);
        assert_eq!(token_set_ratio("", ""), 0);
    }

    #[test]
    fn extract_best_empty_choices() {
        assert_eq!(extract_best("ground worker", &[]), None);
    }

    #[test]
    fn extract_best_prefers_earliest_on_ties() {
        let choices = vec!["road worker".to_string(), "worker road".to_string()];
        let (title, score) = extract_best("road worker", &choices).expect("match");
        assert_eq!(title, "road worker");
        assert_eq!(score, 100);
    }

    #[test]
    fn extract_best_all_zero_is_none() {
        let choices = vec!["".to_string()];
        assert_eq!(extract_best("ground worker", &choices), None);
    }
}
