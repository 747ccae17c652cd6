use std::collections::HashSet;

pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// Minimum input length (in characters) before suggestions are offered.
pub const MIN_INPUT_CHARS: usize = 2;

/// Static catalogue used when nothing else is configured.
pub const POPULAR_CITIES: &[&str] = &[
    "London",
    "Paris",
    "New York",
    "Tokyo",
    "Sydney",
    "Jakarta",
    "Singapore",
    "Bangkok",
    "Dubai",
    "Rome",
    "Berlin",
    "Madrid",
    "Amsterdam",
    "Seoul",
    "Mumbai",
];

/// Autocomplete candidates for `input`.
///
/// Candidates are `history` followed by `catalogue`, deduplicated
/// case-insensitively with the first occurrence kept. A candidate matches when
/// it contains `input` anywhere, ignoring case. Order is preserved and the
/// result is cut to `max_results`.
pub fn suggest<H, C>(input: &str, history: H, catalogue: C, max_results: usize) -> Vec<String>
where
    H: IntoIterator,
    H::Item: AsRef<str>,
    C: IntoIterator,
    C::Item: AsRef<str>,
{
    if input.chars().count() < MIN_INPUT_CHARS {
        return Vec::new();
    }

    let needle = input.to_lowercase();
    let mut seen = HashSet::new();

    history
        .into_iter()
        .map(|c| c.as_ref().to_string())
        .chain(catalogue.into_iter().map(|c| c.as_ref().to_string()))
        .filter(|candidate| seen.insert(candidate.to_lowercase()))
        .filter(|candidate| candidate.to_lowercase().contains(&needle))
        .take(max_results)
        .collect()
}

/// Catalogue and result limit bundled for repeated lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionEngine {
    catalogue: Vec<String>,
    max_results: usize,
}

impl SuggestionEngine {
    /// `max_results` below one is treated as one.
    pub fn new(catalogue: Vec<String>, max_results: usize) -> Self {
        Self {
            catalogue,
            max_results: max_results.max(1),
        }
    }

    pub fn suggest<H>(&self, input: &str, history: H) -> Vec<String>
    where
        H: IntoIterator,
        H::Item: AsRef<str>,
    {
        suggest(input, history, &self.catalogue, self.max_results)
    }

    pub fn catalogue(&self) -> &[String] {
        &self.catalogue
    }
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new(
            POPULAR_CITIES.iter().map(|c| c.to_string()).collect(),
            DEFAULT_MAX_SUGGESTIONS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_returns_nothing() {
        assert!(suggest("t", ["Toronto"], POPULAR_CITIES, 5).is_empty());
        assert!(suggest("", ["Toronto"], POPULAR_CITIES, 5).is_empty());
    }

    #[test]
    fn two_characters_start_matching() {
        let result = suggest("to", Vec::<String>::new(), POPULAR_CITIES, 5);
        assert_eq!(result, vec!["Tokyo"]);
    }

    #[test]
    fn matches_substring_anywhere_ignoring_case() {
        let result = suggest("DAM", Vec::<String>::new(), POPULAR_CITIES, 5);
        assert_eq!(result, vec!["Amsterdam"]);

        let result = suggest("an", Vec::<String>::new(), POPULAR_CITIES, 10);
        assert_eq!(result, vec!["Bangkok"]);
    }

    #[test]
    fn history_comes_before_catalogue_and_wins_dedup() {
        let history = ["paris", "Parma"];
        let result = suggest("par", history, POPULAR_CITIES, 5);

        assert_eq!(result, vec!["paris", "Parma"]);
    }

    #[test]
    fn caps_results_preserving_order() {
        let history: Vec<String> = (0..4).map(|i| format!("Springfield {i}")).collect();
        let catalogue: Vec<String> = (0..6).map(|i| format!("Port Spring {i}")).collect();

        let result = suggest("spring", &history, &catalogue, 6);

        assert_eq!(
            result,
            vec![
                "Springfield 0",
                "Springfield 1",
                "Springfield 2",
                "Springfield 3",
                "Port Spring 0",
                "Port Spring 1",
            ]
        );
    }

    #[test]
    fn engine_uses_its_catalogue_and_limit() {
        let engine = SuggestionEngine::new(
            vec!["Lagos".into(), "Lahore".into(), "Las Vegas".into()],
            2,
        );

        assert_eq!(engine.suggest("la", ["Lausanne"]), vec!["Lausanne", "Lagos"]);
        assert!(engine.suggest("zz", ["Lausanne"]).is_empty());
    }

    #[test]
    fn zero_limit_engine_still_offers_one_match() {
        let engine = SuggestionEngine::new(vec!["Lagos".into(), "Lahore".into()], 0);

        assert_eq!(engine.suggest("la", Vec::<String>::new()), vec!["Lagos"]);
    }

    #[test]
    fn default_engine_uses_popular_cities() {
        let engine = SuggestionEngine::default();
        assert_eq!(engine.catalogue().len(), POPULAR_CITIES.len());
        assert_eq!(engine.suggest("on", Vec::<String>::new()), vec!["London"]);
    }
}
