use crate::catalog::{BookRecord, Catalog};

/// Form value that stands for "do not constrain on this field".
pub const ANY: &str = "any";

/// Author or genre constraint of a search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selector {
    #[default]
    Any,
    Id(String),
}

impl Selector {
    /// Interpret a raw form value; blank and `"any"` mean unconstrained.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == ANY {
            Selector::Any
        } else {
            Selector::Id(trimmed.to_string())
        }
    }

    fn accepts(&self, id: &str) -> bool {
        match self {
            Selector::Any => true,
            Selector::Id(wanted) => wanted == id,
        }
    }

    fn accepts_any_of(&self, ids: &[String]) -> bool {
        match self {
            Selector::Any => true,
            Selector::Id(wanted) => ids.iter().any(|id| id == wanted),
        }
    }
}

/// Constraints from a single search submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub title_query: String,
    pub author: Selector,
    pub genre: Selector,
}

impl FilterCriteria {
    pub fn new(title_query: impl Into<String>, author: Selector, genre: Selector) -> Self {
        Self {
            title_query: title_query.into(),
            author,
            genre,
        }
    }

    /// Build criteria from raw form fields, defaulting missing values.
    pub fn from_form(title: Option<&str>, author: Option<&str>, genre: Option<&str>) -> Self {
        Self {
            title_query: title.unwrap_or_default().to_string(),
            author: Selector::parse(author.unwrap_or(ANY)),
            genre: Selector::parse(genre.unwrap_or(ANY)),
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.title_query.trim().is_empty()
            && self.author == Selector::Any
            && self.genre == Selector::Any
    }
}

/// Books of `catalog` matching every constraint, in catalog order.
pub fn apply(catalog: &Catalog, criteria: &FilterCriteria) -> Vec<BookRecord> {
    let query = criteria.title_query.trim().to_lowercase();

    catalog
        .books()
        .iter()
        .filter(|book| query.is_empty() || book.title.to_lowercase().contains(&query))
        .filter(|book| criteria.author.accepts(&book.author_id))
        .filter(|book| criteria.genre.accepts_any_of(&book.genre_ids))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::{book, dune_and_emma, table};
    use proptest::prelude::*;

    fn ids(books: &[BookRecord]) -> Vec<&str> {
        books.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn test_exact_author_narrows_set() {
        let catalog = dune_and_emma();
        let criteria = FilterCriteria::new("", Selector::Id("herbert".to_string()), Selector::Any);
        assert_eq!(ids(&apply(&catalog, &criteria)), vec!["a"]);
    }

    #[test]
    fn test_empty_query_matches_all() {
        let catalog = dune_and_emma();
        let result = apply(&catalog, &FilterCriteria::default());
        assert_eq!(result, catalog.books().to_vec());
    }

    #[test]
    fn test_whitespace_query_matches_all() {
        let catalog = dune_and_emma();
        let criteria = FilterCriteria::new("   ", Selector::Any, Selector::Any);
        assert_eq!(apply(&catalog, &criteria).len(), 2);
    }

    #[test]
    fn test_title_is_case_insensitive_substring() {
        let catalog = dune_and_emma();
        let criteria = FilterCriteria::new("  uN ", Selector::Any, Selector::Any);
        assert_eq!(ids(&apply(&catalog, &criteria)), vec!["a"]);
    }

    #[test]
    fn test_genre_membership() {
        let catalog = Catalog::new(
            vec![
                book("a", "Frankenstein", "shelley", &["horror", "scifi"]),
                book("b", "Emma", "austen", &["romance"]),
                book("c", "The Time Machine", "wells", &["scifi"]),
            ],
            table(&[("shelley", "Mary Shelley"), ("austen", "Jane Austen"), ("wells", "H.G. Wells")]),
            table(&[("horror", "Horror"), ("scifi", "Science Fiction"), ("romance", "Romance")]),
        )
        .unwrap();
        let criteria = FilterCriteria::new("", Selector::Any, Selector::Id("scifi".to_string()));
        assert_eq!(ids(&apply(&catalog, &criteria)), vec!["a", "c"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let catalog = dune_and_emma();
        let criteria = FilterCriteria::new(
            "dune",
            Selector::Id("austen".to_string()),
            Selector::Any,
        );
        assert!(apply(&catalog, &criteria).is_empty());
    }

    #[test]
    fn test_selector_parse() {
        assert_eq!(Selector::parse("any"), Selector::Any);
        assert_eq!(Selector::parse(""), Selector::Any);
        assert_eq!(Selector::parse(" herbert "), Selector::Id("herbert".to_string()));
    }

    #[test]
    fn test_from_form_defaults_missing_fields() {
        let criteria = FilterCriteria::from_form(None, None, Some("scifi"));
        assert_eq!(criteria.title_query, "");
        assert_eq!(criteria.author, Selector::Any);
        assert_eq!(criteria.genre, Selector::Id("scifi".to_string()));
        assert!(FilterCriteria::from_form(None, None, None).is_unconstrained());
    }

    const AUTHORS: [&str; 3] = ["herbert", "austen", "wells"];
    const GENRES: [&str; 3] = ["scifi", "romance", "classic"];

    prop_compose! {
        fn arb_catalog()(
            entries in prop::collection::vec(
                ("[a-cA-C ]{0,6}", 0..AUTHORS.len(), prop::collection::vec(0..GENRES.len(), 0..3)),
                0..30,
            )
        ) -> Catalog {
            let books = entries
                .iter()
                .enumerate()
                .map(|(i, (title, author, genres))| {
                    let genres: Vec<&str> = genres.iter().map(|g| GENRES[*g]).collect();
                    book(&format!("b{}", i), title, AUTHORS[*author], &genres)
                })
                .collect();
            Catalog::new(
                books,
                table(&[("herbert", "Frank Herbert"), ("austen", "Jane Austen"), ("wells", "H.G. Wells")]),
                table(&[("scifi", "Science Fiction"), ("romance", "Romance"), ("classic", "Classics")]),
            )
            .unwrap()
        }
    }

    fn arb_selector(choices: &'static [&'static str]) -> impl Strategy<Value = Selector> {
        prop_oneof![
            Just(Selector::Any),
            (0..choices.len()).prop_map(move |i| Selector::Id(choices[i].to_string())),
        ]
    }

    prop_compose! {
        fn arb_criteria()(
            title in "[a-cA-C ]{0,3}",
            author in arb_selector(&AUTHORS),
            genre in arb_selector(&GENRES),
        ) -> FilterCriteria {
            FilterCriteria::new(title, author, genre)
        }
    }

    proptest! {
        #[test]
        fn filter_preserves_catalog_order(catalog in arb_catalog(), criteria in arb_criteria()) {
            let result = apply(&catalog, &criteria);
            let positions: Vec<usize> = result
                .iter()
                .map(|b| catalog.books().iter().position(|c| c.id == b.id).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn filter_is_idempotent(catalog in arb_catalog(), criteria in arb_criteria()) {
            prop_assert_eq!(apply(&catalog, &criteria), apply(&catalog, &criteria));
        }

        #[test]
        fn unconstrained_filter_returns_everything(catalog in arb_catalog()) {
            prop_assert_eq!(apply(&catalog, &FilterCriteria::default()), catalog.books().to_vec());
        }
    }
}
