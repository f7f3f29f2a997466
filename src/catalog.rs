use crate::error::CatalogError;
use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

const SAMPLE_CATALOG: &str = include_str!("../data/catalog.json");

/// A single book as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookRecord {
    pub id: String,
    pub title: String,
    #[serde(rename = "author")]
    pub author_id: String,
    #[serde(rename = "genres", default)]
    pub genre_ids: Vec<String>,
    #[serde(rename = "image", default)]
    pub image_url: String,
    #[serde(default)]
    pub description: String,
    pub published: DateTime<Utc>,
}

impl BookRecord {
    /// Publication year, the only part of the date that is ever shown.
    pub fn year(&self) -> i32 {
        self.published.year()
    }
}

/// On-disk shape of a catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    books: Vec<BookRecord>,
    authors: BTreeMap<String, String>,
    genres: BTreeMap<String, String>,
}

/// Read-only book catalog with author and genre lookup tables.
#[derive(Debug, Clone)]
pub struct Catalog {
    books: Vec<BookRecord>,
    authors: BTreeMap<String, String>,
    genres: BTreeMap<String, String>,
}

impl Catalog {
    /// Build a catalog, rejecting dangling author/genre references and duplicate ids.
    pub fn new(
        books: Vec<BookRecord>,
        authors: BTreeMap<String, String>,
        genres: BTreeMap<String, String>,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(books.len());
        for book in &books {
            if !seen.insert(book.id.as_str()) {
                return Err(CatalogError::DuplicateBook(book.id.clone()));
            }
            if !authors.contains_key(&book.author_id) {
                return Err(CatalogError::UnknownAuthor {
                    book: book.id.clone(),
                    author: book.author_id.clone(),
                });
            }
            if let Some(genre) = book.genre_ids.iter().find(|g| !genres.contains_key(*g)) {
                return Err(CatalogError::UnknownGenre {
                    book: book.id.clone(),
                    genre: genre.clone(),
                });
            }
        }

        Ok(Self {
            books,
            authors,
            genres,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.books, file.authors, file.genres)
    }

    /// Load and validate a catalog file.
    pub async fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            books = catalog.books.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// The catalog bundled with the binary.
    pub fn sample() -> Result<Self, CatalogError> {
        Self::from_json(SAMPLE_CATALOG)
    }

    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn author_name(&self, id: &str) -> Option<&str> {
        self.authors.get(id).map(String::as_str)
    }

    pub fn genre_name(&self, id: &str) -> Option<&str> {
        self.genres.get(id).map(String::as_str)
    }

    /// Author `(id, name)` pairs ordered by display name, for select controls.
    pub fn author_options(&self) -> Vec<(&str, &str)> {
        sorted_by_name(&self.authors)
    }

    /// Genre `(id, name)` pairs ordered by display name, for select controls.
    pub fn genre_options(&self) -> Vec<(&str, &str)> {
        sorted_by_name(&self.genres)
    }

    /// `"<author> (<year>)"` line shown under a book title.
    pub fn subtitle(&self, book: &BookRecord) -> String {
        let author = self.author_name(&book.author_id).unwrap_or(&book.author_id);
        format!("{} ({})", author, book.year())
    }

    /// Comma separated genre display names of a book.
    pub fn genre_names(&self, book: &BookRecord) -> String {
        book.genre_ids
            .iter()
            .map(|g| self.genre_name(g).unwrap_or(g))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn sorted_by_name(table: &BTreeMap<String, String>) -> Vec<(&str, &str)> {
    let mut options: Vec<(&str, &str)> = table
        .iter()
        .map(|(id, name)| (id.as_str(), name.as_str()))
        .collect();
    options.sort_by(|a, b| a.1.cmp(b.1).then(a.0.cmp(b.0)));
    options
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    pub(crate) fn book(id: &str, title: &str, author: &str, genres: &[&str]) -> BookRecord {
        BookRecord {
            id: id.to_string(),
            title: title.to_string(),
            author_id: author.to_string(),
            genre_ids: genres.iter().map(|g| g.to_string()).collect(),
            image_url: format!("covers/{}.jpg", id),
            description: String::new(),
            published: Utc.with_ymd_and_hms(1965, 8, 1, 0, 0, 0).unwrap(),
        }
    }

    pub(crate) fn table(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    pub(crate) fn dune_and_emma() -> Catalog {
        Catalog::new(
            vec![
                book("a", "Dune", "herbert", &["scifi"]),
                book("b", "Emma", "austen", &["romance"]),
            ],
            table(&[("herbert", "Frank Herbert"), ("austen", "Jane Austen")]),
            table(&[("scifi", "Science Fiction"), ("romance", "Romance")]),
        )
        .unwrap()
    }

    const SMALL_JSON: &str = r#"{
        "authors": {"herbert": "Frank Herbert"},
        "genres": {"scifi": "Science Fiction"},
        "books": [{
            "id": "a",
            "title": "Dune",
            "author": "herbert",
            "genres": ["scifi"],
            "image": "covers/dune.jpg",
            "description": "Spice.",
            "published": "1965-08-01T00:00:00.000Z"
        }]
    }"#;

    #[test]
    fn test_from_json_maps_field_names() {
        let catalog = Catalog::from_json(SMALL_JSON).unwrap();
        assert_eq!(catalog.len(), 1);
        let dune = &catalog.books()[0];
        assert_eq!(dune.author_id, "herbert");
        assert_eq!(dune.genre_ids, vec!["scifi".to_string()]);
        assert_eq!(dune.image_url, "covers/dune.jpg");
        assert_eq!(dune.year(), 1965);
    }

    #[test]
    fn test_unknown_author_rejected() {
        let result = Catalog::new(
            vec![book("a", "Dune", "herbert", &[])],
            table(&[("austen", "Jane Austen")]),
            BTreeMap::new(),
        );
        assert!(matches!(
            result,
            Err(CatalogError::UnknownAuthor { ref author, .. }) if author == "herbert"
        ));
    }

    #[test]
    fn test_unknown_genre_rejected() {
        let result = Catalog::new(
            vec![book("a", "Dune", "herbert", &["scifi", "space-opera"])],
            table(&[("herbert", "Frank Herbert")]),
            table(&[("scifi", "Science Fiction")]),
        );
        assert!(matches!(
            result,
            Err(CatalogError::UnknownGenre { ref genre, .. }) if genre == "space-opera"
        ));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = Catalog::new(
            vec![
                book("a", "Dune", "herbert", &[]),
                book("a", "Dune Messiah", "herbert", &[]),
            ],
            table(&[("herbert", "Frank Herbert")]),
            BTreeMap::new(),
        );
        assert!(matches!(result, Err(CatalogError::DuplicateBook(ref id)) if id == "a"));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let result = Catalog::from_json("{\"books\": 3}");
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_subtitle_uses_author_name_and_year() {
        let catalog = dune_and_emma();
        assert_eq!(catalog.subtitle(&catalog.books()[0]), "Frank Herbert (1965)");
    }

    #[test]
    fn test_options_sorted_by_display_name() {
        let catalog = dune_and_emma();
        let authors = catalog.author_options();
        assert_eq!(authors, vec![("herbert", "Frank Herbert"), ("austen", "Jane Austen")]);
        let genres = catalog.genre_options();
        assert_eq!(genres[0], ("romance", "Romance"));
    }

    #[test]
    fn test_sample_catalog_is_valid() {
        let catalog = Catalog::sample().unwrap();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.books()[0].title, "Dune");
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SMALL_JSON.as_bytes()).unwrap();
        let catalog = Catalog::load(file.path()).await.unwrap();
        assert_eq!(catalog.books()[0].title, "Dune");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Catalog::load(&dir.path().join("nope.json")).await;
        assert!(matches!(result, Err(CatalogError::Read { .. })));
    }
}
