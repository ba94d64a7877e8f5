use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Ordered set of genre tags, persisted as a JSON array.
///
/// Insertion order is kept and duplicates are dropped on construction, so the
/// stored value is always a set.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult,
)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Genres(Vec<String>);

impl Genres {
    pub fn new<I, S>(genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set: Vec<String> = Vec::new();
        for genre in genres {
            let genre = genre.into();
            let genre = genre.trim();
            if genre.is_empty() || set.iter().any(|g| g == genre) {
                continue;
            }
            set.push(genre.to_string());
        }
        Self(set)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl From<Vec<String>> for Genres {
    fn from(genres: Vec<String>) -> Self {
        Self::new(genres)
    }
}

impl From<Genres> for Vec<String> {
    fn from(genres: Genres) -> Self {
        genres.0
    }
}

impl<'a> IntoIterator for &'a Genres {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
