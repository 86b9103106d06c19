use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::filter::FilteredView;
use super::model::{decade_of, Film};

/// Label used when a film has no genre to plot under.
pub const UNKNOWN_GENRE: &str = "Unknown";

/// The word cloud never shows more words than this.
pub const MAX_CLOUD_WORDS: usize = 200;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// The three headline numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub count: usize,
    /// Mean rating rounded to two decimals; `None` for an empty view.
    pub mean_rating: Option<f64>,
    /// Mean duration rounded to whole minutes; `None` for an empty view.
    pub mean_duration: Option<i64>,
}

impl Metrics {
    pub fn from_films(films: &[Film]) -> Self {
        let count = films.len();
        if count == 0 {
            return Metrics {
                count,
                mean_rating: None,
                mean_duration: None,
            };
        }
        let n = count as f64;
        let rating = films.iter().map(|f| f.rating).sum::<f64>() / n;
        let duration = films.iter().map(|f| f.duration_minutes as f64).sum::<f64>() / n;

        Metrics {
            count,
            mean_rating: Some((rating * 100.0).round() / 100.0),
            mean_duration: Some(duration.round() as i64),
        }
    }
}

/// A label with how many rows carried it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenreRating {
    pub genre: String,
    pub mean_rating: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenreStats {
    pub genre: String,
    pub count: usize,
    pub mean_rating: f64,
}

/// Mean rating per (genre, decade).  `cells[g][d]` is `None` when no film of
/// genre `genres[g]` was released in decade `decades[d]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenreDecadePivot {
    pub genres: Vec<String>,
    pub decades: Vec<i32>,
    pub cells: Vec<Vec<Option<f64>>>,
}

impl GenreDecadePivot {
    pub fn get(&self, genre: &str, decade: i32) -> Option<f64> {
        let g = self.genres.iter().position(|x| x == genre)?;
        let d = self.decades.iter().position(|&x| x == decade)?;
        self.cells[g][d]
    }

    /// (min, max) over all filled cells.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .fold(None::<(f64, f64)>, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
            })
    }
}

/// One scatter point: duration vs rating.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub duration_minutes: u32,
    pub rating: f64,
    pub title: String,
    pub year: i32,
    pub director: String,
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Count labels, keeping first-seen order so equal counts stay stable.
fn count_in_order<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<LabelCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<LabelCount> = Vec::new();
    for label in labels {
        match index.get(label) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(label, counts.len());
                counts.push(LabelCount {
                    label: label.to_string(),
                    count: 1,
                });
            }
        }
    }
    counts
}

fn largest(mut counts: Vec<LabelCount>, n: usize) -> Vec<LabelCount> {
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(n);
    counts
}

/// Films per decade, decades ascending.
pub fn decade_counts(films: &[Film]) -> Vec<(i32, usize)> {
    let mut per_decade: BTreeMap<i32, usize> = BTreeMap::new();
    for film in films {
        *per_decade.entry(film.decade()).or_default() += 1;
    }
    per_decade.into_iter().collect()
}

/// The `n` directors with the most films.
pub fn top_directors(films: &[Film], n: usize) -> Vec<LabelCount> {
    largest(count_in_order(films.iter().map(|f| f.director.as_str())), n)
}

/// `(film, genre)` pairs: one entry per genre of every film.
pub fn explode_genres<'a>(
    films: &'a [Film],
) -> impl Iterator<Item = (&'a Film, &'a str)> + 'a {
    films
        .iter()
        .flat_map(|f| f.genres.iter().map(move |g| (f, g.as_str())))
}

/// Per-genre (count, rating sum), genres ascending.
fn genre_totals(films: &[Film]) -> BTreeMap<&str, (usize, f64)> {
    let mut totals: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    for (film, genre) in explode_genres(films) {
        let entry = totals.entry(genre).or_default();
        entry.0 += 1;
        entry.1 += film.rating;
    }
    totals
}

/// Mean rating per genre over the genre-expanded rows, best first.
pub fn genre_mean_rating(films: &[Film]) -> Vec<GenreRating> {
    let mut ratings: Vec<GenreRating> = genre_totals(films)
        .into_iter()
        .map(|(genre, (count, sum))| GenreRating {
            genre: genre.to_string(),
            mean_rating: sum / count as f64,
        })
        .collect();
    ratings.sort_by(|a, b| b.mean_rating.total_cmp(&a.mean_rating));
    ratings
}

/// The `n` most frequent cast members, or `None` when the source has no cast column.
pub fn top_cast(films: &[Film], n: usize) -> Option<Vec<LabelCount>> {
    if films.iter().all(|f| f.cast.is_none()) {
        return None;
    }
    let members = films
        .iter()
        .filter_map(|f| f.cast.as_deref())
        .flatten()
        .map(String::as_str);
    Some(largest(count_in_order(members), n))
}

/// Genre × decade pivot of mean rating.
pub fn genre_decade_pivot(films: &[Film]) -> GenreDecadePivot {
    let mut sums: BTreeMap<(&str, i32), (usize, f64)> = BTreeMap::new();
    let mut genres: BTreeSet<&str> = BTreeSet::new();
    let mut decades: BTreeSet<i32> = BTreeSet::new();

    for (film, genre) in explode_genres(films) {
        let decade = decade_of(film.year);
        genres.insert(genre);
        decades.insert(decade);
        let entry = sums.entry((genre, decade)).or_default();
        entry.0 += 1;
        entry.1 += film.rating;
    }

    let cells = genres
        .iter()
        .map(|&g| {
            decades
                .iter()
                .map(|&d| sums.get(&(g, d)).map(|&(n, sum)| sum / n as f64))
                .collect()
        })
        .collect();

    GenreDecadePivot {
        genres: genres.into_iter().map(str::to_string).collect(),
        decades: decades.into_iter().collect(),
        cells,
    }
}

/// Count and mean rating per genre, genres ascending.
pub fn genre_rollup(films: &[Film]) -> Vec<GenreStats> {
    genre_totals(films)
        .into_iter()
        .map(|(genre, (count, sum))| GenreStats {
            genre: genre.to_string(),
            count,
            mean_rating: sum / count as f64,
        })
        .collect()
}

/// First listed genre, or [`UNKNOWN_GENRE`].
pub fn primary_genre(film: &Film) -> &str {
    film.genres.first().map_or(UNKNOWN_GENRE, String::as_str)
}

/// Scatter points grouped by primary genre, genres ascending.
pub fn primary_genre_groups(films: &[Film]) -> BTreeMap<String, Vec<ScatterPoint>> {
    let mut groups: BTreeMap<String, Vec<ScatterPoint>> = BTreeMap::new();
    for film in films {
        groups
            .entry(primary_genre(film).to_string())
            .or_default()
            .push(ScatterPoint {
                duration_minutes: film.duration_minutes,
                rating: film.rating,
                title: film.title.clone(),
                year: film.year,
                director: film.director.clone(),
            });
    }
    groups
}

/// Word frequencies over all director names, most frequent first.
///
/// Names are split on whitespace; edge punctuation is trimmed and
/// one-character tokens (initials) are dropped.
pub fn director_word_frequencies(films: &[Film]) -> Vec<LabelCount> {
    let words = films
        .iter()
        .flat_map(|f| f.director.split_whitespace())
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| w.chars().count() >= 2);
    largest(count_in_order(words), MAX_CLOUD_WORDS)
}

// ---------------------------------------------------------------------------
// Bundle
// ---------------------------------------------------------------------------

/// Everything the dashboard draws below the results table.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregates {
    pub decade_counts: Vec<(i32, usize)>,
    pub top_directors: Vec<LabelCount>,
    pub genre_mean_rating: Vec<GenreRating>,
    pub top_cast: Option<Vec<LabelCount>>,
    pub genre_decade_pivot: GenreDecadePivot,
    pub genre_rollup: Vec<GenreStats>,
    pub primary_genres: BTreeMap<String, Vec<ScatterPoint>>,
    pub director_words: Vec<LabelCount>,
}

impl Aggregates {
    /// `None` is the "no results" signal: nothing is computed for an empty view.
    pub fn compute(view: &FilteredView, top_n: usize) -> Option<Self> {
        if view.is_empty() {
            return None;
        }
        let films = view.films.as_slice();

        Some(Aggregates {
            decade_counts: decade_counts(films),
            top_directors: top_directors(films, top_n),
            genre_mean_rating: genre_mean_rating(films),
            top_cast: top_cast(films, top_n),
            genre_decade_pivot: genre_decade_pivot(films),
            genre_rollup: genre_rollup(films),
            primary_genres: primary_genre_groups(films),
            director_words: director_word_frequencies(films),
        })
    }
}
