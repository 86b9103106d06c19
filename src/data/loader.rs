use std::path::Path;

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray, GenericListArray, OffsetSizeTrait, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::{DataError, Result};
use super::model::{split_list, Film, FilmDataset};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a film table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one film per line (the default dataset)
/// * `.json`    – `[{ "Peringkat": 1, "Judul": "...", ... }, ...]`
/// * `.parquet` – flat schema with the same column names
pub fn load_file(path: &Path) -> Result<FilmDataset> {
    if !path.exists() {
        return Err(DataError::MissingDataFile {
            path: path.to_path_buf(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let films = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataError::UnsupportedFormat(other.to_string())),
    };

    FilmDataset::from_films(films)
}

// ---------------------------------------------------------------------------
// Column resolution
// ---------------------------------------------------------------------------

/// Logical columns of the film table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Rank,
    Title,
    Year,
    Rating,
    Duration,
    Director,
    Genre,
    Cast,
    UserReviews,
}

impl Column {
    /// Canonical name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Column::Rank => "rank",
            Column::Title => "title",
            Column::Year => "year",
            Column::Rating => "rating",
            Column::Duration => "duration",
            Column::Director => "director",
            Column::Genre => "genre",
            Column::Cast => "cast",
            Column::UserReviews => "user_reviews",
        }
    }

    /// Header names accepted for this column (compared case-insensitively).
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Column::Rank => &["Peringkat", "rank"],
            Column::Title => &["Judul", "title"],
            Column::Year => &["Tahun", "year", "release_year"],
            Column::Rating => &["Rating"],
            Column::Duration => &["Durasi_Menit", "duration", "duration_minutes", "runtime"],
            Column::Director => &["Sutradara", "director"],
            Column::Genre => &["Genre", "genres"],
            Column::Cast => &["Bintang_Film", "cast", "stars"],
            Column::UserReviews => &["User_Reviews", "reviews"],
        }
    }

    fn find(self, headers: &[String]) -> Option<usize> {
        headers.iter().position(|h| {
            let h = h.trim();
            self.aliases().iter().any(|a| a.eq_ignore_ascii_case(h))
                || self.name().eq_ignore_ascii_case(h)
        })
    }
}

/// Position of every logical column in the source header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnIndex {
    pub rank: usize,
    pub title: usize,
    pub year: usize,
    pub rating: usize,
    pub duration: usize,
    pub director: usize,
    pub genre: usize,
    pub cast: Option<usize>,
    pub user_reviews: Option<usize>,
}

impl ColumnIndex {
    /// Resolve all columns, failing on the first required one that is absent.
    pub fn resolve(headers: &[String]) -> Result<Self> {
        let required = |col: Column| {
            col.find(headers)
                .ok_or(DataError::MissingColumn { column: col.name() })
        };

        Ok(ColumnIndex {
            rank: required(Column::Rank)?,
            title: required(Column::Title)?,
            year: required(Column::Year)?,
            rating: required(Column::Rating)?,
            duration: required(Column::Duration)?,
            director: required(Column::Director)?,
            genre: required(Column::Genre)?,
            cast: Column::Cast.find(headers),
            user_reviews: Column::UserReviews.find(headers),
        })
    }
}

// ---------------------------------------------------------------------------
// Row normalisation (shared by all formats)
// ---------------------------------------------------------------------------

/// Build one [`Film`] from a row.  `cell(i)` returns the raw text of source
/// column `i`, or `None` for a null / empty cell.
fn build_film(
    row: usize,
    cols: &ColumnIndex,
    cell: impl Fn(usize) -> Option<String>,
) -> Result<Film> {
    let required = |idx: usize, column: Column| {
        cell(idx).ok_or(DataError::MissingValue {
            row,
            column: column.name(),
        })
    };

    let rank = parse_int(row, Column::Rank, &required(cols.rank, Column::Rank)?)?;
    let year = parse_int(row, Column::Year, &required(cols.year, Column::Year)?)?;
    let rating = parse_float(row, Column::Rating, &required(cols.rating, Column::Rating)?)?;
    let duration = parse_int(
        row,
        Column::Duration,
        &required(cols.duration, Column::Duration)?,
    )?;

    // Missing review counts default to 0.  Float columns ("4500.0") are
    // truncated toward zero; negatives clamp to 0 and huge values saturate.
    let user_reviews = match cols.user_reviews.and_then(&cell) {
        Some(s) => parse_float(row, Column::UserReviews, &s)?.max(0.0) as u64,
        None => 0,
    };

    Ok(Film {
        rank: to_u32(row, Column::Rank, rank)?,
        title: required(cols.title, Column::Title)?,
        year: i32::try_from(year).map_err(|_| invalid(row, Column::Year, year))?,
        rating,
        duration_minutes: to_u32(row, Column::Duration, duration)?,
        director: required(cols.director, Column::Director)?,
        genres: split_list(&required(cols.genre, Column::Genre)?),
        cast: cols
            .cast
            .map(|idx| cell(idx).map(|s| split_list(&s)).unwrap_or_default()),
        user_reviews,
    })
}

fn invalid(row: usize, column: Column, value: impl ToString) -> DataError {
    DataError::InvalidValue {
        row,
        column: column.name(),
        value: value.to_string(),
    }
}

/// Integers may arrive as `"1994"` or, from float-typed columns, `"1994.0"`.
fn parse_int(row: usize, column: Column, s: &str) -> Result<i64> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Ok(i);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 => Ok(f as i64),
        _ => Err(invalid(row, column, s)),
    }
}

fn parse_float(row: usize, column: Column, s: &str) -> Result<f64> {
    let s = s.trim();
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() => Ok(f),
        _ => Err(invalid(row, column, s)),
    }
}

fn to_u32(row: usize, column: Column, value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| invalid(row, column, value))
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") {
        None
    } else {
        Some(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<Film>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let cols = ColumnIndex::resolve(&headers)?;

    let mut films = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        films.push(build_film(row, &cols, |i| {
            record.get(i).and_then(non_empty)
        })?);
    }

    log::debug!("parsed {} CSV rows from {}", films.len(), path.display());
    Ok(films)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<Vec<Film>> {
    let text = std::fs::read_to_string(path)?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let records: &[JsonValue] = match root.as_array() {
        Some(records) => records,
        None => {
            return Err(DataError::UnsupportedFormat(
                "json without a top-level array".to_string(),
            ))
        }
    };

    // Optional keys may be absent from some records: take the union.
    let mut headers: Vec<String> = Vec::new();
    for key in records.iter().filter_map(|r| r.as_object()).flat_map(|obj| obj.keys()) {
        if !headers.contains(key) {
            headers.push(key.clone());
        }
    }
    let cols = ColumnIndex::resolve(&headers)?;

    let mut films = Vec::with_capacity(records.len());
    for (row, rec) in records.iter().enumerate() {
        films.push(build_film(row, &cols, |i| {
            let key = headers.get(i)?;
            rec.get(key).and_then(json_to_text)
        })?);
    }

    Ok(films)
}

fn json_to_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => non_empty(s),
        JsonValue::Array(items) => {
            // Already-split lists are accepted and re-joined.
            let parts: Vec<String> = items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
            non_empty(&parts.join(", "))
        }
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
/// Every column is cast to UTF-8 and normalised like a CSV cell; list
/// columns are joined with `", "` first.
fn load_parquet(path: &Path) -> Result<Vec<Film>> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let cols = ColumnIndex::resolve(&headers)?;
    let reader = builder.build()?;

    let mut films = Vec::new();
    let mut row_offset = 0;

    for batch in reader {
        let batch = batch?;
        let text_columns = batch
            .columns()
            .iter()
            .map(text_column)
            .collect::<Result<Vec<_>>>()?;

        for row in 0..batch.num_rows() {
            films.push(build_film(row_offset + row, &cols, |i| {
                let col = text_columns.get(i)?;
                if col.is_null(row) {
                    return None;
                }
                non_empty(col.as_string::<i32>().value(row))
            })?);
        }
        row_offset += batch.num_rows();
    }

    Ok(films)
}

fn text_column(col: &ArrayRef) -> Result<ArrayRef> {
    match col.data_type() {
        DataType::List(_) => join_list(col.as_list::<i32>()),
        DataType::LargeList(_) => join_list(col.as_list::<i64>()),
        _ => Ok(cast(col, &DataType::Utf8)?),
    }
}

/// `["Crime", "Drama"]` → `"Crime, Drama"`, matching the CSV layout.
fn join_list<O: OffsetSizeTrait>(list: &GenericListArray<O>) -> Result<ArrayRef> {
    let joined = (0..list.len())
        .map(|i| -> Result<Option<String>> {
            if list.is_null(i) {
                return Ok(None);
            }
            let items = cast(&list.value(i), &DataType::Utf8)?;
            let parts: Vec<&str> = items.as_string::<i32>().iter().flatten().collect();
            Ok(Some(parts.join(", ")))
        })
        .collect::<Result<StringArray>>()?;
    Ok(Arc::new(joined))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolves_source_and_english_names() {
        let source = headers(&[
            "Peringkat", "Judul", "Tahun", "Rating", "Durasi_Menit", "Sutradara", "Genre",
            "Bintang_Film", "User_Reviews",
        ]);
        let cols = ColumnIndex::resolve(&source).unwrap();
        assert_eq!(cols.rank, 0);
        assert_eq!(cols.cast, Some(7));
        assert_eq!(cols.user_reviews, Some(8));

        let english = headers(&["title", "RANK", "year", "rating", "duration", "director", "genre"]);
        let cols = ColumnIndex::resolve(&english).unwrap();
        assert_eq!(cols.rank, 1);
        assert_eq!(cols.title, 0);
        assert_eq!(cols.cast, None);
        assert_eq!(cols.user_reviews, None);
    }

    #[test]
    fn missing_required_column_is_reported() {
        let err = ColumnIndex::resolve(&headers(&["rank", "title", "year"])).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn { column: "rating" }));
    }

    #[test]
    fn build_film_normalises_cells() {
        let cols = ColumnIndex::resolve(&headers(&[
            "rank", "title", "year", "rating", "duration", "director", "genre", "cast",
            "reviews",
        ]))
        .unwrap();
        let cells = [
            "2", "The Godfather", "1972.0", "9.2", "175", "Francis Ford Coppola",
            "Crime, Drama", "Marlon Brando, Al Pacino", "",
        ];

        let film = build_film(0, &cols, |i| non_empty(cells[i])).unwrap();

        assert_eq!(film.rank, 2);
        assert_eq!(film.year, 1972);
        assert_eq!(film.genres, vec!["Crime", "Drama"]);
        assert_eq!(
            film.cast,
            Some(vec!["Marlon Brando".to_string(), "Al Pacino".to_string()])
        );
        assert_eq!(film.user_reviews, 0);
    }

    #[test]
    fn review_counts_truncate_and_clamp() {
        let cols = ColumnIndex::resolve(&headers(&[
            "rank", "title", "year", "rating", "duration", "director", "genre", "reviews",
        ]))
        .unwrap();
        let reviews = |raw: &'static str| {
            let cells = ["1", "X", "2000", "8.0", "100", "D", "Drama", raw];
            build_film(0, &cols, |i| non_empty(cells[i])).unwrap().user_reviews
        };

        assert_eq!(reviews("4500.0"), 4500);
        assert_eq!(reviews("1234.7"), 1234);
        assert_eq!(reviews("-3"), 0);
        assert_eq!(reviews("nan"), 0);
    }

    #[test]
    fn bad_numbers_are_invalid_values() {
        let cols = ColumnIndex::resolve(&headers(&[
            "rank", "title", "year", "rating", "duration", "director", "genre",
        ]))
        .unwrap();
        let cells = ["1", "X", "nineteen", "9.0", "100", "D", "Drama"];

        let err = build_film(3, &cols, |i| non_empty(cells[i])).unwrap_err();
        assert!(matches!(
            err,
            DataError::InvalidValue { row: 3, column: "year", .. }
        ));
    }

    #[test]
    fn missing_file_is_its_own_error() {
        let err = load_file(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DataError::MissingDataFile { .. }));
    }
}
