//! End-to-end tests: write a small film table, load it, filter, aggregate.

use std::path::PathBuf;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, ListBuilder, StringArray, StringBuilder};
use arrow::record_batch::RecordBatch;
use film_panda::config::Config;
use film_panda::data::aggregate::{decade_counts, genre_mean_rating, Aggregates};
use film_panda::data::filter::apply;
use film_panda::data::loader::load_file;
use film_panda::data::{DataError, DatasetCache, FilterPredicate};
use film_panda::state::AppState;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

const SOURCE_CSV: &str = "\
Peringkat,Judul,Tahun,Rating,Durasi_Menit,Sutradara,Genre,Bintang_Film,User_Reviews
1,The Shawshank Redemption,1994,9.3,142,Frank Darabont,Drama,\"Tim Robbins, Morgan Freeman\",11000
2,The Godfather,1972,9.2,175,Francis Ford Coppola,\"Crime, Drama\",\"Marlon Brando, Al Pacino\",
3,The Dark Knight,2008,9.0,152,Christopher Nolan,\"Action, Crime, Drama\",\"Christian Bale, Heath Ledger\",8000
4,The Godfather Part II,1974,9.0,202,Francis Ford Coppola,\"Crime, Drama\",\"Al Pacino, Robert De Niro\",3000
5,Spirited Away,2001,8.6,125,Hayao Miyazaki,\"Animation, Adventure, Family\",\"Rumi Hiiragi, Miyu Irino\",
";

const NO_CAST_CSV: &str = "\
rank,title,year,rating,duration,director,genre
1,The Shawshank Redemption,1994,9.3,142,Frank Darabont,Drama
2,The Godfather,1972,9.2,175,Francis Ford Coppola,\"Crime, Drama\"
";

/// Write `contents` to a per-test file in the system temp dir.
fn fixture(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("film-panda-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn ranks(films: &[film_panda::data::Film]) -> Vec<u32> {
    films.iter().map(|f| f.rank).collect()
}

#[test]
fn loads_source_columns_and_normalises_lists() {
    let ds = load_file(&fixture("source.csv", SOURCE_CSV)).unwrap();

    assert_eq!(ds.len(), 5);
    assert!(ds.has_cast);
    assert_eq!(ds.year_bounds, (1972, 2008));
    assert_eq!(ds.rating_bounds, (8.6, 9.3));
    assert_eq!(ds.films[2].genres, vec!["Action", "Crime", "Drama"]);
    assert_eq!(
        ds.films[0].cast.as_deref(),
        Some(&["Tim Robbins".to_string(), "Morgan Freeman".to_string()][..])
    );
    // Missing review counts are filled with 0.
    assert_eq!(ds.films[1].user_reviews, 0);
    assert_eq!(ds.films[0].user_reviews, 11000);
}

#[test]
fn filtered_view_is_a_matching_subset() {
    let ds = load_file(&fixture("subset.csv", SOURCE_CSV)).unwrap();
    let mut pred = FilterPredicate::unrestricted(&ds);
    pred.years = (1970, 2000);
    pred.ratings = (9.0, 9.2);
    pred.genres.insert("Crime".to_string());

    let view = apply(&ds, &pred);
    assert_eq!(ranks(&view.films), vec![2, 4]);
    for film in &view.films {
        assert!(ds.films.contains(film));
        assert!(pred.matches(film));
    }
}

#[test]
fn filtering_is_idempotent() {
    let ds = load_file(&fixture("idempotent.csv", SOURCE_CSV)).unwrap();
    let mut pred = FilterPredicate::unrestricted(&ds);
    pred.genres.insert("Drama".to_string());
    pred.ratings = (9.0, 9.3);

    let once = apply(&ds, &pred);
    let refiltered: Vec<_> = once
        .films
        .iter()
        .filter(|f| pred.matches(f))
        .cloned()
        .collect();
    assert_eq!(once.films, refiltered);
    assert_eq!(apply(&ds, &pred), once);
}

#[test]
fn empty_genre_selection_only_filters_on_ranges() {
    let ds = load_file(&fixture("ranges.csv", SOURCE_CSV)).unwrap();
    let mut pred = FilterPredicate::unrestricted(&ds);
    pred.years = (1990, 2010);

    let by_range: Vec<u32> = ds
        .films
        .iter()
        .filter(|f| (1990..=2010).contains(&f.year))
        .map(|f| f.rank)
        .collect();
    assert_eq!(ranks(&apply(&ds, &pred).films), by_range);
}

#[test]
fn decade_counts_sum_to_view_size() {
    let ds = load_file(&fixture("decades.csv", SOURCE_CSV)).unwrap();
    let view = apply(&ds, &FilterPredicate::unrestricted(&ds));

    let counts = decade_counts(&view.films);
    assert_eq!(counts, vec![(1970, 2), (1990, 1), (2000, 2)]);
    assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), view.len());
}

#[test]
fn two_row_example_behaves_as_documented() {
    let ds = load_file(&fixture("two_rows.csv", NO_CAST_CSV)).unwrap();

    let mut pred = FilterPredicate::unrestricted(&ds);
    pred.years = (1990, 2000);
    assert_eq!(ranks(&apply(&ds, &pred).films), vec![1]);

    let drama = genre_mean_rating(&ds.films)
        .into_iter()
        .find(|g| g.genre == "Drama")
        .unwrap();
    assert!((drama.mean_rating - 9.25).abs() < 1e-9);

    let mut pred = FilterPredicate::unrestricted(&ds);
    pred.genres.insert("Crime".to_string());
    assert_eq!(ranks(&apply(&ds, &pred).films), vec![2]);
}

#[test]
fn missing_cast_column_omits_cast_outputs() {
    let ds = load_file(&fixture("no_cast.csv", NO_CAST_CSV)).unwrap();
    assert!(!ds.has_cast);
    assert!(ds.films.iter().all(|f| f.cast.is_none()));

    let view = apply(&ds, &FilterPredicate::unrestricted(&ds));
    let agg = Aggregates::compute(&view, 10).unwrap();
    assert!(agg.top_cast.is_none());
    assert_eq!(agg.genre_rollup.len(), 2);
}

#[test]
fn json_records_load_like_csv() {
    let json = r#"[
        {"Peringkat": 1, "Judul": "The Shawshank Redemption", "Tahun": 1994, "Rating": 9.3,
         "Durasi_Menit": 142, "Sutradara": "Frank Darabont", "Genre": "Drama", "User_Reviews": null},
        {"Peringkat": 2, "Judul": "The Godfather", "Tahun": 1972, "Rating": 9.2,
         "Durasi_Menit": 175, "Sutradara": "Francis Ford Coppola", "Genre": ["Crime", "Drama"],
         "User_Reviews": 4500.0}
    ]"#;
    let ds = load_file(&fixture("films.json", json)).unwrap();

    assert_eq!(ds.len(), 2);
    assert_eq!(ds.films[1].genres, vec!["Crime", "Drama"]);
    assert_eq!(ds.films[0].user_reviews, 0);
    assert_eq!(ds.films[1].user_reviews, 4500);
}

#[test]
fn json_columns_are_the_union_of_record_keys() {
    let json = r#"[
        {"Peringkat": 1, "Judul": "The Shawshank Redemption", "Tahun": 1994, "Rating": 9.3,
         "Durasi_Menit": 142, "Sutradara": "Frank Darabont", "Genre": "Drama"},
        {"Peringkat": 2, "Judul": "The Godfather", "Tahun": 1972, "Rating": 9.2,
         "Durasi_Menit": 175, "Sutradara": "Francis Ford Coppola", "Genre": "Crime, Drama",
         "Bintang_Film": "Marlon Brando, Al Pacino", "User_Reviews": 4500}
    ]"#;
    let ds = load_file(&fixture("sparse.json", json)).unwrap();

    assert!(ds.has_cast);
    assert_eq!(ds.films[0].cast, Some(vec![]));
    assert_eq!(
        ds.films[1].cast.as_deref(),
        Some(&["Marlon Brando".to_string(), "Al Pacino".to_string()][..])
    );
    assert_eq!(ds.films[0].user_reviews, 0);
    assert_eq!(ds.films[1].user_reviews, 4500);
}

/// Write `columns` to a Parquet file, `rows_per_group` rows per row group.
fn parquet_fixture(name: &str, columns: Vec<(&str, ArrayRef)>, rows_per_group: usize) -> PathBuf {
    let path = fixture(name, "");
    let batch = RecordBatch::try_from_iter(columns).unwrap();
    let props = WriterProperties::builder()
        .set_max_row_group_size(rows_per_group)
        .build();
    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props)).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
    path
}

fn core_columns(durations: Vec<i64>) -> Vec<(&'static str, ArrayRef)> {
    let n = durations.len() as i64;
    let titles = (1..=n).map(|i| format!("Film {i}"));
    let directors = (0..n).map(|i| format!("Director {i}"));
    let years = (0..n).map(|i| 1970 + 10 * i);
    let ratings = (0..n).map(|i| 9.0 - 0.1 * i as f64);
    vec![
        ("Peringkat", Arc::new(Int64Array::from_iter_values(1..=n)) as ArrayRef),
        ("Judul", Arc::new(StringArray::from_iter_values(titles)) as ArrayRef),
        ("Tahun", Arc::new(Int64Array::from_iter_values(years)) as ArrayRef),
        ("Rating", Arc::new(Float64Array::from_iter_values(ratings)) as ArrayRef),
        ("Durasi_Menit", Arc::new(Int64Array::from(durations)) as ArrayRef),
        ("Sutradara", Arc::new(StringArray::from_iter_values(directors)) as ArrayRef),
    ]
}

#[test]
fn parquet_columns_are_read_as_text() {
    let mut columns = core_columns(vec![175, 142, 152, 202]);
    columns.push((
        "Genre",
        Arc::new(StringArray::from(vec!["Crime, Drama", "Drama", "Action", "Crime"])) as ArrayRef,
    ));
    columns.push((
        "User_Reviews",
        Arc::new(Float64Array::from(vec![None, Some(11000.0), Some(8000.0), None])) as ArrayRef,
    ));
    let path = parquet_fixture("films.parquet", columns, 2);

    let ds = load_file(&path).unwrap();
    assert_eq!(ds.len(), 4);
    assert!(!ds.has_cast);
    assert_eq!(ds.films[0].genres, vec!["Crime", "Drama"]);
    assert_eq!(ds.films[0].year, 1970);
    assert_eq!(ds.films[0].user_reviews, 0);
    assert_eq!(ds.films[1].user_reviews, 11000);
    // Rows from the second row group keep their place.
    assert_eq!(ranks(&ds.films), vec![1, 2, 3, 4]);
    assert_eq!(ds.films[3].duration_minutes, 202);
    assert_eq!(ds.films[3].user_reviews, 0);
}

#[test]
fn parquet_errors_report_the_global_row() {
    let mut columns = core_columns(vec![175, 142, 152, -5]);
    columns.push(("Genre", Arc::new(StringArray::from(vec!["Drama"; 4])) as ArrayRef));
    let path = parquet_fixture("bad_row.pq", columns, 2);

    assert!(matches!(
        load_file(&path),
        Err(DataError::InvalidValue { row: 3, column: "duration", .. })
    ));
}

#[test]
fn parquet_list_columns_are_joined() {
    let mut genres = ListBuilder::new(StringBuilder::new());
    for film in [&["Crime", "Drama"][..], &["Animation", "Family"][..]] {
        for genre in film {
            genres.values().append_value(genre);
        }
        genres.append(true);
    }
    let mut cast = ListBuilder::new(StringBuilder::new());
    cast.values().append_value("Marlon Brando");
    cast.values().append_value("Al Pacino");
    cast.append(true);
    cast.append(false);

    let mut columns = core_columns(vec![175, 125]);
    columns.push(("Genre", Arc::new(genres.finish()) as ArrayRef));
    columns.push(("Bintang_Film", Arc::new(cast.finish()) as ArrayRef));
    let path = parquet_fixture("lists.parquet", columns, 1024);

    let ds = load_file(&path).unwrap();
    assert_eq!(ds.films[0].genres, vec!["Crime", "Drama"]);
    assert_eq!(ds.films[1].genres, vec!["Animation", "Family"]);
    assert!(ds.has_cast);
    assert_eq!(
        ds.films[0].cast.as_deref(),
        Some(&["Marlon Brando".to_string(), "Al Pacino".to_string()][..])
    );
    assert_eq!(ds.films[1].cast, Some(vec![]));
}

#[test]
fn missing_required_column_is_an_error() {
    let path = fixture("no_rating.csv", "rank,title,year\n1,A,2000\n");
    assert!(matches!(
        load_file(&path),
        Err(DataError::MissingColumn { column: "rating" })
    ));
}

#[test]
fn cache_reads_each_path_once() {
    let path = fixture("cached.csv", SOURCE_CSV);
    let mut cache = DatasetCache::new();

    let first = cache.get_or_load(&path).unwrap();
    // Even if the file changes on disk, the memoized dataset is returned.
    std::fs::write(&path, NO_CAST_CSV).unwrap();
    let second = cache.get_or_load(&path).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.len(), 5);
    assert_eq!(cache.len(), 1);
}

#[test]
fn state_recomputes_on_every_filter_change() {
    let config = Config {
        data: fixture("state.csv", SOURCE_CSV),
        top_n: 3,
    };
    let mut state = AppState::new(&config);
    assert!(state.load_error.is_none());
    assert_eq!(state.view.len(), 5);
    assert_eq!(state.metrics.mean_rating, Some(9.02));

    state.toggle_genre("Crime");
    assert_eq!(ranks(&state.view.films), vec![2, 3, 4]);
    let agg = state.aggregates.as_ref().unwrap();
    assert_eq!(agg.top_directors[0].label, "Francis Ford Coppola");
    assert_eq!(agg.top_directors[0].count, 2);

    state.set_year_range(1980, 1970);
    assert_eq!(state.predicate.years, (1970, 1980));
    assert_eq!(ranks(&state.view.films), vec![2, 4]);

    state.set_rating_range(9.15, 9.3);
    assert_eq!(ranks(&state.view.films), vec![2]);

    state.toggle_genre("Animation");
    assert!(state.view.is_empty());
    assert!(state.aggregates.is_none());
    assert_eq!(state.metrics.count, 0);
    assert_eq!(state.metrics.mean_rating, None);

    state.reset_filters();
    assert_eq!(state.view.len(), 5);
    assert!(state.predicate.genres.is_empty());
}

#[test]
fn missing_file_halts_the_dashboard() {
    let config = Config {
        data: PathBuf::from("does/not/exist/imdb_top_250_cleaned.csv"),
        top_n: 10,
    };
    let state = AppState::new(&config);

    assert!(state.dataset.is_none());
    assert!(state.aggregates.is_none());
    let msg = state.load_error.unwrap();
    assert!(msg.contains("not found"));
}
