use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const GENRES: [&str; 12] = [
    "Drama", "Crime", "Action", "Adventure", "Comedy", "Thriller", "Mystery", "Biography",
    "Animation", "Sci-Fi", "Romance", "War",
];

const FIRST_NAMES: [&str; 10] = [
    "Akira", "Billy", "Sergio", "Martin", "Hayao", "Stanley", "Ingmar", "Alfred", "Greta",
    "Denis",
];

const LAST_NAMES: [&str; 10] = [
    "Kurosawa", "Wilder", "Leone", "Scorsese", "Miyazaki", "Kubrick", "Bergman", "Hitchcock",
    "Gerwig", "Villeneuve",
];

const TITLE_WORDS: [&str; 16] = [
    "Silent", "Road", "City", "Night", "Seven", "Last", "Star", "River", "Glory", "Paths",
    "Stranger", "Window", "Return", "Kingdom", "Shadow", "Empire",
];

/// One CSV row, using the column names of the cleaned top-250 file.
#[derive(Serialize)]
struct SampleFilm {
    #[serde(rename = "Peringkat")]
    rank: i64,
    #[serde(rename = "Judul")]
    title: String,
    #[serde(rename = "Tahun")]
    year: i64,
    #[serde(rename = "Rating")]
    rating: f64,
    #[serde(rename = "Durasi_Menit")]
    duration: i64,
    #[serde(rename = "Sutradara")]
    director: String,
    #[serde(rename = "Genre")]
    genre: String,
    #[serde(rename = "Bintang_Film")]
    cast: String,
    #[serde(rename = "User_Reviews")]
    user_reviews: Option<f64>,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

fn generate(rng: &mut SimpleRng, n: usize) -> Vec<SampleFilm> {
    (0..n)
        .map(|i| {
            // Ratings fall gently with rank, 9.3 at the top.
            let rating = (93.0 - (i as f64 / n as f64) * 12.0 - rng.next_f64()).round() / 10.0;

            let mut genres: Vec<&str> = Vec::new();
            for _ in 0..1 + rng.below(3) {
                let g = rng.pick(&GENRES);
                if !genres.contains(&g) {
                    genres.push(g);
                }
            }

            let cast: Vec<String> = (0..3)
                .map(|_| format!("{} {}", rng.pick(&FIRST_NAMES), rng.pick(&LAST_NAMES)))
                .collect();

            SampleFilm {
                rank: i as i64 + 1,
                title: format!("{} {}", rng.pick(&TITLE_WORDS), rng.pick(&TITLE_WORDS)),
                year: 1921 + rng.below(104) as i64,
                rating,
                duration: 80 + rng.below(120) as i64,
                director: format!("{} {}", rng.pick(&FIRST_NAMES), rng.pick(&LAST_NAMES)),
                genre: genres.join(", "),
                cast: cast.join(", "),
                // Roughly one in ten review counts is missing.
                user_reviews: (rng.below(10) != 0).then(|| (500 + rng.below(12_000)) as f64),
            }
        })
        .collect()
}

fn write_csv(films: &[SampleFilm], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for film in films {
        writer.serialize(film).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(films: &[SampleFilm], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Peringkat", DataType::Int64, false),
        Field::new("Judul", DataType::Utf8, false),
        Field::new("Tahun", DataType::Int64, false),
        Field::new("Rating", DataType::Float64, false),
        Field::new("Durasi_Menit", DataType::Int64, false),
        Field::new("Sutradara", DataType::Utf8, false),
        Field::new("Genre", DataType::Utf8, false),
        Field::new("Bintang_Film", DataType::Utf8, false),
        Field::new("User_Reviews", DataType::Float64, true),
    ]));

    let strings = |f: fn(&SampleFilm) -> &str| {
        StringArray::from(films.iter().map(f).collect::<Vec<_>>())
    };

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(films.iter().map(|f| f.rank))),
            Arc::new(strings(|f| f.title.as_str())),
            Arc::new(Int64Array::from_iter_values(films.iter().map(|f| f.year))),
            Arc::new(Float64Array::from_iter_values(films.iter().map(|f| f.rating))),
            Arc::new(Int64Array::from_iter_values(films.iter().map(|f| f.duration))),
            Arc::new(strings(|f| f.director.as_str())),
            Arc::new(strings(|f| f.genre.as_str())),
            Arc::new(strings(|f| f.cast.as_str())),
            Arc::new(Float64Array::from(
                films.iter().map(|f| f.user_reviews).collect::<Vec<_>>(),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let films = generate(&mut rng, 250);

    write_csv(&films, "sample_films.csv")?;
    write_parquet(&films, "sample_films.parquet")?;

    println!(
        "Wrote {} films to sample_films.csv and sample_films.parquet",
        films.len()
    );
    Ok(())
}
