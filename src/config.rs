use std::path::PathBuf;

use clap::Parser;

/// File read when no `--data` argument is given.
pub const DEFAULT_DATA_FILE: &str = "imdb_top_250_cleaned.csv";

/// Film Panda – IMDb top 250 dashboard
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "film-panda")]
#[command(about = "Interactive dashboard over the IMDb top 250 films", long_about = None)]
pub struct Config {
    /// Path to the film table (.csv, .json or .parquet)
    #[arg(short, long, default_value = DEFAULT_DATA_FILE)]
    pub data: PathBuf,

    /// How many entries the "top directors" and "top cast" charts show
    #[arg(long, default_value_t = 10)]
    pub top_n: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data: PathBuf::from(DEFAULT_DATA_FILE),
            top_n: 10,
        }
    }
}
