use std::env;
use std::path::PathBuf;

/// Environment variable naming the history directory.
pub const DATA_DIR_VAR: &str = "LOTCALC_DATA_DIR";

const DEFAULT_DATA_DIR: &str = ".lotcalc";

/// Load `.env` (if any) and set up logging from `RUST_LOG`.
pub fn preprocess() {
    dotenv::dotenv().ok();
    env_logger::init();
}

/// `--data-dir`, then `$LOTCALC_DATA_DIR`, then `./.lotcalc`.
pub fn data_dir(cli_override: Option<PathBuf>) -> PathBuf {
    cli_override
        .or_else(|| env::var_os(DATA_DIR_VAR).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}
