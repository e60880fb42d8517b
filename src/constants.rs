//! Environment and file-name constants shared by the binary and the library.
use uuid::Uuid;

// Configuration
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const CONFIG_PATH_ENV: &str = "TIKI_CONFIG";
pub const PORT_ENV: &str = "PORT";
pub const DB_PATH_ENV: &str = "TIKI_DB_PATH";
pub const METRICS_PORT_ENV: &str = "TIKI_METRICS_PORT";

// Defaults
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_METRICS_PORT: u16 = 9898;
pub const DEFAULT_DB_PATH: &str = "data/catalog.db";
pub const DEFAULT_ASSETS_DIR: &str = "public";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_LOG_FILE: &str = "tiki_menu.log";

/// Namespace for v5 ids of seeded menu items.
pub const SEED_NAMESPACE: Uuid = Uuid::from_u128(0x7d1c_2a9e_4b3f_5c60_8e17_a2d4_f0b9_3c51);

// Metric names
pub const METRIC_MUTATIONS: &str = "tiki_menu_mutations_total";
pub const METRIC_VALIDATION_FAILURES: &str = "tiki_menu_validation_failures_total";
pub const METRIC_REJECTED: &str = "tiki_menu_rejected_total";
