pub mod config;
pub mod external_catalog;
pub mod metrics;
pub mod searcher;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, LogFormat,
    SanitizedConfig,
};
pub use external_catalog::{ExternalCatalog, ExternalCatalogError, TmdbClient};
pub use searcher::{
    HttpSourceFetcher, MediaKind, QualityTier, ResultSet, SearchError, SearchPolicy,
    SearchService, SortKey, SortOrder, SourceFetcher, TorrentCandidate,
};
