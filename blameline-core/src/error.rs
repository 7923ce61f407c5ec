/// Boxed error returned by hunk lookups.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by the orchestration layer and host adapters.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The injected hunk lookup failed.
    #[error("blame lookup failed for {uri}: {source}")]
    Lookup {
        uri: String,
        #[source]
        source: BoxError,
    },
    /// A settings write was rejected by the configuration store.
    #[error("could not update setting {key}: {message}")]
    ConfigUpdate { key: String, message: String },
}
