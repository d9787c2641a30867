use thiserror::Error;

/// Fatal errors: anything that aborts the whole run rather than producing a
/// single `{request_id, error_message}` entry.
#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed input: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Catalogue(#[from] transit_catalogue::catalogue::Error),
    #[error("{0}")]
    RenderSettings(#[from] transit_catalogue::render::Error),
    #[error("{0}")]
    RoutingSettings(#[from] transit_catalogue::router::Error),
}
