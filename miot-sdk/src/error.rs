use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Spec cache error: {0}")]
    Cache(#[from] spec_cache::CacheError),

    #[error("API error: {0}")]
    Api(#[from] miot_api::ApiError),

    #[error("Configuration error: {0}")]
    Config(String),
}
