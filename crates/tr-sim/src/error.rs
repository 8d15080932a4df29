use thiserror::Error;
use tr_network::NetworkError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

pub type SimResult<T> = Result<T, SimError>;
