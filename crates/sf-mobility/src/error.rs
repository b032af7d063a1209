use sf_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("cannot walk an empty path")]
    EmptyPath,

    #[error("routing failed: {0}")]
    Routing(#[from] SpatialError),
}

pub type MobilityResult<T> = Result<T, MobilityError>;
