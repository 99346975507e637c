use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaggingError {
    #[error("Location is too long ({len} characters, maximum is {max})")]
    LocationTooLong { len: usize, max: usize },
}

pub type TaggingResult<T> = Result<T, TaggingError>;
