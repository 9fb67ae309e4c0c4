pub(crate) mod error;
pub(crate) mod records;

pub(crate) use error::ApiError;
