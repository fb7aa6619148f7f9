use thiserror::Error;

use crate::model::{ReviewError, SettingsError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Review(#[from] ReviewError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
