//! Error types for the f2f command-line front end

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    /// Command needs a logged-in user
    #[error("Not logged in. Use `f2f login test test` to log in.")]
    NotLoggedIn,

    /// No pantry ingredient with that id or name
    #[error("No pantry ingredient matches '{0}'")]
    UnknownIngredient(String),

    /// Error from the core library
    #[error(transparent)]
    Core(#[from] f2f_common::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
