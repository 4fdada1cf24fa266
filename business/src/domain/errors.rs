/// Repository errors for domain layer.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository.database_error")]
    DatabaseError,
    #[error("repository.mapping")]
    Mapping,
}

impl RepositoryError {
    pub fn database_error() -> Self {
        RepositoryError::DatabaseError
    }
    pub fn mapping() -> Self {
        RepositoryError::Mapping
    }
}
