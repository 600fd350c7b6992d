/// Persistence-layer errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("invalid map identifier `{map_id}`")]
    InvalidMapId { map_id: String },

    #[error("corrupt record for map `{map_id}`: {details}")]
    CorruptRecord { map_id: String, details: String },
}
