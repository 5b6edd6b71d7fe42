use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("invalid field name: {0:?}")]
    InvalidField(String),

    #[error("{collection} row has no string `id`")]
    MissingId { collection: String },

    #[error("{collection} already contains id {id}")]
    Duplicate { collection: String, id: String },

    #[error("corrupt store file at line {line}: {source}")]
    Corrupt {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("no current user; set CAMPUS_USER_ID or pass --user")]
    NoIdentity,
}
