use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unsupported index version {0}")]
    UnsupportedIndexVersion(u32),

    #[error("descriptor for {id} lists {listed} bytes for {file} but found {actual}")]
    SizeMismatch {
        id: String,
        file: String,
        listed: u64,
        actual: u64,
    },
}
