pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid line number: {0} (expected 1..=3)")]
    InvalidLine(u8),

    #[error("Invalid sensor number: {0} (expected 1..=3)")]
    InvalidSensor(u8),
}
