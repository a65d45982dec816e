use thiserror::Error;

/// Returned when a `BitReader` runs out of bits before a value is complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Bit reader ran out of data while deserializing")]
pub struct SerdeErr;
