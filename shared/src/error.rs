use thiserror::Error;

/// Errors raised while decoding an inbound inventory sync message.
///
/// A malformed payload means the sending connection is broken; the message is
/// never partially applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryMessageError {
    /// The payload ended before every slot had an id
    #[error("Inventory message truncated: expected {expected} slot ids, read {read}")]
    Truncated { expected: usize, read: usize },
}
