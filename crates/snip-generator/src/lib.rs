pub mod random;
pub mod seq;

pub use random::RandomGenerator;
pub use seq::SeqGenerator;

use snip_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// A generated code may collide with one already stored; the caller is
/// responsible for detecting that and asking for another candidate.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;
    /// Produces the next candidate code.
    fn generate(&self) -> Self::Output;
}
