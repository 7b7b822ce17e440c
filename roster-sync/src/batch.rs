//! Fixed-size batching of API payloads.

use std::num::NonZeroUsize;

/// Emails per invite call.
pub const INVITE_BATCH_SIZE: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(n) => n,
    None => unreachable!(),
};

/// Emails per delete call.
pub const DELETE_BATCH_SIZE: NonZeroUsize = match NonZeroUsize::new(50) {
    Some(n) => n,
    None => unreachable!(),
};

/// Emails per move call. The move endpoint documents no limit; the invite
/// limit is applied.
pub const MOVE_BATCH_SIZE: NonZeroUsize = INVITE_BATCH_SIZE;

/// Split `items` into ordered chunks of `size`; only the last may be shorter.
///
/// Empty input yields no chunks.
pub fn chunk<T: Clone>(items: &[T], size: NonZeroUsize) -> Vec<Vec<T>> {
    items.chunks(size.get()).map(<[T]>::to_vec).collect()
}
