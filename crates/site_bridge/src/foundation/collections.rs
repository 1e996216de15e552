//! Specialized collection types

pub use slotmap::{Key, KeyData, SlotMap};

/// Generational handle map
///
/// Removing an entry bumps the slot version, so a stale key never resolves to
/// a newer entry that happens to reuse the same slot.
pub type HandleMap<K, T> = SlotMap<K, T>;

/// Encode a slot map key as an opaque 64-bit handle (index and version)
pub fn key_to_raw<K: Key>(key: K) -> u64 {
    key.data().as_ffi()
}

/// Decode an opaque 64-bit handle back into a slot map key
///
/// Malformed values decode to a key that resolves to nothing.
pub fn raw_to_key<K: Key>(raw: u64) -> K {
    K::from(KeyData::from_ffi(raw))
}
