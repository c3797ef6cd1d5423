//! Proptest generators for property-based testing.

use proptest::prelude::*;

use blocknotes_core::{Keypair, NoteId, Principal, Visibility};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a random principal.
pub fn principal() -> impl Strategy<Value = Principal> {
    keypair().prop_map(|kp| kp.principal())
}

/// Generate two distinct principals.
pub fn distinct_principals() -> impl Strategy<Value = (Principal, Principal)> {
    (principal(), principal()).prop_filter("principals must differ", |(a, b)| a != b)
}

/// Generate a visibility level.
pub fn visibility() -> impl Strategy<Value = Visibility> {
    prop_oneof![
        Just(Visibility::Private),
        Just(Visibility::Shared),
        Just(Visibility::Public),
    ]
}

/// Generate a wire value that is not a valid visibility.
pub fn invalid_visibility() -> impl Strategy<Value = u8> {
    3u8..=u8::MAX
}

/// Generate valid (non-empty) note content.
pub fn content() -> impl Strategy<Value = String> {
    "\\PC{1,64}".prop_map(String::from)
}

/// Generate a note id that is never the sentinel.
pub fn note_id() -> impl Strategy<Value = NoteId> {
    (1u64..=u64::MAX).prop_map(NoteId::new)
}
