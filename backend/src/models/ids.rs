//! Opaque record identifiers.
//!
//! Handlers only ever see these through `Display`/`FromStr`, so the storage
//! backend is free to pick how identifiers are produced.

crate::define_record_id!(UserId);
crate::define_record_id!(ExerciseId);
