pub mod dictionary;
pub mod notes;
pub mod sessions;
