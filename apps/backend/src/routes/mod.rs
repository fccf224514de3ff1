pub mod cards;
pub mod definitions;
pub mod lookups;
pub mod notes;
