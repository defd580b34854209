pub mod follow_ups;
pub mod lifecycle;
pub mod notes;
pub mod sequence;
pub mod tax;
