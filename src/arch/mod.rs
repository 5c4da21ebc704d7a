#[cfg(feature = "6502")]
#[path = "6502/mod.rs"]
pub mod _6502;
