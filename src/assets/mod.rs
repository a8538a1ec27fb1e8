/// Bounded background bitmap intake.
pub mod decode;
