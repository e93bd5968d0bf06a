//! Obscure or deobscure source files with a seeded per-byte shift.
//!
//! Security through obscurity, stated as such: the transform hides code
//! from plain sight and nothing more.

pub mod codec;
pub mod fingerprint;
pub mod process;
