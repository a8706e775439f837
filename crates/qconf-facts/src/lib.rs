//! Platform fact collection for emulator build configuration.
//!
//! A derivation run starts from a [`RawEnvironment`]: the host kernel name,
//! host CPU, target CPU and product identity as plain strings. [`collect`]
//! normalizes those strings into a [`PlatformFacts`] value:
//! - **Host axes:** OS family, CPU architecture, word size, byte order
//! - **Target axis:** the CPU architecture being emulated
//! - **Product identity:** version, distribution label, data directory
//!
//! Unrecognized identifiers are rejected, never guessed.

pub mod collect;
pub mod error;
pub mod facts;
pub mod host;
pub mod parse;
pub mod target;

pub use collect::{collect, RawEnvironment};
pub use error::{CollectError, FactsError};
pub use facts::PlatformFacts;
pub use host::{ByteOrder, HostArch, HostFamily, WordBits};
pub use target::TargetArch;
