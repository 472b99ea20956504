//! Configuration for trek.
//!
//! [load] reads trek.toml into a [RawConfig] and converts it into the runtime [Config].
//! The sections live in [general] and [preview].

pub mod general;
pub mod load;
pub mod preview;

pub use general::{General, InternalGeneral};
pub use load::{Config, RawConfig};
pub use preview::{InternalPreview, Preview};
