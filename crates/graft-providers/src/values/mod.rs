//! Value source implementations
//!
//! | Type | Kind | Description |
//! |------|------|-------------|
//! | [`LayeredValueSource`] | `ValueSource` | Merges providers and runtime overrides |
//! | [`MapValues`] | `ValueProvider` | In-memory tree |
//! | [`FileValues`] | `ValueProvider` | JSON, YAML or TOML file |
//! | [`EnvValues`] | `ValueProvider` | Prefixed environment variables |

pub mod env;
pub mod file;
pub mod formats;
pub mod layered;
pub mod map;
pub mod tree;

pub use env::EnvValues;
pub use file::FileValues;
pub use layered::LayeredValueSource;
pub use map::MapValues;
