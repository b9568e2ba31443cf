//! Client configuration.
//!
//! Settings come from a JSON file in the user's config directory; the
//! API URL can be overridden from the command line or the
//! `CHATTERBOX_API_URL` environment variable.

mod store;

pub use store::{ClientConfig, ConfigError, ConfigStore, DEFAULT_OUTPUT, normalize_url};
