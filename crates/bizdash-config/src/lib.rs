//! Dashboard configuration: display locale, status window, page sizes,
//! per-view search overrides, and the role → view capability table.
//!
//! Configuration is read from TOML. Every key is optional; a missing file
//! or an empty document yields the built-in defaults.

mod error;
mod load;
mod schema;


pub use error::ConfigError;
pub use load::{from_toml_str, load, load_or_default, to_toml_string};
pub use schema::{DashboardConfig, RoleConfig, ViewConfig, ViewId};
