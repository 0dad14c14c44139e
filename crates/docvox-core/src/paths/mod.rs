//! Path resolution for docvox.
//!
//! - `platform` - data root and default output directory
//! - `ensure` - output directory creation and writability checks
//! - `layout` - per-run working directory and final output naming

mod ensure;
mod error;
mod layout;
mod platform;

pub use ensure::{ensure_output_dir, require_output_dir};
pub use error::PathError;
pub use layout::RunLayout;
pub use platform::{DATA_DIR_ENV, data_root, default_output_dir, settings_file_path};
