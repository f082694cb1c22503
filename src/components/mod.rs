//! UI components for the voucher generator.
//!
//! # Layout Components
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadSection`] - Excel file upload with drag & drop and parse trigger
//! - [`PreviewSection`] - Review table and generate trigger
//! - [`StatusBanner`] - Single visible status line

mod footer;
mod hero;
mod preview;
mod status;
mod upload;

pub use footer::*;
pub use hero::*;
pub use preview::*;
pub use status::*;
pub use upload::*;
