//! Utility modules supporting the harvest and export pipelines.
//!
//! - [`clean_description`]: strip HTML tags and entities from volume descriptions
//! - [`fold_diacritics`]: fold accented Latin letters to ASCII
//! - [`title_slug`]: build the slug segment of synthesized download URLs

mod text;

pub use text::{clean_description, fold_diacritics, title_slug};
