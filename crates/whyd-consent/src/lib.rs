//! Consent page content: bilingual GDPR text rendered from Markdown.
//!
//! The consent documents are rendered line by line through a fixed, ordered
//! set of regex substitutions, cached once per language at startup, and
//! embedded into the consent page body on every request.

pub mod blocks;
pub mod escape;
pub mod lang;
pub mod markdown;
pub mod page;

pub use blocks::ConsentBlocks;
pub use escape::escape_html;
pub use lang::{ConsentDocument, Lang};
pub use markdown::{render_document, render_line};
pub use page::{render_page_content, sanitize_redirect, DEFAULT_REDIRECT};
