//! Helper functions shared by the generator, the server and the CLI
//!
//! TOC extraction, URL building, XML escaping and SEO metadata.

pub mod seo;
pub mod toc;
pub mod url;
pub mod xml;

pub use seo::{article_json_ld, og_image_url};
pub use toc::{extract_toc, heading_slug, TocItem};
pub use url::{encode_component, full_url_for, post_url, tag_url};
pub use xml::{date_rfc822, date_w3c, escape_xml};
