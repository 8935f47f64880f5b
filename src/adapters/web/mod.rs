//! Web research adapter.

mod http_web_researcher;

pub use http_web_researcher::{strip_markup, HttpWebResearcher, MAX_FETCH_BYTES, MAX_PAGE_CHARS};
