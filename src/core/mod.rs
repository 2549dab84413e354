pub mod proxy;
pub mod range;
pub mod resolver;
pub mod sheets;
pub mod signage;

pub use crate::domain::model::{Business, Row};
pub use crate::domain::ports::{RowSource, SelectionStore};
pub use crate::utils::error::Result;

/// The reason phrase the upstream actually sent. Standard phrases are not
/// kept by the HTTP client, so those fall back to the status code's own.
pub(crate) fn status_text(response: &reqwest::Response) -> String {
    match response.extensions().get::<hyper::ext::ReasonPhrase>() {
        Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
        None => response
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string(),
    }
}
