//! Small string helpers shared by templates and feeds

mod html;
mod url;

pub use html::*;
pub use url::*;
