//! Content module - reads and writes post files

mod frontmatter;
pub mod loader;
mod post;
pub mod writer;

pub use frontmatter::{FrontMatter, FrontMatterError};
pub use loader::{PostDocument, PostLoader};
pub use post::{Post, PostKind, PostSummary};
pub use writer::PostWriter;
