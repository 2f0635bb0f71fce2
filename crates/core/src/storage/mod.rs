mod error;
mod traits;

pub use error::{RepositoryError, Result, ARTICLE_ENTITY};
pub use traits::ArticleRepository;
