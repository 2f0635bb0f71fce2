mod author;
mod requests;
mod types;

pub use author::{Author, Principal};
pub use requests::ArticleData;
pub use types::Article;
