//! IMSLP Report Common Library
//!
//! CLIと他フロントエンドで共有される型・カタログ・照合ロジック

pub mod types;
pub mod error;
pub mod catalog;
pub mod matcher;
pub mod composer;

pub use types::{MatchResult, PdfLink, QueryInput, WorkRecord};
pub use error::{Error, Result};
pub use catalog::WorkCatalog;
pub use matcher::{candidate_keys, match_work, normalize_key, MATCH_THRESHOLD, MIN_COMMON_WORDS};
pub use composer::normalize_composer_name;
