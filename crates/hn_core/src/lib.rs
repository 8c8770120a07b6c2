pub mod error;
pub mod source;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use source::StorySource;
pub use storage::StoryCache;
pub use types::{Checksum, FormattedRecord, Story, StoryId, StoryIdSet, CHECKSUM_LEN};
