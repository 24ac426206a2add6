pub mod base64;
pub mod string;
pub mod url;

// Re-export common utilities
pub use self::base64::{repair_base64, url_safe_base64_decode};
pub use self::string::{split_list, to_bool, truncate_chars};
pub use self::url::{url_decode, AuthorityUrl};
