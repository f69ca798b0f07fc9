//! Form field names

pub const NAME: &str = "name";
pub const EMAIL: &str = "email";
pub const AGE: &str = "age";
pub const ROLE: &str = "role";
pub const RECOMMEND: &str = "recommend";
pub const IMPROVEMENTS: &str = "improvements";
pub const COMMENTS: &str = "comments";
