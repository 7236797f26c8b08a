pub mod sharer_user_id;
pub mod uuid_path;
pub mod validated_json;

pub use sharer_user_id::{SHARER_USER_ID_HEADER, SharerUserId};
pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
