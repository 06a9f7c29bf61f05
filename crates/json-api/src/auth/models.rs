//! Auth response models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::users::records::UserRecord;

/// Public view of a user account
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    /// The unique identifier of the user
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Login e-mail address
    pub email: String,

    /// Either `user` or `admin`
    pub role: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.uuid.into(),
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
        }
    }
}
