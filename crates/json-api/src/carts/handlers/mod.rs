//! Cart Handlers

use salvo::prelude::{Depot, StatusError};
use uuid::Uuid;

use storefront_app::domain::users::records::UserUuid;

use crate::extensions::*;

pub(crate) mod add;
pub(crate) mod clear;
pub(crate) mod get;
pub(crate) mod remove_item;
pub(crate) mod update_item;

/// The cart owner named in the request, if the caller may act for them.
fn authorize(depot: &Depot, user: Uuid) -> Result<UserUuid, StatusError> {
    let principal = depot.principal_or_401()?;
    let user = UserUuid::from_uuid(user);

    if principal.can_act_for(user) {
        Ok(user)
    } else {
        Err(StatusError::forbidden().brief("Access denied"))
    }
}
