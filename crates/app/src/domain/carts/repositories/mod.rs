//! Cart Repositories

mod carts;
mod items;

pub(crate) use carts::PgCartsRepository;
pub(crate) use items::PgCartItemsRepository;

use sqlx::{Postgres, Transaction};

use crate::domain::{carts::records::CartRecord, users::records::UserUuid};

/// Read a cart and its lines inside `tx`; `None` when the user never had a cart.
pub(crate) async fn load_cart(
    carts: &PgCartsRepository,
    items: &PgCartItemsRepository,
    tx: &mut Transaction<'_, Postgres>,
    user: UserUuid,
) -> Result<Option<CartRecord>, sqlx::Error> {
    let Some(mut cart) = carts.find_cart(tx, user).await? else {
        return Ok(None);
    };

    cart.items = items.get_cart_items(tx, user).await?;

    Ok(Some(cart))
}
