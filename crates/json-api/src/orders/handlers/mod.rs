//! Order Handlers

pub(crate) mod admin_index;
pub(crate) mod create;
pub(crate) mod index;
pub(crate) mod update_status;
