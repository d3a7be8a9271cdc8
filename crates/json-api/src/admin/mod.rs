//! Administrative endpoints. Routes here sit behind the admin guard.

pub(crate) mod orders;
