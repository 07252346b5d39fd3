//! Entity CRUD routes: collection path for list/create/update, `/:id` for read/delete.

use crate::domain::Entity;
use crate::handlers::entity::{create, delete as delete_handler, list, read, update, EntityContext};
use axum::{routing::get, Router};

pub fn entity_routes<E: Entity>(ctx: EntityContext<E>) -> Router {
    Router::new()
        .route(E::PATH, get(list::<E>).post(create::<E>).put(update::<E>))
        .route(
            &format!("{}/:id", E::PATH),
            get(read::<E>).delete(delete_handler::<E>),
        )
        .with_state(ctx)
}
