pub mod handlers;

use axum::routing::{delete, get, post, put};

use crate::resource::Resource;

pub fn resource() -> Resource {
    Resource {
        index: get(handlers::handle_list_experiences),
        store: post(handlers::handle_create_experience),
        show: get(handlers::handle_get_experience),
        update: put(handlers::handle_update_experience),
        destroy: delete(handlers::handle_delete_experience),
    }
}
