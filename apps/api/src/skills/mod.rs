pub mod handlers;

use axum::routing::{delete, get, post, put};

use crate::resource::Resource;

pub fn resource() -> Resource {
    Resource {
        index: get(handlers::handle_list_skills),
        store: post(handlers::handle_create_skill),
        show: get(handlers::handle_get_skill),
        update: put(handlers::handle_update_skill),
        destroy: delete(handlers::handle_delete_skill),
    }
}
