pub mod avatar;
pub mod handlers;

use axum::routing::{delete, get, post, put};

use crate::resource::Resource;

pub fn resource() -> Resource {
    Resource {
        index: get(handlers::handle_list_users),
        store: post(handlers::handle_create_user),
        show: get(handlers::handle_get_user),
        update: put(handlers::handle_update_user),
        destroy: delete(handlers::handle_delete_user),
    }
}
