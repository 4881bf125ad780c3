pub mod handlers;

use axum::routing::{delete, get, post, put};

use crate::resource::Resource;

pub fn resource() -> Resource {
    Resource {
        index: get(handlers::handle_list_educations),
        store: post(handlers::handle_create_education),
        show: get(handlers::handle_get_education),
        update: put(handlers::handle_update_education),
        destroy: delete(handlers::handle_delete_education),
    }
}
