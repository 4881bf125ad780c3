use axum::routing::MethodRouter;
use axum::Router;

use crate::state::AppState;

/// The five canonical CRUD routes for one entity type, as an explicit table
/// of named handlers. Each entity module builds one of these and mounts it
/// against the router.
pub struct Resource {
    pub index: MethodRouter<AppState>,
    pub store: MethodRouter<AppState>,
    pub show: MethodRouter<AppState>,
    pub update: MethodRouter<AppState>,
    pub destroy: MethodRouter<AppState>,
}

impl Resource {
    /// Mounts the collection routes at `collection` and the member routes at
    /// `member`, which must carry the trailing id path parameter.
    pub fn mount(
        self,
        router: Router<AppState>,
        collection: &str,
        member: &str,
    ) -> Router<AppState> {
        router
            .route(collection, self.index.merge(self.store))
            .route(member, self.show.merge(self.update).merge(self.destroy))
    }
}
