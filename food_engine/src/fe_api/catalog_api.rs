use std::fmt::Debug;

use crate::{
    db_types::{MenuItem, Restaurant},
    traits::CatalogManagement,
    CatalogApiError,
};

/// Read-only access to restaurants and their menus.
pub struct CatalogApi<B> {
    db: B,
}

impl<B: Debug> Debug for CatalogApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CatalogApi ({:?})", self.db)
    }
}

impl<B> CatalogApi<B>
where B: CatalogManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn restaurants(&self) -> Result<Vec<Restaurant>, CatalogApiError> {
        self.db.fetch_restaurants().await
    }

    /// Only available items are listed. A restaurant that does not exist has an empty menu.
    pub async fn menu_for_restaurant(&self, restaurant_id: i64) -> Result<Vec<MenuItem>, CatalogApiError> {
        self.db.fetch_available_menu(restaurant_id).await
    }
}
