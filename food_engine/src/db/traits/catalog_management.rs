use crate::{
    db_types::{MenuItem, Restaurant},
    CatalogApiError,
};

#[allow(async_fn_in_trait)]
pub trait CatalogManagement {
    /// All restaurants, ordered by name.
    async fn fetch_restaurants(&self) -> Result<Vec<Restaurant>, CatalogApiError>;

    /// The available menu items for the given restaurant, ordered by name. An unknown restaurant id yields an empty
    /// list.
    async fn fetch_available_menu(&self, restaurant_id: i64) -> Result<Vec<MenuItem>, CatalogApiError>;
}
