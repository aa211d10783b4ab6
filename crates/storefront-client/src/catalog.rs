//! Typed operations on the catalog backend.

use crate::envelope::{decode_coupon, decode_doc, decode_message, TitleDoc};
use crate::{FetchClient, FetchError};
use storefront_core::catalog::{CatalogEntity, CatalogResource};
use storefront_core::coupon::{Coupon, CouponUpdate, NewCoupon};
use storefront_core::CouponCode;

/// Catalog and coupon REST resources.
#[derive(Clone)]
pub struct RestCatalog {
    client: FetchClient,
}

impl RestCatalog {
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &FetchClient {
        &self.client
    }

    fn item_path(resource: CatalogResource, id: &str) -> String {
        resource.item_path(&urlencoding::encode(id))
    }

    // --- Catalog entities ---

    /// `GET /{resource}/{id}`
    pub async fn entity(
        &self,
        resource: CatalogResource,
        id: &str,
    ) -> Result<CatalogEntity, FetchError> {
        let response = self.client.get(Self::item_path(resource, id)).send().await?;
        decode_doc(response)
    }

    /// Title of one entity: `GET /{resource}/{id}` → `data.doc.title`.
    pub async fn entity_title(
        &self,
        resource: CatalogResource,
        id: &str,
    ) -> Result<String, FetchError> {
        let response = self.client.get(Self::item_path(resource, id)).send().await?;
        decode_doc::<TitleDoc>(response).map(|doc| doc.title)
    }

    /// `GET /{resource}`
    pub async fn list(&self, resource: CatalogResource) -> Result<Vec<CatalogEntity>, FetchError> {
        let response = self.client.get(resource.collection_path()).send().await?;
        decode_doc(response)
    }

    /// `DELETE /{resource}/{id}`. Returns the backend's message, if any.
    pub async fn delete(
        &self,
        resource: CatalogResource,
        id: &str,
    ) -> Result<Option<String>, FetchError> {
        let response = self
            .client
            .delete(Self::item_path(resource, id))
            .send()
            .await?;
        decode_message(response).map(|env| env.message)
    }

    // --- Coupons ---

    /// `GET /coupon`
    pub async fn coupons(&self) -> Result<Vec<Coupon>, FetchError> {
        let response = self
            .client
            .get(CatalogResource::Coupon.collection_path())
            .send()
            .await?;
        decode_doc(response)
    }

    /// `POST /coupon`
    pub async fn create_coupon(&self, coupon: &NewCoupon) -> Result<Coupon, FetchError> {
        let response = self
            .client
            .post(CatalogResource::Coupon.collection_path())
            .json(coupon)?
            .send()
            .await?;
        decode_coupon(response)
    }

    /// `PATCH /coupon/{code}`
    pub async fn update_coupon(
        &self,
        code: &CouponCode,
        update: &CouponUpdate,
    ) -> Result<Coupon, FetchError> {
        let response = self
            .client
            .patch(Self::item_path(CatalogResource::Coupon, code.as_str()))
            .json(update)?
            .send()
            .await?;
        decode_coupon(response)
    }

    /// Flip a coupon's activation flag.
    pub async fn set_coupon_active(
        &self,
        code: &CouponCode,
        is_active: bool,
    ) -> Result<Coupon, FetchError> {
        self.update_coupon(code, &CouponUpdate::status(is_active)).await
    }

    /// `DELETE /coupon/{code}`
    pub async fn delete_coupon(&self, code: &CouponCode) -> Result<Option<String>, FetchError> {
        self.delete(CatalogResource::Coupon, code.as_str()).await
    }
}
