//! Response envelopes used by the catalog backend.
//!
//! ```text
//! GET    /{resource}/{id}  { data: { doc: { title, ... } } }
//! GET    /{resource}       { status, data: { doc: [...] } }
//! POST   /coupon           { status, data: { coupon } }
//! PATCH  /coupon/{code}    { status, data: { coupon } }
//! DELETE /{resource}/{id}  { status, message }
//! ```

use crate::{FetchError, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use storefront_core::coupon::Coupon;

/// `{ status?, data: { doc } }`
#[derive(Debug, Clone, Deserialize)]
pub struct DocEnvelope<T> {
    #[serde(default)]
    pub status: Option<String>,
    pub data: DocData<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocData<T> {
    pub doc: T,
}

/// Minimal entity shape needed for a title lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct TitleDoc {
    pub title: String,
}

/// `{ status?, data: { coupon } }`
#[derive(Debug, Clone, Deserialize)]
pub struct CouponEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    pub data: CouponData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CouponData {
    pub coupon: Coupon,
}

/// `{ status?, message? }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Check the status and decode the body.
pub(crate) fn decode<T: DeserializeOwned>(response: Response) -> Result<T, FetchError> {
    response.error_for_status()?.json()
}

/// Unwrap `data.doc`.
pub(crate) fn decode_doc<T: DeserializeOwned>(response: Response) -> Result<T, FetchError> {
    decode::<DocEnvelope<T>>(response).map(|env| env.data.doc)
}

/// Unwrap `data.coupon`.
pub(crate) fn decode_coupon(response: Response) -> Result<Coupon, FetchError> {
    decode::<CouponEnvelope>(response).map(|env| env.data.coupon)
}

/// Decode a delete response. An empty body (e.g. 204) carries no message.
pub(crate) fn decode_message(response: Response) -> Result<MessageEnvelope, FetchError> {
    let response = response.error_for_status()?;
    if response.is_empty() {
        return Ok(MessageEnvelope::default());
    }
    response.json()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use storefront_core::catalog::CatalogEntity;
    use storefront_core::CouponCode;

    fn make_response(status: u16, body: &str) -> Response {
        Response::new(status, HashMap::new(), body.as_bytes().to_vec())
    }

    #[test]
    fn test_decode_title_doc() {
        let resp = make_response(
            200,
            r#"{"status": "success", "data": {"doc": {"_id": "64f1", "title": "Fiction"}}}"#,
        );
        let doc: TitleDoc = decode_doc(resp).unwrap();
        assert_eq!(doc.title, "Fiction");
    }

    #[test]
    fn test_decode_title_doc_missing_title() {
        let resp = make_response(200, r#"{"data": {"doc": {"_id": "64f1"}}}"#);
        let result: Result<TitleDoc, _> = decode_doc(resp);
        assert!(matches!(result, Err(FetchError::ParseError(_))));
    }

    #[test]
    fn test_decode_doc_list() {
        let resp = make_response(
            200,
            r#"{"status": "success", "results": 2, "data": {"doc": [
                {"_id": "1", "title": "Penguin"},
                {"_id": "2", "title": "Orbit", "slug": "orbit"}
            ]}}"#,
        );
        let docs: Vec<CatalogEntity> = decode_doc(resp).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].slug.as_deref(), Some("orbit"));
    }

    #[test]
    fn test_decode_coupon() {
        let resp = make_response(
            201,
            r#"{"status": "success", "data": {"coupon": {
                "code": "WELCOME",
                "discountType": "percentage",
                "discountPercent": 15,
                "validFrom": "2024-01-01T00:00:00Z",
                "validUntil": "2024-12-31T23:59:59Z",
                "isActive": true
            }}}"#,
        );
        let coupon = decode_coupon(resp).unwrap();
        assert_eq!(coupon.code, CouponCode::new("WELCOME"));
        assert_eq!(coupon.discount_percent, Some(15.0));
    }

    #[test]
    fn test_decode_error_status() {
        let resp = make_response(404, r#"{"status": "fail", "message": "No document found"}"#);
        let err = decode_doc::<TitleDoc>(resp).unwrap_err();
        assert_eq!(err.server_message(), Some("No document found"));
    }

    #[test]
    fn test_decode_message_empty_body() {
        let env = decode_message(make_response(204, "")).unwrap();
        assert!(env.message.is_none());

        let env = decode_message(make_response(
            200,
            r#"{"status": "success", "message": "Coupon deleted"}"#,
        ))
        .unwrap();
        assert_eq!(env.message.as_deref(), Some("Coupon deleted"));
    }
}
