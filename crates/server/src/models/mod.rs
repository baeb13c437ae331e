//! Request and session models.

pub mod request;
pub mod session;

pub use request::{
    DecisionPayload, GatewayFilterPayload, GatewayFilterResponse, OrderMetadataPayload,
    OrderReviewForm,
};
pub use session::keys as session_keys;
