use bson::oid::ObjectId;
use chrono::{DateTime, SecondsFormat, Utc};
use grpc_clients::proto::payment as pb;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Status assigned to every payment on creation
pub const STATUS_SUCCESS: &str = "success";

/// Stored shape of a document in the `payments` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub email: String,
    pub amount: f64,
    pub status: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(email: String, amount: f64) -> Self {
        Self {
            id: ObjectId::new(),
            email,
            amount,
            status: STATUS_SUCCESS.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Fields a caller supplies on create, over either transport
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreatePaymentBody {
    #[validate(
        length(min = 1, message = "email is required"),
        email(message = "email is invalid")
    )]
    pub email: String,
    #[validate(range(exclusive_min = 0.0, message = "amount must be greater than 0"))]
    pub amount: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdatePaymentBody {
    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,
}

/// Wire shape: hex id and RFC3339 timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentView {
    pub id: String,
    pub email: String,
    pub amount: f64,
    pub status: String,
    pub created_at: String,
}

impl From<Payment> for PaymentView {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id.to_hex(),
            email: p.email,
            amount: p.amount,
            status: p.status,
            created_at: p.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

impl From<Payment> for pb::Payment {
    fn from(p: Payment) -> Self {
        let view = PaymentView::from(p);
        Self {
            id: view.id,
            email: view.email,
            amount: view.amount,
            status: view.status,
            created_at: view.created_at,
        }
    }
}
