use bson::oid::ObjectId;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_PENDING: &str = "pending";
pub const STATUS_FAILED: &str = "failed";

/// Document in the `transactions` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub product_id: ObjectId,
    pub payment_id: ObjectId,
    pub quantity: i64,
    /// Always `quantity * unit price` as reported by product-service
    pub total: f64,
    pub status: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

/// Ids are checked as ObjectIds by the service, ahead of these rules
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateTransactionBody {
    pub product_id: String,
    pub payment_id: String,
    #[validate(range(min = 1, message = "quantity must be greater than 0"))]
    pub quantity: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateTransactionBody {
    #[validate(length(min = 1, message = "invalid status"))]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionView {
    pub id: String,
    pub product_id: String,
    pub payment_id: String,
    pub quantity: i64,
    pub total: f64,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Transaction> for TransactionView {
    fn from(t: Transaction) -> Self {
        Self {
            id: t.id.to_hex(),
            product_id: t.product_id.to_hex(),
            payment_id: t.payment_id.to_hex(),
            quantity: t.quantity,
            total: t.total,
            status: t.status,
            created_at: t.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            updated_at: t.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}
