/// Live MongoDB checks for the bulk expiry filter
///
/// Run with: MONGO_URI=mongodb://localhost:27017 cargo test -- --ignored
use bson::oid::ObjectId;
use chrono::{Duration, Utc};
use db_pool::{connect_mongo, MongoConfig};
use transaction_service::db::{MongoTransactionRepository, TransactionRepository};
use transaction_service::jobs::sweep_once;
use transaction_service::Transaction;

fn pending(created_at: chrono::DateTime<Utc>) -> Transaction {
    Transaction {
        id: ObjectId::new(),
        product_id: ObjectId::new(),
        payment_id: ObjectId::new(),
        quantity: 1,
        total: 1.0,
        status: "pending".to_string(),
        created_at,
        updated_at: created_at,
    }
}

#[tokio::test]
#[ignore]
async fn test_mongo_sweep_expires_backdated_pending() {
    let uri = std::env::var("MONGO_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let db_name = format!("transactions_test_{}", ObjectId::new().to_hex());
    let db = connect_mongo(&MongoConfig::new(uri, db_name), "transaction-service-test")
        .await
        .expect("MongoDB must be reachable");
    let repo = MongoTransactionRepository::new(&db);

    let now = Utc::now();
    let old = pending(now - Duration::hours(1));
    let new = pending(now - Duration::minutes(1));
    repo.insert(&old).await.unwrap();
    repo.insert(&new).await.unwrap();

    let outcome = sweep_once(&repo, now, std::time::Duration::from_secs(5)).await.unwrap();
    assert_eq!(outcome.modified, 1);

    assert_eq!(repo.find_by_id(old.id).await.unwrap().unwrap().status, "failed");
    assert_eq!(repo.find_by_id(new.id).await.unwrap().unwrap().status, "pending");

    db.drop().await.unwrap();
}
