//! Runs against a live MongoDB. Set MONGODB_URI (and optionally
//! MONGODB_DATABASE) and run with `cargo test -- --ignored`.

use secretshare::config::database::{self, DatabaseConfig};
use secretshare::modules::deletion::{crud::DeletionCrud, model::Deletion};
use secretshare::modules::user::{
    crud::UserCrud,
    model::{Share, User},
};
use secretshare::services::{processor::DeletionProcessor, store::MongoStore};

async fn setup_db() -> mongodb::Database {
    dotenvy::dotenv().ok();

    let config = DatabaseConfig::from_env().unwrap();
    database::connect(&config).await.unwrap()
}

fn unique_secret(tag: &str) -> String {
    format!("test-{}-{}", tag, bson::oid::ObjectId::new().to_hex())
}

#[tokio::test]
#[ignore]
async fn test_process_deletions_against_mongo() {
    let db = setup_db().await;
    let users = UserCrud::new(&db);
    let deletions = DeletionCrud::new(&db);

    let revoked = unique_secret("revoked");
    let kept = unique_secret("kept");

    let user_id = users
        .create(User::new(
            format!("{}@example.com", revoked),
            vec![Share::new(&revoked, "w1-w2"), Share::new(&kept, "w3-w4"), Share::new(&revoked, "w5-w6")],
        ))
        .await
        .unwrap()
        .unwrap();
    deletions.create(Deletion::new(&revoked)).await.unwrap();

    let processor = DeletionProcessor::new(MongoStore::new(&db));
    processor.run().await.unwrap();

    let user = users.find_by_id(&user_id).await.unwrap().unwrap();
    assert!(!user.holds_secret(&revoked));
    assert!(user.holds_secret(&kept));
    assert!(users.find_with_secret(&revoked).await.unwrap().is_empty());
    assert!(deletions
        .find_all()
        .await
        .unwrap()
        .iter()
        .all(|d| d.secret_id != revoked));

    // Nothing left to pull, and a second run leaves the user as it was.
    assert!(!users.pull_shares(&user_id, &revoked).await.unwrap());
    processor.run().await.unwrap();
    assert_eq!(users.find_by_id(&user_id).await.unwrap().unwrap(), user);

    db.collection::<bson::Document>("users")
        .delete_one(bson::doc! { "_id": user_id })
        .await
        .unwrap();
}
