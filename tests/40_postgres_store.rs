//! Runs against a live PostgreSQL when DATABASE_URL is set; otherwise each test
//! returns early.

mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use sqlx::PgPool;

use common::TestServer;
use gym_planner::database::store::{PLAN_DETAIL_EXISTS, PLAN_NOT_FOUND};
use gym_planner::database::{DatabaseError, DatabaseManager, PgStore, PlanStore, UserStore};
use gym_planner::AppConfig;

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}

async fn connect() -> Result<Option<PgPool>> {
    let Some(url) = std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()) else {
        eprintln!("DATABASE_URL not set; skipping PostgreSQL store test");
        return Ok(None);
    };

    let config = AppConfig::from_lookup(|key| match key {
        "DATABASE_URL" => Some(url.clone()),
        "JWT_SECRET" => Some("integration-secret".to_string()),
        "DATABASE_MAX_CONNECTIONS" => Some("5".to_string()),
        _ => None,
    })?;
    let pool = DatabaseManager::connect(&config.database).await?;
    DatabaseManager::migrate(&pool).await?;
    Ok(Some(pool))
}

async fn detail_rows(pool: &PgPool, plan_id: i64) -> Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM plan_details WHERE plan_id = $1")
        .bind(plan_id)
        .fetch_one(pool)
        .await?)
}

#[tokio::test]
async fn detail_lifecycle_keeps_insertion_order() -> Result<()> {
    let Some(pool) = connect().await? else { return Ok(()) };
    let store = PgStore::new(pool);

    let user = store.create_user(&unique("pg-kim"), "hash").await?;
    let plan = store.create_plan(user).await?;

    for (name, reps) in [("squat", 10), ("lunge", 8), ("bench", 5)] {
        store.add_detail(user, plan, name, reps).await?;
    }

    let details = store.list_details(user, plan).await?;
    let moves: Vec<_> = details.iter().map(|d| d.move_name.as_str()).collect();
    assert_eq!(moves, vec!["squat", "lunge", "bench"]);
    assert!(details.iter().all(|d| d.plan_id == plan));

    assert_eq!(store.update_detail(user, plan, "lunge", 12).await?, 1);
    assert_eq!(store.update_detail(user, plan, "plank", 1).await?, 0);
    assert_eq!(store.delete_detail(user, plan, "squat").await?, 1);
    assert_eq!(store.delete_detail(user, plan, "squat").await?, 0);

    let details = store.list_details(user, plan).await?;
    assert_eq!(details.len(), 2);
    assert_eq!(details[0].move_name, "lunge");
    assert_eq!(details[0].num_of_reps, 12);
    Ok(())
}

#[tokio::test]
async fn unique_violations_become_conflicts() -> Result<()> {
    let Some(pool) = connect().await? else { return Ok(()) };
    let store = PgStore::new(pool);

    let username = unique("pg-leo");
    let user = store.create_user(&username, "hash").await?;
    let err = store.create_user(&username, "other").await.unwrap_err();
    assert!(matches!(err, DatabaseError::Conflict(_)));

    let found = store.find_user_by_username(&username).await?.expect("user row");
    assert_eq!(found.id, user);
    assert_eq!(found.password_hash, "hash");

    let plan = store.create_plan(user).await?;
    store.add_detail(user, plan, "squat", 10).await?;
    let err = store.add_detail(user, plan, "squat", 3).await.unwrap_err();
    assert!(matches!(err, DatabaseError::Conflict(ref m) if m == PLAN_DETAIL_EXISTS));
    Ok(())
}

#[tokio::test]
async fn foreign_plan_is_not_found() -> Result<()> {
    let Some(pool) = connect().await? else { return Ok(()) };
    let store = PgStore::new(pool);

    let owner = store.create_user(&unique("pg-mia"), "hash").await?;
    let intruder = store.create_user(&unique("pg-ned"), "hash").await?;
    let plan = store.create_plan(owner).await?;
    store.add_detail(owner, plan, "row", 6).await?;

    assert!(store.find_plan(intruder, plan).await?.is_none());
    assert!(store.list_plans(intruder).await?.is_empty());
    assert_eq!(store.delete_plan(intruder, plan).await?, 0);

    let errors = [
        store.add_detail(intruder, plan, "curl", 1).await.unwrap_err(),
        store.list_details(intruder, plan).await.unwrap_err(),
        store.update_detail(intruder, plan, "row", 1).await.unwrap_err(),
        store.delete_detail(intruder, plan, "row").await.unwrap_err(),
    ];
    for err in errors {
        assert!(matches!(err, DatabaseError::NotFound(ref m) if m == PLAN_NOT_FOUND));
    }

    assert_eq!(store.list_details(owner, plan).await?[0].num_of_reps, 6);
    Ok(())
}

#[tokio::test]
async fn deleting_plan_cascades_to_details() -> Result<()> {
    let Some(pool) = connect().await? else { return Ok(()) };
    let store = PgStore::new(pool.clone());

    let user = store.create_user(&unique("pg-oli"), "hash").await?;
    let plan = store.create_plan(user).await?;
    store.add_detail(user, plan, "squat", 10).await?;
    store.add_detail(user, plan, "press", 5).await?;
    assert_eq!(detail_rows(&pool, plan).await?, 2);

    assert_eq!(store.delete_plan(user, plan).await?, 1);
    assert_eq!(detail_rows(&pool, plan).await?, 0);
    assert!(store.find_plan(user, plan).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn concurrent_add_and_plan_delete_leave_no_orphans() -> Result<()> {
    let Some(pool) = connect().await? else { return Ok(()) };
    let store = PgStore::new(pool.clone());

    let user = store.create_user(&unique("pg-pat"), "hash").await?;
    for round in 0..10 {
        let plan = store.create_plan(user).await?;
        let move_name = format!("move-{}", round);

        let (added, deleted) = tokio::join!(
            store.add_detail(user, plan, &move_name, 1),
            store.delete_plan(user, plan),
        );

        // Either order is fine; a foreign-key failure is not
        match added {
            Ok(()) => {}
            Err(DatabaseError::NotFound(ref m)) if m == PLAN_NOT_FOUND => {}
            Err(e) => panic!("add_detail raced into {:?}", e),
        }
        assert_eq!(deleted?, 1);
        assert_eq!(detail_rows(&pool, plan).await?, 0);
    }
    Ok(())
}

#[tokio::test]
async fn api_over_postgres_store() -> Result<()> {
    let Some(pool) = connect().await? else { return Ok(()) };
    let server = TestServer::spawn_with_store(PgStore::new(pool)).await?;

    let res = server.client.get(server.url("/health")).send().await?;
    assert_eq!(res.json::<Value>().await?["database"], "ok");

    let (_, token) = server.signup(&unique("pg-quinn")).await?;
    let plan_id = server.create_plan(&token).await?;
    let add_url = server.url(&format!("/api/plan-details/add?plan_id={}", plan_id));

    let res = server
        .client
        .post(&add_url)
        .bearer_auth(&token)
        .json(&json!({ "move": "squat", "num_of_reps": 10 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = server
        .client
        .post(&add_url)
        .bearer_auth(&token)
        .json(&json!({ "move": "squat", "num_of_reps": 4 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(res.json::<Value>().await?, json!({ "error": "Plan detail already exists" }));

    let res = server
        .client
        .get(server.url(&format!("/api/plan-details/get?plan_id={}", plan_id)))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(
        res.json::<Value>().await?,
        json!([{ "plan_id": plan_id, "move": "squat", "num_of_reps": 10 }])
    );
    Ok(())
}
