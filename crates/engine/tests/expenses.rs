use std::{collections::HashSet, sync::Arc};

use chrono::{TimeZone, Utc};
use sea_orm::{Database, DatabaseConnection};

use engine::{Engine, EngineError, ExpenseInput, Payer, SeedExpense};
use migration::MigratorTrait;

async fn database() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    db
}

async fn engine_with_db() -> Engine {
    Engine::builder().database(database().await).build().await.unwrap()
}

fn input(payer: &str, description: &str, amount: f64) -> ExpenseInput {
    ExpenseInput {
        payer: payer.to_string(),
        date: "2024-01-01T00:00:00Z".to_string(),
        description: description.to_string(),
        amount,
    }
}

fn seed(entries: &[(&str, &str, f64)]) -> Vec<SeedExpense> {
    entries
        .iter()
        .map(|(payer, description, amount)| SeedExpense {
            payer: payer.to_string(),
            date: "2024-02-01".to_string(),
            description: description.to_string(),
            amount: *amount,
        })
        .collect()
}

#[tokio::test]
async fn list_on_empty_store_is_empty() {
    let engine = engine_with_db().await;
    assert!(engine.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_returns_the_stored_record() {
    let engine = engine_with_db().await;

    let expense = engine.create(input("Alice", "Coffee", 4.50)).await.unwrap();

    assert_eq!(expense.payer, Payer::Alice);
    assert_eq!(expense.description, "Coffee");
    assert_eq!(expense.amount, 4.50);
    assert_eq!(expense.date.to_rfc3339(), "2024-01-01T00:00:00+00:00");

    let all = engine.list_all().await.unwrap();
    assert_eq!(all, vec![expense]);
}

#[tokio::test]
async fn created_ids_are_unique() {
    let engine = engine_with_db().await;

    let mut ids = HashSet::new();
    for n in 1..=10 {
        let expense = engine
            .create(input("Bob", "lunch", f64::from(n)))
            .await
            .unwrap();
        assert!(ids.insert(expense.id), "id {} issued twice", expense.id);
    }
}

#[tokio::test]
async fn invalid_creates_leave_the_store_unchanged() {
    let engine = engine_with_db().await;
    engine.create(input("Alice", "kept", 10.0)).await.unwrap();

    let rejected = [
        input("Alice", "zero", 0.0),
        input("Alice", "negative", -2.5),
        input("Alice", "nan", f64::NAN),
        input("Carol", "stranger", 3.0),
        input("Bob", &"x".repeat(201), 3.0),
        ExpenseInput {
            date: "not a date".to_string(),
            ..input("Bob", "bad date", 3.0)
        },
    ];
    for bad in rejected {
        let err = engine.create(bad).await.unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)), "{err:?}");
    }

    let all = engine.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].description, "kept");
}

#[tokio::test]
async fn reset_replaces_everything_with_the_seed() {
    let engine = Engine::builder()
        .database(database().await)
        .seed(seed(&[("Alice", "Rent", 800.0), ("Bob", "Pizza", 21.5)]))
        .build()
        .await
        .unwrap();

    for n in 0..5 {
        engine
            .create(input("Bob", &format!("old {n}"), 1.0))
            .await
            .unwrap();
    }

    let reset = engine.reset().await.unwrap();
    let listed = engine.list_all().await.unwrap();
    assert_eq!(reset, listed);

    let seed_date = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
    let fields = listed
        .iter()
        .map(|e| (e.payer, e.date, e.description.as_str(), e.amount))
        .collect::<Vec<_>>();
    assert_eq!(
        fields,
        vec![
            (Payer::Alice, seed_date, "Rent", 800.0),
            (Payer::Bob, seed_date, "Pizza", 21.5),
        ]
    );
}

#[tokio::test]
async fn reset_length_is_independent_of_previous_contents() {
    for existing in [0usize, 1, 7] {
        let engine = engine_with_db().await;
        for _ in 0..existing {
            engine.create(input("Alice", "", 2.0)).await.unwrap();
        }
        let reset = engine.reset().await.unwrap();
        assert_eq!(reset.len(), engine.seed_len());
    }
}

#[tokio::test]
async fn reset_mints_fresh_ids() {
    let engine = engine_with_db().await;

    let mut before = HashSet::new();
    for _ in 0..3 {
        before.insert(engine.create(input("Alice", "", 2.0)).await.unwrap().id);
    }
    let first = engine.reset().await.unwrap();
    let second = engine.reset().await.unwrap();

    let first_ids = first.iter().map(|e| e.id).collect::<HashSet<_>>();
    let second_ids = second.iter().map(|e| e.id).collect::<HashSet<_>>();
    assert!(first_ids.is_disjoint(&before));
    assert!(second_ids.is_disjoint(&before));
    assert!(second_ids.is_disjoint(&first_ids));

    // The embedded seed file carries ids 1..=8; none of them survive.
    assert!(second_ids.iter().all(|id| *id > 8));
}

#[tokio::test]
async fn invalid_seed_is_rejected_at_build() {
    let err = Engine::builder()
        .database(database().await)
        .seed(seed(&[("Alice", "ok", 1.0), ("Mallory", "nope", 1.0)]))
        .build()
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Seed(_)));
}

#[tokio::test]
async fn empty_seed_resets_to_empty_store() {
    let engine = Engine::builder()
        .database(database().await)
        .seed(Vec::new())
        .build()
        .await
        .unwrap();
    engine.create(input("Bob", "gone", 9.0)).await.unwrap();

    assert!(engine.reset().await.unwrap().is_empty());
    assert!(engine.list_all().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn creates_racing_a_reset_are_never_lost_after_it() {
    for _ in 0..20 {
        let engine = Arc::new(engine_with_db().await);

        let mut tasks = tokio::task::JoinSet::new();
        for n in 0..8 {
            let engine = engine.clone();
            tasks.spawn(async move {
                engine
                    .create(input("Alice", &format!("race {n}"), 1.0))
                    .await
                    .map(|e| e.id)
            });
        }
        let reset = {
            let engine = engine.clone();
            tokio::spawn(async move { engine.reset().await })
        };

        // Every create succeeds, whichever side of the reset it lands on.
        let mut created = Vec::new();
        while let Some(res) = tasks.join_next().await {
            created.push(res.unwrap().unwrap());
        }
        let seeded = reset.await.unwrap().unwrap();
        let first_seed_id = seeded.iter().map(|e| e.id).min().unwrap();

        let listed = engine
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect::<HashSet<_>>();
        for id in created {
            // Creates committed after the reset must still be there; earlier
            // ones were wiped together with everything else.
            assert_eq!(listed.contains(&id), id > first_seed_id, "id {id}");
        }
        assert!(seeded.iter().all(|e| listed.contains(&e.id)));
    }
}
