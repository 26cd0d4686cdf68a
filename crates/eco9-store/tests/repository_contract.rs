// SPDX-License-Identifier: Apache-2.0

use eco9_core::{ActivityId, UserId};
use eco9_model::{ActivityCategory, ActivityQuery, ImpactResult, NewActivity};
use eco9_store::{
    open_repository, ActivityRepository, BackendKind, MemoryRepository, SqliteRepository,
    StoreConfig, StoreErrorCode,
};
use std::sync::Arc;
use std::thread;
use tempfile::{tempdir, TempDir};

fn new_activity(user: &str, category: &str, value: f64) -> NewActivity {
    NewActivity {
        user: UserId::new(user).expect("user"),
        category: ActivityCategory::parse(category),
        subtype: None,
        value,
        unit: "km".to_string(),
        note: None,
        impact: ImpactResult::new(value * 0.4, value * 0.1),
    }
}

fn backends() -> Vec<(Box<dyn ActivityRepository>, Option<TempDir>)> {
    let dir = tempdir().expect("tempdir");
    let sqlite = SqliteRepository::open(&dir.path().join("activities.sqlite")).expect("sqlite");
    let memory: Box<dyn ActivityRepository> = Box::new(MemoryRepository::new());
    let sqlite: Box<dyn ActivityRepository> = Box::new(sqlite);
    vec![(memory, None), (sqlite, Some(dir))]
}

#[test]
fn insert_then_get_returns_the_same_record() {
    for (repo, _guard) in backends() {
        let mut activity = new_activity("ana", "transport", 5.2);
        activity.note = Some("commute".to_string());
        let stored = repo.insert(activity).expect("insert");
        assert_eq!(stored.id.get(), 1, "{:?}", repo.backend());
        let loaded = repo.get(stored.id).expect("get");
        assert_eq!(loaded, stored);
        assert_eq!(loaded.note.as_deref(), Some("commute"));
    }
}

#[test]
fn ids_are_never_reused_after_delete() {
    for (repo, _guard) in backends() {
        let a = repo.insert(new_activity("ana", "waste", 1.0)).expect("a");
        repo.delete(a.id).expect("delete");
        let b = repo.insert(new_activity("ana", "waste", 2.0)).expect("b");
        assert!(b.id > a.id, "{:?}", repo.backend());
    }
}

#[test]
fn update_replaces_fields_and_keeps_id() {
    for (repo, _guard) in backends() {
        let stored = repo.insert(new_activity("ana", "energy", 1.0)).expect("insert");
        let updated = repo
            .update(stored.id, new_activity("ana", "energy", 3.5))
            .expect("update");
        assert_eq!(updated.id, stored.id);
        assert_eq!(updated.value, 3.5);
        assert_eq!(repo.get(stored.id).expect("get"), updated);
    }
}

#[test]
fn missing_ids_are_not_found() {
    for (repo, _guard) in backends() {
        let id = ActivityId::new(42).expect("id");
        assert_eq!(repo.get(id).expect_err("get").code, StoreErrorCode::NotFound);
        assert_eq!(
            repo.update(id, new_activity("ana", "energy", 1.0))
                .expect_err("update")
                .code,
            StoreErrorCode::NotFound
        );
        assert_eq!(repo.delete(id).expect_err("delete").code, StoreErrorCode::NotFound);
    }
}

#[test]
fn deleted_record_is_gone() {
    for (repo, _guard) in backends() {
        let stored = repo.insert(new_activity("ana", "energy", 1.0)).expect("insert");
        repo.delete(stored.id).expect("delete");
        assert_eq!(repo.get(stored.id).expect_err("gone").code, StoreErrorCode::NotFound);
    }
}

#[test]
fn listing_pages_through_every_record_in_id_order() {
    for (repo, _guard) in backends() {
        for i in 0..7 {
            repo.insert(new_activity("ana", "transport", f64::from(i)))
                .expect("insert");
        }
        let mut query = ActivityQuery {
            limit: 3,
            ..ActivityQuery::default()
        };
        let mut seen = Vec::new();
        loop {
            let page = repo.list(&query).expect("list");
            assert!(page.items.len() <= 3);
            seen.extend(page.items.iter().map(|a| a.id.get()));
            match page.next_cursor {
                Some(cursor) => query.cursor = Some(cursor),
                None => break,
            }
        }
        assert_eq!(seen, vec![1, 2, 3, 4, 5, 6, 7], "{:?}", repo.backend());
    }
}

#[test]
fn exact_page_boundary_has_no_trailing_cursor() {
    for (repo, _guard) in backends() {
        for _ in 0..2 {
            repo.insert(new_activity("ana", "waste", 1.0)).expect("insert");
        }
        let page = repo
            .list(&ActivityQuery {
                limit: 2,
                ..ActivityQuery::default()
            })
            .expect("list");
        assert_eq!(page.items.len(), 2);
        assert!(page.next_cursor.is_none());
    }
}

#[test]
fn listing_filters_by_user_and_category() {
    for (repo, _guard) in backends() {
        repo.insert(new_activity("ana", "transport", 1.0)).expect("1");
        repo.insert(new_activity("ben", "transport", 2.0)).expect("2");
        repo.insert(new_activity("ana", "waste", 3.0)).expect("3");
        repo.insert(new_activity("ana", "Gardening", 4.0)).expect("4");

        let ana = UserId::new("ana").expect("user");
        let page = repo.list(&ActivityQuery::for_user(ana.clone())).expect("list");
        assert_eq!(page.items.len(), 3);

        let query = ActivityQuery {
            category: Some(ActivityCategory::Transport),
            ..ActivityQuery::for_user(ana)
        };
        let page = repo.list(&query).expect("list");
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].value, 1.0);

        let query = ActivityQuery {
            category: Some(ActivityCategory::parse("Gardening")),
            ..ActivityQuery::default()
        };
        let page = repo.list(&query).expect("list");
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].category.as_str(), "Gardening");
    }
}

#[test]
fn cursor_from_another_filter_is_rejected() {
    for (repo, _guard) in backends() {
        for _ in 0..3 {
            repo.insert(new_activity("ana", "transport", 1.0)).expect("insert");
        }
        let page = repo
            .list(&ActivityQuery {
                limit: 1,
                ..ActivityQuery::default()
            })
            .expect("list");
        let cursor = page.next_cursor.expect("more pages");
        let query = ActivityQuery {
            cursor: Some(cursor),
            ..ActivityQuery::for_user(UserId::new("ana").expect("user"))
        };
        assert_eq!(
            repo.list(&query).expect_err("rebound cursor").code,
            StoreErrorCode::Validation
        );
    }
}

#[test]
fn sqlite_records_survive_reopen() {
    let dir = tempdir().expect("tempdir");
    let config = StoreConfig {
        backend: BackendKind::Sqlite,
        sqlite_path: Some(dir.path().join("db/activities.sqlite")),
    };
    let id = {
        let repo = open_repository(&config).expect("open");
        let stored = repo.insert(new_activity("ana", "energy", 3.5)).expect("insert");
        repo.close().expect("close");
        stored.id
    };
    let repo = open_repository(&config).expect("reopen");
    assert_eq!(repo.backend(), BackendKind::Sqlite);
    assert_eq!(repo.get(id).expect("get").value, 3.5);
}

#[test]
fn concurrent_inserts_get_distinct_ids() {
    let repo: Arc<MemoryRepository> = Arc::new(MemoryRepository::new());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repo = Arc::clone(&repo);
            thread::spawn(move || {
                (0..25)
                    .map(|_| repo.insert(new_activity("ana", "waste", 1.0)).expect("insert").id)
                    .collect::<Vec<_>>()
            })
        })
        .collect();
    let mut ids: Vec<u64> = handles
        .into_iter()
        .flat_map(|h| h.join().expect("join"))
        .map(ActivityId::get)
        .collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 200);
}
