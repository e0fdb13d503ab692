//! Behaviour every storage backend must share.
//!
//! Each test runs against the memory and the file backend.

use std::sync::Arc;

use shortlink::domain::entities::NewMapping;
use shortlink::domain::repositories::{MappingRepository, StoreError};
use shortlink::infrastructure::persistence::{FileMappingRepository, MemoryMappingRepository};
use shortlink::state::DynRepository;
use tempfile::TempDir;

struct Backend {
    name: &'static str,
    repo: Arc<DynRepository>,
    _dir: Option<TempDir>,
}

fn backends() -> Vec<Backend> {
    let dir = tempfile::tempdir().unwrap();
    let file = FileMappingRepository::new(dir.path().join("urls.json"));

    vec![
        Backend {
            name: "memory",
            repo: Arc::new(MemoryMappingRepository::new()),
            _dir: None,
        },
        Backend {
            name: "file",
            repo: Arc::new(file),
            _dir: Some(dir),
        },
    ]
}

fn shorts(codes: &[&str]) -> Vec<String> {
    codes.iter().map(|code| code.to_string()).collect()
}

#[tokio::test]
async fn test_put_then_get() {
    for backend in backends() {
        let repo = &backend.repo;

        repo.put("abc", "http://x.example/", 7).await.unwrap();

        let stored = repo.get("abc").await.unwrap().unwrap();
        assert_eq!(stored.long_url, "http://x.example/", "{}", backend.name);
        assert!(!stored.is_deleted(), "{}", backend.name);
        assert_eq!(repo.list_by_owner(7).await.unwrap(), shorts(&["abc"]));
    }
}

#[tokio::test]
async fn test_get_unknown_is_none() {
    for backend in backends() {
        assert!(
            backend.repo.get("missing").await.unwrap().is_none(),
            "{}",
            backend.name
        );
    }
}

#[tokio::test]
async fn test_duplicate_short_changes_nothing() {
    for backend in backends() {
        let repo = &backend.repo;
        repo.put("abc", "http://x.example/", 7).await.unwrap();

        let result = repo.put("abc", "http://y.example/", 8).await;

        assert!(matches!(result, Err(StoreError::Duplicate)), "{}", backend.name);
        let stored = repo.get("abc").await.unwrap().unwrap();
        assert_eq!(stored.long_url, "http://x.example/", "{}", backend.name);
        assert!(repo.list_by_owner(8).await.unwrap().is_empty(), "{}", backend.name);
    }
}

#[tokio::test]
async fn test_duplicate_long_under_new_short() {
    for backend in backends() {
        let repo = &backend.repo;
        repo.put("abc", "http://x.example/", 7).await.unwrap();

        let result = repo.put("xyz", "http://x.example/", 7).await;

        assert!(result.unwrap_err().is_duplicate(), "{}", backend.name);
        assert!(repo.get("xyz").await.unwrap().is_none(), "{}", backend.name);
    }
}

#[tokio::test]
async fn test_list_by_owner_keeps_insertion_order() {
    for backend in backends() {
        let repo = &backend.repo;
        repo.put("zz", "http://z.example/", 1).await.unwrap();
        repo.put("aa", "http://a.example/", 1).await.unwrap();
        repo.put("mm", "http://m.example/", 2).await.unwrap();
        repo.put("bb", "http://b.example/", 1).await.unwrap();

        assert_eq!(
            repo.list_by_owner(1).await.unwrap(),
            shorts(&["zz", "aa", "bb"]),
            "{}",
            backend.name
        );
        assert_eq!(repo.list_by_owner(2).await.unwrap(), shorts(&["mm"]));
        assert!(repo.list_by_owner(3).await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_put_batch_stores_all() {
    for backend in backends() {
        let repo = &backend.repo;
        let items = vec![
            NewMapping::new("s1", "http://one.example/"),
            NewMapping::new("s2", "http://two.example/"),
        ];

        repo.put_batch(&items, 5).await.unwrap();

        assert_eq!(repo.list_by_owner(5).await.unwrap(), shorts(&["s1", "s2"]));
        assert_eq!(
            repo.get("s2").await.unwrap().unwrap().long_url,
            "http://two.example/",
            "{}",
            backend.name
        );
    }
}

#[tokio::test]
async fn test_put_batch_reports_duplicate_after_storing_the_rest() {
    for backend in backends() {
        let repo = &backend.repo;
        repo.put("s1", "http://one.example/", 9).await.unwrap();

        let items = vec![
            NewMapping::new("s1", "http://one.example/"),
            NewMapping::new("s2", "http://two.example/"),
        ];
        let result = repo.put_batch(&items, 5).await;

        assert!(matches!(result, Err(StoreError::Duplicate)), "{}", backend.name);
        assert!(repo.get("s2").await.unwrap().is_some(), "{}", backend.name);
        assert_eq!(repo.list_by_owner(5).await.unwrap(), shorts(&["s2"]));
        assert_eq!(repo.list_by_owner(9).await.unwrap(), shorts(&["s1"]));
    }
}

#[tokio::test]
async fn test_put_batch_empty_is_ok() {
    for backend in backends() {
        backend.repo.put_batch(&[], 5).await.unwrap();
        assert!(backend.repo.list_by_owner(5).await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_mark_deleted_only_touches_own_urls() {
    for backend in backends() {
        let repo = &backend.repo;
        repo.put("mine", "http://mine.example/", 1).await.unwrap();
        repo.put("theirs", "http://theirs.example/", 2).await.unwrap();

        repo.mark_deleted(1, &shorts(&["mine", "theirs", "unknown"]))
            .await
            .unwrap();

        assert!(repo.get("mine").await.unwrap().unwrap().is_deleted(), "{}", backend.name);
        assert!(!repo.get("theirs").await.unwrap().unwrap().is_deleted(), "{}", backend.name);
        assert_eq!(
            repo.list_by_owner(1).await.unwrap(),
            shorts(&["mine"]),
            "deleted URLs stay listed ({})",
            backend.name
        );
    }
}

#[tokio::test]
async fn test_mark_deleted_is_idempotent() {
    for backend in backends() {
        let repo = &backend.repo;
        repo.put("abc", "http://x.example/", 1).await.unwrap();

        repo.mark_deleted(1, &shorts(&["abc"])).await.unwrap();
        repo.mark_deleted(1, &shorts(&["abc"])).await.unwrap();

        assert!(repo.get("abc").await.unwrap().unwrap().is_deleted());
    }
}

#[tokio::test]
async fn test_deleted_long_frees_its_url_but_not_its_short() {
    for backend in backends() {
        let repo = &backend.repo;
        repo.put("abc", "http://x.example/", 1).await.unwrap();
        repo.mark_deleted(1, &shorts(&["abc"])).await.unwrap();

        repo.put("xyz", "http://x.example/", 1).await.unwrap();
        assert!(
            repo.put("abc", "http://other.example/", 1)
                .await
                .unwrap_err()
                .is_duplicate(),
            "{}",
            backend.name
        );
    }
}

#[tokio::test]
async fn test_ping() {
    for backend in backends() {
        backend.repo.ping().await.unwrap();
    }
}

#[tokio::test]
async fn test_concurrent_puts_of_one_url_store_it_once() {
    for backend in backends() {
        let mut handles = Vec::new();
        for owner in 0..16u32 {
            let repo = backend.repo.clone();
            handles.push(tokio::spawn(async move {
                repo.put(&format!("code{owner}"), "http://race.example/", owner)
                    .await
            }));
        }

        let mut stored = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => stored += 1,
                Err(e) => assert!(e.is_duplicate(), "{}: {}", backend.name, e),
            }
        }

        assert_eq!(stored, 1, "{}", backend.name);
    }
}

#[tokio::test]
async fn test_file_backend_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("urls.json");

    let first = FileMappingRepository::new(&path);
    first.put("abc", "http://x.example/", 3).await.unwrap();
    first.mark_deleted(3, &shorts(&["abc"])).await.unwrap();
    first.put("def", "http://y.example/", 3).await.unwrap();

    let reopened = FileMappingRepository::new(&path);
    assert!(reopened.get("abc").await.unwrap().unwrap().is_deleted());
    assert_eq!(reopened.list_by_owner(3).await.unwrap(), shorts(&["abc", "def"]));
    assert!(
        reopened
            .put("zzz", "http://y.example/", 4)
            .await
            .unwrap_err()
            .is_duplicate()
    );
}
