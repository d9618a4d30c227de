mod common;

use common::{User, memory_provider, users_dao};
use messenger_store::prelude::*;

#[test]
fn create_read_update_delete_scenario() -> Result<(), StoreError> {
    let provider = memory_provider();
    let users = users_dao(&provider);

    let rowid = users.create(&User::new("u1", "Alice"))?;
    assert!(rowid >= 0);

    let alice = users.read("u1")?.expect("u1 after create");
    assert_eq!(alice.id, "u1");
    assert_eq!(alice.name, "Alice");

    let mut alicia = alice;
    alicia.name = "Alicia".into();
    assert_eq!(users.update(&alicia)?, 1);
    assert_eq!(users.read("u1")?.expect("u1 after update").name, "Alicia");

    users.delete_by_id("u1")?;
    assert!(users.read("u1")?.is_none());
    assert!(users.read_all()?.is_empty());
    Ok(())
}

#[test]
fn round_trip_preserves_every_mapped_field() -> Result<(), StoreError> {
    let provider = memory_provider();
    let users = users_dao(&provider);

    let id = EntityId::new("vk", "user01");
    let user = User {
        id: id.as_string(),
        name: "Alice".into(),
        online: true,
        version: 7,
    };
    users.create(&user)?;
    assert_eq!(users.read(&id.as_string())?.expect("stored user"), user);
    Ok(())
}

#[test]
fn empty_table_reads_are_not_errors() -> Result<(), StoreError> {
    let provider = memory_provider();
    let users = users_dao(&provider);

    assert!(users.read_all()?.is_empty());
    assert!(users.read("missing")?.is_none());
    Ok(())
}

#[test]
fn read_all_returns_store_order() -> Result<(), StoreError> {
    let provider = memory_provider();
    let users = users_dao(&provider);

    for (id, name) in [("u3", "Carol"), ("u1", "Alice"), ("u2", "Bob")] {
        users.create(&User::new(id, name))?;
    }
    let names: Vec<String> = users.read_all()?.into_iter().map(|u| u.name).collect();
    assert_eq!(names, vec!["Carol", "Alice", "Bob"]);
    Ok(())
}

#[test]
fn update_missing_id_is_a_noop() -> Result<(), StoreError> {
    let provider = memory_provider();
    let users = users_dao(&provider);

    assert_eq!(users.update(&User::new("ghost", "Nobody"))?, 0);
    assert!(users.read_all()?.is_empty());
    Ok(())
}

#[test]
fn update_is_idempotent_on_unchanged_data() -> Result<(), StoreError> {
    let provider = memory_provider();
    let users = users_dao(&provider);

    let mut user = User::new("u1", "Alice");
    users.create(&user)?;
    user.name = "Alicia".into();

    assert_eq!(users.update(&user)?, 1);
    let first = users.read("u1")?.expect("after first update");
    assert_eq!(users.update(&user)?, 1);
    let second = users.read("u1")?.expect("after second update");
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn delete_removes_exactly_one_entity() -> Result<(), StoreError> {
    let provider = memory_provider();
    let users = users_dao(&provider);

    let alice = User::new("u1", "Alice");
    users.create(&alice)?;
    users.create(&User::new("u2", "Bob"))?;

    users.delete(&alice)?;
    assert!(users.read("u1")?.is_none());
    let remaining = users.read_all()?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, "u2");

    // Deleting an already-missing id is a no-op, not an error.
    users.delete_by_id("u1")?;
    Ok(())
}

#[test]
fn delete_all_clears_the_table() -> Result<(), StoreError> {
    let provider = memory_provider();
    let users = users_dao(&provider);

    for i in 0..5 {
        users.create(&User::new(format!("u{i}"), format!("user {i}")))?;
    }
    users.delete_all()?;
    assert!(users.read_all()?.is_empty());
    Ok(())
}

#[test]
fn file_backed_store_persists_across_providers() -> Result<(), StoreError> {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("messenger.db");

    {
        let provider =
            std::sync::Arc::new(ConnectionProvider::new(StoreConfig::file(&db_path)));
        provider.execute_batch_sql(common::USERS_DDL)?;
        users_dao(&provider).create(&User::new("u1", "Alice"))?;
        provider.close()?;
    }

    let provider = std::sync::Arc::new(ConnectionProvider::new(StoreConfig::file(&db_path)));
    let loaded = users_dao(&provider).read("u1")?.expect("persisted user");
    assert_eq!(loaded.name, "Alice");
    Ok(())
}
