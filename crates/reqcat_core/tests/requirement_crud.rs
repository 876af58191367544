use reqcat_core::db::migrations::latest_version;
use reqcat_core::db::open_db_in_memory;
use reqcat_core::{
    RepoError, RequirementDraft, RequirementListQuery, RequirementPatch, RequirementRepository,
    SqliteRequirementRepository,
};
use rusqlite::Connection;

fn draft(attribute: &str, analyst: &str) -> RequirementDraft {
    RequirementDraft {
        attribute: attribute.to_string(),
        description: format!("{attribute} description"),
        domain: "Sales".to_string(),
        source_system: "CRM".to_string(),
        source_entity: "customers".to_string(),
        responsible_analyst: analyst.to_string(),
    }
}

#[test]
fn insert_assigns_increasing_ids_and_timestamps() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRequirementRepository::try_new(&conn).unwrap();

    let first = repo.insert(&draft("Customer ID", "J. Doe")).unwrap();
    let second = repo.insert(&draft("Order Total", "J. Doe")).unwrap();

    assert_eq!(first.id, 1);
    assert!(second.id > first.id);
    assert!(second.created_at >= first.created_at);
    assert!(first.created_at > 0);
}

#[test]
fn insert_returns_submitted_field_values() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRequirementRepository::try_new(&conn).unwrap();

    let submitted = draft("Customer ID", "J. Doe");
    let stored = repo.insert(&submitted).unwrap();

    assert_eq!(stored.attribute, submitted.attribute);
    assert_eq!(stored.description, submitted.description);
    assert_eq!(stored.domain, submitted.domain);
    assert_eq!(stored.source_system, submitted.source_system);
    assert_eq!(stored.source_entity, submitted.source_entity);
    assert_eq!(stored.responsible_analyst, submitted.responsible_analyst);
}

#[test]
fn insert_rejects_missing_required_field() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRequirementRepository::try_new(&conn).unwrap();

    let mut incomplete = draft("Customer ID", "J. Doe");
    incomplete.source_entity = "  ".to_string();

    let err = repo.insert(&incomplete).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let all = repo.list(&RequirementListQuery::default()).unwrap();
    assert!(all.is_empty());
}

#[test]
fn get_missing_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRequirementRepository::try_new(&conn).unwrap();

    let err = repo.get(42).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(42)));
}

#[test]
fn list_returns_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRequirementRepository::try_new(&conn).unwrap();

    let first = repo.insert(&draft("First", "J. Doe")).unwrap();
    let second = repo.insert(&draft("Second", "J. Doe")).unwrap();
    let third = repo.insert(&draft("Third", "J. Doe")).unwrap();

    // Force distinct timestamps so ordering is exercised beyond id ties.
    conn.execute(
        "UPDATE requirements SET created_at = 1000 WHERE id = ?1;",
        [first.id],
    )
    .unwrap();
    conn.execute(
        "UPDATE requirements SET created_at = 2000 WHERE id = ?1;",
        [second.id],
    )
    .unwrap();
    conn.execute(
        "UPDATE requirements SET created_at = 3000 WHERE id = ?1;",
        [third.id],
    )
    .unwrap();

    let listed = repo.list(&RequirementListQuery::default()).unwrap();
    let ids: Vec<_> = listed.iter().map(|req| req.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

#[test]
fn list_filters_by_analyst_substring_case_insensitively() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRequirementRepository::try_new(&conn).unwrap();

    repo.insert(&draft("A", "J. Doe")).unwrap();
    repo.insert(&draft("B", "A. Smith")).unwrap();
    repo.insert(&draft("C", "John Doerr")).unwrap();

    let query = RequirementListQuery {
        analyst_contains: Some("DOE".to_string()),
        ..RequirementListQuery::default()
    };
    let matched = repo.list(&query).unwrap();
    assert_eq!(matched.len(), 2);
    assert!(matched
        .iter()
        .all(|req| req.responsible_analyst.to_lowercase().contains("doe")));

    let none = RequirementListQuery {
        analyst_contains: Some("nobody".to_string()),
        ..RequirementListQuery::default()
    };
    assert!(repo.list(&none).unwrap().is_empty());
}

#[test]
fn list_latest_only_returns_single_newest_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRequirementRepository::try_new(&conn).unwrap();

    repo.insert(&draft("First", "J. Doe")).unwrap();
    let newest = repo.insert(&draft("Second", "J. Doe")).unwrap();

    let query = RequirementListQuery {
        latest_only: true,
        ..RequirementListQuery::default()
    };
    let listed = repo.list(&query).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, newest.id);
}

#[test]
fn list_latest_only_on_empty_store_returns_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRequirementRepository::try_new(&conn).unwrap();

    let query = RequirementListQuery {
        latest_only: true,
        ..RequirementListQuery::default()
    };
    assert!(repo.list(&query).unwrap().is_empty());
}

#[test]
fn update_applies_only_provided_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRequirementRepository::try_new(&conn).unwrap();

    let original = repo.insert(&draft("Customer ID", "J. Doe")).unwrap();

    let patch = RequirementPatch {
        description: Some("refined description".to_string()),
        responsible_analyst: Some("A. Smith".to_string()),
        ..RequirementPatch::default()
    };
    let updated = repo.update(original.id, &patch).unwrap();

    assert_eq!(updated.description, "refined description");
    assert_eq!(updated.responsible_analyst, "A. Smith");
    assert_eq!(updated.attribute, original.attribute);
    assert_eq!(updated.domain, original.domain);
    assert_eq!(updated.source_system, original.source_system);
    assert_eq!(updated.source_entity, original.source_entity);
    assert_eq!(updated.created_at, original.created_at);
    assert_eq!(updated.id, original.id);
}

#[test]
fn update_with_empty_patch_returns_current_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRequirementRepository::try_new(&conn).unwrap();

    let original = repo.insert(&draft("Customer ID", "J. Doe")).unwrap();
    let unchanged = repo
        .update(original.id, &RequirementPatch::default())
        .unwrap();
    assert_eq!(unchanged, original);
}

#[test]
fn update_rejects_blank_provided_value() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRequirementRepository::try_new(&conn).unwrap();

    let original = repo.insert(&draft("Customer ID", "J. Doe")).unwrap();
    let patch = RequirementPatch {
        domain: Some("   ".to_string()),
        ..RequirementPatch::default()
    };

    let err = repo.update(original.id, &patch).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let untouched = repo.get(original.id).unwrap();
    assert_eq!(untouched.domain, original.domain);
}

#[test]
fn update_missing_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRequirementRepository::try_new(&conn).unwrap();

    let patch = RequirementPatch {
        attribute: Some("ghost".to_string()),
        ..RequirementPatch::default()
    };
    let err = repo.update(7, &patch).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(7)));
}

#[test]
fn delete_then_get_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRequirementRepository::try_new(&conn).unwrap();

    let stored = repo.insert(&draft("Customer ID", "J. Doe")).unwrap();
    repo.delete(stored.id).unwrap();

    let err = repo.get(stored.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == stored.id));

    let err = repo.delete(stored.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == stored.id));
}

#[test]
fn ids_are_not_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRequirementRepository::try_new(&conn).unwrap();

    let first = repo.insert(&draft("First", "J. Doe")).unwrap();
    repo.delete(first.id).unwrap();
    let second = repo.insert(&draft("Second", "J. Doe")).unwrap();

    assert!(second.id > first.id);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteRequirementRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_requirements_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteRequirementRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("requirements"))
    ));
}
