use reqcat_core::db::open_db_in_memory;
use reqcat_core::{
    ExcelMirror, MirrorStatus, RequirementDraft, RequirementListQuery, RequirementRepository,
    RequirementService, ServiceError, SqliteRequirementRepository, SubmissionService,
};

fn valid_draft() -> RequirementDraft {
    RequirementDraft {
        attribute: "Customer ID".to_string(),
        description: "Unique customer identifier".to_string(),
        domain: "Sales".to_string(),
        source_system: "CRM".to_string(),
        source_entity: "customers".to_string(),
        responsible_analyst: "J. Doe".to_string(),
    }
}

#[test]
fn submission_persists_record_and_mirrors_row() {
    let dir = tempfile::tempdir().unwrap();
    let mirror_path = dir.path().join("requirements_data.xlsx");

    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRequirementRepository::try_new(&conn).unwrap();
    let service = SubmissionService::new(repo, ExcelMirror::new(&mirror_path));

    let receipt = service.submit(&valid_draft()).unwrap();

    assert_eq!(receipt.requirement.id, 1);
    assert_eq!(receipt.requirement.attribute, "Customer ID");
    assert!(receipt.requirement.created_at > 0);
    assert_eq!(receipt.excel_processing.status, MirrorStatus::Inserted);
    assert!(receipt.excel_processing.message.contains("Customer ID"));
    assert!(mirror_path.exists());
}

#[test]
fn submission_receipt_serializes_to_expected_shape() {
    let dir = tempfile::tempdir().unwrap();
    let mirror_path = dir.path().join("requirements_data.xlsx");

    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRequirementRepository::try_new(&conn).unwrap();
    let service = SubmissionService::new(repo, ExcelMirror::new(&mirror_path));

    let receipt = service.submit(&valid_draft()).unwrap();
    let json = serde_json::to_value(&receipt).unwrap();

    assert_eq!(json["requirement"]["id"], 1);
    assert_eq!(json["requirement"]["attribute"], "Customer ID");
    assert_eq!(json["requirement"]["domain"], "Sales");
    assert!(json["requirement"]["created_at"].is_i64());
    assert_eq!(json["excel_processing"]["status"], "inserted");
    assert!(json["excel_processing"]["message"].is_string());
}

#[test]
fn invalid_submission_never_reaches_store_or_mirror() {
    let dir = tempfile::tempdir().unwrap();
    let mirror_path = dir.path().join("requirements_data.xlsx");

    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRequirementRepository::try_new(&conn).unwrap();
    let service = SubmissionService::new(repo, ExcelMirror::new(&mirror_path));

    let mut incomplete = valid_draft();
    incomplete.description.clear();

    let err = service.submit(&incomplete).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(err.http_status(), 422);

    // No store row, no orphan spreadsheet row.
    let repo = SqliteRequirementRepository::try_new(&conn).unwrap();
    assert!(repo.list(&RequirementListQuery::default()).unwrap().is_empty());
    assert!(!mirror_path.exists());
}

#[test]
fn mirror_failure_does_not_fail_the_submission() {
    let dir = tempfile::tempdir().unwrap();
    // A directory at the workbook path makes every load/save attempt fail.
    let mirror_path = dir.path().join("requirements_data.xlsx");
    std::fs::create_dir_all(&mirror_path).unwrap();

    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRequirementRepository::try_new(&conn).unwrap();
    let service = SubmissionService::new(repo, ExcelMirror::new(&mirror_path));

    let receipt = service.submit(&valid_draft()).unwrap();

    assert_eq!(receipt.requirement.id, 1);
    assert_eq!(receipt.excel_processing.status, MirrorStatus::Error);
    assert!(!receipt.excel_processing.message.is_empty());

    // The authoritative store write survived the mirror failure.
    let repo = SqliteRequirementRepository::try_new(&conn).unwrap();
    let listed = repo.list(&RequirementListQuery::default()).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, receipt.requirement.id);
}

#[test]
fn query_workflow_maps_errors_to_http_statuses() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRequirementRepository::try_new(&conn).unwrap();
    let service = RequirementService::new(repo);

    let err = service.get(99).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(99)));
    assert_eq!(err.http_status(), 404);

    let err = service.delete(99).unwrap_err();
    assert_eq!(err.http_status(), 404);
}

#[test]
fn query_workflow_round_trips_submissions() {
    let dir = tempfile::tempdir().unwrap();
    let mirror_path = dir.path().join("requirements_data.xlsx");

    let conn = open_db_in_memory().unwrap();

    let submitted = {
        let repo = SqliteRequirementRepository::try_new(&conn).unwrap();
        let submission = SubmissionService::new(repo, ExcelMirror::new(&mirror_path));
        submission.submit(&valid_draft()).unwrap().requirement
    };

    let repo = SqliteRequirementRepository::try_new(&conn).unwrap();
    let service = RequirementService::new(repo);

    let fetched = service.get(submitted.id).unwrap();
    assert_eq!(fetched, submitted);

    let listed = service.list(&RequirementListQuery::default()).unwrap();
    assert_eq!(listed, vec![submitted.clone()]);

    service.delete(submitted.id).unwrap();
    assert_eq!(service.get(submitted.id).unwrap_err().http_status(), 404);

    // Deleting the store row leaves the mirror file untouched.
    assert!(mirror_path.exists());
}
