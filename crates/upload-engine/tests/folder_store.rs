//! Folder object store behavior.

use certmill_render_engine::Artifact;
use certmill_roster_model::sample_roster;
use certmill_upload_engine::{FolderStoreBackend, UploadBackend};

fn artifact(index: usize) -> Artifact {
    let entry = sample_roster().remove(index);
    let filename = entry.certificate_filename();
    Artifact {
        entry,
        filename,
        png: format!("png-bytes-{index}").into_bytes(),
    }
}

#[tokio::test]
async fn ensure_container_is_idempotent() {
    let root = tempfile::tempdir().unwrap();
    let backend = FolderStoreBackend::new(root.path(), "certificates");

    let first = backend.ensure_container(None).await.unwrap();
    let second = backend.ensure_container(None).await.unwrap();
    assert_eq!(first, second);

    let entries: Vec<_> = std::fs::read_dir(root.path()).unwrap().collect();
    assert_eq!(entries.len(), 1, "exactly one container directory");
}

#[tokio::test]
async fn upload_writes_bytes_and_returns_resolvable_url() {
    let root = tempfile::tempdir().unwrap();
    let backend = FolderStoreBackend::new(root.path(), "certificates");

    let artifact = artifact(0);
    let outcome = backend.upload(&artifact, None).await;

    assert!(outcome.is_success());
    let url = outcome.url().unwrap();
    assert!(url.starts_with("file://"));
    assert!(url.ends_with("John Doe_certificate.png"));
    assert!(!outcome.uploaded_at().unwrap().is_empty());

    let stored = root
        .path()
        .join("certificates")
        .join("John Doe_certificate.png");
    assert_eq!(std::fs::read(stored).unwrap(), artifact.png);
}

#[tokio::test]
async fn duplicate_filenames_are_not_deduplicated() {
    let root = tempfile::tempdir().unwrap();
    let backend = FolderStoreBackend::new(root.path(), "certificates");

    let first = artifact(0);
    let mut second = artifact(0);
    second.png = b"second attempt".to_vec();

    assert!(backend.upload(&first, None).await.is_success());
    assert!(backend.upload(&second, None).await.is_success());

    // Both attempts proceeded independently; last write wins on disk.
    let stored = root
        .path()
        .join("certificates")
        .join("John Doe_certificate.png");
    assert_eq!(std::fs::read(stored).unwrap(), b"second attempt");
}

#[tokio::test]
async fn unwritable_root_becomes_a_failure_outcome() {
    let backend = FolderStoreBackend::new("/proc/no-such-root", "certificates");
    let outcome = backend.upload(&artifact(1), None).await;
    assert!(!outcome.is_success());
    assert!(outcome.error().is_some());
}
