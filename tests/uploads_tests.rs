use bytes::Bytes;
use chrono::Utc;
use futures::stream;
use product_catalog::uploads::{IntakeError, UploadDir};

fn chunks(parts: &[&'static [u8]]) -> impl futures::Stream<Item = Result<Bytes, std::io::Error>> {
    let items: Vec<Result<Bytes, std::io::Error>> =
        parts.iter().map(|p| Ok(Bytes::from_static(p))).collect();
    stream::iter(items)
}

#[tokio::test]
async fn test_store_writes_bytes_under_upload_dir() {
    let dir = tempfile::tempdir().unwrap();
    let uploads = UploadDir::new(dir.path().join("uploads")).unwrap();

    let path = uploads
        .store(Some("photo.png"), Utc::now(), chunks(&[b"hello ", b"world"]))
        .await
        .unwrap();

    assert!(path.starts_with(&*uploads.base_path().to_string_lossy()));
    assert!(path.ends_with(".png"));
    assert_eq!(tokio::fs::read(&path).await.unwrap(), b"hello world");
}

#[tokio::test]
async fn test_store_relative_dir_yields_relative_path() {
    let uploads = UploadDir::new("target/uploads-test").unwrap();

    let path = uploads
        .store(Some("a.txt"), Utc::now(), chunks(&[b"x"]))
        .await
        .unwrap();

    assert!(path.starts_with("target/uploads-test/"));
    tokio::fs::remove_file(&path).await.unwrap();
}

#[tokio::test]
async fn test_same_extension_same_instant_does_not_collide() {
    let dir = tempfile::tempdir().unwrap();
    let uploads = UploadDir::new(dir.path()).unwrap();
    let submitted_at = Utc::now();

    let first = uploads
        .store(Some("a.jpg"), submitted_at, chunks(&[b"first"]))
        .await
        .unwrap();
    let second = uploads
        .store(Some("b.jpg"), submitted_at, chunks(&[b"second"]))
        .await
        .unwrap();

    assert_ne!(first, second);
    assert_eq!(tokio::fs::read(&first).await.unwrap(), b"first");
    assert_eq!(tokio::fs::read(&second).await.unwrap(), b"second");
}

#[tokio::test]
async fn test_store_without_extension() {
    let dir = tempfile::tempdir().unwrap();
    let uploads = UploadDir::new(dir.path()).unwrap();

    let path = uploads
        .store(None, Utc::now(), chunks(&[b"raw"]))
        .await
        .unwrap();

    let name = std::path::Path::new(&path).file_name().unwrap().to_str().unwrap();
    assert!(!name.contains('.'));
}

#[tokio::test]
async fn test_store_propagates_stream_errors() {
    let dir = tempfile::tempdir().unwrap();
    let uploads = UploadDir::new(dir.path()).unwrap();

    let failing = stream::iter(vec![
        Ok(Bytes::from_static(b"partial")),
        Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "client went away")),
    ]);
    let result = uploads.store(Some("a.png"), Utc::now(), failing).await;

    assert!(matches!(result, Err(IntakeError::Io(_))));
}

#[test]
fn test_new_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    UploadDir::new(&nested).unwrap();
    assert!(nested.is_dir());
}
