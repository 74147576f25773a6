use super::*;

fn payload(data: &[u8]) -> ArtifactPayload {
    ArtifactPayload {
        data: data.to_vec(),
        mime_type: "video/webm".to_string(),
        extension: "webm".to_string(),
    }
}

#[test]
fn test_download_name_uses_config_and_extension() {
    let config = PrompterConfig::default();
    assert_eq!(download_file_name(&config, "webm"), "my-video.webm");
}

#[test]
fn test_blank_name_falls_back() {
    let config = PrompterConfig {
        file_name: "   ".to_string(),
        ..Default::default()
    };
    assert_eq!(download_file_name(&config, "webm"), "teleprompter.webm");
}

#[test]
fn test_sanitize_strips_path_components() {
    assert_eq!(sanitize_file_name("../secret/take"), "-secret-take");
    assert_eq!(sanitize_file_name("a:b*c"), "a-b-c");
    assert_eq!(sanitize_file_name("///"), "teleprompter");
    assert_eq!(sanitize_file_name("intro take 1"), "intro take 1");
}

#[tokio::test]
async fn test_save_writes_file_into_directory() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = DirectoryExporter::new(dir.path().join("nested"));

    let path = exporter.save(&payload(&[1, 2, 3]), "clip.webm").await.unwrap();

    assert_eq!(path, dir.path().join("nested").join("clip.webm"));
    assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_save_never_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = DirectoryExporter::new(dir.path());

    let first = exporter.save(&payload(&[1]), "clip.webm").await.unwrap();
    let second = exporter.save(&payload(&[2]), "clip.webm").await.unwrap();

    assert_ne!(first, second);
    assert_eq!(second, dir.path().join("clip (1).webm"));
    assert_eq!(std::fs::read(&first).unwrap(), vec![1]);
    assert_eq!(std::fs::read(&second).unwrap(), vec![2]);
}
