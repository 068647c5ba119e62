use super::*;

#[test]
fn part_path_is_a_sibling_with_suffix() {
    let dest = Path::new("/tmp/cache/scratch/abc_v4.img");
    assert_eq!(
        part_path(dest),
        PathBuf::from("/tmp/cache/scratch/abc_v4.img.part")
    );
}

#[tokio::test]
async fn unreachable_host_is_network_error_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("art.img");
    let fetcher = HttpFetcher::new(Duration::from_secs(2)).unwrap();

    // Port 9 on loopback (discard) is closed in test environments.
    let err = fetcher
        .fetch("http://127.0.0.1:9/cover.jpg", &dest)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "network");
    assert!(!dest.exists());
    assert!(!part_path(&dest).exists());
}
