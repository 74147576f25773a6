use super::*;

#[test]
fn test_primary_codec_wins_when_supported() {
    assert_eq!(select_format(|_| true), WEBM_VP9_OPUS);
}

#[test]
fn test_falls_back_in_preference_order() {
    let vp8_only = |mime: &str| mime == WEBM_VP8_OPUS.mime_type;
    assert_eq!(select_format(vp8_only), WEBM_VP8_OPUS);

    let generic_only = |mime: &str| mime == "video/webm";
    assert_eq!(select_format(generic_only), WEBM_GENERIC);
}

#[test]
fn test_nothing_supported_degrades_to_generic() {
    assert_eq!(select_format(|_| false), WEBM_GENERIC);
}

#[test]
fn test_selection_is_deterministic() {
    let support = |mime: &str| mime.contains("vp8") || mime == "video/webm";
    let first = select_format(support);
    for _ in 0..10 {
        assert_eq!(select_format(support), first);
    }
    assert_eq!(first, WEBM_VP8_OPUS);
}

#[test]
fn test_all_preferences_share_the_webm_extension() {
    assert!(CODEC_PREFERENCES.iter().all(|f| f.extension == "webm"));
}
