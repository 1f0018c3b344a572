use crate::session::SessionFrame;
use std::fs;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("session file i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("session file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reads a JSON array of frames. Frame order is kept as stored.
pub fn load_session(path: impl AsRef<Path>) -> Result<Vec<SessionFrame>, SessionError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let frames: Vec<SessionFrame> = serde_json::from_str(&raw)?;

    let out_of_order = frames
        .windows(2)
        .filter(|w| w[1].timestamp < w[0].timestamp)
        .count();
    if out_of_order > 0 {
        tracing::warn!(
            path = %path.display(),
            out_of_order,
            "session has decreasing timestamps"
        );
    }

    tracing::debug!(path = %path.display(), frames = frames.len(), "session loaded");
    Ok(frames)
}

pub fn save_session(path: impl AsRef<Path>, frames: &[SessionFrame]) -> Result<(), SessionError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(frames)?;
    fs::write(path, json)?;
    tracing::debug!(path = %path.display(), frames = frames.len(), "session saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::Emotion;
    use crate::session::test_support::{face, frame};

    #[test]
    fn save_then_load_preserves_frames() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        let frames = vec![
            frame(1_700_000_000_000, vec![face(Emotion::Happy, 0.93, 120.0, 80.0)]),
            frame(1_700_000_000_500, vec![]),
        ];

        save_session(&path, &frames).expect("saved");
        let loaded = load_session(&path).expect("loaded");
        assert_eq!(loaded, frames);
    }

    #[test]
    fn loads_backend_shaped_history() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("history.json");
        fs::write(
            &path,
            r#"[
                {"timestamp": 1000, "results": []},
                {"timestamp": 1500, "results": [
                    {"bbox": {"x": 200, "y": 150, "width": 180, "height": 180},
                     "emotion": "Neutral", "confidence": 0.88, "emoji": "-"}
                ]}
            ]"#,
        )
        .expect("write");

        let loaded = load_session(&path).expect("loaded");
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].results[0].emotion, Emotion::Neutral);
    }

    #[test]
    fn decreasing_timestamps_are_loaded_as_stored() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("skewed.json");
        fs::write(
            &path,
            r#"[
                {"timestamp": 2000, "results": []},
                {"timestamp": 1500, "results": []},
                {"timestamp": 2500, "results": []}
            ]"#,
        )
        .expect("write");

        let loaded = load_session(&path).expect("loaded");
        let stamps: Vec<i64> = loaded.iter().map(|f| f.timestamp).collect();
        assert_eq!(stamps, vec![2000, 1500, 2500]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_session(dir.path().join("nope.json")).expect_err("missing");
        assert!(matches!(err, SessionError::Io(_)));
    }

    #[test]
    fn malformed_file_is_json_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").expect("write");
        assert!(matches!(load_session(&path), Err(SessionError::Json(_))));
    }
}
