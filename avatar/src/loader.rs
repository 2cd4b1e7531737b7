use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;

use engine::assets_log;

use crate::error::AvatarError;
use crate::fallback;
use crate::importer::{self, AvatarContents};
use crate::node::AvatarNode;

const READ_CHUNK_SIZE: usize = 64 * 1024;

/// Handle to the single in-flight load. The worker thread reads and parses
/// the file, reporting progress and exactly one terminal result over
/// channels; the frame loop polls both. No cancellation, no timeout: a
/// stalled read leaves the loading indicator up, which is accepted.
pub struct AvatarLoader {
    progress_rx: Receiver<u32>,
    result_rx: Receiver<Result<AvatarContents, AvatarError>>,
    last_progress: Option<u32>,
}

impl AvatarLoader {
    pub fn spawn(path: PathBuf) -> AvatarLoader {
        let (progress_tx, progress_rx) = channel();
        let (result_tx, result_rx) = channel();

        thread::spawn(move || {
            let result = load_worker(&path, &progress_tx);
            // The receiver may already be gone if the viewer quit mid-load
            let _ = result_tx.send(result);
        });

        AvatarLoader {
            progress_rx,
            result_rx,
            last_progress: None,
        }
    }

    /// Latest progress percentage, if it changed since the last call.
    pub fn poll_progress(&mut self) -> Option<u32> {
        let mut updated = None;
        while let Ok(percent) = self.progress_rx.try_recv() {
            if Some(percent) != self.last_progress {
                self.last_progress = Some(percent);
                updated = Some(percent);
            }
        }
        updated
    }

    /// The terminal result, once the worker has finished. A worker that died
    /// without reporting (a panic) is folded into the failure path so the
    /// viewer still resolves to the fallback.
    pub fn try_result(&mut self) -> Option<Result<AvatarContents, AvatarError>> {
        match self.result_rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(AvatarError::Unsupported(
                "loader thread exited without a result".to_string(),
            ))),
        }
    }
}

fn load_worker(
    path: &Path,
    progress: &Sender<u32>,
) -> Result<AvatarContents, AvatarError> {
    assets_log!(info, "loading avatar from {}", path.display());

    let file = File::open(path)?;
    let total = file.metadata()?.len();

    let bytes = read_with_progress(file, total, |percent| {
        let _ = progress.send(percent);
    })?;

    importer::parse_glb(&bytes)
}

/// Read everything from `reader`, emitting whole-percent progress as bytes
/// arrive. Percentages are monotonically non-decreasing and end at 100.
fn read_with_progress<R: Read>(
    mut reader: R,
    total: u64,
    mut emit: impl FnMut(u32),
) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(total as usize);
    let mut chunk = [0u8; READ_CHUNK_SIZE];
    let mut last_percent = None;

    loop {
        let read = reader.read(&mut chunk)?;
        if read == 0 {
            break;
        }
        bytes.extend_from_slice(&chunk[..read]);

        let percent = progress_percent(bytes.len() as u64, total);
        if last_percent != Some(percent) {
            last_percent = Some(percent);
            emit(percent);
        }
    }

    if last_percent != Some(100) {
        emit(100);
    }

    Ok(bytes)
}

/// Whole-percent completion, clamped to [0, 100]. An unknown or zero total
/// reports 100 rather than dividing by zero.
pub fn progress_percent(loaded: u64, total: u64) -> u32 {
    if total == 0 {
        return 100;
    }
    let ratio = loaded as f64 / total as f64;
    (ratio * 100.0).round().clamp(0.0, 100.0) as u32
}

/// Outcome of resolving a finished load: the node that was attached, plus
/// the error if the fallback was substituted.
pub struct Resolution {
    pub node: AvatarNode,
    pub error: Option<AvatarError>,
}

/// Consume the terminal load result. Either way exactly one AvatarNode
/// comes back, so the caller's postcondition (one node attached, loading
/// indicator hidden) holds on both paths. Runs on the GL thread.
pub fn resolve(
    result: Result<AvatarContents, AvatarError>,
    target_height: f32,
) -> Resolution {
    match result {
        Ok(contents) => {
            let node = AvatarNode::from_contents(&contents, target_height);
            assets_log!(info, "avatar loaded: {} meshes", node.object_count());
            Resolution { node, error: None }
        }
        Err(error) => {
            assets_log!(error, "failed to load avatar: {}", error);
            Resolution {
                node: fallback::build_fallback_node(),
                error: Some(error),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_progress_percent_bounds() {
        assert_eq!(progress_percent(0, 1000), 0);
        assert_eq!(progress_percent(500, 1000), 50);
        assert_eq!(progress_percent(1000, 1000), 100);
        assert_eq!(progress_percent(2000, 1000), 100);
        assert_eq!(progress_percent(0, 0), 100);
    }

    #[test]
    fn test_read_progress_is_monotonic_and_complete() {
        let data = vec![0u8; 300 * 1024];
        let mut seen = Vec::new();

        let bytes = read_with_progress(Cursor::new(&data), data.len() as u64, |percent| {
            seen.push(percent);
        })
        .unwrap();

        assert_eq!(bytes.len(), data.len());
        assert!(!seen.is_empty());
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert!(seen.iter().all(|p| *p <= 100));
        assert_eq!(*seen.last().unwrap(), 100);
    }

    #[test]
    fn test_empty_reader_still_reports_completion() {
        let mut seen = Vec::new();
        let bytes = read_with_progress(Cursor::new(&[]), 0, |percent| seen.push(percent)).unwrap();

        assert!(bytes.is_empty());
        assert_eq!(seen, vec![100]);
    }

    #[test]
    fn test_missing_file_fails_with_io_error() {
        let (progress_tx, _progress_rx) = channel();
        let result = load_worker(Path::new("/does/not/exist/avatar.glb"), &progress_tx);
        assert!(matches!(result, Err(AvatarError::Io(_))));
    }

    #[test]
    fn test_worker_reports_result_over_channel() {
        let mut loader = AvatarLoader::spawn(PathBuf::from("/does/not/exist/avatar.glb"));

        // The worker finishes quickly; block on the channel directly rather
        // than spinning on try_result.
        let result = loader
            .result_rx
            .recv_timeout(std::time::Duration::from_secs(10))
            .expect("worker never reported");
        assert!(result.is_err());
    }
}
