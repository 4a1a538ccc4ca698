//! Background decoding of mockup concept images.
//!
//! Decoding runs on a dedicated loader thread so a large file never stalls
//! the render loop. Every request carries a generation number; results whose
//! generation is no longer current (a newer request was issued, or the
//! vehicle changed) are discarded on receipt, so the latest request wins and
//! an in-flight load can never land on the wrong vehicle. Failed decodes are
//! dropped silently and the previous shading stays in place.

use image::RgbaImage;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

struct LoadRequest {
    generation: u64,
    path: PathBuf,
}

struct LoadResult {
    generation: u64,
    image: RgbaImage,
}

pub struct MockupLoader {
    request_tx: Sender<LoadRequest>,
    result_rx: Receiver<LoadResult>,
    generation: u64,
}

impl MockupLoader {
    /// Spawn the loader thread. The thread exits when the loader is dropped
    /// and its request channel closes.
    pub fn new() -> Self {
        let (request_tx, request_rx) = mpsc::channel::<LoadRequest>();
        let (result_tx, result_rx) = mpsc::channel::<LoadResult>();

        if let Err(err) = thread::Builder::new()
            .name("mockup-loader".into())
            .spawn(move || Self::loader_thread(request_rx, result_tx))
        {
            // Without the thread every request simply never completes, which
            // degrades to "no mockup" rather than an error.
            log::warn!("Failed to spawn mockup loader thread: {err}");
        }

        Self {
            request_tx,
            result_rx,
            generation: 0,
        }
    }

    fn loader_thread(request_rx: Receiver<LoadRequest>, result_tx: Sender<LoadResult>) {
        while let Ok(request) = request_rx.recv() {
            match image::open(&request.path) {
                Ok(decoded) => {
                    let result = LoadResult {
                        generation: request.generation,
                        image: decoded.to_rgba8(),
                    };
                    if result_tx.send(result).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    log::warn!("Mockup decode failed for {:?}: {err}", request.path);
                }
            }
        }
    }

    /// Queue a decode. Any earlier in-flight request becomes stale.
    pub fn request(&mut self, path: PathBuf) {
        self.generation += 1;
        log::info!("Loading mockup {:?} (generation {})", path, self.generation);
        let request = LoadRequest {
            generation: self.generation,
            path,
        };
        if self.request_tx.send(request).is_err() {
            log::warn!("Mockup loader thread is gone; request dropped");
        }
    }

    /// Invalidate all in-flight requests (vehicle category changed).
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Drain completed decodes; returns the newest current-generation image,
    /// if one arrived since the last poll.
    pub fn poll(&mut self) -> Option<RgbaImage> {
        let mut latest = None;
        loop {
            match self.result_rx.try_recv() {
                Ok(result) if result.generation == self.generation => {
                    latest = Some(result.image);
                }
                Ok(stale) => {
                    log::debug!(
                        "Discarding stale mockup result (generation {} != {})",
                        stale.generation,
                        self.generation
                    );
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        latest
    }
}

impl Default for MockupLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn write_test_png(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("wrapviz_mockup_{}_{}.png", std::process::id(), name));
        let image = RgbaImage::from_pixel(4, 4, image::Rgba([200, 40, 40, 255]));
        image.save(&path).unwrap();
        path
    }

    fn poll_until(loader: &mut MockupLoader, deadline: Duration) -> Option<RgbaImage> {
        let start = Instant::now();
        while start.elapsed() < deadline {
            if let Some(image) = loader.poll() {
                return Some(image);
            }
            thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn decodes_a_valid_image() {
        let path = write_test_png("valid");
        let mut loader = MockupLoader::new();
        loader.request(path.clone());
        let image = poll_until(&mut loader, Duration::from_secs(5)).expect("decode");
        assert_eq!(image.dimensions(), (4, 4));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn failed_decodes_produce_nothing() {
        let mut loader = MockupLoader::new();
        loader.request(PathBuf::from("/no/such/wrapviz_mockup.png"));
        assert!(poll_until(&mut loader, Duration::from_millis(300)).is_none());
    }

    #[test]
    fn invalidated_results_are_discarded() {
        let path = write_test_png("stale");
        let mut loader = MockupLoader::new();
        loader.request(path.clone());
        loader.invalidate();
        assert!(poll_until(&mut loader, Duration::from_millis(500)).is_none());
        let _ = std::fs::remove_file(path);
    }
}
