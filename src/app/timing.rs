use std::time::Instant;

pub struct FrameTiming {
    last_frame_time: Option<Instant>,
    last_fps_time: Instant,
    frame_count: u32,
    pub frame_dt: f32,
    fps: f32,
    base_title: String,
}

impl FrameTiming {
    pub fn new(base_title: String) -> Self {
        Self {
            last_frame_time: None,
            last_fps_time: Instant::now(),
            frame_count: 0,
            frame_dt: 1.0 / 60.0,
            fps: 0.0,
            base_title,
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn update(&mut self, ctx: &egui::Context, now: Instant) {
        let dt_duration = if let Some(last) = self.last_frame_time {
            now.saturating_duration_since(last)
        } else {
            std::time::Duration::from_millis(16)
        };
        self.last_frame_time = Some(now);
        self.frame_dt = dt_duration.as_secs_f32().max(0.0);

        self.frame_count = self.frame_count.saturating_add(1);
        let elapsed = now.saturating_duration_since(self.last_fps_time);
        if elapsed.as_secs_f32() >= 0.5 {
            self.fps = self.frame_count as f32 / elapsed.as_secs_f32();
            let ms = (self.frame_dt * 1000.0).max(0.0);
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
                "{} - {:.1} fps ({:.2} ms)",
                self.base_title, self.fps, ms
            )));
            self.frame_count = 0;
            self.last_fps_time = now;
        }
    }
}
