use std::time::{Duration, Instant};

/// Frame timing: a monotonic clock for the animation plus an optional frame cap.
pub struct Framepacer {
    started: Instant,
    frame_start: Instant,
    last_frametime: f32,
}

impl Framepacer {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            frame_start: now,
            last_frametime: 0.0,
        }
    }

    /// Milliseconds since the pacer was created, the starfield's `now`.
    pub fn timestamp_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    /// Seconds spent in the previous complete frame.
    pub fn frametime(&self) -> f32 {
        self.last_frametime
    }

    pub fn framerate(&self) -> f32 {
        if self.last_frametime > f32::EPSILON {
            1.0 / self.last_frametime
        } else {
            0.0
        }
    }

    pub fn begin_frame(&mut self) {
        self.frame_start = Instant::now();
    }

    /// Sleeps out the rest of the frame when `limit_frametime` is a real limit.
    pub fn end_frame(&mut self, limit_frametime: f32) {
        if limit_frametime > f32::EPSILON && limit_frametime.is_finite() {
            const ACCURACY: f32 = 0.0001; // 100 microseconds
            let sleep_time = limit_frametime - self.elapsed() - ACCURACY;

            if sleep_time > 0.0 {
                std::thread::sleep(Duration::from_secs_f32(sleep_time));

                while self.elapsed() < limit_frametime {
                    std::thread::yield_now();
                }
            }
        }

        self.last_frametime = self.elapsed();
    }

    fn elapsed(&self) -> f32 {
        self.frame_start.elapsed().as_secs_f32()
    }
}

/// Frame budget in seconds for a target framerate, 0 means uncapped.
pub fn frame_limit(framerate: u32) -> f32 {
    if framerate == 0 {
        0.0
    } else {
        1.0 / framerate as f32
    }
}
