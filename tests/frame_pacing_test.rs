use instant::{Duration, Instant};
use spinning_cubes::{
    FrameRateRange,
    flow::{FramePacer, PacingMode},
};

#[test]
fn should_prefer_display_refresh_when_vsync_is_available() {
    let modes = [wgpu::PresentMode::Fifo, wgpu::PresentMode::Immediate];
    assert_eq!(PacingMode::select(true, &modes), PacingMode::Display);
}

#[test]
fn should_fall_back_to_timer_without_fifo_or_when_vsync_is_off() {
    assert_eq!(
        PacingMode::select(true, &[wgpu::PresentMode::Immediate]),
        PacingMode::Timer
    );
    assert_eq!(
        PacingMode::select(false, &[wgpu::PresentMode::Fifo]),
        PacingMode::Timer
    );
}

#[test]
fn should_render_first_frame_immediately() {
    let pacer = FramePacer::new(FrameRateRange::default(), PacingMode::Timer);
    assert_eq!(pacer.next_deadline(), None);
    assert!(pacer.is_due(Instant::now()));
}

#[test]
fn should_space_timer_frames_at_preferred_rate() {
    let mut pacer = FramePacer::new(FrameRateRange::new(30, 60, 50), PacingMode::Timer);
    assert_eq!(pacer.target_interval(), Duration::from_millis(20));

    let start = Instant::now();
    assert_eq!(pacer.frame_started(start), Duration::ZERO);
    assert_eq!(pacer.next_deadline(), Some(start + Duration::from_millis(20)));
    assert!(!pacer.is_due(start + Duration::from_millis(10)));
    assert!(pacer.is_due(start + Duration::from_millis(20)));

    let dt = pacer.frame_started(start + Duration::from_millis(21));
    assert_eq!(dt, Duration::from_millis(21));
}

#[test]
fn should_cap_display_paced_frames_at_max_rate() {
    let pacer = FramePacer::new(FrameRateRange::new(30, 60, 60), PacingMode::Display);
    assert_eq!(pacer.mode(), PacingMode::Display);
    assert_eq!(pacer.target_interval(), Duration::from_secs_f64(1.0 / 60.0));

    let fast_display = FramePacer::new(FrameRateRange::new(30, 120, 60), PacingMode::Display);
    assert_eq!(
        fast_display.target_interval(),
        Duration::from_secs_f64(1.0 / 120.0)
    );
}
