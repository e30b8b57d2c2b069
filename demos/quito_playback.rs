use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::mpsc;

use sun_tracker_playback::{
    AnalyticEphemeris, FrameView, PlaybackCommand, Player, Renderer, SampleRequest, StopReason,
    TrackerConfig, TrajectorySampler,
};

struct ConsoleRenderer;

impl Renderer for ConsoleRenderer {
    fn render(&mut self, frame: &FrameView) {
        let [c0, _, c2, _] = frame.panel_quad.corners;
        println!(
            "[{:>2}] {}  elev {:6.2}°  az {:6.2}°  pitch {:6.2}°  roll {:6.2}°  panel ({:.2}, {:.2}, {:.2})..({:.2}, {:.2}, {:.2})",
            frame.index,
            frame.time_label,
            frame.elevation,
            frame.azimuth,
            frame.pitch,
            frame.roll,
            c0.x, c0.y, c0.z,
            c2.x, c2.y, c2.z,
        );
        if let Some(arc) = &frame.elevation_arc {
            println!("       elevation arc {:.1}° ({} points)", arc.swept_deg, arc.points.len());
        }
        if let Some(arc) = &frame.azimuth_arc {
            println!("       azimuth arc   {:.1}° ({} points)", arc.swept_deg, arc.points.len());
        }
    }

    fn stopped(&mut self, reason: StopReason) {
        println!("--- stopped: {:?}", reason);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    let config = TrackerConfig::default();
    let sampler = TrajectorySampler::new(config.site, AnalyticEphemeris);
    let request = SampleRequest {
        start_date: NaiveDate::from_ymd_opt(2024, 6, 21).unwrap(),
        start_hour: 6,
        duration_hours: 12,
        interval_minutes: 60,
    };

    println!("=== Two-axis tracker playback ===");
    println!(
        "Site: EPN Quito ({:.4}°, {:.4}°, {})",
        config.site.latitude, config.site.longitude, config.site.timezone
    );
    println!("Request: {:?}", request);
    println!();

    let trajectory = match sampler.sample(&request) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("sampling failed: {e}");
            return;
        }
    };

    let (tx, rx) = mpsc::channel(8);
    let mut player = Player::new(config, ConsoleRenderer);
    let script = async move {
        let _ = tx.send(PlaybackCommand::Load(trajectory)).await;
        let _ = tx.send(PlaybackCommand::Play).await;
        tokio::time::sleep(Duration::from_millis(900)).await;
        let _ = tx.send(PlaybackCommand::Pause).await;
        let _ = tx.send(PlaybackCommand::Seek(8)).await;
        let _ = tx.send(PlaybackCommand::StepBack).await;
        let _ = tx.send(PlaybackCommand::Play).await;
        tokio::time::sleep(Duration::from_secs(2)).await;
        let _ = tx.send(PlaybackCommand::Reset).await;
    };
    tokio::join!(player.run(rx), script);
}
