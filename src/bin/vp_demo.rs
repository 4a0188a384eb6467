use log::{info, warn};
use offside_vp::config::{self, VpDemoConfig};
use offside_vp::detection::{
    average_confidence, format_confidence, ConfidenceLevel, DetectorHandle, PrecomputedSegments,
};
use offside_vp::diagnostics::PipelineReport;
use offside_vp::geometry::Point;
use offside_vp::Scene;
use std::env;
use std::path::Path;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = config::load_config(Path::new(&config_path))?;

    let mut scene = match image_size(&config)? {
        Some([w, h]) => Scene::with_image_size(w, h),
        None => {
            warn!("no image size configured, VP-lines without anchors keep their end point");
            Scene::new()
        }
    };

    for (p1, p2) in config.reference_endpoints() {
        if let Err(err) = scene.add_reference_line(p1, p2) {
            warn!("skipping reference line {p1:?} -> {p2:?}: {err}");
        }
    }

    let mut detector = DetectorHandle::new(
        PrecomputedSegments::new(config.raw_segments()),
        config.detection.clone(),
    );
    let mut outcome = detector.run().map_err(|e| format!("Detection failed: {e}"))?;
    for (rank, cand) in outcome.suggestions.iter().enumerate() {
        info!(
            "suggestion {}: angle={:.1}deg length={:.0}px confidence={} ({:?})",
            rank + 1,
            cand.angle_deg,
            cand.length,
            format_confidence(cand.confidence),
            ConfidenceLevel::from_confidence(cand.confidence)
        );
    }
    scene.accept_candidates(&mut outcome.suggestions);

    for player in &config.players {
        let body = Point::from(player.body);
        let foot = Point::from(player.foot);
        match scene.add_player_projection(body, foot) {
            Ok(proj) if proj.vp_line.is_none() => {
                warn!("player at {body:?}: no vanishing point, plumb line only")
            }
            Ok(_) => {}
            Err(err) => warn!("skipping player at {body:?}: {err}"),
        }
    }

    let report = PipelineReport {
        average_confidence: average_confidence(&outcome.suggestions),
        reduction: outcome.report,
        suggestions: outcome.suggestions,
        scene: scene.report(),
    };
    config::save_report(&config.output.report_json, &report)?;

    match scene.vanishing_point() {
        Some(vp) => println!(
            "Vanishing point ({:.1}, {:.1}) from {} reference lines, inside image: {}",
            vp.x,
            vp.y,
            report.scene.reference_count,
            report
                .scene
                .vp_inside_image
                .map_or("unknown".to_string(), |b| b.to_string())
        ),
        None => println!(
            "No vanishing point ({} reference lines)",
            report.scene.reference_count
        ),
    }
    println!(
        "Saved report with {} suggestions to {}",
        report.suggestions.len(),
        config.output.report_json.display()
    );
    Ok(())
}

/// `[width, height]` from the config, falling back to the input image header.
fn image_size(config: &VpDemoConfig) -> Result<Option<[f64; 2]>, String> {
    if let Some(size) = config.image_size {
        return Ok(Some(size));
    }
    let Some(path) = &config.input_image else {
        return Ok(None);
    };
    let (w, h) = image::image_dimensions(path)
        .map_err(|e| format!("Failed to read image {}: {e}", path.display()))?;
    Ok(Some([w as f64, h as f64]))
}

fn usage() -> String {
    "Usage: vp_demo <config.json>".to_string()
}
