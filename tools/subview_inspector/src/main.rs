mod recorder;

use std::env;
use std::path::PathBuf;
use std::process;

use portalview_render::portal::classify_portal;
use portalview_render::settings::{load_or_create_settings, SETTINGS_PATH};
use portalview_render::subview::{world_plane, RenderContext, ViewRenderer};
use portalview_shared::scene::Scene;
use tracing::info;

use recorder::RecordingRenderer;

struct InspectorConfig {
    scene_path: PathBuf,
    settings_path: PathBuf,
    time_ms: Option<i32>,
}

fn main() {
    let _ = tracing_subscriber::fmt().with_target(false).try_init();

    let config = match parse_args() {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("{}", usage());
            process::exit(2);
        }
    };

    if let Err(err) = run(&config) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn usage() -> &'static str {
    "usage: subview_inspector --scene <scene.toml> [--settings <subview.toml>] [--time <ms>]"
}

fn parse_args() -> Result<InspectorConfig, String> {
    let mut scene_path = None;
    let mut settings_path = PathBuf::from(SETTINGS_PATH);
    let mut time_ms = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--scene" => {
                let value = args.next().ok_or("--scene requires a path")?;
                scene_path = Some(PathBuf::from(value));
            }
            "--settings" => {
                let value = args.next().ok_or("--settings requires a path")?;
                settings_path = PathBuf::from(value);
            }
            "--time" => {
                let value = args.next().ok_or("--time requires milliseconds")?;
                let parsed = value
                    .parse::<i32>()
                    .map_err(|_| format!("invalid --time value: {value}"))?;
                time_ms = Some(parsed);
            }
            "--help" | "-h" => {
                println!("{}", usage());
                process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    let scene_path = scene_path.ok_or("missing --scene")?;
    Ok(InspectorConfig {
        scene_path,
        settings_path,
        time_ms,
    })
}

fn run(config: &InspectorConfig) -> Result<(), String> {
    let settings = load_or_create_settings(&config.settings_path);
    let mut scene = Scene::load(&config.scene_path)
        .map_err(|e| format!("failed to load {}: {e}", config.scene_path.display()))?;
    if let Some(time_ms) = config.time_ms {
        scene.time_ms = time_ms;
    }

    info!(
        "Inspecting {} ({} entities, {} portal surfaces, max recursion {})",
        config.scene_path.display(),
        scene.entities.len(),
        scene.portal_surfaces().count(),
        settings.max_recursion
    );

    println!("portal surfaces:");
    for (index, surface) in scene.surfaces.iter().enumerate().filter(|(_, s)| s.portal) {
        let plane = world_plane(surface, &scene.entities);
        let kind = match classify_portal(&plane, &scene.entities) {
            Some(kind) => format!("{kind:?}"),
            None => "unmatched".to_string(),
        };
        println!(
            "  #{index}: normal={} dist={} -> {kind}",
            plane.normal, plane.dist
        );
    }

    let mut ctx = RenderContext::for_scene(&scene, &settings);
    let mut renderer = RecordingRenderer::new(&scene.surfaces);
    renderer.render_view(&mut ctx);

    println!("views rendered: {}", renderer.views.len());
    for view in &renderer.views {
        println!(
            "  level {}: origin={} forward={} portal={} mirror={} pvs={}",
            view.subview_level,
            view.orientation.origin,
            view.orientation.axis[0],
            view.is_portal(),
            view.is_mirror(),
            view.pvs_origin
        );
    }
    println!("stencil marks: {}", renderer.stencil_marks);
    println!("skipped subviews: {}", renderer.skipped.len());
    for (level, reason) in &renderer.skipped {
        println!("  level {level}: {reason}");
    }
    println!("uniform bytes: {}", renderer.uniform_bytes());

    Ok(())
}
