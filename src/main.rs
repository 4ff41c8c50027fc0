// src/main.rs
use nannou::prelude::*;
use std::sync::Arc;
use std::time::Instant;

use railvis::{
    animation::{AnimationLoop, FrameRequest, PositionAnimator},
    config::*,
    models::{ScenarioRequest, TransitNetwork},
    render::{MapRenderer, PanelRenderer},
    services::{ApiClient, RefreshScope, RefreshService},
    views::DashboardState,
};

const MAP_MARGIN: f32 = 24.0;
const KEY_HELP: &str =
    "[Space] run/pause  [S] scatter  [L] labels  [R] refresh  [O] optimize  [T] scenario type  [Enter] run scenario  [Q] quit";

struct Model {
    // Core components:
    network: TransitNetwork,
    animator: PositionAnimator,
    animation_loop: AnimationLoop,
    frame_request: FrameRequest,
    random: rand::rngs::ThreadRng,

    // Backend components:
    refresh: RefreshService,
    dashboard: DashboardState,
    scenario: ScenarioConfig,
    scenario_index: usize,

    // Rendering components:
    map_renderer: MapRenderer,
    panel_renderer: PanelRenderer,
    panel_width: f32,
    show_labels: bool,

    last_update: Instant,
}

fn main() {
    env_logger::init();
    nannou::app(model).update(update).exit(exit).run();
}

fn or_exit<T, E: std::fmt::Display>(result: Result<T, E>, what: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            log::error!("{}: {}", what, e);
            std::process::exit(1);
        }
    }
}

fn model(app: &App) -> Model {
    // Load config
    let config = or_exit(Config::load(), "Failed to load config file");

    // Load the network & place the trains
    let network_path = config.resolve_network_path();
    let network = or_exit(
        TransitNetwork::load(&network_path),
        "Failed to load network file",
    );
    let mut random = rand::thread_rng();
    let entities = network.spawn_entities(&mut random);
    let animator = PositionAnimator::new(network.paths(), entities);
    for entity in animator.dangling_entities() {
        log::warn!(
            "train '{}' references unknown line '{}', it will not move",
            entity.id,
            entity.path_id
        );
    }
    log::info!(
        "loaded {} lines and {} trains from {}",
        network.lines.len(),
        animator.entities().len(),
        network_path.display()
    );

    let mut animation_loop = AnimationLoop::new(config.animation.ticks_per_second);
    if config.animation.autostart {
        animation_loop.start();
    }

    // Start polling the backend
    let client = or_exit(
        ApiClient::new(&config.api.base_url, config.request_timeout()),
        "Failed to create API client",
    );
    let refresh = RefreshService::start(Arc::new(client), config.refresh_interval());

    // Create window
    app.new_window()
        .title("railvis")
        .size(config.window.width, config.window.height)
        .view(view)
        .key_pressed(key_pressed)
        .build()
        .unwrap_or_else(|e| {
            log::error!("Failed to create window: {:?}", e);
            std::process::exit(1);
        });

    let window_rect = app.window_rect();
    let (map_area, panel_area) = split_layout(window_rect, config.style.panel_width);
    let mut map_renderer = MapRenderer::new(network.view_box, &config.style);
    map_renderer.fit_to(map_area);

    Model {
        network,
        animator,
        animation_loop,
        frame_request: FrameRequest::Halt,
        random,

        refresh,
        dashboard: DashboardState::new(),
        scenario: config.scenario.clone(),
        scenario_index: 0,

        map_renderer,
        panel_renderer: PanelRenderer::new(panel_area),
        panel_width: config.style.panel_width,
        show_labels: true,

        last_update: Instant::now(),
    }
}

// Map on the left, dashboard column on the right
fn split_layout(window: Rect, panel_width: f32) -> (Rect, Rect) {
    let panel_width = panel_width.min(window.w() * 0.5);
    let panel = Rect::from_x_y_w_h(
        window.right() - panel_width / 2.0,
        window.y(),
        panel_width,
        window.h(),
    );
    let map = Rect::from_corners(
        pt2(window.left() + MAP_MARGIN, window.bottom() + MAP_MARGIN),
        pt2(panel.left() - MAP_MARGIN, window.top() - MAP_MARGIN),
    );
    (map, panel)
}

fn current_scenario_type(model: &Model) -> String {
    model
        .scenario
        .types
        .get(model.scenario_index)
        .cloned()
        .unwrap_or_else(|| "custom".to_string())
}

fn key_pressed(app: &App, model: &mut Model, key: Key) {
    match key {
        // start / stop the animation
        Key::Space => {
            model.animation_loop.toggle();
            log::info!(
                "animation {}",
                if model.animation_loop.is_running() { "resumed" } else { "paused" }
            );
        }
        Key::S => {
            model.animator.scatter(&mut model.random);
            log::debug!("scattered {} trains", model.animator.entities().len());
        }
        Key::L => model.show_labels = !model.show_labels,
        Key::R => model.refresh.request_refresh(RefreshScope::Trains),
        Key::O => {
            if model.dashboard.begin_optimization() {
                model.refresh.request_optimization();
            }
        }
        Key::T => {
            if !model.scenario.types.is_empty() {
                model.scenario_index = (model.scenario_index + 1) % model.scenario.types.len();
            }
        }
        Key::Return => {
            if model.dashboard.begin_scenario() {
                let request = ScenarioRequest {
                    name: model.scenario.default_name.clone(),
                    kind: current_scenario_type(model),
                };
                model.refresh.request_scenario(request);
            }
        }
        Key::Q | Key::Escape => app.quit(),
        _ => (),
    }
}

fn update(app: &App, model: &mut Model, _update: Update) {
    let now = Instant::now();
    let elapsed = (now - model.last_update).as_secs_f32();
    model.last_update = now;

    // Backend results
    model.dashboard.apply_all(model.refresh.take_updates());

    // Follow window resizes
    let (map_area, panel_area) = split_layout(app.window_rect(), model.panel_width);
    model.map_renderer.fit_to(map_area);
    model.panel_renderer.set_area(panel_area);

    /*********************  Main update for the trains **********************/
    model.frame_request = model
        .animation_loop
        .on_frame(&mut model.animator, elapsed);
    /*************************************************************************/
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(rgb(0.04f32, 0.05, 0.07));

    model.map_renderer.draw_network(&draw, &model.network);
    model
        .map_renderer
        .draw_trains(&draw, model.animator.entities(), model.show_labels);

    let animation = match model.frame_request {
        FrameRequest::Continue => "live",
        FrameRequest::Halt => "paused",
    };
    let refresh = if model.refresh.is_running() {
        format!("refresh {}s", model.refresh.interval().as_secs())
    } else {
        "refresh off".to_string()
    };
    let status = format!(
        "{} | {} | scenario: {}",
        animation,
        refresh,
        current_scenario_type(model),
    );
    model.panel_renderer.draw(&draw, &model.dashboard, &status);

    let window = app.window_rect();
    draw.text(KEY_HELP)
        .x_y(window.x() - model.panel_width / 2.0, window.bottom() + 12.0)
        .w(window.w() - model.panel_width)
        .font_size(11)
        .color(rgb(0.45f32, 0.48, 0.52));

    if let Err(e) = draw.to_frame(app, &frame) {
        log::error!("failed to draw frame: {:?}", e);
    }
}

// Teardown: cancel the refresh timer before the process goes away
fn exit(_app: &App, mut model: Model) {
    log::info!("exiting after {} animated frames", model.animation_loop.frames());
    model.animation_loop.stop();
    model.refresh.stop();
}
