//! Two-dimensional solar system driven through the animation surface.
//!
//! A worker thread integrates the sun and the four inner planets and pushes
//! each frame into a shared [`AnimationSurface`]; the UI thread only paints.

use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use egui_plot::Plot;
use env_logger::Env;
use graph_oxide::constants::animation::FRAME_PAUSE_MS;
use graph_oxide::render::animation::{self, AnimationSurface, StopToken};
use graph_oxide::render::painter;

const G: f64 = 6.67e-11;

/// Sun to earth, used as the display unit
const DISTANCE: f64 = 1.4786e11;

/// Simulated seconds per wall-clock second
const TIME_SCALE: f64 = 1.0e6;

const STEP_MULTIPLIER: f64 = 100.0;
const MAX_STEP: f64 = 2000.0;

/// Sim time to catch up on in one frame when the window stalls
const MAX_CATCH_UP: f64 = 0.25 * TIME_SCALE;

const HALF_EXTENT: f64 = 1.7;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Body {
    position: [f64; 2],
    velocity: [f64; 2],
    mass: f64,
    radius: f64,
}

struct SolarSystem {
    bodies: Vec<Body>,
}

impl SolarSystem {
    fn inner_planets() -> Self {
        let body = |position, velocity, mass, radius| Body {
            position,
            velocity,
            mass,
            radius,
        };
        Self {
            bodies: vec![
                body([0.0, 0.0], [0.0, 0.0], 1.989e30, 0.1),
                body([0.0, -4.6e10], [-5.898e4, 0.0], 3.3010e23, 0.05),
                body([-0.71843 * DISTANCE, 0.0], [0.0, 3.526e4], 4.8675e24, 0.05),
                body([0.0, 1.47098074e11], [3.029e4, 0.0], 5.972e24, 0.05),
                body([1.3814 * DISTANCE, 0.0], [0.0, -2.65e4], 6.39e23, 0.05),
            ],
        }
    }

    /// Step length, shorter while anything moves fast
    fn step_size(&self) -> f64 {
        let fastest = self
            .bodies
            .iter()
            .map(|b| b.velocity[0].hypot(b.velocity[1]))
            .fold(0.0, f64::max);
        if fastest <= 0.0 {
            return MAX_STEP;
        }
        (DISTANCE / (fastest.powf(1.5) * STEP_MULTIPLIER)).min(MAX_STEP)
    }

    /// Advance by `dt` seconds: pairwise velocity kicks, then drift
    fn step(&mut self, dt: f64) {
        let n = self.bodies.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = (self.bodies[i], self.bodies[j]);
                let dx = b.position[0] - a.position[0];
                let dy = b.position[1] - a.position[1];
                let dist_sq = dx * dx + dy * dy;
                if dist_sq == 0.0 {
                    continue;
                }
                let dist = dist_sq.sqrt();
                let impulse = G * a.mass * b.mass / dist_sq * dt;
                let (ux, uy) = (dx / dist, dy / dist);

                self.bodies[i].velocity[0] += impulse * ux / a.mass;
                self.bodies[i].velocity[1] += impulse * uy / a.mass;
                self.bodies[j].velocity[0] -= impulse * ux / b.mass;
                self.bodies[j].velocity[1] -= impulse * uy / b.mass;
            }
        }
        for body in &mut self.bodies {
            body.position[0] += body.velocity[0] * dt;
            body.position[1] += body.velocity[1] * dt;
        }
    }

    /// Integrate at least `seconds` of simulated time, returning how much ran
    fn advance(&mut self, seconds: f64) -> f64 {
        let mut elapsed = 0.0;
        while elapsed < seconds {
            let dt = self.step_size();
            self.step(dt);
            elapsed += dt;
        }
        elapsed
    }

    /// Positions in display units
    fn positions(&self) -> Vec<[f64; 2]> {
        self.bodies
            .iter()
            .map(|b| [b.position[0] / DISTANCE, b.position[1] / DISTANCE])
            .collect()
    }

    fn radii(&self) -> Vec<f64> {
        self.bodies.iter().map(|b| b.radius).collect()
    }
}

fn spawn_simulation(
    surface: Arc<Mutex<AnimationSurface>>,
    stop: StopToken,
    ctx: eframe::egui::Context,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("gravity-sim".to_string())
        .spawn(move || {
            let mut system = SolarSystem::inner_planets();
            let mut last = Instant::now();

            let result = animation::run(&stop, Duration::from_millis(FRAME_PAUSE_MS), || {
                let wall = last.elapsed().as_secs_f64();
                last = Instant::now();
                system.advance((wall * TIME_SCALE).min(MAX_CATCH_UP));

                let mut surface = surface.lock().unwrap_or_else(PoisonError::into_inner);
                let frame = surface.process_frame(&system.positions(), &system.radii());
                drop(surface);

                ctx.request_repaint();
                Some(frame)
            });

            match result {
                Ok(frames) => log::info!("simulation stopped after {} frames", frames),
                Err(e) => log::error!("simulation failed: {}", e),
            }
        })
}

struct GravityApp {
    surface: Arc<Mutex<AnimationSurface>>,
    stop: StopToken,
    sim: Option<JoinHandle<()>>,
}

impl GravityApp {
    fn new(ctx: eframe::egui::Context) -> Self {
        let surface = Arc::new(Mutex::new(AnimationSurface::new(HALF_EXTENT)));
        let stop = StopToken::new();
        let sim = spawn_simulation(surface.clone(), stop.clone(), ctx)
            .map_err(|e| log::error!("failed to spawn simulation: {}", e))
            .ok();
        Self { surface, stop, sim }
    }
}

impl eframe::App for GravityApp {
    fn update(&mut self, ctx: &eframe::egui::Context, _frame: &mut eframe::Frame) {
        profiling::finish_frame!();

        eframe::egui::CentralPanel::default().show(ctx, |ui| {
            let h = HALF_EXTENT;
            Plot::new("gravity")
                .data_aspect(1.0)
                .show_axes(false)
                .show_grid(false)
                .allow_drag(false)
                .allow_zoom(false)
                .allow_scroll(false)
                .include_x(-h)
                .include_x(h)
                .include_y(-h)
                .include_y(h)
                .show(ui, |plot_ui| {
                    let surface = self.surface.lock().unwrap_or_else(PoisonError::into_inner);
                    painter::paint(plot_ui, surface.primitives());
                });
        });
    }
}

impl Drop for GravityApp {
    fn drop(&mut self) {
        self.stop.stop();
        if let Some(handle) = self.sim.take() {
            let _ = handle.join();
        }
    }
}

fn main() -> eframe::Result {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "GraphOxide - Gravity",
        options,
        Box::new(|cc| Ok(Box::new(GravityApp::new(cc.egui_ctx.clone())))),
    )
}
