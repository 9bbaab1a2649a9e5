use bevy::prelude::*;
use bevy::math::primitives::{Sphere, Cuboid};

use crate::simulation::scenario::{ScenarioSource, Simulation};
use crate::simulation::states::{Body, NVec3};

/// Component tagging each sphere with its body index into `Simulation::bodies()`
#[derive(Component)]
struct BodyIndex(pub usize);

#[derive(Component)]
struct MainCamera;

/// Whether `step()` is called this frame
#[derive(Resource, Default)]
struct Paused(bool);

/// Camera orbiting the origin
#[derive(Resource)]
struct OrbitCamera {
    yaw: f32,
    pitch: f32,
    distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: 0.4,
            pitch: 0.35,
            distance: CAMERA_DISTANCE,
        }
    }
}

/// Distance of the camera from the origin at startup
const CAMERA_DISTANCE: f32 = 450.0;

const ORBIT_SPEED: f32 = 1.2; // radians per second
const ZOOM_SPEED: f32 = 300.0; // world units per second
const MIN_DISTANCE: f32 = 20.0;
const MAX_DISTANCE: f32 = 5000.0;

const BODY_COLORS: [(f32, f32, f32); 6] = [
    (1.0, 0.35, 0.25),
    (0.3, 0.75, 1.0),
    (0.45, 1.0, 0.4),
    (1.0, 0.85, 0.3),
    (0.85, 0.45, 1.0),
    (1.0, 1.0, 1.0),
];

/// Open the window and drive `simulation` once per frame
pub fn run_3d(simulation: Simulation, source: ScenarioSource) {
    log::info!("run_3d: starting viewer with {} bodies", simulation.bodies().len());
    log::info!("keys: space = pause, R = restart, N = new random scenario, arrows = orbit, +/- = zoom");

    App::new()
        .insert_resource(simulation)
        .insert_resource(source)
        .init_resource::<Paused>()
        .init_resource::<OrbitCamera>()
        // logging goes through env_logger, not bevy's subscriber
        .add_plugins(DefaultPlugins.build().disable::<bevy::log::LogPlugin>())
        .add_systems(Startup, setup_3d)
        .add_systems(
            Update,
            (handle_keys, physics_step, sync_transforms, draw_trails, orbit_camera).chain(),
        )
        .run();
}

fn body_color(i: usize) -> Color {
    let (r, g, b) = BODY_COLORS[i % BODY_COLORS.len()];
    Color::srgb(r, g, b)
}

fn to_vec3(p: NVec3) -> Vec3 {
    Vec3::new(p.x as f32, p.y as f32, p.z as f32)
}

/// Sphere radius grows with the cube root of mass so volume tracks mass
fn visual_radius(b: &Body) -> f32 {
    (b.mass().cbrt() as f32 * 0.6).max(0.5)
}

/// Startup system: camera, light, axes, one sphere per body
fn setup_3d(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    simulation: Res<Simulation>,
    orbit: Res<OrbitCamera>,
) {
    commands.spawn((
        Camera3dBundle {
            camera: Camera {
                clear_color: ClearColorConfig::Custom(Color::srgb(0.0, 0.0, 0.0)),
                ..Default::default()
            },
            transform: orbit_transform(&orbit),
            ..Default::default()
        },
        MainCamera,
    ));

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 1500.0,
            range: 2000.0,
            ..Default::default()
        },
        transform: Transform::from_xyz(100.0, 200.0, 300.0),
        ..Default::default()
    });

    spawn_axes(&mut commands, &mut meshes, &mut materials);
    spawn_bodies(&mut commands, &mut meshes, &mut materials, simulation.bodies());
}

fn spawn_bodies(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    bodies: &[Body],
) {
    for (i, b) in bodies.iter().enumerate() {
        commands.spawn((
            PbrBundle {
                mesh: meshes.add(Sphere::new(visual_radius(b)).mesh()),
                material: materials.add(StandardMaterial {
                    base_color: body_color(i),
                    unlit: true,
                    ..Default::default()
                }),
                transform: Transform::from_translation(to_vec3(b.x)),
                ..Default::default()
            },
            BodyIndex(i),
        ));
    }
}

/// Pause, restart and re-randomize
#[allow(clippy::too_many_arguments)]
fn handle_keys(
    mut commands: Commands,
    keys: Res<ButtonInput<KeyCode>>,
    mut simulation: ResMut<Simulation>,
    mut source: ResMut<ScenarioSource>,
    mut paused: ResMut<Paused>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    spheres: Query<Entity, With<BodyIndex>>,
) {
    if keys.just_pressed(KeyCode::Space) {
        paused.0 = !paused.0;
        log::info!("simulation {}", if paused.0 { "paused" } else { "resumed" });
    }

    let restart = keys.just_pressed(KeyCode::KeyR);
    let reroll = keys.just_pressed(KeyCode::KeyN);
    if !(restart || reroll) {
        return;
    }

    if reroll {
        source.reroll();
        log::info!("rolled a new scenario");
    } else {
        log::info!("restarting scenario");
    }

    if let Err(e) = simulation.initialize(source.initial()) {
        log::warn!("could not restart: {e}");
        return;
    }

    for e in &spheres {
        commands.entity(e).despawn();
    }
    spawn_bodies(&mut commands, &mut meshes, &mut materials, simulation.bodies());
}

/// Per-frame physics integration
fn physics_step(mut simulation: ResMut<Simulation>, paused: Res<Paused>) {
    if !paused.0 {
        simulation.step();
    }
}

fn sync_transforms(simulation: Res<Simulation>, mut query: Query<(&BodyIndex, &mut Transform)>) {
    let bodies = simulation.bodies();
    for (BodyIndex(i), mut transform) in &mut query {
        if let Some(b) = bodies.get(*i) {
            transform.translation = to_vec3(b.x);
        }
    }
}

fn draw_trails(simulation: Res<Simulation>, mut gizmos: Gizmos) {
    for (i, b) in simulation.bodies().iter().enumerate() {
        if b.trail().len() < 2 {
            continue;
        }
        gizmos.linestrip(b.trail().iter().map(to_vec3), body_color(i));
    }
}

fn orbit_transform(orbit: &OrbitCamera) -> Transform {
    let eye = Vec3::new(
        orbit.distance * orbit.pitch.cos() * orbit.yaw.sin(),
        orbit.distance * orbit.pitch.sin(),
        orbit.distance * orbit.pitch.cos() * orbit.yaw.cos(),
    );
    Transform::from_translation(eye).looking_at(Vec3::ZERO, Vec3::Y)
}

fn orbit_camera(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut orbit: ResMut<OrbitCamera>,
    mut camera: Query<&mut Transform, (With<MainCamera>, Without<BodyIndex>)>,
) {
    let dt = time.delta_seconds();
    let mut changed = false;

    if keys.pressed(KeyCode::ArrowLeft) {
        orbit.yaw -= ORBIT_SPEED * dt;
        changed = true;
    }
    if keys.pressed(KeyCode::ArrowRight) {
        orbit.yaw += ORBIT_SPEED * dt;
        changed = true;
    }
    if keys.pressed(KeyCode::ArrowUp) {
        orbit.pitch = (orbit.pitch + ORBIT_SPEED * dt).min(1.5);
        changed = true;
    }
    if keys.pressed(KeyCode::ArrowDown) {
        orbit.pitch = (orbit.pitch - ORBIT_SPEED * dt).max(-1.5);
        changed = true;
    }
    if keys.pressed(KeyCode::Equal) || keys.pressed(KeyCode::NumpadAdd) {
        orbit.distance = (orbit.distance - ZOOM_SPEED * dt).max(MIN_DISTANCE);
        changed = true;
    }
    if keys.pressed(KeyCode::Minus) || keys.pressed(KeyCode::NumpadSubtract) {
        orbit.distance = (orbit.distance + ZOOM_SPEED * dt).min(MAX_DISTANCE);
        changed = true;
    }

    if !changed {
        return;
    }
    for mut transform in &mut camera {
        *transform = orbit_transform(&orbit);
    }
}

// =========================================================================================
// Draw 3D axes for visual reference
// =========================================================================================

fn spawn_axes(commands: &mut Commands, meshes: &mut Assets<Mesh>, materials: &mut Assets<StandardMaterial>) {
    let axis_len = 400.0;
    let axis_thickness = 0.4;

    let axes = [
        (Cuboid::new(axis_len, axis_thickness, axis_thickness), Color::srgb(0.6, 0.1, 0.1)), // x
        (Cuboid::new(axis_thickness, axis_len, axis_thickness), Color::srgb(0.1, 0.6, 0.1)), // y
        (Cuboid::new(axis_thickness, axis_thickness, axis_len), Color::srgb(0.1, 0.1, 0.6)), // z
    ];

    for (cuboid, color) in axes {
        // Cuboid is centered at its transform origin, so it crosses the world origin
        commands.spawn(PbrBundle {
            mesh: meshes.add(cuboid.mesh()),
            material: materials.add(StandardMaterial {
                base_color: color,
                unlit: true,
                ..Default::default()
            }),
            transform: Transform::from_xyz(0.0, 0.0, 0.0),
            ..Default::default()
        });
    }
}
