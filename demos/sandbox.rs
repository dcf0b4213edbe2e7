//! Sandbox demo
//!
//! A third person character in a small test yard: flat ground, a stair
//! ramp inside the step-assist window, a walkable slope and a steep slide
//! slope.
//!
//! ## Controls
//! - **W/A/S/D**: Move
//! - **Space**: Jump
//! - **Left Shift** (hold): Sprint
//! - **C**: Toggle crouch
//!
//! ## Running
//! ```bash
//! cargo run --example sandbox
//! ```

use avian3d::prelude::*;
use bevy::prelude::*;
use tpc_character_controller::prelude::*;

const CAPSULE_RADIUS: f32 = 0.3;
const CAPSULE_SEGMENT: f32 = 1.2;
const SPAWN: Vec3 = Vec3::new(0.0, 2.0, 0.0);
const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 3.0, 7.0);

#[derive(Component)]
struct Player;

#[derive(Component)]
struct FollowCamera;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(PhysicsPlugins::default())
        .add_plugins(CharacterMotorPlugin::<Avian3dBackend>::default())
        .add_plugins(InputSourcePlugin::<KeyboardSource>::default())
        .init_resource::<KeyboardSource>()
        .add_systems(Startup, setup)
        .add_systems(PreUpdate, pump_keyboard)
        .add_systems(PostUpdate, follow_player)
        .run();
}

// ==================== Input ====================

/// Keyboard-backed input source for the motor.
#[derive(Resource, Default)]
struct KeyboardSource {
    axes: Vec2,
    sprint: bool,
    jump: bool,
    crouch: bool,
}

impl InputSource for KeyboardSource {
    fn axis(&self, axis: InputAxis) -> f32 {
        match axis {
            InputAxis::MoveHorizontal => self.axes.x,
            InputAxis::MoveVertical => self.axes.y,
        }
    }

    fn held(&self, button: InputButton) -> bool {
        matches!(button, InputButton::Sprint) && self.sprint
    }

    fn just_pressed(&self, button: InputButton) -> bool {
        match button {
            InputButton::Jump => self.jump,
            InputButton::Crouch => self.crouch,
            InputButton::Sprint => false,
        }
    }
}

fn pump_keyboard(keys: Res<ButtonInput<KeyCode>>, mut source: ResMut<KeyboardSource>) {
    let mut axes = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) {
        axes.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        axes.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        axes.x += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        axes.x -= 1.0;
    }
    source.axes = axes;
    source.sprint = keys.pressed(KeyCode::ShiftLeft);
    source.jump = keys.just_pressed(KeyCode::Space);
    source.crouch = keys.just_pressed(KeyCode::KeyC);
}

// ==================== Setup ====================

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    spawn_yard(&mut commands, &mut meshes, &mut materials);

    // Camera
    let camera = commands
        .spawn((
            Camera3d::default(),
            Transform::from_translation(SPAWN + CAMERA_OFFSET).looking_at(SPAWN, Vec3::Y),
            FollowCamera,
        ))
        .id();

    // Light
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(6.0, 12.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Player
    commands.spawn((
        Player,
        Mesh3d(meshes.add(Capsule3d::new(CAPSULE_RADIUS, CAPSULE_SEGMENT))),
        MeshMaterial3d(materials.add(Color::srgb(0.8, 0.6, 0.2))),
        Transform::from_translation(SPAWN),
        RigidBody::Dynamic,
        Collider::capsule(CAPSULE_RADIUS, CAPSULE_SEGMENT),
        LockedAxes::ROTATION_LOCKED,
        Friction::new(0.25),
        CharacterMotor::new(),
        MotorConfig::default(),
        CharacterHealth::new(100).with_fall_damage([FallDamageBand {
            min_height: 4.0,
            max_height: 50.0,
            damage: 25,
        }]),
        MotionReference(camera),
    ));

    commands.spawn((
        Text::new("WASD: Move | Space: Jump | Shift: Sprint | C: Crouch"),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
    ));
}

fn spawn_yard(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    let ground = materials.add(Color::srgb(0.35, 0.4, 0.35));
    let stone = materials.add(Color::srgb(0.5, 0.45, 0.4));

    // Floor
    spawn_block(
        commands,
        meshes,
        ground.clone(),
        Vec3::new(0.0, -0.5, 0.0),
        Vec3::new(40.0, 1.0, 40.0),
        Quat::IDENTITY,
    );

    // Stairs inside the step window (0.2 per step).
    for i in 0..4 {
        spawn_block(
            commands,
            meshes,
            stone.clone(),
            Vec3::new(4.0, 0.1 + 0.2 * i as f32, -4.0 - 0.6 * i as f32),
            Vec3::new(3.0, 0.2 + 0.4 * i as f32, 0.6),
            Quat::IDENTITY,
        );
    }

    // Walkable slope (30 degrees).
    spawn_block(
        commands,
        meshes,
        stone.clone(),
        Vec3::new(-6.0, 1.0, -6.0),
        Vec3::new(8.0, 0.4, 4.0),
        Quat::from_rotation_z(30.0_f32.to_radians()),
    );

    // Slide slope (60 degrees).
    spawn_block(
        commands,
        meshes,
        stone,
        Vec3::new(-6.0, 2.0, 4.0),
        Vec3::new(8.0, 0.4, 4.0),
        Quat::from_rotation_z(60.0_f32.to_radians()),
    );
}

fn spawn_block(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    material: Handle<StandardMaterial>,
    position: Vec3,
    size: Vec3,
    rotation: Quat,
) {
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
        MeshMaterial3d(material),
        Transform::from_translation(position).with_rotation(rotation),
        RigidBody::Static,
        Collider::cuboid(size.x, size.y, size.z),
    ));
}

// ==================== Camera ====================

fn follow_player(
    q_player: Query<&Transform, (With<Player>, Without<FollowCamera>)>,
    mut q_camera: Query<&mut Transform, With<FollowCamera>>,
) {
    let Ok(player) = q_player.single() else {
        return;
    };
    for mut camera in &mut q_camera {
        let goal = player.translation + CAMERA_OFFSET;
        camera.translation = camera.translation.lerp(goal, 0.1);
        camera.look_at(player.translation + Vec3::Y, Vec3::Y);
    }
}
