//! Avian 3D physics backend implementation.
//!
//! This module provides the physics backend for Avian (`avian3d`). Enable
//! with the `avian3d` feature. Besides the rigid-body velocity handle it
//! registers the sensor systems that feed the motor: the ground probe, the
//! slope cross-check, the step probe and the clearance probes, all built on
//! `SpatialQuery` casts.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::backend::CharacterPhysicsBackend;
use crate::config::MotorConfig;
use crate::detection::{angle_from_up, GroundSample, StepSample, GROUND_CONTACT_DISTANCE};
use crate::intent::MovementIntent;
use crate::motor::CharacterMotor;
use crate::state::MotionState;
use crate::CharacterMotorSet;

/// Avian 3D physics backend for the character motor.
pub struct Avian3dBackend;

impl CharacterPhysicsBackend for Avian3dBackend {
    fn plugin() -> impl Plugin {
        Avian3dBackendPlugin
    }

    fn get_velocity(world: &World, entity: Entity) -> Vec3 {
        world
            .get::<LinearVelocity>(entity)
            .map(|velocity| velocity.0)
            .unwrap_or(Vec3::ZERO)
    }

    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec3) {
        if let Some(mut stored) = world.get_mut::<LinearVelocity>(entity) {
            stored.0 = velocity;
        }
    }

    fn get_fixed_timestep(world: &World) -> f32 {
        world
            .get_resource::<Time<Fixed>>()
            .map(|time| time.delta_secs())
            .filter(|&dt| dt > 0.0)
            .unwrap_or(1.0 / 60.0)
    }
}

/// Plugin that sets up the Avian-specific systems for the character motor.
pub struct Avian3dBackendPlugin;

impl Plugin for Avian3dBackendPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (avian_ground_probe, avian_step_probe, avian_clearance_probe)
                .chain()
                .in_set(CharacterMotorSet::Sensors),
        );
        app.add_systems(
            FixedUpdate,
            (avian_update_friction, avian_crouch_collider)
                .in_set(CharacterMotorSet::FinalApplication),
        );
    }
}

/// Capsule radius and full height (segment plus both caps) of a collider.
///
/// The motor only supports capsule characters; other shapes are skipped by
/// the sensor systems.
pub fn capsule_dims(collider: &Collider) -> Option<(f32, f32)> {
    let capsule = collider.shape_scaled().as_capsule()?;
    let segment = (capsule.segment.a.y - capsule.segment.b.y).abs();
    Some((capsule.radius, segment + 2.0 * capsule.radius))
}

fn ground_filter(config: &MotorConfig, entity: Entity) -> SpatialQueryFilter {
    SpatialQueryFilter::from_mask(config.grounding.layers).with_excluded_entities([entity])
}

/// Ground probe: a downward ray over the standing height plus a sphere cast
/// from just above the feet; the smaller corrected distance wins. A second
/// short ray provides the independent slope sample.
fn avian_ground_probe(
    spatial_query: SpatialQuery,
    mut q_motors: Query<(
        Entity,
        &GlobalTransform,
        &MotorConfig,
        &mut CharacterMotor,
        &Collider,
    )>,
) {
    for (entity, transform, config, mut motor, collider) in &mut q_motors {
        let Some((radius, height)) = capsule_dims(collider) else {
            warn_once!("character motor on {entity} has a non-capsule collider; probes skipped");
            continue;
        };

        let position = transform.translation();
        let rotation = transform.to_scale_rotation_translation().1;
        let up = rotation * Vec3::Y;
        let standing = if motor.standing_height > 0.0 {
            motor.standing_height
        } else {
            height
        };
        let feet = position - Vec3::Y * (height / 2.0);
        let filter = ground_filter(config, entity);

        let mut distance = f32::MAX;
        let mut normal = Vec3::Y;
        let mut point = Vec3::ZERO;
        let mut ground_entity = None;
        let mut found = false;

        // Ray over the standing height, measured back to the feet plane.
        let ray_origin = feet + Vec3::Y * (standing / 2.0);
        if let Some(hit) = spatial_query.cast_ray(
            ray_origin,
            Dir3::NEG_Y,
            standing / 2.0 + 2.0,
            true,
            &filter,
        ) {
            point = ray_origin - Vec3::Y * hit.distance;
            distance = feet.y - point.y;
            normal = hit.normal;
            ground_entity = Some(hit.entity);
            found = true;
        }

        // Sphere cast around the capsule base; its corrected distance wins
        // when smaller, and its hit data always replaces the ray's.
        let sphere_origin = feet + Vec3::Y * radius;
        let sphere = Collider::sphere(radius * 0.9);
        if let Some(hit) = spatial_query.cast_shape(
            &sphere,
            sphere_origin,
            Quat::IDENTITY,
            Dir3::NEG_Y,
            &ShapeCastConfig::from_max_distance(radius + 2.0),
            &filter,
        ) {
            let corrected = hit.distance - radius * 0.1;
            if distance > corrected {
                distance = corrected;
            }
            normal = hit.normal1;
            point = hit.point1;
            ground_entity = Some(hit.entity);
            found = true;
        }

        motor.ground = if found {
            GroundSample::hit(distance, normal, point, ground_entity)
        } else {
            GroundSample::miss()
        };

        // Independent slope sample: a short ray straight down the body axis.
        let cross_origin = feet + up * GROUND_CONTACT_DISTANCE;
        let down = Dir3::new(-up).unwrap_or(Dir3::NEG_Y);
        motor.slope_cross_angle = spatial_query
            .cast_ray(cross_origin, down, 1.0, true, &filter)
            .map(|hit| angle_from_up(hit.normal));
    }
}

/// Step probe: a short downward ray ahead of the capsule in the movement
/// direction, over the steppable height window. Trigger colliders are
/// ignored.
fn avian_step_probe(
    spatial_query: SpatialQuery,
    mut q_motors: Query<(
        Entity,
        &GlobalTransform,
        &MotorConfig,
        &MotionState,
        &MovementIntent,
        &mut CharacterMotor,
        &Collider,
    )>,
    q_triggers: Query<(), With<Sensor>>,
) {
    for (entity, transform, config, state, intent, mut motor, collider) in &mut q_motors {
        motor.step = None;

        if intent.move_amount().sqrt() < 0.1 || !state.grounded {
            continue;
        }
        let window = config.stepping.offset_end - config.stepping.offset_start;
        if window <= 0.0 {
            continue;
        }
        let Some((radius, height)) = capsule_dims(collider) else {
            continue;
        };

        let position = transform.translation();
        let rotation = transform.to_scale_rotation_translation().1;
        let forward = rotation * Vec3::NEG_Z;
        let right = rotation * Vec3::X;
        let movement_direction = if state.strafing && intent.move_amount() > 0.0 {
            (right * intent.axes.x + forward * intent.axes.y).normalize_or_zero()
        } else {
            forward
        };

        let feet = position - Vec3::Y * (height / 2.0);
        let origin =
            feet + Vec3::Y * config.stepping.offset_end + movement_direction * (radius + 0.05);
        let filter = ground_filter(config, entity);

        // Boundary cast (solid = false): when the ray starts inside a tall
        // wall it exits through the far side instead of hitting at distance
        // zero, so walls never read as steps.
        if let Some(hit) = spatial_query.cast_ray(origin, Dir3::NEG_Y, window, false, &filter) {
            if q_triggers.contains(hit.entity) {
                continue;
            }
            let point = origin - Vec3::Y * hit.distance;
            if point.y >= feet.y && point.y <= feet.y + config.stepping.offset_end {
                motor.step = Some(StepSample {
                    point,
                    offset: point - feet,
                    height: point.y - feet.y,
                });
            }
        }
    }
}

/// Clearance probes: headroom above the feet (for standing up from a
/// crouch) and a forward capsule cast (gates air control).
fn avian_clearance_probe(
    spatial_query: SpatialQuery,
    mut q_motors: Query<(
        Entity,
        &GlobalTransform,
        &MotorConfig,
        &mut CharacterMotor,
        &Collider,
    )>,
) {
    for (entity, transform, config, mut motor, collider) in &mut q_motors {
        let Some((radius, height)) = capsule_dims(collider) else {
            continue;
        };

        let position = transform.translation();
        let rotation = transform.to_scale_rotation_translation().1;
        let standing = if motor.standing_height > 0.0 {
            motor.standing_height
        } else {
            height
        };
        let feet = position - Vec3::Y * (height / 2.0);
        let filter = ground_filter(config, entity);

        // Start just above the feet so solver penetration into the floor
        // never reads as a blocked ceiling.
        let headroom_origin = feet + Vec3::Y * GROUND_CONTACT_DISTANCE;
        motor.headroom_clear = spatial_query
            .cast_ray(headroom_origin, Dir3::Y, standing, true, &filter)
            .is_none();

        let forward = Dir3::new(rotation * Vec3::NEG_Z).unwrap_or(Dir3::NEG_Z);
        let probe = Collider::capsule(radius * 0.5, height);
        motor.forward_clear = spatial_query
            .cast_shape(
                &probe,
                position,
                Quat::IDENTITY,
                forward,
                &ShapeCastConfig::from_max_distance(0.6),
                &filter,
            )
            .is_none();
    }
}

/// Swap the friction profile with the motion state: full grip when idle,
/// moderate grip when moving, frictionless in the air so the capsule never
/// sticks to walls and ledges.
fn avian_update_friction(
    mut q_motors: Query<(&CharacterMotor, &MotionState, &mut Friction)>,
) {
    for (motor, state, mut friction) in &mut q_motors {
        *friction = if state.grounded && motor.move_amount == 0.0 {
            Friction::new(1.0).with_combine_rule(CoefficientCombine::Max)
        } else if state.grounded {
            Friction::new(0.25).with_combine_rule(CoefficientCombine::Multiply)
        } else {
            Friction::new(0.0).with_combine_rule(CoefficientCombine::Min)
        };
    }
}

/// Lerp the capsule height toward the crouch target and keep the feet
/// planted while the center moves.
fn avian_crouch_collider(
    time: Res<Time>,
    mut q_motors: Query<(
        &mut Collider,
        &mut Transform,
        &MotorConfig,
        &mut CharacterMotor,
        &MotionState,
    )>,
) {
    let dt = time.delta_secs();
    for (mut collider, mut transform, config, mut motor, state) in &mut q_motors {
        let Some((radius, height)) = capsule_dims(&collider) else {
            continue;
        };
        if motor.standing_height <= 0.0 {
            motor.standing_height = height;
        }

        let ratio = config.crouching.height_ratio.clamp(0.05, 1.0);
        let target = if state.crouching {
            motor.standing_height * ratio
        } else {
            motor.standing_height
        };
        if (height - target).abs() <= 1e-3 {
            continue;
        }

        let t = (config.crouching.smooth * dt).clamp(0.0, 1.0);
        let new_height = height + (target - height) * t;
        let segment = (new_height - 2.0 * radius).max(0.01);
        *collider = Collider::capsule(radius, segment);
        transform.translation.y += (new_height - height) / 2.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capsule_dims_reads_radius_and_full_height() {
        let collider = Collider::capsule(0.3, 1.2);
        let (radius, height) = capsule_dims(&collider).expect("capsule shape");
        assert!((radius - 0.3).abs() < 1e-5);
        assert!((height - 1.8).abs() < 1e-5);
    }

    #[test]
    fn capsule_dims_rejects_other_shapes() {
        assert!(capsule_dims(&Collider::sphere(0.5)).is_none());
        assert!(capsule_dims(&Collider::cuboid(1.0, 1.0, 1.0)).is_none());
    }
}
