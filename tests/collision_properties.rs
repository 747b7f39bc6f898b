//! Property tests for box overlap and the movement step.

use glam::Vec3;
use proptest::prelude::*;

use ascii_grove::core::{Aabb, CollisionIndex, MovementController, Orientation, PlayerKinematics};
use ascii_grove::types::{InputState, MAX_SPEED, PLAYER_HALF_EXTENT, TRUNK_RADIUS};

fn coord() -> impl Strategy<Value = f32> {
    -50.0f32..50.0
}

fn vec3() -> impl Strategy<Value = Vec3> {
    (coord(), coord(), coord()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn extent() -> impl Strategy<Value = Vec3> {
    (0.01f32..10.0, 0.01f32..10.0, 0.01f32..10.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn aabb() -> impl Strategy<Value = Aabb> {
    (vec3(), extent()).prop_map(|(c, h)| Aabb::from_center(c, h))
}

fn input() -> impl Strategy<Value = InputState> {
    any::<[bool; 6]>().prop_map(|f| InputState {
        forward: f[0],
        back: f[1],
        left: f[2],
        right: f[3],
        pan_left: f[4],
        pan_right: f[5],
    })
}

fn velocity() -> impl Strategy<Value = Vec3> {
    (-6.0f32..6.0, -6.0f32..6.0).prop_map(|(x, z)| Vec3::new(x, 0.0, z).clamp_length_max(MAX_SPEED))
}

proptest! {
    #[test]
    fn intersection_is_symmetric(a in aabb(), b in aabb()) {
        prop_assert_eq!(a.intersects(&b), b.intersects(&a));
    }

    #[test]
    fn intersection_is_reflexive(a in aabb()) {
        prop_assert!(a.intersects(&a));
    }

    #[test]
    fn speed_never_exceeds_max(
        steps in prop::collection::vec((input(), 0.0f32..0.5), 1..40),
        v in velocity(),
    ) {
        let controller = MovementController::new();
        let index = CollisionIndex::new();
        let mut kin = PlayerKinematics { position: Vec3::ZERO, velocity: v };
        let mut heading = Orientation::default();

        for (input, dt) in steps {
            controller.step(&input, dt, &mut kin, &mut heading, &index);
            prop_assert!(kin.speed() <= MAX_SPEED + 1e-4);
        }
    }

    #[test]
    fn speed_never_grows_without_input(v in velocity(), dt in 0.0f32..1.0, yaw in -3.0f32..3.0) {
        let controller = MovementController::new();
        let mut kin = PlayerKinematics { position: Vec3::ZERO, velocity: v };
        let before = kin.speed();
        controller.step(
            &InputState::default(),
            dt,
            &mut kin,
            &mut Orientation::new(yaw),
            &CollisionIndex::new(),
        );
        prop_assert!(kin.speed() <= before + 1e-5);
    }

    #[test]
    fn blocked_step_reverts_and_stops(v in velocity(), input in input(), dt in 0.001f32..0.1) {
        // An obstacle around the player guarantees every candidate collides.
        let mut index = CollisionIndex::new();
        index.insert(Aabb::from_center(Vec3::ZERO, Vec3::splat(20.0)));

        let controller = MovementController::new();
        let start = Vec3::new(1.0, 0.0, -2.0);
        let mut kin = PlayerKinematics { position: start, velocity: v };
        let outcome = controller.step(&input, dt, &mut kin, &mut Orientation::default(), &index);

        prop_assert!(outcome.collided);
        prop_assert_eq!(kin.position, start);
        prop_assert_eq!(kin.velocity, Vec3::ZERO);
    }
}

#[test]
fn trunk_at_origin_blocks_player_spawn() {
    let trunk = Aabb::new(
        Vec3::new(-TRUNK_RADIUS, 0.0, -TRUNK_RADIUS),
        Vec3::new(TRUNK_RADIUS, 10.0, TRUNK_RADIUS),
    );
    let player = Aabb::from_center(Vec3::new(0.0, 1.6, 0.0), PLAYER_HALF_EXTENT);
    assert!(trunk.intersects(&player));

    let mut index = CollisionIndex::new();
    index.insert(trunk);
    assert!(index.intersects(&player));
}
