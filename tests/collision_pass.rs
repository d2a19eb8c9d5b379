//! A full collision pass, as run by the embedding game each frame: move the
//! items, find the candidates in the map, confirm them with the shapes, put
//! each item back against the side it came from and exchange speeds.

use platform_physics::{
    integrate, settle, CollisionAlignPolicy, CollisionRepair, ContactRange, ContactSide, CurvedBox,
    Participant, PhysicalItemState, PhysicsConfig, Rectangle, Shape, StaticMap, Vec2, Zone, AABB,
};

const EPSILON: f64 = 1e-9;
const DT: f64 = 0.1;

fn ground() -> PhysicalItemState {
    let mut ground =
        PhysicalItemState::with_shape(Rectangle::new(Vec2::ZERO, Vec2::new(200.0, 10.0)));
    ground.fix();
    ground
}

fn falling_crate(x: f64, y: f64, speed: Vec2) -> PhysicalItemState {
    let mut item =
        PhysicalItemState::with_shape(Rectangle::new(Vec2::new(x, y), Vec2::new(10.0, 10.0)));
    item.set_mass(1.0);
    item.set_friction(1.0);
    item.set_speed(speed);
    item
}

/// Moves `item` and resolves its collisions with the fixed `statics`.
/// Returns the number of repaired collisions.
fn step(
    item: &mut PhysicalItemState,
    statics: &mut [PhysicalItemState],
    map: &StaticMap<(usize, AABB)>,
    policy: &CollisionAlignPolicy,
    config: &PhysicsConfig,
) -> usize {
    let previous = item.bounding_box();
    item.clear_contacts();
    integrate(item, DT);

    let mut candidates = Vec::new();
    map.get_area_unique(&item.bounding_box(), &mut candidates);

    let mut repaired = 0;
    for &(index, _) in candidates {
        let obstacle = &mut statics[index];
        if !obstacle.shape().intersects(item.shape()) {
            continue;
        }

        let side = ContactSide::from(Zone::find(&previous, &obstacle.bounding_box()));
        let mut repair = CollisionRepair::new(obstacle, item);
        if repair.align_on_side(Participant::First, side, policy, config.position_epsilon) {
            repair.apply();
            repaired += 1;
        }
    }

    settle(item, config.speed_epsilon, config.angular_speed_epsilon);
    repaired
}

fn build_map(config: &PhysicsConfig, statics: &[PhysicalItemState]) -> StaticMap<(usize, AABB)> {
    let mut map = config
        .static_map(1000.0, 1000.0)
        .expect("default configuration is valid");
    for (index, item) in statics.iter().enumerate() {
        map.insert((index, item.bounding_box()));
    }
    map
}

#[test]
fn test_crate_lands_on_ground() {
    let config = PhysicsConfig::default();
    let policy = config.align_policy();
    let mut statics = vec![ground()];
    let map = build_map(&config, &statics);

    let mut item = falling_crate(50.0, 10.5, Vec2::new(0.0, -20.0));
    item.set_acceleration(Vec2::new(0.0, -10.0));

    let repaired = step(&mut item, &mut statics, &map, &policy, &config);

    assert_eq!(repaired, 1);
    assert!((item.bottom() - (10.0 + config.position_epsilon)).abs() < EPSILON);
    assert_eq!(item.left(), 50.0);
    // The ground does not bounce: the vertical speed is absorbed.
    assert!(item.speed().y.abs() < EPSILON);

    assert!(item.has_bottom_contact());
    assert_eq!(item.bottom_contact(), ContactRange::full());
    assert!(statics[0].has_top_contact());

    // The fixed ground has not moved.
    assert_eq!(statics[0].bottom_left(), Vec2::ZERO);
    assert_eq!(statics[0].speed(), Vec2::ZERO);
}

#[test]
fn test_crate_resting_on_ground_stays_there() {
    let config = PhysicsConfig::default();
    let policy = config.align_policy();
    let mut statics = vec![ground()];
    let map = build_map(&config, &statics);

    let mut item = falling_crate(50.0, 10.5, Vec2::new(0.0, -20.0));
    item.set_acceleration(Vec2::new(0.0, -10.0));

    for _ in 0..10 {
        step(&mut item, &mut statics, &map, &policy, &config);
    }

    assert!(item.bottom() >= 10.0);
    assert!(item.bottom() < 10.0 + 1.0);
    assert!(item.has_bottom_contact());
}

#[test]
fn test_crate_hits_wall_from_the_left() {
    let config = PhysicsConfig::default();
    let policy = config.align_policy();

    let mut wall =
        PhysicalItemState::with_shape(Rectangle::new(Vec2::new(100.0, 0.0), Vec2::new(20.0, 100.0)));
    wall.fix();
    let mut statics = vec![wall];
    let map = build_map(&config, &statics);

    let mut item = falling_crate(85.0, 20.0, Vec2::new(100.0, 0.0));

    let repaired = step(&mut item, &mut statics, &map, &policy, &config);

    assert_eq!(repaired, 1);
    assert!((item.right() - (100.0 - config.position_epsilon)).abs() < EPSILON);
    assert_eq!(item.bottom(), 20.0);
    assert_eq!(item.speed(), Vec2::ZERO);
    assert!(item.has_right_contact());
    assert!(statics[0].has_left_contact());
}

#[test]
fn test_range_contacts_from_configuration() {
    let config = PhysicsConfig::from_json(r#"{ "default_contact_mode": "range_contact" }"#)
        .expect("valid configuration");
    let policy = config.align_policy();
    let mut statics = vec![ground()];
    let map = build_map(&config, &statics);

    let mut item = falling_crate(50.0, 10.5, Vec2::new(0.0, -20.0));

    step(&mut item, &mut statics, &map, &policy, &config);

    // The crate covers x in [50, 60] of the 200 wide ground.
    let top = statics[0].top_contact();
    assert!((top.min() - 0.25).abs() < EPSILON);
    assert!((top.max() - 0.3).abs() < EPSILON);
    assert_eq!(item.bottom_contact(), ContactRange::full());
}

#[test]
fn test_crate_far_from_obstacles_is_untouched() {
    let config = PhysicsConfig::default();
    let policy = config.align_policy();
    let mut statics = vec![ground()];
    let map = build_map(&config, &statics);

    let mut item = falling_crate(500.0, 500.0, Vec2::new(30.0, 0.0));

    let repaired = step(&mut item, &mut statics, &map, &policy, &config);

    assert_eq!(repaired, 0);
    assert!(!item.has_contact());
    assert!((item.left() - 503.0).abs() < EPSILON);
}

#[test]
fn test_crate_settles_on_slope() {
    let config = PhysicsConfig::default();
    let policy = config.align_policy();

    // Rises from y = 0 at x = 100 to y = 50 at x = 200.
    let mut slope = PhysicalItemState::with_shape(
        CurvedBox::new(Vec2::new(100.0, 0.0), Vec2::new(100.0, 50.0)).with_steepness(50.0),
    );
    slope.fix();

    let mut item = falling_crate(145.0, 24.0, Vec2::ZERO);
    assert!(slope.shape().intersects(item.shape()));

    // Put the crate on the curve under its middle.
    let Shape::CurvedBox(curve) = slope.shape() else {
        panic!("slope is a curved box");
    };
    let ground_y = curve.get_y_at_x(item.horizontal_middle());
    assert!((ground_y - 25.0).abs() < 1e-6);

    let position = Vec2::new(item.left(), ground_y + config.position_epsilon);
    let mut repair = CollisionRepair::new(&mut slope, &mut item);
    assert!(repair.align(Participant::First, ContactSide::Top, position, &policy));
    repair.apply();

    assert!((item.bottom() - (25.0 + config.position_epsilon)).abs() < 1e-6);
    assert!(item.has_bottom_contact());
    assert!(!slope.shape().intersects(item.shape()));
}
