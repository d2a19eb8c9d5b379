//! Property tests on the invariants of the physics core.
//!
//! Run with: cargo test --test properties

use std::collections::BTreeSet;

use platform_physics::{
    CollisionRepair, ContactRange, Participant, PhysicalItemState, Rectangle, StaticMap, Vec2,
    AABB,
};
use proptest::prelude::*;

const EPSILON: f64 = 1e-9;

// =============================================================================
// Strategies
// =============================================================================

fn arb_coordinate() -> impl Strategy<Value = f64> {
    -1000.0..1000.0f64
}

fn arb_length() -> impl Strategy<Value = f64> {
    0.1..200.0f64
}

fn arb_rectangle() -> impl Strategy<Value = Rectangle> {
    (arb_coordinate(), arb_coordinate(), arb_length(), arb_length())
        .prop_map(|(x, y, w, h)| Rectangle::new(Vec2::new(x, y), Vec2::new(w, h)))
}

/// A box lying in `[0, 1000] x [0, 1000]`.
fn arb_box_in_domain() -> impl Strategy<Value = AABB> {
    (0.0..900.0f64, 0.0..900.0f64, 0.0..100.0f64, 0.0..100.0f64)
        .prop_map(|(x, y, w, h)| AABB::from_bottom_left(Vec2::new(x, y), w, h))
}

/// A box that may lie partly or wholly outside `[0, 1000] x [0, 1000]`.
fn arb_box_anywhere() -> impl Strategy<Value = AABB> {
    (-500.0..1500.0f64, -500.0..1500.0f64, 0.0..200.0f64, 0.0..200.0f64)
        .prop_map(|(x, y, w, h)| AABB::from_bottom_left(Vec2::new(x, y), w, h))
}

/// Sorted cut positions of `[0, length]`, both ends included.
fn bounds(mut cuts: Vec<f64>, length: f64) -> Vec<f64> {
    cuts.push(0.0);
    cuts.push(length);
    cuts.sort_by(|a, b| a.total_cmp(b));
    cuts.dedup();
    cuts
}

fn unit_mass_item(rect: Rectangle) -> PhysicalItemState {
    let mut state = PhysicalItemState::with_shape(rect);
    state.set_mass(1.0);
    state
}

// =============================================================================
// Contacts
// =============================================================================

proptest! {
    #[test]
    fn contact_range_empty_iff_max_not_above_min(min in -2.0..2.0f64, max in -2.0..2.0f64) {
        let range = ContactRange::new(min, max);
        prop_assert_eq!(range.empty(), max <= min);
    }

    #[test]
    fn cleared_contact_range_is_empty(min in -2.0..2.0f64, max in -2.0..2.0f64) {
        let mut range = ContactRange::new(min, max);
        range.clear();
        prop_assert!(range.empty());
    }

    #[test]
    fn left_contact_range_is_clamped_fraction(
        rect in arb_rectangle(),
        a in -1500.0..1500.0f64,
        span in 0.0..500.0f64,
    ) {
        let mut state = PhysicalItemState::with_shape(rect);
        let b = a + span;
        state.set_left_contact_range(a, b);

        let range = state.left_contact();
        let expected_min = ((a - state.bottom()) / state.height()).clamp(0.0, 1.0);
        let expected_max = ((b - state.bottom()) / state.height()).clamp(0.0, 1.0);
        prop_assert!((range.min() - expected_min).abs() < EPSILON);
        prop_assert!((range.max() - expected_max).abs() < EPSILON);
        prop_assert!(range.min() >= 0.0 && range.max() <= 1.0);
    }

    #[test]
    fn clear_contacts_resets_contacts_and_friction(
        rect in arb_rectangle(),
        friction in 0.0..1.0f64,
        middle in any::<bool>(),
    ) {
        let mut state = PhysicalItemState::with_shape(rect);
        state.set_left_contact(true);
        state.set_bottom_contact(true);
        state.set_middle_contact(middle);
        state.set_contact_friction(friction);

        state.clear_contacts();

        prop_assert!(!state.has_contact());
        prop_assert_eq!(state.contact_friction(), 1.0);
    }
}

// =============================================================================
// Geometry and constraints
// =============================================================================

proptest! {
    #[test]
    fn bounding_box_round_trip(rect in arb_rectangle(), target in arb_rectangle()) {
        let mut state = PhysicalItemState::with_shape(rect);
        let wanted = target.bounding_box();
        state.set_bounding_box(&wanted);

        let got = state.bounding_box();
        prop_assert!(got.bottom_left().abs_diff_eq(wanted.bottom_left(), 1e-6));
        prop_assert!(got.size().abs_diff_eq(wanted.size(), 1e-6));
    }

    #[test]
    fn balanced_constraints_unlock_the_item(count in 1u32..20, x in arb_coordinate()) {
        let mut state = PhysicalItemState::with_shape(Rectangle::new(Vec2::ZERO, Vec2::new(1.0, 1.0)));

        for _ in 0..count {
            state.add_position_constraint_x();
        }
        for _ in 0..count - 1 {
            state.remove_position_constraint_x();
        }
        state.set_left(x);
        prop_assert_eq!(state.left(), 0.0);

        state.remove_position_constraint_x();
        state.set_left(x);
        prop_assert_eq!(state.left(), x);
    }
}

// =============================================================================
// Broad phase
// =============================================================================

proptest! {
    #[test]
    fn map_query_finds_every_meeting_item(
        boxes in prop::collection::vec(arb_box_in_domain(), 0..40),
        area in arb_box_in_domain(),
        box_size in 10.0..300.0f64,
    ) {
        let mut map = StaticMap::new(1000.0, 1000.0, box_size);
        for (index, b) in boxes.iter().enumerate() {
            map.insert((index, *b));
        }

        let mut found = Vec::new();
        map.get_area_unique(&area, &mut found);
        let found_indices: BTreeSet<usize> = found.iter().map(|(index, _)| *index).collect();

        // Each item is returned once.
        prop_assert_eq!(found.len(), found_indices.len());

        // The candidates may hold more, but never miss a meeting item.
        for (index, b) in boxes.iter().enumerate() {
            if b.intersects(&area) {
                prop_assert!(found_indices.contains(&index), "item {} missed", index);
            }
        }
    }

    #[test]
    fn map_holds_every_item_once(
        boxes in prop::collection::vec(arb_box_in_domain(), 0..40),
        box_size in 10.0..300.0f64,
    ) {
        let mut map = StaticMap::new(1000.0, 1000.0, box_size);
        for (index, b) in boxes.iter().enumerate() {
            map.insert((index, *b));
        }

        let mut all = Vec::new();
        map.get_all_unique(&mut all);
        let indices: BTreeSet<usize> = all.iter().map(|(index, _)| *index).collect();
        prop_assert_eq!(all.len(), boxes.len());
        prop_assert_eq!(indices.len(), boxes.len());
    }

    #[test]
    fn partition_of_the_domain_finds_every_item(
        boxes in prop::collection::vec(arb_box_anywhere(), 0..40),
        cuts_x in prop::collection::vec(0.0..1000.0f64, 0..5),
        cuts_y in prop::collection::vec(0.0..1000.0f64, 0..5),
        box_size in 10.0..300.0f64,
    ) {
        let mut map = StaticMap::new(1000.0, 1000.0, box_size);
        for (index, b) in boxes.iter().enumerate() {
            map.insert((index, *b));
        }

        let mut all = Vec::new();
        map.get_all_unique(&mut all);
        let all_indices: BTreeSet<usize> = all.iter().map(|(index, _)| *index).collect();

        let xs = bounds(cuts_x, 1000.0);
        let ys = bounds(cuts_y, 1000.0);
        let mut union = BTreeSet::new();
        for x in xs.windows(2) {
            for y in ys.windows(2) {
                let part = AABB::new(Vec2::new(x[0], y[0]), Vec2::new(x[1], y[1]));
                let mut found = Vec::new();
                map.get_area_unique(&part, &mut found);
                union.extend(found.iter().map(|(index, _)| *index));
            }
        }

        prop_assert_eq!(union, all_indices);
    }
}

// =============================================================================
// Collision repair
// =============================================================================

proptest! {
    #[test]
    fn separating_items_keep_their_speed(
        a_speed in -50.0..50.0f64,
        gap in 0.0..50.0f64,
    ) {
        let mut a = unit_mass_item(Rectangle::new(Vec2::ZERO, Vec2::new(1.0, 1.0)));
        let mut b = unit_mass_item(Rectangle::new(Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)));
        // `b` moves away from `a` along the normal at least as fast.
        a.set_speed(Vec2::new(a_speed, 0.0));
        b.set_speed(Vec2::new(a_speed + gap, 0.0));

        let mut repair = CollisionRepair::new(&mut a, &mut b);
        repair.set_contact_normal(Participant::Second, Vec2::new(1.0, 0.0));
        repair.apply();

        prop_assert_eq!(a.speed(), Vec2::new(a_speed, 0.0));
        prop_assert_eq!(b.speed(), Vec2::new(a_speed + gap, 0.0));
    }
}
