use crate::math::vec2::Vec2;
use crate::objects::PhysicalItemState;

/// Moves the item forward in time using Semi-Implicit Euler.
///
/// Fixed items are not moved. Every write goes through the state's setters so
/// the position constraints apply.
pub fn integrate(state: &mut PhysicalItemState, elapsed_time: f64) {
    if state.is_fixed() || elapsed_time <= 0.0 {
        return;
    }

    // --- Linear Motion --- //
    // a = a0 + F/m, an infinite mass feeling no force
    let mass = state.mass();
    let force_acceleration = if mass.is_infinite() {
        Vec2::ZERO
    } else {
        state.force() / mass
    };
    let acceleration = state.acceleration() + force_acceleration;

    // v = (v + a*dt) * friction
    let friction = state.friction() * state.contact_friction();
    let speed = (state.speed() + acceleration * elapsed_time) * friction;
    state.set_speed(speed);

    // p = p + v*dt
    let position = state.bottom_left() + state.speed() * elapsed_time;
    state.set_bottom_left(position);

    // --- Angular Motion --- //
    if state.has_free_system() {
        let angle = state.system_angle() + state.angular_speed() * elapsed_time;
        state.set_system_angle(angle);
    }
}

/// Stops the movements too slow to be noticed: each speed component whose
/// magnitude is below its epsilon is set to zero.
pub fn settle(state: &mut PhysicalItemState, speed_epsilon: Vec2, angular_speed_epsilon: f64) {
    let speed = state.speed();
    let settled = Vec2::new(
        if speed.x.abs() < speed_epsilon.x { 0.0 } else { speed.x },
        if speed.y.abs() < speed_epsilon.y { 0.0 } else { speed.y },
    );
    if settled != speed {
        state.set_speed(settled);
    }

    if state.angular_speed().abs() < angular_speed_epsilon {
        state.set_angular_speed(0.0);
    }
}
