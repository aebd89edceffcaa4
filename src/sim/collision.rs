//! Collision detection and response
//!
//! Two cases: entities against the top/bottom field walls, and the ball
//! (a sphere) against a paddle (an axis-aligned box).

use glam::DVec3;

/// Contact between the ball and a box, ready to be resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Positional correction that puts the ball exactly on the surface
    pub push: DVec3,
    /// Separating axis from the closest surface point to the ball center (not normalized)
    pub normal: DVec3,
    /// Squared length of `normal`
    pub normal_len_sq: f64,
}

/// Clamp an entity between the field walls and bounce it.
///
/// Position is clamped to `±half_height ∓ extent_y/2`; a velocity still
/// heading out of bounds is negated. Returns true if the entity was clamped.
pub fn wall_collision(pos: &mut DVec3, vel: &mut DVec3, extent_y: f64, half_height: f64) -> bool {
    let top = half_height - extent_y / 2.0;
    let bottom = -half_height + extent_y / 2.0;
    let mut clamped = false;

    if pos.y > top {
        pos.y = top;
        if vel.y > 0.0 {
            vel.y = -vel.y;
        }
        clamped = true;
    }
    if pos.y < bottom {
        pos.y = bottom;
        if vel.y < 0.0 {
            vel.y = -vel.y;
        }
        clamped = true;
    }

    clamped
}

/// Check a sphere against an axis-aligned box
///
/// Returns a contact if the sphere overlaps the box. When the sphere center
/// lies on or inside the box the closest-point normal is zero; in that case
/// the ball is pushed out through the face of least penetration and that
/// face's unit normal is used instead.
pub fn ball_box_collision(
    ball_pos: DVec3,
    radius: f64,
    box_pos: DVec3,
    box_size: DVec3,
) -> Option<Contact> {
    let half = box_size / 2.0;
    let offset = ball_pos - box_pos;

    // Closest point on the box, relative to its center
    let closest = offset.clamp(-half, half);
    let d = offset - closest;

    let r_sq = radius * radius;
    let dist_sq = d.length_squared();
    if dist_sq >= r_sq {
        return None;
    }

    if dist_sq == 0.0 {
        return Some(embedded_contact(offset, radius, box_pos, half));
    }

    Some(Contact {
        push: d * ((r_sq / dist_sq).sqrt() - 1.0),
        normal: d,
        normal_len_sq: dist_sq,
    })
}

/// Ball center on or inside the box: exit through the nearest face
fn embedded_contact(offset: DVec3, radius: f64, box_pos: DVec3, half: DVec3) -> Contact {
    let gap = half - offset.abs();
    let axis = if gap.x <= gap.y && gap.x <= gap.z {
        0
    } else if gap.y <= gap.z {
        1
    } else {
        2
    };

    // Dead center on an axis: head back towards the field origin
    let sign = if offset[axis] > 0.0 {
        1.0
    } else if offset[axis] < 0.0 || box_pos[axis] > 0.0 {
        -1.0
    } else {
        1.0
    };

    let mut normal = DVec3::ZERO;
    normal[axis] = sign;

    let mut push = DVec3::ZERO;
    push[axis] = sign * (half[axis] + radius) - offset[axis];

    Contact {
        push,
        normal,
        normal_len_sq: 1.0,
    }
}

/// Reflect velocity about the (unnormalized) contact normal
///
/// Only applies while moving into the surface: v' = v - 2(v·d)/|d|² d.
/// Returns `None` if the ball is already separating.
#[inline]
pub fn reflect_velocity(velocity: DVec3, normal: DVec3, normal_len_sq: f64) -> Option<DVec3> {
    let dot = velocity.dot(normal);
    if dot < 0.0 {
        Some(velocity + normal * (-2.0 * dot / normal_len_sq))
    } else {
        None
    }
}

/// Apply a contact to the ball. Returns true if velocity was reflected.
pub fn resolve_contact(pos: &mut DVec3, vel: &mut DVec3, contact: &Contact) -> bool {
    *pos += contact.push;
    match reflect_velocity(*vel, contact.normal, contact.normal_len_sq) {
        Some(reflected) => {
            *vel = reflected;
            true
        }
        None => false,
    }
}
