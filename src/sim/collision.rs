//! Collision tests and responses for the ball
//!
//! Everything is AABB based: the ball collides as its bounding square, and a
//! response is a sign flip of one velocity axis (or a paddle re-aim).

use glam::Vec2;

use super::aabb::Aabb;

/// Which velocity axis a brick hit reflects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitAxis {
    /// Ball came from above or below; flip dy
    Vertical,
    /// Ball came from the side; flip dx
    Horizontal,
}

/// Classify a brick hit from where the ball was one tick earlier.
///
/// If the previous bounding box did not overlap the brick vertically, the
/// ball entered through the top or bottom face. Otherwise it entered through
/// a side. Corner entries (no overlap on either axis) count as vertical.
pub fn classify_brick_hit(previous_ball: &Aabb, brick: &Aabb) -> HitAxis {
    if previous_ball.overlaps_y(brick) {
        HitAxis::Horizontal
    } else {
        HitAxis::Vertical
    }
}

/// Side walls and ceiling crossed by a ball, as axis flips
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHit {
    pub flip_x: bool,
    pub flip_y: bool,
}

/// Check the ball against the left, right and top walls. The bottom is open.
///
/// An axis only flips while the ball is still moving into the wall it has
/// crossed, so a ball already heading back out is never turned around.
pub fn ball_wall_collision(center: Vec2, radius: f32, vel: Vec2, width: f32) -> WallHit {
    WallHit {
        flip_x: (center.x - radius < 0.0 && vel.x < 0.0)
            || (center.x + radius > width && vel.x > 0.0),
        flip_y: center.y - radius < 0.0 && vel.y < 0.0,
    }
}

/// Whether a falling ball is on the paddle: its lower edge has reached the
/// paddle's top and its center is strictly inside the paddle span.
pub fn ball_on_paddle(center: Vec2, radius: f32, vel: Vec2, paddle: &Aabb) -> bool {
    vel.y > 0.0
        && center.y + radius >= paddle.top()
        && center.x > paddle.left()
        && center.x < paddle.right()
}

/// Horizontal impact offset from the paddle center, normalized to [-1, 1]
pub fn paddle_hit_offset(ball_x: f32, paddle: &Aabb) -> f32 {
    let half = paddle.size.x / 2.0;
    ((ball_x - paddle.center().x) / half).clamp(-1.0, 1.0)
}

/// Velocity after a paddle bounce: aimed by impact offset, always upward,
/// each axis at most `base_speed`
pub fn paddle_bounce(ball_x: f32, paddle: &Aabb, base_speed: f32) -> Vec2 {
    Vec2::new(base_speed * paddle_hit_offset(ball_x, paddle), -base_speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brick() -> Aabb {
        Aabb::new(100.0, 100.0, 70.0, 20.0)
    }

    #[test]
    fn test_hit_from_below_is_vertical() {
        // Previous box fully below the brick
        let prev = Aabb::around_circle(Vec2::new(130.0, 135.0), 8.0);
        assert_eq!(classify_brick_hit(&prev, &brick()), HitAxis::Vertical);
    }

    #[test]
    fn test_hit_from_above_is_vertical() {
        let prev = Aabb::around_circle(Vec2::new(130.0, 85.0), 8.0);
        assert_eq!(classify_brick_hit(&prev, &brick()), HitAxis::Vertical);
    }

    #[test]
    fn test_hit_from_side_is_horizontal() {
        // Previous box overlaps the brick's rows but sits to its left
        let prev = Aabb::around_circle(Vec2::new(88.0, 110.0), 8.0);
        assert_eq!(classify_brick_hit(&prev, &brick()), HitAxis::Horizontal);
    }

    #[test]
    fn test_corner_hit_prefers_vertical() {
        let prev = Aabb::around_circle(Vec2::new(88.0, 88.0), 8.0);
        assert!(!prev.overlaps_x(&brick()));
        assert!(!prev.overlaps_y(&brick()));
        assert_eq!(classify_brick_hit(&prev, &brick()), HitAxis::Vertical);
    }

    #[test]
    fn test_walls() {
        let up_left = Vec2::new(-6.0, -6.0);
        let up_right = Vec2::new(6.0, -6.0);
        assert_eq!(
            ball_wall_collision(Vec2::new(400.0, 300.0), 8.0, up_left, 800.0),
            WallHit::default()
        );
        assert!(ball_wall_collision(Vec2::new(5.0, 300.0), 8.0, up_left, 800.0).flip_x);
        assert!(ball_wall_collision(Vec2::new(795.0, 300.0), 8.0, up_right, 800.0).flip_x);
        let corner = ball_wall_collision(Vec2::new(3.0, 3.0), 8.0, up_left, 800.0);
        assert!(corner.flip_x && corner.flip_y);
        // Bottom is open
        assert_eq!(
            ball_wall_collision(Vec2::new(400.0, 700.0), 8.0, Vec2::new(6.0, 6.0), 800.0),
            WallHit::default()
        );
    }

    #[test]
    fn test_walls_ignore_ball_heading_out() {
        // Past the left wall but already moving right
        let hit = ball_wall_collision(Vec2::new(-2.0, 300.0), 8.0, Vec2::new(5.0, -6.0), 800.0);
        assert!(!hit.flip_x);
        // Past the right wall but moving left
        let hit = ball_wall_collision(Vec2::new(802.0, 300.0), 8.0, Vec2::new(-5.0, 6.0), 800.0);
        assert!(!hit.flip_x);
        // Above the ceiling but falling
        let hit = ball_wall_collision(Vec2::new(400.0, 2.0), 8.0, Vec2::new(6.0, 6.0), 800.0);
        assert!(!hit.flip_y);
    }

    #[test]
    fn test_ball_on_paddle() {
        let paddle = Aabb::new(350.0, 568.0, 100.0, 12.0);
        let down = Vec2::new(0.0, 6.0);
        assert!(ball_on_paddle(Vec2::new(400.0, 562.0), 8.0, down, &paddle));
        // Moving up: no bounce
        assert!(!ball_on_paddle(Vec2::new(400.0, 562.0), 8.0, -down, &paddle));
        // Above the paddle
        assert!(!ball_on_paddle(Vec2::new(400.0, 500.0), 8.0, down, &paddle));
        // Exactly on the paddle edge is outside the strict span
        assert!(!ball_on_paddle(Vec2::new(350.0, 562.0), 8.0, down, &paddle));
    }

    #[test]
    fn test_paddle_bounce_aim() {
        let paddle = Aabb::new(350.0, 568.0, 100.0, 12.0);
        assert_eq!(paddle_bounce(400.0, &paddle, 6.0), Vec2::new(0.0, -6.0));
        assert_eq!(paddle_bounce(425.0, &paddle, 6.0), Vec2::new(3.0, -6.0));
        assert_eq!(paddle_bounce(375.0, &paddle, 6.0), Vec2::new(-3.0, -6.0));
        assert_eq!(paddle_hit_offset(1000.0, &paddle), 1.0);
    }
}
