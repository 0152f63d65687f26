//! Collision detection between sprites
//!
//! Overlap is tested on the collision masks, not bounding boxes. Positions are
//! snapped to whole pixels before the masks are compared.

use super::entity::Drawable;
use super::projectile::Projectile;

/// Pixel offset of `b` relative to `a`
#[inline]
fn pixel_offset<A: Drawable + ?Sized, B: Drawable + ?Sized>(a: &A, b: &B) -> (i32, i32) {
    let pa = a.position().floor();
    let pb = b.position().floor();
    ((pb.x - pa.x) as i32, (pb.y - pa.y) as i32)
}

/// Check whether two sprites overlap on any opaque pixel
pub fn collided<A: Drawable + ?Sized, B: Drawable + ?Sized>(a: &A, b: &B) -> bool {
    a.sprite()
        .mask()
        .overlaps(b.sprite().mask(), pixel_offset(a, b))
}

/// Remove every laser that hits `target` and return the total damage dealt.
///
/// Quadratic across all targets, which is fine for a few dozen entities.
pub fn take_hits<T: Drawable + ?Sized>(lasers: &mut Vec<Projectile>, target: &T) -> i32 {
    let mut damage = 0;
    lasers.retain(|laser| {
        if collided(target, laser) {
            damage += laser.damage;
            false
        } else {
            true
        }
    });
    damage
}
