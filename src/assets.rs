//! Sprite handles and font roles
//!
//! Image decoding lives outside the crate. An [`AssetSource`] hands over
//! sprites by logical name; [`SpriteSheet::load`] checks that every sprite the
//! game needs is present before a session starts.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::GameError;
use crate::sim::mask::CollisionMask;

/// Logical sprite names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Background,
    PlayerShip,
    RedShip,
    GreenShip,
    BlueShip,
    YellowLaser,
    RedLaser,
    GreenLaser,
    BlueLaser,
}

impl SpriteKind {
    /// Every sprite a session needs
    pub const ALL: [SpriteKind; 9] = [
        SpriteKind::Background,
        SpriteKind::PlayerShip,
        SpriteKind::RedShip,
        SpriteKind::GreenShip,
        SpriteKind::BlueShip,
        SpriteKind::YellowLaser,
        SpriteKind::RedLaser,
        SpriteKind::GreenLaser,
        SpriteKind::BlueLaser,
    ];
}

/// Font roles; the surface decides the actual face and size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontRole {
    /// Lives/level labels
    Hud,
    /// "Level Up!" banner
    Banner,
    /// "Paused" and "You Lost..." banners
    Overlay,
}

impl FontRole {
    /// Nominal point size
    pub fn point_size(&self) -> f32 {
        match self {
            FontRole::Hud => 50.0,
            FontRole::Banner => 100.0,
            FontRole::Overlay => 100.0,
        }
    }
}

/// An opaque image handle with its intrinsic size and collision mask
#[derive(Debug, Clone)]
pub struct Sprite {
    pub kind: SpriteKind,
    mask: Arc<CollisionMask>,
}

impl Sprite {
    pub fn new(kind: SpriteKind, mask: CollisionMask) -> Self {
        Self {
            kind,
            mask: Arc::new(mask),
        }
    }

    /// Build a sprite from a row-major alpha channel
    pub fn from_alpha(
        kind: SpriteKind,
        width: u32,
        height: u32,
        alpha: &[u8],
    ) -> Result<Self, GameError> {
        let mask = CollisionMask::from_alpha(width, height, alpha).ok_or(
            GameError::MaskSizeMismatch {
                kind,
                expected: (width * height) as usize,
                actual: alpha.len(),
            },
        )?;
        Ok(Self::new(kind, mask))
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.mask.width() as f32
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.mask.height() as f32
    }

    #[inline]
    pub fn mask(&self) -> &CollisionMask {
        &self.mask
    }
}

/// Supplies sprites by logical name
pub trait AssetSource {
    fn sprite(&self, kind: SpriteKind) -> Option<Sprite>;
}

/// Validated set of every sprite the game uses
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    sprites: HashMap<SpriteKind, Sprite>,
}

impl SpriteSheet {
    /// Pull every required sprite from `source`.
    ///
    /// A missing or empty sprite is a startup failure.
    pub fn load(source: &dyn AssetSource) -> Result<Self, GameError> {
        let mut sprites = HashMap::with_capacity(SpriteKind::ALL.len());
        for kind in SpriteKind::ALL {
            let sprite = source.sprite(kind).ok_or(GameError::MissingSprite(kind))?;
            let (width, height) = (sprite.mask().width(), sprite.mask().height());
            if width == 0 || height == 0 {
                return Err(GameError::EmptySprite {
                    kind,
                    width,
                    height,
                });
            }
            sprites.insert(kind, sprite);
        }
        log::info!("Loaded {} sprites", sprites.len());
        Ok(Self { sprites })
    }

    /// Look up a sprite. Every [`SpriteKind`] is present after [`SpriteSheet::load`].
    pub fn get(&self, kind: SpriteKind) -> &Sprite {
        &self.sprites[&kind]
    }
}

/// Generates simple geometric sprites in memory.
///
/// Used by the headless binary and tests, where no image files exist.
#[derive(Debug, Clone)]
pub struct ProceduralAssets {
    screen_width: u32,
    screen_height: u32,
}

impl ProceduralAssets {
    pub const PLAYER_SIZE: (u32, u32) = (100, 90);
    pub const ENEMY_SIZE: (u32, u32) = (50, 40);
    pub const LASER_HEIGHT: u32 = 40;
    pub const LASER_BAR_WIDTH: u32 = 8;

    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            screen_width: screen_width.max(1.0) as u32,
            screen_height: screen_height.max(1.0) as u32,
        }
    }

    /// Upward-pointing triangle
    fn arrow_up(width: u32, height: u32) -> CollisionMask {
        CollisionMask::from_fn(width, height, |x, y| {
            let half = (y + 1) as f32 / height as f32 * width as f32 / 2.0;
            let dx = (x as f32 + 0.5 - width as f32 / 2.0).abs();
            dx <= half
        })
    }

    /// Downward-pointing triangle
    fn arrow_down(width: u32, height: u32) -> CollisionMask {
        let up = Self::arrow_up(width, height);
        CollisionMask::from_fn(width, height, |x, y| {
            up.get(x as i32, (height - 1 - y) as i32)
        })
    }

    /// A bar centred inside a sprite of the given width
    fn laser(width: u32) -> CollisionMask {
        let bar = Self::LASER_BAR_WIDTH.min(width);
        let left = (width - bar) / 2;
        CollisionMask::from_fn(width, Self::LASER_HEIGHT, |x, _| x >= left && x < left + bar)
    }
}

impl AssetSource for ProceduralAssets {
    fn sprite(&self, kind: SpriteKind) -> Option<Sprite> {
        let (pw, ph) = Self::PLAYER_SIZE;
        let (ew, eh) = Self::ENEMY_SIZE;
        let mask = match kind {
            SpriteKind::Background => CollisionMask::solid(self.screen_width, self.screen_height),
            SpriteKind::PlayerShip => Self::arrow_up(pw, ph),
            SpriteKind::RedShip | SpriteKind::GreenShip | SpriteKind::BlueShip => {
                Self::arrow_down(ew, eh)
            }
            // The player laser spans the ship so it leaves from the ship's centre
            SpriteKind::YellowLaser => Self::laser(pw),
            SpriteKind::RedLaser | SpriteKind::GreenLaser | SpriteKind::BlueLaser => {
                Self::laser(ew)
            }
        };
        Some(Sprite::new(kind, mask))
    }
}
