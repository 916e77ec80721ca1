//! Asset handles
//!
//! The simulation never owns textures. Every visual is named by an `AssetKey`;
//! the host loads the images however it likes and registers an opaque
//! `TextureId` per key.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ResourceError;
use crate::sim::BonusKind;

/// Number of distinct destructible brick visuals (tier 0 is one hit from breaking)
pub const BRICK_TIERS: u8 = 4;

/// Opaque texture handle owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// Every visual the draw list can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKey {
    Nebula1,
    Nebula2,
    Nebula3,
    Stars,
    Frame,
    Ball,
    Paddle,
    /// Destructible brick by tier; tiers past the last reuse the last
    Brick(u8),
    Wall,
    Bonus(BonusKind),
    LivesLabel,
    EndScreen,
    WinLabel,
    LoseLabel,
}

impl AssetKey {
    /// Brick key for a remaining-hits tier
    pub fn brick(tier: u8) -> Self {
        AssetKey::Brick(tier.min(BRICK_TIERS - 1))
    }

    /// Every key a complete registry must provide
    pub fn all() -> Vec<AssetKey> {
        let mut keys = vec![
            AssetKey::Nebula1,
            AssetKey::Nebula2,
            AssetKey::Nebula3,
            AssetKey::Stars,
            AssetKey::Frame,
            AssetKey::Ball,
            AssetKey::Paddle,
            AssetKey::Wall,
            AssetKey::LivesLabel,
            AssetKey::EndScreen,
            AssetKey::WinLabel,
            AssetKey::LoseLabel,
        ];
        keys.extend((0..BRICK_TIERS).map(AssetKey::Brick));
        keys.extend(BonusKind::ALL.iter().copied().map(AssetKey::Bonus));
        keys
    }

    /// Conventional asset file name
    pub fn name(&self) -> &'static str {
        match self {
            AssetKey::Nebula1 => "Nebula1.png",
            AssetKey::Nebula2 => "Nebula2.png",
            AssetKey::Nebula3 => "Nebula3.png",
            AssetKey::Stars => "Stars.png",
            AssetKey::Frame => "Frame.png",
            AssetKey::Ball => "Ball.png",
            AssetKey::Paddle => "Platform.png",
            AssetKey::Brick(0) => "BrickGreen.png",
            AssetKey::Brick(1) => "BrickYellow.png",
            AssetKey::Brick(2) => "BrickBlue.png",
            AssetKey::Brick(_) => "BrickRed.png",
            AssetKey::Wall => "BrickGray.png",
            AssetKey::Bonus(BonusKind::EnlargePaddle) => "BonusBlue.png",
            AssetKey::Bonus(BonusKind::SpeedPaddle) => "BonusGreen.png",
            AssetKey::Bonus(BonusKind::SpeedBall) => "BonusRed.png",
            AssetKey::Bonus(BonusKind::Score100) => "BonusTeal.png",
            AssetKey::Bonus(BonusKind::Score200) => "BonusYellow.png",
            AssetKey::Bonus(BonusKind::Score300) => "BonusPurple.png",
            AssetKey::LivesLabel => "LivesLabel.png",
            AssetKey::EndScreen => "EndScreen.png",
            AssetKey::WinLabel => "WinLabel.png",
            AssetKey::LoseLabel => "LoseLabel.png",
        }
    }
}

/// Key to texture lookup
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    textures: HashMap<AssetKey, TextureId>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every key bound to a distinct id, for hosts without textures
    pub fn sequential() -> Self {
        let mut registry = Self::new();
        for (i, key) in AssetKey::all().into_iter().enumerate() {
            registry.register(key, TextureId(i as u32));
        }
        registry
    }

    pub fn register(&mut self, key: AssetKey, texture: TextureId) {
        self.textures.insert(key, texture);
    }

    pub fn get(&self, key: AssetKey) -> Result<TextureId, ResourceError> {
        self.textures
            .get(&key)
            .copied()
            .ok_or(ResourceError::MissingAsset(key.name()))
    }

    /// Fail on the first key without a texture
    pub fn validate(&self) -> Result<(), ResourceError> {
        for key in AssetKey::all() {
            self.get(key)?;
        }
        Ok(())
    }
}
