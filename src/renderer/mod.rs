//! Host-independent rendering
//!
//! The game state is flattened into an ordered list of `DrawItem`s, later
//! items drawn over earlier ones. A host resolves each item's `AssetKey` to
//! its own texture and blits it into the item's rectangle.

pub mod assets;

pub use assets::{AssetKey, AssetRegistry, BRICK_TIERS, TextureId};

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::error::ResourceError;
use crate::settings::GameConfig;
use crate::sim::{GamePhase, GameState, Rect, RoundOutcome};

// === Background ===
const NEBULA1_SIZE: IVec2 = IVec2::new(751, 564);
const NEBULA2_SIZE: IVec2 = IVec2::new(800, 719);
const NEBULA3_SIZE: IVec2 = IVec2::new(791, 889);
const STARS_SIZE: IVec2 = IVec2::new(1024, 1024);

// === HUD ===
const LIVES_LABEL_SIZE: IVec2 = IVec2::new(95, 40);
const LIFE_ICON_SIZE: IVec2 = IVec2::new(24, 24);
const LIFE_ICON_SPACING: i32 = 5;

/// One textured rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawItem {
    pub asset: AssetKey,
    pub rect: Rect,
}

impl DrawItem {
    pub fn new(asset: AssetKey, rect: Rect) -> Self {
        Self { asset, rect }
    }
}

/// Drawing surface provided by the host
pub trait Renderer {
    fn draw(&mut self, texture: TextureId, rect: Rect) -> Result<(), ResourceError>;
}

/// Build the frame's draw list, back to front
pub fn draw_list(state: &GameState, config: &GameConfig) -> Vec<DrawItem> {
    let window = IVec2::new(config.window_width, config.window_height);
    let screen = |asset, size| DrawItem::new(asset, Rect { pos: IVec2::ZERO, size });

    let mut items = vec![
        screen(AssetKey::Nebula1, NEBULA1_SIZE),
        screen(AssetKey::Nebula2, NEBULA2_SIZE),
        screen(AssetKey::Nebula3, NEBULA3_SIZE),
        screen(AssetKey::Stars, STARS_SIZE),
        screen(AssetKey::Frame, window),
    ];

    // Lives: label along the bottom edge, then one ball icon per life
    let label = Rect {
        pos: IVec2::new(
            config.frame_brick_offset,
            config.window_height - LIVES_LABEL_SIZE.y,
        ),
        size: LIVES_LABEL_SIZE,
    };
    items.push(DrawItem::new(AssetKey::LivesLabel, label));
    for i in 0..state.lives.max(0) {
        let pos = IVec2::new(
            label.right() + i * (LIFE_ICON_SIZE.x + LIFE_ICON_SPACING),
            label.top() + label.height() / 2 - LIFE_ICON_SIZE.y / 2,
        );
        items.push(DrawItem::new(
            AssetKey::Ball,
            Rect {
                pos,
                size: LIFE_ICON_SIZE,
            },
        ));
    }

    items.push(DrawItem::new(AssetKey::Paddle, state.paddle.rect));
    items.push(DrawItem::new(AssetKey::Ball, state.ball.rect));

    items.extend(state.bricks.iter().map(|brick| {
        let asset = brick.tier().map_or(AssetKey::Wall, AssetKey::brick);
        DrawItem::new(asset, brick.rect)
    }));
    items.extend(
        state
            .bonuses
            .iter()
            .map(|bonus| DrawItem::new(AssetKey::Bonus(bonus.kind), bonus.rect)),
    );

    if let GamePhase::Stopped(outcome) = state.phase {
        let label = match outcome {
            RoundOutcome::Won => AssetKey::WinLabel,
            RoundOutcome::Lost => AssetKey::LoseLabel,
        };
        items.push(screen(AssetKey::EndScreen, window));
        items.push(screen(label, window));
    }

    items
}

/// Resolve and draw a whole frame, returning the number of items drawn
///
/// Stops at the first missing asset or renderer failure.
pub fn render(
    state: &GameState,
    config: &GameConfig,
    assets: &AssetRegistry,
    renderer: &mut impl Renderer,
) -> Result<usize, ResourceError> {
    let items = draw_list(state, config);
    for item in &items {
        renderer.draw(assets.get(item.asset)?, item.rect)?;
    }
    Ok(items.len())
}
