//! Hand landmark points as produced by a 21-point hand landmark model.

use crate::constants::LANDMARK_COUNT;
use glam::Vec2;

/// Landmark indices (standard 21-point hand topology).
pub mod index {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_MCP: usize = 5;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_DIP: usize = 7;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_MCP: usize = 13;
    pub const RING_PIP: usize = 14;
    pub const RING_DIP: usize = 15;
    pub const RING_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;

    pub const FINGERTIPS: [usize; 4] = [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];
}

/// Bone segments used when drawing the hand skeleton.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (0, 5),
    (5, 6),
    (6, 7),
    (7, 8),
    (5, 9),
    (9, 10),
    (10, 11),
    (11, 12),
    (9, 13),
    (13, 14),
    (14, 15),
    (15, 16),
    (13, 17),
    (17, 18),
    (18, 19),
    (19, 20),
    (0, 17),
];

/// A single detected point, `x`/`y` normalized to the image (0..1), `z`
/// relative depth as reported by the model (unused by gesture logic).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    #[inline]
    pub fn xy(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Image-plane distance; depth is ignored.
    #[inline]
    pub fn distance(&self, other: &Landmark) -> f32 {
        self.xy().distance(other.xy())
    }
}

impl From<Vec2> for Landmark {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

/// Builder for a plausible synthetic hand, used by the simulated hand source
/// and by tests that need exact gesture geometry.
///
/// The wrist sits straight below the middle knuckle at `base_size`, all four
/// fingertips sit exactly `reach * base_size` from the wrist, and the thumb
/// tip sits `pinch_gap` to the side of the index tip.
#[derive(Clone, Copy, Debug)]
pub struct HandPose {
    pub center: Vec2,
    pub base_size: f32,
    pub reach: f32,
    pub pinch_gap: f32,
}

impl Default for HandPose {
    fn default() -> Self {
        Self {
            center: Vec2::new(0.5, 0.5),
            base_size: 0.15,
            reach: 1.9,
            pinch_gap: 0.12,
        }
    }
}

// Finger fan angles (radians from straight up), index..pinky
const FAN: [f32; 4] = [-0.3, -0.1, 0.1, 0.3];

impl HandPose {
    pub fn landmarks(&self) -> Vec<Landmark> {
        let mut out = vec![Landmark::default(); LANDMARK_COUNT];
        let wrist = self.center + Vec2::new(0.0, self.base_size);
        out[index::WRIST] = wrist.into();

        let tip_dist = self.reach * self.base_size;
        for (finger, angle) in FAN.iter().enumerate() {
            let dir = Vec2::new(angle.sin(), -angle.cos());
            let mcp_i = index::INDEX_MCP + finger * 4;
            let mcp = if mcp_i == index::MIDDLE_MCP {
                self.center
            } else {
                wrist + dir * self.base_size * 0.95
            };
            let tip = wrist + dir * tip_dist;
            out[mcp_i] = mcp.into();
            out[mcp_i + 1] = mcp.lerp(tip, 1.0 / 3.0).into();
            out[mcp_i + 2] = mcp.lerp(tip, 2.0 / 3.0).into();
            out[mcp_i + 3] = tip.into();
        }

        let thumb_tip = out[index::INDEX_TIP].xy() + Vec2::new(self.pinch_gap, 0.0);
        for (k, i) in [index::THUMB_CMC, index::THUMB_MCP, index::THUMB_IP]
            .into_iter()
            .enumerate()
        {
            out[i] = wrist.lerp(thumb_tip, (k + 1) as f32 / 4.0).into();
        }
        out[index::THUMB_TIP] = thumb_tip.into();
        out
    }
}
