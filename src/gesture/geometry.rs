//! Landmark geometry helpers. Indices follow the MediaPipe hand topology.

use serde::{Deserialize, Serialize};

pub const LANDMARK_COUNT: usize = 21;

/// One complete hand as reported by the detector.
pub type Hand = [Landmark; LANDMARK_COUNT];

pub const WRIST: usize = 0;
pub const THUMB_MCP: usize = 2;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_TIP: usize = 20;

/// (tip, base) pairs for index, middle, ring and pinky.
pub const FINGERS: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_MCP),
    (MIDDLE_TIP, MIDDLE_MCP),
    (RING_TIP, RING_MCP),
    (PINKY_TIP, PINKY_MCP),
];

/// Bone pairs used when drawing the skeleton overlay.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1), (1, 2), (2, 3), (3, 4),
    (0, 5), (5, 6), (6, 7), (7, 8),
    (5, 9), (9, 10), (10, 11), (11, 12),
    (9, 13), (13, 14), (14, 15), (15, 16),
    (13, 17), (17, 18), (18, 19), (19, 20),
    (0, 17),
];

/// One detected point, normalized to the camera frame (origin top-left).
/// `z` is carried through from the detector but never read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PalmCenter {
    pub x: f64,
    pub y: f64,
}

pub fn distance(p1: &Landmark, p2: &Landmark) -> f64 {
    ((p1.x - p2.x).powi(2) + (p1.y - p2.y).powi(2)).sqrt()
}

/// Non-thumb fingers: extended when the tip sits above its base joint.
pub fn is_finger_open(tip: &Landmark, base: &Landmark) -> bool {
    tip.y < base.y
}

/// The thumb has no stable vertical axis, so compare reach from the wrist instead.
pub fn is_thumb_open(tip: &Landmark, second_joint: &Landmark, wrist: &Landmark) -> bool {
    distance(tip, wrist) > distance(second_joint, wrist)
}

/// Open count over index, middle, ring and pinky (0..=4).
pub fn count_open_fingers(landmarks: &Hand) -> usize {
    FINGERS
        .iter()
        .filter(|(tip, base)| is_finger_open(&landmarks[*tip], &landmarks[*base]))
        .count()
}

pub fn palm_center(landmarks: &Hand) -> PalmCenter {
    let pts = [WRIST, INDEX_MCP, MIDDLE_MCP, RING_MCP, PINKY_MCP];
    let (sx, sy) = pts
        .iter()
        .fold((0.0, 0.0), |(ax, ay), &i| (ax + landmarks[i].x, ay + landmarks[i].y));
    let n = pts.len() as f64;
    PalmCenter { x: sx / n, y: sy / n }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean_on_xy() {
        let a = Landmark { x: 0.0, y: 0.0, z: 5.0 };
        let b = Landmark::new(0.3, 0.4);
        assert!((distance(&a, &b) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn finger_open_means_tip_above_base() {
        assert!(is_finger_open(&Landmark::new(0.5, 0.2), &Landmark::new(0.5, 0.4)));
        assert!(!is_finger_open(&Landmark::new(0.5, 0.6), &Landmark::new(0.5, 0.4)));
        assert!(!is_finger_open(&Landmark::new(0.5, 0.4), &Landmark::new(0.5, 0.4)));
    }

    #[test]
    fn thumb_open_compares_reach_from_wrist() {
        let wrist = Landmark::new(0.5, 0.9);
        let joint = Landmark::new(0.4, 0.8);
        assert!(is_thumb_open(&Landmark::new(0.2, 0.7), &joint, &wrist));
        assert!(!is_thumb_open(&Landmark::new(0.48, 0.85), &joint, &wrist));
    }

    #[test]
    fn palm_center_averages_wrist_and_bases() {
        let mut lm: Hand = [Landmark::default(); LANDMARK_COUNT];
        lm[WRIST] = Landmark::new(0.5, 1.0);
        lm[INDEX_MCP] = Landmark::new(0.0, 0.0);
        lm[MIDDLE_MCP] = Landmark::new(1.0, 0.0);
        lm[RING_MCP] = Landmark::new(0.0, 0.5);
        lm[PINKY_MCP] = Landmark::new(1.0, 0.5);
        let c = palm_center(&lm);
        assert!((c.x - 0.5).abs() < 1e-12);
        assert!((c.y - 0.4).abs() < 1e-12);
    }

    #[test]
    fn counts_only_non_thumb_fingers() {
        let mut lm: Hand = [Landmark::new(0.5, 0.5); LANDMARK_COUNT];
        lm[THUMB_TIP] = Landmark::new(0.0, 0.0);
        assert_eq!(count_open_fingers(&lm), 0);
        lm[INDEX_TIP].y = 0.1;
        lm[PINKY_TIP].y = 0.1;
        assert_eq!(count_open_fingers(&lm), 2);
    }
}
