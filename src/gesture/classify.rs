use super::geometry::{
    self, Hand, Landmark, PalmCenter, LANDMARK_COUNT, THUMB_MCP, THUMB_TIP, WRIST,
};

/// Hand shape recognized from a single frame. No memory across frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureLabel {
    Fist,
    OpenPalm,
    None,
}

/// Raw detector output goes through `HandFrame::from_landmarks` first.
pub fn classify(landmarks: &Hand) -> GestureLabel {
    let thumb_open = geometry::is_thumb_open(
        &landmarks[THUMB_TIP],
        &landmarks[THUMB_MCP],
        &landmarks[WRIST],
    );
    let open = geometry::count_open_fingers(landmarks);
    if open == 0 && !thumb_open {
        GestureLabel::Fist
    } else if open >= 4 && thumb_open {
        GestureLabel::OpenPalm
    } else {
        GestureLabel::None
    }
}

/// A validated detector frame: exactly what the state machine needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandFrame {
    pub gesture: GestureLabel,
    pub palm: PalmCenter,
}

impl HandFrame {
    /// Frames with fewer than 21 points or non-finite coordinates count as "no hand".
    pub fn from_landmarks(landmarks: &[Landmark]) -> Option<Self> {
        let points: &Hand = landmarks.get(..LANDMARK_COUNT)?.try_into().ok()?;
        if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return None;
        }
        Some(Self {
            gesture: classify(points),
            palm: geometry::palm_center(points),
        })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::gesture::geometry::*;

    /// Hand centred on (cx, 0.5) with all fingers pointing up and the thumb spread.
    pub fn open_palm_at(cx: f64) -> Hand {
        let mut lm = [Landmark::new(cx, 0.5); LANDMARK_COUNT];
        lm[WRIST] = Landmark::new(cx, 0.8);
        lm[THUMB_MCP] = Landmark::new(cx - 0.05, 0.72);
        lm[THUMB_TIP] = Landmark::new(cx - 0.15, 0.6);
        for (i, (tip, base)) in FINGERS.iter().enumerate() {
            let x = cx - 0.06 + 0.04 * i as f64;
            lm[*base] = Landmark::new(x, 0.6);
            lm[*tip] = Landmark::new(x, 0.35);
        }
        lm
    }

    /// Curled fingers with the thumb tucked toward the wrist.
    pub fn fist_at(cx: f64) -> Hand {
        let mut lm = [Landmark::new(cx, 0.5); LANDMARK_COUNT];
        lm[WRIST] = Landmark::new(cx, 0.8);
        lm[THUMB_MCP] = Landmark::new(cx - 0.08, 0.7);
        lm[THUMB_TIP] = Landmark::new(cx - 0.02, 0.74);
        for (i, (tip, base)) in FINGERS.iter().enumerate() {
            let x = cx - 0.06 + 0.04 * i as f64;
            lm[*base] = Landmark::new(x, 0.6);
            lm[*tip] = Landmark::new(x, 0.66);
        }
        lm
    }

    /// Pointing index finger: neither fist nor palm.
    pub fn pointing_at(cx: f64) -> Hand {
        let mut lm = fist_at(cx);
        lm[INDEX_TIP].y = 0.3;
        lm
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::gesture::geometry::{INDEX_TIP, MIDDLE_TIP};

    #[test]
    fn open_hand_with_spread_thumb_is_open_palm() {
        assert_eq!(classify(&open_palm_at(0.5)), GestureLabel::OpenPalm);
    }

    #[test]
    fn curled_hand_with_tucked_thumb_is_fist() {
        assert_eq!(classify(&fist_at(0.5)), GestureLabel::Fist);
    }

    #[test]
    fn partial_shapes_are_none() {
        assert_eq!(classify(&pointing_at(0.5)), GestureLabel::None);

        // Four fingers up but thumb tucked.
        let mut lm = fist_at(0.5);
        for tip in [INDEX_TIP, MIDDLE_TIP, 16, 20] {
            lm[tip].y = 0.3;
        }
        assert_eq!(classify(&lm), GestureLabel::None);

        // Fingers curled but thumb out.
        let mut lm = fist_at(0.5);
        lm[4] = Landmark::new(0.2, 0.5);
        assert_eq!(classify(&lm), GestureLabel::None);
    }

    #[test]
    fn short_frames_are_rejected() {
        let lm = open_palm_at(0.5);
        assert!(HandFrame::from_landmarks(&lm[..20]).is_none());
        assert!(HandFrame::from_landmarks(&[]).is_none());

        // Trailing extra points are ignored; the first 21 form the hand.
        let mut long = open_palm_at(0.5).to_vec();
        long.push(Landmark::new(f64::NAN, 0.0));
        assert_eq!(
            HandFrame::from_landmarks(&long).map(|f| f.gesture),
            Some(GestureLabel::OpenPalm)
        );
    }

    #[test]
    fn non_finite_frames_are_rejected() {
        let mut lm = open_palm_at(0.5);
        lm[9].x = f64::NAN;
        assert!(HandFrame::from_landmarks(&lm).is_none());
    }

    #[test]
    fn frame_carries_label_and_palm_center() {
        let frame = HandFrame::from_landmarks(&open_palm_at(0.4)).unwrap();
        assert_eq!(frame.gesture, GestureLabel::OpenPalm);
        assert!((frame.palm.x - 0.4).abs() < 1e-9);
    }
}
