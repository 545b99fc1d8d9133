use crate::detector::CameraError;

// Webcam lifecycle as seen by the UI
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CameraPhase {
    #[default]
    Off,
    Starting,
    Active,
    /// Gesture input stays disabled; keyboard and click still work.
    Failed(CameraError),
}

impl CameraPhase {
    pub fn is_active(&self) -> bool {
        matches!(self, CameraPhase::Active)
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, CameraPhase::Starting)
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            CameraPhase::Active => "Turn camera off",
            CameraPhase::Starting => "Starting...",
            CameraPhase::Off | CameraPhase::Failed(_) => "Turn camera on",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_active_enables_gestures() {
        assert!(CameraPhase::Active.is_active());
        assert!(!CameraPhase::Starting.is_active());
        assert!(!CameraPhase::Failed(CameraError::NotFound).is_active());
        assert_eq!(CameraPhase::default(), CameraPhase::Off);
    }

    #[test]
    fn failed_camera_can_be_retried() {
        assert_eq!(
            CameraPhase::Failed(CameraError::Busy).button_label(),
            CameraPhase::Off.button_label()
        );
    }
}
