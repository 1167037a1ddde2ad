#![cfg_attr(not(feature = "std"), no_std)]

use serde::{Deserialize, Serialize};

/// Represents a 2D position in world coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// What a renderer needs to draw one agent: where it is and which way it faces.
///
/// `heading` is in radians, already offset so that a sprite drawn pointing up
/// (towards negative y in screen space) lines up with the direction of travel
/// after rotating by `heading`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AgentView {
    pub position: Position,
    pub heading: f64,
}

impl AgentView {
    pub fn new(position: Position, heading: f64) -> Self {
        Self { position, heading }
    }
}

/// Every agent's view at the end of one tick, in update order
#[cfg(feature = "std")]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub width: f64,
    pub height: f64,
    pub agents: Vec<AgentView>,
}

#[cfg(feature = "std")]
impl FrameSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "std")]
    #[test]
    fn test_frame_snapshot_json() {
        let frame = FrameSnapshot {
            tick: 7,
            width: 1000.0,
            height: 800.0,
            agents: vec![
                AgentView::new(Position::new(1.5, 2.0), 0.25),
                AgentView::new(Position::new(999.0, 0.0), -1.0),
            ],
        };

        let json = frame.to_json().unwrap();
        assert!(json.contains("\"tick\":7"));

        let decoded = FrameSnapshot::from_json(&json).unwrap();
        assert_eq!(decoded, frame);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_frame_snapshot_rejects_missing_agents() {
        let result = FrameSnapshot::from_json(r#"{"tick":1,"width":10.0,"height":10.0}"#);
        assert!(result.is_err());
    }
}
