//! Output frame views.
//!
//! Each view reshapes one resampled record into the layout a downstream
//! consumer expects: playback event frames, dashboard telemetry frames, or
//! mock-API snapshots. Source fields that are missing or non-numeric come
//! out as absent values rather than errors.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use serde_json::Value;

use telegrid_common::clock::{ms_to_secs, TimestampMs};

use crate::record::{number_value, Record};

/// Metres per second to kilometres per hour.
const MPS_TO_KMH: f64 = 3.6;

/// Standard gravity (m/s^2).
const STANDARD_GRAVITY: f64 = 9.81;

/// Full-scale raw throttle reading.
const THROTTLE_FULL_SCALE: f64 = 255.0;

/// Which output layout to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameView {
    /// The resampled record itself.
    #[default]
    Raw,
    /// Position/rotation frames for playback.
    Event,
    /// Derived speed, g-force and driver input frames.
    Telemetry,
    /// Compact per-participant state for mock APIs.
    Snapshot,
}

impl FromStr for FrameView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "event" => Ok(Self::Event),
            "telemetry" => Ok(Self::Telemetry),
            "snapshot" => Ok(Self::Snapshot),
            other => Err(format!(
                "unknown frame view '{other}' (expected raw|event|telemetry|snapshot)"
            )),
        }
    }
}

impl fmt::Display for FrameView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Raw => "raw",
            Self::Event => "event",
            Self::Telemetry => "telemetry",
            Self::Snapshot => "snapshot",
        };
        f.write_str(name)
    }
}

/// A three-component vector with optional components.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vector3 {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

/// Playback event frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFrame {
    #[serde(serialize_with = "serialize_ms")]
    pub race_timestamp_ms: TimestampMs,
    pub world_coordinates: Vector3,
    /// Rotation with the source's y and z axes swapped.
    pub car_rotation_degrees: Vector3,
    #[serde(rename = "lapProgressPercentage01Notation")]
    pub lap_progress: f64,
}

impl EventFrame {
    pub fn from_record(record: &Record) -> Self {
        Self {
            race_timestamp_ms: record.timestamp_ms,
            world_coordinates: Vector3 {
                x: record.number("pos_x"),
                y: record.number("pos_y"),
                z: record.number("pos_z"),
            },
            car_rotation_degrees: Vector3 {
                x: record.number("rot_x"),
                y: record.number("rot_z"),
                z: record.number("rot_y"),
            },
            lap_progress: 0.0,
        }
    }
}

/// Lateral/longitudinal acceleration pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Acceleration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lateral: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitudinal: Option<f64>,
}

/// Dashboard telemetry frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryFrame {
    #[serde(serialize_with = "serialize_ms")]
    pub race_timestamp_ms: TimestampMs,
    #[serde(rename = "GForceTuple")]
    pub g_force_tuple: (Option<f64>, Option<f64>),
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_kmh: Option<f64>,
    #[serde(rename = "RPM", skip_serializing_if = "Option::is_none")]
    pub rpm: Option<f64>,
    pub center_of_gravity_acceleration: Acceleration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steering_wheel_angle_radians: Option<f64>,
    /// Not present in the source telemetry; always zero.
    #[serde(rename = "brakePressurePercentage01Notation")]
    pub brake_pressure: f64,
    #[serde(
        rename = "throttlePressurePercentage01Notation",
        skip_serializing_if = "Option::is_none"
    )]
    pub throttle_pressure: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gear: Option<Value>,
    #[serde(rename = "hasABSActivated")]
    pub has_abs_activated: bool,
    pub has_traction_control_activated: bool,
}

impl TelemetryFrame {
    pub fn from_record(record: &Record) -> Self {
        let vel_x = record.number("vel_x").map(|v| v * MPS_TO_KMH);
        let vel_y = record.number("vel_y").map(|v| v * MPS_TO_KMH);
        let vel_z = record.number("vel_z").map(|v| v * MPS_TO_KMH);

        let secs = ms_to_secs(record.timestamp_ms);
        let g_force = |kmh: Option<f64>| {
            kmh.map(|v| {
                if secs == 0.0 {
                    0.0
                } else {
                    v / secs / STANDARD_GRAVITY
                }
            })
        };
        let g_x = g_force(vel_x);
        let g_z = g_force(vel_z);

        let speed_kmh = match (vel_x, vel_y, vel_z) {
            (Some(x), Some(y), Some(z)) => Some((x * x + y * y + z * z).sqrt()),
            _ => None,
        };

        Self {
            race_timestamp_ms: record.timestamp_ms,
            g_force_tuple: (g_x, g_z),
            speed_kmh,
            rpm: record.number("engine_rpm"),
            center_of_gravity_acceleration: Acceleration {
                lateral: g_x,
                longitudinal: g_z,
            },
            steering_wheel_angle_radians: record.number("wheel_angle"),
            brake_pressure: 0.0,
            throttle_pressure: record.number("gas").map(|g| g / THROTTLE_FULL_SCALE),
            gear: record.get("gear").cloned(),
            has_abs_activated: false,
            has_traction_control_activated: false,
        }
    }
}

/// Mock-API participant snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotFrame {
    pub participant_id: String,
    #[serde(serialize_with = "serialize_ms")]
    pub timestamp_ms: TimestampMs,
    pub position: Vector3,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_kmh: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gear: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_flag: Option<Value>,
}

impl SnapshotFrame {
    pub fn from_record(record: &Record, participant: &str) -> Self {
        let telemetry = TelemetryFrame::from_record(record);
        Self {
            participant_id: participant.to_string(),
            timestamp_ms: record.timestamp_ms,
            position: Vector3 {
                x: record.number("pos_x"),
                y: record.number("pos_y"),
                z: record.number("pos_z"),
            },
            speed_kmh: telemetry.speed_kmh,
            rpm: telemetry.rpm,
            gear: telemetry.gear,
            status_flag: record.get("status_flag").cloned(),
        }
    }
}

/// Map resampled records into the requested view as JSON values.
pub fn map_frames(
    records: &[Record],
    view: FrameView,
    participant: &str,
) -> Result<Vec<Value>, serde_json::Error> {
    records
        .iter()
        .map(|record| match view {
            FrameView::Raw => serde_json::to_value(record),
            FrameView::Event => serde_json::to_value(EventFrame::from_record(record)),
            FrameView::Telemetry => serde_json::to_value(TelemetryFrame::from_record(record)),
            FrameView::Snapshot => {
                serde_json::to_value(SnapshotFrame::from_record(record, participant))
            }
        })
        .collect()
}

fn serialize_ms<S: Serializer>(value: &TimestampMs, serializer: S) -> Result<S::Ok, S::Error> {
    number_value(*value).serialize(serializer)
}
