use std::{env, str::FromStr};

use crate::types::FrameSize;

/// Options for the hand landmark detector.
///
/// `max_num_hands` and `min_detection_confidence` are also enforced by
/// [`ReplaySource`](crate::pipeline::ReplaySource). The remaining fields are
/// only carried for an external detector to read; nothing in this crate acts
/// on them.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectorOptions {
    pub max_num_hands: usize,
    pub min_detection_confidence: f32,
    /// External detector only.
    pub min_tracking_confidence: f32,
    /// External detector only.
    pub model_complexity: u8,
    /// External detector only. Handedness is expected already mirrored.
    pub selfie_mode: bool,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            max_num_hands: 2,
            min_detection_confidence: 0.6,
            min_tracking_confidence: 0.6,
            model_complexity: 1,
            selfie_mode: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    pub detector: DetectorOptions,
    pub frame_size: FrameSize,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let detector = DetectorOptions {
            max_num_hands: parse_or(
                &lookup,
                "FINGER_COUNTER_MAX_HANDS",
                defaults.detector.max_num_hands,
            )
            .max(1),
            min_detection_confidence: confidence_or(
                &lookup,
                "FINGER_COUNTER_MIN_DETECTION_CONFIDENCE",
                defaults.detector.min_detection_confidence,
            ),
            min_tracking_confidence: confidence_or(
                &lookup,
                "FINGER_COUNTER_MIN_TRACKING_CONFIDENCE",
                defaults.detector.min_tracking_confidence,
            ),
            model_complexity: parse_or(
                &lookup,
                "FINGER_COUNTER_MODEL_COMPLEXITY",
                defaults.detector.model_complexity,
            ),
            selfie_mode: bool_or(
                &lookup,
                "FINGER_COUNTER_SELFIE_MODE",
                defaults.detector.selfie_mode,
            ),
        };

        let frame_size = FrameSize::new(
            parse_or(
                &lookup,
                "FINGER_COUNTER_FRAME_WIDTH",
                defaults.frame_size.width,
            ),
            parse_or(
                &lookup,
                "FINGER_COUNTER_FRAME_HEIGHT",
                defaults.frame_size.height,
            ),
        )
        .or(defaults.frame_size);

        Self {
            detector,
            frame_size,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("failed to parse {key}={raw:?}, using default");
                default
            }
        },
        None => default,
    }
}

/// Parses a confidence and clamps it to `[0, 1]`. `NaN` and infinities fall
/// back to `default`.
fn confidence_or<F>(lookup: &F, key: &str, default: f32) -> f32
where
    F: Fn(&str) -> Option<String>,
{
    let value = parse_or(lookup, key, default);
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        log::warn!("{key} is not a finite number, using default");
        default
    }
}

fn bool_or<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => {
                log::warn!("failed to parse {key}={raw:?}, using default");
                default
            }
        },
        None => default,
    }
}
