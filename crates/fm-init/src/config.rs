use fm_core::BorderMode;
use serde::{Deserialize, Serialize};

/// How erosion treats samples beyond the image edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// Repeat the edge pixel. Damage touching the image edge is not eroded
    /// away by the edge itself, so a fully damaged image has no band. At
    /// radius 1 this agrees with half-sample reflection; at larger radii it
    /// does not.
    #[default]
    Replicate,
    /// Treat the outside of the image as known territory. Damage touching
    /// the image edge becomes band there.
    Known,
}

impl EdgePolicy {
    pub(crate) fn border_mode(self) -> BorderMode<u8> {
        match self {
            Self::Replicate => BorderMode::Clamp,
            Self::Known => BorderMode::Constant(0),
        }
    }
}

/// Settings for classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitConfig {
    /// Radius of the disk structuring element; controls how wide the initial
    /// band ring is.
    #[serde(default = "default_erosion_radius")]
    pub erosion_radius: u32,

    #[serde(default)]
    pub edge_policy: EdgePolicy,
}

fn default_erosion_radius() -> u32 {
    1
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            erosion_radius: default_erosion_radius(),
            edge_policy: EdgePolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EdgePolicy, InitConfig};

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: InitConfig = serde_json::from_str("{}").expect("empty object");
        assert_eq!(cfg, InitConfig::default());
        assert_eq!(cfg.erosion_radius, 1);
        assert_eq!(cfg.edge_policy, EdgePolicy::Replicate);
    }

    #[test]
    fn edge_policy_uses_snake_case() {
        let cfg: InitConfig =
            serde_json::from_str(r#"{"erosion_radius": 2, "edge_policy": "known"}"#)
                .expect("valid config");
        assert_eq!(cfg.erosion_radius, 2);
        assert_eq!(cfg.edge_policy, EdgePolicy::Known);

        let text = serde_json::to_string(&InitConfig::default()).expect("serialize");
        assert!(text.contains("\"replicate\""));
    }
}
