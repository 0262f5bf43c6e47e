pub const VIEWER_CONFIG_PATH: &str = "viewer.json";

/// Local copy of Poly Haven's `pond_bridge_night_1k.hdr`.
pub const ENVIRONMENT_MAP_PATH: &str = "environment/pond_bridge_night_1k.hdr";

pub const MODEL_PATH: &str = "models/DamagedHelmet.gltf";

pub const RGB_SHIFT_SHADER_PATH: &str = "shaders/rgb_shift.wgsl";
