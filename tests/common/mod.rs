#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the naval-compliance binary.
#[macro_export]
macro_rules! naval_compliance {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("naval-compliance"))
    };
}

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Creates the project config file.
    pub fn create_config(&self, content: &str) {
        self.create_file(".naval-compliance.toml", content);
    }

    /// Writes the passing design state as `state.toml`.
    pub fn create_passing_state(&self) {
        self.create_file("state.toml", PASSING_STATE_TOML);
    }

    /// Writes a JSON state whose GM is below every framework's minimum.
    pub fn create_low_gm_state(&self) {
        self.create_file("state.json", LOW_GM_STATE_JSON);
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Design state meeting every stability and freeboard criterion.
pub const PASSING_STATE_TOML: &str = r#"
[stability]
gm_m = 0.9
area_0_30_m_rad = 0.08
area_0_40_m_rad = 0.13
area_30_40_m_rad = 0.05
gz_max_m = 0.35
angle_of_max_gz_deg = 32.0
range_of_stability_deg = 70.0

[hull]
beam = 6.0
lwl = 30.0
freeboard = 0.6
depth = 3.2
"#;

/// Same as the passing state with GM of 0.10 m.
pub const LOW_GM_STATE_JSON: &str = r#"{
  "stability": {
    "gm_m": 0.10,
    "area_0_30_m_rad": 0.08,
    "area_0_40_m_rad": 0.13,
    "area_30_40_m_rad": 0.05,
    "gz_max_m": 0.35,
    "angle_of_max_gz_deg": 32.0,
    "range_of_stability_deg": 70.0
  },
  "hull": {"beam": 6.0, "lwl": 30.0, "freeboard": 0.6, "depth": 3.2}
}"#;

/// Ferry evaluated against HSC 2000 only.
pub const FERRY_CONFIG: &str = r#"
version = "1"

[vessel]
name = "MV Harbour Link"
vessel_type = "ferry"
length_m = 30.0

[evaluation]
frameworks = ["hsc_2000"]
"#;

/// Patrol craft evaluated against ABS HSNC.
pub const PATROL_CONFIG: &str = r#"
version = "1"

[vessel]
name = "PC-42"
vessel_type = "patrol"
length_m = 35.0

[evaluation]
frameworks = ["abs_hsnc"]
"#;
