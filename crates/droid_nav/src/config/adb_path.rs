//! Discovery of the adb executable

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Where an adb executable was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdbSource {
    /// `$ANDROID_HOME/platform-tools/adb`
    AndroidHome,
    /// Found on `PATH`
    Path,
    /// A well-known SDK install location under the home directory
    StandardLocation,
    /// Given explicitly by the user
    Explicit,
    /// Nothing found; the bare name `adb` is used as-is
    Fallback,
}

/// A resolved adb executable plus how it was resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdbLocation {
    pub path: PathBuf,
    pub source: AdbSource,
}

/// SDK locations searched relative to the home directory
const STANDARD_SDK_DIRS: &[&str] = &["Library/Android/sdk", "Android/Sdk"];

impl AdbLocation {
    pub fn new(path: PathBuf, source: AdbSource) -> Self {
        Self { path, source }
    }

    pub fn explicit(path: impl Into<PathBuf>) -> Self {
        Self::new(path.into(), AdbSource::Explicit)
    }

    pub fn fallback() -> Self {
        Self::new(PathBuf::from("adb"), AdbSource::Fallback)
    }

    pub fn is_fallback(&self) -> bool {
        self.source == AdbSource::Fallback
    }

    /// Search the environment for adb
    pub fn discover() -> Self {
        Self::discover_with(
            std::env::var_os("ANDROID_HOME"),
            which::which("adb").ok(),
            dirs::home_dir(),
        )
    }

    /// Search order: `ANDROID_HOME`, `PATH`, standard SDK dirs, bare name.
    pub fn discover_with(
        android_home: Option<OsString>,
        on_path: Option<PathBuf>,
        home: Option<PathBuf>,
    ) -> Self {
        if let Some(sdk) = android_home {
            let candidate = platform_tools_adb(Path::new(&sdk));
            if candidate.exists() {
                debug!("Using adb from ANDROID_HOME: {}", candidate.display());
                return Self::new(candidate, AdbSource::AndroidHome);
            }
        }

        if let Some(path) = on_path {
            debug!("Using adb from PATH: {}", path.display());
            return Self::new(path, AdbSource::Path);
        }

        if let Some(home) = home {
            for dir in STANDARD_SDK_DIRS {
                let candidate = platform_tools_adb(&home.join(dir));
                if candidate.exists() {
                    debug!("Using adb from SDK location: {}", candidate.display());
                    return Self::new(candidate, AdbSource::StandardLocation);
                }
            }
        }

        warn!("adb not found in ANDROID_HOME, PATH or standard SDK locations, falling back to `adb`");
        Self::fallback()
    }
}

fn platform_tools_adb(sdk: &Path) -> PathBuf {
    sdk.join("platform-tools").join("adb")
}
