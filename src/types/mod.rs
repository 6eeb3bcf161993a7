use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ApiRefError, ApiRefResult};

/// UI5 distribution whose documentation corpus is queried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Framework {
    OpenUI5,
    SAPUI5,
}

impl Framework {
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::OpenUI5 => "OpenUI5",
            Framework::SAPUI5 => "SAPUI5",
        }
    }

    /// Lowercase form used for corpus directory names
    pub fn dir_prefix(&self) -> &'static str {
        match self {
            Framework::OpenUI5 => "openui5",
            Framework::SAPUI5 => "sapui5",
        }
    }

    /// Base URL of the public API documentation site
    pub fn sdk_domain(&self) -> &'static str {
        match self {
            Framework::OpenUI5 => "https://openui5.org",
            Framework::SAPUI5 => "https://ui5.sap.com",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = ApiRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "openui5" => Ok(Framework::OpenUI5),
            "sapui5" => Ok(Framework::SAPUI5),
            _ => Err(ApiRefError::invalid_input(format!(
                "Invalid framework name: {s}. Expected \"OpenUI5\" or \"SAPUI5\"."
            ))),
        }
    }
}

/// A validated, lowercase framework version string.
///
/// Versions end up in file system paths, so only letters, digits, dots and
/// dashes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameworkVersion(String);

impl FrameworkVersion {
    pub fn parse(version: &str) -> ApiRefResult<Self> {
        let version = version.trim().to_lowercase();
        let valid = !version.is_empty()
            && version
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
        if !valid {
            return Err(ApiRefError::invalid_input(format!(
                "Invalid framework version: {version}"
            )));
        }
        Ok(Self(version))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FrameworkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key of the process-wide provider cache
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorpusKey {
    pub framework: Framework,
    pub version: FrameworkVersion,
}

impl CorpusKey {
    pub fn new(framework: Framework, version: FrameworkVersion) -> Self {
        Self { framework, version }
    }

    /// Directory name of this corpus, e.g. `openui5-1.120.30`
    pub fn dir_name(&self) -> String {
        format!("{}-{}", self.framework.dir_prefix(), self.version)
    }
}

impl fmt::Display for CorpusKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.framework, self.version)
    }
}
