//! Per-host facts consumed by the resolver.
//!
//! A [`Facts`] record is immutable once loaded: the resolver only ever reads
//! it. The native architecture is part of the record rather than probed from
//! the running machine, so resolving for a remote host never depends on
//! where the tool itself runs.

use core::fmt;

use serde::Deserialize;

/// Everything the resolver needs to know about one target host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Facts {
    pub(crate) os: OsFacts,
    pub(crate) packaging: PackagingFacts,
    pub(crate) native_arch: String,
    pub(crate) paths: ToolPaths,

    /// Container base image, present only for hosts we build images for.
    #[serde(default)]
    pub(crate) docker: Option<DockerFacts>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OsFacts {
    pub(crate) name: String,
    pub(crate) version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackagingFacts {
    pub(crate) format: PackagingFormat,
    pub(crate) command: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackagingFormat {
    Deb,
    Rpm,
    Other,
}

impl fmt::Display for PackagingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deb => f.write_str("deb"),
            Self::Rpm => f.write_str("rpm"),
            Self::Other => f.write_str("other"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DockerFacts {
    pub(crate) base: String,
}

/// Filesystem locations of the build tools on the host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToolPaths {
    pub(crate) cc: String,
    pub(crate) ccache: String,
    pub(crate) make: String,
    pub(crate) ninja: String,
    pub(crate) python: String,
    pub(crate) pip3: String,
}

impl Facts {
    #[must_use]
    pub fn os_name(&self) -> &str {
        &self.os.name
    }

    #[must_use]
    pub fn os_version(&self) -> &str {
        &self.os.version
    }

    #[must_use]
    pub fn packaging_format(&self) -> PackagingFormat {
        self.packaging.format
    }

    #[must_use]
    pub fn packaging_command(&self) -> &str {
        &self.packaging.command
    }

    #[must_use]
    pub fn native_arch(&self) -> &str {
        &self.native_arch
    }

    #[must_use]
    pub fn paths(&self) -> &ToolPaths {
        &self.paths
    }

    #[must_use]
    pub fn docker_base(&self) -> Option<&str> {
        self.docker.as_ref().map(|d| d.base.as_str())
    }
}

impl ToolPaths {
    /// The path variables in the order they appear in the variable map,
    /// paired with their `paths_`-prefixed names.
    #[must_use]
    pub fn as_vars(&self) -> [(&'static str, &str); 6] {
        [
            ("paths_cc", self.cc.as_str()),
            ("paths_ccache", self.ccache.as_str()),
            ("paths_make", self.make.as_str()),
            ("paths_ninja", self.ninja.as_str()),
            ("paths_python", self.python.as_str()),
            ("paths_pip3", self.pip3.as_str()),
        ]
    }

    #[must_use]
    pub fn cc(&self) -> &str {
        &self.cc
    }

    #[must_use]
    pub fn ccache(&self) -> &str {
        &self.ccache
    }

    #[must_use]
    pub fn make(&self) -> &str {
        &self.make
    }

    #[must_use]
    pub fn ninja(&self) -> &str {
        &self.ninja
    }

    #[must_use]
    pub fn python(&self) -> &str {
        &self.python
    }

    #[must_use]
    pub fn pip3(&self) -> &str {
        &self.pip3
    }
}

/// Builder for `Facts`, mostly useful in tests.
///
#[derive(Debug, Clone)]
pub struct FactsBuilder {
    os_name: String,
    os_version: String,
    format: PackagingFormat,
    command: String,
    native_arch: String,
    paths: ToolPaths,
    docker_base: Option<String>,
}

impl Default for FactsBuilder {
    fn default() -> Self {
        Self {
            os_name: String::new(),
            os_version: String::new(),
            format: PackagingFormat::Other,
            command: String::new(),
            native_arch: "x86_64".to_string(),
            paths: ToolPaths {
                cc: "/usr/bin/cc".to_string(),
                ccache: "/usr/bin/ccache".to_string(),
                make: "/usr/bin/make".to_string(),
                ninja: "/usr/bin/ninja".to_string(),
                python: "/usr/bin/python3".to_string(),
                pip3: "/usr/bin/pip3".to_string(),
            },
            docker_base: None,
        }
    }
}

impl FactsBuilder {
    #[must_use]
    pub fn os(mut self, name: &str, version: &str) -> Self {
        self.os_name = name.to_string();
        self.os_version = version.to_string();
        self
    }

    #[must_use]
    pub fn packaging(mut self, format: PackagingFormat, command: &str) -> Self {
        self.format = format;
        self.command = command.to_string();
        self
    }

    #[must_use]
    pub fn native_arch(mut self, arch: &str) -> Self {
        self.native_arch = arch.to_string();
        self
    }

    #[must_use]
    pub fn docker_base(mut self, base: &str) -> Self {
        self.docker_base = Some(base.to_string());
        self
    }

    #[must_use]
    pub fn build(self) -> Facts {
        Facts {
            os: OsFacts {
                name: self.os_name,
                version: self.os_version,
            },
            packaging: PackagingFacts {
                format: self.format,
                command: self.command,
            },
            native_arch: self.native_arch,
            paths: self.paths,
            docker: self.docker_base.map(|base| DockerFacts { base }),
        }
    }
}
