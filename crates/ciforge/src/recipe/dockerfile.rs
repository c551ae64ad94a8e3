//! Dockerfile rendering.
//!
//! Pure string templating over the variable map and a few host facts. The
//! common packages and the cross packages go into separate RUN layers so
//! all cross-built images for one platform share the common layer.

use crate::{
    facts::{Facts, PackagingFormat},
    varmap::VarMap,
};

pub(super) fn render(
    base: &str,
    facts: &Facts,
    cross_arch: Option<&str>,
    varmap: &VarMap,
) -> String {
    let cmd = varmap.scalar("packaging_command").unwrap_or_default();

    let mut strings = vec![format!("FROM {base}")];

    strings.push(format!(
        "\nRUN {}",
        main_commands(facts, cross_arch, varmap, cmd).join(" && \\\n    ")
    ));

    if cross_arch.is_some() && varmap.contains("cross_pkgs") {
        strings.push(format!(
            "\nRUN {}",
            cross_commands(facts, varmap, cmd).join(" && \\\n    ")
        ));
    }

    if let Some(pypi_pkgs) = varmap.list("pypi_pkgs") {
        strings.push(format!(
            "\nRUN pip3 install{}",
            aligned_list(pypi_pkgs, "RUN pip3 ".len())
        ));
    }

    if let Some(cpan_pkgs) = varmap.list("cpan_pkgs") {
        strings.push(format!(
            "\nRUN cpanm --notest{}",
            aligned_list(cpan_pkgs, "RUN cpanm ".len())
        ));
    }

    strings.push(common_env(varmap));

    if let Some(cross) = cross_arch {
        strings.push(cross_env(cross, varmap));
    }

    strings.join("\n")
}

fn main_commands(
    facts: &Facts,
    cross_arch: Option<&str>,
    varmap: &VarMap,
    cmd: &str,
) -> Vec<String> {
    let pkgs = aligned_list(
        varmap.list("pkgs").unwrap_or(&[]),
        "RUN ".len() + cmd.len() + 1,
    );

    let mut commands = Vec::new();

    match facts.packaging_format() {
        PackagingFormat::Deb => {
            commands.extend([
                "export DEBIAN_FRONTEND=noninteractive".to_string(),
                format!("{cmd} update"),
                format!("{cmd} dist-upgrade -y"),
                format!("{cmd} install --no-install-recommends -y{pkgs}"),
                format!("{cmd} autoremove -y"),
                format!("{cmd} autoclean -y"),
                r"sed -Ei 's,^# (en_US\.UTF-8 .*)$,\1,' /etc/locale.gen".to_string(),
                "dpkg-reconfigure locales".to_string(),
            ]);
        }
        PackagingFormat::Rpm => {
            // Rawhide needs this because the keys used to sign packages are
            // cycled from time to time.
            if facts.os_name() == "Fedora" && facts.os_version() == "Rawhide" {
                commands.push(format!("{cmd} update -y --nogpgcheck fedora-gpg-keys"));
            }

            if facts.os_name() == "CentOS" {
                // The Stream release gets its packages from the Stream
                // repositories.
                if facts.os_version() == "Stream" {
                    commands.push(format!("{cmd} install -y centos-release-stream"));
                }

                // Starting with CentOS 8, most -devel packages are shipped
                // in the PowerTools repository, which is not enabled by
                // default.
                if facts.os_version() != "7" {
                    let powertools = if facts.os_version() == "Stream" {
                        "Stream-PowerTools"
                    } else {
                        "PowerTools"
                    };

                    commands.extend([
                        format!("{cmd} install 'dnf-command(config-manager)' -y"),
                        format!("{cmd} config-manager --set-enabled -y {powertools}"),
                    ]);
                }

                // Some of the packages we need are not part of CentOS proper
                // and are only available through EPEL.
                commands.push(format!("{cmd} install -y epel-release"));
            }

            commands.extend([
                format!("{cmd} update -y"),
                format!("{cmd} install -y{pkgs}"),
            ]);

            // openSUSE doesn't seem to have a convenient way to remove all
            // unnecessary packages, but CentOS and Fedora do.
            if facts.os_name() == "OpenSUSE" {
                commands.push(format!("{cmd} clean --all"));
            } else {
                commands.extend([format!("{cmd} autoremove -y"), format!("{cmd} clean all -y")]);
            }
        }
        PackagingFormat::Other => {}
    }

    commands.push("mkdir -p /usr/libexec/ccache-wrappers".to_string());

    let ccache = varmap.scalar("paths_ccache").unwrap_or_default();
    let cc = varmap.scalar("paths_cc").unwrap_or_default();
    match cross_arch.and(varmap.scalar("cross_abi")) {
        Some(abi) => {
            commands.extend([
                format!("ln -s {ccache} /usr/libexec/ccache-wrappers/{abi}-cc"),
                format!("ln -s {ccache} /usr/libexec/ccache-wrappers/{abi}-$(basename {cc})"),
            ]);
        }
        None => {
            commands.extend([
                format!("ln -s {ccache} /usr/libexec/ccache-wrappers/cc"),
                format!("ln -s {ccache} /usr/libexec/ccache-wrappers/$(basename {cc})"),
            ]);
        }
    }

    commands
}

fn cross_commands(facts: &Facts, varmap: &VarMap, cmd: &str) -> Vec<String> {
    let cross_pkgs = aligned_list(
        varmap.list("cross_pkgs").unwrap_or(&[]),
        "RUN ".len() + cmd.len() + 1,
    );

    match facts.packaging_format() {
        PackagingFormat::Deb => {
            let deb_arch = varmap.scalar("cross_arch_deb").unwrap_or_default();
            vec![
                "export DEBIAN_FRONTEND=noninteractive".to_string(),
                format!("dpkg --add-architecture {deb_arch}"),
                format!("{cmd} update"),
                format!("{cmd} dist-upgrade -y"),
                format!("{cmd} install --no-install-recommends -y dpkg-dev"),
                format!("{cmd} install --no-install-recommends -y{cross_pkgs}"),
                format!("{cmd} autoremove -y"),
                format!("{cmd} autoclean -y"),
            ]
        }
        PackagingFormat::Rpm => vec![
            format!("{cmd} install -y{cross_pkgs}"),
            format!("{cmd} clean all -y"),
        ],
        PackagingFormat::Other => Vec::new(),
    }
}

fn common_env(varmap: &VarMap) -> String {
    let make = varmap.scalar("paths_make").unwrap_or_default();
    let ninja = varmap.scalar("paths_ninja").unwrap_or_default();
    let python = varmap.scalar("paths_python").unwrap_or_default();

    format!(
        "\nENV LANG \"en_US.UTF-8\"\n\n\
         ENV MAKE \"{make}\"\n\
         ENV NINJA \"{ninja}\"\n\
         ENV PYTHON \"{python}\"\n\n\
         ENV CCACHE_WRAPPERSDIR \"/usr/libexec/ccache-wrappers\""
    )
}

fn cross_env(cross_arch: &str, varmap: &VarMap) -> String {
    let abi = varmap.scalar("cross_abi").unwrap_or_default();

    let mut vars = vec![
        format!("ENV ABI \"{abi}\""),
        format!("ENV CONFIGURE_OPTS \"--host={abi}\""),
    ];

    if cross_arch.starts_with("mingw") {
        vars.push(format!(
            "ENV MESON_OPTS \"--cross-file=/usr/share/mingw/toolchain-{cross_arch}.meson\""
        ));
    } else {
        vars.push(format!("ENV MESON_OPTS \"--cross-file={abi}\""));
    }

    format!("\n{}", vars.join("\n"))
}

/// Join a package list onto continuation lines aligned under the command.
fn aligned_list(items: &[String], indent: usize) -> String {
    let align = format!(" \\\n{}", " ".repeat(indent));
    let mut out = String::new();
    for item in items {
        out.push_str(&align);
        out.push_str(item);
    }
    out
}
