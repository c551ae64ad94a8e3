//! Shell-variable rendering: one `KEY='VALUE'` line per variable, consumable
//! by CI backends.

use crate::varmap::{VarMap, VarValue};

pub(super) fn render(varmap: &VarMap) -> String {
    let mut strings = Vec::with_capacity(varmap.len());

    for (key, value) in varmap.iter() {
        // Path variables lose their prefix; everything else keeps its name.
        let name = key.strip_prefix("paths_").unwrap_or(key).to_uppercase();

        let value = match value {
            VarValue::Scalar(s) => s.clone(),
            VarValue::List(l) => l.join(" "),
        };

        strings.push(format!("{name}='{value}'"));
    }

    strings.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_lists_and_paths_render_as_assignments() {
        let mut varmap = VarMap::new();
        varmap.set_scalar("packaging_command", "apt-get");
        varmap.set_scalar("paths_cc", "/usr/bin/gcc");
        varmap.set_list("pkgs", ["gcc", "ccache"]);

        let output = render(&varmap);
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines.contains(&"PACKAGING_COMMAND='apt-get'"));
        assert!(lines.contains(&"CC='/usr/bin/gcc'"));
        assert!(lines.contains(&"PKGS='ccache gcc'"));
    }

    #[test]
    fn empty_varmap_renders_to_nothing() {
        assert_eq!(render(&VarMap::new()), "");
    }
}
