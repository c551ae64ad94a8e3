use ciforge::{inventory::Inventory, project::Projects};
use comfy_table::{
    ContentArrangement, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL_CONDENSED,
};

pub(crate) fn hosts_table(inventory: &Inventory) -> Table {
    let mut table = new_table(vec!["Host", "OS", "Version", "Format", "Arch"]);

    for host in inventory.names() {
        // names() only yields hosts that exist, the lookup cannot fail
        if let Ok(facts) = inventory.facts(host) {
            table.add_row(vec![
                host.to_string(),
                facts.os_name().to_string(),
                facts.os_version().to_string(),
                facts.packaging_format().to_string(),
                facts.native_arch().to_string(),
            ]);
        }
    }

    table
}

pub(crate) fn projects_table(projects: &Projects) -> Table {
    let mut table = new_table(vec!["Project", "Packages"]);

    for name in projects.names() {
        let packages = projects
            .packages(name)
            .map(|packages| packages.join(", "))
            .unwrap_or_default();
        table.add_row(vec![name.to_string(), packages]);
    }

    table
}

fn new_table(header: Vec<&'static str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);

    table
}
