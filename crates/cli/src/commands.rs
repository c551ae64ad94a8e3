use std::path::Path;

use ciforge::{
    fs::real::RealFileSystem,
    inventory::{Inventory, yaml::YamlInventoryLoader},
    mapping::{Mappings, yaml::YamlMappingLoader},
    project::{Projects, yaml::YamlProjectLoader},
    recipe::{RecipeGenerator, RecipeRequest},
};
use console::style;
use tracing::debug;

use crate::{
    cli::{ClapCommands, RecipeArgs},
    tables,
};

/// Primary command dispatcher that routes to the appropriate command handler
pub(crate) fn dispatch_command(command: &ClapCommands, data_dir: &Path) -> i32 {
    debug!("Dispatching command: {:?}", command);

    let result = match command {
        ClapCommands::Hosts => handle_hosts(data_dir),
        ClapCommands::Projects => handle_projects(data_dir),
        ClapCommands::Dockerfile(args) => handle_recipe(data_dir, args, Output::Dockerfile),
        ClapCommands::Variables(args) => handle_recipe(data_dir, args, Output::Variables),
    };

    match result {
        Ok(()) => 0,
        Err(message) => {
            report_error(&message);
            1
        }
    }
}

enum Output {
    Dockerfile,
    Variables,
}

fn handle_hosts(data_dir: &Path) -> Result<(), String> {
    let inventory = load_inventory(data_dir)?;

    println!("{}", tables::hosts_table(&inventory));
    Ok(())
}

fn handle_projects(data_dir: &Path) -> Result<(), String> {
    let projects = load_projects(data_dir)?;

    println!("{}", tables::projects_table(&projects));
    Ok(())
}

fn handle_recipe(data_dir: &Path, args: &RecipeArgs, output: Output) -> Result<(), String> {
    let inventory = load_inventory(data_dir)?;
    let projects = load_projects(data_dir)?;
    let mappings = load_mappings(data_dir)?;

    let generator = RecipeGenerator::new(&inventory, &projects, &mappings);
    let request = RecipeRequest {
        hosts: &args.hosts,
        projects: &args.projects,
        cross_arch: args.cross_arch.as_deref(),
    };

    let rendered = match output {
        Output::Dockerfile => generator.dockerfile(&request),
        Output::Variables => generator.variables(&request),
    }
    .map_err(|e| e.to_string())?;

    println!("{rendered}");
    Ok(())
}

fn load_inventory(data_dir: &Path) -> Result<Inventory, String> {
    YamlInventoryLoader::new(RealFileSystem)
        .load(&data_dir.join("inventory"))
        .map_err(|e| e.to_string())
}

fn load_projects(data_dir: &Path) -> Result<Projects, String> {
    YamlProjectLoader::new(RealFileSystem)
        .load(&data_dir.join("projects"))
        .map_err(|e| e.to_string())
}

fn load_mappings(data_dir: &Path) -> Result<Mappings, String> {
    YamlMappingLoader::new(RealFileSystem)
        .load(&data_dir.join("mappings.yml"))
        .map_err(|e| e.to_string())
}

fn report_error(message: &str) {
    eprintln!("{} {message}", style("Error:").red().bold());
}
