//! hippo_launch CLI

use clap::{Parser, Subcommand};
use hippo_launch::{
    arguments::parse_launch_arg, build_launch, vehicles, BuildOptions, LaunchArguments,
    LaunchGraph, MergePolicy,
};
use std::{
    path::{Path, PathBuf},
    process,
};

#[derive(Parser)]
#[command(name = "hippo_launch")]
#[command(about = "Compose the launch graph of a HippoCampus vehicle", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    verbose: bool,

    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a launch graph and write it as JSON
    Build {
        /// Launch description name (see `list`)
        launch: String,

        /// Launch arguments (key:=value)
        #[arg(value_parser = parse_launch_arg)]
        args: Vec<(String, String)>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// YAML file of launch arguments; command-line values take precedence
        #[arg(long)]
        args_file: Option<PathBuf>,

        /// Let later parameter sources overwrite duplicate keys instead of failing
        #[arg(long)]
        last_wins: bool,
    },

    /// Show the arguments a launch description declares
    ShowArgs {
        /// Launch description name
        launch: String,
    },

    /// List available launch descriptions
    List,
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Build {
            launch,
            args,
            output,
            args_file,
            last_wins,
        } => build_and_write(&launch, args, args_file.as_deref(), last_wins, output.as_deref()),
        Commands::ShowArgs { launch } => show_args(&launch),
        Commands::List => {
            for name in vehicles::LAUNCH_NAMES {
                println!("{}", name);
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn build_and_write(
    launch: &str,
    args: Vec<(String, String)>,
    args_file: Option<&Path>,
    last_wins: bool,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let cli_args: LaunchArguments = args.into_iter().collect();
    let overrides = match args_file {
        Some(path) => LaunchArguments::from_yaml_file(path)?.merge(cli_args),
        None => cli_args,
    };

    let policy = if last_wins {
        MergePolicy::LastWins
    } else {
        MergePolicy::Reject
    };
    let options = BuildOptions::from_env().with_merge_policy(policy);

    let graph = build_launch(launch, &overrides, &options)?;
    let json = graph.to_json()?;

    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            log::info!("Generated launch graph: {}", path.display());
        }
        None => println!("{}", json),
    }
    log_summary(&graph);

    Ok(())
}

fn log_summary(graph: &LaunchGraph) {
    let containers = graph.all_containers();
    let components: usize = containers.iter().map(|c| c.components.len()).sum();
    log::info!(
        "  {} nodes, {} containers, {} composable nodes",
        graph.all_nodes().len(),
        containers.len(),
        components
    );
}

fn show_args(launch: &str) -> Result<(), Box<dyn std::error::Error>> {
    let description = vehicles::launch_description(launch)?;
    for argument in description.arguments().iter() {
        println!("'{}':", argument.name);
        println!("    {}", argument.description);
        match &argument.default {
            Some(default) => println!("    (default: '{}')", default),
            None => println!("    (required)"),
        }
        if let Some(choices) = &argument.choices {
            println!("    (choices: {})", choices.join(", "));
        }
    }
    Ok(())
}
