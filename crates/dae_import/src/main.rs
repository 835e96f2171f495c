//! CLI driver: import a COLLADA file into an in-memory host scene and
//! report the corrected actors.
//!
//! Run with: cargo run -- model.dae Scene --axis Z_UP --scale 2.62128

use std::env;
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use dae_import::{run_import, ImportOptions, MemoryHost};

struct CliArgs {
    path: String,
    scene_id: String,
    options: ImportOptions,
}

fn print_usage() {
    println!("Usage: dae_import <file.dae> [scene-id] [flags]");
    println!();
    println!("Flags:");
    println!("  --options <file.json>     load adjustment options from JSON");
    println!("  --axis <Z_UP|Y_UP|off>    axis conversion preset (default Z_UP)");
    println!("  --scale <divisor|off>     uniform scale divisor (default 2.62128)");
    println!("  --no-hierarchy            skip grouping/reparenting");
    println!();
    println!("Examples:");
    println!("  cargo run -- model.dae");
    println!("  cargo run -- model.dae Scene --axis off --scale 100");
}

fn parse_args() -> Result<Option<CliArgs>, String> {
    let mut args = env::args().skip(1);
    let mut path = None;
    let mut scene_id = None;
    let mut options = ImportOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(None),
            "--options" => {
                let file = args.next().ok_or("--options needs a file argument")?;
                options = ImportOptions::from_json_file(&file)
                    .map_err(|err| format!("could not load '{}': {}", file, err))?;
            }
            "--axis" => {
                let value = args.next().ok_or("--axis needs a value")?;
                options.adjust_axis = match value.as_str() {
                    "off" => None,
                    preset => Some(preset.parse()?),
                };
            }
            "--scale" => {
                let value = args.next().ok_or("--scale needs a value")?;
                options.adjust_scale = match value.as_str() {
                    "off" => None,
                    divisor => Some(divisor.to_string()),
                };
            }
            "--no-hierarchy" => options.adjust_hierarchy = false,
            flag if flag.starts_with("--") => return Err(format!("unknown flag '{}'", flag)),
            positional if path.is_none() => path = Some(positional.to_string()),
            positional if scene_id.is_none() => scene_id = Some(positional.to_string()),
            extra => return Err(format!("unexpected argument '{}'", extra)),
        }
    }

    match path {
        Some(path) => Ok(Some(CliArgs {
            path,
            scene_id: scene_id.unwrap_or_else(|| "Scene".to_string()),
            options,
        })),
        None => Ok(None),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(message) => {
            print_usage();
            return Err(anyhow!(message));
        }
    };

    println!("Importing COLLADA file: {}", args.path);

    let mut host = MemoryHost::new(&args.scene_id);
    let summary = run_import(
        &mut host,
        Path::new(&args.path),
        &args.scene_id,
        &args.options,
    )
    .with_context(|| format!("importing '{}'", args.path))?;

    println!("\n=== Scene: {} ===", args.scene_id);
    println!("Nodes: {}", summary.nodes);
    println!("Adjusted: {}", summary.adjusted);
    println!("Groupings: {}", summary.groupings);
    println!("Reparented: {}", summary.reparented);
    println!("Skipped: {}", summary.skipped);

    println!("\n--- Actors ---");
    let mut actors: Vec<_> = host.actors().collect();
    actors.sort_by_key(|(name, _)| name.to_string());
    for (name, actor) in actors {
        println!(
            "  {} - parent {} - ({:.3}, {:.3}, {:.3}) - {} vertices{}",
            name,
            actor.parent.as_deref().unwrap_or("None"),
            actor.position.x,
            actor.position.y,
            actor.position.z,
            actor.vertices.len(),
            if actor.grouping { " (grouping)" } else { "" },
        );
    }

    Ok(())
}
