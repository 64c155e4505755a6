use clap::Parser;
use luachef::prelude::*;
use std::fs;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

/// Scan a Foldit cookbook file and generate Lua equivalents of its recipes.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Cookbook file to be scanned
    #[arg(default_value = "all.macro")]
    infile: PathBuf,

    /// Report file listing all recipes and their descriptions (stdout if omitted)
    outfile: Option<PathBuf>,

    /// Include details of each GUI command in the Lua output
    #[arg(long)]
    detail: bool,

    /// Pass through recipes written against V1 of the Lua interface
    #[arg(long = "lua-v1")]
    lua_v1: bool,

    /// Pass through recipes written against V2 of the Lua interface
    #[arg(long = "lua-v2")]
    lua_v2: bool,

    /// Skip GUI recipes entirely
    #[arg(long = "no-gui")]
    no_gui: bool,

    /// Directory receiving the generated Lua files
    #[arg(long, default_value = ".")]
    outdir: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let options = ScanOptions {
        gui: !cli.no_gui,
        detail: cli.detail,
        lua_v1: cli.lua_v1,
        lua_v2: cli.lua_v2,
    };

    if let Err(e) = fs::create_dir_all(&cli.outdir) {
        exit_with_error(&format!(
            "Failed to create output directory '{}': {}",
            cli.outdir.display(),
            e
        ));
    }

    let infile = fs::File::open(&cli.infile).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to open cookbook '{}': {}",
            cli.infile.display(),
            e
        ))
    });

    let mut report: Box<dyn Write> = match &cli.outfile {
        Some(path) => Box::new(BufWriter::new(fs::File::create(path).unwrap_or_else(|e| {
            exit_with_error(&format!(
                "Failed to create report file '{}': {}",
                path.display(),
                e
            ))
        }))),
        None => Box::new(io::stdout()),
    };

    let banner = format!("luachef {}", env!("CARGO_PKG_VERSION"));
    if let Err(e) = writeln!(report, "{}", banner) {
        exit_with_error(&format!("Failed to write report: {}", e));
    }

    let mut sink = DirectorySink::new(&cli.outdir);
    let scanner = Scanner::new(options);
    let stats = scanner
        .scan(BufReader::new(infile), &mut sink, &mut report)
        .unwrap_or_else(|e| exit_with_error(&format!("Scan failed: {}", e)));

    print_summary(&mut report, &banner, &stats)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to write report: {}", e)));
}

fn print_summary(report: &mut dyn Write, banner: &str, stats: &RunStats) -> io::Result<()> {
    writeln!(
        report,
        "========================================================================="
    )?;
    writeln!(report, "{} - complete", banner)?;
    writeln!(report, "recipes read = {}", stats.records_read)?;
    writeln!(report, "GUI recipes = {}", stats.gui_recipes)?;
    if stats.gui_skipped > 0 {
        writeln!(report, "GUI recipes skipped = {}", stats.gui_skipped)?;
    }
    writeln!(report, "Lua recipes = {}", stats.script_recipes)?;
    if stats.v1_skipped > 0 {
        writeln!(report, "Lua V1 recipes skipped = {}", stats.v1_skipped)?;
    }
    if stats.v2_skipped > 0 {
        writeln!(report, "Lua V2 recipes skipped = {}", stats.v2_skipped)?;
    }
    writeln!(report, "JSON errors = {}", stats.decode_error_count())?;
    Ok(())
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
