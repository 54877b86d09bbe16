//! CLI for rasterlens: inspect image container files and dump their parsed
//! structure (PNG, GIF, BMP, ZIP, EXIF/TIFF, ICC).

#![cfg(feature = "cli")]

use clap::Parser;
use indexmap::IndexMap;
use rasterlens::{detect_file_type, parse, FileType, ParsedFile};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[derive(Parser)]
#[command(name = "rasterlens")]
#[command(about = "Inspect raster container files (PNG, GIF, BMP, ZIP, EXIF/TIFF, ICC)", long_about = None)]
struct Args {
    /// Path to a file or directory to inspect (use -d/--directory for a whole directory)
    path: Option<String>,

    /// Inspect a whole directory (optionally with -r to recurse into subdirectories)
    #[arg(short = 'd', long = "directory", value_name = "DIR")]
    directory: Option<String>,

    /// When inspecting a directory, recurse into subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// File extensions to inspect (comma-separated). No-extension files are always
    /// inspected (type guessed from content). Use --all to ignore the filter.
    #[arg(short, long, default_value = "png,gif,bmp,zip,tif,tiff,icc,icm")]
    extensions: String,

    /// Inspect all files and guess type from content (ignore extension filter)
    #[arg(long)]
    all: bool,

    /// Output JSON per result (one line per file unless --pretty)
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON (use with --json)
    #[arg(long)]
    pretty: bool,

    /// Quiet: only print files that fail to parse
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let exts: std::collections::HashSet<String> = args
        .extensions
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .collect();

    let path_str = args
        .directory
        .as_ref()
        .or(args.path.as_ref())
        .ok_or("Missing path: give a file/directory as argument or use -d/--directory <DIR>")?;
    let path = Path::new(path_str.as_str());

    if !path.exists() {
        eprintln!("Not found: {}", path.display());
        std::process::exit(1);
    }

    if path.is_file() {
        if args.directory.is_some() {
            eprintln!("--directory expects a directory, not a file: {}", path.display());
            std::process::exit(1);
        }
        inspect_file(path, &args, &exts)?;
        return Ok(());
    }

    if path.is_dir() {
        if !args.quiet {
            eprintln!(
                "Inspecting directory: {} {}",
                path.display(),
                if args.recursive { "(recursive)" } else { "" }
            );
        }
        inspect_dir(path, &args, &exts)?;
        return Ok(());
    }

    eprintln!("Not a file or directory: {}", path.display());
    std::process::exit(1);
}

fn inspect_file(
    path: &Path,
    args: &Args,
    exts: &std::collections::HashSet<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    // Skip only when: not --all, file has an extension, and it's not in the list.
    // No extension => always inspect (guess from content).
    if !args.all && !ext.is_empty() && !exts.is_empty() && !exts.contains(&ext) {
        if !args.quiet {
            eprintln!("Skip (extension): {}", path.display());
        }
        return Ok(());
    }
    let bytes = fs::read(path)?;
    let result = parse(&bytes);
    print_result(path.display().to_string(), &result, args, &bytes)?;
    Ok(())
}

fn inspect_dir(
    dir: &Path,
    args: &Args,
    exts: &std::collections::HashSet<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let walker = if args.recursive {
        WalkDir::new(dir).into_iter()
    } else {
        WalkDir::new(dir).max_depth(1).into_iter()
    };

    let mut total = 0u64;
    let mut failed = 0u64;

    for entry in walker.filter_entry(|e| !e.path().starts_with(".")) {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if !args.all && !ext.is_empty() && !exts.is_empty() && !exts.contains(&ext) {
            continue;
        }
        total += 1;
        let bytes = match fs::read(path) {
            Ok(b) => b,
            Err(_) => continue,
        };
        let result = parse(&bytes);
        if result.is_err() {
            failed += 1;
        }
        print_result(path.display().to_string(), &result, args, &bytes)?;
    }

    if !args.quiet {
        eprintln!("Inspected {} files, {} failed to parse", total, failed);
    }
    Ok(())
}

fn print_result(
    path: String,
    result: &Result<ParsedFile, rasterlens::ParseError>,
    args: &Args,
    bytes: &[u8],
) -> Result<(), Box<dyn std::error::Error>> {
    if args.quiet && result.is_ok() {
        return Ok(());
    }
    let detected = detect_file_type(bytes);

    if args.json {
        let mut out = IndexMap::<String, serde_json::Value>::new();
        out.insert("sha256".to_string(), serde_json::Value::String(sha256_hex(bytes)));
        out.insert("path".to_string(), serde_json::Value::String(path.clone()));
        out.insert("size_bytes".to_string(), serde_json::to_value(bytes.len())?);
        out.insert(
            "format".to_string(),
            serde_json::Value::String(detected.label().to_string()),
        );
        match result {
            Ok(parsed) => {
                out.insert("ok".to_string(), serde_json::Value::Bool(true));
                out.insert("record".to_string(), serde_json::to_value(parsed)?);
            }
            Err(err) => {
                out.insert("ok".to_string(), serde_json::Value::Bool(false));
                out.insert("error".to_string(), serde_json::Value::String(err.to_string()));
            }
        }
        let json_str = if args.pretty {
            serde_json::to_string_pretty(&out)?
        } else {
            serde_json::to_string(&out)?
        };
        println!("{}", json_str);
        return Ok(());
    }

    match result {
        Ok(parsed) => {
            println!("OK {} ({} bytes)", path, bytes.len());
            println!("  sha256: {}", sha256_hex(bytes));
            println!("  format: {}", parsed.file_type().label());
            for line in parsed.summary(bytes) {
                println!("  - {}", line);
            }
        }
        Err(err) => {
            println!("UNPARSEABLE {} ({} bytes)", path, bytes.len());
            println!("  sha256: {}", sha256_hex(bytes));
            if detected != FileType::Unknown {
                println!("  format: {}", detected.label());
            }
            println!("  error: {}", err);
        }
    }
    Ok(())
}
