//! Isosurface Extraction Demo
//!
//! This demo walks through the isomesh pipeline end to end:
//! 1. Build a scalar field and paint a sphere into it
//! 2. Extract the isosurface (sequential, parallel, streaming)
//! 3. Print mesh statistics
//! 4. Rebuild the field at double resolution and re-extract
//! 5. Export the final mesh as OBJ
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=debug cargo run --release --bin isosurface_demo -- 16 output/sphere.obj
//! ```

use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::process;

use instant::Instant;

use isomesh_rs::{
    write_obj, FieldConfig, IsoError, IsosurfaceExtractor, MeshBuffers, MeshStats, Point3,
    ScalarField,
};

const DEFAULT_RESOLUTION: f32 = 16.0;
const DEFAULT_OUTPUT: &str = "output/sphere.obj";

const CENTER: Point3 = Point3::new(2.0, 2.0, 2.0);
const RADIUS: f32 = 1.5;

fn step(title: &str) {
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ {:<60}│", title);
    println!("└─────────────────────────────────────────────────────────────┘");
}

fn print_stats(stats: &MeshStats) {
    println!("  Triangle count:  {}", stats.triangle_count);
    println!("  Vertex count:    {}", stats.vertex_count);
    println!("  Surface area:    {:.4}", stats.surface_area);
    println!(
        "  Bounding box:    ({:.2}, {:.2}, {:.2}) → ({:.2}, {:.2}, {:.2})",
        stats.bbox_min.x,
        stats.bbox_min.y,
        stats.bbox_min.z,
        stats.bbox_max.x,
        stats.bbox_max.y,
        stats.bbox_max.z
    );
}

/// Mark every grid point within the sphere as inside.
fn paint_sphere(field: &mut ScalarField) {
    let inside = field.inside_value();
    let outside = field.outside_value();
    field.fill_with(|p| if p.distance(CENTER) < RADIUS { inside } else { outside });
}

fn run(resolution: f32, output_path: &str) -> Result<(), IsoError> {
    // =========================================================================
    // Step 1: Build the field
    // =========================================================================
    step("Step 1: Build Scalar Field");

    let config = FieldConfig::new(resolution, [4.0; 3], 0.5, Point3::ZERO);
    let start = Instant::now();
    let mut field = ScalarField::initialize(config)?;
    paint_sphere(&mut field);
    let build_time = start.elapsed();

    let [nx, ny, nz] = field.extents();
    println!("  Resolution:      {}", field.resolution());
    println!("  Extents:         {} × {} × {}", nx, ny, nz);
    println!("  Inside points:   {}", field.count_inside());
    println!("  Build time:      {:.3}ms", build_time.as_secs_f64() * 1000.0);
    println!();

    // =========================================================================
    // Step 2: Extraction
    // =========================================================================
    step("Step 2: Isosurface Extraction");
    println!();

    let extractor = IsosurfaceExtractor::new();

    println!("  [Sequential Extraction]");
    let start = Instant::now();
    let vertices = extractor.extract(&field)?;
    let seq_time = start.elapsed();
    println!("    Triangles:     {}", vertices.len() / 3);
    println!("    Time:          {:.3}ms", seq_time.as_secs_f64() * 1000.0);
    println!();

    println!("  [Parallel Extraction]");
    let start = Instant::now();
    let parallel = extractor.extract_parallel(&field)?;
    let par_time = start.elapsed();
    println!("    Triangles:     {}", parallel.len() / 3);
    println!("    Time:          {:.3}ms", par_time.as_secs_f64() * 1000.0);
    println!(
        "    Speedup:       {:.2}x",
        seq_time.as_secs_f64() / par_time.as_secs_f64().max(f64::EPSILON)
    );
    println!("    Identical:     {}", parallel == vertices);
    println!();

    println!("  [Callback Extraction (no vertex list)]");
    let start = Instant::now();
    let mut area = 0.0f32;
    let count = extractor.extract_with(&field, |tri| area += isomesh_rs::triangle_area(&tri))?;
    let callback_time = start.elapsed();
    println!("    Triangles:     {}", count);
    println!("    Surface area:  {:.4}", area);
    println!("    Time:          {:.3}ms", callback_time.as_secs_f64() * 1000.0);
    println!();

    // =========================================================================
    // Step 3: Mesh statistics
    // =========================================================================
    step("Step 3: Mesh Statistics");

    let stats = MeshStats::from_vertices(&vertices)?;
    print_stats(&stats);
    let buffers = MeshBuffers::from_vertices(&vertices)?;
    println!("  Render buffers:  {} positions, {} normals", buffers.len(), buffers.normals.len());
    println!();

    // =========================================================================
    // Step 4: Resolution change
    // =========================================================================
    step("Step 4: Rebuild At Double Resolution");

    let mut mesh = vertices;
    let start = Instant::now();
    field.reinitialize(config.with_resolution(resolution * 2.0))?;
    paint_sphere(&mut field);
    extractor.extract_into(&field, &mut mesh)?;
    let rebuild_time = start.elapsed();

    let [nx, ny, nz] = field.extents();
    println!("  Extents:         {} × {} × {}", nx, ny, nz);
    println!("  Rebuild time:    {:.3}ms", rebuild_time.as_secs_f64() * 1000.0);
    print_stats(&MeshStats::from_vertices(&mesh)?);
    println!();

    // =========================================================================
    // Step 5: Export to OBJ
    // =========================================================================
    step("Step 5: Export to OBJ");

    if let Some(parent) = Path::new(output_path).parent() {
        std::fs::create_dir_all(parent).ok();
    }

    let start = Instant::now();
    let written = File::create(output_path).and_then(|file| write_obj(&mesh, BufWriter::new(file)));
    match written {
        Ok(()) => {
            println!("  Output file:     {}", output_path);
            println!("  Export time:     {:.3}ms", start.elapsed().as_secs_f64() * 1000.0);
        }
        Err(e) => {
            log::error!("failed to write {}: {}", output_path, e);
            eprintln!("  Error writing OBJ file '{}': {}", output_path, e);
        }
    }
    println!();

    Ok(())
}

fn main() {
    env_logger::init();

    println!("═══════════════════════════════════════════════════════════════");
    println!("          isomesh Isosurface Extraction Demo");
    println!("═══════════════════════════════════════════════════════════════");
    println!();

    let args: Vec<String> = env::args().collect();
    let resolution = match args.get(1).map(|s| s.parse::<f32>()) {
        Some(Ok(r)) => r,
        Some(Err(e)) => {
            eprintln!("Invalid resolution '{}': {}", args[1], e);
            process::exit(2);
        }
        None => {
            println!("Usage: {} [resolution] [output.obj]", args[0]);
            println!();
            println!("Using default: {} → {}", DEFAULT_RESOLUTION, DEFAULT_OUTPUT);
            println!();
            DEFAULT_RESOLUTION
        }
    };
    let output_path = args.get(2).map(String::as_str).unwrap_or(DEFAULT_OUTPUT);

    log::info!("running demo at resolution {}", resolution);

    if let Err(e) = run(resolution, output_path) {
        log::error!("demo failed: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    println!("═══════════════════════════════════════════════════════════════");
    println!("  Done");
    println!("═══════════════════════════════════════════════════════════════");
}
