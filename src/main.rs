//! StatForge: table statistics CLI
//!
//! This is the main entrypoint that orchestrates request parsing, the
//! requested analysis, the console report and file outputs.

use anyhow::Context;
use clap::Parser;
use statforge::response::print_table;
use statforge::{handle_request, AnalysisOutcome, Args, ValidationError};
use std::time::Instant;

fn main() -> statforge::Result<()> {
    let args = Args::parse();

    if args.verbose {
        println!("StatForge - Table Statistics");
        println!("============================\n");
    }

    if let Err(err) = run(&args) {
        // User-correctable input problems get a plain message and their
        // own exit status; anything else is an internal failure.
        if let Some(validation) = err.downcast_ref::<ValidationError>() {
            eprintln!("Input error: {validation}");
            std::process::exit(2);
        }
        return Err(err);
    }
    Ok(())
}

fn run(args: &Args) -> statforge::Result<()> {
    let start_time = Instant::now();

    let request = args.to_request()?;
    if args.verbose {
        println!("Analysis: {:?}", request.analysis_type);
        println!("Variables: {}", request.columns.len());
    }

    let outcome = handle_request(&request)?;
    report(args, &outcome)?;

    if let Some(json_path) = &args.json {
        let json = serde_json::to_string_pretty(&outcome.response)?;
        std::fs::write(json_path, json)
            .with_context(|| format!("cannot write response payload to {json_path}"))?;
        println!("\nResponse payload saved to: {json_path}");
    }

    if args.verbose {
        let elapsed = start_time.elapsed();
        println!("\nTotal processing time: {:.2}s", elapsed.as_secs_f64());
    }

    Ok(())
}

/// Print the console report and write the dendrogram plot if one exists.
fn report(args: &Args, outcome: &AnalysisOutcome) -> statforge::Result<()> {
    let response = &outcome.response;

    print_table("Input Data", &response.input_table);
    print_table("Result", &response.result_table);

    if let Some(matrix) = &response.distance_matrix {
        print_table("Distance Matrix", matrix);
    }

    if let Some(png) = &outcome.plot_png {
        std::fs::write(&args.plot, png)
            .with_context(|| format!("cannot write dendrogram plot to {}", args.plot))?;
        println!("\nDendrogram saved to: {}", args.plot);
    }

    println!("\nGenerated at: {}", response.generated_at.to_rfc3339());
    Ok(())
}
