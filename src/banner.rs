// src/banner.rs

/// Prints the test-run startup banner to the console.
pub fn print_banner() {
    // Using a raw string literal for the multi-line banner
    let banner = r#"
  ___   _   _    ___     ___ ___ ___
 / __| /_\ | |  / __|___| __|_  ) __|
| (__ / _ \| |_| (__|___| _| / /| _|
 \___/_/ \_\____\___|   |___/___|___|

    End-to-end smoke tests for the calculation orchestrator
"#;
    println!("{}", banner);
}
