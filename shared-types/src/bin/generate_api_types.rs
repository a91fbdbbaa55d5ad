use shared_types::*;
use std::fs;
use std::path::PathBuf;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for the widget
    let mut types = Vec::new();

    // Contact types
    types.push(clean_type(ContactId::export_to_string()?));
    types.push(clean_type(Stage::export_to_string()?));
    types.push(clean_type(ReferralStatus::export_to_string()?));
    types.push(clean_type(ContactTag::export_to_string()?));
    types.push(clean_type(ReferralContact::export_to_string()?));
    types.push(clean_type(TrackedContact::export_to_string()?));
    types.push(clean_type(ContactsResponse::export_to_string()?));

    // Filter types
    types.push(clean_type(FilterForm::export_to_string()?));
    types.push(clean_type(FilterCriteria::export_to_string()?));

    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("../widget/src/api-types"));
    fs::create_dir_all(&output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    // Every type lands in the same file, so cross-type imports are dropped
    let filtered: Vec<&str> = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect();

    let result = filtered.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
