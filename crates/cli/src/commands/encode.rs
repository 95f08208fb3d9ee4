//! Feature inspection for a single serving record

use crate::output::{print_success, print_table, print_warning, OutputFormat};
use anyhow::Result;
use delay_lib::features::{FeatureCatalogue, CATALOGUE_VERSION};
use delay_lib::validation::is_valid;
use delay_lib::FlightRecord;
use serde::Serialize;
use tabled::Tabled;

#[derive(Tabled, Serialize)]
struct FeatureRow {
    #[tabled(rename = "Column")]
    column: String,
    #[tabled(rename = "Value")]
    value: f32,
}

pub fn run(airline: String, flight_type: String, month: i64, format: OutputFormat) -> Result<()> {
    let record = FlightRecord::new(airline, flight_type, month);
    let valid = is_valid(&record);

    let catalogue = FeatureCatalogue::new();
    let vector = catalogue.encode(&record);
    let rows: Vec<FeatureRow> = catalogue
        .indicators()
        .iter()
        .zip(vector)
        .map(|(indicator, value)| FeatureRow {
            column: indicator.column_name(),
            value,
        })
        .collect();

    match format {
        OutputFormat::Table => {
            if valid {
                print_success("Record is valid");
            } else {
                print_warning("Record would be rejected by the serving endpoint");
            }
            print_table(&rows, format);
        }
        OutputFormat::Json => {
            let out = serde_json::json!({
                "valid": valid,
                "catalogue_version": CATALOGUE_VERSION,
                "features": rows,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    Ok(())
}
