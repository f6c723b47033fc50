// Leave-one-out evaluation of a mean-target baseline.
//
// cargo run --example leave_one_out
use std::error::Error;

use tabular_features::io::{load_schema, load_table};
use tabular_features::{EncodedDataset, EncoderConfig};

const SCHEMA: &str = r#"[
    { "Name": "rooms", "Type": 0 },
    { "Name": "district", "Type": 1, "Values": ["north", "south", "east"] },
    { "Name": "listing", "Type": 2 },
    { "Name": "price", "Type": 0 }
]"#;

const DATA: &str = "\
3,1,L-001,210.0
4,2,L-002,265.5
2,3,L-003,150.0
5,1,L-004,320.0
3,2,L-005,230.0
";

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = EncoderConfig::default();
    let schema = load_schema(SCHEMA.as_bytes())?;
    let table = load_table(DATA.as_bytes(), &schema, &config.csv)?;
    let dataset = EncodedDataset::new(schema, table, config);
    println!("features: {:?}", dataset.layout().feature_names());

    let mut total_abs_error = 0.0f32;
    for fold in dataset.leave_one_out_folds() {
        let dims = fold.dimensions();
        let (_, y) = fold.to_arrays()?;
        let prediction = y.mean().unwrap_or(0.0);

        let mut input = vec![0.0f32; dims.num_input];
        let mut output = [0.0f32];
        let held_out = fold.held_out_row(&mut input, &mut output)?;
        let error = (prediction - output[0]).abs();
        total_abs_error += error;

        println!(
            "held out {:?} ({}): input={:?} target={:.1} predicted={:.1} |err|={:.1}",
            held_out,
            dataset.display_value(held_out.unwrap_or(0), 1).unwrap_or("-"),
            input,
            output[0],
            prediction,
            error
        );
    }
    println!("LOO MAE: {:.2}", total_abs_error / dataset.len() as f32);
    Ok(())
}
