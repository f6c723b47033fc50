//! End-to-end tests: schema and data text through to encoded arrays.

use approx::assert_abs_diff_eq;
use tabular_features::io::{load_schema, load_table};
use tabular_features::{
    scale_flags, EncodeError, EncodedDataset, EncoderConfig, FeatureLayout, LeaveOneOut,
    ParsePolicy,
};

const SCHEMA: &str = r#"[
    { "Name": "age", "Type": 0 },
    { "Name": "color", "Type": 1, "Values": ["red", "green", "blue"] },
    { "Name": "id", "Type": 2 },
    { "Name": "score", "Type": 0 }
]"#;

const DATA: &str = "\
30,2,x123,0.75
41,1,x124,0.20
19,3,x125,0.55
52,abc,x126,0.10
n/a,2,x127,0.95
";

fn dataset(config: EncoderConfig) -> EncodedDataset {
    let schema = load_schema(SCHEMA.as_bytes()).unwrap();
    let table = load_table(DATA.as_bytes(), &schema, &config.csv).unwrap();
    EncodedDataset::new(schema, table, config)
}

#[test]
fn test_worked_example() {
    let ds = dataset(EncoderConfig::default());
    let fold = ds.training();
    let dims = fold.dimensions();
    assert_eq!((dims.num_data, dims.num_input, dims.num_output), (5, 4, 1));

    let mut input = vec![0.0f32; dims.num_input];
    let mut output = vec![0.0f32; dims.num_output];
    fold.encode_row(0, &mut input, &mut output).unwrap();
    assert_eq!(input, vec![30.0, 0.0, 1.0, 0.0]);
    assert_abs_diff_eq!(output[0], 0.75, epsilon = 1e-6);

    let mut flags = vec![false; dims.num_input];
    fold.scale_flags(&mut flags).unwrap();
    assert_eq!(flags, vec![true, false, false, false]);
}

#[test]
fn test_lenient_parsing_zeroes_bad_cells() {
    let ds = dataset(EncoderConfig::default());
    let (x, y) = ds.training().to_arrays().unwrap();

    // unparseable categorical code leaves the one-hot block empty
    assert_eq!(x.row(3).to_vec(), vec![52.0, 0.0, 0.0, 0.0]);
    // unparseable numeric becomes zero
    assert_eq!(x.row(4).to_vec(), vec![0.0, 0.0, 1.0, 0.0]);
    assert_abs_diff_eq!(y[4], 0.95, epsilon = 1e-6);
}

#[test]
fn test_strict_parsing_reports_bad_cells() {
    let ds = dataset(EncoderConfig::new().with_parse_policy(ParsePolicy::Strict));
    let fold = ds.training();
    let mut input = [0.0f32; 4];
    let mut output = [0.0f32];

    fold.encode_row(0, &mut input, &mut output).unwrap();
    assert!(matches!(
        fold.encode_row(3, &mut input, &mut output),
        Err(EncodeError::MalformedToken { .. })
    ));
    assert!(matches!(
        fold.encode_row(4, &mut input, &mut output),
        Err(EncodeError::MalformedToken { .. })
    ));
}

#[test]
fn test_leave_one_out_cycle() {
    let ds = dataset(EncoderConfig::default());
    let (all_x, all_y) = ds.training().to_arrays().unwrap();

    for fold in ds.leave_one_out_folds() {
        let excluded = fold.leave_one_out().excluded().unwrap();
        let (x, y) = fold.to_arrays().unwrap();
        assert_eq!(x.nrows(), all_x.nrows() - 1);

        let expected: Vec<usize> = (0..ds.len()).filter(|&r| r != excluded).collect();
        for (logical, &physical) in expected.iter().enumerate() {
            assert_eq!(x.row(logical), all_x.row(physical));
            assert_abs_diff_eq!(y[logical], all_y[physical], epsilon = 1e-6);
        }

        let mut input = [0.0f32; 4];
        let mut output = [0.0f32];
        assert_eq!(fold.held_out_row(&mut input, &mut output).unwrap(), Some(excluded));
        assert_eq!(input.to_vec(), all_x.row(excluded).to_vec());
    }
}

#[test]
fn test_exclusion_bounds() {
    let ds = dataset(EncoderConfig::default());
    assert!(ds.fold(LeaveOneOut::Exclude(4)).is_ok());
    assert_eq!(
        ds.fold(LeaveOneOut::Exclude(5)).unwrap_err(),
        EncodeError::IndexOutOfRange { index: 5, len: 5 }
    );
}

#[test]
fn test_layout_matches_encoding() {
    let ds = dataset(EncoderConfig::default());
    let layout = ds.layout();
    assert_eq!(layout.len(), ds.training().dimensions().num_input);
    assert_eq!(layout.scale_flags(), scale_flags(ds.schema()));
    assert_eq!(
        layout.feature_names(),
        vec!["age", "color=red", "color=green", "color=blue"]
    );
    assert!(layout
        .ensure_matches(&FeatureLayout::from_schema(ds.schema()))
        .is_ok());
}

#[test]
fn test_display_values() {
    let ds = dataset(EncoderConfig::default());
    assert_eq!(ds.display_value(0, 1), Some("green"));
    assert_eq!(ds.display_value(2, 1), Some("blue"));
    assert_eq!(ds.display_value(3, 1), Some("abc"));
    assert_eq!(ds.display_value(1, 3), Some("0.20"));
}

#[test]
fn test_empty_table() {
    let schema = load_schema(SCHEMA.as_bytes()).unwrap();
    let table = load_table("".as_bytes(), &schema, &Default::default()).unwrap();
    let ds = EncodedDataset::new(schema, table, EncoderConfig::default());
    let fold = ds.training();
    assert_eq!(fold.dimensions().num_data, 0);

    let (x, y) = fold.to_arrays().unwrap();
    assert_eq!(x.shape(), &[0, 4]);
    assert!(y.is_empty());

    let mut input = [0.0f32; 4];
    let mut output = [0.0f32];
    assert!(fold.encode_row(0, &mut input, &mut output).is_err());
}
