//! Schema-driven encoding of raw tables into numeric feature vectors.
//!
//! A [`SchemaDefinition`] describes each column of a delimited text table as
//! numeric, categorical or meta. Rows are encoded into a flat `f32` input
//! vector (categorical columns one-hot expanded, meta columns skipped) and a
//! single target taken from the last column. A [`Fold`] adds the
//! leave-one-out view used to hold one row back from training.
//!
//! ```rust
//! use tabular_features::{io, EncoderConfig, EncodedDataset};
//!
//! let schema = io::load_schema(
//!     r#"[{"Name": "age", "Type": 0},
//!         {"Name": "color", "Type": 1, "Values": ["red", "green", "blue"]},
//!         {"Name": "id", "Type": 2},
//!         {"Name": "score", "Type": 0}]"#
//!         .as_bytes(),
//! )
//! .unwrap();
//! let config = EncoderConfig::default();
//! let table = io::load_table("30,2,x123,0.75\n".as_bytes(), &schema, &config.csv).unwrap();
//! let dataset = EncodedDataset::new(schema, table, config);
//!
//! let (x, y) = dataset.training().to_arrays().unwrap();
//! assert_eq!(x.row(0).to_vec(), vec![30.0, 0.0, 1.0, 0.0]);
//! assert_eq!(y[0], 0.75);
//! ```

pub mod config;
pub mod dataset;
pub mod dimensions;
pub mod encoder;
pub mod error;
pub mod expansion;
pub mod io;
pub mod layout;
pub mod leave_one_out;
pub mod scale_flags;
pub mod schema;
pub mod serialization;
pub mod table;

pub use config::{CsvConfig, EncoderConfig, ParsePolicy};
pub use dataset::{BatchIter, Dataset, EncodedDataset, Fold};
pub use dimensions::Dimensions;
pub use encoder::{encode_row, RowEncoder};
pub use error::{EncodeError, LoadError, SchemaError};
pub use layout::{FeatureLayout, FeatureSlot};
pub use leave_one_out::LeaveOneOut;
pub use scale_flags::{compute_scale_flags, scale_flags};
pub use schema::{ColumnKind, SchemaColumn, SchemaDefinition};
pub use serialization::SerializableParams;
pub use table::{RawRow, RawTable};
