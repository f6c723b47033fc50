//! Named description of every encoded input slot.
//!
//! A [`FeatureLayout`] is what a trained consumer needs to keep next to its
//! weights: which column each slot came from, its display label, and whether
//! it was rescaled. Layouts persist through [`crate::SerializableParams`].

use crate::error::EncodeError;
use crate::schema::{ColumnKind, SchemaDefinition};
use serde::{Deserialize, Serialize};

/// One slot of the input vector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSlot {
    /// Position of the source column in the schema.
    pub column_index: usize,
    pub column_name: String,
    /// `column` for numeric slots, `column=category` for one-hot slots.
    pub label: String,
    pub scale: bool,
}

/// Ordered slots of the input vector.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureLayout {
    slots: Vec<FeatureSlot>,
    target: String,
}

impl FeatureLayout {
    pub fn from_schema(schema: &SchemaDefinition) -> Self {
        let mut slots = Vec::with_capacity(schema.input_width());
        for expanded in schema.expansion() {
            let column = expanded.column;
            match &column.kind {
                ColumnKind::Numeric => slots.push(FeatureSlot {
                    column_index: expanded.column_index,
                    column_name: column.name.clone(),
                    label: column.name.clone(),
                    scale: true,
                }),
                ColumnKind::Categorical { values } => {
                    slots.extend(values.iter().map(|value| FeatureSlot {
                        column_index: expanded.column_index,
                        column_name: column.name.clone(),
                        label: format!("{}={}", column.name, value),
                        scale: false,
                    }));
                }
                ColumnKind::Meta => {}
            }
        }
        Self {
            slots,
            target: schema.target().name.clone(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[FeatureSlot] {
        &self.slots
    }

    /// Name of the target column.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn feature_names(&self) -> Vec<&str> {
        self.slots.iter().map(|s| s.label.as_str()).collect()
    }

    pub fn scale_flags(&self) -> Vec<bool> {
        self.slots.iter().map(|s| s.scale).collect()
    }

    /// Fail unless `other` describes exactly the same slots and target.
    ///
    /// The first differing slot is reported before a length difference.
    pub fn ensure_matches(&self, other: &FeatureLayout) -> Result<(), EncodeError> {
        let differing = self
            .slots
            .iter()
            .zip(&other.slots)
            .position(|(ours, theirs)| ours != theirs);
        if let Some(index) = differing {
            return Err(EncodeError::LayoutSlotMismatch {
                index,
                expected: describe(&self.slots[index]),
                got: describe(&other.slots[index]),
            });
        }
        if self.len() != other.len() {
            return Err(EncodeError::LayoutMismatch {
                expected: self.len(),
                got: other.len(),
            });
        }
        if self.target != other.target {
            return Err(EncodeError::LayoutTargetMismatch {
                expected: self.target.clone(),
                got: other.target.clone(),
            });
        }
        Ok(())
    }
}

// Label with source column and scale flag.
fn describe(slot: &FeatureSlot) -> String {
    let scale = if slot.scale { "scaled" } else { "unscaled" };
    format!("{} (column {}, {scale})", slot.label, slot.column_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale_flags::scale_flags;
    use crate::schema::SchemaColumn;
    use crate::serialization::SerializableParams;

    fn schema() -> SchemaDefinition {
        SchemaDefinition::new(vec![
            SchemaColumn::numeric("age"),
            SchemaColumn::categorical("color", ["red", "green", "blue"]),
            SchemaColumn::meta("id"),
            SchemaColumn::numeric("score"),
        ])
        .unwrap()
    }

    #[test]
    fn test_feature_names() {
        let layout = FeatureLayout::from_schema(&schema());
        assert_eq!(
            layout.feature_names(),
            vec!["age", "color=red", "color=green", "color=blue"]
        );
        assert_eq!(layout.target(), "score");
        assert_eq!(layout.slots()[2].column_index, 1);
    }

    #[test]
    fn test_layout_agrees_with_scale_flags() {
        let schema = schema();
        let layout = FeatureLayout::from_schema(&schema);
        assert_eq!(layout.len(), schema.input_width());
        assert_eq!(layout.scale_flags(), scale_flags(&schema));
    }

    #[test]
    fn test_ensure_matches() {
        let layout = FeatureLayout::from_schema(&schema());
        assert!(layout.ensure_matches(&layout.clone()).is_ok());

        let other = FeatureLayout::from_schema(
            &SchemaDefinition::new(vec![
                SchemaColumn::numeric("age"),
                SchemaColumn::categorical("color", ["red", "green"]),
                SchemaColumn::numeric("score"),
            ])
            .unwrap(),
        );
        assert_eq!(
            layout.ensure_matches(&other),
            Err(EncodeError::LayoutMismatch {
                expected: 4,
                got: 3
            })
        );
    }

    #[test]
    fn test_ensure_matches_names_differing_slot() {
        let layout = FeatureLayout::from_schema(&schema());
        let renamed = FeatureLayout::from_schema(
            &SchemaDefinition::new(vec![
                SchemaColumn::numeric("age"),
                SchemaColumn::categorical("color", ["red", "green", "teal"]),
                SchemaColumn::meta("id"),
                SchemaColumn::numeric("score"),
            ])
            .unwrap(),
        );
        let err = layout.ensure_matches(&renamed).unwrap_err();
        assert!(matches!(
            &err,
            EncodeError::LayoutSlotMismatch { index: 3, expected, got }
                if expected.starts_with("color=blue") && got.starts_with("color=teal")
        ));
        assert!(err.to_string().contains("slot 3"));
    }

    #[test]
    fn test_ensure_matches_names_target() {
        let layout = FeatureLayout::from_schema(&schema());
        let retargeted = FeatureLayout::from_schema(
            &SchemaDefinition::new(vec![
                SchemaColumn::numeric("age"),
                SchemaColumn::categorical("color", ["red", "green", "blue"]),
                SchemaColumn::meta("id"),
                SchemaColumn::numeric("price"),
            ])
            .unwrap(),
        );
        assert_eq!(
            layout.ensure_matches(&retargeted),
            Err(EncodeError::LayoutTargetMismatch {
                expected: "score".to_string(),
                got: "price".to_string()
            })
        );
    }

    #[test]
    fn test_layout_save_and_load() {
        let layout = FeatureLayout::from_schema(&schema());
        let path = std::env::temp_dir().join("tabular_features_layout.bin");
        layout.save_to_file(&path).unwrap();

        let loaded = FeatureLayout::load_from_file(&path).unwrap();
        assert_eq!(loaded, layout);

        std::fs::remove_file(path).ok();
    }
}
