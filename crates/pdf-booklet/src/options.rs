use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Booklet generation configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BookletOptions {
    // Source preparation
    pub crop: CropOptions,

    // Book folding
    pub spread_margins: SpreadMargins,
    /// Leave back-side spreads upright for printers that flip on the short edge
    pub short_edge: bool,

    // Sheet rendering
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    pub grid: SheetGrid,
    /// Draw a frame around every cell
    pub frame: bool,
}

impl Default for BookletOptions {
    fn default() -> Self {
        Self {
            crop: CropOptions::default(),
            spread_margins: SpreadMargins::default(),
            short_edge: true,
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            grid: SheetGrid::default(),
            frame: true,
        }
    }
}

impl BookletOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| BookletError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| BookletError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        match self.grid.checked_cells() {
            None => {
                return Err(BookletError::Config(format!(
                    "Sheet grid has too many cells, got {}x{}",
                    self.grid.cols, self.grid.rows
                )));
            }
            Some(0) => {
                return Err(BookletError::Config(format!(
                    "Sheet grid must have at least one cell, got {}x{}",
                    self.grid.cols, self.grid.rows
                )));
            }
            Some(_) => {}
        }

        if !self.spread_margins.is_valid() {
            return Err(BookletError::Config(
                "Spread margins must be finite and non-negative".to_string(),
            ));
        }

        if !self.crop.padding_pt.is_finite() || self.crop.padding_pt < 0.0 {
            return Err(BookletError::Config(
                "Crop padding must be finite and non-negative".to_string(),
            ));
        }

        let (width_mm, height_mm) = self.paper_size.dimensions_mm();
        if !(width_mm > 0.0 && height_mm > 0.0) {
            return Err(BookletError::Config(format!(
                "Paper size must be positive, got {}x{} mm",
                width_mm, height_mm
            )));
        }

        Ok(())
    }

    /// Output sheet dimensions in points, orientation applied
    pub fn sheet_dimensions_pt(&self) -> (f32, f32) {
        let (w, h) = self
            .paper_size
            .dimensions_with_orientation(self.orientation);
        (crate::constants::mm_to_pt(w), crate::constants::mm_to_pt(h))
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use serde::{Deserialize, Serialize};

    // Paper sizes are written as a bare name, or as a map for custom sizes
    impl Serialize for PaperSize {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            use serde::ser::SerializeStruct;
            match self {
                PaperSize::A3 => serializer.serialize_str("A3"),
                PaperSize::A4 => serializer.serialize_str("A4"),
                PaperSize::A5 => serializer.serialize_str("A5"),
                PaperSize::Letter => serializer.serialize_str("Letter"),
                PaperSize::Legal => serializer.serialize_str("Legal"),
                PaperSize::Tabloid => serializer.serialize_str("Tabloid"),
                PaperSize::Custom {
                    width_mm,
                    height_mm,
                } => {
                    let mut s = serializer.serialize_struct("Custom", 2)?;
                    s.serialize_field("width_mm", width_mm)?;
                    s.serialize_field("height_mm", height_mm)?;
                    s.end()
                }
            }
        }
    }

    impl<'de> Deserialize<'de> for PaperSize {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            use serde::de::{self, MapAccess, Visitor};
            use std::fmt;

            struct PaperSizeVisitor;

            impl<'de> Visitor<'de> for PaperSizeVisitor {
                type Value = PaperSize;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a paper size")
                }

                fn visit_str<E>(self, value: &str) -> std::result::Result<PaperSize, E>
                where
                    E: de::Error,
                {
                    match value {
                        "A3" => Ok(PaperSize::A3),
                        "A4" => Ok(PaperSize::A4),
                        "A5" => Ok(PaperSize::A5),
                        "Letter" => Ok(PaperSize::Letter),
                        "Legal" => Ok(PaperSize::Legal),
                        "Tabloid" => Ok(PaperSize::Tabloid),
                        _ => Err(de::Error::unknown_variant(
                            value,
                            &["A3", "A4", "A5", "Letter", "Legal", "Tabloid", "Custom"],
                        )),
                    }
                }

                fn visit_map<M>(self, mut map: M) -> std::result::Result<PaperSize, M::Error>
                where
                    M: MapAccess<'de>,
                {
                    let mut width_mm = None;
                    let mut height_mm = None;

                    while let Some(key) = map.next_key::<String>()? {
                        match key.as_str() {
                            "width_mm" => width_mm = Some(map.next_value()?),
                            "height_mm" => height_mm = Some(map.next_value()?),
                            _ => {
                                let _: serde::de::IgnoredAny = map.next_value()?;
                            }
                        }
                    }

                    match (width_mm, height_mm) {
                        (Some(w), Some(h)) => Ok(PaperSize::Custom {
                            width_mm: w,
                            height_mm: h,
                        }),
                        _ => Err(de::Error::missing_field("width_mm or height_mm")),
                    }
                }
            }

            deserializer.deserialize_any(PaperSizeVisitor)
        }
    }
} // end of serde_impls module
