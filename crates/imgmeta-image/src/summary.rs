//! Human-readable summaries.
//!
//! ```text
//! RGB Image with:
//!   data: 480x640x3 u8
//!   properties:
//!     colordim: 3
//!     colorspace: "RGB"
//! ```

use crate::image::ImageBase;
use crate::indexed::IndexedImage;
use crate::semantics::DimSemantics;
use imgmeta_core::{Element, Properties};
use ndarray::Data;
use std::fmt;

/// `480x640x3`; `scalar` for 0-d data.
fn shape_summary(shape: &[usize]) -> String {
    if shape.is_empty() {
        return "scalar".to_string();
    }
    shape
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join("x")
}

fn write_properties(f: &mut fmt::Formatter<'_>, props: &Properties) -> fmt::Result {
    if props.is_empty() {
        return writeln!(f, "  properties: none");
    }
    writeln!(f, "  properties:")?;
    for (key, value) in props.sorted() {
        writeln!(f, "    {key}: {value}")?;
    }
    Ok(())
}

impl<S> fmt::Display for ImageBase<S>
where
    S: Data,
    S::Elem: Element,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cs = self.colorspace().unwrap_or_else(|_| "Unknown".to_string());
        writeln!(f, "{cs} Image with:")?;
        writeln!(
            f,
            "  data: {} {}",
            shape_summary(self.shape()),
            self.element_kind()
        )?;
        write_properties(f, &self.properties)
    }
}

impl<I, C> fmt::Display for IndexedImage<I, C>
where
    I: Element,
    C: Element,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cs = self.colorspace().unwrap_or_else(|_| "Unknown".to_string());
        writeln!(f, "{cs} IndexedImage with:")?;
        writeln!(f, "  index: {} {}", shape_summary(self.shape()), I::KIND)?;
        let (entries, channels) = self.cmap.dim();
        writeln!(
            f,
            "  cmap: {entries} entries x {channels} {} {}",
            if channels == 1 { "channel" } else { "channels" },
            C::KIND
        )?;
        write_properties(f, &self.properties)
    }
}
