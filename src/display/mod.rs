use std::fmt::{self, Display, Formatter};

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::*;
use num_traits::{Float, ToPrimitive};

use crate::hypothesis::ShapiroWilkResult;

impl<F> ShapiroWilkResult<F>
where
    F: Float + Display + ToPrimitive,
{
    /// Renders the result as a titled table of W, `n` and the largest weight.
    pub fn display(&self) -> String {
        let w_display = if self.statistic.is_finite() {
            format!("{:.5}", self.statistic)
        } else {
            "undefined".to_string()
        };

        let largest = self
            .coefficients
            .last()
            .map_or_else(|| "-".to_string(), |a| format!("{a:.5}"));

        let mut title_table = Table::new();
        title_table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .add_row(vec![Cell::new("Shapiro-Wilk Normality Test (Royston)")
                .set_alignment(CellAlignment::Center)]);

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Metric").set_alignment(CellAlignment::Center),
                Cell::new("Value").set_alignment(CellAlignment::Center),
                Cell::new("Note").set_alignment(CellAlignment::Center),
            ]);

        table
            .add_row(vec![
                Cell::new("W").set_alignment(CellAlignment::Left),
                Cell::new(&w_display).set_alignment(CellAlignment::Right),
                Cell::new("closer to 1 = closer to normal").set_alignment(CellAlignment::Left),
            ])
            .add_row(vec![
                Cell::new("n").set_alignment(CellAlignment::Left),
                Cell::new(self.n).set_alignment(CellAlignment::Right),
                Cell::new("sample size").set_alignment(CellAlignment::Left),
            ])
            .add_row(vec![
                Cell::new("a(n)").set_alignment(CellAlignment::Left),
                Cell::new(&largest).set_alignment(CellAlignment::Right),
                Cell::new("largest weight").set_alignment(CellAlignment::Left),
            ]);

        format!("{title_table}\n{table}")
    }
}

impl<F> Display for ShapiroWilkResult<F>
where
    F: Float + Display + ToPrimitive,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
