use crate::presentation::views::Style;
use owo_colors::OwoColorize;

/// Right-aligned count; zero shows as `.` so failures stand out.
pub fn count_cell(count: u64, width: usize, style: Style) -> String {
    if count == 0 {
        let cell = format!("{:>width$}", ".");
        return if style.color {
            cell.dimmed().to_string()
        } else {
            cell
        };
    }

    let cell = format!("{:>width$}", count);
    if style.color {
        cell.red().to_string()
    } else {
        cell
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_cell_plain() {
        let style = Style { color: false };
        assert_eq!(count_cell(0, 3, style), "  .");
        assert_eq!(count_cell(42, 4, style), "  42");
    }
}
