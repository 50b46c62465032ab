use errview_sources::Explanations;
use errview_types::Dimension;
use serde::Serialize;

/// Row or column header of the global view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderTitle {
    pub name: String,
    /// Name to show in the header cell.
    pub display: String,
    /// Tooltip: total errors, then a per-dimension description.
    pub title: String,
}

/// Headers for the values of one pivot axis, paired with that axis' totals.
///
/// Steps display as the workflow on one line and the rest of the path on the
/// next. Error codes are described by their joined log snippets (empty when
/// no explanation is known).
pub fn header_titles(
    dimension: Dimension,
    names: &[String],
    totals: &[u64],
    explanations: &Explanations,
) -> Vec<HeaderTitle> {
    names
        .iter()
        .zip(totals)
        .map(|(name, total)| {
            let (display, description) = match dimension {
                Dimension::Step => (step_display(name), name.clone()),
                Dimension::ErrorCode => (
                    name.clone(),
                    explanations.joined(name).unwrap_or_default(),
                ),
                Dimension::Site => (name.clone(), name.clone()),
            };
            HeaderTitle {
                name: name.clone(),
                display,
                title: format!("Total errors: {}\n{}", total, description),
            }
        })
        .collect()
}

fn step_display(step: &str) -> String {
    let trimmed = step.trim_start_matches('/');
    match trimmed.split_once('/') {
        Some((workflow, rest)) => format!("{}\n{}", workflow, rest),
        None => format!("{}\n", trimmed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_headers_split_workflow() {
        let headers = header_titles(
            Dimension::Step,
            &["/A/Task/Merge".to_string()],
            &[7],
            &Explanations::default(),
        );
        assert_eq!(headers[0].display, "A\nTask/Merge");
        assert_eq!(headers[0].title, "Total errors: 7\n/A/Task/Merge");
    }

    #[test]
    fn test_errorcode_headers_use_explanations() {
        let mut explanations = Explanations::default();
        explanations.insert("8020", vec!["open failed".to_string(), "retry".to_string()]);

        let headers = header_titles(
            Dimension::ErrorCode,
            &["8020".to_string(), "134".to_string()],
            &[5, 0],
            &explanations,
        );
        assert_eq!(headers[0].title, "Total errors: 5\nopen failed\n --- \nretry");
        assert_eq!(headers[1].title, "Total errors: 0\n");
    }

    #[test]
    fn test_site_headers() {
        let headers = header_titles(
            Dimension::Site,
            &["T2_US_X".to_string()],
            &[3],
            &Explanations::default(),
        );
        assert_eq!(headers[0].display, "T2_US_X");
        assert_eq!(headers[0].title, "Total errors: 3\nT2_US_X");
    }
}
