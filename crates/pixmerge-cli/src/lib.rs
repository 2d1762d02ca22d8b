use pixmerge_processing::CombinationOutput;
use serde::Serialize;
use std::collections::BTreeMap;

/// Summary of one combination, printed by the `pixmerge` binary
#[derive(Debug, Serialize)]
pub struct CombineReport {
    pub width: u32,
    pub height: u32,
    /// `<op>_result` to the written file path
    pub results: BTreeMap<String, String>,
}

impl CombineReport {
    pub fn from_output(output: &CombinationOutput) -> Self {
        let results = output
            .artifacts
            .iter()
            .map(|a| (a.operation.result_key(), a.path.display().to_string()))
            .collect();

        Self {
            width: output.width,
            height: output.height,
            results,
        }
    }

    /// One line per written file, in operation order
    pub fn render_text(output: &CombinationOutput) -> String {
        let mut text = String::new();
        for artifact in &output.artifacts {
            text.push_str(&format!(
                "Saved {} operation result to {}\n",
                artifact.operation,
                artifact.path.display()
            ));
        }
        text.push_str(&format!(
            "All operations completed successfully ({}x{})",
            output.width, output.height
        ));
        text
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use pixmerge_processing::combine_images;

    fn combined() -> (tempfile::TempDir, CombinationOutput) {
        let dir = tempfile::tempdir().unwrap();
        let p1 = dir.path().join("1.png");
        let p2 = dir.path().join("2.png");
        RgbImage::from_pixel(2, 2, Rgb([1, 2, 3])).save(&p1).unwrap();
        RgbImage::from_pixel(2, 2, Rgb([4, 5, 6])).save(&p2).unwrap();
        let output = combine_images(&p1, &p2, dir.path().join("output")).unwrap();
        (dir, output)
    }

    #[test]
    fn report_lists_every_result() {
        let (_dir, output) = combined();
        let report = CombineReport::from_output(&output);

        assert_eq!((report.width, report.height), (2, 2));
        assert_eq!(report.results.len(), 8);
        assert!(report.results["xor_result"].ends_with("xor_result.png"));

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["results"]["or_result"].is_string());
    }

    #[test]
    fn text_is_in_operation_order() {
        let (_dir, output) = combined();
        let text = CombineReport::render_text(&output);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 9);
        assert!(lines[0].starts_with("Saved xor operation result to"));
        assert!(lines[7].starts_with("Saved or operation result to"));
        assert_eq!(lines[8], "All operations completed successfully (2x2)");
    }
}
