//! # auditpdf CLI
//!
//! Usage:
//!   auditpdf audit.json --url https://example.com
//!   cat audit.json | auditpdf - --url https://example.com -o report.pdf
//!   auditpdf --example > audit.json

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use chrono::NaiveDate;
use clap::Parser;

use auditpdf::{AuditResult, ReportConfig, ReportError, ReportOptions, SeverityFilter};

#[derive(Parser, Debug)]
#[command(name = "auditpdf", version, about = "Render an accessibility audit as a paginated PDF report")]
struct Cli {
    /// Audit JSON file, or `-` for stdin.
    #[arg(required_unless_present = "example")]
    input: Option<String>,

    /// The audited page.
    #[arg(long, required_unless_present = "example")]
    url: Option<String>,

    /// Output path. Defaults to Accessibility_Audit_Report_<host>.pdf.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file overriding page, font, palette, or spacing defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only render cards for this severity: all, error, or warning.
    #[arg(long, default_value = "all")]
    only: SeverityFilter,

    /// Generation date printed on the cover (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Print a sample audit JSON and exit.
    #[arg(long)]
    example: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if cli.example {
        print!("{}", example_audit_json());
        return;
    }

    if let Err(e) = run(cli) {
        eprintln!("✗ {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), ReportError> {
    let (Some(input), Some(url)) = (cli.input, cli.url) else {
        return Err(ReportError::InvalidInput(
            "an input file and --url are required".to_string(),
        ));
    };

    let json = read_input(&input)?;
    let audit = AuditResult::from_json(&json)?;

    let mut options = ReportOptions {
        filter: cli.only,
        ..ReportOptions::default()
    };
    if let Some(path) = &cli.config {
        let raw = fs::read_to_string(path).map_err(|e| {
            ReportError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        options.config = ReportConfig::from_json(&raw)?;
    }
    if let Some(date) = cli.date {
        options.generated_on = date;
    }

    let output = match cli.output {
        Some(path) => path,
        None => PathBuf::from(auditpdf::report_file_name(&url)?),
    };

    let doc = auditpdf::generate_report(&audit, &url, &options)?;
    doc.save(&output)?;
    eprintln!(
        "✓ Written {} pages to {}",
        doc.page_count(),
        output.display()
    );
    Ok(())
}

fn read_input(input: &str) -> Result<String, ReportError> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| ReportError::InvalidInput(format!("cannot read stdin: {}", e)))?;
        Ok(buf)
    } else {
        fs::read_to_string(input)
            .map_err(|e| ReportError::InvalidInput(format!("cannot read {}: {}", input, e)))
    }
}

fn example_audit_json() -> &'static str {
    r##"{
  "score": 72,
  "summary": "Several product images lack text alternatives and the body text falls below the minimum contrast ratio. Keyboard users can reach every control, but focus is not always visible.",
  "findings": [
    {
      "title": "Missing Alt Text",
      "description": "Product images have no alt attribute, so screen readers announce the file name instead of the content.",
      "wcagGuideline": "1.1.1 Non-text Content (A)",
      "severity": "Error",
      "problematicCode": "<img src='x.jpg'>",
      "suggestedSolution": "Add alt text that describes the image.\n```html\n<img src='x.jpg' alt='Product photo'>\n```"
    },
    {
      "title": "Low Contrast Body Text",
      "description": "Paragraph text uses #999999 on white, a contrast ratio of 2.8:1.",
      "wcagGuideline": "1.4.3 Contrast (Minimum) (AA)",
      "severity": "Warning",
      "problematicCode": "<p style=\"color: #999999\">Free shipping on all orders.</p>",
      "suggestedSolution": "Darken the text to at least `#595959` for a 7:1 ratio.\n```css\np {\n  color: #595959;\n}\n```\nRe-check any text placed over images."
    },
    {
      "title": "Focus Indicator Removed",
      "description": "The stylesheet removes the outline from links and buttons without providing a replacement.",
      "wcagGuideline": "2.4.7 Focus Visible (AA)",
      "severity": "Error",
      "problematicCode": "a:focus, button:focus {\n  outline: none;\n}",
      "suggestedSolution": "Restore a visible focus style with `:focus-visible`.\n```css\na:focus-visible,\nbutton:focus-visible {\n  outline: 2px solid #4f46e5;\n  outline-offset: 2px;\n}\n```"
    }
  ]
}
"##
}
