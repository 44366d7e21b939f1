use anyhow::Result;
use checker_core::Match;
use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

const RULE: &str = "+--------------------------------+----------------------+-------+";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Table,
    Json,
}

/// Ranked matches for one query document.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub document: String,
    pub matches: Vec<Match>,
}

pub fn render(reports: &[Report], format: Format) -> Result<String> {
    match format {
        Format::Table => Ok(render_table(reports)),
        Format::Json => render_json(reports),
    }
}

fn file_name(doc_id: &str) -> String {
    Path::new(doc_id)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| doc_id.to_string())
}

pub fn render_table(reports: &[Report]) -> String {
    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    out.push_str("| Query Document                 |             Original | Score |\n");
    out.push_str("+================================+======================+=======+\n");
    for report in reports {
        let doc = file_name(&report.document);
        match report.matches.split_first() {
            None => {
                let _ = writeln!(out, "| {:<30} | {:20} | {:5} |", doc, "", "");
            }
            Some((first, rest)) => {
                let _ = writeln!(out, "| {:<30} | {:>20} | {:5.2} |", doc, file_name(&first.doc_id), first.score);
                for m in rest {
                    let _ = writeln!(out, "| {:<30} | {:>20} | {:5.2} |", "", file_name(&m.doc_id), m.score);
                }
            }
        }
        out.push_str(RULE);
        out.push('\n');
    }
    out
}

#[derive(Serialize)]
struct JsonMatch<'a> {
    original: &'a str,
    score: f64,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    document: &'a str,
    matches: Vec<JsonMatch<'a>>,
}

pub fn render_json(reports: &[Report]) -> Result<String> {
    let out: Vec<JsonReport> = reports
        .iter()
        .map(|r| JsonReport {
            document: &r.document,
            matches: r.matches.iter().map(|m| JsonMatch { original: &m.doc_id, score: m.score }).collect(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&out)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Report> {
        vec![
            Report {
                document: "queries/essay.txt".into(),
                matches: vec![Match::new("corpus/original.txt", 0.923), Match::new("corpus/other.txt", 0.41)],
            },
            Report { document: "stdin".into(), matches: vec![] },
        ]
    }

    #[test]
    fn table_has_one_row_per_match() {
        let table = render_table(&sample());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], RULE);
        assert_eq!(lines[3], format!("| {:<30} | {:>20} |  0.92 |", "essay.txt", "original.txt"));
        assert_eq!(lines[4], format!("| {:<30} | {:>20} |  0.41 |", "", "other.txt"));
        assert_eq!(lines[5], RULE);
        assert_eq!(lines[6], format!("| {:<30} | {} | {} |", "stdin", " ".repeat(20), " ".repeat(5)));
        assert!(lines.iter().all(|l| l.len() == RULE.len()));
    }

    #[test]
    fn json_lists_matches_in_order() {
        let json: serde_json::Value = serde_json::from_str(&render_json(&sample()).unwrap()).unwrap();
        let arr = json.as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0]["document"], "queries/essay.txt");
        assert_eq!(arr[0]["matches"][0]["original"], "corpus/original.txt");
        assert_eq!(arr[0]["matches"][1]["score"], 0.41);
        assert!(arr[1]["matches"].as_array().unwrap().is_empty());
    }
}
