//! Markdown and JSON report generation.
//!
//! Reports wrap the joined records with a small metadata block describing
//! where and when they were fetched.

use crate::models::{PostComment, PostDetail, PostOverview};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Metadata about a report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    /// Base URL of the API the records came from.
    pub source_url: String,
    /// When the aggregation finished.
    pub fetched_at: DateTime<Utc>,
    /// Wall-clock time spent fetching and joining.
    pub duration_seconds: f64,
}

/// The joined records carried by a report.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum ReportData {
    Overviews(Vec<PostOverview>),
    Detail(PostDetail),
}

/// A complete report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    #[serde(flatten)]
    pub data: ReportData,
}

impl Report {
    pub fn new(metadata: ReportMetadata, data: ReportData) -> Self {
        Self { metadata, data }
    }

    /// Number of top-level records (posts) in the report.
    pub fn record_count(&self) -> usize {
        match &self.data {
            ReportData::Overviews(overviews) => overviews.len(),
            ReportData::Detail(_) => 1,
        }
    }
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    match &report.data {
        ReportData::Overviews(overviews) => {
            output.push_str("# Post Overviews\n\n");
            output.push_str(&generate_metadata_section(&report.metadata, overviews.len()));
            output.push_str(&generate_overviews_section(overviews));
        }
        ReportData::Detail(detail) => {
            output.push_str(&format!("# Post {}\n\n", detail.id));
            output.push_str(&generate_metadata_section(&report.metadata, 1));
            output.push_str(&generate_detail_section(detail));
        }
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata, records: usize) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Source:** {}\n", metadata.source_url));
    section.push_str(&format!(
        "- **Fetched At:** {}\n",
        metadata.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Posts:** {}\n", records));
    section.push_str(&format!(
        "- **Duration:** {:.2}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

/// Generate the overview table.
fn generate_overviews_section(overviews: &[PostOverview]) -> String {
    let mut section = String::new();

    section.push_str("## Posts\n\n");

    if overviews.is_empty() {
        section.push_str("No posts were returned by the source.\n\n");
        return section;
    }

    section.push_str("| ID | Title | Author | Avatar |\n");
    section.push_str("|---:|:---|:---|:---|\n");

    for overview in overviews {
        section.push_str(&format!(
            "| {} | {} | {} | ![avatar]({}) |\n",
            overview.id,
            escape_cell(&overview.title),
            escape_cell(&overview.author_name),
            overview.avatar_url
        ));
    }
    section.push('\n');

    section
}

/// Generate the body and comments of a single post.
fn generate_detail_section(detail: &PostDetail) -> String {
    let mut section = String::new();

    section.push_str("## Body\n\n");
    section.push_str(&quote(&detail.body));
    section.push_str("\n\n");

    section.push_str(&format!("## Comments ({})\n\n", detail.comment_count()));

    if detail.comments.is_empty() {
        section.push_str("No comments on this post.\n\n");
        return section;
    }

    for comment in &detail.comments {
        section.push_str(&generate_comment_block(comment));
    }

    section
}

/// Generate the block for a single comment.
fn generate_comment_block(comment: &PostComment) -> String {
    let mut block = String::new();

    block.push_str(&format!("### {} (#{})\n\n", comment.name, comment.id));
    block.push_str(&format!("*{}*\n\n", comment.email));
    block.push_str(&quote(&comment.body));
    block.push_str("\n\n");

    block
}

/// Generate the footer.
fn generate_footer() -> String {
    format!("---\n\n*Generated by postjoin v{}*\n", env!("CARGO_PKG_VERSION"))
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

fn quote(text: &str) -> String {
    text.lines()
        .map(|line| format!("> {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> ReportMetadata {
        ReportMetadata {
            source_url: "https://jsonplaceholder.typicode.com".to_string(),
            fetched_at: Utc::now(),
            duration_seconds: 0.25,
        }
    }

    fn overviews_report() -> Report {
        Report::new(
            metadata(),
            ReportData::Overviews(vec![
                PostOverview {
                    id: 1,
                    avatar_url: "https://www.gravatar.com/avatar/abc".to_string(),
                    title: "First | post".to_string(),
                    author_name: "Leanne Graham".to_string(),
                },
                PostOverview {
                    id: 2,
                    avatar_url: "https://www.gravatar.com/avatar/def".to_string(),
                    title: "Second".to_string(),
                    author_name: "Ervin Howell".to_string(),
                },
            ]),
        )
    }

    fn detail_report(comments: Vec<PostComment>) -> Report {
        Report::new(
            metadata(),
            ReportData::Detail(PostDetail {
                id: 5,
                body: "line one\nline two".to_string(),
                comments,
            }),
        )
    }

    #[test]
    fn test_generate_overviews_markdown() {
        let report = overviews_report();
        let markdown = generate_markdown_report(&report);

        assert!(markdown.contains("# Post Overviews"));
        assert!(markdown.contains("## Metadata"));
        assert!(markdown.contains("- **Posts:** 2"));
        assert!(markdown.contains("| 1 | First \\| post | Leanne Graham |"));
        assert!(markdown.contains("![avatar](https://www.gravatar.com/avatar/def)"));
        assert_eq!(report.record_count(), 2);
    }

    #[test]
    fn test_generate_empty_overviews_markdown() {
        let report = Report::new(metadata(), ReportData::Overviews(Vec::new()));
        let markdown = generate_markdown_report(&report);

        assert!(markdown.contains("No posts were returned"));
        assert!(!markdown.contains("| ID |"));
    }

    #[test]
    fn test_generate_detail_markdown() {
        let report = detail_report(vec![PostComment {
            id: 1,
            name: "id labore".to_string(),
            email: "Eliseo@gardner.biz".to_string(),
            body: "laudantium".to_string(),
        }]);
        let markdown = generate_markdown_report(&report);

        assert!(markdown.contains("# Post 5"));
        assert!(markdown.contains("> line one\n> line two"));
        assert!(markdown.contains("## Comments (1)"));
        assert!(markdown.contains("### id labore (#1)"));
        assert!(markdown.contains("*Eliseo@gardner.biz*"));
    }

    #[test]
    fn test_generate_detail_without_comments() {
        let markdown = generate_markdown_report(&detail_report(Vec::new()));

        assert!(markdown.contains("## Comments (0)"));
        assert!(markdown.contains("No comments on this post."));
    }

    #[test]
    fn test_generate_json_report() {
        let json = generate_json_report(&overviews_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["kind"], "overviews");
        assert!(value["metadata"]["fetchedAt"].is_string());
        assert!(value["metadata"]["durationSeconds"].is_number());
        assert!(value["metadata"].get("source_url").is_none());
        assert_eq!(value["data"][0]["authorName"], "Leanne Graham");
        assert_eq!(
            value["metadata"]["sourceUrl"],
            "https://jsonplaceholder.typicode.com"
        );
    }

    #[test]
    fn test_generate_detail_json_report() {
        let json = generate_json_report(&detail_report(Vec::new())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["kind"], "detail");
        assert_eq!(value["data"]["id"], 5);
        assert_eq!(value["data"]["comments"], serde_json::json!([]));
    }
}
