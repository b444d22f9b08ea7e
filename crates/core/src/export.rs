//! Export formatting: render a lecture as a markdown or plain-text
//! study sheet.

use crate::lecture::Lecture;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Text,
}

impl ExportFormat {
    /// Parse a `format` query value. Unknown values are rejected so the
    /// API can return a 400 instead of silently picking a default.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "markdown" | "md" => Some(Self::Markdown),
            "text" | "txt" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Markdown => "text/markdown; charset=utf-8",
            Self::Text => "text/plain; charset=utf-8",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Text => "txt",
        }
    }
}

/// Format seconds as an `MM:SS` timestamp.
pub fn format_timestamp(seconds: f64) -> String {
    let mins = (seconds / 60.0) as u32;
    let secs = (seconds % 60.0) as u32;
    format!("{:02}:{:02}", mins, secs)
}

/// Render a lecture as a markdown study sheet: summary, key topics,
/// takeaways, definitions, quiz (with answers), and the timestamped
/// transcript.
pub fn format_lecture_markdown(lecture: &Lecture) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", lecture.title));

    let mut meta: Vec<String> = Vec::new();
    if let Some(course) = &lecture.course {
        meta.push(format!("**Course:** {course}"));
    }
    if let Some(professor) = &lecture.professor {
        meta.push(format!("**Professor:** {professor}"));
    }
    meta.push(format!(
        "**Duration:** {}",
        format_timestamp(lecture.duration)
    ));
    out.push_str(&meta.join(" | "));
    out.push_str("\n\n");

    out.push_str("## Summary\n\n");
    out.push_str(&lecture.summary.executive_summary);
    out.push_str("\n\n");

    if !lecture.summary.key_topics.is_empty() {
        out.push_str("## Key Topics\n\n");
        for topic in &lecture.summary.key_topics {
            out.push_str(&format!(
                "- [{}] {}\n",
                format_timestamp(topic.timestamp),
                topic.topic
            ));
        }
        out.push('\n');
    }

    if !lecture.summary.takeaways.is_empty() {
        out.push_str("## Takeaways\n\n");
        for (i, takeaway) in lecture.summary.takeaways.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, takeaway));
        }
        out.push('\n');
    }

    if !lecture.summary.definitions.is_empty() {
        out.push_str("## Definitions\n\n");
        for def in &lecture.summary.definitions {
            out.push_str(&format!("- **{}**: {}\n", def.term, def.definition));
        }
        out.push('\n');
    }

    if !lecture.quiz.is_empty() {
        out.push_str("## Quiz\n\n");
        for (i, q) in lecture.quiz.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, q.question));
            for (j, option) in q.options.iter().enumerate() {
                let marker = if j == q.correct_answer { "✓" } else { " " };
                let letter = (b'A' + j as u8) as char;
                out.push_str(&format!("   {marker} {letter}. {option}\n"));
            }
            out.push_str(&format!("   _{}_\n\n", q.explanation));
        }
    }

    out.push_str("## Transcript\n\n");
    for seg in &lecture.transcript {
        out.push_str(&format!(
            "[{}] {}\n",
            format_timestamp(seg.start),
            seg.text.trim()
        ));
    }

    out
}

/// Render a lecture as plain text: the markdown rendering with the
/// heading/emphasis markers stripped.
pub fn format_lecture_text(lecture: &Lecture) -> String {
    format_lecture_markdown(lecture)
        .lines()
        .map(|line| {
            line.trim_start_matches(['#', ' '])
                .replace("**", "")
                .replace('_', "")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
