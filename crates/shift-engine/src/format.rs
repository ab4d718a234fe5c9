//! Plain-text presentation of partitions, in English or Hebrew.
//!
//! The text is tab-separated so it pastes cleanly into a spreadsheet or chat
//! message. Wording for each language lives in one place ([`Language`]); the
//! layout functions are shared.

use std::fmt::Write as _;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::clock::Interval;
use crate::error::{Result, ShiftError};
use crate::partition::{Partition, PartitionOutcome, RemainderPlan, Strategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    English,
    Hebrew,
}

impl FromStr for Language {
    type Err = ShiftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "he" | "hebrew" => Ok(Language::Hebrew),
            _ => Err(ShiftError::UnsupportedLanguage(s.to_string())),
        }
    }
}

impl Language {
    /// "H h M min" / "H שעות M דקות".
    pub fn duration(self, minutes: u32) -> String {
        let (h, m) = (minutes / 60, minutes % 60);
        match self {
            Language::English => format!("{h} h {m} min"),
            Language::Hebrew => format!("{h} שעות {m} דקות"),
        }
    }

    pub fn strategy_title(self, strategy: Strategy) -> &'static str {
        match (self, strategy) {
            (Language::English, Strategy::ExactEqual) => "Perfect split",
            (Language::English, Strategy::MaxEqualPlusRemainder) => "Maximize shift time",
            (Language::English, Strategy::EqualRoundedUp) => "Start earlier (add time)",
            (Language::English, Strategy::EqualRoundedDown) => "Start later (remove time)",
            (Language::English, Strategy::DirectEven) => "Direct split",
            (Language::Hebrew, Strategy::ExactEqual) => "חלוקה מושלמת",
            (Language::Hebrew, Strategy::MaxEqualPlusRemainder) => "מיקסום זמן שמירה",
            (Language::Hebrew, Strategy::EqualRoundedUp) => "להתחיל קודם (להוסיף זמן)",
            (Language::Hebrew, Strategy::EqualRoundedDown) => "להתחיל אחרי (לחסר זמן)",
            (Language::Hebrew, Strategy::DirectEven) => "חלוקה ישירה",
        }
    }

    /// Letter for the n-th alternative (0-based): A/B/C or א/ב/ג.
    pub fn option_letter(self, position: usize) -> char {
        let letters: [char; 3] = match self {
            Language::English => ['A', 'B', 'C'],
            Language::Hebrew => ['א', 'ב', 'ג'],
        };
        letters.get(position).copied().unwrap_or('?')
    }

    fn option_heading(self, position: usize, title: &str) -> String {
        let letter = self.option_letter(position);
        match self {
            Language::English => format!("Option {letter}: {title}"),
            Language::Hebrew => format!("אפשרות {letter}: {title}"),
        }
    }

    fn max_equal_description(self, plan: &RemainderPlan) -> String {
        let base = self.duration(plan.base_minutes);
        match self {
            Language::English => format!(
                "Use the longest equal shift ({base}) and split the leftover {} minutes",
                plan.remainder
            ),
            Language::Hebrew => format!(
                "שימוש בזמן שווה מקסימלי ({base}), לחלק את שארית הדקות ({})",
                plan.remainder
            ),
        }
    }

    fn adjusted_description(self, partition: &Partition) -> String {
        let minutes = partition.adjustment_minutes.unsigned_abs();
        match (self, partition.strategy) {
            (Language::English, Strategy::EqualRoundedUp) => {
                format!("Add {minutes} minutes and start earlier so all shifts are equal")
            }
            (Language::English, _) => {
                format!("Remove {minutes} minutes and start later so all shifts are equal")
            }
            (Language::Hebrew, Strategy::EqualRoundedUp) => {
                format!("להוסיף {minutes} דקות ולהתחיל מוקדם יותר כדי להשוות את זמן השמירות")
            }
            (Language::Hebrew, _) => {
                format!("חיסור {minutes} דקות ולהתחיל יותר מאוחר כדי להשוות את זמן השמירות")
            }
        }
    }

    fn split_line(self, first_extra: u32, last_extra: u32) -> String {
        match self {
            Language::English => {
                format!("First shift: +{first_extra} min, last shift: +{last_extra} min")
            }
            Language::Hebrew => {
                format!("ראשון: +{first_extra} דקות, אחרון: +{last_extra} דקות")
            }
        }
    }

    fn total_line(self, minutes: u32) -> String {
        let text = self.duration(minutes);
        match self {
            Language::English => format!("Total shift time: {text}"),
            Language::Hebrew => format!("סך זמן השמירות: {text}"),
        }
    }

    fn overnight_notice(self, interval: Interval) -> String {
        match self {
            Language::English => format!(
                "Overnight shift: from {} until {} the next day",
                interval.start, interval.end
            ),
            Language::Hebrew => format!(
                "זוהתה שמירת לילה: מ{} עד {} למחרת",
                interval.start, interval.end
            ),
        }
    }

    fn exact_banner(self, shift_count: usize) -> String {
        match self {
            Language::English => format!("Perfect! Divides into {shift_count} round shifts"),
            Language::Hebrew => format!("מושלם! ניתן לחלק ל {shift_count} שמירות עגולות"),
        }
    }

    fn fallback_banner(self) -> &'static str {
        match self {
            Language::English => "Cannot divide into round shifts, here are 3 alternatives:",
            Language::Hebrew => "אי אפשר לחלק לשמירות עגולות, הנה 3 אלטרנטיבות:",
        }
    }

    fn new_schedule(self, partition: &Partition) -> String {
        match self {
            Language::English => format!("New schedule: {} - {}", partition.start, partition.end),
            Language::Hebrew => format!("לוז חדש: {} - {}", partition.start, partition.end),
        }
    }

    fn headers(self) -> [&'static str; 5] {
        match self {
            Language::English => ["Shift", "Start", "End", "Duration", "Name"],
            Language::Hebrew => ["שמירה", "זמן התחלה", "זמן סיום", "משך", "שם"],
        }
    }
}

/// Render `partition` as a tab-separated table with a header row. The name
/// column appears only when at least one segment is labelled.
pub fn render_table(partition: &Partition, language: Language) -> String {
    let with_names = partition
        .segments
        .iter()
        .any(|s| s.assigned_name.is_some());
    let headers = language.headers();
    let columns = if with_names { &headers[..] } else { &headers[..4] };

    let mut out = columns.join("\t");
    out.push('\n');
    for segment in &partition.segments {
        let _ = write!(
            out,
            "{}\t{}\t{}\t{}",
            segment.index,
            segment.start,
            segment.end,
            language.duration(segment.duration_minutes)
        );
        if with_names {
            out.push('\t');
            out.push_str(segment.assigned_name.as_deref().unwrap_or(""));
        }
        out.push('\n');
    }
    out
}

/// Render a full outcome: total, overnight notice, then each partition with
/// its title, description and table. The remainder alternative is shown at
/// `first_extra` (its default split when `None`).
///
/// # Errors
/// Returns `ShiftError::InvalidRemainderSplit` for an invalid `first_extra`.
pub fn render_outcome(
    outcome: &PartitionOutcome,
    first_extra: Option<u32>,
    language: Language,
) -> Result<String> {
    let mut out = String::new();
    match outcome {
        PartitionOutcome::Exact(partition) => {
            push_header(&mut out, partition.interval(), language);
            out.push_str(&language.exact_banner(partition.segments.len()));
            out.push_str("\n\n");
            let title = language.strategy_title(partition.strategy);
            push_partition(&mut out, title, None, partition, language);
        }
        PartitionOutcome::Alternatives(alts) => {
            let plan = &alts.max_equal;
            push_header(&mut out, Interval::new(plan.start, plan.end), language);
            out.push_str(language.fallback_banner());
            out.push_str("\n\n");

            let first_extra = first_extra.unwrap_or_else(|| plan.default_first_extra());
            let split = plan.split(first_extra)?;
            let max_equal = plan.partition(first_extra)?;
            let description = format!(
                "{}\n{}",
                language.max_equal_description(plan),
                language.split_line(split.first_extra, split.last_extra)
            );
            let heading = language.option_heading(0, language.strategy_title(max_equal.strategy));
            push_partition(&mut out, &heading, Some(&description), &max_equal, language);

            let adjusted = [&alts.rounded_up, &alts.rounded_down];
            for (position, partition) in adjusted.into_iter().enumerate() {
                out.push('\n');
                let title = language.strategy_title(partition.strategy);
                let heading = language.option_heading(position + 1, title);
                let description = language.adjusted_description(partition);
                push_partition(&mut out, &heading, Some(&description), partition, language);
            }
        }
    }
    Ok(out)
}

/// Render a standalone partition (e.g. a direct split) with header and table.
pub fn render_partition(partition: &Partition, language: Language) -> String {
    let mut out = String::new();
    push_header(&mut out, partition.interval(), language);
    out.push('\n');
    let title = language.strategy_title(partition.strategy);
    push_partition(&mut out, title, None, partition, language);
    out
}

fn push_header(out: &mut String, interval: Interval, language: Language) {
    out.push_str(&language.total_line(interval.duration_minutes()));
    out.push('\n');
    if interval.crosses_midnight() {
        out.push_str(&language.overnight_notice(interval));
        out.push('\n');
    }
}

fn push_partition(
    out: &mut String,
    heading: &str,
    description: Option<&str>,
    partition: &Partition,
    language: Language,
) {
    out.push_str(heading);
    out.push('\n');
    if let Some(description) = description {
        out.push_str(description);
        out.push('\n');
    }
    if partition.adjustment_minutes != 0 {
        out.push_str(&language.new_schedule(partition));
        out.push('\n');
    }
    out.push_str(&language.total_line(partition.total_minutes()));
    out.push('\n');
    out.push_str(&render_table(partition, language));
}
