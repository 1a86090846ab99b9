//! Schedule audit. Checks a timeline against the constraints the generation
//! prompt asks for. Reports findings; never modifies entries.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use chrono::NaiveDate;

use crate::templates::models::TemplateStructure;
use crate::timeline::models::TimelineEntryDraft;

/// One constraint the timeline fails. Indices refer to positions in the audited slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleIssue {
    EndBeforeStart {
        index: usize,
    },
    OutsideWindow {
        index: usize,
    },
    Overlap {
        responsible_email: String,
        first: usize,
        second: usize,
    },
    MissingCoverage {
        section: String,
        subtitle: Option<String>,
    },
}

impl fmt::Display for ScheduleIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleIssue::EndBeforeStart { index } => {
                write!(f, "entry {index} ends before it starts")
            }
            ScheduleIssue::OutsideWindow { index } => {
                write!(f, "entry {index} falls outside the project window")
            }
            ScheduleIssue::Overlap {
                responsible_email,
                first,
                second,
            } => write!(
                f,
                "entries {first} and {second} overlap for {responsible_email}"
            ),
            ScheduleIssue::MissingCoverage {
                section,
                subtitle: Some(subtitle),
            } => write!(f, "no entry covers '{section}' / '{subtitle}'"),
            ScheduleIssue::MissingCoverage {
                section,
                subtitle: None,
            } => write!(f, "no entry covers '{section}'"),
        }
    }
}

/// Audits `entries` against the project window and the template structure.
///
/// Date ranges are inclusive on both ends, so an entry ending on the day
/// another starts counts as an overlap for the same collaborator.
pub fn audit_schedule(
    entries: &[TimelineEntryDraft],
    start_date: NaiveDate,
    deadline: NaiveDate,
    structure: &TemplateStructure,
) -> Vec<ScheduleIssue> {
    let mut issues = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        if entry.end < entry.start {
            issues.push(ScheduleIssue::EndBeforeStart { index });
        }
        if entry.start < start_date || entry.end > deadline {
            issues.push(ScheduleIssue::OutsideWindow { index });
        }
    }

    issues.extend(find_overlaps(entries));
    issues.extend(find_missing_coverage(entries, structure));
    issues
}

fn find_overlaps(entries: &[TimelineEntryDraft]) -> Vec<ScheduleIssue> {
    let mut by_collaborator: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (index, entry) in entries.iter().enumerate() {
        if let Some(email) = entry.responsible_email.as_deref() {
            by_collaborator.entry(email).or_default().push(index);
        }
    }

    let mut issues = Vec::new();
    for (email, mut indices) in by_collaborator {
        indices.sort_by_key(|&i| (entries[i].start, entries[i].end));

        // Latest end seen so far and the entry holding it.
        let mut reach: Option<(NaiveDate, usize)> = None;
        for index in indices {
            let entry = &entries[index];
            if let Some((max_end, holder)) = reach {
                if entry.start <= max_end {
                    issues.push(ScheduleIssue::Overlap {
                        responsible_email: email.to_string(),
                        first: holder.min(index),
                        second: holder.max(index),
                    });
                }
                if entry.end > max_end {
                    reach = Some((entry.end, index));
                }
            } else {
                reach = Some((entry.end, index));
            }
        }
    }
    issues
}

fn find_missing_coverage(
    entries: &[TimelineEntryDraft],
    structure: &TemplateStructure,
) -> Vec<ScheduleIssue> {
    let covered: HashSet<(&str, Option<&str>)> = entries
        .iter()
        .map(|e| (e.section.trim(), e.subtitle.as_deref().map(str::trim)))
        .collect();
    let covered_sections: HashSet<&str> = covered.iter().map(|(s, _)| *s).collect();

    let mut issues = Vec::new();
    for section in &structure.sections {
        let title = section.title.trim();
        if section.subtitles.is_empty() {
            if !covered_sections.contains(title) {
                issues.push(ScheduleIssue::MissingCoverage {
                    section: title.to_string(),
                    subtitle: None,
                });
            }
            continue;
        }
        for subtitle in &section.subtitles {
            if !covered.contains(&(title, Some(subtitle.trim()))) {
                issues.push(ScheduleIssue::MissingCoverage {
                    section: title.to_string(),
                    subtitle: Some(subtitle.trim().to_string()),
                });
            }
        }
    }
    issues
}
