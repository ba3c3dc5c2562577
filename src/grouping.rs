use serde::Serialize;
use std::collections::HashSet;

/// Number of non-absent rolls that closes a group on the top sheet.
pub const PRESENT_THRESHOLD: usize = 200;

/// A band of consecutive rolls from the input sequence.
///
/// `full_group` preserves the input order and includes absentees; `absents`
/// is the subset of `full_group` flagged absent by the caller, also in input
/// order. Absentees occupy a slot in the band but do not count toward the
/// present threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub full_group: Vec<String>,
    pub absents: Vec<String>,
}

impl Group {
    fn empty() -> Self {
        Group {
            full_group: Vec::new(),
            absents: Vec::new(),
        }
    }

    /// Rolls in this group that are not absent, in input order
    pub fn present(&self) -> Vec<String> {
        self.full_group
            .iter()
            .filter(|roll| !self.absents.contains(roll))
            .cloned()
            .collect()
    }
}

/// Partition an ordered roll sequence into present-count bands
///
/// Walks the sequence once, appending every roll to the current group. A roll
/// in `absent` is also recorded in the group's absentee list; otherwise it
/// bumps the present count. The group is closed as soon as the present count
/// reaches `threshold`, and a trailing partial group is emitted if any rolls
/// remain.
///
/// Concatenating `full_group` across the returned groups reproduces `rolls`
/// exactly. Empty input produces no groups.
///
/// # Arguments
/// * `rolls` - Full ordered roll sequence from the spreadsheet
/// * `absent` - Set of rolls reported absent by the caller
/// * `threshold` - Present-count cutoff per group (200 for the top sheet)
///
/// # Examples
/// ```
/// use std::collections::HashSet;
/// use topsheet::grouping::group_by_present;
///
/// let rolls: Vec<String> = (1..=5).map(|n| n.to_string()).collect();
/// let absent: HashSet<String> = ["2".to_string()].into_iter().collect();
///
/// let groups = group_by_present(&rolls, &absent, 3);
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].full_group, vec!["1", "2", "3", "4"]);
/// assert_eq!(groups[0].absents, vec!["2"]);
/// assert_eq!(groups[1].full_group, vec!["5"]);
/// ```
pub fn group_by_present(rolls: &[String], absent: &HashSet<String>, threshold: usize) -> Vec<Group> {
    let mut groups = Vec::new();
    let mut current = Group::empty();
    let mut present_count = 0;

    for roll in rolls {
        current.full_group.push(roll.clone());
        if absent.contains(roll) {
            current.absents.push(roll.clone());
        } else {
            present_count += 1;
        }

        if present_count == threshold {
            groups.push(std::mem::replace(&mut current, Group::empty()));
            present_count = 0;
        }
    }

    if !current.full_group.is_empty() {
        groups.push(current);
    }

    groups
}

/// Compress an ordered present-roll sequence into range tokens
///
/// Scans left to right, extending a run while the next roll's integer value
/// is exactly one more than the current roll's. A run of length 1 emits the
/// roll itself; longer runs emit `"<start>---<end>=<count>"`. Rolls that do
/// not parse as integers fail the adjacency test on both sides and become
/// single-element tokens.
///
/// # Arguments
/// * `present` - Ordered rolls with absentees already filtered out
///
/// # Examples
/// ```
/// use topsheet::grouping::compress_ranges;
///
/// let present: Vec<String> = ["1", "2", "3", "5", "6"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// assert_eq!(compress_ranges(&present), vec!["1---3=3", "5---6=2"]);
/// ```
pub fn compress_ranges(present: &[String]) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < present.len() {
        let start = &present[i];
        let mut end = start;
        let mut count = 1;

        while i + 1 < present.len() && is_successor(&present[i], &present[i + 1]) {
            i += 1;
            end = &present[i];
            count += 1;
        }

        if count == 1 {
            tokens.push(start.clone());
        } else {
            tokens.push(format!("{}---{}={}", start, end, count));
        }
        i += 1;
    }

    tokens
}

/// Join range tokens into the text shown on the top sheet
pub fn range_text(tokens: &[String]) -> String {
    tokens.join(", ")
}

// Adjacency test for range compression. Numeric comparison, so leading zeros
// and formatting differences do not break a run.
fn is_successor(a: &str, b: &str) -> bool {
    match (a.trim().parse::<i64>(), b.trim().parse::<i64>()) {
        (Ok(a), Ok(b)) => b == a + 1,
        _ => false,
    }
}
